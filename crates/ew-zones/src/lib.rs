//! ew-zones: Location risk-zone warnings
//!
//! Two independent checks for a location:
//! - [`ZoneCatalog`]: fixed circular zones (haversine) and a landmark quick check
//! - [`ProvinceStatus`]: province-level risk table behind a [`ProvinceResolver`]
//!
//! Location acquisition and reverse geocoding live outside this crate.

pub mod catalog;
pub mod demo;
pub mod geo;
pub mod province;

pub use catalog::*;
pub use demo::*;
pub use geo::*;
pub use province::*;

use thiserror::Error;

/// Zone errors
#[derive(Debug, Error)]
pub enum ZoneError {
    #[error("Invalid coordinate: lat {lat}, lon {lon}")]
    InvalidCoordinate { lat: f64, lon: f64 },

    #[error("Parse error: {0}")]
    Parse(String),
}
