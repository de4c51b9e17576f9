//! Coordinates and distances

use serde::{Deserialize, Serialize};

use crate::ZoneError;

/// Mean Earth radius (m)
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Meters per degree for the flat-earth approximation
pub const METERS_PER_DEGREE: f64 = 111_000.0;

/// WGS84 latitude/longitude in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    /// Validated point
    pub fn new(lat: f64, lon: f64) -> Result<Self, ZoneError> {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(ZoneError::InvalidCoordinate { lat, lon });
        }
        Ok(Self { lat, lon })
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Lat: {:.5}, Lon: {:.5}", self.lat, self.lon)
    }
}

/// Great-circle distance in meters
pub fn haversine_m(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_M * c
}

/// Flat approximation: both axes scaled by 111 km per degree.
///
/// Only meaningful over a few hundred meters.
pub fn flat_distance_m(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.lat - a.lat) * METERS_PER_DEGREE;
    let d_lon = (b.lon - a.lon) * METERS_PER_DEGREE;
    (d_lat * d_lat + d_lon * d_lon).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rejects_out_of_range() {
        assert!(GeoPoint::new(91.0, 0.0).is_err());
        assert!(GeoPoint::new(0.0, -181.0).is_err());
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
        assert!(GeoPoint::new(-6.2, 106.8).is_ok());
    }

    #[test]
    fn test_haversine_zero_and_symmetric() {
        let a = GeoPoint::new(-6.2088, 106.8456).unwrap();
        let b = GeoPoint::new(-7.2575, 112.7521).unwrap();
        assert_eq!(haversine_m(a, a), 0.0);
        assert_relative_eq!(haversine_m(a, b), haversine_m(b, a), epsilon = 1e-6);
    }

    #[test]
    fn test_haversine_one_degree_of_latitude() {
        let a = GeoPoint::new(0.0, 0.0).unwrap();
        let b = GeoPoint::new(1.0, 0.0).unwrap();
        // 2πR / 360
        assert_relative_eq!(haversine_m(a, b), 111_194.93, epsilon = 0.1);
    }

    #[test]
    fn test_flat_distance() {
        let a = GeoPoint::new(0.0, 0.0).unwrap();
        let b = GeoPoint::new(0.001, 0.0).unwrap();
        assert_relative_eq!(flat_distance_m(a, b), 111.0, epsilon = 1e-6);
    }
}
