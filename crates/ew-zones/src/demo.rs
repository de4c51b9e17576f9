//! Demo locations for running the zone checks without a GPS fix

use rand::Rng;

use crate::geo::GeoPoint;

/// Fixed demo points: inside Jakarta zones, then Surabaya and Jayapura
pub const DEMO_LOCATIONS: [GeoPoint; 5] = [
    GeoPoint { lat: -6.2088, lon: 106.8456 },
    GeoPoint { lat: -6.1751, lon: 106.8650 },
    GeoPoint { lat: -6.2000, lon: 106.8300 },
    GeoPoint { lat: -7.2575, lon: 112.7521 },
    GeoPoint { lat: -2.5489, lon: 140.6917 },
];

/// Pick one demo point
pub fn demo_location<R: Rng + ?Sized>(rng: &mut R) -> GeoPoint {
    DEMO_LOCATIONS[rng.random_range(0..DEMO_LOCATIONS.len())]
}
