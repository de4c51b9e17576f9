//! Fixed risk-zone catalog

use serde::{Deserialize, Serialize};

use crate::ZoneError;
use crate::geo::{GeoPoint, flat_distance_m, haversine_m};

/// Default radius for the landmark quick check (m)
pub const DEFAULT_LANDMARK_THRESHOLD_M: f64 = 200.0;

/// Circular area known to trigger gambling activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskZone {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub radius_m: f64,
    pub warning: String,
}

impl RiskZone {
    pub fn center(&self) -> GeoPoint {
        GeoPoint {
            lat: self.latitude,
            lon: self.longitude,
        }
    }
}

/// Named point used by the landmark quick check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// A zone containing the queried point
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneHit<'a> {
    pub zone: &'a RiskZone,
    pub distance_m: f64,
}

impl ZoneHit<'_> {
    /// Warning text shown to the user
    pub fn message(&self) -> String {
        format!(
            "{}\n\n{}\n\nDistance: {}m from the center of the risk zone.",
            self.zone.name, self.zone.warning, self.distance_m as i64
        )
    }
}

/// Zones and landmarks to check a location against
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ZoneCatalog {
    #[serde(default)]
    pub zones: Vec<RiskZone>,
    #[serde(default)]
    pub landmarks: Vec<Landmark>,
}

impl ZoneCatalog {
    /// Built-in demo catalog
    pub fn builtin() -> Self {
        let zone = |name: &str, lat, lon, radius_m, warning: &str| RiskZone {
            name: name.into(),
            latitude: lat,
            longitude: lon,
            radius_m,
            warning: warning.into(),
        };
        let landmark = |name: &str, lat, lon| Landmark {
            name: name.into(),
            latitude: lat,
            longitude: lon,
        };

        Self {
            zones: vec![
                zone(
                    "Mall Besar Jakarta",
                    -6.2088,
                    106.8456,
                    500.0,
                    "⚠️ Caution: shopping malls are a common access point for online gambling!",
                ),
                zone(
                    "Kawasan Hiburan Malam Kemang",
                    -6.1751,
                    106.8650,
                    300.0,
                    "🚨 High risk zone: many gambling addictions start in nightlife areas.",
                ),
                zone(
                    "Game Center Mangga Dua",
                    -6.2293,
                    106.8140,
                    200.0,
                    "⚠️ Attention: game centers can be a gateway to online gambling.",
                ),
                zone(
                    "Pusat Perbelanjaan Sudirman",
                    -6.2250,
                    106.8200,
                    400.0,
                    "⚠️ Busy area with easy internet access - an online gambling trigger zone.",
                ),
                zone(
                    "Kawasan Hiburan Blok M",
                    -6.2443,
                    106.7988,
                    350.0,
                    "🚨 Risk zone: a gathering place often linked to gambling activity.",
                ),
            ],
            landmarks: vec![
                landmark("Pusat Hiburan Malam A", -6.200000, 106.816666),
                landmark("Game Center B", -6.21, 106.82),
                landmark("Area Pusat Kota - Zona Risiko", -6.19, 106.81),
            ],
        }
    }

    /// Parse a catalog from TOML
    pub fn from_toml_str(s: &str) -> Result<Self, ZoneError> {
        let catalog: Self = toml::from_str(s).map_err(|e| ZoneError::Parse(e.to_string()))?;
        for zone in &catalog.zones {
            GeoPoint::new(zone.latitude, zone.longitude)?;
            if !(zone.radius_m > 0.0) {
                return Err(ZoneError::Parse(format!(
                    "zone '{}' has non-positive radius {}",
                    zone.name, zone.radius_m
                )));
            }
        }
        for landmark in &catalog.landmarks {
            GeoPoint::new(landmark.latitude, landmark.longitude)?;
        }
        log::debug!(
            "Zone catalog loaded: {} zones, {} landmarks",
            catalog.zones.len(),
            catalog.landmarks.len()
        );
        Ok(catalog)
    }

    pub fn to_toml(&self) -> Result<String, ZoneError> {
        toml::to_string_pretty(self).map_err(|e| ZoneError::Parse(e.to_string()))
    }

    pub fn zones(&self) -> &[RiskZone] {
        &self.zones
    }

    /// First zone (catalog order) whose radius contains `point`
    pub fn nearest_hit(&self, point: GeoPoint) -> Option<ZoneHit<'_>> {
        self.zones.iter().find_map(|zone| {
            let distance_m = haversine_m(point, zone.center());
            (distance_m <= zone.radius_m).then_some(ZoneHit { zone, distance_m })
        })
    }

    /// First landmark within `threshold_m`, using the flat approximation
    pub fn near_landmark(&self, point: GeoPoint, threshold_m: f64) -> Option<&Landmark> {
        self.landmarks.iter().find(|l| {
            let center = GeoPoint {
                lat: l.latitude,
                lon: l.longitude,
            };
            flat_distance_m(point, center) <= threshold_m
        })
    }
}
