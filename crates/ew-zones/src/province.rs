//! Province-level risk lookup
//!
//! Resolves a location to an Indonesian province name through an external
//! [`ProvinceResolver`] (a geocoder), falls back to coarse bounding boxes,
//! then looks the name up in a fixed risk table. Unknown provinces count as
//! risk.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;

/// Fixed province table: `true` = risk zone
const PROVINCE_RISK: &[(&str, bool)] = &[
    // Sumatera
    ("Aceh", true),
    ("Sumatera Utara", true),
    ("Sumatera Barat", true),
    ("Riau", true),
    ("Kepulauan Riau", true),
    ("Jambi", true),
    ("Bengkulu", true),
    ("Sumatera Selatan", true),
    ("Bangka Belitung", true),
    ("Lampung", true),
    // Jawa
    ("Banten", true),
    ("DKI Jakarta", true),
    ("Jawa Barat", true),
    ("Jawa Tengah", true),
    ("DI Yogyakarta", true),
    ("Jawa Timur", true),
    // Kalimantan
    ("Kalimantan Barat", true),
    ("Kalimantan Tengah", true),
    ("Kalimantan Selatan", true),
    ("Kalimantan Timur", true),
    ("Kalimantan Utara", true),
    // Sulawesi
    ("Sulawesi Utara", false),
    ("Sulawesi Tengah", false),
    ("Sulawesi Selatan", false),
    ("Sulawesi Tenggara", false),
    ("Sulawesi Barat", false),
    ("Gorontalo", false),
    // Bali & Nusa Tenggara
    ("Bali", true),
    ("Nusa Tenggara Barat", true),
    ("Nusa Tenggara Timur", true),
    // Maluku
    ("Maluku", true),
    ("Maluku Utara", true),
    // Papua
    ("Papua", false),
    ("Papua Barat", false),
];

/// Geocoder names (lowercase) mapped to table names
const ENGLISH_TO_INDONESIAN: &[(&str, &str)] = &[
    ("east java", "Jawa Timur"),
    ("central java", "Jawa Tengah"),
    ("west java", "Jawa Barat"),
    ("yogyakarta", "DI Yogyakarta"),
    ("jakarta", "DKI Jakarta"),
    ("north sumatra", "Sumatera Utara"),
    ("south sumatra", "Sumatera Selatan"),
    ("west sumatra", "Sumatera Barat"),
    ("west papua", "Papua Barat"),
    ("papua", "Papua"),
    ("north sulawesi", "Sulawesi Utara"),
    ("south sulawesi", "Sulawesi Selatan"),
    ("central sulawesi", "Sulawesi Tengah"),
    ("southeast sulawesi", "Sulawesi Tenggara"),
    ("west sulawesi", "Sulawesi Barat"),
    ("gorontalo", "Gorontalo"),
];

static PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(provinsi|province)\s+").expect("static regex"));

/// Inclusive latitude/longitude box
#[derive(Debug, Clone, Copy)]
struct BoundingBox {
    name: &'static str,
    min_lat: f64,
    max_lat: f64,
    min_lon: f64,
    max_lon: f64,
}

impl BoundingBox {
    fn contains(&self, p: GeoPoint) -> bool {
        (self.min_lat..=self.max_lat).contains(&p.lat)
            && (self.min_lon..=self.max_lon).contains(&p.lon)
    }
}

const FALLBACK_BOXES: &[BoundingBox] = &[
    BoundingBox {
        name: "Sulawesi",
        min_lat: -6.0,
        max_lat: 3.5,
        min_lon: 118.5,
        max_lon: 125.5,
    },
    BoundingBox {
        name: "Papua",
        min_lat: -10.0,
        max_lat: 0.0,
        min_lon: 129.0,
        max_lon: 141.0,
    },
];

/// Strip a "Provinsi"/"Province" prefix and map English geocoder names.
///
/// Returns `None` for blank input.
pub fn normalize_province(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let stripped = PREFIX.replace_all(trimmed, "");
    let lower = stripped.to_lowercase();
    let mapped = ENGLISH_TO_INDONESIAN
        .iter()
        .find(|(en, _)| *en == lower)
        .map(|(_, id)| (*id).to_string());
    Some(mapped.unwrap_or_else(|| stripped.into_owned()))
}

/// Risk flag from the fixed table, `None` when the province is unknown
pub fn province_risk(name: &str) -> Option<bool> {
    let normalized = normalize_province(name)?;
    PROVINCE_RISK
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(&normalized))
        .map(|&(_, risk)| risk)
}

/// Coarse region name for Sulawesi and Papua, when a geocoder gave nothing
pub fn province_by_bounding_box(point: GeoPoint) -> Option<&'static str> {
    FALLBACK_BOXES
        .iter()
        .find(|b| b.contains(point))
        .map(|b| b.name)
}

/// Every province in the table with its risk flag
pub fn provinces() -> impl Iterator<Item = (&'static str, bool)> {
    PROVINCE_RISK.iter().copied()
}

/// External geocoder: location to administrative area name
pub trait ProvinceResolver {
    fn resolve(&self, point: GeoPoint) -> Option<String>;
}

/// Resolver that never answers; forces the bounding-box fallback
#[derive(Debug, Clone, Copy, Default)]
pub struct NoResolver;

impl ProvinceResolver for NoResolver {
    fn resolve(&self, _point: GeoPoint) -> Option<String> {
        None
    }
}

impl<F> ProvinceResolver for F
where
    F: Fn(GeoPoint) -> Option<String>,
{
    fn resolve(&self, point: GeoPoint) -> Option<String> {
        self(point)
    }
}

/// Result of a province check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvinceStatus {
    /// Resolved name, if any
    pub province: Option<String>,
    pub is_risk: bool,
}

impl ProvinceStatus {
    /// Resolve, fall back, look up. Unknown → risk.
    pub fn check(resolver: &dyn ProvinceResolver, point: GeoPoint) -> Self {
        let province = resolver
            .resolve(point)
            .filter(|p| !p.trim().is_empty())
            .or_else(|| province_by_bounding_box(point).map(str::to_string));

        let is_risk = province
            .as_deref()
            .and_then(province_risk)
            .unwrap_or(true);

        log::debug!("Province check at {point}: {province:?} risk={is_risk}");
        Self { province, is_risk }
    }

    pub fn label(&self) -> &'static str {
        if self.is_risk {
            "RISK ZONE"
        } else {
            "SAFE (NON-RISK)"
        }
    }

    /// Shareable status text
    pub fn share_text(&self) -> String {
        format!(
            "My location is in province: {}\nStatus: {}",
            self.province.as_deref().unwrap_or("Unknown"),
            self.label()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_has_34_provinces() {
        assert_eq!(provinces().count(), 34);
        assert_eq!(provinces().filter(|(_, risk)| !risk).count(), 8);
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize_province("  "), None);
        assert_eq!(normalize_province("Provinsi Jawa Timur").as_deref(), Some("Jawa Timur"));
        assert_eq!(normalize_province("PROVINCE Bali").as_deref(), Some("Bali"));
        assert_eq!(normalize_province("East Java").as_deref(), Some("Jawa Timur"));
        assert_eq!(normalize_province("Somewhere").as_deref(), Some("Somewhere"));
    }

    #[test]
    fn test_province_risk_lookup() {
        assert_eq!(province_risk("jawa timur"), Some(true));
        assert_eq!(province_risk("South Sulawesi"), Some(false));
        assert_eq!(province_risk("Province Papua"), Some(false));
        assert_eq!(province_risk("Atlantis"), None);
    }

    #[test]
    fn test_bounding_box_fallback() {
        // Makassar
        assert_eq!(
            province_by_bounding_box(GeoPoint::new(-5.14, 119.41).unwrap()),
            Some("Sulawesi")
        );
        // Jayapura
        assert_eq!(
            province_by_bounding_box(GeoPoint::new(-2.5489, 140.6917).unwrap()),
            Some("Papua")
        );
        assert_eq!(province_by_bounding_box(GeoPoint::new(-6.2, 106.8).unwrap()), None);
    }

    #[test]
    fn test_check_uses_resolver_first() {
        let resolver = |_: GeoPoint| Some("Provinsi Sulawesi Utara".to_string());
        let status = ProvinceStatus::check(&resolver, GeoPoint::new(-6.2, 106.8).unwrap());
        assert_eq!(status.province.as_deref(), Some("Provinsi Sulawesi Utara"));
        assert!(!status.is_risk);
    }

    #[test]
    fn test_check_falls_back_and_defaults_to_risk() {
        let papua = ProvinceStatus::check(&NoResolver, GeoPoint::new(-2.5489, 140.6917).unwrap());
        assert_eq!(papua.province.as_deref(), Some("Papua"));
        assert!(!papua.is_risk);

        // "Sulawesi" alone is not a table entry, so it counts as risk
        let sulawesi = ProvinceStatus::check(&NoResolver, GeoPoint::new(-5.14, 119.41).unwrap());
        assert_eq!(sulawesi.province.as_deref(), Some("Sulawesi"));
        assert!(sulawesi.is_risk);

        let unknown = ProvinceStatus::check(&NoResolver, GeoPoint::new(-6.2, 106.8).unwrap());
        assert_eq!(unknown.province, None);
        assert!(unknown.is_risk);
        assert_eq!(
            unknown.share_text(),
            "My location is in province: Unknown\nStatus: RISK ZONE"
        );
    }
}
