use serde::Serialize;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum CoordinateError {
    #[error("coordinate must be finite, got lat={lat}, lon={lon}")]
    NonFinite { lat: f64, lon: f64 },
}

/// A clicked point in decimal degrees.
///
/// Range is not checked: only NaN and infinities are rejected, so any
/// `Coordinate` that exists can be classified.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    lat: f64,
    lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Result<Self, CoordinateError> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(CoordinateError::NonFinite { lat, lon });
        }
        Ok(Self { lat, lon })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Latitude {:.4}, Longitude {:.4}", self.lat, self.lon)
    }
}

/// Simulated demographic summary for one latitude band.
///
/// Serializes to a flat map using the display labels as keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionRecord {
    #[serde(rename = "Region")]
    pub region: String,
    #[serde(rename = "Estimated Population (2023)")]
    pub population: String,
    #[serde(rename = "Major Industries")]
    pub industries: String,
    #[serde(rename = "Key Demographics")]
    pub demographics: String,
    #[serde(rename = "Average Household Size")]
    pub household_size: String,
    #[serde(rename = "Notes")]
    pub notes: String,
}

impl RegionRecord {
    /// Label/value pairs in display order.
    pub fn to_display_pairs(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("Region", self.region.as_str()),
            ("Estimated Population (2023)", self.population.as_str()),
            ("Major Industries", self.industries.as_str()),
            ("Key Demographics", self.demographics.as_str()),
            ("Average Household Size", self.household_size.as_str()),
            ("Notes", self.notes.as_str()),
        ]
    }
}

/// Half-open latitude interval `[lower, upper)`. `None` means unbounded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Band {
    pub lower: Option<f64>,
    pub upper: Option<f64>,
    pub record: RegionRecord,
}

impl Band {
    pub fn contains(&self, lat: f64) -> bool {
        self.lower.map_or(true, |lo| lat >= lo) && self.upper.map_or(true, |hi| lat < hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(region: &str) -> RegionRecord {
        RegionRecord {
            region: region.to_string(),
            population: "p".to_string(),
            industries: "i".to_string(),
            demographics: "d".to_string(),
            household_size: "h".to_string(),
            notes: "n".to_string(),
        }
    }

    #[test]
    fn coordinate_rejects_non_finite() {
        assert!(matches!(
            Coordinate::new(f64::NAN, 174.0),
            Err(CoordinateError::NonFinite { .. })
        ));
        assert!(Coordinate::new(-41.0, f64::INFINITY).is_err());
        assert!(Coordinate::new(f64::NEG_INFINITY, 0.0).is_err());
    }

    #[test]
    fn coordinate_accepts_out_of_range_finite_values() {
        let c = Coordinate::new(-200.0, 720.0).unwrap();
        assert_eq!(c.lat(), -200.0);
        assert_eq!(c.lon(), 720.0);
    }

    #[test]
    fn coordinate_display_uses_four_decimals() {
        let c = Coordinate::new(-45.0, 170.12346).unwrap();
        assert_eq!(c.to_string(), "Latitude -45.0000, Longitude 170.1235");
    }

    #[test]
    fn band_bounds_are_half_open() {
        let band = Band {
            lower: Some(-41.0),
            upper: Some(-36.0),
            record: record("Central"),
        };
        assert!(band.contains(-41.0));
        assert!(band.contains(-36.000001));
        assert!(!band.contains(-36.0));
        assert!(!band.contains(-41.000001));
    }

    #[test]
    fn unbounded_band_contains_extremes() {
        let band = Band {
            lower: None,
            upper: None,
            record: record("All"),
        };
        assert!(band.contains(f64::MIN));
        assert!(band.contains(f64::MAX));
    }

    #[test]
    fn record_serializes_with_display_labels() {
        let value = serde_json::to_value(record("South Island")).unwrap();
        assert_eq!(value["Region"], "South Island");
        assert_eq!(value["Average Household Size"], "h");
        assert_eq!(value.as_object().unwrap().len(), 6);
    }

    #[test]
    fn display_pairs_follow_label_order() {
        let r = record("X");
        let keys: Vec<_> = r.to_display_pairs().into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            [
                "Region",
                "Estimated Population (2023)",
                "Major Industries",
                "Key Demographics",
                "Average Household Size",
                "Notes"
            ]
        );
    }
}
