use crate::types::{Band, Coordinate, RegionRecord};
use anyhow::{anyhow, Context, Result};
use csv::{ReaderBuilder, WriterBuilder};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;
use thiserror::Error;

const NOTES: &str = "This is simulated data. Real demographic data would be much more \
                     granular and specific to the exact statistical area.";

// (lower, upper, region, population, industries, demographics, household size)
const NEW_ZEALAND: [(Option<f64>, Option<f64>, &str, &str, &str, &str, &str); 3] = [
    (
        None,
        Some(-41.0),
        "South Island",
        "Approx. 1.2 million",
        "Agriculture, Tourism, Hydroelectric Power",
        "Slightly older population, higher proportion of European ethnicity",
        "2.5 people",
    ),
    (
        Some(-41.0),
        Some(-36.0),
        "Central North Island",
        "Approx. 1.5 million",
        "Dairy Farming, Forestry, Geothermal Energy, Tourism",
        "Diverse population, significant Māori population, younger families in some areas",
        "2.8 people",
    ),
    (
        Some(-36.0),
        None,
        "Upper North Island (Auckland/Northland)",
        "Approx. 2.0 million",
        "Finance, Technology, Trade, Tourism, Manufacturing",
        "Highly diverse, younger population, significant Asian and Pacific Islander populations",
        "3.1 people",
    ),
];

#[derive(Debug, Error, PartialEq)]
pub enum BandError {
    #[error("band table is empty")]
    Empty,
    #[error("first band ({0}) must have no lower bound")]
    BoundedStart(String),
    #[error("last band ({0}) must have no upper bound")]
    BoundedEnd(String),
    #[error("band {index} ({region}) has a non-finite bound")]
    NonFiniteBound { index: usize, region: String },
    #[error("band {index} ({region}) has lower bound >= upper bound")]
    Inverted { index: usize, region: String },
    #[error("band {index} ({region}) does not end where band {} begins", .index + 1)]
    Discontinuous { index: usize, region: String },
}

/// Ordered latitude bands covering the whole real line exactly once.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandTable {
    bands: Vec<Band>,
}

impl BandTable {
    /// The built-in three-band New Zealand table.
    pub fn new_zealand() -> Self {
        let bands = NEW_ZEALAND
            .iter()
            .map(|&(lower, upper, region, population, industries, demographics, household)| Band {
                lower,
                upper,
                record: RegionRecord {
                    region: region.to_string(),
                    population: population.to_string(),
                    industries: industries.to_string(),
                    demographics: demographics.to_string(),
                    household_size: household.to_string(),
                    notes: NOTES.to_string(),
                },
            })
            .collect();
        Self { bands }
    }

    pub fn from_bands(bands: Vec<Band>) -> Result<Self, BandError> {
        let first = bands.first().ok_or(BandError::Empty)?;
        if first.lower.is_some() {
            return Err(BandError::BoundedStart(first.record.region.clone()));
        }
        if let Some(last) = bands.last() {
            if last.upper.is_some() {
                return Err(BandError::BoundedEnd(last.record.region.clone()));
            }
        }

        for (index, band) in bands.iter().enumerate() {
            let region = || band.record.region.clone();
            let finite = |b: Option<f64>| b.map_or(true, f64::is_finite);
            if !finite(band.lower) || !finite(band.upper) {
                return Err(BandError::NonFiniteBound { index, region: region() });
            }
            if let (Some(lo), Some(hi)) = (band.lower, band.upper) {
                if lo >= hi {
                    return Err(BandError::Inverted { index, region: region() });
                }
            }
        }

        for (index, pair) in bands.windows(2).enumerate() {
            match (pair[0].upper, pair[1].lower) {
                (Some(hi), Some(lo)) if hi == lo => {}
                _ => {
                    return Err(BandError::Discontinuous {
                        index,
                        region: pair[0].record.region.clone(),
                    })
                }
            }
        }

        Ok(Self { bands })
    }

    /// Loads a band table from CSV.
    ///
    /// Header: `lower,upper,region,population,industries,demographics,household_size,notes`.
    /// An empty `lower` or `upper` cell means unbounded.
    pub fn load_csv(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open band file: {:?}", path))?;
        let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_reader(file);

        let mut bands = Vec::new();
        for (row, result) in rdr.deserialize::<BandRow>().enumerate() {
            let r = result.with_context(|| format!("Invalid band row {} in {:?}", row + 1, path))?;
            bands.push(Band {
                lower: r.lower,
                upper: r.upper,
                record: RegionRecord {
                    region: r.region,
                    population: r.population,
                    industries: r.industries,
                    demographics: r.demographics,
                    household_size: r.household_size,
                    notes: r.notes,
                },
            });
        }

        let table = Self::from_bands(bands)
            .with_context(|| format!("Invalid band table in {:?}", path))?;
        tracing::debug!(bands = table.len(), "loaded band table from {:?}", path);
        Ok(table)
    }

    /// The band whose `[lower, upper)` interval holds the coordinate's latitude.
    ///
    /// Takes a `Coordinate` so NaN and infinities never reach the search.
    pub fn find(&self, coord: Coordinate) -> &Band {
        let lat = coord.lat();
        // Bands are sorted and contiguous, so the first band whose upper
        // bound exceeds `lat` is the one holding it. The last band is
        // unbounded above, which keeps the index in range.
        let idx = self
            .bands
            .partition_point(|b| b.upper.map_or(false, |hi| lat >= hi));
        &self.bands[idx.min(self.bands.len() - 1)]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Band> {
        self.bands.iter()
    }

    pub fn len(&self) -> usize {
        self.bands.len()
    }
}

impl Default for BandTable {
    fn default() -> Self {
        Self::new_zealand()
    }
}

/// Uses the band file when one is given, otherwise the built-in table.
pub fn load_table(path: Option<&Path>) -> Result<BandTable> {
    match path {
        Some(p) => BandTable::load_csv(p),
        None => Ok(BandTable::new_zealand()),
    }
}

#[derive(Debug, Deserialize)]
struct BandRow {
    lower: Option<f64>,
    upper: Option<f64>,
    region: String,
    population: String,
    industries: String,
    demographics: String,
    household_size: String,
    notes: String,
}

#[derive(Debug, Deserialize)]
struct PointRow {
    lat: f64,
    lon: f64,
}

/// Reads `lat,lon` rows. Non-finite values fail with the row number.
pub fn load_points(path: &Path) -> Result<Vec<Coordinate>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open points file: {:?}", path))?;
    let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_reader(file);

    let mut points = Vec::new();
    for (row, result) in rdr.deserialize::<PointRow>().enumerate() {
        let p = result.with_context(|| format!("Invalid point row {} in {:?}", row + 1, path))?;
        let coord = Coordinate::new(p.lat, p.lon)
            .map_err(|e| anyhow!("Row {} in {:?}: {}", row + 1, path, e))?;
        points.push(coord);
    }
    Ok(points)
}

#[derive(Debug, Serialize)]
struct ClassifiedRow<'a> {
    lat: f64,
    lon: f64,
    region: &'a str,
}

pub fn write_classified(path: &Path, rows: &[(Coordinate, &RegionRecord)]) -> Result<()> {
    let mut wtr = WriterBuilder::new()
        .from_path(path)
        .with_context(|| format!("Failed to create output file: {:?}", path))?;
    for (coord, record) in rows {
        wtr.serialize(ClassifiedRow {
            lat: coord.lat(),
            lon: coord.lon(),
            region: &record.region,
        })?;
    }
    wtr.flush()
        .with_context(|| format!("Failed to write output file: {:?}", path))?;
    Ok(())
}
