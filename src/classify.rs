use crate::data::BandTable;
use crate::types::{Coordinate, CoordinateError, RegionRecord};
use rayon::prelude::*;
use std::sync::OnceLock;

fn built_in() -> &'static BandTable {
    static TABLE: OnceLock<BandTable> = OnceLock::new();
    TABLE.get_or_init(BandTable::new_zealand)
}

/// Classifies a coordinate against the built-in New Zealand bands.
///
/// Only latitude is consulted; longitude never changes the result.
pub fn classify(coord: Coordinate) -> RegionRecord {
    classify_with(built_in(), coord)
}

/// Like [`classify`], but takes raw degrees and rejects NaN or infinities.
pub fn classify_lat_lon(lat: f64, lon: f64) -> Result<RegionRecord, CoordinateError> {
    Coordinate::new(lat, lon).map(classify)
}

pub fn classify_with(table: &BandTable, coord: Coordinate) -> RegionRecord {
    table.find(coord).record.clone()
}

/// Classifies many points in parallel, keeping input order.
pub fn classify_points<'a>(
    table: &'a BandTable,
    points: &[Coordinate],
) -> Vec<(Coordinate, &'a RegionRecord)> {
    tracing::info!("Classifying {} points...", points.len());
    points
        .par_iter()
        .map(|&c| (c, &table.find(c).record))
        .collect()
}
