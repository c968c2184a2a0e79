use crate::data::BandTable;
use crate::types::{Coordinate, RegionRecord};
use std::fmt::Write;

pub const NO_SELECTION_PROMPT: &str =
    "Click anywhere on the map to drop a pin and see location details.";

pub fn pin_message(coord: &Coordinate) -> String {
    format!("Pin dropped at: {}", coord)
}

pub fn region_message(record: &RegionRecord) -> String {
    format!("Based on your pin location, you are in the {}.", record.region)
}

/// Full located summary as labeled text, one field per line.
pub fn render_text(coord: &Coordinate, record: &RegionRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", pin_message(coord));
    let _ = writeln!(out, "{}", region_message(record));
    let _ = writeln!(out);
    for (key, value) in record.to_display_pairs() {
        let _ = writeln!(out, "{}: {}", key, value);
    }
    out
}

pub fn render_bands(table: &BandTable) -> String {
    let mut out = String::new();
    for band in table.iter() {
        let lower = band.lower.map_or("-inf".to_string(), |v| format!("{:.1}", v));
        let upper = band.upper.map_or("+inf".to_string(), |v| format!("{:.1}", v));
        let interval = format!("[{}, {})", lower, upper);
        let _ = writeln!(out, "{:<16} {}", interval, band.record.region);
    }
    out
}
