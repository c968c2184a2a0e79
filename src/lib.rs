//! Pin-drop region lookup for New Zealand.
//!
//! A clicked coordinate is matched against a table of latitude bands, each
//! carrying a simulated demographic summary. Only latitude is consulted.

pub mod types;
pub mod config;
pub mod data;
pub mod classify;
pub mod render;
pub mod server;

pub use classify::{classify, classify_lat_lon, classify_with};
pub use data::{BandError, BandTable};
pub use types::{Band, Coordinate, CoordinateError, RegionRecord};
