use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::fs;
use anyhow::{Context, Result};

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub map: MapConfig,
    pub server: ServerConfig,
    pub data: DataConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct MapConfig {
    pub center_lat: f64,
    pub center_lon: f64,
    pub zoom: u8,
    pub title: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        // Approximate center of NZ
        Self {
            center_lat: -40.9006,
            center_lon: 174.8860,
            zoom: 5,
            title: "New Zealand Demographic Data by Pin Drop".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            static_dir: PathBuf::from("static"),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct DataConfig {
    /// CSV band table replacing the built-in one.
    pub bands: Option<PathBuf>,
}

impl AppConfig {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: AppConfig = toml::from_str(&content)
            .with_context(|| "Failed to parse TOML configuration")?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.map, MapConfig::default());
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.static_dir, PathBuf::from("static"));
        assert!(config.data.bands.is_none());
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config: AppConfig = toml::from_str(
            "[map]\nzoom = 7\n\n[server]\nport = 9000\n\n[data]\nbands = \"bands.csv\"\n",
        )
        .unwrap();
        assert_eq!(config.map.zoom, 7);
        assert_eq!(config.map.center_lat, -40.9006);
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.data.bands, Some(PathBuf::from("bands.csv")));
    }

    #[test]
    fn load_from_file_reads_toml() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "[server]\nport = 3000").unwrap();
        let config = AppConfig::load_from_file(f.path()).unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn load_from_file_reports_bad_toml() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "[server\nport = ").unwrap();
        let err = AppConfig::load_from_file(f.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse TOML"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = AppConfig::load_from_file(Path::new("/nonexistent/config.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
