use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "MEASUREMENT_MAP_CONFIG";

/// Config file picked up from the working directory when the variable is unset.
pub const DEFAULT_CONFIG_FILE: &str = "measurement-map.json";

// ---------------------------------------------------------------------------
// Column aliases
// ---------------------------------------------------------------------------

/// Maps header spellings found in the wild onto the canonical column names.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct ColumnAliases(BTreeMap<String, String>);

impl Default for ColumnAliases {
    fn default() -> Self {
        let pairs = [
            ("lat", "latitude"),
            ("lon", "longitude"),
            ("lng", "longitude"),
            ("dose", "value"),
            ("concentration", "value"),
            ("time", "timestamp"),
            ("substance", "substanceName"),
            ("substance_name", "substanceName"),
        ];
        Self(
            pairs
                .into_iter()
                .map(|(alias, canonical)| (alias.to_string(), canonical.to_string()))
                .collect(),
        )
    }
}

impl ColumnAliases {
    /// Canonical name for a header cell. Unknown headers pass through trimmed.
    pub fn resolve<'a>(&'a self, header: &'a str) -> &'a str {
        let header = header.trim_start_matches('\u{feff}').trim();
        self.0.get(header).map(String::as_str).unwrap_or(header)
    }

    /// Whether `header` is an alias rather than a canonical name.
    pub fn is_alias(&self, header: &str) -> bool {
        self.0
            .contains_key(header.trim_start_matches('\u{feff}').trim())
    }
}

// ---------------------------------------------------------------------------
// Map / export options
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MapOptions {
    pub zoom_start: u8,
    pub marker_radius: f32,
    pub fill_opacity: f32,
    pub tile_url: String,
    pub tile_attribution: String,
    pub title: String,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            zoom_start: 13,
            marker_radius: 7.0,
            fill_opacity: 0.9,
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".into(),
            tile_attribution: "&copy; OpenStreetMap contributors".into(),
            title: "Situation map".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub column_aliases: ColumnAliases,
    pub map: MapOptions,
    pub export_file_name: String,
    /// Pre-filled substance in the chemical entry form.
    pub default_substance: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            column_aliases: ColumnAliases::default(),
            map: MapOptions::default(),
            export_file_name: "situation_map.html".into(),
            default_substance: "Хлор".into(),
        }
    }
}

impl AppConfig {
    /// Read a config file. Missing fields take their defaults.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Locate and read the config, falling back to built-in defaults when no
    /// file is present.
    pub fn load() -> Result<Self> {
        match config_path() {
            Some(path) => {
                log::info!("Loading config from {}", path.display());
                Self::from_path(&path)
            }
            None => {
                log::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }
}

fn config_path() -> Option<PathBuf> {
    if let Some(explicit) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(explicit));
    }
    let local = PathBuf::from(DEFAULT_CONFIG_FILE);
    local.is_file().then_some(local)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_aliases_cover_legacy_headers() {
        let aliases = ColumnAliases::default();
        assert_eq!(aliases.resolve("dose"), "value");
        assert_eq!(aliases.resolve("concentration"), "value");
        assert_eq!(aliases.resolve(" lat "), "latitude");
        assert_eq!(aliases.resolve("\u{feff}lon"), "longitude");
        assert_eq!(aliases.resolve("substance"), "substanceName");
        assert_eq!(aliases.resolve("latitude"), "latitude");
        assert!(aliases.is_alias("time"));
        assert!(!aliases.is_alias("timestamp"));
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let cfg: AppConfig =
            serde_json::from_str(r#"{ "map": { "zoom_start": 9 }, "export_file_name": "out.html" }"#)
                .unwrap();
        assert_eq!(cfg.map.zoom_start, 9);
        assert_eq!(cfg.map.marker_radius, 7.0);
        assert_eq!(cfg.export_file_name, "out.html");
        assert_eq!(cfg.column_aliases, ColumnAliases::default());
    }

    #[test]
    fn custom_aliases_replace_the_table() {
        let cfg: AppConfig =
            serde_json::from_str(r#"{ "column_aliases": { "Breite": "latitude" } }"#).unwrap();
        assert_eq!(cfg.column_aliases.resolve("Breite"), "latitude");
        assert_eq!(cfg.column_aliases.resolve("lat"), "lat");
    }

    #[test]
    fn from_path_reports_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = AppConfig::from_path(&path).unwrap_err();
        assert!(format!("{err:#}").contains("parsing config"));
    }
}
