//! Configuration for ElectionMap
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML files; the default file lives in the platform configuration
//! directory.
//!
//! Configuration is organized into sections:
//! - Maps (where shapefiles live, which map is home)
//! - Display (panel size, zoom and pan steps)
//! - Colors (border, highlight and default fill)
//! - Special viewports (fixed framing of selected regions on drill-down)

use electionmap_core::constants::{
    MAX_LATITUDE, MAX_LONGITUDE, MIN_LATITUDE, MIN_LONGITUDE, MIN_SCALE, ZOOM_STEP,
};
use electionmap_core::{PanelSize, Rgb};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{SettingsError, SettingsResult};

/// Directory name under the platform configuration directory.
pub const APP_DIR: &str = "electionmap";

/// File name of the default configuration.
pub const CONFIG_FILE: &str = "config.toml";

/// Supported on-disk formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Toml,
    Json,
}

impl Format {
    fn for_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Format::Toml),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Format::Json),
            Some(ext) => Err(SettingsError::UnsupportedFormat(ext.to_string())),
            None => Err(SettingsError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Where maps are found and which one is shown first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapsConfig {
    /// Directory holding `<ID>.shp` files
    pub maps_directory: PathBuf,
    /// Identifier of the home map
    pub home_map: String,
    /// Display name of the home map
    pub home_name: String,
}

impl Default for MapsConfig {
    fn default() -> Self {
        Self {
            maps_directory: PathBuf::from("maps"),
            home_map: "USA".to_string(),
            home_name: "United States".to_string(),
        }
    }
}

/// Panel and navigation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Panel width in pixels
    pub panel_width: u32,
    /// Panel height in pixels
    pub panel_height: u32,
    /// Scale factor of one zoom step
    pub zoom_step: f64,
    /// Pixels moved by one pan step
    pub pan_step: i32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            panel_width: 800,
            panel_height: 600,
            zoom_step: ZOOM_STEP,
            pan_step: 50,
        }
    }
}

impl DisplayConfig {
    pub fn panel(&self) -> PanelSize {
        PanelSize::new(self.panel_width, self.panel_height)
    }
}

/// Render colors, as `#rrggbb` strings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorsConfig {
    /// Border of shapes that are not highlighted
    pub border: String,
    /// Border of the highlighted shape
    pub highlight: String,
    /// Fill of every shape of a freshly loaded map
    pub fill: String,
}

impl Default for ColorsConfig {
    fn default() -> Self {
        Self {
            border: Rgb::BLACK.to_hex(),
            highlight: Rgb::CYAN.to_hex(),
            fill: Rgb::DEFAULT_FILL.to_hex(),
        }
    }
}

impl ColorsConfig {
    pub fn border_rgb(&self) -> SettingsResult<Rgb> {
        parse_color("colors.border", &self.border)
    }

    pub fn highlight_rgb(&self) -> SettingsResult<Rgb> {
        parse_color("colors.highlight", &self.highlight)
    }

    pub fn fill_rgb(&self) -> SettingsResult<Rgb> {
        parse_color("colors.fill", &self.fill)
    }
}

fn parse_color(key: &str, value: &str) -> SettingsResult<Rgb> {
    Rgb::from_hex(value)
        .ok_or_else(|| SettingsError::invalid(key, format!("'{value}' is not a #rrggbb color")))
}

/// Fixed center and scale used instead of fitting when drilling into
/// record `record_number` of map `map`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialViewportEntry {
    pub map: String,
    pub record_number: i32,
    pub center_long: f64,
    pub center_lat: f64,
    pub scale: f64,
}

impl SpecialViewportEntry {
    fn validate(&self, index: usize) -> SettingsResult<()> {
        let key = format!("special_viewports[{index}]");
        if self.map.trim().is_empty() {
            return Err(SettingsError::invalid(&key, "map must not be empty"));
        }
        if self.record_number < 1 {
            return Err(SettingsError::invalid(&key, "record_number must be >= 1"));
        }
        if !(MIN_LONGITUDE..=MAX_LONGITUDE).contains(&self.center_long) {
            return Err(SettingsError::invalid(
                &key,
                format!("center_long must lie in [{MIN_LONGITUDE}, {MAX_LONGITUDE}]"),
            ));
        }
        if !(MIN_LATITUDE..=MAX_LATITUDE).contains(&self.center_lat) {
            return Err(SettingsError::invalid(
                &key,
                format!("center_lat must lie in [{MIN_LATITUDE}, {MAX_LATITUDE}]"),
            ));
        }
        if !self.scale.is_finite() || self.scale < MIN_SCALE {
            return Err(SettingsError::invalid(
                &key,
                format!("scale must be at least {MIN_SCALE}"),
            ));
        }
        Ok(())
    }
}

fn default_special_viewports() -> Vec<SpecialViewportEntry> {
    vec![SpecialViewportEntry {
        map: "USA".to_string(),
        record_number: 1,
        center_long: -155.0,
        center_lat: 60.0,
        scale: 8.0,
    }]
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub maps: MapsConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub colors: ColorsConfig,
    #[serde(default = "default_special_viewports")]
    pub special_viewports: Vec<SpecialViewportEntry>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            maps: MapsConfig::default(),
            display: DisplayConfig::default(),
            colors: ColorsConfig::default(),
            special_viewports: default_special_viewports(),
        }
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config file location: `<config dir>/electionmap/config.toml`.
    pub fn default_path() -> SettingsResult<PathBuf> {
        let dir = dirs::config_dir().ok_or_else(|| {
            SettingsError::ConfigDirectory("no configuration directory on this platform".to_string())
        })?;
        Ok(dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load config from file (JSON or TOML, by extension)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = Format::for_path(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Loads `path`, falling back to defaults when the file does not exist.
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "No configuration file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    /// Save config to file (JSON or TOML, by extension), creating parent directories
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::for_path(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        tracing::debug!(path = %path.display(), "Saved configuration");
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        if self.maps.home_map.trim().is_empty() {
            return Err(SettingsError::invalid("maps.home_map", "must not be empty"));
        }

        if self.display.panel().is_empty() {
            return Err(SettingsError::invalid(
                "display",
                "panel dimensions must be > 0",
            ));
        }
        if !self.display.zoom_step.is_finite() || self.display.zoom_step <= 1.0 {
            return Err(SettingsError::invalid(
                "display.zoom_step",
                "must be greater than 1",
            ));
        }
        if self.display.pan_step <= 0 {
            return Err(SettingsError::invalid("display.pan_step", "must be > 0"));
        }

        self.colors.border_rgb()?;
        self.colors.highlight_rgb()?;
        self.colors.fill_rgb()?;

        for (index, entry) in self.special_viewports.iter().enumerate() {
            entry.validate(index)?;
        }

        Ok(())
    }

    /// The special viewport configured for `(map, record_number)`, if any.
    pub fn special_viewport(&self, map: &str, record_number: i32) -> Option<&SpecialViewportEntry> {
        self.special_viewports
            .iter()
            .find(|entry| entry.map == map && entry.record_number == record_number)
    }
}
