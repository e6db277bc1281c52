//! ElectionMap Settings Crate
//!
//! Handles application configuration: map locations, panel and navigation
//! defaults, render colors and the special viewports used on drill-down.

pub mod config;
pub mod error;

pub use config::{ColorsConfig, Config, DisplayConfig, MapsConfig, SpecialViewportEntry};
pub use error::{SettingsError, SettingsResult};
