//! Wiring of configuration into the map navigator.

use electionmap_settings::{Config, SettingsResult};
use electionmap_shapefile::DirectoryMapSource;
use electionmap_viewer::{HighlightColors, MapNavigator, NavigatorOptions, SpecialViewport, SpecialViewports};

/// Special viewport table built from the configured entries.
pub fn special_viewports(config: &Config) -> SpecialViewports {
    let mut table = SpecialViewports::new();
    for entry in &config.special_viewports {
        table.insert(
            entry.map.clone(),
            entry.record_number,
            SpecialViewport::new(entry.center_long, entry.center_lat, entry.scale),
        );
    }
    table
}

/// Navigator options from a configuration, validating it first.
pub fn navigator_options(config: &Config) -> SettingsResult<NavigatorOptions> {
    config.validate()?;
    Ok(NavigatorOptions {
        home_map: config.maps.home_map.clone(),
        panel: config.display.panel(),
        zoom_step: config.display.zoom_step,
        pan_step: config.display.pan_step,
        colors: HighlightColors {
            border: config.colors.border_rgb()?,
            highlight: config.colors.highlight_rgb()?,
        },
        fill: config.colors.fill_rgb()?,
        special_viewports: special_viewports(config),
    })
}

/// Directory source for the configured maps directory, naming the home map.
pub fn map_source(config: &Config) -> DirectoryMapSource {
    DirectoryMapSource::new(&config.maps.maps_directory)
        .with_name(config.maps.home_map.clone(), config.maps.home_name.clone())
}

/// A navigator over the configured maps directory. No map is loaded yet.
pub fn navigator(config: &Config) -> SettingsResult<MapNavigator<DirectoryMapSource>> {
    let options = navigator_options(config)?;
    Ok(MapNavigator::new(map_source(config), options))
}
