//! # ElectionMap
//!
//! Core of a choropleth election map viewer: it decodes ESRI shapefiles of
//! regions, maps them onto a pannable and zoomable panel, and works out
//! which region lies under the pointer.
//!
//! ## Architecture
//!
//! ElectionMap is organized as a workspace with multiple crates:
//!
//! 1. **electionmap-core** - Errors, geographic primitives, colors, constants
//! 2. **electionmap-shapefile** - Shapefile decoding and encoding, map collections and sources
//! 3. **electionmap-viewer** - Viewport, hit-testing, highlighting, navigation, vote tallies
//! 4. **electionmap-settings** - Configuration files
//! 5. **electionmap** - This crate: wiring and the command-line region lookup

pub mod app;

pub use electionmap_core::{
    DecodeError, Error, GeoBounds, GeoPoint, GeometryError, PanelSize, PixelPoint, PixelRect,
    Result, Rgb,
};

pub use electionmap_shapefile::{
    DirectoryMapSource, GeometryRecord, InMemoryMapSource, MapCollection, MapIdentity, MapSource,
    ShapeCapabilities, ShapeKind, Shapefile, ShapefileDecoder, ShapefileHeader, ShapefileWriter,
};

pub use electionmap_viewer::{
    find_containing, find_containing_record, point_in_polygon, project_collection,
    AttributeTable, ColumnRegionResolver, FieldValue, HighlightColors, HighlightState,
    HighlightTransition, HitTester, InMemoryTable, MapListener, MapNavigator, NavigatorOptions,
    PixelPolygon, ProjectedShape, RegionResolver, SpecialViewport, SpecialViewports, Viewport,
    VoteTally,
};

pub use electionmap_settings::{Config, SettingsError, SettingsResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging on stderr with `RUST_LOG` support; the
/// default level is INFO.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
