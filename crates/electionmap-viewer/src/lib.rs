//! # ElectionMap Viewer
//!
//! Everything between a decoded map and the pixels on screen, except the
//! painting itself:
//!
//! - [`viewport`]: geographic window, pixel conversions, pan and zoom
//! - [`projection`]: per-part pixel vertex lists for the renderer
//! - [`hit_test`]: which region contains a pixel
//! - [`highlight`]: the single highlighted region and its border colors
//! - [`attributes`]: the attribute-table seam and vote tallies
//! - [`navigator`]: load, drill-down and pointer handling tying it together

pub mod attributes;
pub mod highlight;
pub mod navigator;
pub mod projection;
pub mod viewport;

pub use attributes::{AttributeTable, FieldValue, InMemoryTable, VoteTally};
pub use highlight::{HighlightColors, HighlightState, HighlightTransition};
pub use hit_test::{find_containing, find_containing_record, point_in_polygon, HitTester};
pub use navigator::{
    ColumnRegionResolver, MapListener, MapNavigator, NavigatorOptions, RegionResolver,
};
pub use projection::{project_collection, PixelPolygon, ProjectedShape};
pub use viewport::{SpecialViewport, SpecialViewports, Viewport};
