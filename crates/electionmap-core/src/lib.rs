//! # ElectionMap Core
//!
//! Core types shared by every ElectionMap crate: the error hierarchy,
//! geographic and pixel-space primitives, render colors and the fixed
//! constants of the map projection.

pub mod color;
pub mod constants;
pub mod error;
pub mod geo;

pub use color::Rgb;
pub use error::{DecodeError, Error, GeometryError, Result};
pub use geo::{GeoBounds, GeoPoint, PanelSize, PixelPoint, PixelRect};
