//! # ElectionMap Shapefile
//!
//! Decoding of ESRI shapefile (`.shp`) geometry into an in-memory shape
//! model, and the map collections built from it.
//!
//! ## Format
//!
//! ```text
//! File header (100 bytes)
//!   ├── file code, unused words, file length   (big-endian)
//!   └── version, shape type, MBR, Z/M ranges   (little-endian)
//! Record*
//!   ├── record number, content length (words) (big-endian)
//!   └── shape type, box, parts, points        (little-endian)
//! ```
//!
//! Only polygon and polyline records are supported; both share the
//! multi-part layout and differ only in their shape type tag.

pub mod collection;
pub mod decoder;
pub mod header;
pub mod record;
pub mod source;
pub mod writer;

pub use collection::{MapCollection, MapIdentity};
pub use decoder::{Shapefile, ShapefileDecoder};
pub use header::ShapefileHeader;
pub use record::{GeometryRecord, ShapeCapabilities, ShapeKind};
pub use source::{DirectoryMapSource, InMemoryMapSource, MapSource};
pub use writer::ShapefileWriter;
