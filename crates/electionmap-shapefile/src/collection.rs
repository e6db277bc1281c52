//! Map collections
//!
//! A [`MapCollection`] is every shape of one map (a country's states, the
//! world's countries) in decode order, together with the map's identity
//! and the bounding rectangle declared in the file header.

use std::fmt;
use std::path::{Path, PathBuf};

use electionmap_core::{DecodeError, GeoBounds, Result, Rgb};
use serde::{Deserialize, Serialize};

use crate::decoder::ShapefileDecoder;
use crate::header::ShapefileHeader;
use crate::record::GeometryRecord;

/// Name and abbreviation of a map.
///
/// Identities compare by value; the abbreviation doubles as the map
/// identifier used to locate its `.shp` file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct MapIdentity {
    pub name: String,
    pub abbreviation: String,
}

impl MapIdentity {
    pub fn new(name: impl Into<String>, abbreviation: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            abbreviation: abbreviation.into(),
        }
    }

    /// Identity whose name and abbreviation are both `identifier`.
    pub fn from_identifier(identifier: impl Into<String>) -> Self {
        let identifier = identifier.into();
        Self {
            name: identifier.clone(),
            abbreviation: identifier,
        }
    }
}

impl fmt::Display for MapIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name == self.abbreviation {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} ({})", self.name, self.abbreviation)
        }
    }
}

/// The shapes of one map, in attribute-row order.
#[derive(Debug, Clone, PartialEq)]
pub struct MapCollection {
    identity: MapIdentity,
    source_path: Option<PathBuf>,
    header: Option<ShapefileHeader>,
    shapes: Vec<GeometryRecord>,
    mbr: GeoBounds,
    visible: bool,
}

impl MapCollection {
    /// Collection built directly from records.
    pub fn new(identity: MapIdentity, mbr: GeoBounds, shapes: Vec<GeometryRecord>) -> Self {
        Self {
            identity,
            source_path: None,
            header: None,
            shapes,
            mbr,
            visible: true,
        }
    }

    /// Collection whose MBR is the union of the shapes' bounding boxes.
    pub fn from_shapes(identity: MapIdentity, shapes: Vec<GeometryRecord>) -> Self {
        let mbr = shapes
            .iter()
            .map(GeometryRecord::bounding_box)
            .reduce(|acc, b| acc.union(&b))
            .unwrap_or_default();
        Self::new(identity, mbr, shapes)
    }

    /// Decodes a `.shp` byte buffer into a collection.
    ///
    /// The MBR comes from the file header.
    pub fn decode(identity: MapIdentity, bytes: &[u8]) -> std::result::Result<Self, DecodeError> {
        let shapefile = ShapefileDecoder::decode(bytes)?;
        let mut collection = Self::new(identity, shapefile.header.mbr, shapefile.records);
        collection.header = Some(shapefile.header);
        Ok(collection)
    }

    /// Reads and decodes a `.shp` file, remembering where it came from.
    pub fn load(identity: MapIdentity, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let collection = Self::decode(identity, &bytes)?.with_source(path);
        tracing::debug!(
            map = %collection.identity,
            path = %path.display(),
            shapes = collection.len(),
            "Loaded map"
        );
        Ok(collection)
    }

    pub fn with_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_path = Some(path.into());
        self
    }

    pub fn identity(&self) -> &MapIdentity {
        &self.identity
    }

    pub fn name(&self) -> &str {
        &self.identity.name
    }

    pub fn abbreviation(&self) -> &str {
        &self.identity.abbreviation
    }

    /// Case-sensitive comparison against the map abbreviation.
    pub fn is_abbreviation(&self, identifier: &str) -> bool {
        self.identity.abbreviation == identifier
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// Header of the file this collection was decoded from.
    pub fn header(&self) -> Option<&ShapefileHeader> {
        self.header.as_ref()
    }

    pub fn mbr(&self) -> GeoBounds {
        self.mbr
    }

    pub fn shapes(&self) -> &[GeometryRecord] {
        &self.shapes
    }

    pub fn shape(&self, index: usize) -> Option<&GeometryRecord> {
        self.shapes.get(index)
    }

    pub fn shape_mut(&mut self, index: usize) -> Option<&mut GeometryRecord> {
        self.shapes.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Index of the shape carrying `record_number`.
    pub fn find_by_record_number(&self, record_number: i32) -> Option<usize> {
        self.shapes
            .iter()
            .position(|s| s.record_number() == record_number)
    }

    /// Paints every border with `line` and every interior with `fill`.
    pub fn reset_colors(&mut self, line: Rgb, fill: Rgb) {
        for shape in &mut self.shapes {
            shape.set_line_color(line);
            shape.set_fill_color(fill);
        }
    }

    /// Sets each shape's fill from `color_for`, called with the shape's attribute row.
    pub fn apply_fill_colors<F>(&mut self, mut color_for: F)
    where
        F: FnMut(usize) -> Option<Rgb>,
    {
        for shape in &mut self.shapes {
            if let Some(color) = color_for(shape.attribute_row()) {
                shape.set_fill_color(color);
            }
        }
    }
}
