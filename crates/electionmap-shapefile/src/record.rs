//! Shape records
//!
//! A [`GeometryRecord`] is one decoded polygon or polyline: a multi-part
//! vertex sequence stored as flattened coordinate arrays plus the start
//! offset of each part. Polygons and polylines share this representation;
//! what differs between them is looked up in the [`ShapeCapabilities`]
//! table of their [`ShapeKind`].

use std::ops::Range;

use electionmap_core::{GeoBounds, GeometryError, Rgb};
use serde::{Deserialize, Serialize};

/// Shape type tag of a polyline record.
pub const SHAPE_TYPE_POLYLINE: i32 = 3;
/// Shape type tag of a polygon record.
pub const SHAPE_TYPE_POLYGON: i32 = 5;

/// What a shape kind supports when rendered or queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeCapabilities {
    /// Parts are closed rings (last vertex connects back to the first).
    pub closed_parts: bool,
    /// The interior is painted with the fill color.
    pub fillable: bool,
    /// Pointer containment tests apply.
    pub hit_testable: bool,
}

const POLYGON_CAPABILITIES: ShapeCapabilities = ShapeCapabilities {
    closed_parts: true,
    fillable: true,
    hit_testable: true,
};

const POLYLINE_CAPABILITIES: ShapeCapabilities = ShapeCapabilities {
    closed_parts: false,
    fillable: false,
    hit_testable: false,
};

/// The multi-part shape kinds this crate decodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Polyline,
    Polygon,
}

impl ShapeKind {
    /// Maps a shapefile shape type tag to a kind, `None` for unsupported tags.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            SHAPE_TYPE_POLYLINE => Some(Self::Polyline),
            SHAPE_TYPE_POLYGON => Some(Self::Polygon),
            _ => None,
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            Self::Polyline => SHAPE_TYPE_POLYLINE,
            Self::Polygon => SHAPE_TYPE_POLYGON,
        }
    }

    pub fn capabilities(&self) -> ShapeCapabilities {
        match self {
            Self::Polyline => POLYLINE_CAPABILITIES,
            Self::Polygon => POLYGON_CAPABILITIES,
        }
    }
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Polyline => write!(f, "polyline"),
            Self::Polygon => write!(f, "polygon"),
        }
    }
}

/// Checks the part offset invariant against the number of points.
///
/// `parts` must be non-empty, start at 0, be strictly increasing and every
/// offset must index an existing point.
pub fn validate_parts(parts: &[usize], num_points: usize) -> Result<(), GeometryError> {
    let first = *parts.first().ok_or(GeometryError::NoParts)?;
    if first != 0 {
        return Err(GeometryError::FirstPartNotAtZero { start: first });
    }
    for (index, window) in parts.windows(2).enumerate() {
        if window[1] <= window[0] {
            return Err(GeometryError::PartsNotIncreasing {
                index: index + 1,
                start: window[1],
                previous: window[0],
            });
        }
    }
    let last_index = parts.len() - 1;
    let last = parts[last_index];
    if last >= num_points {
        return Err(GeometryError::PartOutOfRange {
            index: last_index,
            start: last,
            num_points,
        });
    }
    Ok(())
}

/// One decoded polygon or polyline.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryRecord {
    record_number: i32,
    kind: ShapeKind,
    bounding_box: GeoBounds,
    parts: Vec<usize>,
    points_x: Vec<f64>,
    points_y: Vec<f64>,
    line_color: Rgb,
    fill_color: Rgb,
}

impl GeometryRecord {
    /// Builds a record from flattened coordinate arrays, validating the part offsets.
    pub fn new(
        record_number: i32,
        kind: ShapeKind,
        bounding_box: GeoBounds,
        parts: Vec<usize>,
        points_x: Vec<f64>,
        points_y: Vec<f64>,
    ) -> Result<Self, GeometryError> {
        if points_x.len() != points_y.len() {
            return Err(GeometryError::CoordinateLengthMismatch {
                xs: points_x.len(),
                ys: points_y.len(),
            });
        }
        validate_parts(&parts, points_x.len())?;

        Ok(Self {
            record_number,
            kind,
            bounding_box,
            parts,
            points_x,
            points_y,
            line_color: Rgb::BLACK,
            fill_color: Rgb::DEFAULT_FILL,
        })
    }

    /// Builds a record from one vertex list per part, computing offsets and bounding box.
    pub fn from_parts(
        record_number: i32,
        kind: ShapeKind,
        parts: &[Vec<(f64, f64)>],
    ) -> Result<Self, GeometryError> {
        let mut offsets = Vec::with_capacity(parts.len());
        let mut xs = Vec::new();
        let mut ys = Vec::new();
        for part in parts {
            offsets.push(xs.len());
            for &(x, y) in part {
                xs.push(x);
                ys.push(y);
            }
        }
        let bounding_box =
            GeoBounds::from_points(xs.iter().copied().zip(ys.iter().copied())).unwrap_or_default();
        Self::new(record_number, kind, bounding_box, offsets, xs, ys)
    }

    /// 1-based record identity; the matching attribute row is `record_number - 1`.
    pub fn record_number(&self) -> i32 {
        self.record_number
    }

    /// Zero-based attribute-table row correlated with this record.
    pub fn attribute_row(&self) -> usize {
        (self.record_number.max(1) - 1) as usize
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn capabilities(&self) -> ShapeCapabilities {
        self.kind.capabilities()
    }

    pub fn bounding_box(&self) -> GeoBounds {
        self.bounding_box
    }

    pub fn parts(&self) -> &[usize] {
        &self.parts
    }

    pub fn points_x(&self) -> &[f64] {
        &self.points_x
    }

    pub fn points_y(&self) -> &[f64] {
        &self.points_y
    }

    pub fn num_parts(&self) -> usize {
        self.parts.len()
    }

    pub fn num_points(&self) -> usize {
        self.points_x.len()
    }

    /// Range of point indices belonging to part `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= num_parts()`.
    pub fn part_range(&self, index: usize) -> Range<usize> {
        let start = self.parts[index];
        let end = self
            .parts
            .get(index + 1)
            .copied()
            .unwrap_or(self.points_x.len());
        start..end
    }

    /// Number of points in part `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= num_parts()`.
    pub fn part_size(&self, index: usize) -> usize {
        self.part_range(index).len()
    }

    /// Vertices of part `index` as `(x, y)` degree pairs.
    pub fn part_points(&self, index: usize) -> impl Iterator<Item = (f64, f64)> + '_ {
        let range = self.part_range(index);
        self.points_x[range.clone()]
            .iter()
            .copied()
            .zip(self.points_y[range].iter().copied())
    }

    pub fn line_color(&self) -> Rgb {
        self.line_color
    }

    pub fn set_line_color(&mut self, color: Rgb) {
        self.line_color = color;
    }

    pub fn fill_color(&self) -> Rgb {
        self.fill_color
    }

    pub fn set_fill_color(&mut self, color: Rgb) {
        self.fill_color = color;
    }

    /// Size in bytes of the record body when written in shapefile layout.
    pub fn content_len_bytes(&self) -> usize {
        // shape type + box + num_parts + num_points
        44 + 4 * self.parts.len() + 16 * self.points_x.len()
    }
}
