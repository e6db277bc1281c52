//! Projection of shapes into pixel space.

use electionmap_core::{PanelSize, PixelPoint, Rgb};
use electionmap_shapefile::{GeometryRecord, MapCollection, ShapeCapabilities};

use crate::viewport::Viewport;

/// Reusable pixel-space vertex buffer for one part at a time.
#[derive(Debug, Clone, Default)]
pub struct PixelPolygon {
    xs: Vec<i32>,
    ys: Vec<i32>,
}

impl PixelPolygon {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            xs: Vec::with_capacity(capacity),
            ys: Vec::with_capacity(capacity),
        }
    }

    /// Replaces the contents with part `part` of `record` projected through `viewport`.
    pub fn fill_part(
        &mut self,
        record: &GeometryRecord,
        part: usize,
        viewport: &Viewport,
        panel: PanelSize,
    ) {
        self.xs.clear();
        self.ys.clear();
        for (long, lat) in record.part_points(part) {
            let pixel = viewport.geo_to_pixel(long, lat, panel);
            self.xs.push(pixel.x);
            self.ys.push(pixel.y);
        }
    }

    pub fn xs(&self) -> &[i32] {
        &self.xs
    }

    pub fn ys(&self) -> &[i32] {
        &self.ys
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = PixelPoint> + '_ {
        self.xs
            .iter()
            .zip(&self.ys)
            .map(|(&x, &y)| PixelPoint::new(x, y))
    }

    /// Even-odd containment of `(px, py)` in the buffered ring.
    pub fn contains(&self, px: i32, py: i32) -> bool {
        crate::hit_test::point_in_polygon(px as f64, py as f64, &self.xs, &self.ys)
    }
}

/// One shape ready for painting.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedShape {
    /// Index of the shape in its collection.
    pub index: usize,
    pub record_number: i32,
    /// Pixel vertices, one list per part.
    pub parts: Vec<Vec<PixelPoint>>,
    pub line_color: Rgb,
    pub fill_color: Rgb,
    pub capabilities: ShapeCapabilities,
}

/// Projects every shape of a visible collection; invisible collections yield nothing.
pub fn project_collection(
    collection: &MapCollection,
    viewport: &Viewport,
    panel: PanelSize,
) -> Vec<ProjectedShape> {
    if !collection.is_visible() {
        return Vec::new();
    }
    let mut buffer = PixelPolygon::new();
    collection
        .shapes()
        .iter()
        .enumerate()
        .map(|(index, shape)| {
            let parts = (0..shape.num_parts())
                .map(|part| {
                    buffer.fill_part(shape, part, viewport, panel);
                    buffer.points().collect()
                })
                .collect();
            ProjectedShape {
                index,
                record_number: shape.record_number(),
                parts,
                line_color: shape.line_color(),
                fill_color: shape.fill_color(),
                capabilities: shape.capabilities(),
            }
        })
        .collect()
}
