#![allow(dead_code)]

use electionmap_shapefile::{GeometryRecord, MapCollection, MapIdentity, ShapeKind, ShapefileWriter};

/// Square polygon ring with its lower-left corner at `(x, y)`.
pub fn square_ring(x: f64, y: f64, size: f64) -> Vec<(f64, f64)> {
    vec![
        (x, y),
        (x, y + size),
        (x + size, y + size),
        (x + size, y),
        (x, y),
    ]
}

pub fn square(record: i32, x: f64, y: f64, size: f64) -> GeometryRecord {
    GeometryRecord::from_parts(record, ShapeKind::Polygon, &[square_ring(x, y, size)]).unwrap()
}

pub fn collection(id: &str, shapes: Vec<GeometryRecord>) -> MapCollection {
    MapCollection::from_shapes(MapIdentity::from_identifier(id), shapes)
}

pub fn encode(shapes: &[GeometryRecord]) -> Vec<u8> {
    ShapefileWriter::new(ShapeKind::Polygon).encode(shapes).unwrap()
}
