use electionmap_core::{GeoBounds, GeoPoint, PanelSize, PixelPoint};
use electionmap_shapefile::{GeometryRecord, MapCollection, MapIdentity, ShapeKind};
use electionmap_viewer::{find_containing, find_containing_record, HitTester, Viewport};

use super::fixtures::{collection, encode, square, square_ring};

fn panel() -> PanelSize {
    PanelSize::new(800, 600)
}

fn fitted(mbr: GeoBounds) -> Viewport {
    let mut vp = Viewport::default();
    vp.zoom_to_bounds(mbr, panel());
    vp
}

#[test]
fn test_center_pixel_hits_fitted_square() {
    let map = collection("A", vec![square(1, -5.0, -5.0, 10.0)]);
    let vp = fitted(map.mbr());
    assert_eq!(find_containing(panel().center(), &map, &vp, panel()), Some(0));
    assert_eq!(find_containing(PixelPoint::new(5, 5), &map, &vp, panel()), None);
}

#[test]
fn test_decoded_open_square_hits_center_pixel() {
    let open = vec![(-5.0, -5.0), (-5.0, 5.0), (5.0, 5.0), (5.0, -5.0)];
    let record = GeometryRecord::from_parts(1, ShapeKind::Polygon, &[open]).unwrap();
    let map = MapCollection::decode(MapIdentity::from_identifier("A"), &encode(&[record])).unwrap();
    assert_eq!(map.shapes()[0].num_points(), 4);
    assert_eq!(map.mbr(), GeoBounds::new(-5.0, -5.0, 5.0, 5.0));

    let vp = fitted(map.mbr());
    assert_eq!(vp.center(), GeoPoint::new(0.0, 0.0));
    assert_eq!(find_containing(panel().center(), &map, &vp, panel()), Some(0));
    let outside = vp.geo_to_pixel(6.0, 0.0, panel());
    assert_eq!(find_containing(outside, &map, &vp, panel()), None);
}

#[test]
fn test_adjacent_squares_resolve_to_containing_one() {
    let map = collection(
        "B",
        vec![square(1, 0.0, 0.0, 10.0), square(2, 10.0, 0.0, 10.0)],
    );
    let vp = fitted(map.mbr());
    let inside_b = vp.geo_to_pixel(15.0, 5.0, panel());
    let inside_a = vp.geo_to_pixel(4.0, 6.0, panel());

    assert_eq!(find_containing(inside_b, &map, &vp, panel()), Some(1));
    assert_eq!(find_containing(inside_a, &map, &vp, panel()), Some(0));
    assert_eq!(
        find_containing_record(inside_b, &map, &vp, panel()).map(|r| r.record_number()),
        Some(2)
    );
}

#[test]
fn test_earliest_overlapping_shape_wins() {
    let map = collection(
        "O",
        vec![square(1, 0.0, 0.0, 10.0), square(2, 5.0, 5.0, 10.0)],
    );
    let vp = fitted(map.mbr());
    let overlap = vp.geo_to_pixel(7.0, 7.0, panel());
    assert_eq!(find_containing(overlap, &map, &vp, panel()), Some(0));

    let mut tester = HitTester::new();
    for _ in 0..3 {
        assert_eq!(tester.find_containing(overlap, &map, &vp, panel()), Some(0));
    }
}

#[test]
fn test_point_in_hole_still_counts() {
    let donut = GeometryRecord::from_parts(
        1,
        ShapeKind::Polygon,
        &[square_ring(0.0, 0.0, 10.0), square_ring(3.0, 3.0, 4.0)],
    )
    .unwrap();
    let map = collection("H", vec![donut]);
    let vp = fitted(map.mbr());
    let in_hole = vp.geo_to_pixel(5.0, 5.0, panel());
    assert_eq!(find_containing(in_hole, &map, &vp, panel()), Some(0));
}

#[test]
fn test_second_part_is_tested() {
    let islands = GeometryRecord::from_parts(
        1,
        ShapeKind::Polygon,
        &[square_ring(0.0, 0.0, 4.0), square_ring(20.0, 0.0, 4.0)],
    )
    .unwrap();
    let map = collection("I", vec![islands]);
    let vp = fitted(map.mbr());
    let on_island = vp.geo_to_pixel(22.0, 2.0, panel());
    let between = vp.geo_to_pixel(12.0, 2.0, panel());
    assert_eq!(find_containing(on_island, &map, &vp, panel()), Some(0));
    assert_eq!(find_containing(between, &map, &vp, panel()), None);
}

#[test]
fn test_polylines_never_match() {
    let line = GeometryRecord::from_parts(1, ShapeKind::Polyline, &[square_ring(0.0, 0.0, 10.0)])
        .unwrap();
    let map = collection("L", vec![line, square(2, 0.0, 0.0, 10.0)]);
    let vp = fitted(map.mbr());
    let center = vp.geo_to_pixel(5.0, 5.0, panel());
    assert_eq!(find_containing(center, &map, &vp, panel()), Some(1));
}

#[test]
fn test_invisible_collection_and_empty_panel_never_match() {
    let mut map = collection("V", vec![square(1, -5.0, -5.0, 10.0)]);
    let vp = fitted(map.mbr());
    assert_eq!(find_containing(panel().center(), &map, &vp, PanelSize::new(0, 0)), None);

    map.set_visible(false);
    assert_eq!(find_containing(panel().center(), &map, &vp, panel()), None);
}
