use electionmap_core::{GeoBounds, PanelSize, PixelRect};
use electionmap_viewer::Viewport;
use proptest::prelude::*;

#[test]
fn test_zoom_to_bounds_centers_square() {
    let mut vp = Viewport::default();
    let panel = PanelSize::new(800, 600);
    vp.zoom_to_bounds(GeoBounds::new(-5.0, -5.0, 5.0, 5.0), panel);

    assert_eq!(vp.center_long(), 0.0);
    assert_eq!(vp.center_lat(), 0.0);
    // latitude is the tighter axis: 180 / 10, then scaled down
    assert!((vp.scale() - 18.0 * 0.8).abs() < 1e-9);
    assert_eq!(vp.geo_to_pixel(0.0, 0.0, panel), panel.center());
}

#[test]
fn test_zoom_to_degenerate_bounds_is_noop() {
    let mut vp = Viewport::default();
    let before = vp;
    vp.zoom_to_bounds(GeoBounds::new(10.0, 10.0, 10.0, 20.0), PanelSize::new(800, 600));
    assert_eq!(vp, before);
}

#[test]
fn test_zoom_on_empty_panel_is_noop() {
    let mut vp = Viewport::default();
    let before = vp;
    vp.zoom_to_bounds(GeoBounds::new(-5.0, -5.0, 5.0, 5.0), PanelSize::new(0, 0));
    vp.zoom_to_pixel_rect(PixelRect::new(0, 0, 10, 10), PanelSize::new(800, 0));
    assert_eq!(vp, before);
}

#[test]
fn test_world_bounds_floor_at_min_scale() {
    let mut vp = Viewport::new(30.0, 10.0, 6.0);
    vp.zoom_to_bounds(GeoBounds::new(-180.0, -90.0, 180.0, 90.0), PanelSize::new(800, 600));
    assert_eq!(vp.scale(), 1.0);
    assert!(vp.is_within_bounds());
}

#[test]
fn test_antimeridian_window_may_reach_west_limit() {
    let mut vp = Viewport::default();
    vp.zoom_to_bounds(GeoBounds::new(-200.0, 40.0, -150.0, 70.0), PanelSize::new(800, 600));
    assert!(vp.min_long() >= -220.0 - 1e-9);
    assert!(vp.is_within_bounds());
}

#[derive(Debug, Clone)]
enum Op {
    Pan(i32, i32),
    ZoomRect(i32, i32, i32, i32),
    ZoomBy(f64),
    ZoomBounds(f64, f64, f64, f64),
    Center(i32, i32),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (-2000i32..2000, -2000i32..2000).prop_map(|(dx, dy)| Op::Pan(dx, dy)),
        (-50i32..850, -50i32..650, 0i32..400, 0i32..300)
            .prop_map(|(x, y, w, h)| Op::ZoomRect(x, y, x + w, y + h)),
        (0.05f64..20.0).prop_map(Op::ZoomBy),
        (-230.0f64..170.0, -95.0f64..80.0, 0.5f64..100.0, 0.5f64..60.0)
            .prop_map(|(x, y, w, h)| Op::ZoomBounds(x, y, x + w, y + h)),
        (-100i32..900, -100i32..700).prop_map(|(x, y)| Op::Center(x, y)),
    ]
}

proptest! {
    /// Property: pixel_to_geo inverts geo_to_pixel within one pixel's worth of degrees.
    #[test]
    fn prop_pixel_roundtrip(
        long in -100.0f64..100.0,
        lat in -45.0f64..45.0,
        scale in 1.0f64..50.0,
        w in 100u32..1600,
        h in 100u32..1200,
        fx in 0.0f64..1.0,
        fy in 0.0f64..1.0,
    ) {
        let vp = Viewport::new(long, lat, scale);
        let panel = PanelSize::new(w, h);
        let p_long = vp.min_long() + fx * vp.long_span();
        let p_lat = vp.min_lat() + fy * vp.lat_span();

        let pixel = vp.geo_to_pixel(p_long, p_lat, panel);
        let back = vp.pixel_to_geo(pixel.x, pixel.y, panel);

        prop_assert!((back.long - p_long).abs() <= vp.long_span() / w as f64);
        prop_assert!((back.lat - p_lat).abs() <= vp.lat_span() / h as f64);
    }

    /// Property: fitting the same bounds twice changes nothing the second time.
    #[test]
    fn prop_zoom_to_bounds_idempotent(
        x in -180.0f64..170.0,
        y in -90.0f64..80.0,
        w in 1.0f64..180.0,
        h in 1.0f64..90.0,
    ) {
        let panel = PanelSize::new(800, 600);
        let mbr = GeoBounds::new(x, y, x + w, y + h);
        let mut vp = Viewport::default();
        vp.zoom_to_bounds(mbr, panel);
        let first = (vp.center_long(), vp.center_lat(), vp.scale());
        vp.zoom_to_bounds(mbr, panel);
        prop_assert_eq!(first, (vp.center_long(), vp.center_lat(), vp.scale()));
    }

    /// Property: any sequence of pan and zoom calls keeps the window inside the legal extents.
    #[test]
    fn prop_window_stays_in_bounds(ops in prop::collection::vec(op(), 1..30)) {
        let panel = PanelSize::new(800, 600);
        let mut vp = Viewport::default();
        for op in ops {
            match op {
                Op::Pan(dx, dy) => vp.pan(dx, dy, panel),
                Op::ZoomRect(x1, y1, x2, y2) => vp.zoom_to_pixel_rect(PixelRect::new(x1, y1, x2, y2), panel),
                Op::ZoomBy(f) => vp.zoom_by(f),
                Op::ZoomBounds(x1, y1, x2, y2) => vp.zoom_to_bounds(GeoBounds::new(x1, y1, x2, y2), panel),
                Op::Center(x, y) => vp.center_on_pixel(x, y, panel),
            }
            prop_assert!(vp.scale() >= 1.0);
            prop_assert!(vp.is_within_bounds(), "out of bounds: {}", vp);
        }
    }
}
