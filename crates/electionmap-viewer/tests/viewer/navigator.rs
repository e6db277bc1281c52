use std::cell::RefCell;
use std::rc::Rc;

use electionmap_core::{PanelSize, PixelPoint};
use electionmap_shapefile::{InMemoryMapSource, MapCollection, MapIdentity};
use electionmap_viewer::{
    ColumnRegionResolver, FieldValue, HighlightTransition, InMemoryTable, MapListener,
    MapNavigator, NavigatorOptions, Viewport, VoteTally,
};

use super::fixtures::{encode, square};

fn source() -> InMemoryMapSource {
    InMemoryMapSource::new()
        .with_map(
            MapIdentity::new("United States", "USA"),
            encode(&[square(1, -170.0, 55.0, 10.0), square(2, -100.0, 30.0, 10.0)]),
        )
        .with_map(
            MapIdentity::new("Alaska", "AK"),
            encode(&[square(1, -165.0, 57.0, 5.0)]),
        )
        .with_map(
            MapIdentity::new("Texas", "TX"),
            encode(&[square(1, -98.0, 32.0, 4.0), square(2, -96.0, 28.0, 2.0)]),
        )
        .with_map(MapIdentity::new("Broken", "BRK"), vec![0u8; 20])
}

fn table(second_region: &str) -> InMemoryTable {
    let names = ["NAME", "ABBR", "DEM", "REP", "OTH"];
    let row = |name: &str, abbr: &str, votes: [i64; 3]| {
        let mut row = vec![FieldValue::from(name), FieldValue::from(abbr)];
        row.extend(votes.map(FieldValue::Integer));
        row
    };
    InMemoryTable::new(names.iter().map(|n| n.to_string()).collect())
        .with_row(row("Alaska", "AK", [100, 300, 10]))
        .with_row(row("Texas", second_region, [400, 500, 20]))
}

fn navigator() -> MapNavigator<InMemoryMapSource> {
    let mut nav = MapNavigator::new(source(), NavigatorOptions::default())
        .with_resolver(ColumnRegionResolver::new(table("TX")));
    nav.load_home().unwrap();
    nav
}

fn pixel_of(nav: &MapNavigator<InMemoryMapSource>, long: f64, lat: f64) -> PixelPoint {
    nav.viewport().geo_to_pixel(long, lat, nav.panel())
}

#[derive(Default)]
struct Recorder {
    events: Rc<RefCell<Vec<String>>>,
}

impl MapListener for Recorder {
    fn on_map_loaded(&mut self, collection: &MapCollection) {
        self.events
            .borrow_mut()
            .push(format!("loaded {}", collection.abbreviation()));
    }

    fn on_viewport_changed(&mut self, _viewport: &Viewport) {
        self.events.borrow_mut().push("viewport".to_string());
    }

    fn on_highlight_changed(&mut self, transition: HighlightTransition, _collection: &MapCollection) {
        self.events
            .borrow_mut()
            .push(format!("highlight {:?}", transition.current));
    }
}

#[test]
fn test_load_home_fits_map() {
    let nav = navigator();
    assert!(nav.is_home());
    assert_eq!(nav.collection().unwrap().len(), 2);
    let vp = nav.viewport();
    assert!((vp.center_long() + 130.0).abs() < 1e-9);
    assert!((vp.center_lat() - 47.5).abs() < 1e-9);
    assert!((vp.scale() - 4.5 * 0.8).abs() < 1e-9);
}

#[test]
fn test_pointer_moves_highlight() {
    let mut nav = navigator();
    let p = pixel_of(&nav, -95.0, 35.0);
    let t = nav.pointer_moved(p.x, p.y);
    assert_eq!(t.current, Some(2));
    assert_eq!(nav.highlight().selected_row(), Some(1));

    let t = nav.pointer_moved(p.x, p.y);
    assert!(!t.is_change());

    let t = nav.pointer_moved(1, 1);
    assert_eq!(t, HighlightTransition { previous: Some(2), current: None });
}

#[test]
fn test_click_drills_down_and_returns_home() {
    let mut nav = navigator();
    let p = pixel_of(&nav, -95.0, 35.0);
    assert!(nav.click(p.x, p.y).unwrap());
    assert_eq!(nav.collection().unwrap().abbreviation(), "TX");
    assert_eq!(nav.collection().unwrap().name(), "Texas");
    assert_eq!(nav.highlight().highlighted(), None);
    assert!(!nav.is_home());

    assert!(nav.click(400, 300).unwrap());
    assert!(nav.is_home());
}

#[test]
fn test_click_outside_regions_does_nothing() {
    let mut nav = navigator();
    assert!(!nav.click(0, 0).unwrap());
    assert!(nav.is_home());
}

#[test]
fn test_drill_down_uses_special_viewport() {
    let mut nav = navigator();
    let p = pixel_of(&nav, -165.0, 60.0);
    nav.pointer_moved(p.x, p.y);
    assert!(nav.drill_down().unwrap());
    assert_eq!(nav.collection().unwrap().abbreviation(), "AK");
    assert_eq!(nav.viewport().center_long(), -155.0);
    assert_eq!(nav.viewport().center_lat(), 60.0);
    assert!((nav.viewport().scale() - 8.0 * 0.8).abs() < 1e-9);
}

#[test]
fn test_failed_drill_down_keeps_active_map() {
    let mut nav = MapNavigator::new(source(), NavigatorOptions::default())
        .with_resolver(ColumnRegionResolver::new(table("ZZ")));
    nav.load_home().unwrap();
    let before = *nav.viewport();

    let p = pixel_of(&nav, -95.0, 35.0);
    nav.pointer_moved(p.x, p.y);
    let err = nav.drill_down().unwrap_err();
    assert!(err.is_not_found());
    assert!(nav.is_home());
    assert_eq!(*nav.viewport(), before);
    assert_eq!(nav.highlight().highlighted(), Some(1));
}

#[test]
fn test_corrupt_map_is_reported_and_not_activated() {
    let mut nav = navigator();
    let err = nav.load_map("BRK").unwrap_err();
    assert!(err.is_decode_error());
    assert!(nav.is_home());
}

#[test]
fn test_drill_down_without_resolver() {
    let mut nav = MapNavigator::new(source(), NavigatorOptions::default());
    nav.load_home().unwrap();
    let p = pixel_of(&nav, -95.0, 35.0);
    nav.pointer_moved(p.x, p.y);
    assert!(!nav.drill_down().unwrap());
}

#[test]
fn test_zoom_and_pan_steps() {
    let mut nav = navigator();
    let scale = nav.viewport().scale();
    nav.zoom_in();
    assert!((nav.viewport().scale() - scale * 1.2).abs() < 1e-9);
    nav.zoom_out();
    assert!((nav.viewport().scale() - scale).abs() < 1e-9);

    let long = nav.viewport().center_long();
    nav.pan_steps(1, 0);
    assert!(nav.viewport().center_long() > long);

    let before = *nav.viewport();
    nav.zoom_to_rect(10, 10, 5, 50);
    assert_eq!(*nav.viewport(), before);
    nav.zoom_to_rect(100, 100, 300, 250);
    assert_ne!(*nav.viewport(), before);
    assert!(nav.viewport().is_within_bounds());
}

#[test]
fn test_listeners_are_notified() {
    let events = Rc::new(RefCell::new(Vec::new()));
    let mut nav = MapNavigator::new(source(), NavigatorOptions::default());
    nav.add_listener(Box::new(Recorder {
        events: Rc::clone(&events),
    }));
    nav.load_home().unwrap();
    let p = pixel_of(&nav, -95.0, 35.0);
    nav.pointer_moved(p.x, p.y);
    nav.pointer_moved(p.x, p.y);
    nav.pan_by(0, 0);
    nav.pan_by(10, 0);

    assert_eq!(
        *events.borrow(),
        vec![
            "loaded USA".to_string(),
            "viewport".to_string(),
            "highlight Some(2)".to_string(),
            "viewport".to_string(),
        ]
    );
}

#[test]
fn test_fit_deferred_until_panel_has_area() {
    let options = NavigatorOptions {
        panel: PanelSize::new(0, 0),
        ..NavigatorOptions::default()
    };
    let mut nav = MapNavigator::new(source(), options);
    nav.load_home().unwrap();
    assert_eq!(*nav.viewport(), Viewport::default());

    nav.set_panel_size(PanelSize::new(800, 600));
    assert!((nav.viewport().center_long() + 130.0).abs() < 1e-9);
}

#[test]
fn test_deferred_fit_keeps_special_viewport() {
    let mut nav = navigator();
    let p = pixel_of(&nav, -165.0, 60.0);
    nav.pointer_moved(p.x, p.y);
    nav.set_panel_size(PanelSize::new(0, 0));
    assert!(nav.drill_down().unwrap());
    assert_eq!(nav.collection().unwrap().abbreviation(), "AK");

    nav.set_panel_size(PanelSize::new(800, 600));
    assert_eq!(nav.viewport().center_long(), -155.0);
    assert_eq!(nav.viewport().center_lat(), 60.0);
    assert!((nav.viewport().scale() - 8.0 * 0.8).abs() < 1e-9);

    // the pending fit is consumed once
    nav.pan_by(40, 0);
    let panned = *nav.viewport();
    nav.set_panel_size(PanelSize::new(640, 480));
    assert_eq!(*nav.viewport(), panned);
}

#[test]
fn test_tally_follows_selection() {
    let mut nav = navigator();
    let t = table("TX");
    assert_eq!(nav.tally(&t), Some(VoteTally::new([500, 800, 30])));

    let p = pixel_of(&nav, -95.0, 35.0);
    nav.pointer_moved(p.x, p.y);
    assert_eq!(nav.tally(&t), Some(VoteTally::new([400, 500, 20])));
}
