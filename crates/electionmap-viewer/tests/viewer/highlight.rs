use electionmap_core::Rgb;
use electionmap_viewer::{HighlightColors, HighlightState};
use proptest::prelude::*;

use super::fixtures::{collection, square};

#[test]
fn test_custom_colors() {
    let mut map = collection("C", vec![square(1, 0.0, 0.0, 1.0), square(2, 2.0, 0.0, 1.0)]);
    let colors = HighlightColors {
        border: Rgb::GRAY,
        highlight: Rgb::YELLOW,
    };
    let mut state = HighlightState::new(colors);
    state.set_highlighted(&mut map, 0);
    state.set_highlighted(&mut map, 1);
    assert_eq!(map.shapes()[0].line_color(), Rgb::GRAY);
    assert_eq!(map.shapes()[1].line_color(), Rgb::YELLOW);
}

proptest! {
    /// Property: at most one shape ever carries the highlight color.
    #[test]
    fn prop_at_most_one_highlighted(steps in prop::collection::vec(prop::option::of(0usize..8), 1..40)) {
        let shapes = (0..6).map(|i| square(i + 1, i as f64 * 2.0, 0.0, 1.0)).collect();
        let mut map = collection("P", shapes);
        let mut state = HighlightState::default();
        let highlight = state.colors().highlight;

        for step in steps {
            let transition = state.update(&mut map, step);
            let lit: Vec<usize> = map
                .shapes()
                .iter()
                .enumerate()
                .filter(|(_, s)| s.line_color() == highlight)
                .map(|(i, _)| i)
                .collect();
            prop_assert!(lit.len() <= 1);
            prop_assert_eq!(lit.first().copied(), state.highlighted());
            prop_assert_eq!(
                transition.current,
                state.highlighted().map(|i| map.shapes()[i].record_number())
            );
        }
    }
}
