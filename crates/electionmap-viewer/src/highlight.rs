//! Highlighted region state
//!
//! At most one shape of the active collection is highlighted. The state
//! holds only the shape's index; the highlight itself is the shape's border
//! color, so every change restores the previous shape's border before
//! painting the new one.

use electionmap_core::Rgb;
use electionmap_shapefile::MapCollection;
use serde::{Deserialize, Serialize};

/// Border colors used for highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightColors {
    /// Border of a shape that is not highlighted.
    pub border: Rgb,
    /// Border of the highlighted shape.
    pub highlight: Rgb,
}

impl Default for HighlightColors {
    fn default() -> Self {
        Self {
            border: Rgb::BLACK,
            highlight: Rgb::CYAN,
        }
    }
}

/// The outcome of a highlight change, in record numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighlightTransition {
    pub previous: Option<i32>,
    pub current: Option<i32>,
}

impl HighlightTransition {
    /// Whether the highlighted record actually changed.
    pub fn is_change(&self) -> bool {
        self.previous != self.current
    }
}

/// Tracks the highlighted shape of the active collection.
#[derive(Debug, Clone, Default)]
pub struct HighlightState {
    highlighted: Option<usize>,
    selected_row: Option<usize>,
    colors: HighlightColors,
}

impl HighlightState {
    pub fn new(colors: HighlightColors) -> Self {
        Self {
            highlighted: None,
            selected_row: None,
            colors,
        }
    }

    /// Index of the highlighted shape in the active collection.
    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// Attribute-table row of the highlighted shape (`record_number - 1`).
    pub fn selected_row(&self) -> Option<usize> {
        self.selected_row
    }

    pub fn colors(&self) -> HighlightColors {
        self.colors
    }

    pub fn set_colors(&mut self, colors: HighlightColors) {
        self.colors = colors;
    }

    /// Highlights shape `index`, restoring the previously highlighted shape's border.
    ///
    /// An index outside the collection clears the highlight instead.
    pub fn set_highlighted(&mut self, collection: &mut MapCollection, index: usize) -> HighlightTransition {
        let previous = self.restore_previous(collection, Some(index));

        let Some(shape) = collection.shape_mut(index) else {
            return self.clear(collection);
        };
        shape.set_line_color(self.colors.highlight);
        let current = shape.record_number();
        self.highlighted = Some(index);
        self.selected_row = Some(shape.attribute_row());

        HighlightTransition {
            previous,
            current: Some(current),
        }
    }

    /// Highlights `index` when `Some`, otherwise clears.
    pub fn update(&mut self, collection: &mut MapCollection, index: Option<usize>) -> HighlightTransition {
        match index {
            Some(index) => self.set_highlighted(collection, index),
            None => self.clear(collection),
        }
    }

    /// Restores the highlighted shape's border and empties the selection.
    pub fn clear(&mut self, collection: &mut MapCollection) -> HighlightTransition {
        let previous = self.restore_previous(collection, None);
        self.highlighted = None;
        self.selected_row = None;
        HighlightTransition {
            previous,
            current: None,
        }
    }

    /// Forgets the selection without touching colors.
    ///
    /// Used when the collection the index pointed into has been replaced.
    pub fn reset(&mut self) {
        self.highlighted = None;
        self.selected_row = None;
    }

    /// Restores the border of the highlighted shape unless it is `keep`,
    /// returning its record number.
    fn restore_previous(&self, collection: &mut MapCollection, keep: Option<usize>) -> Option<i32> {
        let index = self.highlighted?;
        let shape = collection.shape_mut(index)?;
        if keep != Some(index) {
            shape.set_line_color(self.colors.border);
        }
        Some(shape.record_number())
    }
}
