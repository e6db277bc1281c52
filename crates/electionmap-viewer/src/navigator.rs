//! Map navigation
//!
//! [`MapNavigator`] owns the active [`MapCollection`], the [`Viewport`] and
//! the [`HighlightState`], and turns user input (pointer motion, clicks,
//! zoom rectangles, pan and zoom steps) into updates of all three.
//!
//! # Drill-down
//!
//! The navigator starts on a home map (a country). Clicking a highlighted
//! region of the home map loads that region's own map, resolved through a
//! [`RegionResolver`]; clicking anywhere on a region map returns home. A
//! new collection only replaces the active one once it decoded
//! successfully, so a failed load leaves the navigator untouched.
//!
//! # Notifications
//!
//! Registered [`MapListener`]s hear about loaded maps, viewport moves and
//! highlight changes, which is when a renderer needs to repaint.

use electionmap_core::constants::ZOOM_STEP;
use electionmap_core::{PanelSize, PixelPoint, PixelRect, Result, Rgb};
use electionmap_shapefile::{MapCollection, MapSource};

use crate::attributes::{AttributeTable, VoteTally, REGION_ID_COLUMN};
use crate::highlight::{HighlightColors, HighlightState, HighlightTransition};
use crate::hit_test::HitTester;
use crate::viewport::{SpecialViewport, SpecialViewports, Viewport};

/// Callbacks fired by the navigator. Every method defaults to doing nothing.
pub trait MapListener {
    fn on_map_loaded(&mut self, _collection: &MapCollection) {}

    fn on_viewport_changed(&mut self, _viewport: &Viewport) {}

    fn on_highlight_changed(&mut self, _transition: HighlightTransition, _collection: &MapCollection) {}
}

/// Maps a region of the active collection to the identifier of its own map.
pub trait RegionResolver {
    fn resolve(&self, collection: &MapCollection, index: usize) -> Option<String>;
}

impl<F> RegionResolver for F
where
    F: Fn(&MapCollection, usize) -> Option<String>,
{
    fn resolve(&self, collection: &MapCollection, index: usize) -> Option<String> {
        self(collection, index)
    }
}

/// Reads the region identifier from an attribute-table column.
#[derive(Debug, Clone)]
pub struct ColumnRegionResolver<T> {
    table: T,
    column: usize,
}

impl<T: AttributeTable> ColumnRegionResolver<T> {
    /// Resolver reading the conventional region identifier column.
    pub fn new(table: T) -> Self {
        Self::with_column(table, REGION_ID_COLUMN)
    }

    pub fn with_column(table: T, column: usize) -> Self {
        Self { table, column }
    }

    pub fn table(&self) -> &T {
        &self.table
    }
}

impl<T: AttributeTable> RegionResolver for ColumnRegionResolver<T> {
    fn resolve(&self, collection: &MapCollection, index: usize) -> Option<String> {
        let row = collection.shape(index)?.attribute_row();
        let id = self.table.field(row, self.column)?.as_str()?;
        (!id.is_empty()).then(|| id.to_string())
    }
}

/// Navigator settings.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigatorOptions {
    /// Identifier of the map shown at start and returned to.
    pub home_map: String,
    pub panel: PanelSize,
    /// Factor applied by one zoom step.
    pub zoom_step: f64,
    /// Pixels moved by one pan step.
    pub pan_step: i32,
    pub colors: HighlightColors,
    /// Fill given to every shape of a newly loaded map.
    pub fill: Rgb,
    pub special_viewports: SpecialViewports,
}

impl Default for NavigatorOptions {
    fn default() -> Self {
        Self {
            home_map: "USA".to_string(),
            panel: PanelSize::new(800, 600),
            zoom_step: ZOOM_STEP,
            pan_step: 50,
            colors: HighlightColors::default(),
            fill: Rgb::DEFAULT_FILL,
            special_viewports: SpecialViewports::historical(),
        }
    }
}

/// Orchestrates map loading, viewport changes and highlighting.
pub struct MapNavigator<S> {
    source: S,
    options: NavigatorOptions,
    viewport: Viewport,
    collection: Option<MapCollection>,
    highlight: HighlightState,
    hit_tester: HitTester,
    resolver: Option<Box<dyn RegionResolver>>,
    listeners: Vec<Box<dyn MapListener>>,
    /// Fit postponed while the panel is empty, with its special viewport.
    pending_fit: Option<Option<SpecialViewport>>,
}

impl<S: MapSource> MapNavigator<S> {
    pub fn new(source: S, options: NavigatorOptions) -> Self {
        let highlight = HighlightState::new(options.colors);
        Self {
            source,
            options,
            viewport: Viewport::default(),
            collection: None,
            highlight,
            hit_tester: HitTester::new(),
            resolver: None,
            listeners: Vec::new(),
            pending_fit: None,
        }
    }

    pub fn with_resolver(mut self, resolver: impl RegionResolver + 'static) -> Self {
        self.set_resolver(resolver);
        self
    }

    pub fn set_resolver(&mut self, resolver: impl RegionResolver + 'static) {
        self.resolver = Some(Box::new(resolver));
    }

    pub fn add_listener(&mut self, listener: Box<dyn MapListener>) {
        self.listeners.push(listener);
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn options(&self) -> &NavigatorOptions {
        &self.options
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn panel(&self) -> PanelSize {
        self.options.panel
    }

    pub fn collection(&self) -> Option<&MapCollection> {
        self.collection.as_ref()
    }

    /// Mutable access for recoloring; the highlight border is restored on the next change.
    pub fn collection_mut(&mut self) -> Option<&mut MapCollection> {
        self.collection.as_mut()
    }

    pub fn highlight(&self) -> &HighlightState {
        &self.highlight
    }

    /// Whether the active map is the home map.
    pub fn is_home(&self) -> bool {
        self.collection
            .as_ref()
            .is_some_and(|c| c.is_abbreviation(&self.options.home_map))
    }

    /// Loads `identifier`, makes it active and fits the viewport to its bounds.
    ///
    /// On failure the previously active map stays in place.
    pub fn load_map(&mut self, identifier: &str) -> Result<()> {
        self.load_with_special(identifier, None)
    }

    /// Loads the home map.
    pub fn load_home(&mut self) -> Result<()> {
        let home = self.options.home_map.clone();
        self.load_map(&home)
    }

    /// Returns to the home map; a no-op when already there.
    pub fn return_home(&mut self) -> Result<()> {
        if self.is_home() {
            return Ok(());
        }
        self.load_home()
    }

    fn load_with_special(&mut self, identifier: &str, special_key: Option<(String, i32)>) -> Result<()> {
        let mut collection = match self.source.load(identifier) {
            Ok(collection) => collection,
            Err(e) => {
                tracing::warn!(identifier, error = %e, "Failed to load map");
                return Err(e);
            }
        };
        collection.reset_colors(self.options.colors.border, self.options.fill);

        self.highlight.reset();
        let mbr = collection.mbr();
        tracing::debug!(map = %collection.identity(), shapes = collection.len(), "Map activated");
        self.collection = Some(collection);

        let special = special_key
            .as_ref()
            .and_then(|(map, record)| self.options.special_viewports.get(map, *record))
            .copied();
        if self.options.panel.is_empty() {
            self.pending_fit = Some(special);
        } else {
            self.viewport
                .zoom_to_bounds_with(mbr, self.options.panel, special.as_ref());
            self.pending_fit = None;
        }

        if let Some(collection) = &self.collection {
            for listener in &mut self.listeners {
                listener.on_map_loaded(collection);
                listener.on_viewport_changed(&self.viewport);
            }
        }
        Ok(())
    }

    /// Resizes the panel; a map loaded while the panel was empty is fitted now.
    pub fn set_panel_size(&mut self, panel: PanelSize) {
        self.options.panel = panel;
        if panel.is_empty() {
            return;
        }
        let Some(special) = self.pending_fit.take() else {
            return;
        };
        if let Some(mbr) = self.collection.as_ref().map(MapCollection::mbr) {
            let before = self.viewport;
            self.viewport.zoom_to_bounds_with(mbr, panel, special.as_ref());
            self.notify_viewport(before);
        }
    }

    /// Zooms to a pixel rectangle; degenerate rectangles are ignored.
    pub fn zoom_to_rect(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        let before = self.viewport;
        self.viewport
            .zoom_to_pixel_rect(PixelRect::new(x1, y1, x2, y2), self.options.panel);
        self.notify_viewport(before);
    }

    /// Pans by a pixel delta, `dx` east-positive and `dy` screen-down-positive.
    pub fn pan_by(&mut self, dx: i32, dy: i32) {
        let before = self.viewport;
        self.viewport.pan(dx, dy, self.options.panel);
        self.notify_viewport(before);
    }

    /// Pans by whole pan steps.
    pub fn pan_steps(&mut self, east: i32, south: i32) {
        let step = self.options.pan_step;
        self.pan_by(east.saturating_mul(step), south.saturating_mul(step));
    }

    pub fn zoom_in(&mut self) {
        let before = self.viewport;
        self.viewport.zoom_by(self.options.zoom_step);
        self.notify_viewport(before);
    }

    pub fn zoom_out(&mut self) {
        let before = self.viewport;
        self.viewport.zoom_by(1.0 / self.options.zoom_step);
        self.notify_viewport(before);
    }

    /// Re-centers the viewport on the position under a pixel.
    pub fn center_on(&mut self, px: i32, py: i32) {
        let before = self.viewport;
        self.viewport.center_on_pixel(px, py, self.options.panel);
        self.notify_viewport(before);
    }

    /// Highlights the region under the pointer, or clears the highlight.
    pub fn pointer_moved(&mut self, px: i32, py: i32) -> HighlightTransition {
        let Some(collection) = self.collection.as_mut() else {
            return HighlightTransition::default();
        };
        let hit = self.hit_tester.find_containing(
            PixelPoint::new(px, py),
            collection,
            &self.viewport,
            self.options.panel,
        );
        let transition = self.highlight.update(collection, hit);
        if transition.is_change() {
            for listener in &mut self.listeners {
                listener.on_highlight_changed(transition, collection);
            }
        }
        transition
    }

    /// Handles a click: drills down from the home map, returns home from any other.
    ///
    /// Returns whether the active map changed.
    pub fn click(&mut self, px: i32, py: i32) -> Result<bool> {
        if self.is_home() {
            self.pointer_moved(px, py);
            self.drill_down()
        } else if self.collection.is_some() {
            self.return_home()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Loads the map of the highlighted region.
    ///
    /// Returns `Ok(false)` when there is nothing to drill into: no
    /// highlighted region, no resolver, or no identifier for the region.
    pub fn drill_down(&mut self) -> Result<bool> {
        let (Some(collection), Some(index)) = (self.collection.as_ref(), self.highlight.highlighted())
        else {
            return Ok(false);
        };
        let Some(resolver) = self.resolver.as_ref() else {
            return Ok(false);
        };
        let Some(identifier) = resolver.resolve(collection, index) else {
            tracing::debug!(index, "Region has no map identifier");
            return Ok(false);
        };
        let key = collection
            .shape(index)
            .map(|shape| (collection.abbreviation().to_string(), shape.record_number()));

        tracing::debug!(from = collection.abbreviation(), to = %identifier, "Drilling down");
        self.load_with_special(&identifier, key)?;
        Ok(true)
    }

    /// Vote tally of the highlighted region, or of the whole table.
    pub fn tally<T: AttributeTable + ?Sized>(&self, table: &T) -> Option<VoteTally> {
        VoteTally::for_selection(table, self.highlight.selected_row())
    }

    fn notify_viewport(&mut self, before: Viewport) {
        if before == self.viewport {
            return;
        }
        tracing::trace!(viewport = %self.viewport, "Viewport changed");
        for listener in &mut self.listeners {
            listener.on_viewport_changed(&self.viewport);
        }
    }
}

impl<S> std::fmt::Debug for MapNavigator<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapNavigator")
            .field("options", &self.options)
            .field("viewport", &self.viewport)
            .field("map", &self.collection.as_ref().map(|c| c.identity()))
            .field("highlight", &self.highlight)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
