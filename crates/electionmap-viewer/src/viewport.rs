//! Geographic viewport
//!
//! Maps a window of longitude/latitude onto the panel. The window is
//! described by its center and a scale: at scale 1.0 it spans 360° of
//! longitude and 180° of latitude, at scale `s` it spans `360/s` by `180/s`.
//!
//! Pixel space has its origin at the top-left with +y downward, so every
//! conversion flips the vertical axis.
//!
//! After every mutation the window is kept inside the legal extents
//! (`MIN_LONGITUDE..MAX_LONGITUDE`, `MIN_LATITUDE..MAX_LATITUDE`) by moving
//! the center. Scale is never below [`MIN_SCALE`], otherwise no center
//! position could satisfy the extents.

use std::collections::HashMap;
use std::fmt;

use electionmap_core::constants::{
    MAX_LATITUDE, MAX_LONGITUDE, MIN_LATITUDE, MIN_LONGITUDE, MIN_SCALE, SCALE_MAP_DOWN_FACTOR,
    WORLD_LAT_SPAN, WORLD_LONG_SPAN,
};
use electionmap_core::{GeoBounds, GeoPoint, PanelSize, PixelPoint, PixelRect};
use serde::{Deserialize, Serialize};

/// A fixed center and scale used instead of fitting a region's bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpecialViewport {
    pub center: GeoPoint,
    pub scale: f64,
}

impl SpecialViewport {
    pub fn new(center_long: f64, center_lat: f64, scale: f64) -> Self {
        Self {
            center: GeoPoint::new(center_long, center_lat),
            scale,
        }
    }
}

/// Special viewports keyed by map abbreviation and record number.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpecialViewports {
    entries: HashMap<(String, i32), SpecialViewport>,
}

impl SpecialViewports {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stock table: Alaska (record 1 of the `USA` map) is framed at
    /// (-155, 60) scale 8, since its bounds cross the antimeridian.
    pub fn historical() -> Self {
        let mut table = Self::new();
        table.insert("USA", 1, SpecialViewport::new(-155.0, 60.0, 8.0));
        table
    }

    pub fn insert(&mut self, map: impl Into<String>, record_number: i32, viewport: SpecialViewport) {
        self.entries.insert((map.into(), record_number), viewport);
    }

    pub fn get(&self, map: &str, record_number: i32) -> Option<&SpecialViewport> {
        self.entries.get(&(map.to_string(), record_number))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The geographic window shown on the panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    center_long: f64,
    center_lat: f64,
    scale: f64,
}

impl Viewport {
    /// Creates a viewport, flooring the scale and correcting the center into bounds.
    pub fn new(center_long: f64, center_lat: f64, scale: f64) -> Self {
        let mut viewport = Self {
            center_long,
            center_lat,
            scale: floor_scale(scale),
        };
        viewport.correct_bounds();
        viewport
    }

    pub fn center_long(&self) -> f64 {
        self.center_long
    }

    pub fn center_lat(&self) -> f64 {
        self.center_lat
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(self.center_long, self.center_lat)
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Degrees of longitude visible across the panel.
    pub fn long_span(&self) -> f64 {
        WORLD_LONG_SPAN / self.scale
    }

    /// Degrees of latitude visible down the panel.
    pub fn lat_span(&self) -> f64 {
        WORLD_LAT_SPAN / self.scale
    }

    pub fn min_long(&self) -> f64 {
        self.center_long - self.long_span() / 2.0
    }

    pub fn max_long(&self) -> f64 {
        self.center_long + self.long_span() / 2.0
    }

    pub fn min_lat(&self) -> f64 {
        self.center_lat - self.lat_span() / 2.0
    }

    pub fn max_lat(&self) -> f64 {
        self.center_lat + self.lat_span() / 2.0
    }

    /// The visible window as a bounding box.
    pub fn visible_window(&self) -> GeoBounds {
        GeoBounds::new(self.min_long(), self.min_lat(), self.max_long(), self.max_lat())
    }

    /// Whether the visible window lies inside the legal extents.
    pub fn is_within_bounds(&self) -> bool {
        const EPSILON: f64 = 1e-9;
        self.min_long() >= MIN_LONGITUDE - EPSILON
            && self.max_long() <= MAX_LONGITUDE + EPSILON
            && self.min_lat() >= MIN_LATITUDE - EPSILON
            && self.max_lat() <= MAX_LATITUDE + EPSILON
    }

    /// Converts a geographic position to the nearest pixel.
    ///
    /// ```text
    /// px = round(w * (long - min_long) / long_span)
    /// py = h - round(h * (lat - min_lat) / lat_span)
    /// ```
    pub fn geo_to_pixel(&self, long: f64, lat: f64, panel: PanelSize) -> PixelPoint {
        let w = panel.width as f64;
        let h = panel.height as f64;
        let px = (w * (long - self.min_long()) / self.long_span()).round();
        let py = h - (h * (lat - self.min_lat()) / self.lat_span()).round();
        PixelPoint::new(px as i32, py as i32)
    }

    /// Converts a pixel to its geographic position, the inverse of [`geo_to_pixel`](Self::geo_to_pixel).
    ///
    /// An empty panel has no pixels; the center is returned.
    pub fn pixel_to_geo(&self, px: i32, py: i32, panel: PanelSize) -> GeoPoint {
        if panel.is_empty() {
            return self.center();
        }
        let w = panel.width as f64;
        let h = panel.height as f64;
        let long = self.min_long() + (px as f64 / w) * self.long_span();
        let lat = self.min_lat() + ((h - py as f64) / h) * self.lat_span();
        GeoPoint::new(long, lat)
    }

    /// Moves the center to `(long, lat)`, then corrects bounds.
    /// Non-finite positions are ignored.
    pub fn set_center(&mut self, long: f64, lat: f64) {
        if !(long.is_finite() && lat.is_finite()) {
            return;
        }
        self.center_long = long;
        self.center_lat = lat;
        self.correct_bounds();
    }

    /// Re-centers on the geographic position under a pixel.
    pub fn center_on_pixel(&mut self, px: i32, py: i32, panel: PanelSize) {
        if panel.is_empty() {
            return;
        }
        let target = self.pixel_to_geo(px, py, panel);
        self.set_center(target.long, target.lat);
    }

    /// Pans by a pixel delta: `dx` east-positive, `dy` screen-down-positive.
    pub fn pan(&mut self, dx: i32, dy: i32, panel: PanelSize) {
        if panel.is_empty() {
            return;
        }
        let long_per_pixel = self.long_span() / panel.width as f64;
        let lat_per_pixel = self.lat_span() / panel.height as f64;
        self.center_long += dx as f64 * long_per_pixel;
        self.center_lat -= dy as f64 * lat_per_pixel;
        self.correct_bounds();
    }

    /// Multiplies the scale by `factor` (> 1 zooms in).
    pub fn zoom_by(&mut self, factor: f64) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        self.scale = floor_scale(self.scale * factor);
        self.correct_bounds();
    }

    /// Fits the window to a pixel rectangle. Degenerate rectangles are ignored.
    pub fn zoom_to_pixel_rect(&mut self, rect: PixelRect, panel: PanelSize) {
        self.zoom_to_pixel_rect_with(rect, panel, None);
    }

    /// Like [`zoom_to_pixel_rect`](Self::zoom_to_pixel_rect), but a special
    /// viewport replaces the computed center and scale.
    pub fn zoom_to_pixel_rect_with(
        &mut self,
        rect: PixelRect,
        panel: PanelSize,
        special: Option<&SpecialViewport>,
    ) {
        if !rect.is_valid() || panel.is_empty() {
            return;
        }
        // (x1, y1) is the top-left corner, so it carries the larger latitude
        let top_left = self.pixel_to_geo(rect.x1, rect.y1, panel);
        let bottom_right = self.pixel_to_geo(rect.x2, rect.y2, panel);
        let bounds = GeoBounds::new(top_left.long, bottom_right.lat, bottom_right.long, top_left.lat);
        self.fit(bounds, special);
    }

    /// Fits the window to a geographic bounding box (typically a map MBR).
    pub fn zoom_to_bounds(&mut self, mbr: GeoBounds, panel: PanelSize) {
        self.zoom_to_bounds_with(mbr, panel, None);
    }

    /// Like [`zoom_to_bounds`](Self::zoom_to_bounds), with an optional special viewport.
    ///
    /// The corners are projected only to reject boxes that collapse to less
    /// than a pixel; the fit itself uses the exact geographic corners, so
    /// the result does not depend on the current viewport. Fitting the
    /// projected pixel rectangle instead would differ from this by up to
    /// one pixel of rounding per edge.
    pub fn zoom_to_bounds_with(
        &mut self,
        mbr: GeoBounds,
        panel: PanelSize,
        special: Option<&SpecialViewport>,
    ) {
        if panel.is_empty() {
            return;
        }
        let top_left = self.geo_to_pixel(mbr.min_x, mbr.max_y, panel);
        let bottom_right = self.geo_to_pixel(mbr.max_x, mbr.min_y, panel);
        let rect = PixelRect::new(top_left.x, top_left.y, bottom_right.x, bottom_right.y);
        if !rect.is_valid() || !(mbr.width() > 0.0 && mbr.height() > 0.0) {
            tracing::trace!(?mbr, "Ignoring zoom to degenerate bounds");
            return;
        }
        self.fit(mbr, special);
    }

    fn fit(&mut self, bounds: GeoBounds, special: Option<&SpecialViewport>) {
        let (center, scale) = match special {
            Some(special) => (special.center, special.scale),
            None => {
                let scale_x = WORLD_LONG_SPAN / bounds.width();
                let scale_y = WORLD_LAT_SPAN / bounds.height();
                (bounds.center(), scale_x.min(scale_y))
            }
        };
        let scale = scale * SCALE_MAP_DOWN_FACTOR;
        if !(center.long.is_finite() && center.lat.is_finite() && scale.is_finite()) {
            tracing::debug!(?bounds, "Ignoring zoom to non-finite bounds");
            return;
        }
        self.center_long = center.long;
        self.center_lat = center.lat;
        self.scale = floor_scale(scale);
        self.correct_bounds();
        tracing::trace!(viewport = %self, "Zoomed");
    }

    /// Moves the center so the window lies inside the legal extents.
    ///
    /// West is checked before east and south before north; with
    /// `scale >= MIN_SCALE` at most one side of each axis can be out.
    fn correct_bounds(&mut self) {
        let diff = self.min_long() - MIN_LONGITUDE;
        if diff < 0.0 {
            self.center_long -= diff;
        } else {
            let diff = MAX_LONGITUDE - self.max_long();
            if diff < 0.0 {
                self.center_long += diff;
            }
        }

        let diff = self.min_lat() - MIN_LATITUDE;
        if diff < 0.0 {
            self.center_lat -= diff;
        } else {
            let diff = MAX_LATITUDE - self.max_lat();
            if diff < 0.0 {
                self.center_lat += diff;
            }
        }
    }
}

fn floor_scale(scale: f64) -> f64 {
    if scale.is_finite() {
        scale.max(MIN_SCALE)
    } else {
        MIN_SCALE
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Viewport(center: ({:.4}, {:.4}), scale: {:.3})",
            self.center_long, self.center_lat, self.scale
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0.0, 0.0, MIN_SCALE)
    }
}
