//! Fixed constants of the geographic projection and the shapefile format.

/// Longitude degrees visible at scale 1.0.
pub const WORLD_LONG_SPAN: f64 = 360.0;

/// Latitude degrees visible at scale 1.0.
pub const WORLD_LAT_SPAN: f64 = 180.0;

/// Westernmost longitude the visible window may reach.
///
/// Extends past -180 so maps straddling the antimeridian (Alaska's
/// Aleutians) still fit.
pub const MIN_LONGITUDE: f64 = -220.0;

/// Easternmost longitude the visible window may reach.
pub const MAX_LONGITUDE: f64 = 180.0;

/// Southernmost latitude the visible window may reach.
pub const MIN_LATITUDE: f64 = -90.0;

/// Northernmost latitude the visible window may reach.
pub const MAX_LATITUDE: f64 = 90.0;

/// Smallest scale at which the whole visible window fits the legal extents.
pub const MIN_SCALE: f64 = 1.0;

/// Applied after every zoom so the target region does not touch the panel edges.
pub const SCALE_MAP_DOWN_FACTOR: f64 = 0.8;

/// Default factor for stepwise zoom in/out.
pub const ZOOM_STEP: f64 = 1.2;
