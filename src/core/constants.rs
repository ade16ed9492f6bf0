//! Core constants for the measurement engine.
//! Keeping them in a single place makes it easier to audit the numbers the metric contract depends on.

/// Sphere radius used for every geodesic computation (WGS84 equatorial radius, in meters).
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// Latitude limit of the Web Mercator projection.
pub const MAX_LATITUDE: f64 = 85.0511287798;

/// Lengths strictly above this many meters are reported in kilometers.
pub const LENGTH_KM_THRESHOLD: f64 = 100.0;

/// Areas strictly above this many square meters are reported in square kilometers.
pub const AREA_KM2_THRESHOLD: f64 = 10_000.0;

/// Pixel offset of the help tooltip relative to the pointer.
pub const HELP_TOOLTIP_OFFSET: (i32, i32) = (15, 0);

/// Pixel offset of a live measure tooltip relative to its anchor.
pub const MEASURE_TOOLTIP_OFFSET: (i32, i32) = (0, -15);

/// Pixel offset applied when a measure tooltip is pinned.
pub const PINNED_TOOLTIP_OFFSET: (i32, i32) = (0, -7);

/// Default zoom limits of the reference viewport.
pub const DEFAULT_MIN_ZOOM: f64 = 0.0;
pub const DEFAULT_MAX_ZOOM: f64 = 18.0;
