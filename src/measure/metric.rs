//! Geodesic length and area on a spherical earth.
//!
//! All functions use a sphere of radius [`EARTH_RADIUS`]; this is a spherical
//! approximation, not the WGS84 ellipsoid.

use crate::core::constants::{AREA_KM2_THRESHOLD, EARTH_RADIUS, LENGTH_KM_THRESHOLD};
use crate::core::geo::GeographicPoint;

/// Great-circle distance in meters between two points (haversine formula)
pub fn distance(a: GeographicPoint, b: GeographicPoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let half_dlat = (lat2 - lat1) / 2.0;
    let half_dlon = (b.lon - a.lon).to_radians() / 2.0;

    let h = half_dlat.sin().powi(2) + half_dlon.sin().powi(2) * lat1.cos() * lat2.cos();
    2.0 * EARTH_RADIUS * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Sum of great-circle distances over consecutive pairs, in meters
pub fn path_length(points: &[GeographicPoint]) -> f64 {
    points.windows(2).map(|pair| distance(pair[0], pair[1])).sum()
}

/// Unsigned area in square meters enclosed by a ring.
///
/// The ring is closed implicitly; a repeated closing vertex adds nothing.
pub fn ring_area(points: &[GeographicPoint]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }

    let mut excess = 0.0;
    let mut prev = points[points.len() - 1];
    for &point in points {
        excess += (point.lon - prev.lon).to_radians()
            * (2.0 + prev.lat.to_radians().sin() + point.lat.to_radians().sin());
        prev = point;
    }

    (excess * EARTH_RADIUS * EARTH_RADIUS / 2.0).abs()
}

/// Formats a length, switching to kilometers above 100 m
pub fn format_length(meters: f64) -> String {
    if meters > LENGTH_KM_THRESHOLD {
        format!("{} km", round_half_up(meters / 1000.0))
    } else {
        format!("{} m", round_half_up(meters))
    }
}

/// Formats an area, switching to square kilometers above 10 000 m²
pub fn format_area(square_meters: f64) -> String {
    if square_meters > AREA_KM2_THRESHOLD {
        format!("{} km²", round_half_up(square_meters / 1_000_000.0))
    } else {
        format!("{} m²", round_half_up(square_meters))
    }
}

// At most two decimals, ties away from zero (values here are never negative).
// Trailing zeros are dropped when printed.
fn round_half_up(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
