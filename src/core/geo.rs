use crate::core::constants::{EARTH_RADIUS, MAX_LATITUDE};
use crate::{MeasureError, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// A geographic coordinate in degrees, longitude first
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeographicPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeographicPoint {
    /// Creates a new geographic coordinate
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Validates that the coordinates are within valid ranges
    pub fn is_valid(&self) -> bool {
        self.lat >= -90.0 && self.lat <= 90.0 && self.lon >= -180.0 && self.lon <= 180.0
    }

    /// Converts to Web Mercator projection (EPSG:3857)
    pub fn to_mercator(&self) -> Result<ProjectedPoint> {
        if !self.lat.is_finite() || !self.lon.is_finite() || self.lat.abs() > 90.0 {
            return Err(MeasureError::InvalidCoordinates(format!(
                "cannot project lon {} lat {}",
                self.lon, self.lat
            )));
        }

        let lat = self.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE);
        let x = self.lon.to_radians() * EARTH_RADIUS;
        let y = ((PI / 4.0 + lat.to_radians() / 2.0).tan().ln()) * EARTH_RADIUS;
        Ok(ProjectedPoint::new(x, y))
    }

    /// Creates a geographic coordinate from Web Mercator coordinates
    pub fn from_mercator(point: ProjectedPoint) -> Self {
        let lon = (point.x / EARTH_RADIUS).to_degrees();
        let lat = (2.0 * (point.y / EARTH_RADIUS).exp().atan() - PI / 2.0).to_degrees();
        Self::new(lon, lat)
    }
}

impl Default for GeographicPoint {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl From<GeographicPoint> for ProjectedPoint {
    /// Reinterprets degrees as plain x/y, as transforms between CRSs do
    fn from(point: GeographicPoint) -> Self {
        ProjectedPoint::new(point.lon, point.lat)
    }
}

/// A point in the map view's working projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectedPoint {
    pub x: f64,
    pub y: f64,
}

impl ProjectedPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Default for ProjectedPoint {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Coordinate reference systems understood by the projection transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Crs {
    /// Longitude/latitude in degrees (EPSG:4326)
    Wgs84,
    /// Spherical Web Mercator in meters (EPSG:3857)
    WebMercator,
}

impl Crs {
    pub fn code(&self) -> &'static str {
        match self {
            Crs::Wgs84 => "EPSG:4326",
            Crs::WebMercator => "EPSG:3857",
        }
    }
}

impl std::fmt::Display for Crs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Transforms a point between two reference systems.
///
/// Points in `Crs::Wgs84` carry longitude in `x` and latitude in `y`.
pub fn transform(point: ProjectedPoint, from: Crs, to: Crs) -> Result<ProjectedPoint> {
    match (from, to) {
        (a, b) if a == b => Ok(point),
        (Crs::WebMercator, Crs::Wgs84) => {
            Ok(GeographicPoint::from_mercator(point).into())
        }
        (Crs::Wgs84, Crs::WebMercator) => GeographicPoint::new(point.x, point.y).to_mercator(),
        (from, to) => Err(MeasureError::Projection(format!(
            "no transform from {} to {}",
            from, to
        ))),
    }
}
