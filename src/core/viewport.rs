use crate::core::constants::{DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM};
use crate::core::geo::{self, Crs, GeographicPoint, ProjectedPoint};
use crate::core::view::MapView;
use crate::measure::tooltip::OverlayId;
use crate::prelude::HashSet;
use crate::Result;

/// In-memory map view working in Web Mercator.
///
/// Suitable for headless use and tests: it keeps the view state the
/// measurement tool reads and records which overlays are attached.
#[derive(Debug, Clone)]
pub struct Viewport {
    /// The center of the map view in geographical coordinates
    pub center: GeographicPoint,
    zoom: f64,
    /// The minimum allowed zoom level
    pub min_zoom: f64,
    /// The maximum allowed zoom level
    pub max_zoom: f64,
    overlays: HashSet<OverlayId>,
}

impl Viewport {
    /// Creates a new viewport
    pub fn new(center: GeographicPoint, zoom: f64) -> Self {
        Self {
            center,
            zoom: zoom.clamp(DEFAULT_MIN_ZOOM, DEFAULT_MAX_ZOOM),
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            overlays: HashSet::default(),
        }
    }

    /// Sets the zoom level, clamping to valid range
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    /// Sets the zoom limits
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self.zoom = self.zoom.clamp(min_zoom, max_zoom);
    }

    /// Projects a geographic coordinate into the view's working coordinates
    pub fn project(&self, point: GeographicPoint) -> Result<ProjectedPoint> {
        point.to_mercator()
    }

    pub fn has_overlay(&self, id: OverlayId) -> bool {
        self.overlays.contains(&id)
    }

    /// Number of overlays currently attached to the view
    pub fn overlay_count(&self) -> usize {
        self.overlays.len()
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(GeographicPoint::default(), 4.0)
    }
}

impl MapView for Viewport {
    fn current_zoom(&self) -> f64 {
        self.zoom
    }

    fn projection(&self) -> Crs {
        Crs::WebMercator
    }

    fn projection_transform(
        &self,
        point: ProjectedPoint,
        from: Crs,
        to: Crs,
    ) -> Result<ProjectedPoint> {
        geo::transform(point, from, to)
    }

    fn register_overlay(&mut self, id: OverlayId) {
        self.overlays.insert(id);
    }

    fn remove_overlay(&mut self, id: OverlayId) {
        self.overlays.remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_is_clamped() {
        let mut viewport = Viewport::new(GeographicPoint::new(37.41, 8.82), 4.0);
        viewport.set_zoom(25.0);
        assert_eq!(viewport.current_zoom(), 18.0);

        viewport.set_zoom_limits(5.0, 12.0);
        assert_eq!(viewport.current_zoom(), 12.0);
        viewport.set_zoom(1.0);
        assert_eq!(viewport.current_zoom(), 5.0);
    }

    #[test]
    fn test_center_is_kept_through_zoom() {
        let bern = GeographicPoint::new(7.4474, 46.948);
        let mut viewport = Viewport::new(bern, 30.0);
        assert_eq!(viewport.current_zoom(), 18.0);
        viewport.set_zoom(9.0);

        assert_eq!(viewport.center.lon, 7.4474);
        assert_eq!(viewport.center.lat, 46.948);
        let origin = viewport.project(Viewport::default().center).unwrap();
        assert!(origin.x.abs() < 1e-6 && origin.y.abs() < 1e-6);
    }

    #[test]
    fn test_to_geographic_inverts_project() {
        let viewport = Viewport::default();
        let zurich = GeographicPoint::new(8.5417, 47.3769);
        let projected = viewport.project(zurich).unwrap();
        let back = viewport.to_geographic(projected).unwrap();

        assert!((back.lon - zurich.lon).abs() < 1e-9);
        assert!((back.lat - zurich.lat).abs() < 1e-9);
    }

    #[test]
    fn test_overlay_registration() {
        let mut viewport = Viewport::default();
        viewport.register_overlay(OverlayId(3));
        assert!(viewport.has_overlay(OverlayId(3)));
        viewport.remove_overlay(OverlayId(3));
        viewport.remove_overlay(OverlayId(3));
        assert_eq!(viewport.overlay_count(), 0);
    }
}
