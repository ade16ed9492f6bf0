use crate::core::geo::{Crs, GeographicPoint, ProjectedPoint};
use crate::measure::tooltip::OverlayId;
use crate::Result;

/// The map view the measurement tool draws on.
///
/// Rendering, pan and zoom belong to the implementor; the tool only asks for the
/// current zoom, coordinate transforms, and overlay (de)registration.
pub trait MapView {
    fn current_zoom(&self) -> f64;

    /// Reference system of the view's working coordinates
    fn projection(&self) -> Crs;

    fn projection_transform(&self, point: ProjectedPoint, from: Crs, to: Crs)
        -> Result<ProjectedPoint>;

    fn register_overlay(&mut self, id: OverlayId);

    fn remove_overlay(&mut self, id: OverlayId);

    /// Converts a view coordinate to longitude/latitude
    fn to_geographic(&self, point: ProjectedPoint) -> Result<GeographicPoint> {
        let lon_lat = self.projection_transform(point, self.projection(), Crs::Wgs84)?;
        Ok(GeographicPoint::new(lon_lat.x, lon_lat.y))
    }
}
