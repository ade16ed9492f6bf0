use crate::input::events::MapEvent;
use crate::layers::manager::Layer;
use log::debug;

/// Shows tile layers only within their declared zoom range.
///
/// Layers without a zoom range, vector layers included, are never touched.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayerVisibilityController;

impl LayerVisibilityController {
    pub fn new() -> Self {
        Self
    }

    /// Sets the visibility of every zoom-bounded layer for `zoom`.
    ///
    /// Returns how many layers changed; calling it again with the same zoom
    /// changes nothing.
    pub fn apply_zoom(&self, zoom: f64, layers: &mut [Layer]) -> usize {
        let mut changed = 0;
        for layer in layers.iter_mut() {
            let Layer::Tile(tile) = layer else {
                continue;
            };
            let Some(range) = tile.zoom_range() else {
                continue;
            };

            let visible = range.contains(zoom);
            if tile.visible != visible {
                debug!(
                    "layer {} {} at zoom {}",
                    tile.id,
                    if visible { "shown" } else { "hidden" },
                    zoom
                );
                tile.visible = visible;
                changed += 1;
            }
        }
        changed
    }

    /// Re-applies visibility when the map reports a new zoom
    pub fn handle(&self, event: &MapEvent, layers: &mut [Layer]) -> usize {
        match event {
            MapEvent::ZoomChanged { zoom } => self.apply_zoom(*zoom, layers),
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::manager::VectorLayer;
    use crate::layers::tile::TileLayerDescriptor;

    fn layers() -> Vec<Layer> {
        vec![
            Layer::Tile(TileLayerDescriptor::new("topo", "t/{z}/{x}/{y}").with_zoom_range(5.0, 10.0)),
            Layer::Tile(TileLayerDescriptor::new("unbounded", "u/{z}/{x}/{y}")),
            Layer::Vector(VectorLayer::new("drawing")),
        ]
    }

    fn visible(layers: &[Layer], id: &str) -> bool {
        layers
            .iter()
            .find(|layer| layer.id() == id)
            .map(|layer| layer.is_visible())
            .unwrap()
    }

    #[test]
    fn test_boundaries_are_visible() {
        let controller = LayerVisibilityController::new();
        let mut layers = layers();

        controller.apply_zoom(10.0, &mut layers);
        assert!(visible(&layers, "topo"));
        controller.apply_zoom(5.0, &mut layers);
        assert!(visible(&layers, "topo"));
    }

    #[test]
    fn test_outside_range_is_hidden() {
        let controller = LayerVisibilityController::new();
        let mut layers = layers();

        controller.apply_zoom(11.0, &mut layers);
        assert!(!visible(&layers, "topo"));
        controller.apply_zoom(4.0, &mut layers);
        assert!(!visible(&layers, "topo"));
    }

    #[test]
    fn test_layers_without_range_are_untouched() {
        let controller = LayerVisibilityController::new();
        let mut layers = layers();
        for layer in layers.iter_mut() {
            if layer.id() != "topo" {
                layer.set_visible(false);
            }
        }

        controller.apply_zoom(7.0, &mut layers);
        assert!(!visible(&layers, "unbounded"));
        assert!(!visible(&layers, "drawing"));
        controller.apply_zoom(20.0, &mut layers);
        assert!(!visible(&layers, "unbounded"));
        assert!(!visible(&layers, "drawing"));
    }

    #[test]
    fn test_apply_zoom_is_idempotent() {
        let controller = LayerVisibilityController::new();
        let mut layers = layers();

        assert_eq!(controller.apply_zoom(12.0, &mut layers), 1);
        let snapshot = layers.clone();
        assert_eq!(controller.apply_zoom(12.0, &mut layers), 0);
        assert_eq!(layers, snapshot);
    }

    #[test]
    fn test_only_zoom_events_apply() {
        let controller = LayerVisibilityController::new();
        let mut layers = layers();

        assert_eq!(controller.handle(&MapEvent::PointerOut, &mut layers), 0);
        assert_eq!(
            controller.handle(&MapEvent::ZoomChanged { zoom: 2.0 }, &mut layers),
            1
        );
        assert!(!visible(&layers, "topo"));
    }
}
