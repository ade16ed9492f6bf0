use crate::input::events::MapEvent;
use crate::layers::tile::{MapSource, TileLayerDescriptor};
use crate::layers::visibility::LayerVisibilityController;
use log::info;
use serde::{Deserialize, Serialize};

/// A drawing layer; it has no zoom range and stays across base-map switches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorLayer {
    pub id: String,
    pub visible: bool,
}

impl VectorLayer {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            visible: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Layer {
    Tile(TileLayerDescriptor),
    Vector(VectorLayer),
}

impl Layer {
    pub fn id(&self) -> &str {
        match self {
            Layer::Tile(tile) => &tile.id,
            Layer::Vector(vector) => &vector.id,
        }
    }

    pub fn is_visible(&self) -> bool {
        match self {
            Layer::Tile(tile) => tile.visible,
            Layer::Vector(vector) => vector.visible,
        }
    }

    pub fn set_visible(&mut self, visible: bool) {
        match self {
            Layer::Tile(tile) => tile.visible = visible,
            Layer::Vector(vector) => vector.visible = visible,
        }
    }
}

/// The map's layer stack: tile layers of the active map source, then the
/// persistent vector layers drawn on top
#[derive(Debug, Default)]
pub struct LayerSet {
    layers: Vec<Layer>,
    active_source: Option<String>,
    visibility: LayerVisibilityController,
}

impl LayerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a vector layer that survives map-source switches
    pub fn add_persistent(&mut self, layer: VectorLayer) {
        self.layers.push(Layer::Vector(layer));
    }

    /// Replaces the tile layers with those of `source` and applies `zoom` to them
    pub fn activate_source(&mut self, source: &MapSource, zoom: f64) {
        let mut layers: Vec<Layer> = source.layers.iter().cloned().map(Layer::Tile).collect();
        layers.extend(
            self.layers
                .drain(..)
                .filter(|layer| matches!(layer, Layer::Vector(_))),
        );
        self.layers = layers;
        self.active_source = Some(source.id.clone());

        self.visibility.apply_zoom(zoom, &mut self.layers);
        info!("activated map source {} ({})", source.id, source.name);
    }

    pub fn apply_zoom(&mut self, zoom: f64) -> usize {
        self.visibility.apply_zoom(zoom, &mut self.layers)
    }

    pub fn handle_map_event(&mut self, event: &MapEvent) -> usize {
        self.visibility.handle(event, &mut self.layers)
    }

    pub fn active_source(&self) -> Option<&str> {
        self.active_source.as_deref()
    }

    pub fn get(&self, id: &str) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.id() == id)
    }

    /// All layers in drawing order
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn tile_layers(&self) -> impl Iterator<Item = &TileLayerDescriptor> {
        self.layers.iter().filter_map(|layer| match layer {
            Layer::Tile(tile) => Some(tile),
            Layer::Vector(_) => None,
        })
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}
