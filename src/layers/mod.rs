pub mod manager;
pub mod tile;
pub mod visibility;

pub use manager::{Layer, LayerSet, VectorLayer};
pub use tile::{MapSource, TileLayerDescriptor, ZoomRange};
pub use visibility::LayerVisibilityController;
