//! # mapmeasure
//!
//! Interactive measurement for map viewers: draw a line or polygon over a
//! projected map and read its geodesic length or area live, with tooltips
//! that follow the gesture and stay pinned once it ends. Also shows and hides
//! tiled background layers according to their zoom ranges.
//!
//! The map view itself (rendering, pan/zoom, projections) is supplied by the
//! caller through the [`MapView`] trait.

pub mod core;
pub mod input;
pub mod layers;
pub mod measure;
pub mod prelude;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::MeasureConfig,
    geo::{Crs, GeographicPoint, ProjectedPoint},
    view::MapView,
    viewport::Viewport,
};

pub use crate::input::events::{Command, DrawEvent, MapEvent};

pub use crate::layers::{
    manager::{Layer, LayerSet, VectorLayer},
    tile::{MapSource, TileLayerDescriptor, ZoomRange},
    visibility::LayerVisibilityController,
};

pub use crate::measure::{
    controller::{MeasurementContext, MeasurementModeController},
    geometry::{Geometry, MeasurementMode},
    metric,
    session::{DrawSession, Measurement, SessionState},
    tooltip::{OverlayId, OverlayRegistry, TooltipKind, TooltipOverlay},
};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MeasureError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MeasureError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Projection error: {0}")]
    Projection(String),

    #[error("Overlay error: {0}")]
    Overlay(String),

    #[error("Layer error: {0}")]
    Layer(String),
}

/// Error type alias for convenience
pub type Error = MeasureError;

/// Routes `log` output to stderr, honouring `RUST_LOG` (default `info`).
/// Does nothing if a logger is already installed.
#[cfg(feature = "debug")]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
