//! Prelude module for common mapmeasure types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use mapmeasure::prelude::*;`

pub use crate::core::{
    config::{HelpMessages, MeasureConfig, TooltipOffsets},
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
    metric::{distance, format_area, format_length, path_length, ring_area},
    session::{DrawSession, Measurement, SessionState},
    tooltip::{OverlayId, OverlayRegistry, Placement, TooltipKind, TooltipOverlay},
};

pub use crate::{Error as MeasureError, Result};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
