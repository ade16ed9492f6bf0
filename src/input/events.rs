use crate::core::geo::ProjectedPoint;
use crate::measure::geometry::MeasurementMode;
use serde::{Deserialize, Serialize};

/// Steps of a single drawing gesture, in view coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DrawEvent {
    /// First click; starts a session
    Start { position: ProjectedPoint },
    /// Click that fixes a vertex
    AddVertex { position: ProjectedPoint },
    /// Pointer motion dragging the sketch vertex
    MoveVertex { position: ProjectedPoint },
    /// Double click; completes the session
    Finish,
    /// Escape or interaction teardown
    Cancel,
}

impl DrawEvent {
    /// Gets the position associated with this event, if any
    pub fn position(&self) -> Option<ProjectedPoint> {
        match self {
            DrawEvent::Start { position }
            | DrawEvent::AddVertex { position }
            | DrawEvent::MoveVertex { position } => Some(*position),
            DrawEvent::Finish | DrawEvent::Cancel => None,
        }
    }

    /// Whether this event changes the geometry being drawn
    pub fn changes_geometry(&self) -> bool {
        self.position().is_some()
    }
}

/// Notifications coming from the map view
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MapEvent {
    /// Resolution changed
    ZoomChanged { zoom: f64 },
    /// Pointer moved over the map
    PointerMove {
        position: ProjectedPoint,
        #[serde(default)]
        dragging: bool,
    },
    /// Pointer left the map viewport
    PointerOut,
}

/// Requests from the surrounding UI (toolbar buttons)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "mode", rename_all = "snake_case")]
pub enum Command {
    StartDrawing,
    StopDrawing,
    ClearDrawing,
    SetMeasurementMode(MeasurementMode),
}
