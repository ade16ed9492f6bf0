pub mod controller;
pub mod geometry;
pub mod metric;
pub mod session;
pub mod tooltip;

pub use controller::{MeasurementContext, MeasurementModeController};
pub use geometry::{Geometry, MeasurementMode};
pub use session::{DrawSession, Measurement, SessionState};
pub use tooltip::{OverlayId, OverlayRegistry, Placement, TooltipKind, TooltipOverlay};
