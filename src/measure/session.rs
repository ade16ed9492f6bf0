use crate::core::geo::ProjectedPoint;
use crate::core::view::MapView;
use crate::input::events::DrawEvent;
use crate::measure::controller::MeasurementContext;
use crate::measure::geometry::{Geometry, MeasurementMode};
use crate::measure::metric;
use crate::measure::tooltip::OverlayId;
use crate::Result;
use log::{debug, info};

/// Lifecycle of a single drawing gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Active,
    Completed,
}

/// Result of a completed gesture
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub mode: MeasurementMode,
    /// Meters for a line, square meters for an area
    pub value: f64,
    pub text: String,
    /// The pinned tooltip showing `text`
    pub tooltip: OverlayId,
}

/// One measurement gesture: captures the geometry, keeps its tooltip current,
/// and pins the tooltip when drawing ends.
#[derive(Debug)]
pub struct DrawSession {
    state: SessionState,
    mode: MeasurementMode,
    geometry: Option<Geometry>,
    tooltip: Option<OverlayId>,
    value: f64,
    text: String,
}

impl DrawSession {
    /// Creates an idle session that will report through `tooltip`
    pub fn new(mode: MeasurementMode, tooltip: OverlayId) -> Self {
        Self {
            state: SessionState::Idle,
            mode,
            geometry: None,
            tooltip: Some(tooltip),
            value: 0.0,
            text: String::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == SessionState::Active
    }

    pub fn mode(&self) -> MeasurementMode {
        self.mode
    }

    /// The geometry being drawn; `None` unless the session is active
    pub fn geometry(&self) -> Option<&Geometry> {
        self.geometry.as_ref()
    }

    pub fn tooltip(&self) -> Option<OverlayId> {
        self.tooltip
    }

    /// Latest measured value
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Latest formatted measurement
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Feeds one gesture event into the session.
    ///
    /// Returns the finished measurement when the event completes the session.
    /// Events that do not apply to the current state are ignored.
    pub fn handle<V: MapView>(
        &mut self,
        event: &DrawEvent,
        ctx: &mut MeasurementContext<V>,
    ) -> Result<Option<Measurement>> {
        match (self.state, event) {
            (SessionState::Idle, DrawEvent::Start { position }) => {
                self.begin(*position, ctx)?;
            }
            (SessionState::Active, DrawEvent::AddVertex { position }) => {
                if let Some(geometry) = self.geometry.as_mut() {
                    geometry.push_vertex(*position);
                }
                self.on_geometry_changed(ctx)?;
            }
            (SessionState::Active, DrawEvent::MoveVertex { position }) => {
                if let Some(geometry) = self.geometry.as_mut() {
                    geometry.replace_last_vertex(*position);
                }
                self.on_geometry_changed(ctx)?;
            }
            (SessionState::Active, DrawEvent::Finish) => return self.finish(ctx),
            (_, DrawEvent::Cancel) => self.cancel(ctx),
            (state, event) => debug!("ignoring {:?} in {:?} session", event, state),
        }
        Ok(None)
    }

    fn begin<V: MapView>(
        &mut self,
        position: ProjectedPoint,
        ctx: &mut MeasurementContext<V>,
    ) -> Result<()> {
        let Some(tooltip) = self.tooltip else {
            return Ok(());
        };

        // the clicked vertex plus the sketch vertex that follows the pointer
        let mut geometry = Geometry::new(self.mode);
        geometry.push_vertex(position);
        geometry.push_vertex(position);

        // nothing changes state until the first reading succeeds
        let (value, text) = measure(&geometry, ctx)?;
        let anchor = geometry.anchor().unwrap_or(position);
        ctx.overlays.expect_mut(tooltip)?.show(anchor, text.as_str())?;
        self.geometry = Some(geometry);
        self.value = value;
        self.text = text;
        self.state = SessionState::Active;
        debug!("{} measurement started", self.mode);
        Ok(())
    }

    fn on_geometry_changed<V: MapView>(&mut self, ctx: &mut MeasurementContext<V>) -> Result<()> {
        let (Some(geometry), Some(tooltip)) = (self.geometry.as_ref(), self.tooltip) else {
            return Ok(());
        };

        let (value, text) = measure(geometry, ctx)?;

        if let Some(anchor) = geometry.anchor() {
            ctx.overlays.expect_mut(tooltip)?.update(anchor, text.as_str())?;
        }
        self.value = value;
        self.text = text;
        Ok(())
    }

    fn finish<V: MapView>(&mut self, ctx: &mut MeasurementContext<V>) -> Result<Option<Measurement>> {
        let Some(tooltip) = self.tooltip else {
            return Ok(None);
        };

        ctx.overlays
            .expect_mut(tooltip)?
            .pin(ctx.config.offsets.pinned)?;
        self.geometry = None;
        self.state = SessionState::Completed;
        info!("{} measurement completed: {}", self.mode, self.text);

        Ok(Some(Measurement {
            mode: self.mode,
            value: self.value,
            text: self.text.clone(),
            tooltip,
        }))
    }

    /// Abandons the session. An unpinned tooltip is removed from the map;
    /// a pinned one stays.
    pub fn cancel<V: MapView>(&mut self, ctx: &mut MeasurementContext<V>) {
        if let Some(tooltip) = self.tooltip.take() {
            let pinned = ctx
                .overlays
                .get(tooltip)
                .map(|overlay| overlay.is_pinned())
                .unwrap_or(false);
            if !pinned {
                ctx.overlays.remove(tooltip, &mut ctx.view);
            }
        }

        if self.state == SessionState::Active {
            debug!("{} measurement cancelled", self.mode);
        }
        self.geometry = None;
        self.state = SessionState::Idle;
    }
}

/// Reads the length or area of `geometry` in the view's coordinates
fn measure<V: MapView>(geometry: &Geometry, ctx: &MeasurementContext<V>) -> Result<(f64, String)> {
    let lon_lat = geometry
        .vertices()
        .iter()
        .map(|point| ctx.view.to_geographic(*point))
        .collect::<Result<Vec<_>>>()?;

    Ok(match geometry {
        Geometry::Line(_) => {
            let length = metric::path_length(&lon_lat);
            (length, metric::format_length(length))
        }
        Geometry::Area(_) => {
            let area = metric::ring_area(&lon_lat);
            (area, metric::format_area(area))
        }
    })
}
