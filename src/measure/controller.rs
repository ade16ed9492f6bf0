use crate::core::config::MeasureConfig;
use crate::core::geo::ProjectedPoint;
use crate::core::view::MapView;
use crate::input::events::{Command, DrawEvent, MapEvent};
use crate::measure::geometry::MeasurementMode;
use crate::measure::session::{DrawSession, Measurement};
use crate::measure::tooltip::{OverlayId, OverlayRegistry, TooltipKind};
use crate::Result;
use log::{debug, info, warn};

/// State shared by every measurement component: the map view, the tooltips
/// attached to it, and the active configuration
pub struct MeasurementContext<V: MapView> {
    pub view: V,
    pub overlays: OverlayRegistry,
    pub config: MeasureConfig,
}

impl<V: MapView> MeasurementContext<V> {
    pub fn new(view: V, config: MeasureConfig) -> Self {
        Self {
            view,
            overlays: OverlayRegistry::new(),
            config,
        }
    }
}

/// Entry point for the measure tool: turns toolbar commands, gesture events
/// and pointer motion into sessions and tooltips.
pub struct MeasurementModeController<V: MapView> {
    ctx: MeasurementContext<V>,
    mode: MeasurementMode,
    /// Draw interaction and pointer tracking attached
    drawing: bool,
    session: Option<DrawSession>,
    /// Hidden measure tooltip waiting for the next gesture
    pending_tooltip: Option<OverlayId>,
    help_tooltip: Option<OverlayId>,
    measurements: Vec<Measurement>,
}

impl<V: MapView> MeasurementModeController<V> {
    pub fn new(view: V, config: MeasureConfig) -> Self {
        let mode = config.initial_mode;
        Self {
            ctx: MeasurementContext::new(view, config),
            mode,
            drawing: false,
            session: None,
            pending_tooltip: None,
            help_tooltip: None,
            measurements: Vec::new(),
        }
    }

    /// Starts accepting gestures and tracking the pointer
    pub fn start(&mut self) {
        self.stop();
        self.drawing = true;
        self.add_interaction();
        info!("measuring {}s", self.mode);
    }

    /// Stops accepting gestures. Completed measurements stay on the map.
    pub fn stop(&mut self) {
        if !self.drawing {
            return;
        }
        self.drawing = false;
        self.remove_interaction();
        if let Some(help) = self.help_tooltip {
            if let Some(overlay) = self.ctx.overlays.get_mut(help) {
                if let Err(e) = overlay.hide() {
                    warn!("failed to hide help tooltip: {}", e);
                }
            }
        }
        debug!("drawing stopped");
    }

    /// Removes every tooltip and measurement. Drawing continues if it was started.
    pub fn clear(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.cancel(&mut self.ctx);
        }
        self.ctx.overlays.destroy_all(&mut self.ctx.view);
        self.pending_tooltip = None;
        self.help_tooltip = None;
        self.measurements.clear();

        if self.drawing {
            self.add_interaction();
        }
        debug!("measurements cleared");
    }

    /// Switches the shape for subsequent gestures, abandoning one in progress
    pub fn set_mode(&mut self, mode: MeasurementMode) {
        if let Some(mut session) = self.session.take() {
            session.cancel(&mut self.ctx);
        }
        self.mode = mode;

        if self.drawing {
            self.remove_interaction();
            self.add_interaction();
        }
        info!("measurement mode set to {}", mode);
    }

    pub fn handle_command(&mut self, command: Command) {
        match command {
            Command::StartDrawing => self.start(),
            Command::StopDrawing => self.stop(),
            Command::ClearDrawing => self.clear(),
            Command::SetMeasurementMode(mode) => self.set_mode(mode),
        }
    }

    /// Feeds a gesture event to the current session.
    ///
    /// Returns the measurement when the event completes it. Projection errors
    /// from the map view are passed through.
    pub fn handle_draw_event(&mut self, event: &DrawEvent) -> Result<Option<Measurement>> {
        if !self.drawing {
            return Ok(None);
        }

        if let DrawEvent::Start { .. } = event {
            if let Some(mut previous) = self.session.take() {
                debug!("new gesture replaces the one in progress");
                previous.cancel(&mut self.ctx);
            }
            let tooltip = self.take_pending_tooltip();
            self.session = Some(DrawSession::new(self.mode, tooltip));
        }

        let Some(session) = self.session.as_mut() else {
            return Ok(None);
        };
        let finished = session.handle(event, &mut self.ctx)?;

        if let Some(measurement) = &finished {
            self.measurements.push(measurement.clone());
            self.session = None;
            self.prepare_tooltip();
        } else if matches!(event, DrawEvent::Cancel) {
            self.session = None;
        }
        Ok(finished)
    }

    /// Reacts to pointer motion over the map by moving the help tooltip
    pub fn handle_map_event(&mut self, event: &MapEvent) {
        if !self.drawing {
            return;
        }
        match *event {
            MapEvent::PointerMove { dragging: true, .. } => {}
            MapEvent::PointerMove { position, .. } => self.show_help(position),
            MapEvent::PointerOut => {
                if let Some(help) = self.help_tooltip {
                    if let Some(overlay) = self.ctx.overlays.get_mut(help) {
                        if let Err(e) = overlay.hide() {
                            warn!("failed to hide help tooltip: {}", e);
                        }
                    }
                }
            }
            MapEvent::ZoomChanged { .. } => {}
        }
    }

    fn show_help(&mut self, position: ProjectedPoint) {
        let drawing = self
            .session
            .as_ref()
            .filter(|session| session.is_active())
            .map(|session| session.mode());
        let message = self.ctx.config.messages.for_pointer(drawing).to_string();

        let help = match self.help_tooltip {
            Some(id) => id,
            None => self.create_help_tooltip(),
        };
        if let Some(overlay) = self.ctx.overlays.get_mut(help) {
            if let Err(e) = overlay.show(position, message) {
                warn!("failed to show help tooltip: {}", e);
            }
        }
    }

    fn add_interaction(&mut self) {
        self.prepare_tooltip();
        if let Some(old) = self.help_tooltip.take() {
            self.ctx.overlays.remove(old, &mut self.ctx.view);
        }
        self.create_help_tooltip();
    }

    fn remove_interaction(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.cancel(&mut self.ctx);
        }
        if let Some(pending) = self.pending_tooltip.take() {
            self.ctx.overlays.remove(pending, &mut self.ctx.view);
        }
    }

    fn create_help_tooltip(&mut self) -> OverlayId {
        let offset = self.ctx.config.offsets.help;
        let id = self
            .ctx
            .overlays
            .create(TooltipKind::Help, offset, &mut self.ctx.view);
        self.help_tooltip = Some(id);
        id
    }

    fn prepare_tooltip(&mut self) {
        if self.pending_tooltip.is_none() {
            let offset = self.ctx.config.offsets.measure;
            let id = self
                .ctx
                .overlays
                .create(TooltipKind::Measure, offset, &mut self.ctx.view);
            self.pending_tooltip = Some(id);
        }
    }

    fn take_pending_tooltip(&mut self) -> OverlayId {
        self.prepare_tooltip();
        match self.pending_tooltip.take() {
            Some(id) => id,
            None => {
                let offset = self.ctx.config.offsets.measure;
                self.ctx
                    .overlays
                    .create(TooltipKind::Measure, offset, &mut self.ctx.view)
            }
        }
    }

    pub fn mode(&self) -> MeasurementMode {
        self.mode
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// The session currently being drawn, if any
    pub fn active_session(&self) -> Option<&DrawSession> {
        self.session.as_ref().filter(|session| session.is_active())
    }

    pub fn help_tooltip(&self) -> Option<OverlayId> {
        self.help_tooltip
    }

    /// Measurements completed since the last clear
    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    pub fn overlays(&self) -> &OverlayRegistry {
        &self.ctx.overlays
    }

    pub fn view(&self) -> &V {
        &self.ctx.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.ctx.view
    }

    pub fn context(&self) -> &MeasurementContext<V> {
        &self.ctx
    }
}
