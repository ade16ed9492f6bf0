use crate::core::geo::ProjectedPoint;
use crate::core::view::MapView;
use crate::{MeasureError, Result};
use log::debug;
use serde::{Deserialize, Serialize};

/// Identifier handed to the map view when an overlay is registered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OverlayId(pub u64);

impl std::fmt::Display for OverlayId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "overlay_{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TooltipKind {
    /// Follows the pointer with drawing instructions
    Help,
    /// Shows the live measurement of a session
    Measure,
}

/// How the label box sits relative to its anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Positioning {
    CenterLeft,
    BottomCenter,
}

/// Where a tooltip is shown
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    Hidden,
    Floating { anchor: ProjectedPoint },
    /// Frozen for good; the overlay no longer accepts updates
    Pinned {
        anchor: ProjectedPoint,
        offset: (i32, i32),
    },
}

/// A text label anchored to a map coordinate
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipOverlay {
    id: OverlayId,
    kind: TooltipKind,
    text: String,
    offset: (i32, i32),
    placement: Placement,
}

impl TooltipOverlay {
    fn new(id: OverlayId, kind: TooltipKind, offset: (i32, i32)) -> Self {
        Self {
            id,
            kind,
            text: String::new(),
            offset,
            placement: Placement::Hidden,
        }
    }

    pub fn id(&self) -> OverlayId {
        self.id
    }

    pub fn kind(&self) -> TooltipKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Current pixel offset from the anchor
    pub fn offset(&self) -> (i32, i32) {
        self.offset
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn positioning(&self) -> Positioning {
        match self.kind {
            TooltipKind::Help => Positioning::CenterLeft,
            TooltipKind::Measure => Positioning::BottomCenter,
        }
    }

    /// The anchor the label is drawn at, if it is shown at all
    pub fn anchor(&self) -> Option<ProjectedPoint> {
        match self.placement {
            Placement::Hidden => None,
            Placement::Floating { anchor } | Placement::Pinned { anchor, .. } => Some(anchor),
        }
    }

    pub fn is_pinned(&self) -> bool {
        matches!(self.placement, Placement::Pinned { .. })
    }

    /// CSS-style class list for the label element
    pub fn style_class(&self) -> &'static str {
        match (self.kind, self.placement) {
            (_, Placement::Pinned { .. }) => "tooltip tooltip-static",
            (TooltipKind::Help, Placement::Hidden) => "tooltip hidden",
            (TooltipKind::Help, _) => "tooltip",
            (TooltipKind::Measure, _) => "tooltip tooltip-measure",
        }
    }

    /// Shows the overlay at `anchor` with `text`, from either Hidden or Floating
    pub fn show(&mut self, anchor: ProjectedPoint, text: impl Into<String>) -> Result<()> {
        self.ensure_not_pinned("show")?;
        self.text = text.into();
        self.placement = Placement::Floating { anchor };
        Ok(())
    }

    /// Moves and relabels a floating overlay
    pub fn update(&mut self, anchor: ProjectedPoint, text: impl Into<String>) -> Result<()> {
        match self.placement {
            Placement::Floating { .. } => {
                self.text = text.into();
                self.placement = Placement::Floating { anchor };
                Ok(())
            }
            _ => Err(self.illegal("update")),
        }
    }

    pub fn hide(&mut self) -> Result<()> {
        self.ensure_not_pinned("hide")?;
        self.placement = Placement::Hidden;
        Ok(())
    }

    /// Freezes a floating overlay where it is and shifts it by `offset`
    pub fn pin(&mut self, offset: (i32, i32)) -> Result<()> {
        match self.placement {
            Placement::Floating { anchor } => {
                self.offset = offset;
                self.placement = Placement::Pinned { anchor, offset };
                Ok(())
            }
            _ => Err(self.illegal("pin")),
        }
    }

    fn ensure_not_pinned(&self, operation: &str) -> Result<()> {
        if self.is_pinned() {
            Err(self.illegal(operation))
        } else {
            Ok(())
        }
    }

    fn illegal(&self, operation: &str) -> MeasureError {
        MeasureError::Overlay(format!(
            "cannot {} {} while {:?}",
            operation, self.id, self.placement
        ))
    }
}

/// Every tooltip attached to the map, for lookup and bulk teardown
#[derive(Debug, Default)]
pub struct OverlayRegistry {
    overlays: Vec<TooltipOverlay>,
    next_id: u64,
}

impl OverlayRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a hidden tooltip and registers it with the map view
    pub fn create(
        &mut self,
        kind: TooltipKind,
        offset: (i32, i32),
        view: &mut dyn MapView,
    ) -> OverlayId {
        let id = OverlayId(self.next_id);
        self.next_id += 1;

        self.overlays.push(TooltipOverlay::new(id, kind, offset));
        view.register_overlay(id);
        debug!("created {:?} tooltip {}", kind, id);
        id
    }

    pub fn get(&self, id: OverlayId) -> Option<&TooltipOverlay> {
        self.overlays.iter().find(|overlay| overlay.id == id)
    }

    pub fn get_mut(&mut self, id: OverlayId) -> Option<&mut TooltipOverlay> {
        self.overlays.iter_mut().find(|overlay| overlay.id == id)
    }

    /// Looks up an overlay that is expected to exist
    pub fn expect_mut(&mut self, id: OverlayId) -> Result<&mut TooltipOverlay> {
        self.get_mut(id)
            .ok_or_else(|| MeasureError::Overlay(format!("unknown overlay {}", id)))
    }

    /// Detaches one overlay from the map view
    pub fn remove(&mut self, id: OverlayId, view: &mut dyn MapView) -> Option<TooltipOverlay> {
        let index = self.overlays.iter().position(|overlay| overlay.id == id)?;
        view.remove_overlay(id);
        Some(self.overlays.remove(index))
    }

    /// Detaches every overlay from the map view. Safe to call when empty.
    pub fn destroy_all(&mut self, view: &mut dyn MapView) {
        if !self.overlays.is_empty() {
            debug!("removing {} tooltips", self.overlays.len());
        }
        for overlay in self.overlays.drain(..) {
            view.remove_overlay(overlay.id);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &TooltipOverlay> {
        self.overlays.iter()
    }

    pub fn pinned_count(&self) -> usize {
        self.overlays.iter().filter(|overlay| overlay.is_pinned()).count()
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::viewport::Viewport;

    fn at(x: f64, y: f64) -> ProjectedPoint {
        ProjectedPoint::new(x, y)
    }

    #[test]
    fn test_create_registers_hidden_overlay() {
        let mut view = Viewport::default();
        let mut registry = OverlayRegistry::new();
        let id = registry.create(TooltipKind::Measure, (0, -15), &mut view);

        let overlay = registry.get(id).unwrap();
        assert_eq!(overlay.placement(), Placement::Hidden);
        assert_eq!(overlay.style_class(), "tooltip tooltip-measure");
        assert_eq!(overlay.positioning(), Positioning::BottomCenter);
        assert!(view.has_overlay(id));
    }

    #[test]
    fn test_floating_then_pinned_lifecycle() {
        let mut view = Viewport::default();
        let mut registry = OverlayRegistry::new();
        let id = registry.create(TooltipKind::Measure, (0, -15), &mut view);
        let overlay = registry.get_mut(id).unwrap();

        assert!(overlay.update(at(1.0, 1.0), "1 m").is_err());
        overlay.show(at(1.0, 1.0), "").unwrap();
        overlay.update(at(2.0, 3.0), "3.61 m").unwrap();
        overlay.pin((0, -7)).unwrap();

        assert_eq!(overlay.text(), "3.61 m");
        assert_eq!(overlay.offset(), (0, -7));
        assert_eq!(overlay.anchor(), Some(at(2.0, 3.0)));
        assert_eq!(overlay.style_class(), "tooltip tooltip-static");

        assert!(matches!(
            overlay.update(at(9.0, 9.0), "x"),
            Err(MeasureError::Overlay(_))
        ));
        assert!(overlay.hide().is_err());
        assert!(overlay.pin((0, 0)).is_err());
        assert_eq!(overlay.anchor(), Some(at(2.0, 3.0)));
    }

    #[test]
    fn test_help_tooltip_hides_and_shows() {
        let mut view = Viewport::default();
        let mut registry = OverlayRegistry::new();
        let id = registry.create(TooltipKind::Help, (15, 0), &mut view);
        let overlay = registry.get_mut(id).unwrap();

        assert_eq!(overlay.style_class(), "tooltip hidden");
        overlay.show(at(5.0, 5.0), "Click to start drawing").unwrap();
        assert_eq!(overlay.style_class(), "tooltip");
        overlay.hide().unwrap();
        assert_eq!(overlay.anchor(), None);
    }

    #[test]
    fn test_destroy_all_is_idempotent() {
        let mut view = Viewport::default();
        let mut registry = OverlayRegistry::new();
        registry.create(TooltipKind::Help, (15, 0), &mut view);
        registry.create(TooltipKind::Measure, (0, -15), &mut view);

        registry.destroy_all(&mut view);
        assert!(registry.is_empty());
        assert_eq!(view.overlay_count(), 0);

        registry.destroy_all(&mut view);
        assert!(registry.is_empty());
        assert_eq!(view.overlay_count(), 0);
    }

    #[test]
    fn test_remove_single_overlay() {
        let mut view = Viewport::default();
        let mut registry = OverlayRegistry::new();
        let keep = registry.create(TooltipKind::Help, (15, 0), &mut view);
        let drop = registry.create(TooltipKind::Measure, (0, -15), &mut view);

        assert!(registry.remove(drop, &mut view).is_some());
        assert!(registry.remove(drop, &mut view).is_none());
        assert_eq!(registry.len(), 1);
        assert!(view.has_overlay(keep));
        assert!(!view.has_overlay(drop));
    }
}
