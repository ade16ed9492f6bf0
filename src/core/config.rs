//! Configuration for the measurement tool
//!
//! Every field has a default matching the stock viewer, so a configuration file
//! only needs to name what it changes.

use crate::core::constants::{HELP_TOOLTIP_OFFSET, MEASURE_TOOLTIP_OFFSET, PINNED_TOOLTIP_OFFSET};
use crate::measure::geometry::MeasurementMode;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeasureConfig {
    /// Shape new sessions start with
    pub initial_mode: MeasurementMode,
    pub messages: HelpMessages,
    pub offsets: TooltipOffsets,
}

impl MeasureConfig {
    /// Parses a configuration from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads a JSON configuration file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

impl Default for MeasureConfig {
    fn default() -> Self {
        Self {
            initial_mode: MeasurementMode::Line,
            messages: HelpMessages::default(),
            offsets: TooltipOffsets::default(),
        }
    }
}

/// Text shown by the help tooltip that follows the pointer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HelpMessages {
    pub start: String,
    pub continue_line: String,
    pub continue_polygon: String,
}

impl HelpMessages {
    /// Message for a pointer move; `drawing` is the shape of the active session, if any
    pub fn for_pointer(&self, drawing: Option<MeasurementMode>) -> &str {
        match drawing {
            None => &self.start,
            Some(MeasurementMode::Line) => &self.continue_line,
            Some(MeasurementMode::Area) => &self.continue_polygon,
        }
    }
}

impl Default for HelpMessages {
    fn default() -> Self {
        Self {
            start: "Click to start drawing".to_string(),
            continue_line: "Click to continue drawing the line".to_string(),
            continue_polygon: "Click to continue drawing the polygon".to_string(),
        }
    }
}

/// Pixel offsets `(x, y)` applied to tooltips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipOffsets {
    pub help: (i32, i32),
    pub measure: (i32, i32),
    pub pinned: (i32, i32),
}

impl Default for TooltipOffsets {
    fn default() -> Self {
        Self {
            help: HELP_TOOLTIP_OFFSET,
            measure: MEASURE_TOOLTIP_OFFSET,
            pinned: PINNED_TOOLTIP_OFFSET,
        }
    }
}
