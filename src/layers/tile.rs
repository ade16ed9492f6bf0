use crate::MeasureError;
use fxhash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Inclusive range of zoom levels a tile layer has imagery for
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomRange {
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl ZoomRange {
    pub fn new(min_zoom: f64, max_zoom: f64) -> Self {
        Self { min_zoom, max_zoom }
    }

    /// Boundary zooms count as inside
    pub fn contains(&self, zoom: f64) -> bool {
        !(zoom > self.max_zoom || zoom < self.min_zoom)
    }
}

/// A tiled background layer as described by the map-source catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileLayerDescriptor {
    pub id: String,
    /// URL with `{z}`, `{x}` and `{y}` placeholders
    #[serde(rename = "tile_url")]
    pub tile_url_template: String,
    #[serde(default)]
    pub min_zoom: Option<f64>,
    #[serde(default)]
    pub max_zoom: Option<f64>,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

impl TileLayerDescriptor {
    pub fn new(id: impl Into<String>, tile_url_template: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tile_url_template: tile_url_template.into(),
            min_zoom: None,
            max_zoom: None,
            visible: true,
        }
    }

    pub fn with_zoom_range(mut self, min_zoom: f64, max_zoom: f64) -> Self {
        self.min_zoom = Some(min_zoom);
        self.max_zoom = Some(max_zoom);
        self
    }

    /// The declared zoom range; `None` unless both limits are present
    pub fn zoom_range(&self) -> Option<ZoomRange> {
        match (self.min_zoom, self.max_zoom) {
            (Some(min_zoom), Some(max_zoom)) => Some(ZoomRange::new(min_zoom, max_zoom)),
            _ => None,
        }
    }

    /// Expands the URL template for one tile
    pub fn tile_url(&self, z: u8, x: u32, y: u32) -> String {
        self.tile_url_template
            .replace("{z}", &z.to_string())
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string())
    }
}

/// A named base map made of one or more tile layers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapSource {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub layers: Vec<TileLayerDescriptor>,
}

impl MapSource {
    /// Parses one catalog entry from JSON and validates its layers
    pub fn from_json(text: &str) -> crate::Result<Self> {
        let source: Self = serde_json::from_str(text)?;
        source.validate()?;
        Ok(source)
    }

    /// Rejects duplicate layer ids and inverted zoom ranges
    pub fn validate(&self) -> crate::Result<()> {
        let mut seen = FxHashSet::default();
        for layer in &self.layers {
            if !seen.insert(layer.id.as_str()) {
                return Err(MeasureError::Layer(format!(
                    "duplicate layer '{}' in source '{}'",
                    layer.id, self.id
                )));
            }
            if let Some(range) = layer.zoom_range() {
                if range.min_zoom > range.max_zoom {
                    return Err(MeasureError::Layer(format!(
                        "layer '{}' has min_zoom {} above max_zoom {}",
                        layer.id, range.min_zoom, range.max_zoom
                    )));
                }
            }
        }
        Ok(())
    }

    /// Lowest zoom any layer covers
    pub fn min_zoom(&self) -> Option<f64> {
        self.layers
            .iter()
            .filter_map(|layer| layer.min_zoom)
            .reduce(f64::min)
    }

    /// Highest zoom any layer covers
    pub fn max_zoom(&self) -> Option<f64> {
        self.layers
            .iter()
            .filter_map(|layer| layer.max_zoom)
            .reduce(f64::max)
    }
}
