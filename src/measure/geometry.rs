use crate::core::geo::ProjectedPoint;
use serde::{Deserialize, Serialize};

/// Which kind of shape a measurement draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementMode {
    /// Distance along a polyline
    Line,
    /// Area enclosed by a polygon
    Area,
}

impl Default for MeasurementMode {
    fn default() -> Self {
        Self::Line
    }
}

impl std::fmt::Display for MeasurementMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MeasurementMode::Line => write!(f, "line"),
            MeasurementMode::Area => write!(f, "area"),
        }
    }
}

/// A shape being drawn, in view coordinates.
///
/// Vertices keep drawing order. The only mutations are appending a vertex and
/// replacing the last one.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Line(Vec<ProjectedPoint>),
    /// Exterior ring; the closing edge back to the first vertex is implicit
    Area(Vec<ProjectedPoint>),
}

impl Geometry {
    /// Creates an empty geometry of the given shape
    pub fn new(mode: MeasurementMode) -> Self {
        match mode {
            MeasurementMode::Line => Geometry::Line(Vec::new()),
            MeasurementMode::Area => Geometry::Area(Vec::new()),
        }
    }

    pub fn mode(&self) -> MeasurementMode {
        match self {
            Geometry::Line(_) => MeasurementMode::Line,
            Geometry::Area(_) => MeasurementMode::Area,
        }
    }

    pub fn vertices(&self) -> &[ProjectedPoint] {
        match self {
            Geometry::Line(points) | Geometry::Area(points) => points,
        }
    }

    fn vertices_mut(&mut self) -> &mut Vec<ProjectedPoint> {
        match self {
            Geometry::Line(points) | Geometry::Area(points) => points,
        }
    }

    pub fn push_vertex(&mut self, point: ProjectedPoint) {
        self.vertices_mut().push(point);
    }

    /// Replaces the last vertex, or appends when the geometry is empty
    pub fn replace_last_vertex(&mut self, point: ProjectedPoint) {
        let points = self.vertices_mut();
        match points.last_mut() {
            Some(last) => *last = point,
            None => points.push(point),
        }
    }

    pub fn len(&self) -> usize {
        self.vertices().len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices().is_empty()
    }

    /// Where a label for this geometry belongs: the last vertex of a line,
    /// an interior point of an area
    pub fn anchor(&self) -> Option<ProjectedPoint> {
        match self {
            Geometry::Line(points) => points.last().copied(),
            Geometry::Area(ring) => interior_point(ring),
        }
    }
}

/// A point inside the ring.
///
/// Casts a horizontal line through the middle of the ring's extent and returns
/// the midpoint of the widest span that lies inside the ring. Degenerate rings
/// fall back to the centre of their extent.
pub fn interior_point(ring: &[ProjectedPoint]) -> Option<ProjectedPoint> {
    let first = ring.first()?;

    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
    for point in ring {
        min_x = min_x.min(point.x);
        min_y = min_y.min(point.y);
        max_x = max_x.max(point.x);
        max_y = max_y.max(point.y);
    }
    let y = (min_y + max_y) / 2.0;

    let mut crossings = Vec::new();
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let a = &ring[j];
        let b = &ring[i];
        if (a.y <= y) != (b.y <= y) {
            crossings.push(a.x + (y - a.y) / (b.y - a.y) * (b.x - a.x));
        }
        j = i;
    }
    crossings.sort_by(|a, b| a.total_cmp(b));

    let widest = crossings
        .chunks_exact(2)
        .map(|span| (span[1] - span[0], (span[0] + span[1]) / 2.0))
        .fold(None, |best: Option<(f64, f64)>, candidate| match best {
            Some(best) if best.0 >= candidate.0 => Some(best),
            _ => Some(candidate),
        });

    let x = match widest {
        Some((width, mid)) if width > 0.0 => mid,
        _ => (min_x + max_x) / 2.0,
    };
    Some(ProjectedPoint::new(x, y))
}
