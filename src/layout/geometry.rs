use serde::Serialize;

use crate::layout::LayoutConfig;

/// Maximum horizontal offset of a bezier control point, in pixels.
const MAX_CONTROL_OFFSET: f64 = 100.0;

/// A point on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A node with its final pixel rectangle.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedNode {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub column: u32,
    pub row: u32,
}

impl PlacedNode {
    /// Right-center anchor, where outgoing edges leave.
    pub fn source_anchor(&self) -> Point {
        Point {
            x: self.x + self.width,
            y: self.y + self.height / 2.0,
        }
    }

    /// Left-center anchor, where incoming edges arrive.
    pub fn target_anchor(&self) -> Point {
        Point {
            x: self.x,
            y: self.y + self.height / 2.0,
        }
    }
}

/// Cubic bezier geometry for one rendered connection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgePath {
    pub connection_id: String,
    pub start: Point,
    pub control1: Point,
    pub control2: Point,
    pub end: Point,
}

/// Overall canvas extents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasBounds {
    pub width: f64,
    pub height: f64,
}

/// Minimum viewport used when there is nothing to place.
pub const EMPTY_BOUNDS: CanvasBounds = CanvasBounds {
    width: 800.0,
    height: 600.0,
};

impl Default for CanvasBounds {
    fn default() -> Self {
        EMPTY_BOUNDS
    }
}

/// Pixel position for a node in the given column/row slot.
pub fn slot_position(column: u32, row: u32, config: &LayoutConfig) -> (f64, f64) {
    let x = config.padding + f64::from(column) * (config.node_width + config.horizontal_spacing);
    let y = config.padding + f64::from(row) * (config.node_height + config.vertical_spacing);
    (x, y)
}

/// Cubic curve between the source's right-center anchor and the target's
/// left-center anchor, with the control offset clamped for short hops.
pub fn edge_path(connection_id: &str, source: &PlacedNode, target: &PlacedNode) -> EdgePath {
    let start = source.source_anchor();
    let end = target.target_anchor();
    let offset = (0.5 * (end.x - start.x).abs()).min(MAX_CONTROL_OFFSET);
    EdgePath {
        connection_id: connection_id.to_string(),
        start,
        control1: Point {
            x: start.x + offset,
            y: start.y,
        },
        control2: Point {
            x: end.x - offset,
            y: end.y,
        },
        end,
    }
}

/// Max extents over all placed nodes plus padding; the empty default when no
/// node is placed.
pub fn canvas_bounds(nodes: &[PlacedNode], config: &LayoutConfig) -> CanvasBounds {
    if nodes.is_empty() {
        return EMPTY_BOUNDS;
    }
    let width = nodes
        .iter()
        .map(|n| n.x + n.width)
        .fold(0.0_f64, f64::max)
        + config.padding;
    let height = nodes
        .iter()
        .map(|n| n.y + n.height)
        .fold(0.0_f64, f64::max)
        + config.padding;
    CanvasBounds { width, height }
}
