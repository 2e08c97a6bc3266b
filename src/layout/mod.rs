pub mod column;
pub mod config;
pub mod geometry;

pub use column::*;
pub use config::*;
pub use geometry::*;

use ahash::AHashMap;

use crate::graph::{Connection, Node};

/// Positioned nodes and edge geometry, ready for rendering.
#[derive(Debug, Default)]
pub struct CanvasLayout {
    pub nodes: Vec<PlacedNode>,
    pub edges: Vec<EdgePath>,
    pub bounds: CanvasBounds,
    /// Nodes at which the column assignment had to break a cycle. Empty for
    /// acyclic input.
    pub cycle_nodes: Vec<String>,
}

/// Computes the layered layout of a graph.
///
/// Nodes land in the column equal to their longest path from a source node
/// and stack in insertion order within a column, so the same graph always
/// produces the same picture. Connections referencing a node id that no
/// longer exists are dropped from the rendered set without error; the
/// validator is the authority on discovered connections and may reference
/// nodes the client has since deleted.
pub fn layout(nodes: &[Node], connections: &[Connection], config: &LayoutConfig) -> CanvasLayout {
    let node_ids: Vec<&str> = nodes.iter().map(|n| n.id.as_str()).collect();

    let renderable: Vec<&Connection> = connections
        .iter()
        .filter(|c| {
            node_ids.contains(&c.source_node_id.as_str())
                && node_ids.contains(&c.target_node_id.as_str())
        })
        .collect();

    let mut incoming: AHashMap<String, Vec<String>> = AHashMap::new();
    for conn in &renderable {
        incoming
            .entry(conn.target_node_id.clone())
            .or_default()
            .push(conn.source_node_id.clone());
    }

    let assignment = assign_columns(&node_ids, &incoming);

    let mut rows_taken: AHashMap<u32, u32> = AHashMap::new();
    let mut placed = Vec::with_capacity(nodes.len());
    for node in nodes {
        let column = assignment.columns.get(&node.id).copied().unwrap_or(0);
        let row = rows_taken.entry(column).or_insert(0);
        let (x, y) = slot_position(column, *row, config);
        placed.push(PlacedNode {
            id: node.id.clone(),
            x,
            y,
            width: config.node_width,
            height: config.node_height,
            column,
            row: *row,
        });
        *row += 1;
    }

    let by_id: AHashMap<&str, &PlacedNode> = placed.iter().map(|p| (p.id.as_str(), p)).collect();
    let edges = renderable
        .iter()
        .filter_map(|conn| {
            let source = by_id.get(conn.source_node_id.as_str())?;
            let target = by_id.get(conn.target_node_id.as_str())?;
            Some(edge_path(&conn.id, source, target))
        })
        .collect();

    let bounds = canvas_bounds(&placed, config);
    CanvasLayout {
        nodes: placed,
        edges,
        bounds,
        cycle_nodes: assignment.cycle_nodes,
    }
}
