//! Layout engine properties: column assignment, geometry, degenerate input.
mod common;
use common::*;

use flowcanvas::prelude::*;

fn column_of(layout: &CanvasLayout, id: &str) -> u32 {
    layout
        .nodes
        .iter()
        .find(|n| n.id == id)
        .unwrap_or_else(|| panic!("node {id} not placed"))
        .column
}

#[test]
fn linear_chain_gets_consecutive_columns() {
    let nodes = vec![node("a"), node("b"), node("c")];
    let connections = vec![
        Connection::manual("a", "out", "b", "in"),
        Connection::manual("b", "out", "c", "in"),
    ];
    let result = layout(&nodes, &connections, &LayoutConfig::default());

    assert_eq!(column_of(&result, "a"), 0);
    assert_eq!(column_of(&result, "b"), 1);
    assert_eq!(column_of(&result, "c"), 2);
    assert!(result.cycle_nodes.is_empty());
}

#[test]
fn diamond_join_lands_after_the_longest_branch() {
    let nodes = vec![node("a"), node("b"), node("c"), node("d")];
    let connections = vec![
        Connection::manual("a", "out", "b", "in"),
        Connection::manual("a", "out", "c", "in"),
        Connection::manual("b", "out", "d", "in"),
        Connection::manual("c", "out", "d", "in"),
    ];
    let result = layout(&nodes, &connections, &LayoutConfig::default());

    assert_eq!(column_of(&result, "d"), 2);
    // b and c share a column and stack in insertion order.
    assert_eq!(column_of(&result, "b"), 1);
    assert_eq!(column_of(&result, "c"), 1);
    let b = result.nodes.iter().find(|n| n.id == "b").unwrap();
    let c = result.nodes.iter().find(|n| n.id == "c").unwrap();
    assert_eq!(b.row, 0);
    assert_eq!(c.row, 1);
    assert!(b.y < c.y);
}

#[test]
fn pixel_positions_follow_the_grid() {
    let config = LayoutConfig::default();
    let nodes = vec![node("a"), node("b")];
    let connections = vec![Connection::manual("a", "out", "b", "in")];
    let result = layout(&nodes, &connections, &config);

    let a = result.nodes.iter().find(|n| n.id == "a").unwrap();
    let b = result.nodes.iter().find(|n| n.id == "b").unwrap();
    assert_eq!(a.x, config.padding);
    assert_eq!(a.y, config.padding);
    assert_eq!(
        b.x,
        config.padding + config.node_width + config.horizontal_spacing
    );
}

#[test]
fn edge_geometry_runs_right_center_to_left_center() {
    let nodes = vec![node("a"), node("b")];
    let connections = vec![Connection::manual("a", "out", "b", "in")];
    let result = layout(&nodes, &connections, &LayoutConfig::default());

    let a = result.nodes.iter().find(|n| n.id == "a").unwrap();
    let b = result.nodes.iter().find(|n| n.id == "b").unwrap();
    let edge = &result.edges[0];
    assert_eq!(edge.start.x, a.x + a.width);
    assert_eq!(edge.start.y, a.y + a.height / 2.0);
    assert_eq!(edge.end.x, b.x);
    assert_eq!(edge.end.y, b.y + b.height / 2.0);
}

#[test]
fn connection_to_deleted_node_is_dropped_silently() {
    let nodes = vec![node("a")];
    let connections = vec![
        Connection::manual("a", "out", "gone", "in"),
        Connection::auto("ghost", "out", "a", "in"),
    ];
    let result = layout(&nodes, &connections, &LayoutConfig::default());

    assert_eq!(result.nodes.len(), 1);
    assert!(result.edges.is_empty());
}

#[test]
fn empty_graph_yields_minimum_viewport() {
    let result = layout(&[], &[], &LayoutConfig::default());
    assert!(result.nodes.is_empty());
    assert!(result.edges.is_empty());
    assert_eq!(result.bounds.width, 800.0);
    assert_eq!(result.bounds.height, 600.0);
}

#[test]
fn cyclic_input_is_placed_and_reported() {
    init_tracing();
    let nodes = vec![node("a"), node("b"), node("c")];
    let connections = vec![
        Connection::manual("a", "out", "b", "in"),
        Connection::manual("b", "out", "c", "in"),
        Connection::manual("c", "out", "a", "in"),
    ];
    let result = layout(&nodes, &connections, &LayoutConfig::default());

    // Every node still gets a slot and every edge is still rendered.
    assert_eq!(result.nodes.len(), 3);
    assert_eq!(result.edges.len(), 3);
    assert!(!result.cycle_nodes.is_empty());
}

#[test]
fn layout_is_reproducible() {
    let nodes = vec![node("a"), node("b"), node("c"), node("d")];
    let connections = vec![
        Connection::manual("a", "out", "b", "in"),
        Connection::manual("a", "out", "c", "in"),
        Connection::manual("c", "out", "d", "in"),
    ];
    let config = LayoutConfig::default();
    let first = layout(&nodes, &connections, &config);
    let second = layout(&nodes, &connections, &config);

    assert_eq!(first.nodes, second.nodes);
    assert_eq!(first.edges, second.edges);
    assert_eq!(first.bounds, second.bounds);
}
