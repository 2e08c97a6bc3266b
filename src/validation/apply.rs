use crate::graph::{FlowGraph, ValidationState};
use crate::validation::{Issue, ValidationResult};

/// Merges a validation result into the graph without discarding unrelated
/// state.
///
/// Only nodes named in `result.nodes` get their port metadata replaced, and
/// only connections matched by an issue change validation state; everything
/// else keeps its prior state. The user may have kept editing between request
/// and response, so this merge must never touch rows the result does not
/// reference.
pub fn apply(graph: &mut FlowGraph, result: &ValidationResult) {
    for report in &result.nodes {
        // The validator may report nodes the user has since deleted; a port
        // entry for a missing node would never be cleaned up.
        if graph.node(&report.id).is_none() {
            continue;
        }
        let mut ports = report.input_ports.clone();
        ports.extend(report.output_ports.iter().cloned());
        graph.set_ports(report.id.clone(), ports);
    }

    // Warnings first so an Error on the same connection wins.
    for issue in &result.warnings {
        mark_connections(graph, issue, ValidationState::Warning);
    }
    for issue in &result.errors {
        mark_connections(graph, issue, ValidationState::Error);
    }
}

fn mark_connections(graph: &mut FlowGraph, issue: &Issue, state: ValidationState) {
    // Issues name components by display name; fall back to the id for
    // validators that report raw ids.
    let node_id = graph
        .nodes()
        .iter()
        .find(|n| n.name == issue.component_name || n.id == issue.component_name)
        .map(|n| n.id.clone());
    let Some(node_id) = node_id else {
        return;
    };

    let matching: Vec<String> = graph
        .connections()
        .iter()
        .filter(|c| c.touches(&node_id))
        .filter(|c| match issue.port_name.as_deref() {
            Some(port) => {
                (c.source_node_id == node_id && c.source_port == port)
                    || (c.target_node_id == node_id && c.target_port == port)
            }
            None => true,
        })
        .map(|c| c.id.clone())
        .collect();

    for id in matching {
        graph.set_connection_state(&id, state);
    }
}
