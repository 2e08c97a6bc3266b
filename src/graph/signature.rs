use itertools::Itertools;

use super::{FlowGraph, Provenance};

/// Structural fingerprint of the user-authored portion of a graph.
///
/// Two signatures compare equal exactly when the node set and the set of
/// Manual connections are the same. Auto connections are deliberately left
/// out: including them would make the fingerprint depend on the validator's
/// own output and re-trigger validation after every applied result.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GraphSignature(String);

impl GraphSignature {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for GraphSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Computes the signature of the user-authored structure. Pure, O(n log n).
pub fn signature(graph: &FlowGraph) -> GraphSignature {
    let nodes = graph.nodes().iter().map(|n| n.id.as_str()).sorted().join(",");
    let manual = graph
        .connections()
        .iter()
        .filter(|c| c.provenance == Provenance::Manual)
        .map(|c| c.id.as_str())
        .sorted()
        .join(",");
    GraphSignature(format!("n:{nodes}|c:{manual}"))
}
