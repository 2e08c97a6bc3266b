use ahash::{AHashMap, AHashSet};

/// Result of resolving one node's column.
///
/// The layered layout is only meaningful for acyclic input; when a node is
/// revisited while its own column is still being resolved the recursion
/// yields `CycleBroken` instead of looping. The occurrence is counted as
/// depth 0, which keeps the layout total, but the break is reported rather
/// than silently normalized so callers can surface cyclic input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnOutcome {
    Resolved(u32),
    CycleBroken,
}

impl ColumnOutcome {
    fn depth(self) -> u32 {
        match self {
            ColumnOutcome::Resolved(depth) => depth,
            ColumnOutcome::CycleBroken => 0,
        }
    }
}

/// Columns for every node plus the nodes at which a cycle was broken.
#[derive(Debug, Default)]
pub struct ColumnAssignment {
    pub columns: AHashMap<String, u32>,
    pub cycle_nodes: Vec<String>,
}

/// Assigns each node its longest-path depth from any source node.
///
/// `column(n) = 0` when `n` has no incoming edges, otherwise
/// `1 + max(column(parent))`. Memoized; `node_ids` order fixes the
/// resolution order so repeated runs over the same graph agree.
pub fn assign_columns(
    node_ids: &[&str],
    incoming: &AHashMap<String, Vec<String>>,
) -> ColumnAssignment {
    let mut assignment = ColumnAssignment::default();
    let mut resolving = AHashSet::new();
    for id in node_ids {
        resolve(id, incoming, &mut assignment, &mut resolving);
    }
    if !assignment.cycle_nodes.is_empty() {
        tracing::warn!(
            nodes = ?assignment.cycle_nodes,
            "graph contains cycles; broken at depth 0"
        );
    }
    assignment
}

fn resolve(
    id: &str,
    incoming: &AHashMap<String, Vec<String>>,
    assignment: &mut ColumnAssignment,
    resolving: &mut AHashSet<String>,
) -> ColumnOutcome {
    if let Some(depth) = assignment.columns.get(id) {
        return ColumnOutcome::Resolved(*depth);
    }
    if resolving.contains(id) {
        if !assignment.cycle_nodes.iter().any(|n| n == id) {
            assignment.cycle_nodes.push(id.to_string());
        }
        return ColumnOutcome::CycleBroken;
    }
    resolving.insert(id.to_string());

    let depth = match incoming.get(id) {
        None => 0,
        Some(parents) if parents.is_empty() => 0,
        Some(parents) => {
            let max_parent = parents
                .iter()
                .map(|p| resolve(p, incoming, assignment, resolving).depth())
                .max()
                .unwrap_or(0);
            1 + max_parent
        }
    };

    resolving.remove(id);
    assignment.columns.insert(id.to_string(), depth);
    ColumnOutcome::Resolved(depth)
}
