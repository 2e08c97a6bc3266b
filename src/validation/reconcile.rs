use crate::graph::{Connection, Provenance};
use crate::validation::DiscoveredConnection;

/// Replaces the machine-inferred portion of a connection set with the
/// connections discovered in the latest validation round.
///
/// Manual rows pass through untouched and are never inspected beyond their
/// provenance tag. Auto rows are rebuilt from scratch with deterministic ids,
/// which makes the whole operation idempotent: reconciling twice with the
/// same discovered set yields the same connections.
pub fn reconcile(
    current: &[Connection],
    discovered: &[DiscoveredConnection],
) -> Vec<Connection> {
    let mut next: Vec<Connection> = current
        .iter()
        .filter(|c| c.provenance == Provenance::Manual)
        .cloned()
        .collect();

    next.extend(discovered.iter().map(|d| {
        Connection::auto(
            d.source_node_id.as_str(),
            d.source_port.as_str(),
            d.target_node_id.as_str(),
            d.target_port.as_str(),
        )
    }));

    next
}
