use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::PersistError;
use crate::graph::{Connection, FlowGraph, Node};

/// Snapshot of a flow as persisted by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowDefinition {
    pub id: String,
    pub name: String,
    pub runtime_state: String,
    pub nodes: Vec<Node>,
    pub connections: Vec<Connection>,
}

impl FlowDefinition {
    pub fn from_graph(id: &str, name: &str, runtime_state: &str, graph: &FlowGraph) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            runtime_state: runtime_state.to_string(),
            nodes: graph.nodes().to_vec(),
            connections: graph.connections().to_vec(),
        }
    }
}

/// Backend acknowledgement of a save.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveReceipt {
    pub version: u64,
    pub runtime_state: String,
    pub updated_at: DateTime<Utc>,
}

/// Backend acknowledgement of a runtime lifecycle change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeReceipt {
    pub runtime_state: String,
    pub updated_at: DateTime<Utc>,
}

/// The persistence backend. A thin external API: this crate consumes it but
/// never implements it beyond test doubles.
///
/// `deploy`/`start`/`stop` may fail with [`PersistError::Rejected`], which
/// carries the backend's `ValidationResult` verbatim for the caller to
/// display.
#[async_trait]
pub trait FlowStore: Send + Sync {
    async fn save(
        &self,
        flow_id: &str,
        definition: &FlowDefinition,
    ) -> Result<SaveReceipt, PersistError>;

    async fn deploy(&self, flow_id: &str) -> Result<RuntimeReceipt, PersistError>;

    async fn start(&self, flow_id: &str) -> Result<RuntimeReceipt, PersistError>;

    async fn stop(&self, flow_id: &str) -> Result<RuntimeReceipt, PersistError>;
}
