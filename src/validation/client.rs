use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ValidateError;
use crate::graph::{Connection, FlowGraph, Node};
use crate::validation::ValidationResult;

/// Payload sent to the remote validator: the full current graph, including
/// unsaved edits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateRequest {
    pub id: String,
    pub name: String,
    pub runtime_state: String,
    pub nodes: Vec<Node>,
    pub connections: Vec<Connection>,
}

impl ValidateRequest {
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

/// The remote structural validator, treated as a stateless, idempotent
/// function of the submitted graph.
#[async_trait]
pub trait Validator: Send + Sync {
    async fn validate(&self, request: ValidateRequest) -> Result<ValidationResult, ValidateError>;
}
