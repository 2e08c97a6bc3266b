use serde::{Deserialize, Serialize};

use crate::graph::PortInfo;

/// Overall verdict of a validation round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationStatus {
    #[default]
    Valid,
    Warnings,
    Errors,
}

/// Severity of a single reported issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IssueSeverity {
    Warning,
    Error,
}

/// One structural problem reported by the validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub severity: IssueSeverity,
    pub component_name: String,
    #[serde(default)]
    pub port_name: Option<String>,
    pub message: String,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

/// Port metadata for one node, as reported by the validator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodePortReport {
    pub id: String,
    #[serde(default)]
    pub input_ports: Vec<PortInfo>,
    #[serde(default)]
    pub output_ports: Vec<PortInfo>,
}

/// A connection the validator inferred from port-pattern compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveredConnection {
    pub source_node_id: String,
    pub source_port: String,
    pub target_node_id: String,
    pub target_port: String,
}

/// Full response of one validation round.
///
/// The validator service evolves independently of this crate, so every
/// collection is defaultable: an absent `discoveredConnections` means "no
/// auto connections", absent node/issue lists mean empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    #[serde(default)]
    pub status: ValidationStatus,
    #[serde(default)]
    pub errors: Vec<Issue>,
    #[serde(default)]
    pub warnings: Vec<Issue>,
    #[serde(default)]
    pub nodes: Vec<NodePortReport>,
    #[serde(default)]
    pub discovered_connections: Vec<DiscoveredConnection>,
}

impl ValidationResult {
    /// Short human-readable count used by the save-state projector,
    /// e.g. "1 error" or "3 errors".
    pub fn error_summary(&self) -> String {
        let count = self.errors.len();
        if count == 1 {
            "1 error".to_string()
        } else {
            format!("{count} errors")
        }
    }
}
