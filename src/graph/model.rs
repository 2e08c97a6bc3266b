use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Pixel position of a node on the canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Where a connection came from.
///
/// `Auto` connections are inferred by the remote validator from port-pattern
/// compatibility and may be freely replaced on every validation round.
/// `Manual` connections were drawn by the user and are never touched by the
/// reconciler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Provenance {
    Manual,
    Auto,
}

/// Validation verdict attached to a connection or port.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationState {
    Valid,
    Warning,
    Error,
    #[default]
    Unknown,
}

/// Direction of a port as reported by the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PortDirection {
    Input,
    Output,
}

/// Per-node port metadata, populated only after a successful validation round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortInfo {
    pub name: String,
    pub direction: PortDirection,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub validation_state: ValidationState,
}

/// A single component placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    pub component_type: String,
    pub name: String,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub config: AHashMap<String, serde_json::Value>,
}

/// A directed edge between two node ports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub id: String,
    pub source_node_id: String,
    pub source_port: String,
    pub target_node_id: String,
    pub target_port: String,
    pub provenance: Provenance,
    #[serde(default)]
    pub validation_state: ValidationState,
}

impl Connection {
    /// Creates a user-drawn connection with a random id.
    pub fn manual(
        source_node_id: impl Into<String>,
        source_port: impl Into<String>,
        target_node_id: impl Into<String>,
        target_port: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            source_node_id: source_node_id.into(),
            source_port: source_port.into(),
            target_node_id: target_node_id.into(),
            target_port: target_port.into(),
            provenance: Provenance::Manual,
            validation_state: ValidationState::Unknown,
        }
    }

    /// Creates a validator-discovered connection.
    ///
    /// The id is a deterministic function of the endpoints, so re-applying the
    /// same discovered connection can never produce a duplicate and the
    /// reconciler needs no side table to recognize Auto rows.
    pub fn auto(
        source_node_id: impl Into<String>,
        source_port: impl Into<String>,
        target_node_id: impl Into<String>,
        target_port: impl Into<String>,
    ) -> Self {
        let source_node_id = source_node_id.into();
        let source_port = source_port.into();
        let target_node_id = target_node_id.into();
        let target_port = target_port.into();
        Self {
            id: auto_connection_id(
                &source_node_id,
                &source_port,
                &target_node_id,
                &target_port,
            ),
            source_node_id,
            source_port,
            target_node_id,
            target_port,
            provenance: Provenance::Auto,
            validation_state: ValidationState::Unknown,
        }
    }

    /// True when the connection touches the given node on either side.
    pub fn touches(&self, node_id: &str) -> bool {
        self.source_node_id == node_id || self.target_node_id == node_id
    }
}

/// Deterministic id for an Auto connection, distinctly prefixed from the
/// uuid-shaped Manual ids.
pub fn auto_connection_id(
    source_node_id: &str,
    source_port: &str,
    target_node_id: &str,
    target_port: &str,
) -> String {
    format!("auto:{source_node_id}:{source_port}->{target_node_id}:{target_port}")
}

/// Canonical in-memory representation of the edited flow.
///
/// Nodes and connections keep insertion order (the layout engine stacks rows
/// in that order); lookups go through the id helpers.
#[derive(Debug, Clone, Default)]
pub struct FlowGraph {
    nodes: Vec<Node>,
    connections: Vec<Connection>,
    ports: AHashMap<String, Vec<PortInfo>>,
}

impl FlowGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn connection(&self, id: &str) -> Option<&Connection> {
        self.connections.iter().find(|c| c.id == id)
    }

    /// Port metadata for a node, absent before the first validation round.
    pub fn ports(&self, node_id: &str) -> Option<&[PortInfo]> {
        self.ports.get(node_id).map(Vec::as_slice)
    }

    pub fn add_node(&mut self, node: Node) {
        self.nodes.push(node);
    }

    /// Removes a node and cascades to every connection referencing it.
    /// Returns false when the id is unknown.
    pub fn remove_node(&mut self, id: &str) -> bool {
        let before = self.nodes.len();
        self.nodes.retain(|n| n.id != id);
        if self.nodes.len() == before {
            return false;
        }
        self.connections.retain(|c| !c.touches(id));
        self.ports.remove(id);
        true
    }

    pub fn move_node(&mut self, id: &str, position: Position) -> bool {
        match self.node_mut(id) {
            Some(node) => {
                node.position = position;
                true
            }
            None => false,
        }
    }

    pub fn rename_node(&mut self, id: &str, name: impl Into<String>) -> bool {
        match self.node_mut(id) {
            Some(node) => {
                node.name = name.into();
                true
            }
            None => false,
        }
    }

    pub fn set_node_config(&mut self, id: &str, key: impl Into<String>, value: serde_json::Value) -> bool {
        match self.node_mut(id) {
            Some(node) => {
                node.config.insert(key.into(), value);
                true
            }
            None => false,
        }
    }

    pub fn add_connection(&mut self, connection: Connection) {
        self.connections.push(connection);
    }

    pub fn remove_connection(&mut self, id: &str) -> bool {
        let before = self.connections.len();
        self.connections.retain(|c| c.id != id);
        self.connections.len() != before
    }

    /// Replaces the full connection set. Used by the reconciler, which
    /// rebuilds the set from manual rows plus freshly discovered auto rows.
    pub fn set_connections(&mut self, connections: Vec<Connection>) {
        self.connections = connections;
    }

    /// Replaces the port metadata of one node.
    pub fn set_ports(&mut self, node_id: impl Into<String>, ports: Vec<PortInfo>) {
        self.ports.insert(node_id.into(), ports);
    }

    pub fn set_connection_state(&mut self, id: &str, state: ValidationState) {
        if let Some(conn) = self.connections.iter_mut().find(|c| c.id == id) {
            conn.validation_state = state;
        }
    }
}
