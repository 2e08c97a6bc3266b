use std::time::Duration;

use tokio::time::Instant;

use crate::error::PersistError;
use crate::graph::{
    Connection, FlowGraph, GraphSignature, Node, Position, signature,
};
use crate::layout::{CanvasLayout, LayoutConfig, layout};
use crate::persist::{
    FlowDefinition, FlowStore, RuntimeReceipt, SaveReceipt, SaveState, SaveStateProjector,
};
use crate::validation::{
    SchedulerPhase, ValidateRequest, ValidationResult, ValidationScheduler, Validator, apply,
    reconcile,
};

/// One open flow: the graph, its validation scheduling, and its save state,
/// wired to the external validator and persistence services.
///
/// All mutation goes through `&mut self`, so there is exactly one logical
/// writer; the only suspension points are the debounce sleep in
/// [`pump_validation`](Self::pump_validation) and the service round trips.
/// In-flight validation requests are never cancelled: a response that lands
/// after further edits still carries usable port metadata and discovered
/// connections, and the merge in [`apply_result`](Self::apply_result) is a
/// superset merge, not a replace-by-version.
pub struct FlowEditor<V, S> {
    flow_id: String,
    name: String,
    runtime_state: String,
    graph: FlowGraph,
    scheduler: ValidationScheduler,
    projector: SaveStateProjector,
    last_result: Option<ValidationResult>,
    validator: V,
    store: S,
}

impl<V: Validator, S: FlowStore> FlowEditor<V, S> {
    pub fn new(flow_id: impl Into<String>, name: impl Into<String>, validator: V, store: S) -> Self {
        Self {
            flow_id: flow_id.into(),
            name: name.into(),
            runtime_state: "stopped".to_string(),
            graph: FlowGraph::new(),
            scheduler: ValidationScheduler::default(),
            projector: SaveStateProjector::new(),
            last_result: None,
            validator,
            store,
        }
    }

    /// Opens a previously persisted flow.
    pub fn from_definition(definition: FlowDefinition, validator: V, store: S) -> Self {
        let mut editor = Self::new(definition.id, definition.name, validator, store);
        editor.runtime_state = definition.runtime_state;
        let mut graph = FlowGraph::new();
        for node in definition.nodes {
            graph.add_node(node);
        }
        for connection in definition.connections {
            graph.add_connection(connection);
        }
        editor.graph = graph;
        editor
    }

    pub fn with_quiet_period(mut self, quiet_period: Duration) -> Self {
        self.scheduler = ValidationScheduler::new(quiet_period);
        self
    }

    pub fn graph(&self) -> &FlowGraph {
        &self.graph
    }

    pub fn runtime_state(&self) -> &str {
        &self.runtime_state
    }

    pub fn scheduler_phase(&self) -> SchedulerPhase {
        self.scheduler.phase()
    }

    /// Last successfully applied validation result, if any.
    pub fn validation(&self) -> Option<&ValidationResult> {
        self.last_result.as_ref()
    }

    pub fn save_state(&self) -> SaveState {
        self.projector.state()
    }

    // --- Graph Edits ---

    pub fn add_node(&mut self, node: Node) {
        self.graph.add_node(node);
        self.touch();
    }

    /// Removes a node; connections referencing it are cascaded away.
    pub fn remove_node(&mut self, id: &str) -> bool {
        let removed = self.graph.remove_node(id);
        if removed {
            self.touch();
        }
        removed
    }

    pub fn move_node(&mut self, id: &str, position: Position) -> bool {
        let moved = self.graph.move_node(id, position);
        if moved {
            self.touch();
        }
        moved
    }

    pub fn rename_node(&mut self, id: &str, name: impl Into<String>) -> bool {
        let renamed = self.graph.rename_node(id, name);
        if renamed {
            self.touch();
        }
        renamed
    }

    pub fn update_node_config(
        &mut self,
        id: &str,
        key: impl Into<String>,
        value: serde_json::Value,
    ) -> bool {
        let updated = self.graph.set_node_config(id, key, value);
        if updated {
            self.touch();
        }
        updated
    }

    /// Draws a manual connection and returns its id.
    pub fn connect(
        &mut self,
        source_node_id: &str,
        source_port: &str,
        target_node_id: &str,
        target_port: &str,
    ) -> String {
        let connection = Connection::manual(source_node_id, source_port, target_node_id, target_port);
        let id = connection.id.clone();
        self.graph.add_connection(connection);
        self.touch();
        id
    }

    pub fn disconnect(&mut self, connection_id: &str) -> bool {
        let removed = self.graph.remove_connection(connection_id);
        if removed {
            self.touch();
        }
        removed
    }

    fn touch(&mut self) {
        self.projector.mark_dirty();
        self.scheduler
            .note_mutation(signature(&self.graph), Instant::now());
    }

    // --- Validation Cycle ---

    /// Claims a due validation and builds its request. Exposed so callers
    /// that drive their own timing (and tests) can interleave edits between
    /// issue and response; [`pump_validation`](Self::pump_validation) is the
    /// packaged cycle.
    pub fn due_validation(&mut self, now: Instant) -> Option<(GraphSignature, ValidateRequest)> {
        let current = signature(&self.graph);
        let issued = self.scheduler.take_due(now, &current)?;
        let request = ValidateRequest::from_graph(
            &self.flow_id,
            &self.name,
            &self.runtime_state,
            &self.graph,
        );
        Some((issued, request))
    }

    /// Merges a validation response into the graph.
    ///
    /// Auto connections are rebuilt from the discovered set, port metadata
    /// and issue states are merged, and the scheduler's signature only
    /// advances when the graph still matches what was validated. Applying a
    /// result never changes the user-authored signature, so it cannot
    /// schedule the next round.
    pub fn apply_result(&mut self, issued: &GraphSignature, result: ValidationResult) {
        let next = reconcile(self.graph.connections(), &result.discovered_connections);
        self.graph.set_connections(next);
        apply(&mut self.graph, &result);
        let current = signature(&self.graph);
        self.scheduler.complete(issued, &current, true);
        self.last_result = Some(result);
    }

    /// Records a failed round trip: state untouched, signature not advanced.
    pub fn validation_failed(&mut self, issued: &GraphSignature) {
        let current = signature(&self.graph);
        self.scheduler.complete(issued, &current, false);
    }

    /// Runs one full validation cycle: waits out the quiet period, issues
    /// the request, and merges the response. Returns whether a result was
    /// applied. Transport failures are logged and swallowed; the last known
    /// validation state stays in place.
    pub async fn pump_validation(&mut self) -> bool {
        let Some(deadline) = self.scheduler.deadline() else {
            return false;
        };
        tokio::time::sleep_until(deadline).await;
        let Some((issued, request)) = self.due_validation(Instant::now()) else {
            return false;
        };
        match self.validator.validate(request).await {
            Ok(result) => {
                self.apply_result(&issued, result);
                true
            }
            Err(err) => {
                tracing::warn!(flow = %self.flow_id, error = %err, "validation request failed");
                self.validation_failed(&issued);
                false
            }
        }
    }

    // --- Layout ---

    pub fn layout(&self, config: &LayoutConfig) -> CanvasLayout {
        layout(self.graph.nodes(), self.graph.connections(), config)
    }

    // --- Persistence ---

    /// Saves the current definition. Save-state transitions: `Saving` while
    /// the call is out, then `Clean`, `Draft` (persisted with validation
    /// errors), or `Error` (the call itself failed).
    pub async fn save(&mut self) -> Result<SaveReceipt, PersistError> {
        self.projector.begin_save();
        let definition = FlowDefinition::from_graph(
            &self.flow_id,
            &self.name,
            &self.runtime_state,
            &self.graph,
        );
        match self.store.save(&self.flow_id, &definition).await {
            Ok(receipt) => {
                self.runtime_state = receipt.runtime_state.clone();
                let confirmed = self.last_result.clone().unwrap_or_default();
                self.projector.save_succeeded(&confirmed, receipt.updated_at);
                Ok(receipt)
            }
            Err(err) => {
                self.projector.save_failed(err.to_string());
                Err(err)
            }
        }
    }

    pub async fn deploy(&mut self) -> Result<RuntimeReceipt, PersistError> {
        let receipt = self.store.deploy(&self.flow_id).await?;
        self.runtime_state = receipt.runtime_state.clone();
        Ok(receipt)
    }

    pub async fn start(&mut self) -> Result<RuntimeReceipt, PersistError> {
        let receipt = self.store.start(&self.flow_id).await?;
        self.runtime_state = receipt.runtime_state.clone();
        Ok(receipt)
    }

    pub async fn stop(&mut self) -> Result<RuntimeReceipt, PersistError> {
        let receipt = self.store.stop(&self.flow_id).await?;
        self.runtime_state = receipt.runtime_state.clone();
        Ok(receipt)
    }
}
