//! Common test utilities: graph builders and scripted service doubles.
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use flowcanvas::error::{PersistError, ValidateError};
use flowcanvas::persist::{FlowDefinition, FlowStore, RuntimeReceipt, SaveReceipt};
use flowcanvas::prelude::*;

/// Quiet period used across the suites; short so paused-clock tests advance
/// little virtual time.
#[allow(dead_code)]
pub const TEST_QUIET_PERIOD: Duration = Duration::from_millis(50);

/// Installs a test subscriber so scheduler and layout warnings show up in
/// failing runs. Safe to call from every test; later calls are no-ops.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[allow(dead_code)]
pub fn node(id: &str) -> Node {
    Node {
        id: id.to_string(),
        component_type: "transform".to_string(),
        name: id.to_string(),
        position: Position::default(),
        config: Default::default(),
    }
}

#[allow(dead_code)]
pub fn discovered(source: &str, target: &str) -> DiscoveredConnection {
    DiscoveredConnection {
        source_node_id: source.to_string(),
        source_port: "out".to_string(),
        target_node_id: target.to_string(),
        target_port: "in".to_string(),
    }
}

#[allow(dead_code)]
pub fn error_issue(component: &str, message: &str) -> Issue {
    Issue {
        severity: IssueSeverity::Error,
        component_name: component.to_string(),
        port_name: None,
        message: message.to_string(),
        suggestions: vec![],
    }
}

#[derive(Default)]
struct ValidatorInner {
    responses: Mutex<VecDeque<Result<ValidationResult, ValidateError>>>,
    calls: AtomicUsize,
}

/// A validator double fed a queue of canned responses; answers
/// `ValidationResult::default()` once the queue runs dry.
#[derive(Clone, Default)]
pub struct ScriptedValidator {
    inner: Arc<ValidatorInner>,
}

impl ScriptedValidator {
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(dead_code)]
    pub fn push_result(&self, result: ValidationResult) {
        self.inner
            .responses
            .lock()
            .unwrap()
            .push_back(Ok(result));
    }

    #[allow(dead_code)]
    pub fn push_failure(&self) {
        self.inner
            .responses
            .lock()
            .unwrap()
            .push_back(Err(ValidateError::Transport("connection refused".to_string())));
    }

    #[allow(dead_code)]
    pub fn call_count(&self) -> usize {
        self.inner.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Validator for ScriptedValidator {
    async fn validate(&self, _request: ValidateRequest) -> Result<ValidationResult, ValidateError> {
        self.inner.calls.fetch_add(1, Ordering::SeqCst);
        self.inner
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(ValidationResult::default()))
    }
}

#[derive(Default)]
struct StoreInner {
    saves: Mutex<Vec<FlowDefinition>>,
    version: AtomicU64,
    next_error: Mutex<Option<PersistError>>,
}

/// An in-memory persistence double with a programmable next failure.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<StoreInner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(dead_code)]
    pub fn fail_next(&self, error: PersistError) {
        *self.inner.next_error.lock().unwrap() = Some(error);
    }

    #[allow(dead_code)]
    pub fn saved_count(&self) -> usize {
        self.inner.saves.lock().unwrap().len()
    }

    fn take_error(&self) -> Option<PersistError> {
        self.inner.next_error.lock().unwrap().take()
    }

    fn receipt(&self, runtime_state: &str) -> RuntimeReceipt {
        RuntimeReceipt {
            runtime_state: runtime_state.to_string(),
            updated_at: Utc::now(),
        }
    }
}

#[async_trait]
impl FlowStore for MemoryStore {
    async fn save(
        &self,
        _flow_id: &str,
        definition: &FlowDefinition,
    ) -> Result<SaveReceipt, PersistError> {
        if let Some(err) = self.take_error() {
            return Err(err);
        }
        self.inner.saves.lock().unwrap().push(definition.clone());
        Ok(SaveReceipt {
            version: self.inner.version.fetch_add(1, Ordering::SeqCst) + 1,
            runtime_state: definition.runtime_state.clone(),
            updated_at: Utc::now(),
        })
    }

    async fn deploy(&self, _flow_id: &str) -> Result<RuntimeReceipt, PersistError> {
        match self.take_error() {
            Some(err) => Err(err),
            None => Ok(self.receipt("deployed")),
        }
    }

    async fn start(&self, _flow_id: &str) -> Result<RuntimeReceipt, PersistError> {
        match self.take_error() {
            Some(err) => Err(err),
            None => Ok(self.receipt("running")),
        }
    }

    async fn stop(&self, _flow_id: &str) -> Result<RuntimeReceipt, PersistError> {
        match self.take_error() {
            Some(err) => Err(err),
            None => Ok(self.receipt("stopped")),
        }
    }
}

/// An editor wired to fresh doubles, returned alongside them for scripting
/// and inspection.
#[allow(dead_code)]
pub fn test_editor(
    flow_id: &str,
) -> (
    FlowEditor<ScriptedValidator, MemoryStore>,
    ScriptedValidator,
    MemoryStore,
) {
    init_tracing();
    let validator = ScriptedValidator::new();
    let store = MemoryStore::new();
    let editor = FlowEditor::new(flow_id, "Test Flow", validator.clone(), store.clone())
        .with_quiet_period(TEST_QUIET_PERIOD);
    (editor, validator, store)
}
