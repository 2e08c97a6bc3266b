//! # Flowcanvas - Consistency Engine for Node/Port Flow Editors
//!
//! **Flowcanvas** keeps the mutable graph behind a node/port visual editor
//! consistent: it debounces structural edits into validation requests against
//! a remote validator, merges the responses back without destroying
//! in-progress edits, reconciles server-discovered connections against
//! user-drawn ones, computes a deterministic layered layout for rendering,
//! and projects a save status for the surrounding UI.
//!
//! ## Core workflow
//!
//! 1. **Open a flow**: build a [`editor::FlowEditor`] from scratch or from a
//!    persisted [`persist::FlowDefinition`], wiring in your
//!    [`validation::Validator`] and [`persist::FlowStore`] implementations.
//! 2. **Edit**: every structural edit marks the flow dirty and re-arms the
//!    validation quiet period. Edits that do not change the user-authored
//!    structure (applying a validation result, for instance) schedule
//!    nothing, which is what keeps validation from feeding back into itself.
//! 3. **Validate**: [`editor::FlowEditor::pump_validation`] waits out the
//!    quiet period, sends the full graph to the validator, and merges the
//!    response: port metadata and issue states are merged in place, and
//!    machine-inferred connections are rebuilt from the discovered set while
//!    user-drawn connections pass through untouched.
//! 4. **Render**: [`layout::layout`] assigns each node a column equal to its
//!    longest path from a source node and returns pixel rectangles, cubic
//!    edge curves, and canvas bounds.
//! 5. **Persist**: `save`/`deploy`/`start`/`stop` delegate to the
//!    persistence backend and drive the [`persist::SaveState`] projection.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use async_trait::async_trait;
//! use flowcanvas::prelude::*;
//! use flowcanvas::error::{PersistError, ValidateError};
//! use flowcanvas::persist::{FlowDefinition, RuntimeReceipt, SaveReceipt};
//!
//! // Wire the editor to your transport. In an application these would wrap
//! // HTTP clients; here they are stubs.
//! struct HttpValidator;
//!
//! #[async_trait]
//! impl Validator for HttpValidator {
//!     async fn validate(
//!         &self,
//!         _request: ValidateRequest,
//!     ) -> Result<ValidationResult, ValidateError> {
//!         Ok(ValidationResult::default())
//!     }
//! }
//!
//! struct HttpStore;
//!
//! #[async_trait]
//! impl FlowStore for HttpStore {
//!     async fn save(
//!         &self,
//!         _flow_id: &str,
//!         _definition: &FlowDefinition,
//!     ) -> Result<SaveReceipt, PersistError> {
//!         unimplemented!("POST the definition to the backend")
//!     }
//!     async fn deploy(&self, _flow_id: &str) -> Result<RuntimeReceipt, PersistError> {
//!         unimplemented!()
//!     }
//!     async fn start(&self, _flow_id: &str) -> Result<RuntimeReceipt, PersistError> {
//!         unimplemented!()
//!     }
//!     async fn stop(&self, _flow_id: &str) -> Result<RuntimeReceipt, PersistError> {
//!         unimplemented!()
//!     }
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let mut editor = FlowEditor::new("flow-1", "My Flow", HttpValidator, HttpStore);
//!
//!     editor.add_node(Node {
//!         id: "reader".to_string(),
//!         component_type: "file-reader".to_string(),
//!         name: "Reader".to_string(),
//!         position: Position::default(),
//!         config: Default::default(),
//!     });
//!
//!     // Waits out the quiet period, validates, merges the response.
//!     editor.pump_validation().await;
//!
//!     let layout = editor.layout(&LayoutConfig::default());
//!     println!("canvas is {}x{}", layout.bounds.width, layout.bounds.height);
//! }
//! ```

pub mod editor;
pub mod error;
pub mod graph;
pub mod layout;
pub mod persist;
pub mod prelude;
pub mod validation;
