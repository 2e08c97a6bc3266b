//! Prelude module for convenient imports
//!
//! Re-exports the types most applications touch: the editor, the graph
//! model, the layout entry points, and the service traits.

// Editor driver
pub use crate::editor::FlowEditor;

// Graph model
pub use crate::graph::{
    Connection, FlowGraph, GraphSignature, Node, PortDirection, PortInfo, Position, Provenance,
    ValidationState, signature,
};

// Validation
pub use crate::validation::{
    DiscoveredConnection, Issue, IssueSeverity, ValidateRequest, ValidationResult,
    ValidationScheduler, ValidationStatus, Validator,
};

// Layout
pub use crate::layout::{CanvasBounds, CanvasLayout, EdgePath, LayoutConfig, PlacedNode, layout};

// Persistence and save state
pub use crate::persist::{FlowStore, SaveState, SaveStatus};

// Error types
pub use crate::error::{PersistError, ValidateError};
