use thiserror::Error;

use crate::validation::ValidationResult;

/// Errors from the remote validator round trip.
///
/// These are transient from the editor's point of view: the last known
/// validation state is retained and nothing is surfaced to the user.
/// Structural errors and warnings are not errors at this level; they arrive
/// as a normal [`ValidationResult`].
#[derive(Error, Debug, Clone)]
pub enum ValidateError {
    #[error("validator unreachable: {0}")]
    Transport(String),

    #[error("validator returned an undecodable payload: {0}")]
    Decode(String),
}

/// Errors from the persistence backend.
#[derive(Error, Debug, Clone)]
pub enum PersistError {
    #[error("persistence call failed: {0}")]
    Transport(String),

    /// The backend refused a deploy/start/stop because the flow failed its
    /// own validation; the embedded result is surfaced verbatim.
    #[error("flow rejected by the backend: {}", result.error_summary())]
    Rejected { result: ValidationResult },
}
