use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::{ValidationResult, ValidationStatus};

/// Save status shown by the surrounding UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SaveStatus {
    Clean,
    Dirty,
    /// Persisted despite unresolved validation errors.
    Draft,
    Saving,
    Error,
}

/// Projection of validation and edit activity into a small UI-facing status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveState {
    pub status: SaveStatus,
    pub last_saved: Option<DateTime<Utc>>,
    pub error: Option<String>,
}

/// Owns every `SaveState` transition.
///
/// Derivation order: `Saving`/`Error` are transient states around the
/// external save call; otherwise `Dirty` takes precedence while unsaved edits
/// exist, then `Draft` when the last save went through with validation
/// errors, then `Clean`.
#[derive(Debug, Default)]
pub struct SaveStateProjector {
    dirty: bool,
    saving: bool,
    save_error: Option<String>,
    draft_error: Option<String>,
    last_saved: Option<DateTime<Utc>>,
    last_save_validation: Option<ValidationStatus>,
}

impl SaveStateProjector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a structural edit.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
        // A new edit supersedes a stale save failure.
        self.save_error = None;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Entered just before the external save call.
    pub fn begin_save(&mut self) {
        self.saving = true;
        self.save_error = None;
    }

    /// The backend accepted the save; `result` is the last server-confirmed
    /// validation outcome for the persisted definition.
    pub fn save_succeeded(&mut self, result: &ValidationResult, now: DateTime<Utc>) {
        self.saving = false;
        self.dirty = false;
        self.last_saved = Some(now);
        self.last_save_validation = Some(result.status);
        self.draft_error = match result.status {
            ValidationStatus::Errors => Some(result.error_summary()),
            _ => None,
        };
    }

    /// The save call itself failed; distinct from a Draft save.
    pub fn save_failed(&mut self, message: impl Into<String>) {
        self.saving = false;
        self.save_error = Some(message.into());
    }

    /// Current projection.
    pub fn state(&self) -> SaveState {
        let (status, error) = if self.saving {
            (SaveStatus::Saving, None)
        } else if let Some(message) = &self.save_error {
            (SaveStatus::Error, Some(message.clone()))
        } else if self.dirty {
            (SaveStatus::Dirty, None)
        } else if self.last_save_validation == Some(ValidationStatus::Errors) {
            (SaveStatus::Draft, self.draft_error.clone())
        } else {
            (SaveStatus::Clean, None)
        };
        SaveState {
            status,
            last_saved: self.last_saved,
            error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{Issue, IssueSeverity};

    fn errors_result(count: usize) -> ValidationResult {
        ValidationResult {
            status: ValidationStatus::Errors,
            errors: (0..count)
                .map(|i| Issue {
                    severity: IssueSeverity::Error,
                    component_name: format!("n{i}"),
                    port_name: None,
                    message: "unwired input".to_string(),
                    suggestions: vec![],
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn starts_clean() {
        let projector = SaveStateProjector::new();
        assert_eq!(projector.state().status, SaveStatus::Clean);
    }

    #[test]
    fn edit_then_clean_save() {
        let mut projector = SaveStateProjector::new();
        projector.mark_dirty();
        assert_eq!(projector.state().status, SaveStatus::Dirty);

        projector.begin_save();
        assert_eq!(projector.state().status, SaveStatus::Saving);

        let now = Utc::now();
        projector.save_succeeded(&ValidationResult::default(), now);
        let state = projector.state();
        assert_eq!(state.status, SaveStatus::Clean);
        assert_eq!(state.last_saved, Some(now));
        assert_eq!(state.error, None);
    }

    #[test]
    fn save_with_errors_becomes_draft() {
        let mut projector = SaveStateProjector::new();
        projector.mark_dirty();
        projector.begin_save();
        projector.save_succeeded(&errors_result(1), Utc::now());

        let state = projector.state();
        assert_eq!(state.status, SaveStatus::Draft);
        assert_eq!(state.error.as_deref(), Some("1 error"));
    }

    #[test]
    fn save_failure_is_an_error_not_a_draft() {
        let mut projector = SaveStateProjector::new();
        projector.mark_dirty();
        projector.begin_save();
        projector.save_failed("503 from backend");

        let state = projector.state();
        assert_eq!(state.status, SaveStatus::Error);
        assert_eq!(state.error.as_deref(), Some("503 from backend"));
    }

    #[test]
    fn dirty_takes_precedence_over_draft() {
        let mut projector = SaveStateProjector::new();
        projector.mark_dirty();
        projector.begin_save();
        projector.save_succeeded(&errors_result(2), Utc::now());
        assert_eq!(projector.state().status, SaveStatus::Draft);

        projector.mark_dirty();
        assert_eq!(projector.state().status, SaveStatus::Dirty);
    }
}
