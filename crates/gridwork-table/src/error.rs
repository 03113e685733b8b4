//! Error types for the table action core.

use gridwork_core::GridworkError;

/// Errors from action registration, resolution, and execution.
///
/// Absence of a matching action and an authorization denial are benign
/// outcomes, not errors; they surface through
/// [`DispatchResult`](crate::types::DispatchResult) instead.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error("Invalid action descriptor: {0}")]
    InvalidDescriptor(String),
    #[error("Action handler not found: {0}")]
    HandlerNotFound(String),
    #[error("Action handler failed: {0}")]
    HandlerFailed(String),
    #[error("Core error: {0}")]
    Core(#[from] GridworkError),
}
