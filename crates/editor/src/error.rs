use std::time::Duration;

/// Why a fetch or submit failed.
///
/// Carried inside [`EditorState::Failed`](crate::machine::EditorState::Failed),
/// so it is `Clone` and holds only owned, printable detail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditorError {
    /// The target cat does not exist.
    #[error("Cat with id {id} not found")]
    NotFound { id: String },

    /// The request could not be sent or no response was received.
    #[error("Network error: {0}")]
    Network(String),

    /// The service answered with a non-success status.
    #[error("Server returned HTTP {status}: {body}")]
    Server { status: u16, body: String },

    /// The response body was not the expected JSON shape.
    #[error("Malformed response: {0}")]
    Decode(String),

    /// No response within the configured bound.
    #[error("No response within {0:?}")]
    Timeout(Duration),

    /// The draft was rejected before any request was sent.
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Coarse classification of an [`EditorError`], for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    NotFound,
    Network,
    Server,
    Decode,
    Timeout,
    Validation,
}

impl EditorError {
    pub fn kind(&self) -> FailureKind {
        match self {
            EditorError::NotFound { .. } => FailureKind::NotFound,
            EditorError::Network(_) => FailureKind::Network,
            EditorError::Server { .. } => FailureKind::Server,
            EditorError::Decode(_) => FailureKind::Decode,
            EditorError::Timeout(_) => FailureKind::Timeout,
            EditorError::Validation(_) => FailureKind::Validation,
        }
    }

    /// Returns `true` if resubmitting the same draft might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.kind(),
            FailureKind::Network | FailureKind::Server | FailureKind::Timeout
        )
    }
}

impl From<validator::ValidationErrors> for EditorError {
    fn from(errors: validator::ValidationErrors) -> Self {
        EditorError::Validation(errors.to_string())
    }
}

/// An action was requested in a state that does not allow it.
///
/// These are caller mistakes, not request failures, so they are returned
/// directly instead of being folded into the editor state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("Cannot {action} while the editor is {state}")]
    InvalidState {
        action: &'static str,
        state: &'static str,
    },

    #[error("A submit is already in flight")]
    SubmitInFlight,
}
