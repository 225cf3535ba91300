// Session error taxonomy
use thiserror::Error;

/// Every failure a session operation can hit. None of them are fatal to the
/// dispatch loop; each one ends the operation that raised it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    /// User input missing or unusable. Reported to the user log, nothing mutated.
    #[error("{0}")]
    Validation(String),

    /// Socket-level failure. Reported to the user log.
    #[error("{0}")]
    Transport(String),

    /// Inbound payload could not be parsed. Diagnostic channel only.
    #[error("malformed bridge message: {0}")]
    Protocol(String),

    /// The bridge sent `{"type":"error"}`.
    #[error("Error: {0}")]
    PeerReported(String),
}

impl SessionError {
    /// Whether the error belongs in the user-visible log.
    pub fn is_user_visible(&self) -> bool {
        !matches!(self, SessionError::Protocol(_))
    }
}
