use serde::Serialize;
use thiserror::Error;

/// Default message of errors raised without one
pub const DEFAULT_ERROR_MESSAGE: &str = "Something unexpected happened.";

/// Error kinds the error handlers route on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    /// Raised on purpose by skill code when something unexpected happens;
    /// ends the session with an apology
    Unexpected,
    /// Anything else; the user is asked to try again
    #[default]
    Unknown,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Unexpected => "Unexpected",
            ErrorKind::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Error)]
pub enum SkillError {
    #[error("{message}")]
    Raised { kind: ErrorKind, message: String },
    #[error("Unable to find a suitable request handler for {0}")]
    NoHandler(String),
    #[error("Directive service error: {0}")]
    Directive(String),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl SkillError {
    /// Creates an error with the given message and kind.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        SkillError::Raised {
            kind,
            message: message.into(),
        }
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }

    /// Only explicitly raised errors can carry the `Unexpected` kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SkillError::Raised { kind, .. } => *kind,
            _ => ErrorKind::Unknown,
        }
    }
}

impl Default for SkillError {
    fn default() -> Self {
        Self::new(ErrorKind::default(), DEFAULT_ERROR_MESSAGE)
    }
}
