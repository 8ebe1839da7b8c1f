//! Error taxonomy shared by every journey operation.
use thiserror::Error;

use crate::collaborators::CollaboratorError;
use crate::games::GameError;
use crate::story::StoryError;

/// User input failed a local precondition. Nothing in the session changed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationRejected {
    #[error("message must be at least {min} characters (got {len})")]
    TooShort { min: usize, len: usize },
    #[error("no reflection has been recorded yet")]
    EmptyReflection,
    #[error("the mansion needs {needed} more credits")]
    GateLocked { needed: u32 },
}

#[derive(Debug, Error)]
pub enum JourneyError {
    #[error("collaborator unavailable: {0}")]
    CollaboratorUnavailable(#[from] CollaboratorError),
    #[error("rejected: {0}")]
    ValidationRejected(#[from] ValidationRejected),
    #[error("rendering failed: {0}")]
    RenderingFailure(CollaboratorError),
    #[error(transparent)]
    Game(#[from] GameError),
}

impl From<StoryError> for JourneyError {
    fn from(err: StoryError) -> Self {
        match err {
            StoryError::EmptyReflection => Self::ValidationRejected(ValidationRejected::EmptyReflection),
            StoryError::Render(inner) => Self::RenderingFailure(inner),
        }
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("session storage is unavailable")]
    Unavailable,
    #[error("session snapshot is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("session storage rejected the write: {0}")]
    Write(String),
}
