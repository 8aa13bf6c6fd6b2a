use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum DomainError {
    #[error("Malformed notification: {0}")]
    MalformedNotification(String),

    #[error("Unrecognized command: {0}")]
    UnrecognizedCommand(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid RecordId: {0}")]
    InvalidRecordId(String),
}

pub type DomainResult<T> = Result<T, DomainError>;
