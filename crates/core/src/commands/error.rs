use crate::target::TargetError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Permission denied: {permission}")]
    PermissionDenied { permission: String },
    #[error("Usage: {usage}")]
    Usage { usage: String },
    #[error(transparent)]
    Target(#[from] TargetError),
}

#[derive(Debug, Error)]
pub enum InternalError {
    #[error(
        "Internal error: Argument '{name}' not found in ArgumentSet (command registration bug)"
    )]
    MissingArgument { name: String },
    #[error("Internal error: Argument '{name}' has wrong type, expected {expected} (command registration bug)")]
    WrongArgumentType { name: String, expected: String },
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl From<TargetError> for CommandError {
    fn from(err: TargetError) -> Self {
        CommandError::Runtime(err.into())
    }
}

pub type CommandResult<T> = Result<T, CommandError>;
