use crate::commands::error::{CommandResult, InternalError};

#[derive(Debug, Clone)]
pub enum Value {
    String(String),
    GreedyString(String),
}

impl Value {
    fn type_error(&self, expected: &str) -> InternalError {
        InternalError::WrongArgumentType {
            name: format!("{:?}", self),
            expected: expected.to_string(),
        }
    }

    pub(super) fn as_string(&self) -> CommandResult<&String> {
        match self {
            Value::String(s) => Ok(s),
            _ => Err(self.type_error("String").into()),
        }
    }

    pub(super) fn as_greedy(&self) -> CommandResult<&String> {
        match self {
            Value::GreedyString(s) => Ok(s),
            _ => Err(self.type_error("Greedy").into()),
        }
    }
}
