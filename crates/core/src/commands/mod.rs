mod argument;
mod argument_parser;
mod argument_set;
mod builtin;
mod context;
mod error;
mod executor;
mod node;
mod parser;
mod registry;
mod usage;
mod value;

pub use context::ExecutionContext;
pub use error::{CommandError, CommandResult, InternalError, RuntimeError};
pub use registry::CommandRegistry;
