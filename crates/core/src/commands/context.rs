use super::argument_set::ArgumentSet;
use crate::commands::error::{CommandResult, RuntimeError};
use crate::host::CommandSource;
use crate::plugin::Plugins;
use pandabroadcast_text::Markup;

pub struct ExecutionContext<'a> {
    pub plugins: &'a Plugins,
    source: &'a dyn CommandSource,
    arguments: ArgumentSet,
}

impl<'a> ExecutionContext<'a> {
    pub(super) fn new(
        plugins: &'a Plugins,
        source: &'a dyn CommandSource,
        arguments: ArgumentSet,
    ) -> Self {
        Self {
            plugins,
            source,
            arguments,
        }
    }

    pub fn args(&self) -> &ArgumentSet {
        &self.arguments
    }

    /// Player name of the source, or `Console`.
    pub fn sender_name(&self) -> &str {
        self.source.display_name()
    }

    /// Sends `message` (tag markup) to the source.
    pub fn reply(&self, message: &str) {
        self.source.send_message(Markup::tag(message));
    }

    pub fn error(&self, message: &str) {
        self.source.send_error_message(message);
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.source.has_permission(permission)
    }

    pub fn require_permission(&self, permission: &str) -> CommandResult<()> {
        if !self.has_permission(permission) {
            return Err(RuntimeError::PermissionDenied {
                permission: permission.to_string(),
            }
            .into());
        }
        Ok(())
    }
}
