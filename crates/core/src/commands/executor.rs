use crate::{
    commands::{
        argument_set::ArgumentSet,
        context::ExecutionContext,
        error::{CommandError, CommandResult, InternalError},
        node::CommandNode,
        parser::{self, ParseResult},
        registry::CommandRegistry,
        usage,
    },
    host::CommandSource,
    plugin::Plugins,
};
use pandabroadcast_text::Markup;

impl CommandRegistry {
    /// Runs one command line for `source`. A leading `/` is optional.
    ///
    /// User mistakes are reported to the source; only bugs in command
    /// registration come back as errors.
    pub fn execute(
        &self,
        plugins: &Plugins,
        source: &dyn CommandSource,
        command_line: &str,
    ) -> Result<(), InternalError> {
        let command_line = command_line.trim();
        let command_line = command_line.strip_prefix('/').unwrap_or(command_line);
        if command_line.is_empty() {
            return Ok(());
        }

        match parser::parse(self.get_root(), command_line) {
            ParseResult::Success {
                node,
                arguments,
                path,
            } => {
                let mut ctx = ExecutionContext::new(plugins, source, ArgumentSet::new(arguments));
                match Self::execute_impl(&mut ctx, node, &path) {
                    Ok(()) => Ok(()),
                    Err(CommandError::Runtime(err)) => {
                        ctx.error(&err.to_string());
                        Ok(())
                    }
                    Err(CommandError::Internal(err)) => Err(err),
                }
            }

            ParseResult::Partial { path } => {
                Self::handle_parse_error(source, &path, "Not enough arguments");
                Ok(())
            }
            ParseResult::TooManyArguments { path, remaining } => {
                let message = format!("Too many arguments: {remaining}");
                Self::handle_parse_error(source, &path, &message);
                Ok(())
            }
            ParseResult::InvalidArgument { path, remaining } => {
                let message = format!("Invalid argument: {remaining}");
                Self::handle_parse_error(source, &path, &message);
                Ok(())
            }

            ParseResult::NothingMatched => {
                source.send_error_message("Command not found!");
                Ok(())
            }
        }
    }

    fn execute_impl(
        ctx: &mut ExecutionContext<'_>,
        node: &CommandNode,
        path: &[&CommandNode],
    ) -> CommandResult<()> {
        let Some(executor) = node.executor else {
            unreachable!("Node must have executor to be parsed successfully")
        };

        for node in path {
            for permission in &node.permissions {
                ctx.require_permission(permission)?;
            }
        }

        executor(ctx)
    }

    fn handle_parse_error(source: &dyn CommandSource, path: &[&CommandNode], error_message: &str) {
        source.send_error_message(error_message);
        let usage = usage::generate_usage(path);
        source.send_message(Markup::tag(format!("<gold>Usage: <yellow>{}", usage)));
    }
}
