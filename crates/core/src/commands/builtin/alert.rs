use crate::commands::error::{CommandResult, RuntimeError};
use crate::commands::{
    argument::ArgumentType, context::ExecutionContext, node::CommandNode, registry::CommandRegistry,
};
use crate::plugin::alert::BROADCAST_PERMISSION;

pub(super) fn register_commands(registry: &mut CommandRegistry) {
    fn exec_vbroadcast(ctx: &mut ExecutionContext<'_>) -> CommandResult<()> {
        let message = ctx.args().get_greedy("message")?;
        if message.trim().is_empty() {
            return Err(RuntimeError::Usage {
                usage: "/vbroadcast <message>".to_string(),
            }
            .into());
        }

        ctx.plugins.alert.broadcast(&message);
        Ok(())
    }

    registry.register(
        CommandNode::literal("vbroadcast")
            .require_permission(BROADCAST_PERMISSION)
            .then(
                CommandNode::argument("message", ArgumentType::greedy_string())
                    .executes(exec_vbroadcast),
            ),
    );
}
