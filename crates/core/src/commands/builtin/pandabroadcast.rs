use crate::commands::error::CommandResult;
use crate::commands::{
    argument::ArgumentType, argument_parser::split_arguments, context::ExecutionContext,
    node::CommandNode, registry::CommandRegistry,
};
use crate::plugin::pandabroadcast::{BROADCAST_PERMISSION, RELOAD_PERMISSION};
use tracing::{error, info};

pub(super) fn register_commands(registry: &mut CommandRegistry) {
    registry.register(
        CommandNode::literal("broadcast")
            .require_permission(BROADCAST_PERMISSION)
            .then(
                CommandNode::argument("arguments", ArgumentType::greedy_string()).executes(|ctx| {
                    let arguments = split_arguments(&ctx.args().get_greedy("arguments")?);
                    ctx.plugins
                        .pandabroadcast
                        .broadcast(ctx.sender_name(), &arguments)?;
                    Ok(())
                }),
            ),
    );

    // Subcommands match case-insensitively and ignore anything after them.
    registry.register(
        CommandNode::literal("pandabroadcast").executes(exec_help).then(
            CommandNode::argument("subcommand", ArgumentType::string())
                .executes(exec_subcommand)
                .then(CommandNode::argument("rest", ArgumentType::greedy_string()).executes(exec_subcommand)),
        ),
    );
}

fn exec_subcommand(ctx: &mut ExecutionContext<'_>) -> CommandResult<()> {
    let subcommand = ctx.args().get_string("subcommand")?;
    if subcommand.eq_ignore_ascii_case("reload") && ctx.has_permission(RELOAD_PERMISSION) {
        exec_reload(ctx)
    } else {
        exec_help(ctx)
    }
}

fn exec_reload(ctx: &mut ExecutionContext<'_>) -> CommandResult<()> {
    if let Err(err) = ctx.plugins.pandabroadcast.reload() {
        error!("Failed to reload PandaBroadcast configuration: {}", err);
    }
    ctx.reply("<green>PandaBroadcast configuration reloaded!");
    info!("PandaBroadcast configuration reloaded by {}", ctx.sender_name());
    Ok(())
}

fn exec_help(ctx: &mut ExecutionContext<'_>) -> CommandResult<()> {
    ctx.reply("<gold>PandaBroadcast Commands:");
    ctx.reply("<yellow>/broadcast <message> <gray>- Send a message to all servers");
    ctx.reply("<yellow>/broadcast <servers> <message> <gray>- Send a message to specific servers");
    if ctx.has_permission(RELOAD_PERMISSION) {
        ctx.reply("<yellow>/pandabroadcast reload <gray>- Reload the configuration");
    }
    Ok(())
}
