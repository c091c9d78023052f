mod console;

use anyhow::Context;
use clap::Parser;
use console::{PlayerSource, ServerSpec, StaticServerRegistry};
use pandabroadcast_core::commands::CommandRegistry;
use pandabroadcast_core::host::{CommandSource, ConsoleSource};
use pandabroadcast_core::plugin::{PluginContext, Plugins};
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Directory holding config.yml and broadcasts.log
    #[arg(long, default_value = "plugins/pandabroadcast")]
    data_dir: PathBuf,

    /// A backend server, as `name` or `name=player,player`
    #[arg(long = "server")]
    servers: Vec<ServerSpec>,

    /// A player that holds every permission
    #[arg(long = "op")]
    ops: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    // Setup logging
    let logfile = tracing_appender::rolling::daily("./logs", "pandabroadcast.log");
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .with_env_var("PANDABROADCAST_LOG")
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_writer(logfile.and(std::io::stdout))
        .with_env_filter(env_filter)
        .init();

    let args = Args::parse();
    let registry = Arc::new(StaticServerRegistry::new(&args.servers, &args.ops));
    let context = PluginContext {
        servers: registry.clone(),
        data_directory: args.data_dir,
    };
    let plugins = Plugins::load(&context);
    let commands = CommandRegistry::with_builtin_commands();
    info!(
        "Ready. Commands: /{}; `as <player> <command>` runs as a player",
        commands.command_names().join(", /")
    );

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read from stdin")?;
        let line = line.trim();
        match line {
            "" => continue,
            "stop" | "end" => break,
            "total" => {
                println!("Broadcasts sent: {}", plugins.pandabroadcast.total_broadcasts());
                continue;
            }
            _ => {}
        }

        let result = match line.strip_prefix("as ") {
            Some(rest) => {
                let rest = rest.trim_start();
                let (player, command_line) = rest.split_once(' ').unwrap_or((rest, ""));
                match registry.find_player(player) {
                    Some(player) => commands.execute(&plugins, &PlayerSource(player), command_line),
                    None => {
                        ConsoleSource.send_error_message(&format!("Unknown player: {}", player));
                        Ok(())
                    }
                }
            }
            None => commands.execute(&plugins, &ConsoleSource, line),
        };
        if let Err(err) = result {
            error!("{}", err);
        }
    }

    info!("Broadcasts sent this session: {}", plugins.pandabroadcast.total_broadcasts());
    Ok(())
}
