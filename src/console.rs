//! A stand-in proxy for running the plugins from a terminal.
//!
//! Servers and players are fixed at startup. Players print what they
//! receive to stdout.

use pandabroadcast_core::host::{CommandSource, Recipient, SendError, ServerHandle, ServerRegistry};
use pandabroadcast_text::Markup;
use std::str::FromStr;
use std::sync::Arc;

/// `name[=player,player...]` as given on the command line.
#[derive(Debug, Clone)]
pub struct ServerSpec {
    pub name: String,
    pub players: Vec<String>,
}

impl FromStr for ServerSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, players) = match s.split_once('=') {
            Some((name, players)) => (name, players),
            None => (s, ""),
        };
        let name = name.trim();
        if name.is_empty() {
            return Err(format!("missing server name in '{}'", s));
        }
        let players = players
            .split(',')
            .map(str::trim)
            .filter(|player| !player.is_empty())
            .map(str::to_string)
            .collect();
        Ok(ServerSpec {
            name: name.to_string(),
            players,
        })
    }
}

pub struct ConsolePlayer {
    name: String,
    server: String,
    op: bool,
}

impl Recipient for ConsolePlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn has_permission(&self, _node: &str) -> bool {
        self.op
    }

    fn send_message(&self, message: &Markup) -> Result<(), SendError> {
        println!(
            "[{}] {}: {}",
            self.server,
            self.name,
            message.to_section_codes()
        );
        Ok(())
    }
}

/// Runs a command as one of the console players.
pub struct PlayerSource(pub Arc<ConsolePlayer>);

impl CommandSource for PlayerSource {
    fn player_name(&self) -> Option<&str> {
        Some(&self.0.name)
    }

    fn has_permission(&self, _node: &str) -> bool {
        self.0.op
    }

    fn send_message(&self, message: Markup) {
        println!("[{}] {}", self.0.name, message.to_section_codes());
    }
}

pub struct StaticServer {
    name: String,
    players: Vec<Arc<ConsolePlayer>>,
}

impl ServerHandle for StaticServer {
    fn name(&self) -> &str {
        &self.name
    }

    fn connected_players(&self) -> Vec<Arc<dyn Recipient>> {
        self.players
            .iter()
            .map(|player| player.clone() as Arc<dyn Recipient>)
            .collect()
    }
}

pub struct StaticServerRegistry {
    servers: Vec<Arc<StaticServer>>,
}

impl StaticServerRegistry {
    pub fn new(specs: &[ServerSpec], ops: &[String]) -> StaticServerRegistry {
        let servers = specs
            .iter()
            .map(|spec| {
                let players = spec
                    .players
                    .iter()
                    .map(|player| {
                        Arc::new(ConsolePlayer {
                            name: player.clone(),
                            server: spec.name.clone(),
                            op: ops.contains(player),
                        })
                    })
                    .collect();
                Arc::new(StaticServer {
                    name: spec.name.clone(),
                    players,
                })
            })
            .collect();
        StaticServerRegistry { servers }
    }

    pub fn find_player(&self, name: &str) -> Option<Arc<ConsolePlayer>> {
        self.servers
            .iter()
            .flat_map(|server| server.players.iter())
            .find(|player| player.name.eq_ignore_ascii_case(name))
            .cloned()
    }
}

impl ServerRegistry for StaticServerRegistry {
    fn all_servers(&self) -> Vec<Arc<dyn ServerHandle>> {
        self.servers
            .iter()
            .map(|server| server.clone() as Arc<dyn ServerHandle>)
            .collect()
    }

    fn server_by_name(&self, name: &str) -> Option<Arc<dyn ServerHandle>> {
        self.servers
            .iter()
            .find(|server| server.name == name)
            .map(|server| server.clone() as Arc<dyn ServerHandle>)
    }
}
