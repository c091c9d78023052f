#![allow(dead_code)]

use pandabroadcast_core::commands::CommandRegistry;
use pandabroadcast_core::host::{CommandSource, Recipient, SendError, ServerHandle, ServerRegistry};
use pandabroadcast_core::plugin::{PluginContext, Plugins};
use pandabroadcast_text::Markup;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

pub struct TestPlayer {
    name: String,
    permissions: Vec<String>,
    offline: bool,
    inbox: Mutex<Vec<Markup>>,
}

impl TestPlayer {
    pub fn new(name: &str) -> Arc<TestPlayer> {
        Self::with_permissions(name, &[])
    }

    pub fn with_permissions(name: &str, permissions: &[&str]) -> Arc<TestPlayer> {
        Arc::new(TestPlayer {
            name: name.to_string(),
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
            offline: false,
            inbox: Mutex::new(Vec::new()),
        })
    }

    /// A player whose connection drops every message.
    pub fn offline(name: &str) -> Arc<TestPlayer> {
        Arc::new(TestPlayer {
            name: name.to_string(),
            permissions: Vec::new(),
            offline: true,
            inbox: Mutex::new(Vec::new()),
        })
    }

    pub fn received(&self) -> Vec<Markup> {
        self.inbox.lock().unwrap().clone()
    }

    pub fn received_text(&self) -> Vec<String> {
        self.received()
            .iter()
            .map(|markup| markup.as_str().to_string())
            .collect()
    }
}

impl Recipient for TestPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn has_permission(&self, node: &str) -> bool {
        self.permissions.iter().any(|p| p == node)
    }

    fn send_message(&self, message: &Markup) -> Result<(), SendError> {
        if self.offline {
            return Err(SendError {
                recipient: self.name.clone(),
                reason: "disconnected".to_string(),
            });
        }
        self.inbox.lock().unwrap().push(message.clone());
        Ok(())
    }
}

pub struct TestServer {
    name: String,
    players: Vec<Arc<TestPlayer>>,
}

impl ServerHandle for TestServer {
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

#[derive(Default)]
pub struct TestProxy {
    servers: Vec<Arc<TestServer>>,
}

impl TestProxy {
    pub fn new() -> TestProxy {
        TestProxy::default()
    }

    pub fn server(mut self, name: &str, players: &[&Arc<TestPlayer>]) -> TestProxy {
        self.servers.push(Arc::new(TestServer {
            name: name.to_string(),
            players: players.iter().map(|player| Arc::clone(player)).collect(),
        }));
        self
    }
}

impl ServerRegistry for TestProxy {
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

/// A command sender that records every reply.
pub struct TestSource {
    name: Option<String>,
    permissions: Vec<String>,
    replies: Mutex<Vec<String>>,
}

impl TestSource {
    pub fn console() -> TestSource {
        TestSource {
            name: None,
            permissions: vec!["*".to_string()],
            replies: Mutex::new(Vec::new()),
        }
    }

    pub fn player(name: &str, permissions: &[&str]) -> TestSource {
        TestSource {
            name: Some(name.to_string()),
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
            replies: Mutex::new(Vec::new()),
        }
    }

    pub fn replies(&self) -> Vec<String> {
        self.replies.lock().unwrap().clone()
    }
}

impl CommandSource for TestSource {
    fn player_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn has_permission(&self, node: &str) -> bool {
        self.permissions.iter().any(|p| p == "*" || p == node)
    }

    fn send_message(&self, message: Markup) {
        self.replies
            .lock()
            .unwrap()
            .push(message.as_str().to_string());
    }
}

/// Plugins loaded against a [`TestProxy`] with a temporary data directory.
pub struct Harness {
    pub dir: TempDir,
    pub plugins: Plugins,
    pub commands: CommandRegistry,
}

impl Harness {
    pub fn new(proxy: TestProxy) -> Harness {
        Self::with_config(proxy, None)
    }

    /// `config` is written to `config.yml` before the plugins load.
    pub fn with_config(proxy: TestProxy, config: Option<&str>) -> Harness {
        let dir = tempfile::tempdir().unwrap();
        if let Some(config) = config {
            std::fs::write(dir.path().join("config.yml"), config).unwrap();
        }
        let context = PluginContext {
            servers: Arc::new(proxy),
            data_directory: dir.path().to_path_buf(),
        };
        Harness {
            plugins: Plugins::load(&context),
            commands: CommandRegistry::with_builtin_commands(),
            dir,
        }
    }

    pub fn run(&self, source: &TestSource, command_line: &str) {
        self.commands
            .execute(&self.plugins, source, command_line)
            .unwrap();
    }

    pub fn data_dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn log_lines(&self) -> Vec<String> {
        std::fs::read_to_string(self.data_dir().join("broadcasts.log"))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

pub const BASE: &str = "<gold>» <yellow>Broadcast<gold> « <gray>";
