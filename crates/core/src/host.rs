//! The surface of the proxy that the plugins talk to.
//!
//! The proxy owns players, servers and connections. Plugins only see them
//! through these traits, so the same code runs inside a real proxy, the
//! console host and the tests.

use pandabroadcast_text::Markup;
use std::sync::Arc;
use thiserror::Error;

/// Name used for command sources that are not players.
pub const CONSOLE_NAME: &str = "Console";

#[derive(Debug, Error)]
#[error("could not deliver message to {recipient}: {reason}")]
pub struct SendError {
    pub recipient: String,
    pub reason: String,
}

/// A connected player that can receive broadcasts.
pub trait Recipient: Send + Sync {
    fn name(&self) -> &str;

    fn has_permission(&self, node: &str) -> bool;

    fn send_message(&self, message: &Markup) -> Result<(), SendError>;
}

/// A backend server registered with the proxy.
pub trait ServerHandle: Send + Sync {
    fn name(&self) -> &str;

    fn connected_players(&self) -> Vec<Arc<dyn Recipient>>;
}

pub trait ServerRegistry: Send + Sync {
    /// Every registered server, in the proxy's enumeration order.
    fn all_servers(&self) -> Vec<Arc<dyn ServerHandle>>;

    /// Exact, case-sensitive lookup.
    fn server_by_name(&self, name: &str) -> Option<Arc<dyn ServerHandle>>;

    fn all_players(&self) -> Vec<Arc<dyn Recipient>> {
        self.all_servers()
            .iter()
            .flat_map(|server| server.connected_players())
            .collect()
    }
}

/// Whoever ran a command: a player or the console.
pub trait CommandSource {
    /// `None` for the console and other non-player sources.
    fn player_name(&self) -> Option<&str>;

    fn has_permission(&self, node: &str) -> bool;

    fn send_message(&self, message: Markup);

    fn display_name(&self) -> &str {
        self.player_name().unwrap_or(CONSOLE_NAME)
    }

    fn send_error_message(&self, message: &str) {
        self.send_message(Markup::tag(format!("<red>{message}")));
    }
}

/// The proxy console. It holds every permission and prints replies.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSource;

impl CommandSource for ConsoleSource {
    fn player_name(&self) -> Option<&str> {
        None
    }

    fn has_permission(&self, _node: &str) -> bool {
        true
    }

    fn send_message(&self, message: Markup) {
        println!("{}", message.to_plain_text());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::TargetError;
    use std::sync::Mutex;

    struct Capture(Mutex<Vec<Markup>>);

    impl CommandSource for Capture {
        fn player_name(&self) -> Option<&str> {
            None
        }

        fn has_permission(&self, _node: &str) -> bool {
            true
        }

        fn send_message(&self, message: Markup) {
            self.0.lock().unwrap().push(message);
        }
    }

    #[test]
    fn error_messages_are_red_and_not_prefixed_twice() {
        let source = Capture(Mutex::new(Vec::new()));
        source.send_error_message(&TargetError::NoValidServers.to_string());

        let sent = source.0.lock().unwrap();
        assert_eq!(sent[0], Markup::tag("<red>Error: No valid servers specified"));
        assert_eq!(sent[0].to_plain_text(), "Error: No valid servers specified");
        assert_eq!(source.display_name(), CONSOLE_NAME);
    }
}
