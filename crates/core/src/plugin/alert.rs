use crate::host::ServerRegistry;
use pandabroadcast_text::Markup;
use std::sync::Arc;
use tracing::{debug, info};

pub const BROADCAST_PERMISSION: &str = "alert.broadcast";

const PREFIX: &str = "<gold>» <bold><yellow>Broadcast</yellow></bold> <gold>«</gold> <gray>";

/// Proxy-wide announcements with a fixed header.
pub struct Alert {
    servers: Arc<dyn ServerRegistry>,
}

impl Alert {
    pub fn new(servers: Arc<dyn ServerRegistry>) -> Alert {
        Alert { servers }
    }

    pub fn format(message: &str) -> Markup {
        Markup::tag(format!("{PREFIX}{message}"))
    }

    /// Sends `message` to every connected player and returns how many got it.
    pub fn broadcast(&self, message: &str) -> usize {
        let markup = Self::format(message);
        let mut delivered = 0;
        for player in self.servers.all_players() {
            match player.send_message(&markup) {
                Ok(()) => delivered += 1,
                Err(err) => debug!("{}", err),
            }
        }
        info!("[Broadcast] {}", message);
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_precedes_message() {
        assert_eq!(
            Alert::format("Restart in 5").as_str(),
            "<gold>» <bold><yellow>Broadcast</yellow></bold> <gold>«</gold> <gray>Restart in 5"
        );
    }
}
