use crate::broadcast_log::{BroadcastLog, LogEntry};
use crate::config::BroadcastConfig;
use crate::format::FormattedMessage;
use crate::host::Recipient;
use crate::target::TargetSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info, warn};

/// Number of broadcasts sent since startup.
#[derive(Debug, Default)]
pub struct BroadcastCounter {
    total: AtomicU64,
}

impl BroadcastCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the new total.
    pub fn increment(&self) -> u64 {
        self.total.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn get(&self) -> u64 {
        self.total.load(Ordering::Relaxed)
    }
}

pub struct BroadcastDispatcher {
    counter: Arc<BroadcastCounter>,
    log: BroadcastLog,
}

impl BroadcastDispatcher {
    pub fn new(counter: Arc<BroadcastCounter>, log: BroadcastLog) -> Self {
        BroadcastDispatcher { counter, log }
    }

    pub fn counter(&self) -> &Arc<BroadcastCounter> {
        &self.counter
    }

    pub fn log(&self) -> &BroadcastLog {
        &self.log
    }

    /// Sends `formatted` to every player on every target server.
    ///
    /// A player on two listed servers gets the message twice. Players for
    /// which `can_see_scope` is true get the scoped variant. Failed sends are
    /// skipped. Counts as one broadcast even when nobody was reached; the
    /// return value is the number of broadcasts counted.
    pub fn dispatch<F>(
        &self,
        config: &BroadcastConfig,
        sender: &str,
        message: &str,
        targets: &TargetSet,
        formatted: &FormattedMessage,
        can_see_scope: F,
    ) -> u64
    where
        F: Fn(&dyn Recipient) -> bool,
    {
        let mut delivered = 0usize;
        for server in targets.servers() {
            for player in server.connected_players() {
                let markup = formatted.select(can_see_scope(player.as_ref()));
                match player.send_message(&markup) {
                    Ok(()) => delivered += 1,
                    Err(err) => debug!("{}", err),
                }
            }
        }

        self.counter.increment();

        let entry = LogEntry::new(sender, message, targets.names());
        if config.logging_enabled {
            if let Err(err) = self.log.append(&entry, &config.log_format) {
                warn!(
                    "Failed to write to {}: {}",
                    self.log.path().display(),
                    err
                );
            }
        }

        info!("[Broadcast] {}", entry.describe());
        debug!("Broadcast from {} reached {} players", sender, delivered);
        1
    }
}
