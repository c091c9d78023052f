use crate::broadcast_log::BroadcastLog;
use crate::config::{BroadcastConfig, ConfigError, ConfigStore};
use crate::dispatch::{BroadcastCounter, BroadcastDispatcher};
use crate::format::FormattedMessage;
use crate::host::{Recipient, ServerRegistry};
use crate::plugin::PluginContext;
use crate::target::{self, TargetError};
use std::sync::Arc;

pub const BROADCAST_PERMISSION: &str = "pandabroadcast.broadcast";
pub const RELOAD_PERMISSION: &str = "pandabroadcast.reload";

/// Targeted broadcasts with configurable formatting and a file log.
pub struct PandaBroadcast {
    servers: Arc<dyn ServerRegistry>,
    config: ConfigStore,
    dispatcher: BroadcastDispatcher,
}

impl PandaBroadcast {
    pub fn new(context: &PluginContext) -> PandaBroadcast {
        let config = ConfigStore::open(context.data_directory.clone());
        let log = BroadcastLog::in_directory(config.data_directory());
        PandaBroadcast {
            servers: context.servers.clone(),
            config,
            dispatcher: BroadcastDispatcher::new(Arc::new(BroadcastCounter::new()), log),
        }
    }

    /// Resolves `args`, formats the message and delivers it.
    ///
    /// `sender` is the name written to the log. Returns the number of
    /// broadcasts counted.
    pub fn broadcast<S: AsRef<str>>(&self, sender: &str, args: &[S]) -> Result<u64, TargetError> {
        let config = self.config.snapshot();
        let resolution = target::resolve(args, &config, self.servers.as_ref())?;
        let formatted =
            FormattedMessage::new(&config, &resolution.message, resolution.targets.names());

        let scope_permission_only = config.scope_permission_only;
        Ok(self.dispatcher.dispatch(
            &config,
            sender,
            &resolution.message,
            &resolution.targets,
            &formatted,
            |recipient: &dyn Recipient| {
                !scope_permission_only || recipient.has_permission(BROADCAST_PERMISSION)
            },
        ))
    }

    pub fn reload(&self) -> Result<Arc<BroadcastConfig>, ConfigError> {
        self.config.reload()
    }

    pub fn config(&self) -> Arc<BroadcastConfig> {
        self.config.snapshot()
    }

    pub fn counter(&self) -> Arc<BroadcastCounter> {
        self.dispatcher.counter().clone()
    }

    pub fn total_broadcasts(&self) -> u64 {
        self.dispatcher.counter().get()
    }
}
