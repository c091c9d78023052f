//! The two proxy plugins and the services they share with the commands.

pub mod alert;
pub mod pandabroadcast;

pub use alert::Alert;
pub use pandabroadcast::PandaBroadcast;

use crate::host::ServerRegistry;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// What the proxy hands a plugin when it is loaded.
#[derive(Clone)]
pub struct PluginContext {
    pub servers: Arc<dyn ServerRegistry>,
    /// Where PandaBroadcast keeps `config.yml` and `broadcasts.log`.
    pub data_directory: PathBuf,
}

pub struct Plugins {
    pub alert: Alert,
    pub pandabroadcast: PandaBroadcast,
}

impl Plugins {
    pub fn load(context: &PluginContext) -> Plugins {
        let alert = Alert::new(context.servers.clone());
        info!("Alert plugin loaded!");

        let pandabroadcast = PandaBroadcast::new(context);
        info!("PandaBroadcast plugin loaded!");

        Plugins {
            alert,
            pandabroadcast,
        }
    }
}
