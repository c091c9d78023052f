mod alert;
mod pandabroadcast;

use crate::commands::registry::CommandRegistry;

pub fn register_commands(registry: &mut CommandRegistry) {
    alert::register_commands(registry);
    pandabroadcast::register_commands(registry);
}
