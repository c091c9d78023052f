use super::{builtin, node::CommandNode};

pub struct CommandRegistry {
    root: CommandNode,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            root: CommandNode::root(),
        }
    }

    /// A registry holding `/vbroadcast`, `/broadcast` and `/pandabroadcast`.
    pub fn with_builtin_commands() -> Self {
        let mut registry = Self::new();
        builtin::register_commands(&mut registry);
        registry
    }

    pub fn register(&mut self, command: CommandNode) {
        self.root.children.push(command);
    }

    pub fn get_root(&self) -> &CommandNode {
        &self.root
    }

    pub fn command_names(&self) -> Vec<&str> {
        self.root
            .children
            .iter()
            .filter_map(CommandNode::literal_name)
            .collect()
    }
}
