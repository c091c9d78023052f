use crate::commands::{argument::ArgumentType, context::ExecutionContext, error::CommandResult};

pub type Executor = fn(&mut ExecutionContext<'_>) -> CommandResult<()>;

#[derive(Clone)]
pub struct CommandNode {
    pub(super) node_type: NodeType,
    pub(super) children: Vec<CommandNode>,
    pub(super) executor: Option<Executor>,
    pub(super) permissions: Vec<String>,
}

#[derive(Clone)]
pub enum NodeType {
    Root,
    Literal { name: String },
    Argument { name: String, arg_type: ArgumentType },
}

impl CommandNode {
    fn new(node_type: NodeType) -> Self {
        Self {
            node_type,
            children: Vec::new(),
            executor: None,
            permissions: Vec::new(),
        }
    }

    pub fn root() -> Self {
        Self::new(NodeType::Root)
    }

    pub fn literal(name: impl Into<String>) -> Self {
        Self::new(NodeType::Literal { name: name.into() })
    }

    pub fn argument(name: impl Into<String>, arg_type: impl Into<ArgumentType>) -> Self {
        Self::new(NodeType::Argument {
            name: name.into(),
            arg_type: arg_type.into(),
        })
    }

    pub fn then(mut self, child: CommandNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn executes(mut self, executor: Executor) -> Self {
        self.executor = Some(executor);
        self
    }

    pub fn require_permission(mut self, permission: impl Into<String>) -> Self {
        self.permissions.push(permission.into());
        self
    }

    pub(super) fn has_executor(&self) -> bool {
        self.executor.is_some()
    }

    /// The literal name, if this is a literal node.
    pub fn literal_name(&self) -> Option<&str> {
        match &self.node_type {
            NodeType::Literal { name } => Some(name),
            _ => None,
        }
    }
}
