use super::node::{CommandNode, NodeType};
use itertools::Itertools;

pub fn generate_usage(path: &[&CommandNode]) -> String {
    let mut parts: Vec<String> = path[1..].iter().map(|node| get_display_name(node)).collect();

    let current_node = path.last().unwrap();
    if !current_node.children.is_empty() {
        let alternatives = current_node
            .children
            .iter()
            .map(get_display_name)
            .join(" | ");
        let suffix = if current_node.has_executor() {
            format!("[{}]", alternatives)
        } else if current_node.children.len() > 1 {
            format!("({})", alternatives)
        } else {
            alternatives
        };
        parts.push(suffix);
    }

    format!("/{}", parts.join(" "))
}

fn get_display_name(node: &CommandNode) -> String {
    match &node.node_type {
        NodeType::Root => unreachable!(),
        NodeType::Literal { name } => name.clone(),
        NodeType::Argument { name, arg_type } if arg_type.is_greedy() => format!("<{}...>", name),
        NodeType::Argument { name, .. } => format!("<{}>", name),
    }
}
