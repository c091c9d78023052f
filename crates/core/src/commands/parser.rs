use crate::commands::{
    argument_parser,
    node::{CommandNode, NodeType},
    value::Value,
};

pub enum ParseResult<'a> {
    Success {
        node: &'a CommandNode,
        arguments: Vec<(String, Value)>,
        path: Vec<&'a CommandNode>,
    },
    Partial {
        path: Vec<&'a CommandNode>,
    },
    TooManyArguments {
        path: Vec<&'a CommandNode>,
        remaining: String,
    },
    InvalidArgument {
        path: Vec<&'a CommandNode>,
        remaining: String,
    },
    NothingMatched,
}

pub(super) fn parse<'a>(root: &'a CommandNode, input: &str) -> ParseResult<'a> {
    let mut remaining_input = input;
    let mut path: Vec<&'a CommandNode> = vec![root];
    let mut arguments: Vec<(String, Value)> = Vec::new();

    while parse_next(&mut path, &mut arguments, &mut remaining_input) {}

    let final_node = *path.last().unwrap();

    if matches!(final_node.node_type, NodeType::Root) {
        return ParseResult::NothingMatched;
    }

    let remainder = remaining_input.trim_start();

    if !remainder.is_empty() {
        if final_node.has_executor() && final_node.children.is_empty() {
            ParseResult::TooManyArguments {
                path,
                remaining: remainder.to_string(),
            }
        } else {
            ParseResult::InvalidArgument {
                path,
                remaining: remainder.to_string(),
            }
        }
    } else if final_node.has_executor() {
        ParseResult::Success {
            node: final_node,
            arguments,
            path,
        }
    } else {
        ParseResult::Partial { path }
    }
}

fn parse_next(
    path: &mut Vec<&CommandNode>,
    arguments: &mut Vec<(String, Value)>,
    remaining_input: &mut &str,
) -> bool {
    let current_node = path.last().unwrap();

    for child in &current_node.children {
        match &child.node_type {
            NodeType::Root => continue,

            NodeType::Literal { name } => {
                let Some((token, rest)) = argument_parser::consume_token(remaining_input) else {
                    continue;
                };

                if token.eq_ignore_ascii_case(name) {
                    path.push(child);
                    *remaining_input = rest;
                    return true;
                }
            }

            NodeType::Argument { name, arg_type } => {
                if let Ok((value, rest)) = arg_type.parse(remaining_input) {
                    path.push(child);
                    arguments.push((name.clone(), value));
                    *remaining_input = rest;
                    return true;
                }
            }
        }
    }

    false
}
