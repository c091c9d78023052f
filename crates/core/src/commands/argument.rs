use super::argument_parser::*;

#[derive(Clone, Debug)]
pub enum ArgumentType {
    String,
    GreedyString,
}

impl ArgumentType {
    pub(super) fn parse<'a>(&self, input: &'a str) -> ArgumentParseResult<'a> {
        match self {
            ArgumentType::String => parse_string(input),
            ArgumentType::GreedyString => parse_greedy_string(input),
        }
    }

    pub fn string() -> Self {
        ArgumentType::String
    }

    pub fn greedy_string() -> Self {
        ArgumentType::GreedyString
    }

    pub(super) fn is_greedy(&self) -> bool {
        matches!(self, ArgumentType::GreedyString)
    }
}
