use crate::commands::value::Value;

pub type ArgumentParseResult<'a> = Result<(Value, &'a str), ()>;

fn skip_whitespace(input: &str) -> &str {
    input.trim_start()
}

pub fn consume_token(input: &str) -> Option<(&str, &str)> {
    let input = skip_whitespace(input);
    if input.is_empty() {
        return None;
    }

    let end = input.find(char::is_whitespace).unwrap_or(input.len());

    Some((&input[..end], &input[end..]))
}

pub fn parse_string(input: &str) -> ArgumentParseResult<'_> {
    let input = skip_whitespace(input);
    if let Some((token, rest)) = consume_token(input) {
        Ok((Value::String(token.to_string()), rest))
    } else {
        Err(())
    }
}

pub fn parse_greedy_string(input: &str) -> ArgumentParseResult<'_> {
    let input = skip_whitespace(input);
    Ok((Value::GreedyString(input.to_string()), ""))
}

/// Splits the remainder of a command line into space separated arguments.
/// Runs of spaces produce empty arguments so that joining with `" "` gives
/// the input back. Empty input has no arguments.
pub fn split_arguments(input: &str) -> Vec<String> {
    if input.is_empty() {
        return Vec::new();
    }
    input.split(' ').map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consume_token_skips_leading_whitespace() {
        assert_eq!(consume_token("  reload now"), Some(("reload", " now")));
        assert_eq!(consume_token("   "), None);
    }

    #[test]
    fn greedy_takes_everything() {
        let (value, rest) = parse_greedy_string("  a,b  hello  ").unwrap();
        assert_eq!(value.as_greedy().unwrap(), "a,b  hello  ");
        assert_eq!(rest, "");
    }

    #[test]
    fn split_arguments_round_trips_spacing() {
        assert!(split_arguments("").is_empty());
        assert_eq!(split_arguments("lobby,pvp hi"), ["lobby,pvp", "hi"]);
        assert_eq!(split_arguments("a  b"), ["a", "", "b"]);
        assert_eq!(split_arguments("a  b").join(" "), "a  b");
    }
}
