//! Inline flags for free-text commands.
//!
//! A flag is written as `.name` (on), `!name` (off) or `name:true` /
//! `name:false`. Only names passed as `valid` are recognized; every other
//! token is left in the text.

use std::collections::HashMap;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Arguments {
    flags: HashMap<String, bool>,
}

impl Arguments {
    pub fn get(&self, name: &str) -> Option<bool> {
        self.flags.get(name).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    fn set(&mut self, name: &str, value: bool) {
        self.flags.insert(name.to_owned(), value);
    }
}

enum Token<'t> {
    Flag(&'t str, Option<bool>),
    Text(&'t str),
}

fn classify<'t>(token: &'t str, valid: &[&str]) -> Token<'t> {
    if let Some(name) = token.strip_prefix('.').filter(|name| valid.contains(name)) {
        return Token::Flag(name, Some(true));
    }

    if let Some(name) = token.strip_prefix('!').filter(|name| valid.contains(name)) {
        return Token::Flag(name, Some(false));
    }

    if let Some((name, value)) = token.split_once(':').filter(|(name, _)| valid.contains(name)) {
        let value = match value {
            "true" | "True" => Some(true),
            "false" | "False" => Some(false),
            _ => None,
        };

        return Token::Flag(name, value);
    }

    Token::Text(token)
}

/// Splits `text` into the recognized flags and whatever is left over.
///
/// The leftover tokens keep their order and are joined with single spaces.
pub fn parse_arguments(text: &str, valid: &[&str]) -> (Arguments, String) {
    let mut arguments = Arguments::default();
    let mut rest = Vec::new();

    for token in text.split_whitespace() {
        match classify(token, valid) {
            Token::Flag(name, Some(value)) => arguments.set(name, value),
            Token::Flag(name, None) => {
                tracing::debug!(flag = name, token, "ignoring flag with non-boolean value")
            }
            Token::Text(text) => rest.push(text),
        }
    }

    (arguments, rest.join(" "))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::parse_arguments;

    const VALID: &[&str] = &["general", "owner", "all"];

    #[test]
    fn no_flags() {
        let (arguments, rest) = parse_arguments("  foo/bar   baz/qux ", VALID);

        assert!(arguments.is_empty());
        assert_eq!(rest, "foo/bar baz/qux");
    }

    #[test]
    fn dot_and_bang() {
        let (arguments, rest) = parse_arguments(".owner foo/bar !general", VALID);

        assert_eq!(arguments.get("owner"), Some(true));
        assert_eq!(arguments.get("general"), Some(false));
        assert_eq!(arguments.get("all"), None);
        assert_eq!(rest, "foo/bar");
    }

    #[test]
    fn key_value() {
        let (arguments, rest) = parse_arguments("all:true general:False foo/bar", VALID);

        assert_eq!(arguments.get("all"), Some(true));
        assert_eq!(arguments.get("general"), Some(false));
        assert_eq!(rest, "foo/bar");
    }

    #[test]
    #[tracing_test::traced_test]
    fn key_with_junk_value_is_dropped() {
        let (arguments, rest) = parse_arguments("owner:maybe foo/bar", VALID);

        assert_eq!(arguments.get("owner"), None);
        assert_eq!(rest, "foo/bar");
        assert!(logs_contain("ignoring flag with non-boolean value"));
    }

    #[test]
    fn unknown_flags_stay_in_text() {
        let (arguments, rest) = parse_arguments(".verbose foo/bar https://github.com/a/b", VALID);

        assert!(arguments.is_empty());
        assert_eq!(rest, ".verbose foo/bar https://github.com/a/b");
    }

    #[test]
    fn later_flag_wins() {
        let (arguments, rest) = parse_arguments(".owner !owner .owner", VALID);

        assert_eq!(arguments.get("owner"), Some(true));
        assert_eq!(rest, "");
    }
}
