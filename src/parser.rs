use thiserror::Error;
use tracing::trace;

use crate::ast::{Command, CommandKind};

/// Token separators: space, tab, CR, LF, vertical tab, form feed.
const DELIMITERS: &[char] = &[' ', '\t', '\r', '\n', '\x0b', '\x0c'];

pub const NULL_DEVICE: &str = "/dev/null";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("syntax error: expected a file name after '{0}'")]
    MissingRedirectTarget(char),
    #[error("syntax error: no command to run")]
    EmptyCommand,
}

/// Splits a line into a [`Command`].
///
/// Operators are only recognized as free-standing tokens, so `cmd>out` is a
/// single word.
#[derive(Debug, Clone)]
pub struct LineParser {
    null_device: String,
}

impl Default for LineParser {
    fn default() -> Self {
        LineParser::new(NULL_DEVICE)
    }
}

impl LineParser {
    pub fn new(null_device: impl Into<String>) -> Self {
        LineParser { null_device: null_device.into() }
    }

    pub fn parse(&self, line: &str) -> Result<Command, ParseError> {
        if line.starts_with('#') {
            return Ok(Command::comment());
        }

        let mut parts = line.split(DELIMITERS).filter(|t| !t.is_empty()).peekable();
        if parts.peek().is_none() {
            return Ok(Command::blank());
        }

        let mut args: Vec<String> = Vec::new();
        let mut input = None;
        let mut output = None;

        while let Some(token) = parts.next() {
            match token {
                "<" => {
                    let file = parts.next().ok_or(ParseError::MissingRedirectTarget('<'))?;
                    input = Some(file.to_string());
                }
                ">" => {
                    let file = parts.next().ok_or(ParseError::MissingRedirectTarget('>'))?;
                    output = Some(file.to_string());
                }
                _ => args.push(token.to_string()),
            }
        }

        let mut background = false;
        if args.last().is_some_and(|last| last == "&") {
            args.pop();
            background = true;
            input.get_or_insert_with(|| self.null_device.clone());
            output.get_or_insert_with(|| self.null_device.clone());
        }

        let name = args.first().cloned().ok_or(ParseError::EmptyCommand)?;
        let cmd = Command {
            kind: CommandKind::Simple,
            name,
            args,
            input,
            output,
            background,
        };
        trace!(?cmd, "parsed line");
        Ok(cmd)
    }
}

/// Parses with the default null device.
pub fn parse_line(line: &str) -> Result<Command, ParseError> {
    LineParser::default().parse(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_simple_command() {
        let cmd = parse_line("ls -la\n").unwrap();
        assert_eq!(cmd.kind, CommandKind::Simple);
        assert_eq!(cmd.name, "ls");
        assert_eq!(cmd.args, strings(&["ls", "-la"]));
        assert_eq!(cmd.input, None);
        assert_eq!(cmd.output, None);
        assert!(!cmd.background);
    }

    #[test]
    fn test_redirects_and_background() {
        let cmd = parse_line("sort < in.txt > out.txt &\n").unwrap();
        assert_eq!(cmd.name, "sort");
        assert_eq!(cmd.args, strings(&["sort"]));
        assert_eq!(cmd.input.as_deref(), Some("in.txt"));
        assert_eq!(cmd.output.as_deref(), Some("out.txt"));
        assert!(cmd.background);
    }

    #[test]
    fn test_background_defaults_to_null_device() {
        let cmd = parse_line("sleep 5 &\n").unwrap();
        assert_eq!(cmd.args, strings(&["sleep", "5"]));
        assert_eq!(cmd.input.as_deref(), Some(NULL_DEVICE));
        assert_eq!(cmd.output.as_deref(), Some(NULL_DEVICE));
    }

    #[test]
    fn test_background_keeps_explicit_output() {
        let cmd = parse_line("ls > listing &").unwrap();
        assert_eq!(cmd.input.as_deref(), Some(NULL_DEVICE));
        assert_eq!(cmd.output.as_deref(), Some("listing"));
    }

    #[test]
    fn test_custom_null_device() {
        let cmd = LineParser::new("/tmp/sink").parse("true &").unwrap();
        assert_eq!(cmd.output.as_deref(), Some("/tmp/sink"));
    }

    #[test]
    fn test_foreground_has_no_default_redirects() {
        let cmd = parse_line("cat\n").unwrap();
        assert_eq!(cmd.input, None);
        assert_eq!(cmd.output, None);
    }

    #[test]
    fn test_ampersand_not_last_is_an_argument() {
        let cmd = parse_line("echo & done\n").unwrap();
        assert_eq!(cmd.args, strings(&["echo", "&", "done"]));
        assert!(!cmd.background);
    }

    #[test]
    fn test_blank_and_comment() {
        assert_eq!(parse_line("\n").unwrap().kind, CommandKind::Blank);
        assert_eq!(parse_line("").unwrap().kind, CommandKind::Blank);
        assert_eq!(parse_line(" \t \n").unwrap().kind, CommandKind::Blank);
        assert_eq!(parse_line("# comment\n").unwrap().kind, CommandKind::Comment);
    }

    #[test]
    fn test_hash_after_space_is_not_a_comment() {
        let cmd = parse_line(" #x\n").unwrap();
        assert_eq!(cmd.kind, CommandKind::Simple);
        assert_eq!(cmd.name, "#x");
    }

    #[test]
    fn test_operators_need_whitespace() {
        let cmd = parse_line("echo hi>out\n").unwrap();
        assert_eq!(cmd.args, strings(&["echo", "hi>out"]));
        assert_eq!(cmd.output, None);
    }

    #[test]
    fn test_all_delimiters_split() {
        let cmd = parse_line("a\tb\x0bc\x0cd\r\n").unwrap();
        assert_eq!(cmd.args, strings(&["a", "b", "c", "d"]));
    }

    #[test]
    fn test_dangling_redirect_is_rejected() {
        assert_eq!(parse_line("cat <\n"), Err(ParseError::MissingRedirectTarget('<')));
        assert_eq!(parse_line("ls >"), Err(ParseError::MissingRedirectTarget('>')));
    }

    #[test]
    fn test_line_without_program_is_rejected() {
        assert_eq!(parse_line("&\n"), Err(ParseError::EmptyCommand));
        assert_eq!(parse_line("< in.txt\n"), Err(ParseError::EmptyCommand));
    }

    #[test]
    fn test_leading_redirect_then_program() {
        let cmd = parse_line("< in.txt wc -l\n").unwrap();
        assert_eq!(cmd.name, "wc");
        assert_eq!(cmd.args, strings(&["wc", "-l"]));
        assert_eq!(cmd.input.as_deref(), Some("in.txt"));
    }
}
