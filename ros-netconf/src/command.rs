//! RouterOS command representation, rendering and tokenizing.
//!
//! Commands render to a single line, `<path> [key=value ...]`, with free-text
//! values double-quoted. A mapping with no device equivalent renders as a
//! sentinel line starting with [`UNSUPPORTED_MARKER`]; executors must skip
//! those instead of sending them.

use std::fmt::{self, Display, Formatter};

/// Prefix identifying a sentinel (non-executable) command line.
pub const UNSUPPORTED_MARKER: &str = "UNSUPPORTED:";

/// One entry of a translated command sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// A command the device can execute.
    Exec(ApiCommand),
    /// A requested mapping the device has no equivalent for.
    Unsupported { reason: String },
}

/// A RouterOS menu path and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiCommand {
    pub path: String,
    pub args: Vec<Arg>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    /// `key=value`; `quoted` forces double quotes around the value.
    Pair {
        key: String,
        value: String,
        quoted: bool,
    },
    /// A bare word such as `[find]`.
    Word(String),
}

impl Command {
    pub fn exec(path: impl Into<String>) -> ApiCommand {
        ApiCommand {
            path: path.into(),
            args: Vec::new(),
        }
    }

    pub fn unsupported(reason: impl Into<String>) -> Self {
        Self::Unsupported {
            reason: reason.into(),
        }
    }

    /// Parse a rendered command line back into a command.
    ///
    /// Sentinel lines become [`Command::Unsupported`]; anything else is
    /// tokenized with [`tokenize`]. Returns `None` for a blank line.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if let Some(reason) = line.strip_prefix(UNSUPPORTED_MARKER) {
            return Some(Self::unsupported(reason.trim()));
        }

        let mut tokens = tokenize(line).into_iter();
        let path = tokens.next()?;
        let args = tokens
            .map(|token| match token.split_once('=') {
                Some((key, value)) => Arg::pair(key, value),
                None => Arg::Word(token),
            })
            .collect();
        Some(Self::Exec(ApiCommand { path, args }))
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }

    pub fn as_exec(&self) -> Option<&ApiCommand> {
        match self {
            Self::Exec(cmd) => Some(cmd),
            Self::Unsupported { .. } => None,
        }
    }
}

impl From<ApiCommand> for Command {
    fn from(cmd: ApiCommand) -> Self {
        Self::Exec(cmd)
    }
}

impl ApiCommand {
    /// Append `key=value`, quoting only when the value needs it.
    pub fn arg(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.args.push(Arg::pair(key, value));
        self
    }

    /// Append `key="value"`, always quoted.
    pub fn quoted_arg(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.args.push(Arg::Pair {
            key: key.into(),
            value: value.into(),
            quoted: true,
        });
        self
    }

    pub fn word(mut self, word: impl Into<String>) -> Self {
        self.args.push(Arg::Word(word.into()));
        self
    }

    /// Words for the RouterOS API sentence: the path, then `=key=value`
    /// attribute words. Bare words are passed through unchanged.
    pub fn api_words(&self) -> Vec<String> {
        let mut words = Vec::with_capacity(self.args.len() + 1);
        words.push(self.path.clone());
        for arg in &self.args {
            words.push(match arg {
                Arg::Pair { key, value, .. } => format!("={key}={value}"),
                Arg::Word(word) => word.clone(),
            });
        }
        words
    }
}

impl Arg {
    fn pair(key: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        let quoted = needs_quotes(&value);
        Self::Pair {
            key: key.into(),
            value,
            quoted,
        }
    }
}

impl Display for Command {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exec(cmd) => write!(f, "{cmd}"),
            Self::Unsupported { reason } => write!(f, "{UNSUPPORTED_MARKER} {reason}"),
        }
    }
}

impl Display for ApiCommand {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path)?;
        for arg in &self.args {
            match arg {
                Arg::Pair {
                    key,
                    value,
                    quoted: true,
                } => write!(f, " {key}=\"{}\"", escape(value))?,
                Arg::Pair { key, value, .. } => write!(f, " {key}={value}")?,
                Arg::Word(word) => write!(f, " {word}")?,
            }
        }
        Ok(())
    }
}

fn needs_quotes(value: &str) -> bool {
    value.is_empty() || value.contains([' ', '"', '\\', '\t'])
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Split a command line on spaces, keeping double-quoted segments together.
///
/// Quotes delimit but are not part of the token. Inside quotes a backslash
/// escapes the next character.
pub fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut pending = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                pending = true;
            }
            '\\' if in_quotes => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            ' ' | '\t' if !in_quotes => {
                if pending || !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
                pending = false;
            }
            _ => current.push(c),
        }
    }
    if pending || !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{tokenize, Command};

    #[test]
    fn quoted_values_are_escaped() {
        let cmd = Command::exec("/system/identity/set").quoted_arg("name", r#"core "west""#);
        assert_eq!(
            cmd.to_string(),
            r#"/system/identity/set name="core \"west\"""#
        );
    }

    #[test]
    fn plain_values_stay_bare() {
        let cmd = Command::exec("/ip/dns/set").arg("servers", "8.8.8.8,8.8.4.4");
        assert_eq!(cmd.to_string(), "/ip/dns/set servers=8.8.8.8,8.8.4.4");
    }

    #[test]
    fn tokenize_strips_quotes_and_keeps_spaces_inside() {
        assert_eq!(
            tokenize(r#"/system/identity/set name="router 1""#),
            vec!["/system/identity/set", "name=router 1"]
        );
    }

    #[test]
    fn tokenize_collapses_repeated_spaces_and_keeps_empty_quotes() {
        assert_eq!(
            tokenize(r#"/a/b   x=1  y="""#),
            vec!["/a/b", "x=1", "y="]
        );
    }

    #[test]
    fn tokenize_unescapes_inside_quotes() {
        assert_eq!(
            tokenize(r#"/a name="say \"hi\" \\o/""#),
            vec!["/a", r#"name=say "hi" \o/"#]
        );
    }

    #[test]
    fn parse_round_trips_rendered_commands() {
        let original: Command = Command::exec("/system/clock/set")
            .quoted_arg("time-zone-name", "Europe/London")
            .into();
        let parsed = Command::parse(&original.to_string()).expect("command");

        assert_eq!(
            parsed.as_exec().expect("exec").api_words(),
            vec!["/system/clock/set", "=time-zone-name=Europe/London"]
        );
    }

    #[test]
    fn parse_recognizes_sentinel_lines() {
        let parsed = Command::parse("UNSUPPORTED: no equivalent").expect("command");
        assert!(parsed.is_unsupported());
        assert_eq!(parsed.to_string(), "UNSUPPORTED: no equivalent");
    }

    #[test]
    fn bare_words_pass_through_to_api() {
        let cmd = Command::exec("/ip/address/remove").word("[find]");
        assert_eq!(cmd.api_words(), vec!["/ip/address/remove", "[find]"]);
        assert_eq!(Command::parse("   "), None);
    }
}
