//! Slash commands typed in a room.

use regex::Regex;
use std::sync::OnceLock;

static COMMAND: OnceLock<Regex> = OnceLock::new();

fn command_pattern() -> &'static Regex {
    COMMAND.get_or_init(|| {
        Regex::new(r"^\s*/(play|stop)(?:\s+(.+?))?\s*$").expect("command pattern is valid")
    })
}

/// A command the bot understands.
///
/// # Examples
///
/// ```
/// use cinema_server::Command;
///
/// assert_eq!(
///     Command::parse("/play hackers"),
///     Some(Command::Play("hackers".to_string()))
/// );
/// assert_eq!(Command::parse("/stop"), Some(Command::Stop));
/// assert_eq!(Command::parse("hello"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Command {
    /// Start a movie; the identifier may be empty
    #[display("play {}", _0)]
    Play(String),
    /// Stop the current movie
    #[display("stop")]
    Stop,
}

impl Command {
    /// Parse a chat message, `None` if it is not a command.
    pub fn parse(message: &str) -> Option<Self> {
        let captures = command_pattern().captures(message)?;
        let argument = captures
            .get(2)
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default();

        match captures.get(1)?.as_str() {
            "play" => Some(Self::Play(argument)),
            "stop" => Some(Self::Stop),
            _ => None,
        }
    }
}
