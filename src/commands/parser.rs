//! Text command grammar
//!
//! `<prefix><word> <args>` where `<word>` is one of set/list/stop/help
//! (case-insensitive). `set` arguments must look like
//! `"<message>" <every|each> <N> <unit>`.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::Result;
use regex::Regex;
use std::borrow::Cow;

const DETAILS_PATTERN: &str = r#"^["'](.*?)["'] ([a-zA-Z]*) ([0-9]*) ([a-zA-Z]*)$"#;
const MENTION_PATTERN: &str = r"@([a-zA-Z0-9]*#[0-9]*)";

/// Raw `set` fields, not yet validated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetDetails {
    pub message: String,
    pub kind: String,
    pub time: String,
    pub units: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `None` when the arguments don't match the set grammar
    Set(Option<SetDetails>),
    List,
    /// Raw argument: an index or "all"
    Stop(String),
    Help,
    /// Any other word under the prefix
    Unknown(String),
}

#[derive(Debug, Clone)]
pub struct CommandParser {
    prefix: String,
    command_re: Regex,
    details_re: Regex,
    mention_re: Regex,
}

impl CommandParser {
    pub fn new(prefix: &str) -> Result<Self> {
        let command_re = Regex::new(&format!(r"^{}([a-zA-Z]*) ?(.*)$", regex::escape(prefix)))?;
        Ok(Self {
            prefix: prefix.to_string(),
            command_re,
            details_re: Regex::new(DETAILS_PATTERN)?,
            mention_re: Regex::new(MENTION_PATTERN)?,
        })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Parse message text. Returns `None` for anything that isn't a command.
    pub fn parse(&self, text: &str) -> Option<Command> {
        let caps = self.command_re.captures(text)?;
        let word = caps.get(1).map_or("", |m| m.as_str()).to_lowercase();
        let args = caps.get(2).map_or("", |m| m.as_str());

        let command = match word.as_str() {
            "set" => Command::Set(self.parse_set_details(args)),
            "list" => Command::List,
            "stop" => Command::Stop(args.to_string()),
            "help" => Command::Help,
            _ => Command::Unknown(word),
        };
        Some(command)
    }

    fn parse_set_details(&self, args: &str) -> Option<SetDetails> {
        let normalized = self.strip_mention(args);
        let caps = self.details_re.captures(&normalized)?;
        let field = |i: usize| caps.get(i).map_or("", |m| m.as_str()).to_string();
        Some(SetDetails {
            message: field(1),
            kind: field(2),
            time: field(3),
            units: field(4),
        })
    }

    /// Rewrite the first `@name#1234` mention to `name#1234`
    pub fn strip_mention<'a>(&self, args: &'a str) -> Cow<'a, str> {
        self.mention_re.replacen(args, 1, "$1")
    }
}
