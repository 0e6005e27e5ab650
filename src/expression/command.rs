//! Command nodes and the built-in command table.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{EnumIter as EnumIterMacro, IntoStaticStr};

use crate::config::TOKEN_LITERAL;

/// Built-in commands understood by the interpreter.
///
/// The discriminant is the command's token as stored in [`EncodedCmd`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro, IntoStaticStr, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Command {
    /// `random(min, max)`: uniform integer in the inclusive range
    Random = 1,
    /// `time(format)`: current time rendered with a keyword or pattern
    Time = 2,
    /// `url()`: the "any URL" placeholder
    Url = 3,
}

impl Command {
    /// Token stored in parsed nodes for this command.
    pub fn token(self) -> i32 {
        self as i32
    }

    /// Canonical command name.
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Maps a node token back to its command, if it names one.
    pub fn from_token(token: i32) -> Option<Self> {
        Command::iter().find(|c| c.token() == token)
    }
}

/// Name to command lookup used by the parser.
///
/// Starts out with every built-in under its canonical name. Extra names can
/// be registered as aliases of existing commands.
#[derive(Debug, Clone)]
pub struct CommandTable {
    names: HashMap<String, Command>,
}

impl Default for CommandTable {
    fn default() -> Self {
        let names = Command::iter()
            .map(|command| (command.name().to_string(), command))
            .collect();
        Self { names }
    }
}

impl CommandTable {
    /// Registers `name` for `command`, returning the command it previously
    /// mapped to.
    pub fn register(&mut self, name: impl Into<String>, command: Command) -> Option<Command> {
        self.names.insert(name.into(), command)
    }

    /// Looks up a bare command name (case-sensitive).
    pub fn lookup(&self, name: &str) -> Option<Command> {
        self.names.get(name).copied()
    }

    /// Resolves the identifier in front of the first `(` of `text`.
    pub(crate) fn resolve(&self, text: &str) -> Option<Command> {
        let name = text.split('(').next().unwrap_or_default().trim();
        self.lookup(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.names.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// A node of a parsed command tree.
///
/// Literal nodes carry `token == -1`, no arguments and their trimmed text in
/// `arg_value`. Command nodes carry the command token and their arguments;
/// a command node used as an argument of another command also keeps its
/// original text in `arg_value`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EncodedCmd {
    /// Command token, or `-1` for literals
    pub token: i32,
    /// Ordered arguments
    #[serde(default)]
    pub args: Vec<EncodedCmd>,
    /// Literal text, or the source text of a nested command
    #[serde(default)]
    pub arg_value: String,
}

impl EncodedCmd {
    /// Builds a literal node holding the trimmed `text`.
    pub fn literal(text: &str) -> Self {
        Self {
            token: TOKEN_LITERAL,
            args: Vec::new(),
            arg_value: text.trim().to_string(),
        }
    }

    /// Builds a command node with the given arguments.
    pub fn command(command: Command, args: Vec<EncodedCmd>) -> Self {
        Self {
            token: command.token(),
            args,
            arg_value: String::new(),
        }
    }

    /// Whether this node is a literal.
    pub fn is_literal(&self) -> bool {
        self.token == TOKEN_LITERAL
    }

    /// The built-in command this node invokes, if any.
    pub fn as_command(&self) -> Option<Command> {
        Command::from_token(self.token)
    }
}
