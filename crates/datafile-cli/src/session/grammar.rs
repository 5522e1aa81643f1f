//! Per-scene command tables and input validation.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// One command a scene accepts.
#[derive(Debug)]
pub struct CommandSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub usage: &'static str,
    pattern: Regex,
}

/// A validated input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub name: &'static str,
    /// Captured arguments, in pattern order. Unmatched optional groups are
    /// left out.
    pub args: Vec<String>,
}

impl Invocation {
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }
}

/// Why an input line was rejected. The message is shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("Please enter a command.")]
    Empty,

    #[error("Unrecognised command '{token}'.")]
    Unrecognised { token: String },

    #[error("Invalid arguments for '{name}'. Usage: {usage}")]
    Malformed {
        name: &'static str,
        usage: &'static str,
    },
}

/// The commands of one scene.
#[derive(Debug)]
pub struct CommandSet {
    commands: Vec<CommandSpec>,
}

impl CommandSet {
    /// `(name, label, usage, pattern)` per command. Patterns must match the
    /// whole trimmed line.
    fn new(specs: &[(&'static str, &'static str, &'static str, &str)]) -> Self {
        let commands = specs
            .iter()
            .map(|&(name, label, usage, pattern)| CommandSpec {
                name,
                label,
                usage,
                pattern: Regex::new(&format!("^(?:{pattern})$"))
                    .unwrap_or_else(|error| panic!("bad pattern for '{name}': {error}")),
            })
            .collect();
        Self { commands }
    }

    pub fn commands(&self) -> &[CommandSpec] {
        &self.commands
    }

    /// The menu shown before each prompt.
    pub fn menu(&self) -> String {
        let width = self
            .commands
            .iter()
            .map(|command| command.label.len())
            .max()
            .unwrap_or(0);
        self.commands
            .iter()
            .map(|command| format!("  {:<width$}  {}", command.label, command.usage))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Validate `line`: its first token must name a command and the whole
    /// line must match that command's pattern.
    pub fn parse(&self, line: &str) -> Result<Invocation, GrammarError> {
        let line = line.trim();
        let Some(token) = line.split_whitespace().next() else {
            return Err(GrammarError::Empty);
        };
        let Some(command) = self.commands.iter().find(|command| command.name == token) else {
            return Err(GrammarError::Unrecognised {
                token: token.to_string(),
            });
        };
        let Some(captures) = command.pattern.captures(line) else {
            return Err(GrammarError::Malformed {
                name: command.name,
                usage: command.usage,
            });
        };
        let args = captures
            .iter()
            .skip(1)
            .flatten()
            .map(|group| group.as_str().to_string())
            .collect();
        Ok(Invocation {
            name: command.name,
            args,
        })
    }
}

pub static SELECTION_COMMANDS: LazyLock<CommandSet> = LazyLock::new(|| {
    CommandSet::new(&[
        ("select", "Select File", "select [index]", r"select\s+(\d+)"),
        ("add", "Add File", "add", r"add"),
        ("remove", "Remove File", "remove", r"remove"),
        ("exit", "Exit", "exit", r"exit"),
    ])
});

pub static QUERYING_COMMANDS: LazyLock<CommandSet> = LazyLock::new(|| {
    CommandSet::new(&[
        ("add", "Add Row", "add", r"add"),
        ("remove", "Remove Row", "remove", r"remove"),
        ("change", "Change Row", "change", r"change"),
        ("display", "Display Table", "display", r"display"),
        ("search", "Search", "search", r"search"),
        ("back", "Back", "back", r"back"),
    ])
});

pub static SEARCH_COMMANDS: LazyLock<CommandSet> = LazyLock::new(|| {
    CommandSet::new(&[
        ("filter", "Add Search Term", "filter", r"filter"),
        ("unfilter", "Remove Search Term", "unfilter [index]", r"unfilter\s+(\d+)"),
        ("remove", "Remove Matching Row(s)", "remove [all]", r"remove(?:\s+(all))?"),
        ("change", "Change Matching Row", "change", r"change"),
        ("display", "Display Matches", "display", r"display"),
        ("back", "Back", "back", r"back"),
    ])
});
