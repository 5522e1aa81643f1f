//! Line-based user interaction.

use std::fmt::Display;
use std::io::{BufRead, Write};

use super::SessionError;
use super::grammar::{CommandSet, Invocation};

/// Typed at any cancelable prompt to abandon the current action.
pub const CANCEL_TOKEN: &str = "!cancel";

/// Reads answers from `input` and writes messages and prompts to `output`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Print `message` on its own line.
    pub fn say(&mut self, message: impl Display) -> Result<(), SessionError> {
        writeln!(self.output, "{message}")?;
        Ok(())
    }

    /// Print `message` and read one line, without the line ending.
    pub fn ask(&mut self, message: &str) -> Result<String, SessionError> {
        write!(self.output, "{message}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(SessionError::InputClosed);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(line)
    }

    /// Ask until the answer is yes or no.
    pub fn ask_yes_no(&mut self, question: &str) -> Result<bool, SessionError> {
        loop {
            let answer = self.ask(&format!("{question} (y/n): "))?;
            match answer.trim().to_ascii_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => self.say("Please answer 'y' or 'n'.")?,
            }
        }
    }

    /// Ask for free text. `None` when the user cancels. Blank answers are
    /// re-asked unless `allow_empty`.
    pub fn ask_text(
        &mut self,
        message: &str,
        allow_empty: bool,
    ) -> Result<Option<String>, SessionError> {
        loop {
            let answer = self.ask(&format!("{message} ({CANCEL_TOKEN} to cancel): "))?;
            if answer.trim() == CANCEL_TOKEN {
                return Ok(None);
            }
            if answer.trim().is_empty() && !allow_empty {
                self.say("A value is required.")?;
                continue;
            }
            return Ok(Some(answer));
        }
    }

    /// Ask for a 1-based number in `1..=max`. `None` when the user cancels.
    pub fn ask_index(&mut self, message: &str, max: usize) -> Result<Option<usize>, SessionError> {
        if max == 0 {
            return Err(SessionError::EmptyChoiceSet);
        }
        loop {
            let answer = self.ask(&format!("{message} [1-{max}] ({CANCEL_TOKEN} to cancel): "))?;
            let answer = answer.trim();
            if answer == CANCEL_TOKEN {
                return Ok(None);
            }
            match answer.parse::<usize>() {
                Ok(choice) if (1..=max).contains(&choice) => return Ok(Some(choice)),
                _ => self.say(format!("Please enter a number between 1 and {max}."))?,
            }
        }
    }

    /// List `options` numbered from 1 and ask for one. Returns the chosen
    /// 0-based index, or `None` when the user cancels.
    pub fn choose<S: AsRef<str>>(
        &mut self,
        title: &str,
        options: &[S],
    ) -> Result<Option<usize>, SessionError> {
        if options.is_empty() {
            return Err(SessionError::EmptyChoiceSet);
        }
        self.say(title)?;
        for (index, option) in options.iter().enumerate() {
            self.say(format!("{}\t{}", index + 1, option.as_ref()))?;
        }
        Ok(self
            .ask_index("Choice", options.len())?
            .map(|choice| choice - 1))
    }

    /// Show the menu and read lines until one is a valid command.
    pub fn ask_command(&mut self, commands: &CommandSet) -> Result<Invocation, SessionError> {
        self.say(commands.menu())?;
        loop {
            let line = self.ask("> ")?;
            match commands.parse(&line) {
                Ok(invocation) => return Ok(invocation),
                Err(error) => self.say(error)?,
            }
        }
    }

    /// Sink for renderers. Write failures are logged, not raised.
    pub fn sink(&mut self) -> impl FnMut(&str) + '_ {
        move |text: &str| {
            if let Err(error) = writeln!(self.output, "{text}") {
                tracing::warn!(%error, "failed to write display output");
            }
        }
    }
}
