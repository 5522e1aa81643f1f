//! Scenes that manage the set of open files.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use tracing::info;

use datafile_ingest::SUPPORTED_EXTENSIONS;

use super::grammar::SELECTION_COMMANDS;
use super::{Result, Scene, Session, user_message};

impl<R: BufRead, W: Write> Session<R, W> {
    pub(super) fn start(&mut self) -> Result<Scene> {
        self.prompter.ask(&format!(
            "Welcome to {}.\nPress Enter to Continue...\n",
            self.config.app_name
        ))?;
        Ok(Scene::Selection)
    }

    pub(super) fn selection(&mut self) -> Result<Scene> {
        // Search terms belong to one table.
        self.query.clear();

        let names = self.workspace.names(true);
        self.prompter.say("\nOpen files:")?;
        if names.is_empty() {
            self.prompter.say("-- Empty --")?;
        }
        for (index, name) in names.iter().enumerate() {
            self.prompter.say(format!("{}\t{}", index + 1, name))?;
        }

        let invocation = self.prompter.ask_command(&SELECTION_COMMANDS)?;
        match invocation.name {
            "select" => {
                let count = self.workspace.len();
                let chosen = invocation.arg(0).and_then(|arg| arg.parse::<usize>().ok());
                match chosen {
                    Some(number) if (1..=count).contains(&number) => {
                        if let Err(error) = self.workspace.select(number - 1) {
                            self.report(&error)?;
                            return Ok(Scene::Selection);
                        }
                        Ok(Scene::Querying)
                    }
                    _ if count == 0 => {
                        self.prompter
                            .say("No files are open. Use 'add' to open one.")?;
                        Ok(Scene::Selection)
                    }
                    _ => {
                        self.prompter
                            .say(format!("Please select a file between 1 and {count}."))?;
                        Ok(Scene::Selection)
                    }
                }
            }
            "add" => Ok(Scene::AddFile),
            "remove" => {
                if self.workspace.is_empty() {
                    self.prompter.say("No files are open.")?;
                    return Ok(Scene::Selection);
                }
                Ok(Scene::RemoveFile)
            }
            _ => Ok(Scene::Exit),
        }
    }

    pub(super) fn add_file(&mut self) -> Result<Scene> {
        let path = match self.chooser.as_mut() {
            Some(chooser) => chooser.choose_file(SUPPORTED_EXTENSIONS),
            None => self
                .prompter
                .ask_text("Path of the file to open", true)?
                .map(|typed| typed.trim().to_string())
                .filter(|typed| !typed.is_empty())
                .map(PathBuf::from),
        };
        let Some(path) = path else {
            self.prompter.say("No file selected.")?;
            return Ok(Scene::Selection);
        };

        match self.workspace.open(&path) {
            Ok(index) => {
                let rows = self
                    .workspace
                    .store(index)
                    .map(|store| store.row_count())
                    .unwrap_or_default();
                self.prompter
                    .say(format!("Opened {} ({rows} rows).", path.display()))?;
            }
            Err(error) => self.report(&error)?,
        }
        Ok(Scene::Selection)
    }

    pub(super) fn remove_file(&mut self) -> Result<Scene> {
        let names = self.workspace.names(true);
        if names.is_empty() {
            self.prompter.say("No files are open.")?;
            return Ok(Scene::Selection);
        }
        let Some(index) = self.prompter.choose("Which file should be removed?", &names)? else {
            return Ok(Scene::Selection);
        };
        let name = &names[index];
        if !self.prompter.ask_yes_no(&format!("Remove {name}?"))? {
            return Ok(Scene::Selection);
        }
        let save = self.prompter.ask_yes_no(&format!("Save {name} first?"))?;
        match self.workspace.close(index, save) {
            Ok(()) => self.prompter.say(format!("Removed {name}."))?,
            Err(error) => self.report(&error)?,
        }
        Ok(Scene::Selection)
    }

    /// Ask before leaving, collect every save decision, then close tables
    /// from last opened to first.
    pub(super) fn exit(&mut self) -> Result<Option<Scene>> {
        if !self.prompter.ask_yes_no("Are you sure you want to exit?")? {
            return Ok(Some(Scene::Selection));
        }

        let names = self.workspace.names(true);
        let mut decisions = Vec::with_capacity(names.len());
        for name in &names {
            decisions.push(self.prompter.ask_yes_no(&format!("Save {name}?"))?);
        }

        for (index, save) in decisions.into_iter().enumerate().rev() {
            if let Err(error) = self.workspace.close(index, save) {
                // The table stays open; it is dropped with the session.
                self.prompter.say(format!(
                    "Could not save {}: {}",
                    names[index],
                    user_message(&error)
                ))?;
            }
        }

        info!(app = %self.config.app_name, "session finished");
        self.prompter
            .say(format!("Exiting {}", self.config.app_name))?;
        Ok(None)
    }
}
