//! Scenes that work on the rows of the selected table.

use std::io::{BufRead, Write};

use tracing::debug;

use datafile_model::Row;

use super::grammar::QUERYING_COMMANDS;
use super::{Origin, Result, Scene, Session, resolve_display_index};

impl<R: BufRead, W: Write> Session<R, W> {
    pub(super) fn querying(&mut self) -> Result<Scene> {
        let (name, table) = match (
            self.workspace.current_name(),
            self.workspace.current_table(),
        ) {
            (Ok(name), Ok(table)) => (name, table),
            (Err(error), _) | (_, Err(error)) => {
                self.report(&error)?;
                return Ok(Scene::Selection);
            }
        };

        self.prompter.say(format!("\n{name}"))?;
        self.preview(&table, self.config.preview_rows)?;
        self.prompter.say(format!("{} row(s)", table.len()))?;

        let invocation = self.prompter.ask_command(&QUERYING_COMMANDS)?;
        Ok(match invocation.name {
            "add" => Scene::AddRow,
            "remove" => Scene::RemoveRow(Origin::Querying),
            "change" => Scene::ChangeRow(Origin::Querying),
            "display" => Scene::Display(Origin::Querying),
            "search" => Scene::Search,
            _ => Scene::Selection,
        })
    }

    pub(super) fn add_row(&mut self) -> Result<Scene> {
        let columns = match self.workspace.current() {
            Ok(store) => store.columns().to_vec(),
            Err(error) => {
                self.report(&error)?;
                return Ok(Scene::Selection);
            }
        };

        let mut cells = Vec::with_capacity(columns.len());
        for column in &columns {
            let Some(value) = self
                .prompter
                .ask_text(&format!("Value for '{column}'"), true)?
            else {
                self.prompter.say("Row not added.")?;
                return Ok(Scene::Querying);
            };
            cells.push(value);
        }

        self.show_row(&columns, &cells)?;
        if !self.prompter.ask_yes_no("Add this row?")? {
            self.prompter.say("Row not added.")?;
            return Ok(Scene::Querying);
        }
        match self.workspace.add_row_to_current(cells) {
            Ok(position) => {
                debug!(position, "row added from session");
                self.prompter.say("Row added.")?;
            }
            Err(error) => self.report(&error)?,
        }
        Ok(Scene::Querying)
    }

    pub(super) fn remove_row(&mut self, origin: Origin) -> Result<Scene> {
        let Some((columns, row)) = self.pick_row(origin, "remove")? else {
            return Ok(origin.scene());
        };
        self.show_row(&columns, &row.cells)?;
        if !self.prompter.ask_yes_no("Remove this row?")? {
            self.prompter.say("Row not removed.")?;
            return Ok(origin.scene());
        }
        match self.workspace.remove_row_from_current(&[row.position]) {
            Ok(()) => self.prompter.say("Row removed.")?,
            Err(error) => self.report(&error)?,
        }
        Ok(origin.scene())
    }

    pub(super) fn change_row(&mut self, origin: Origin) -> Result<Scene> {
        let Some((columns, row)) = self.pick_row(origin, "change")? else {
            return Ok(origin.scene());
        };
        self.show_row(&columns, &row.cells)?;
        let Some(column_index) = self
            .prompter
            .choose("Which column should be changed?", &columns)?
        else {
            return Ok(origin.scene());
        };
        let column = &columns[column_index];
        let current = row.cell(column_index).unwrap_or_default();
        let Some(value) = self
            .prompter
            .ask_text(&format!("New value for '{column}'"), true)?
        else {
            return Ok(origin.scene());
        };

        if !self
            .prompter
            .ask_yes_no(&format!("Change '{column}' from '{current}' to '{value}'?"))?
        {
            self.prompter.say("Row not changed.")?;
            return Ok(origin.scene());
        }
        match self
            .workspace
            .change_row_of_current(row.position, column, &value)
        {
            Ok(()) => self.prompter.say("Row changed.")?,
            Err(error) => self.report(&error)?,
        }
        Ok(origin.scene())
    }

    pub(super) fn display(&mut self, origin: Origin) -> Result<Scene> {
        let table = match origin {
            Origin::Querying => self.workspace.current_table(),
            Origin::Search => self.workspace.query_current(&self.query, true),
        };
        let table = match table {
            Ok(table) => table,
            Err(error) => {
                self.report(&error)?;
                return Ok(origin.scene());
            }
        };

        let names = self.workspace.available_renderers();
        if names.is_empty() {
            self.prompter.say("No displays are available.")?;
            return Ok(origin.scene());
        }
        let Some(index) = self
            .prompter
            .choose("How should the table be displayed?", &names)?
        else {
            return Ok(origin.scene());
        };
        if let Some(renderer) = self.workspace.renderer(index) {
            debug!(renderer = renderer.name(), rows = table.len(), "rendering table");
            let mut sink = self.prompter.sink();
            renderer.render(&table, &mut sink);
        }
        Ok(origin.scene())
    }

    /// Ask for a row by its 1-based display number among the rows visible
    /// from `origin`, and return it with its stored position.
    fn pick_row(&mut self, origin: Origin, action: &str) -> Result<Option<(Vec<String>, Row)>> {
        let rows = match self.rows_for(origin) {
            Ok(rows) => rows,
            Err(error) => {
                self.report(&error)?;
                return Ok(None);
            }
        };
        if rows.is_empty() {
            self.prompter.say(format!("There are no rows to {action}."))?;
            return Ok(None);
        }
        let Some(display) = self
            .prompter
            .ask_index(&format!("Row to {action}"), rows.len())?
        else {
            return Ok(None);
        };
        let row = resolve_display_index(&rows, display)
            .and_then(|position| rows.row_at(position))
            .cloned();
        Ok(row.map(|row| (rows.columns().to_vec(), row)))
    }
}
