//! The interactive session: a loop over scenes, each of which talks to the
//! user, acts on the [`Workspace`], and names the scene to run next.
//!
//! ```text
//! Start -> Selection <-> {AddFile, RemoveFile}
//! Selection -> Querying <-> {AddRow, RemoveRow, ChangeRow, Display, Search}
//! Search <-> {RemoveRow, RemoveMatches, ChangeRow, Display}
//! Selection -> Exit
//! ```

mod files;
pub mod grammar;
pub mod prompt;
mod rows;
mod search;

use std::io::{BufRead, Write};

use thiserror::Error;
use tracing::{debug, warn};

use datafile_model::{DataFileError, SearchQuery, Table};
use datafile_report::{IndexColumn, build_text_table};

use crate::chooser::FileChooser;
use crate::workspace::{Workspace, WorkspaceError};

pub use prompt::{CANCEL_TOKEN, Prompter};

/// Failures that end the session. Everything else is reported to the user
/// and the dialog carries on.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("terminal i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("input closed")]
    InputClosed,

    #[error("asked to choose from an empty list")]
    EmptyChoiceSet,
}

pub type Result<T> = std::result::Result<T, SessionError>;

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Shown in the welcome and exit messages.
    pub app_name: String,
    /// Rows shown in table previews.
    pub preview_rows: usize,
    /// Width of preview tables.
    pub table_width: u16,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            app_name: "DataFile".to_string(),
            preview_rows: 5,
            table_width: 120,
        }
    }
}

/// Where a row or display scene was entered from, and returns to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Querying,
    Search,
}

impl Origin {
    fn scene(self) -> Scene {
        match self {
            Self::Querying => Scene::Querying,
            Self::Search => Scene::Search,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scene {
    Start,
    Selection,
    AddFile,
    RemoveFile,
    Querying,
    AddRow,
    RemoveRow(Origin),
    RemoveMatches,
    ChangeRow(Origin),
    Display(Origin),
    Search,
    Exit,
}

/// One interactive session over a [`Workspace`].
pub struct Session<R, W> {
    config: SessionConfig,
    workspace: Workspace,
    prompter: Prompter<R, W>,
    chooser: Option<Box<dyn FileChooser>>,
    /// Predicates of the search in progress on the current table.
    query: SearchQuery,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(config: SessionConfig, workspace: Workspace, input: R, output: W) -> Self {
        Self {
            config,
            workspace,
            prompter: Prompter::new(input, output),
            chooser: None,
            query: SearchQuery::new(),
        }
    }

    /// Use `chooser` to pick files. Without one, paths are typed.
    pub fn with_chooser(mut self, chooser: Box<dyn FileChooser>) -> Self {
        self.chooser = Some(chooser);
        self
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn into_output(self) -> W {
        self.prompter.into_output()
    }

    /// Run scenes from `Start` until the user exits.
    pub fn run(&mut self) -> Result<()> {
        let mut scene = Scene::Start;
        loop {
            debug!(?scene, "entering scene");
            match self.step(scene)? {
                Some(next) => scene = next,
                None => return Ok(()),
            }
        }
    }

    /// Run one scene. `None` ends the session.
    pub fn step(&mut self, scene: Scene) -> Result<Option<Scene>> {
        let next = match scene {
            Scene::Start => self.start()?,
            Scene::Selection => self.selection()?,
            Scene::AddFile => self.add_file()?,
            Scene::RemoveFile => self.remove_file()?,
            Scene::Querying => self.querying()?,
            Scene::AddRow => self.add_row()?,
            Scene::RemoveRow(origin) => self.remove_row(origin)?,
            Scene::RemoveMatches => self.remove_matches()?,
            Scene::ChangeRow(origin) => self.change_row(origin)?,
            Scene::Display(origin) => self.display(origin)?,
            Scene::Search => self.search()?,
            Scene::Exit => return self.exit(),
        };
        Ok(Some(next))
    }

    /// The rows a row-picking scene chooses from: the whole table from
    /// Querying, the current matches from Search. Positions are the stored
    /// ones.
    fn rows_for(&self, origin: Origin) -> crate::workspace::Result<Table> {
        match origin {
            Origin::Querying => self.workspace.current_table(),
            Origin::Search => self.workspace.query_current(&self.query, false),
        }
    }

    /// Tell the user why `error` stopped the action they asked for.
    fn report(&mut self, error: &WorkspaceError) -> Result<()> {
        warn!(%error, "action failed");
        self.prompter.say(user_message(error))
    }

    /// Print each column next to its value.
    fn show_row(&mut self, columns: &[String], cells: &[String]) -> Result<()> {
        for (column, value) in columns.iter().zip(cells) {
            self.prompter.say(format!("  {column}: {value}"))?;
        }
        Ok(())
    }

    /// Print `table` with 1-based display numbers, at most `limit` rows.
    fn preview(&mut self, table: &Table, limit: usize) -> Result<()> {
        let shown = table.head(limit);
        let grid = build_text_table(&shown, IndexColumn::DisplayOrder, self.config.table_width);
        self.prompter.say(grid)?;
        if table.len() > shown.len() {
            self.prompter
                .say(format!("... {} more row(s)", table.len() - shown.len()))?;
        }
        Ok(())
    }
}

/// The message shown for a failed workspace action.
pub fn user_message(error: &WorkspaceError) -> String {
    match error {
        WorkspaceError::AlreadyOpen { name } => format!("{name} is already open."),
        WorkspaceError::NoSelection => "No file is selected.".to_string(),
        WorkspaceError::TableIndexOutOfRange { index, .. } => {
            format!("There is no file {}.", index + 1)
        }
        WorkspaceError::Table(DataFileError::NotFound { path }) => {
            format!("Could not find {}.", path.display())
        }
        WorkspaceError::Table(DataFileError::UnsupportedFormat { path, reason }) => {
            format!("{} is not a supported file ({reason}).", path.display())
        }
        WorkspaceError::Table(DataFileError::UnknownColumn { column }) => {
            format!("There is no column '{column}'.")
        }
        WorkspaceError::Table(DataFileError::IndexOutOfRange { .. }) => {
            "That row no longer exists.".to_string()
        }
        WorkspaceError::Table(other) => format!("Error: {other}"),
    }
}

/// Stored position of the row shown as `display` (1-based) in `rows`.
pub fn resolve_display_index(rows: &Table, display: usize) -> Option<usize> {
    display
        .checked_sub(1)
        .and_then(|index| rows.rows().get(index))
        .map(|row| row.position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use datafile_model::SearchPredicate;
    use std::path::PathBuf;

    #[test]
    fn display_index_maps_to_stored_position() {
        let table = Table::from_records(
            vec!["Name".into()],
            vec![
                vec!["Alice".into()],
                vec!["Bob".into()],
                vec!["Charlie".into()],
            ],
        )
        .unwrap();
        assert_eq!(resolve_display_index(&table, 2), Some(1));
        assert_eq!(resolve_display_index(&table, 0), None);
        assert_eq!(resolve_display_index(&table, 4), None);

        let matches = table
            .filter(&SearchPredicate::new("li", "Name", false))
            .unwrap();
        assert_eq!(resolve_display_index(&matches, 1), Some(0));
        assert_eq!(resolve_display_index(&matches, 2), Some(2));
    }

    #[test]
    fn open_failures_have_specific_messages() {
        let missing = WorkspaceError::Table(DataFileError::NotFound {
            path: PathBuf::from("/data/tea.csv"),
        });
        assert_eq!(user_message(&missing), "Could not find /data/tea.csv.");

        let duplicate = WorkspaceError::AlreadyOpen {
            name: "/data/tea.csv".to_string(),
        };
        assert_eq!(user_message(&duplicate), "/data/tea.csv is already open.");

        let unsupported = WorkspaceError::Table(DataFileError::UnsupportedFormat {
            path: PathBuf::from("/data/tea.xlsx"),
            reason: "unrecognised extension 'xlsx'".to_string(),
        });
        assert!(user_message(&unsupported).starts_with("/data/tea.xlsx is not a supported file"));
    }
}
