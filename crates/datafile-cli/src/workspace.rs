//! The set of open tables and the current selection.

use std::path::{Component, Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, trace};

use datafile_ingest::source_for;
use datafile_model::{
    DataFileError, RowInput, SearchQuery, Table, TablePersistence, TableStore,
};
use datafile_report::DisplayRenderer;

use crate::logging::redact_value;

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("{name} is already open")]
    AlreadyOpen { name: String },

    #[error("no table is selected")]
    NoSelection,

    #[error("table index {index} out of range for {count} open tables")]
    TableIndexOutOfRange { index: usize, count: usize },

    #[error(transparent)]
    Table(#[from] DataFileError),
}

pub type Result<T> = std::result::Result<T, WorkspaceError>;

/// Open [`TableStore`]s in load order, the current selection, and the
/// renderers available for display.
pub struct Workspace {
    stores: Vec<TableStore>,
    current: Option<usize>,
    renderers: Vec<Box<dyn DisplayRenderer>>,
}

impl Workspace {
    pub fn new(renderers: Vec<Box<dyn DisplayRenderer>>) -> Self {
        Self {
            stores: Vec::new(),
            current: None,
            renderers,
        }
    }

    pub fn len(&self) -> usize {
        self.stores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }

    /// Open the delimited file at `path`. Returns the new table's index.
    pub fn open(&mut self, path: &Path) -> Result<usize> {
        let absolute = std::path::absolute(path).map_err(|source| DataFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.open_source(source_for(&absolute))
    }

    /// Load `source` and append it. Fails if a table with the same name is
    /// already open.
    pub fn open_source(&mut self, source: Box<dyn TablePersistence>) -> Result<usize> {
        if self.stores.iter().any(|store| store.name() == source.name()) {
            return Err(WorkspaceError::AlreadyOpen {
                name: source.name().to_string(),
            });
        }
        let store = TableStore::open(source)?;
        info!(source = store.name(), index = self.stores.len(), "opened table");
        self.stores.push(store);
        Ok(self.stores.len() - 1)
    }

    /// Remove the table at `index`, saving it first when `save` is set.
    /// A failed save leaves the table open.
    pub fn close(&mut self, index: usize, save: bool) -> Result<()> {
        self.check_index(index)?;
        if save {
            self.stores[index].save()?;
        }
        let store = self.stores.remove(index);
        self.current = match self.current {
            Some(current) if current == index => None,
            Some(current) if current > index => Some(current - 1),
            other => other,
        };
        info!(source = store.name(), saved = save, "closed table");
        Ok(())
    }

    pub fn select(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        self.current = Some(index);
        debug!(source = self.stores[index].name(), "selected table");
        Ok(())
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current(&self) -> Result<&TableStore> {
        self.current
            .and_then(|index| self.stores.get(index))
            .ok_or(WorkspaceError::NoSelection)
    }

    fn current_mut(&mut self) -> Result<&mut TableStore> {
        self.current
            .and_then(|index| self.stores.get_mut(index))
            .ok_or(WorkspaceError::NoSelection)
    }

    pub fn store(&self, index: usize) -> Result<&TableStore> {
        self.check_index(index)?;
        Ok(&self.stores[index])
    }

    /// Source names in load order. With `truncate`, the longest common path
    /// prefix is stripped; a lone table is shown by its file name.
    pub fn names(&self, truncate: bool) -> Vec<String> {
        let names: Vec<String> = self
            .stores
            .iter()
            .map(|store| store.name().to_string())
            .collect();
        if truncate {
            shorten_names(&names)
        } else {
            names
        }
    }

    /// Display name of the current table (common prefix stripped).
    pub fn current_name(&self) -> Result<String> {
        let index = self.current.ok_or(WorkspaceError::NoSelection)?;
        self.names(true)
            .into_iter()
            .nth(index)
            .ok_or(WorkspaceError::NoSelection)
    }

    pub fn current_table(&self) -> Result<Table> {
        Ok(self.current()?.get())
    }

    pub fn add_row_to_current(&mut self, row: impl Into<RowInput>) -> Result<usize> {
        let row = row.into();
        trace!(row = ?redact_row(&row), "adding row");
        Ok(self.current_mut()?.add_row(row)?)
    }

    pub fn remove_row_from_current(&mut self, positions: &[usize]) -> Result<()> {
        Ok(self.current_mut()?.remove_rows(positions, true)?)
    }

    /// Replace the whole row at `position`.
    pub fn replace_row_of_current(
        &mut self,
        row: impl Into<RowInput>,
        position: usize,
    ) -> Result<()> {
        Ok(self.current_mut()?.change_row(row, position)?)
    }

    /// Overwrite one cell: the stored row at `position` is copied, `column`
    /// replaced with `value`, and the full row written back.
    pub fn change_row_of_current(
        &mut self,
        position: usize,
        column: &str,
        value: &str,
    ) -> Result<()> {
        let store = self.current_mut()?;
        let column_index = store
            .columns()
            .iter()
            .position(|name| name == column)
            .ok_or_else(|| DataFileError::UnknownColumn {
                column: column.to_string(),
            })?;
        let mut cells = store.row(position)?;
        trace!(
            position,
            column,
            from = redact_value(&cells[column_index]),
            to = redact_value(value),
            "changing cell"
        );
        cells[column_index] = value.to_string();
        Ok(store.change_row(cells, position)?)
    }

    /// Search the current table. With `reindex`, result positions are
    /// renumbered `0..k` for display; mutate with the original positions.
    pub fn query_current(&self, query: &SearchQuery, reindex: bool) -> Result<Table> {
        let result = self.current()?.search_multi(query.predicates())?;
        Ok(if reindex { result.reindexed() } else { result })
    }

    pub fn available_renderers(&self) -> Vec<String> {
        self.renderers
            .iter()
            .map(|renderer| renderer.name().to_string())
            .collect()
    }

    pub fn renderer(&self, index: usize) -> Option<&dyn DisplayRenderer> {
        self.renderers.get(index).map(|renderer| renderer.as_ref())
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.stores.len() {
            Ok(())
        } else {
            Err(WorkspaceError::TableIndexOutOfRange {
                index,
                count: self.stores.len(),
            })
        }
    }
}

fn redact_row(row: &RowInput) -> Vec<String> {
    let values: Vec<&String> = match row {
        RowInput::Positional(values) => values.iter().collect(),
        RowInput::Named(values) => values.values().collect(),
    };
    values
        .into_iter()
        .map(|value| redact_value(value).to_string())
        .collect()
}

fn shorten_names(names: &[String]) -> Vec<String> {
    if names.len() == 1 {
        let path = Path::new(&names[0]);
        let base = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| names[0].clone());
        return vec![base];
    }
    let split: Vec<Vec<Component<'_>>> = names
        .iter()
        .map(|name| Path::new(name).components().collect())
        .collect();
    let Some(shortest) = split.iter().map(Vec::len).min() else {
        return Vec::new();
    };
    // Never strip the file name itself.
    let limit = shortest.saturating_sub(1);
    let mut common = 0;
    while common < limit && split.iter().all(|parts| parts[common] == split[0][common]) {
        common += 1;
    }
    split
        .iter()
        .map(|parts| {
            parts[common..]
                .iter()
                .collect::<PathBuf>()
                .display()
                .to_string()
        })
        .collect()
}

impl std::fmt::Debug for Workspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workspace")
            .field("stores", &self.stores)
            .field("current", &self.current)
            .field("renderers", &self.available_renderers())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn single_name_is_base_name() {
        assert_eq!(shorten_names(&strings(&["/data/tea.csv"])), vec!["tea.csv"]);
    }

    #[test]
    fn common_prefix_is_stripped() {
        let names = strings(&["/data/a/tea.csv", "/data/b/coffee.csv"]);
        assert_eq!(shorten_names(&names), vec!["a/tea.csv", "b/coffee.csv"]);
    }

    #[test]
    fn file_names_are_kept_when_parents_match() {
        let names = strings(&["/data/tea.csv", "/data/coffee.csv", "/data/x/milk.csv"]);
        assert_eq!(
            shorten_names(&names),
            vec!["tea.csv", "coffee.csv", "x/milk.csv"]
        );
    }

    #[test]
    fn empty_input() {
        assert!(shorten_names(&[]).is_empty());
    }
}
