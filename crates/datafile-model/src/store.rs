//! [`TableStore`]: one table plus the source it came from.

use std::collections::BTreeSet;

use tracing::{debug, info};

use crate::error::{DataFileError, Result};
use crate::persistence::TablePersistence;
use crate::search::SearchPredicate;
use crate::table::{RowInput, Table};

/// Exclusive owner of one [`Table`]. Callers only ever receive copies.
pub struct TableStore {
    source: Box<dyn TablePersistence>,
    table: Table,
}

impl TableStore {
    /// Load `source` and wrap the result.
    pub fn open(source: Box<dyn TablePersistence>) -> Result<Self> {
        let table = source.load()?;
        info!(
            source = source.name(),
            rows = table.len(),
            columns = table.columns().len(),
            "loaded table"
        );
        Ok(Self { source, table })
    }

    pub fn name(&self) -> &str {
        self.source.name()
    }

    /// Re-read the source, replacing the in-memory table.
    pub fn load(&mut self) -> Result<Table> {
        self.table = self.source.load()?;
        debug!(source = self.name(), rows = self.table.len(), "reloaded table");
        Ok(self.get())
    }

    /// An independent copy of the table.
    pub fn get(&self) -> Table {
        self.table.clone()
    }

    pub fn columns(&self) -> &[String] {
        self.table.columns()
    }

    pub fn row_count(&self) -> usize {
        self.table.len()
    }

    /// Append `row` as the new last row. Returns its position.
    pub fn add_row(&mut self, row: impl Into<RowInput>) -> Result<usize> {
        let position = self.table.push(row.into())?;
        debug!(source = self.name(), position, "added row");
        Ok(position)
    }

    /// Delete the rows at `positions`. Nothing is removed unless every
    /// position exists. With `reindex`, the remaining rows are renumbered
    /// `0..n` in their current order.
    pub fn remove_rows(&mut self, positions: &[usize], reindex: bool) -> Result<()> {
        let targets: BTreeSet<usize> = positions.iter().copied().collect();
        for &position in &targets {
            self.table.index_of(position)?;
        }
        self.table
            .retain_rows(|row| !targets.contains(&row.position));
        if reindex {
            self.table.renumber();
        }
        debug!(
            source = self.name(),
            removed = targets.len(),
            reindex,
            "removed rows"
        );
        Ok(())
    }

    pub fn remove_row(&mut self, position: usize) -> Result<()> {
        self.remove_rows(&[position], true)
    }

    /// Replace the row at `position` with `row`. `position` must be below
    /// the row count and name an existing row.
    pub fn change_row(&mut self, row: impl Into<RowInput>, position: usize) -> Result<()> {
        if position >= self.table.len() {
            return Err(DataFileError::IndexOutOfRange {
                position,
                len: self.table.len(),
            });
        }
        let index = self.table.index_of(position)?;
        self.table.replace(index, row.into())?;
        debug!(source = self.name(), position, "changed row");
        Ok(())
    }

    pub fn search(&self, term: &str, column: &str, exact: bool) -> Result<Table> {
        self.table
            .filter(&SearchPredicate::new(term, column, exact))
    }

    /// Apply `predicates` left to right, each filtering the previous result.
    /// Every column is checked first, in order, so an empty intermediate
    /// result only skips the remaining filtering.
    pub fn search_multi(&self, predicates: &[SearchPredicate]) -> Result<Table> {
        for predicate in predicates {
            self.table.column_index(&predicate.column)?;
        }
        let mut result = self.get();
        for predicate in predicates {
            if result.is_empty() {
                break;
            }
            result = result.filter(predicate)?;
        }
        debug!(
            source = self.name(),
            predicates = predicates.len(),
            matches = result.len(),
            "searched table"
        );
        Ok(result)
    }

    /// Write the current contents back to the source.
    pub fn save(&self) -> Result<()> {
        self.source.save(&self.table)?;
        info!(source = self.name(), rows = self.table.len(), "saved table");
        Ok(())
    }

    /// The stored row at `position`, if present.
    pub fn row(&self, position: usize) -> Result<Vec<String>> {
        self.table
            .row_at(position)
            .map(|row| row.cells.clone())
            .ok_or(DataFileError::IndexOutOfRange {
                position,
                len: self.table.len(),
            })
    }
}

impl std::fmt::Debug for TableStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableStore")
            .field("source", &self.source.name())
            .field("rows", &self.table.len())
            .finish()
    }
}
