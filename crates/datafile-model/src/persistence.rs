//! The capability a table source must provide.

use std::sync::{Arc, Mutex};

use crate::error::Result;
use crate::table::Table;

/// Loads a table from a named source and writes it back on demand.
///
/// Implementations are chosen when a source is opened; a [`TableStore`]
/// only ever talks to this trait.
///
/// [`TableStore`]: crate::TableStore
pub trait TablePersistence {
    /// Absolute name identifying the source. Two open stores never share one.
    fn name(&self) -> &str;

    /// Read the whole table. Cell values come back as text.
    ///
    /// # Errors
    ///
    /// `NotFound` when the source is missing, `UnsupportedFormat` when it is
    /// not a recognized format, `Read`/`Io` for anything else.
    fn load(&self) -> Result<Table>;

    /// Replace the source's contents with `table`.
    fn save(&self, table: &Table) -> Result<()>;
}

/// Source held entirely in memory. Saved tables are kept so callers can
/// inspect what would have been written.
#[derive(Debug, Clone)]
pub struct MemorySource {
    name: String,
    table: Table,
    saved: Arc<Mutex<Vec<Table>>>,
}

impl MemorySource {
    pub fn new(name: impl Into<String>, table: Table) -> Self {
        Self {
            name: name.into(),
            table,
            saved: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Handle to every table saved through this source (or a clone of it).
    pub fn saved(&self) -> Arc<Mutex<Vec<Table>>> {
        Arc::clone(&self.saved)
    }
}

impl TablePersistence for MemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self) -> Result<Table> {
        Ok(self.table.clone())
    }

    fn save(&self, table: &Table) -> Result<()> {
        if let Ok(mut saved) = self.saved.lock() {
            saved.push(table.clone());
        }
        Ok(())
    }
}
