//! File-backed [`TablePersistence`] for delimited text.

use std::path::{Path, PathBuf};

use datafile_model::{DataFileError, Result, Table, TablePersistence};

use crate::delimited::{read_table, write_table};

/// File extensions [`DelimitedSource`] understands, for file pickers.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["csv", "tsv"];

/// Delimited-text dialect, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Tsv,
}

impl SourceFormat {
    pub fn detect(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;
        if extension.eq_ignore_ascii_case("csv") {
            Some(Self::Csv)
        } else if extension.eq_ignore_ascii_case("tsv") {
            Some(Self::Tsv)
        } else {
            None
        }
    }

    pub fn delimiter(self) -> u8 {
        match self {
            Self::Csv => b',',
            Self::Tsv => b'\t',
        }
    }
}

/// A table stored in a `.csv` or `.tsv` file.
#[derive(Debug, Clone)]
pub struct DelimitedSource {
    path: PathBuf,
    name: String,
}

impl DelimitedSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self { path, name }
    }

    fn format(&self) -> Result<SourceFormat> {
        SourceFormat::detect(&self.path).ok_or_else(|| DataFileError::UnsupportedFormat {
            path: self.path.clone(),
            reason: format!("expected one of: {}", SUPPORTED_EXTENSIONS.join(", ")),
        })
    }
}

impl TablePersistence for DelimitedSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self) -> Result<Table> {
        if !self.path.exists() {
            return Err(DataFileError::NotFound {
                path: self.path.clone(),
            });
        }
        let format = self.format()?;
        read_table(&self.path, format.delimiter())
    }

    fn save(&self, table: &Table) -> Result<()> {
        let format = self.format()?;
        write_table(&self.path, table, format.delimiter())
    }
}

/// Persistence for the file at `path`. The name is the path as given, so
/// pass an absolute path when names must be unique.
pub fn source_for(path: &Path) -> Box<dyn TablePersistence> {
    Box::new(DelimitedSource::new(path))
}
