//! Delimited-text table sources.
//!
//! [`DelimitedSource`] implements [`TablePersistence`] for `.csv` and `.tsv`
//! files: the first record names the columns and every value is kept as
//! text.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use datafile_ingest::source_for;
//! use datafile_model::TableStore;
//!
//! let store = TableStore::open(source_for(Path::new("/data/tea.csv")))?;
//! ```
//!
//! [`TablePersistence`]: datafile_model::TablePersistence

mod delimited;
mod source;

// === Reading / Writing ===
pub use delimited::{WIDE_TABLE_COLUMNS, read_table, validate_encoding, write_table};

// === Sources ===
pub use source::{DelimitedSource, SUPPORTED_EXTENSIONS, SourceFormat, source_for};
