//! Delimited-text reading and writing.

mod reader;
mod writer;

pub use reader::{WIDE_TABLE_COLUMNS, read_table, validate_encoding};
pub use writer::write_table;
