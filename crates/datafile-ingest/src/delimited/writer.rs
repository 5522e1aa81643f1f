//! Delimited-text writing.

use std::path::Path;

use csv::WriterBuilder;

use datafile_model::{DataFileError, Result, Table};

/// Write the header and every row of `table` to `path`. Positions are not
/// part of the file.
pub fn write_table(path: &Path, table: &Table, delimiter: u8) -> Result<()> {
    let write_error = |error: csv::Error| DataFileError::Write {
        path: path.to_path_buf(),
        message: error.to_string(),
    };
    let mut writer = WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(path)
        .map_err(write_error)?;
    writer.write_record(table.columns()).map_err(write_error)?;
    for row in table.rows() {
        writer.write_record(&row.cells).map_err(write_error)?;
    }
    writer.flush().map_err(|source| DataFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}
