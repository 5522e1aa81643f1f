//! Delimited-text reading.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;

use datafile_model::{DataFileError, Result, Table};

/// Tables wider than this still load but are logged.
pub const WIDE_TABLE_COLUMNS: usize = 500;

fn open_error(path: &Path, error: std::io::Error) -> DataFileError {
    if error.kind() == std::io::ErrorKind::NotFound {
        DataFileError::NotFound {
            path: path.to_path_buf(),
        }
    } else {
        DataFileError::Io {
            path: path.to_path_buf(),
            source: error,
        }
    }
}

/// Reject UTF-16 input. A UTF-8 BOM is fine and stripped from the header.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| open_error(path, e))?;
    let mut buffer = [0u8; 2];
    let bytes_read = file.read(&mut buffer).map_err(|e| open_error(path, e))?;
    if bytes_read == 2 {
        let encoding = match buffer {
            [0xFF, 0xFE] => Some("UTF-16 LE"),
            [0xFE, 0xFF] => Some("UTF-16 BE"),
            _ => None,
        };
        if let Some(encoding) = encoding {
            return Err(DataFileError::UnsupportedFormat {
                path: path.to_path_buf(),
                reason: format!("{encoding} encoding"),
            });
        }
    }
    Ok(())
}

pub(crate) fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Read `path` with `delimiter`; the first record names the columns.
pub fn read_table(path: &Path, delimiter: u8) -> Result<Table> {
    validate_encoding(path)?;
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| read_error(path, &e))?;
    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| read_error(path, &e))?
        .iter()
        .map(normalize_header)
        .collect();

    if headers.len() > WIDE_TABLE_COLUMNS {
        tracing::warn!(
            path = %path.display(),
            columns = headers.len(),
            "table has more than {WIDE_TABLE_COLUMNS} columns"
        );
    }

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| read_error(path, &e))?;
        let mut row = Vec::with_capacity(headers.len());
        for idx in 0..headers.len() {
            row.push(record.get(idx).unwrap_or("").to_string());
        }
        records.push(row);
    }
    Table::from_records(headers, records)
}

fn read_error(path: &Path, error: &csv::Error) -> DataFileError {
    if let csv::ErrorKind::Io(io) = error.kind()
        && io.kind() == std::io::ErrorKind::NotFound
    {
        return DataFileError::NotFound {
            path: path.to_path_buf(),
        };
    }
    DataFileError::Read {
        path: path.to_path_buf(),
        message: error.to_string(),
    }
}
