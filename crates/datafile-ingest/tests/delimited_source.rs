//! Tests for loading and saving delimited-text sources.

use std::fs;
use std::path::PathBuf;

use datafile_ingest::{DelimitedSource, source_for};
use datafile_model::{DataFileError, TablePersistence, TableStore};
use tempfile::TempDir;

fn write_fixture(dir: &TempDir, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

#[test]
fn loads_csv_as_text() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(
        &dir,
        "tea.csv",
        b"Name,Favourite Tea,Favourite Number\nAlice,Green,7\nBob,English Breakfast,100\n",
    );
    let table = DelimitedSource::new(&path).load().unwrap();
    assert_eq!(table.columns(), ["Name", "Favourite Tea", "Favourite Number"]);
    assert_eq!(table.len(), 2);
    assert_eq!(table.rows()[1].cells, vec!["Bob", "English Breakfast", "100"]);
    assert_eq!(table.rows()[1].position, 1);
}

#[test]
fn loads_tsv_and_quoted_fields() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "tea.tsv", b"Name\tNote\nAlice\t\"tab\tinside\"\n");
    let table = DelimitedSource::new(&path).load().unwrap();
    assert_eq!(table.rows()[0].cells, vec!["Alice", "tab\tinside"]);
}

#[test]
fn pads_and_truncates_ragged_records() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "ragged.csv", b"A,B,C\n1\n1,2,3,4\n");
    let table = DelimitedSource::new(&path).load().unwrap();
    assert_eq!(table.rows()[0].cells, vec!["1", "", ""]);
    assert_eq!(table.rows()[1].cells, vec!["1", "2", "3"]);
}

#[test]
fn strips_utf8_bom_from_header() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "bom.csv", b"\xEF\xBB\xBFName,Tea\nAlice,Green\n");
    let table = DelimitedSource::new(&path).load().unwrap();
    assert_eq!(table.columns()[0], "Name");
}

#[test]
fn missing_file_is_not_found() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.csv");
    let err = DelimitedSource::new(&path).load().unwrap_err();
    assert!(matches!(err, DataFileError::NotFound { path: p } if p == path));
}

#[test]
fn missing_file_with_unknown_extension_is_not_found() {
    let dir = TempDir::new().unwrap();
    let err = DelimitedSource::new(dir.path().join("missing.txt"))
        .load()
        .unwrap_err();
    assert!(matches!(err, DataFileError::NotFound { .. }));
}

#[test]
fn other_extension_is_unsupported() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "tea.txt", b"Name\nAlice\n");
    let err = DelimitedSource::new(&path).load().unwrap_err();
    assert!(matches!(err, DataFileError::UnsupportedFormat { .. }));
}

#[test]
fn utf16_is_unsupported() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "wide.csv", b"\xFF\xFEN\x00a\x00");
    let err = DelimitedSource::new(&path).load().unwrap_err();
    match err {
        DataFileError::UnsupportedFormat { reason, .. } => assert!(reason.contains("UTF-16 LE")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn save_writes_header_and_rows_without_positions() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "tea.csv", b"Name,Tea\nAlice,Green\nBob,\"Earl, Grey\"\n");
    let mut store = TableStore::open(source_for(&path)).unwrap();
    store.remove_row(0).unwrap();
    store.add_row(vec!["Charlie", "Matcha"]).unwrap();
    store.save().unwrap();

    let written = fs::read_to_string(&path).unwrap();
    assert_eq!(written, "Name,Tea\nBob,\"Earl, Grey\"\nCharlie,Matcha\n");
}

#[test]
fn source_name_is_the_path() {
    let path = PathBuf::from("/data/tea.csv");
    assert_eq!(source_for(&path).name(), "/data/tea.csv");
}
