//! Tests for TableStore row mutation and search.

use std::collections::BTreeMap;

use datafile_model::{DataFileError, MemorySource, SearchPredicate, Table, TableStore};

fn tea_table() -> Table {
    Table::from_records(
        vec!["Name".into(), "Tea".into(), "Number".into()],
        vec![
            vec!["Alice".into(), "Green".into(), "7".into()],
            vec!["Bob".into(), "English Breakfast".into(), "100".into()],
            vec!["Charlie".into(), "Matcha".into(), "9".into()],
        ],
    )
    .unwrap()
}

fn tea_store() -> TableStore {
    TableStore::open(Box::new(MemorySource::new("tea.csv", tea_table()))).unwrap()
}

fn names(table: &Table) -> Vec<&str> {
    table
        .rows()
        .iter()
        .map(|row| row.cells[0].as_str())
        .collect()
}

fn positions(table: &Table) -> Vec<usize> {
    table.rows().iter().map(|row| row.position).collect()
}

#[test]
fn get_returns_independent_copy() {
    let mut store = tea_store();
    let before = store.get();
    store.add_row(vec!["Dana", "Oolong", "3"]).unwrap();
    assert_eq!(before, tea_table());
    assert_eq!(store.row_count(), 4);
}

#[test]
fn add_row_by_name() {
    let mut store = tea_store();
    let mut row = BTreeMap::new();
    row.insert("Name".to_string(), "Dana".to_string());
    row.insert("Tea".to_string(), "Oolong".to_string());
    row.insert("Number".to_string(), "3".to_string());
    let position = store.add_row(row).unwrap();
    assert_eq!(position, 3);
    assert_eq!(store.row(3).unwrap(), vec!["Dana", "Oolong", "3"]);
}

#[test]
fn remove_single_row_reindexes() {
    let mut store = tea_store();
    store.remove_row(1).unwrap();
    let table = store.get();
    assert_eq!(names(&table), vec!["Alice", "Charlie"]);
    assert_eq!(positions(&table), vec![0, 1]);
}

#[test]
fn remove_multiple_rows() {
    let mut store = tea_store();
    store.remove_rows(&[0, 1], true).unwrap();
    let table = store.get();
    assert_eq!(names(&table), vec!["Charlie"]);
    assert_eq!(positions(&table), vec![0]);
}

#[test]
fn remove_without_reindex_keeps_labels() {
    let mut store = tea_store();
    store.remove_rows(&[1], false).unwrap();
    assert_eq!(positions(&store.get()), vec![0, 2]);
    assert_eq!(store.row(2).unwrap()[0], "Charlie");
    assert_eq!(store.add_row(vec!["Dana", "Oolong", "3"]).unwrap(), 3);
}

#[test]
fn change_row_checks_row_count_on_gapped_table() {
    let mut store = tea_store();
    store.remove_rows(&[1], false).unwrap();
    let before = store.get();

    let err = store.change_row(vec!["X", "Y", "Z"], 2).unwrap_err();
    assert!(matches!(
        err,
        DataFileError::IndexOutOfRange { position: 2, len: 2 }
    ));
    assert_eq!(store.get(), before);

    store.change_row(vec!["Ann", "Green", "7"], 0).unwrap();
    assert_eq!(store.row(0).unwrap()[0], "Ann");
}

#[test]
fn remove_out_of_range_leaves_table_untouched() {
    let mut store = tea_store();
    let err = store.remove_rows(&[0, 5], true).unwrap_err();
    assert!(matches!(
        err,
        DataFileError::IndexOutOfRange {
            position: 5,
            len: 3
        }
    ));
    assert_eq!(store.get(), tea_table());
}

#[test]
fn change_row_replaces_in_place() {
    let mut store = tea_store();
    store.change_row(vec!["Bob", "Earl Grey", "100"], 1).unwrap();
    assert_eq!(store.row(1).unwrap(), vec!["Bob", "Earl Grey", "100"]);
    assert_eq!(store.row_count(), 3);
}

#[test]
fn change_row_out_of_range() {
    let mut store = tea_store();
    let err = store.change_row(vec!["X", "Y", "Z"], 3).unwrap_err();
    assert!(matches!(err, DataFileError::IndexOutOfRange { position: 3, .. }));
    assert_eq!(store.get(), tea_table());
}

#[test]
fn search_exact_nonempty() {
    let store = tea_store();
    let result = store.search("Bob", "Name", true).unwrap();
    assert_eq!(names(&result), vec!["Bob"]);
    assert_eq!(positions(&result), vec![1]);
}

#[test]
fn search_exact_empty() {
    let store = tea_store();
    let result = store.search("Bo", "Name", true).unwrap();
    assert!(result.is_empty());
    assert_eq!(result.columns(), tea_table().columns());
}

#[test]
fn search_substring_keeps_original_positions() {
    let store = tea_store();
    let result = store.search("li", "Name", false).unwrap();
    assert_eq!(names(&result), vec!["Alice", "Charlie"]);
    assert_eq!(positions(&result), vec![0, 2]);
}

#[test]
fn substring_finds_more_than_exact() {
    let store = tea_store();
    let exact = store.search("Green", "Tea", true).unwrap();
    let partial = store.search("e", "Tea", false).unwrap();
    assert_eq!(positions(&exact), vec![0]);
    assert_eq!(positions(&partial), vec![0, 1]);
}

#[test]
fn search_unknown_column() {
    let store = tea_store();
    let err = store.search("Bob", "Coffee", true).unwrap_err();
    assert!(matches!(err, DataFileError::UnknownColumn { column } if column == "Coffee"));
    assert_eq!(store.get(), tea_table());
}

#[test]
fn search_multi_empty_is_whole_table() {
    let store = tea_store();
    assert_eq!(store.search_multi(&[]).unwrap(), tea_table());
}

#[test]
fn search_multi_is_conjunctive() {
    let store = tea_store();
    let result = store
        .search_multi(&[
            SearchPredicate::new("li", "Name", false),
            SearchPredicate::new("9", "Number", true),
        ])
        .unwrap();
    assert_eq!(names(&result), vec!["Charlie"]);
    assert_eq!(positions(&result), vec![2]);
}

#[test]
fn search_multi_reports_first_unknown_column() {
    let store = tea_store();
    let err = store
        .search_multi(&[
            SearchPredicate::new("li", "Name", false),
            SearchPredicate::new("x", "Milk", true),
            SearchPredicate::new("y", "Sugar", true),
        ])
        .unwrap_err();
    assert!(matches!(err, DataFileError::UnknownColumn { column } if column == "Milk"));
}

#[test]
fn search_multi_checks_columns_after_empty_result() {
    let store = tea_store();
    let err = store
        .search_multi(&[
            SearchPredicate::new("Zed", "Name", true),
            SearchPredicate::new("x", "Milk", true),
        ])
        .unwrap_err();
    assert!(matches!(err, DataFileError::UnknownColumn { column } if column == "Milk"));

    let found = store
        .search_multi(&[
            SearchPredicate::new("Zed", "Name", true),
            SearchPredicate::new("9", "Number", true),
        ])
        .unwrap();
    assert!(found.is_empty());
}

#[test]
fn search_multi_on_empty_table_checks_columns() {
    let empty = Table::new(vec!["Name".into()]);
    let store = TableStore::open(Box::new(MemorySource::new("empty.csv", empty))).unwrap();
    let single = store.search("x", "Colour", true).unwrap_err();
    let multi = store
        .search_multi(&[SearchPredicate::new("x", "Colour", true)])
        .unwrap_err();
    assert!(matches!(single, DataFileError::UnknownColumn { .. }));
    assert!(matches!(multi, DataFileError::UnknownColumn { column } if column == "Colour"));
}

#[test]
fn save_delegates_to_source() {
    let source = MemorySource::new("tea.csv", tea_table());
    let saved = source.saved();
    let mut store = TableStore::open(Box::new(source)).unwrap();
    store.remove_row(0).unwrap();
    store.save().unwrap();
    let saved = saved.lock().unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(names(&saved[0]), vec!["Bob", "Charlie"]);
}

#[test]
fn load_discards_unsaved_changes() {
    let mut store = tea_store();
    store.remove_row(0).unwrap();
    let reloaded = store.load().unwrap();
    assert_eq!(reloaded, tea_table());
    assert_eq!(store.row_count(), 3);
}
