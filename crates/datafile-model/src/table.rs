#![deny(unsafe_code)]

use std::collections::BTreeMap;

use crate::error::{DataFileError, Result};
use crate::search::SearchPredicate;

/// One record of a [`Table`].
///
/// `position` is the row's identity: filtering keeps it, only an explicit
/// renumbering changes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub position: usize,
    pub cells: Vec<String>,
}

impl Row {
    pub fn cell(&self, column_index: usize) -> Option<&str> {
        self.cells.get(column_index).map(String::as_str)
    }
}

/// Ordered rows sharing one fixed, named column set. Every cell is text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Build a table from raw records, numbering them `0..n`.
    pub fn from_records(columns: Vec<String>, records: Vec<Vec<String>>) -> Result<Self> {
        let mut table = Self::new(columns);
        for record in records {
            table.push(RowInput::Positional(record))?;
        }
        Ok(table)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, column: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|name| name == column)
            .ok_or_else(|| DataFileError::UnknownColumn {
                column: column.to_string(),
            })
    }

    /// Look up a row by its position label.
    pub fn row_at(&self, position: usize) -> Option<&Row> {
        self.rows.iter().find(|row| row.position == position)
    }

    /// The first `n` rows, positions untouched.
    pub fn head(&self, n: usize) -> Self {
        Self {
            columns: self.columns.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }

    /// Copy of the table with positions renumbered `0..n`.
    pub fn reindexed(mut self) -> Self {
        self.renumber();
        self
    }

    /// Rows matching `predicate`, original positions preserved.
    pub fn filter(&self, predicate: &SearchPredicate) -> Result<Self> {
        let index = self.column_index(&predicate.column)?;
        let rows = self
            .rows
            .iter()
            .filter(|row| row.cell(index).is_some_and(|cell| predicate.matches(cell)))
            .cloned()
            .collect();
        Ok(Self {
            columns: self.columns.clone(),
            rows,
        })
    }

    pub(crate) fn index_of(&self, position: usize) -> Result<usize> {
        self.rows
            .iter()
            .position(|row| row.position == position)
            .ok_or(DataFileError::IndexOutOfRange {
                position,
                len: self.rows.len(),
            })
    }

    pub(crate) fn push(&mut self, input: RowInput) -> Result<usize> {
        let cells = input.resolve(&self.columns)?;
        let position = self.rows.last().map_or(0, |row| row.position + 1);
        self.rows.push(Row { position, cells });
        Ok(position)
    }

    pub(crate) fn replace(&mut self, index: usize, input: RowInput) -> Result<()> {
        let cells = input.resolve(&self.columns)?;
        self.rows[index].cells = cells;
        Ok(())
    }

    pub(crate) fn retain_rows<F>(&mut self, keep: F)
    where
        F: FnMut(&Row) -> bool,
    {
        self.rows.retain(keep);
    }

    pub(crate) fn renumber(&mut self) {
        for (position, row) in self.rows.iter_mut().enumerate() {
            row.position = position;
        }
    }
}

/// Values for a new or replacement row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowInput {
    /// One value per column, in column order.
    Positional(Vec<String>),
    /// Values keyed by column name; must cover every column.
    Named(BTreeMap<String, String>),
}

impl RowInput {
    pub(crate) fn resolve(self, columns: &[String]) -> Result<Vec<String>> {
        match self {
            Self::Positional(values) => {
                if values.len() != columns.len() {
                    return Err(DataFileError::ArityMismatch {
                        expected: columns.len(),
                        found: values.len(),
                    });
                }
                Ok(values)
            }
            Self::Named(mut values) => {
                let mut cells = Vec::with_capacity(columns.len());
                for column in columns {
                    let value =
                        values
                            .remove(column)
                            .ok_or_else(|| DataFileError::MissingColumn {
                                column: column.clone(),
                            })?;
                    cells.push(value);
                }
                if let Some(column) = values.into_keys().next() {
                    return Err(DataFileError::UnknownColumn { column });
                }
                Ok(cells)
            }
        }
    }
}

impl From<Vec<String>> for RowInput {
    fn from(values: Vec<String>) -> Self {
        Self::Positional(values)
    }
}

impl From<Vec<&str>> for RowInput {
    fn from(values: Vec<&str>) -> Self {
        Self::Positional(values.into_iter().map(String::from).collect())
    }
}

impl From<BTreeMap<String, String>> for RowInput {
    fn from(values: BTreeMap<String, String>) -> Self {
        Self::Named(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<String> {
        vec!["Name".to_string(), "Tea".to_string()]
    }

    #[test]
    fn named_row_resolves_in_column_order() {
        let mut values = BTreeMap::new();
        values.insert("Tea".to_string(), "Green".to_string());
        values.insert("Name".to_string(), "Alice".to_string());
        let cells = RowInput::Named(values).resolve(&columns()).unwrap();
        assert_eq!(cells, vec!["Alice", "Green"]);
    }

    #[test]
    fn named_row_must_cover_every_column() {
        let mut values = BTreeMap::new();
        values.insert("Name".to_string(), "Alice".to_string());
        let err = RowInput::Named(values).resolve(&columns()).unwrap_err();
        assert!(matches!(err, DataFileError::MissingColumn { column } if column == "Tea"));
    }

    #[test]
    fn named_row_rejects_extra_column() {
        let mut values = BTreeMap::new();
        values.insert("Name".to_string(), "Alice".to_string());
        values.insert("Tea".to_string(), "Green".to_string());
        values.insert("Milk".to_string(), "yes".to_string());
        let err = RowInput::Named(values).resolve(&columns()).unwrap_err();
        assert!(matches!(err, DataFileError::UnknownColumn { column } if column == "Milk"));
    }

    #[test]
    fn positional_row_checks_arity() {
        let err = RowInput::from(vec!["Alice"]).resolve(&columns()).unwrap_err();
        assert!(matches!(
            err,
            DataFileError::ArityMismatch {
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn push_continues_after_last_label() {
        let mut table =
            Table::from_records(columns(), vec![vec!["A".into(), "x".into()]]).unwrap();
        table.rows[0].position = 4;
        let position = table.push(RowInput::from(vec!["B", "y"])).unwrap();
        assert_eq!(position, 5);
    }

    #[test]
    fn head_and_reindex() {
        let table = Table::from_records(
            columns(),
            vec![
                vec!["A".into(), "x".into()],
                vec!["B".into(), "y".into()],
                vec!["C".into(), "z".into()],
            ],
        )
        .unwrap();
        let tail = table.filter(&SearchPredicate::new("z", "Tea", true)).unwrap();
        assert_eq!(tail.rows()[0].position, 2);
        assert_eq!(tail.reindexed().rows()[0].position, 0);
        assert_eq!(table.head(2).len(), 2);
        assert_eq!(table.head(10).len(), 3);
    }
}
