//! DataFile table model.
//!
//! A [`Table`] is an ordered list of text rows under a fixed set of named
//! columns. A [`TableStore`] owns one table together with the
//! [`TablePersistence`] it was loaded from and is the only way to mutate it:
//! rows are appended, removed by position, or replaced, and searched with
//! [`SearchPredicate`]s combined as a conjunction.
//!
//! # Example
//!
//! ```
//! use datafile_model::{MemorySource, SearchPredicate, Table, TableStore};
//!
//! let table = Table::from_records(
//!     vec!["Name".into(), "Tea".into()],
//!     vec![vec!["Alice".into(), "Green".into()], vec!["Bob".into(), "Black".into()]],
//! )?;
//! let store = TableStore::open(Box::new(MemorySource::new("tea", table)))?;
//! let found = store.search_multi(&[SearchPredicate::new("B", "Name", false)])?;
//! assert_eq!(found.rows()[0].position, 1);
//! # Ok::<(), datafile_model::DataFileError>(())
//! ```

pub mod error;
pub mod persistence;
pub mod search;
pub mod store;
pub mod table;

pub use error::{DataFileError, Result};
pub use persistence::{MemorySource, TablePersistence};
pub use search::{SearchPredicate, SearchQuery};
pub use store::TableStore;
pub use table::{Row, RowInput, Table};
