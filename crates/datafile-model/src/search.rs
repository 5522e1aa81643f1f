//! Search predicates and conjunctive queries.

use std::fmt;

/// `(term, column, exact)`: an exact predicate matches cells equal to `term`,
/// otherwise cells containing `term` as a literal substring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPredicate {
    pub term: String,
    pub column: String,
    pub exact: bool,
}

impl SearchPredicate {
    pub fn new(term: impl Into<String>, column: impl Into<String>, exact: bool) -> Self {
        Self {
            term: term.into(),
            column: column.into(),
            exact,
        }
    }

    pub fn matches(&self, cell: &str) -> bool {
        if self.exact {
            cell == self.term
        } else {
            cell.contains(self.term.as_str())
        }
    }
}

impl fmt::Display for SearchPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let relation = if self.exact { "equals" } else { "contains" };
        write!(f, "{} {} '{}'", self.column, relation, self.term)
    }
}

/// Ordered predicates applied left to right as a logical AND.
/// An empty query selects the whole table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    predicates: Vec<SearchPredicate>,
}

impl SearchQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, predicate: SearchPredicate) {
        self.predicates.push(predicate);
    }

    /// Remove the predicate at `index`, if any.
    pub fn remove(&mut self, index: usize) -> Option<SearchPredicate> {
        (index < self.predicates.len()).then(|| self.predicates.remove(index))
    }

    pub fn clear(&mut self) {
        self.predicates.clear();
    }

    pub fn predicates(&self) -> &[SearchPredicate] {
        &self.predicates
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

impl From<Vec<SearchPredicate>> for SearchQuery {
    fn from(predicates: Vec<SearchPredicate>) -> Self {
        Self { predicates }
    }
}
