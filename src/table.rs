//! Tabular input values.
//!
//! The crate never computes over cell values. A [`Tabular`] input only has
//! to report its cells as display strings and, for dataframe-like values,
//! an ordered sequence of column names.

use serde::{Deserialize, Serialize};

/// A value that can be laid out as a pipe table.
pub trait Tabular {
    /// Cell values, row-major, already converted to display strings.
    fn cells(&self) -> Vec<Vec<String>>;

    /// Column names, if the value carries any (dataframe-like inputs).
    fn column_names(&self) -> Option<Vec<String>> {
        None
    }
}

/// Matrix-like input: rows of displayable values, no column names.
impl<T: ToString> Tabular for Vec<Vec<T>> {
    fn cells(&self) -> Vec<Vec<String>> {
        self.iter()
            .map(|row| row.iter().map(T::to_string).collect())
            .collect()
    }
}

/// A dataframe-like value: named columns plus string rows.
///
/// The column names become the default header row when no explicit
/// headers are passed to the renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    /// Column labels, one per column
    pub columns: Vec<String>,
    /// Data rows
    pub rows: Vec<Vec<String>>,
}

impl Frame {
    /// Create an empty frame with the given column labels.
    pub fn new<S, I>(columns: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = S>,
    {
        Frame {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Builder: append a data row.
    pub fn with_row<S, I>(mut self, cells: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = S>,
    {
        self.push_row(cells);
        self
    }

    /// Append a data row.
    pub fn push_row<S, I>(&mut self, cells: I)
    where
        S: Into<String>,
        I: IntoIterator<Item = S>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

impl Tabular for Frame {
    fn cells(&self) -> Vec<Vec<String>> {
        self.rows.clone()
    }

    fn column_names(&self) -> Option<Vec<String>> {
        if self.columns.is_empty() {
            None
        } else {
            Some(self.columns.clone())
        }
    }
}
