//! Error types for mdtab

use thiserror::Error;

/// Errors that can occur while building a Markdown table
#[derive(Error, Debug)]
pub enum MdTabError {
    /// Alignment format token count does not match the table's column count
    #[error("alignment format has {actual} tokens but the table has {expected} columns")]
    FormatLength { expected: usize, actual: usize },

    /// Alignment token outside the {none, left, right, center} vocabulary
    #[error("unrecognized alignment token: '{token}'")]
    InvalidToken { token: String },

    /// Integer key in a mapping format falls outside the valid column bounds
    #[error("column index {index} out of range for {columns} columns")]
    ColumnIndex { index: isize, columns: usize },

    /// Name key in a mapping format that matches no column label
    #[error("no column named '{name}'")]
    ColumnName { name: String },

    /// Failure reported by the underlying pipe renderer
    #[error("pipe renderer error: {message}")]
    Render { message: String },
}
