//! Baseline GitHub Flavored Markdown pipe-table renderer.
//!
//! This is the layout engine the public entry points delegate to: it pads
//! cells, infers per-column default alignment, and emits the header,
//! delimiter, and data lines. It knows nothing about alignment overrides;
//! those are spliced in afterwards by [`crate::render`].
//!
//! Output shape with headers:
//!
//! ```text
//! | name  | count |
//! |:------|------:|
//! | alpha |     1 |
//! ```
//!
//! Without headers, the delimiter line comes first.

use serde::{Deserialize, Serialize};

use crate::error::MdTabError;
use crate::Result;

/// Passthrough options for the baseline renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipeOptions {
    /// Placeholder for cells missing from short rows
    pub missing: String,
    /// Right-align columns whose cells all parse as numbers
    pub numalign: bool,
}

impl Default for PipeOptions {
    fn default() -> Self {
        PipeOptions {
            missing: String::new(),
            numalign: true,
        }
    }
}

impl PipeOptions {
    /// Builder: set the placeholder for missing cells.
    pub fn with_missing<S: Into<String>>(mut self, missing: S) -> Self {
        self.missing = missing.into();
        self
    }

    /// Builder: set numeric right-alignment inference.
    pub fn with_numalign(mut self, numalign: bool) -> Self {
        self.numalign = numalign;
        self
    }
}

/// Render a pipe table from string cells.
///
/// `showindex` prepends a zero-based index column (with an empty header
/// label when headers are present). Short rows are padded with the
/// `missing` placeholder; a header row shorter than the widest data row is
/// an error.
pub fn render(
    cells: &[Vec<String>],
    headers: Option<&[String]>,
    showindex: bool,
    opts: &PipeOptions,
) -> Result<String> {
    let mut rows: Vec<Vec<String>> = cells
        .iter()
        .map(|row| row.iter().map(|cell| escape_pipes(cell)).collect())
        .collect();
    let mut header_row: Option<Vec<String>> =
        headers.map(|h| h.iter().map(|label| escape_pipes(label)).collect());

    if showindex {
        for (i, row) in rows.iter_mut().enumerate() {
            row.insert(0, i.to_string());
        }
        if let Some(h) = header_row.as_mut() {
            h.insert(0, String::new());
        }
    }

    let data_width = rows.iter().map(Vec::len).max().unwrap_or(0);
    let width = match &header_row {
        Some(h) => {
            if data_width > h.len() {
                return Err(MdTabError::Render {
                    message: format!(
                        "rows have up to {} columns but only {} headers were given",
                        data_width,
                        h.len()
                    ),
                });
            }
            h.len()
        }
        None => data_width,
    };
    if width == 0 {
        return Ok(String::new());
    }

    for row in rows.iter_mut() {
        while row.len() < width {
            row.push(opts.missing.clone());
        }
    }

    let right_aligned: Vec<bool> = (0..width)
        .map(|col| opts.numalign && is_numeric_column(&rows, col))
        .collect();
    let widths: Vec<usize> = (0..width)
        .map(|col| {
            let header_width = header_row
                .as_ref()
                .map(|h| display_width(&h[col]))
                .unwrap_or(0);
            rows.iter()
                .map(|row| display_width(&row[col]))
                .fold(header_width, usize::max)
                .max(3)
        })
        .collect();

    let mut lines = Vec::with_capacity(rows.len() + 2);
    if let Some(h) = &header_row {
        lines.push(format_row(h, &widths, &right_aligned));
    }
    lines.push(delimiter_row(&widths, &right_aligned));
    for row in &rows {
        lines.push(format_row(row, &widths, &right_aligned));
    }
    Ok(lines.join("\n"))
}

/// GFM requires literal pipes inside cells to be escaped.
fn escape_pipes(s: &str) -> String {
    s.replace('|', "\\|")
}

/// A column is numeric when it has at least one value and every non-empty
/// cell parses as a number.
fn is_numeric_column(rows: &[Vec<String>], col: usize) -> bool {
    let mut saw_value = false;
    for row in rows {
        let cell = row[col].trim();
        if cell.is_empty() {
            continue;
        }
        if cell.parse::<f64>().is_err() {
            return false;
        }
        saw_value = true;
    }
    saw_value
}

fn display_width(s: &str) -> usize {
    s.chars().count()
}

fn format_row(cells: &[String], widths: &[usize], right_aligned: &[bool]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths.iter().zip(right_aligned))
        .map(|(cell, (&width, &right))| {
            let pad = " ".repeat(width.saturating_sub(display_width(cell)));
            if right {
                format!(" {pad}{cell} ")
            } else {
                format!(" {cell}{pad} ")
            }
        })
        .collect();
    format!("|{}|", padded.join("|"))
}

fn delimiter_row(widths: &[usize], right_aligned: &[bool]) -> String {
    let cells: Vec<String> = widths
        .iter()
        .zip(right_aligned)
        .map(|(&width, &right)| {
            let dashes = "-".repeat(width + 1);
            if right {
                format!("{dashes}:")
            } else {
                format!(":{dashes}")
            }
        })
        .collect();
    format!("|{}|", cells.join("|"))
}
