//! Public rendering entry points.
//!
//! [`md_table`] turns any [`Tabular`] value into a GitHub Flavored
//! Markdown pipe table: it resolves the effective header row, delegates
//! layout to the baseline renderer, synthesizes a blank header line when
//! the format requires one, and splices in normalized alignment overrides.
//! [`md_header`] is the same pipeline but keeps only the header and
//! delimiter lines.

use serde::{Deserialize, Serialize};

use crate::align::{self, is_delimiter_cell, FormatSpec};
use crate::error::MdTabError;
use crate::pipe::{self, PipeOptions};
use crate::table::Tabular;
use crate::Result;

/// Options for [`md_table`] and [`md_header`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Explicit header row; wins over column names carried by the data
    pub headers: Option<Vec<String>>,
    /// Prepend a zero-based index column
    pub showindex: bool,
    /// Per-column alignment overrides
    pub formats: Option<FormatSpec>,
    /// Passthrough options for the baseline renderer
    pub pipe: PipeOptions,
}

impl RenderOptions {
    /// Create default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set an explicit header row.
    pub fn with_headers<S, I>(mut self, headers: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = S>,
    {
        self.headers = Some(headers.into_iter().map(Into::into).collect());
        self
    }

    /// Builder: show the index column.
    pub fn with_showindex(mut self, show: bool) -> Self {
        self.showindex = show;
        self
    }

    /// Builder: set alignment overrides.
    pub fn with_formats(mut self, formats: FormatSpec) -> Self {
        self.formats = Some(formats);
        self
    }

    /// Builder: set renderer passthrough options.
    pub fn with_pipe(mut self, pipe: PipeOptions) -> Self {
        self.pipe = pipe;
        self
    }
}

/// Convert tabular data to a GitHub Flavored Markdown pipe table.
pub fn md_table<T: Tabular + ?Sized>(data: &T, opts: &RenderOptions) -> Result<String> {
    render_table(data, opts, false)
}

/// Like [`md_table`], but return only the header and delimiter lines.
///
/// Returns the empty string when the rendered table has no header line.
pub fn md_header<T: Tabular + ?Sized>(data: &T, opts: &RenderOptions) -> Result<String> {
    render_table(data, opts, true)
}

fn render_table<T: Tabular + ?Sized>(
    data: &T,
    opts: &RenderOptions,
    headers_only: bool,
) -> Result<String> {
    let headers = match &opts.headers {
        Some(h) => Some(h.clone()),
        None => data.column_names(),
    };
    let cells = data.cells();
    let baseline = pipe::render(&cells, headers.as_deref(), opts.showindex, &opts.pipe)?;

    let mut lines: Vec<String> = baseline
        .split('\n')
        .map(|line| line.trim_end_matches('\r').to_string())
        .collect();

    let delimiter_index = find_delimiter(&lines)?;
    if delimiter_index == 0 {
        // headerless output: a pipe table still needs a header line, so
        // synthesize a blank one matching the delimiter's shape
        let blank: String = lines[0]
            .chars()
            .map(|c| if c == '|' { '|' } else { ' ' })
            .collect();
        lines.insert(0, blank);
    }

    if let Some(spec) = &opts.formats {
        let labels: Vec<String> = split_row(&lines[0])
            .iter()
            .map(|cell| cell.trim().to_string())
            .collect();
        let overrides = align::normalize(spec, &labels, labels.len())?;
        let baseline_cells = split_row(&lines[1]);
        lines[1] = join_row(&align::merge_into_baseline(&overrides, &baseline_cells));
    }

    let rendered = lines.join("\n");
    if headers_only {
        Ok(extract_header(&rendered))
    } else {
        Ok(rendered)
    }
}

/// Return the first two lines (header + delimiter) of a rendered table.
///
/// Pure string operation: when fewer than two lines exist, or the first
/// line is empty after trimming, returns the empty string.
pub fn extract_header(rendered: &str) -> String {
    let mut lines = rendered.split('\n').map(|line| line.trim_end_matches('\r'));
    let (Some(first), Some(second)) = (lines.next(), lines.next()) else {
        return String::new();
    };
    if first.trim().is_empty() {
        return String::new();
    }
    format!("{first}\n{second}")
}

/// Locate the delimiter line within the first two renderer output lines.
///
/// Index 0 means the renderer produced no header line. A delimiter at
/// index 1 must agree with the header line above it; renderer output that
/// has no delimiter line at all is reported as an opaque render failure.
fn find_delimiter(lines: &[String]) -> Result<usize> {
    let index = (0..lines.len().min(2))
        .rev()
        .find(|&i| is_delimiter_line(&lines[i]))
        .ok_or_else(|| MdTabError::Render {
            message: format!(
                "renderer output has no delimiter line in: {:?}",
                lines.iter().take(2).collect::<Vec<_>>()
            ),
        })?;
    if index == 1 {
        let header = &lines[0];
        let well_formed = header.starts_with('|')
            && header.ends_with('|')
            && split_row(header).len() == split_row(&lines[1]).len();
        if !well_formed {
            return Err(MdTabError::Render {
                message: format!("header and delimiter lines disagree: {:?}", &lines[..2]),
            });
        }
    }
    Ok(index)
}

// Cells must match exactly: the renderer pads data and header cells with
// spaces but emits delimiter cells bare, so a data row of dash runs never
// reads as a delimiter line.
fn is_delimiter_line(line: &str) -> bool {
    if !line.starts_with('|') || !line.ends_with('|') || line.len() < 2 {
        return false;
    }
    let cells = split_row(line);
    !cells.is_empty() && cells.iter().all(|cell| is_delimiter_cell(cell))
}

/// Split a pipe-table line into cells, honoring `\|` escapes.
///
/// Outer pipes are stripped; escaped pipes are unescaped in the returned
/// cell text so column labels read the way the caller wrote them.
fn split_row(line: &str) -> Vec<String> {
    let body = line.strip_prefix('|').unwrap_or(line);
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'|') => {
                chars.next();
                current.push('|');
            }
            '|' => {
                cells.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    if !current.is_empty() {
        cells.push(current);
    }
    cells
}

fn join_row(cells: &[String]) -> String {
    format!("|{}|", cells.join("|"))
}
