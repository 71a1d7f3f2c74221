//! Alignment tokens and format specifications.
//!
//! Users describe per-column alignment in one of three literal shapes: a
//! mapping from column key to token, a pipe-delimited (or compact
//! per-character) token string, or a sequence of tokens. This module
//! normalizes all of them into one canonical row of [`Alignment`] values,
//! one per table column, which the renderer then merges into the table's
//! delimiter line.

use std::collections::HashSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MdTabError;
use crate::Result;

/// Per-column text justification in the rendered table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Alignment {
    /// No preference: the renderer's default alignment stands
    #[default]
    None,
    /// Left-aligned (`:--`)
    Left,
    /// Right-aligned (`--:`)
    Right,
    /// Centered (`:-:`)
    Center,
}

impl Alignment {
    /// Canonical Markdown delimiter cell at minimum width.
    pub fn marker(&self) -> &'static str {
        match self {
            Alignment::None => "---",
            Alignment::Left => ":--",
            Alignment::Right => "--:",
            Alignment::Center => ":-:",
        }
    }
}

impl FromStr for Alignment {
    type Err = MdTabError;

    /// Parse a single alignment token.
    ///
    /// Accepts short letter codes (`l`, `r`, `c`, `-` or the empty string),
    /// spelled-out names, and explicit Markdown delimiter forms (`:-`,
    /// `-:`, `:-:`, `--`). Case-insensitive.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let token = s.trim();
        match token.to_lowercase().as_str() {
            "" | "-" | "none" => return Ok(Alignment::None),
            "l" | "left" => return Ok(Alignment::Left),
            "r" | "right" => return Ok(Alignment::Right),
            "c" | "center" => return Ok(Alignment::Center),
            _ => {}
        }
        if is_delimiter_cell(token) {
            return Ok(
                match (token.starts_with(':'), token.ends_with(':')) {
                    (true, true) => Alignment::Center,
                    (true, false) => Alignment::Left,
                    (false, true) => Alignment::Right,
                    (false, false) => Alignment::None,
                },
            );
        }
        Err(MdTabError::InvalidToken {
            token: s.to_string(),
        })
    }
}

/// True for Markdown delimiter-row cells: an optional colon on either side
/// of a non-empty dash run.
pub(crate) fn is_delimiter_cell(s: &str) -> bool {
    let body = s.strip_prefix(':').unwrap_or(s);
    let body = body.strip_suffix(':').unwrap_or(body);
    !body.is_empty() && body.bytes().all(|b| b == b'-')
}

/// Key addressing a column in a mapping-based format spec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKey {
    /// Zero-based position; negative counts back from the last column
    Position(isize),
    /// Column label, resolved against the header row
    Name(String),
}

impl ColumnKey {
    /// The key as it would read if used as a column label.
    ///
    /// Positions render as their decimal form, so `Position(0)` can match
    /// a column literally named `"0"` under the name-priority tie-break.
    fn name_form(&self) -> String {
        match self {
            ColumnKey::Position(i) => i.to_string(),
            ColumnKey::Name(s) => s.clone(),
        }
    }
}

impl From<isize> for ColumnKey {
    fn from(i: isize) -> Self {
        ColumnKey::Position(i)
    }
}

impl From<i32> for ColumnKey {
    fn from(i: i32) -> Self {
        ColumnKey::Position(i as isize)
    }
}

impl From<&str> for ColumnKey {
    fn from(s: &str) -> Self {
        ColumnKey::Name(s.to_string())
    }
}

impl From<String> for ColumnKey {
    fn from(s: String) -> Self {
        ColumnKey::Name(s)
    }
}

/// User-facing alignment specification, in one of three literal shapes.
///
/// All three feed the same canonical representation via [`normalize`]:
///
/// * mapping: `FormatSpec::from_mapping([(0, "-:"), (-1, ":-:")])` or
///   name keys like `[("foo", "-:")]`
/// * string: `FormatSpec::from_delimited("--|-:|--")` (optionally wrapped
///   in outer pipes) or the compact form `"lrc-"`
/// * sequence: `FormatSpec::from_sequence(["--", "-:", "--"])`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormatSpec {
    /// Per-column overrides keyed by position or name; unmentioned columns
    /// keep no-preference
    Mapping(Vec<(ColumnKey, String)>),
    /// Pipe-delimited token string, or a compact per-character code string
    Delimited(String),
    /// One token per column
    Sequence(Vec<String>),
}

impl FormatSpec {
    /// Mapping shape. Entry order is preserved; a key mentioned twice is
    /// resolved twice, so the last entry wins.
    pub fn from_mapping<K, V, I>(entries: I) -> Self
    where
        K: Into<ColumnKey>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        FormatSpec::Mapping(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Delimited-string shape.
    pub fn from_delimited<S: Into<String>>(s: S) -> Self {
        FormatSpec::Delimited(s.into())
    }

    /// Sequence shape.
    pub fn from_sequence<S, I>(tokens: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = S>,
    {
        FormatSpec::Sequence(tokens.into_iter().map(Into::into).collect())
    }
}

/// Normalize a format spec into one alignment per column.
///
/// `header_row` is the ordered sequence of column labels as they appear in
/// the final header; it only matters for name-keyed mapping entries.
/// `columns` is the authoritative column count.
pub fn normalize(
    spec: &FormatSpec,
    header_row: &[String],
    columns: usize,
) -> Result<Vec<Alignment>> {
    match spec {
        FormatSpec::Delimited(s) => sequence_to_row(&split_tokens(s), columns),
        FormatSpec::Sequence(tokens) => sequence_to_row(tokens, columns),
        FormatSpec::Mapping(entries) => mapping_to_row(entries, header_row, columns),
    }
}

/// Split a string-shaped spec into tokens.
///
/// A string containing `|` is pipe-delimited, with optional outer pipes
/// stripped. A pipe-free string whose characters are all short codes is
/// the compact form, one token per character. Any other pipe-free string
/// is a single token.
fn split_tokens(s: &str) -> Vec<String> {
    if s.contains('|') {
        let mut parts: Vec<&str> = s.split('|').collect();
        if parts.first() == Some(&"") {
            parts.remove(0);
        }
        if parts.last() == Some(&"") {
            parts.pop();
        }
        parts.into_iter().map(str::to_string).collect()
    } else if s.is_empty() {
        Vec::new()
    } else if s
        .chars()
        .all(|c| matches!(c.to_ascii_lowercase(), 'l' | 'r' | 'c' | '-'))
    {
        s.chars().map(|c| c.to_string()).collect()
    } else {
        vec![s.to_string()]
    }
}

fn sequence_to_row(tokens: &[String], columns: usize) -> Result<Vec<Alignment>> {
    if tokens.len() != columns {
        return Err(MdTabError::FormatLength {
            expected: columns,
            actual: tokens.len(),
        });
    }
    tokens.iter().map(|t| t.parse()).collect()
}

fn mapping_to_row(
    entries: &[(ColumnKey, String)],
    header_row: &[String],
    columns: usize,
) -> Result<Vec<Alignment>> {
    if columns == 0 {
        return if entries.is_empty() {
            Ok(Vec::new())
        } else {
            Err(MdTabError::FormatLength {
                expected: 0,
                actual: entries.len(),
            })
        };
    }

    // Name resolution takes priority: when the header row is usable as a
    // key space and every key reads as one of its labels, resolve all keys
    // by name, even keys that look like integer positions.
    let by_name = headers_usable(header_row, columns)
        && entries
            .iter()
            .all(|(key, _)| header_row.contains(&key.name_form()));

    let mut row = vec![Alignment::None; columns];
    for (key, token) in entries {
        let align: Alignment = token.parse()?;
        let position = if by_name {
            resolve_name(&key.name_form(), header_row)?
        } else {
            match key {
                ColumnKey::Position(i) => resolve_position(*i, columns)?,
                ColumnKey::Name(name) => resolve_name(name, header_row)?,
            }
        };
        row[position] = align;
    }
    Ok(row)
}

/// Headers can key a mapping only when present for every column and distinct.
fn headers_usable(header_row: &[String], columns: usize) -> bool {
    if header_row.len() != columns || header_row.is_empty() {
        return false;
    }
    let mut seen = HashSet::new();
    header_row.iter().all(|label| seen.insert(label.as_str()))
}

fn resolve_position(index: isize, columns: usize) -> Result<usize> {
    let bound = columns as isize;
    if index >= 0 && index < bound {
        Ok(index as usize)
    } else if index < 0 && index >= -bound {
        Ok((bound + index) as usize)
    } else {
        Err(MdTabError::ColumnIndex { index, columns })
    }
}

fn resolve_name(name: &str, header_row: &[String]) -> Result<usize> {
    header_row
        .iter()
        .position(|label| label == name)
        .ok_or_else(|| MdTabError::ColumnName {
            name: name.to_string(),
        })
}

/// Merge a normalized row into the renderer's baseline delimiter cells.
///
/// No-preference keeps the baseline cell untouched, so renderer defaults
/// (numeric right-alignment) survive. Other tokens rewrite the cell's edge
/// characters while preserving its width.
pub(crate) fn merge_into_baseline(row: &[Alignment], baseline: &[String]) -> Vec<String> {
    row.iter()
        .zip(baseline)
        .map(|(align, cell)| apply_marker(*align, cell))
        .collect()
}

fn apply_marker(align: Alignment, cell: &str) -> String {
    if align == Alignment::None {
        return cell.to_string();
    }
    let width = cell.chars().count();
    if width < 3 {
        return align.marker().to_string();
    }
    let dashes = "-".repeat(width - 2);
    match align {
        Alignment::Left => format!(":{dashes}-"),
        Alignment::Right => format!("-{dashes}:"),
        Alignment::Center => format!(":{dashes}:"),
        Alignment::None => cell.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_token_short_codes() {
        assert_eq!("l".parse::<Alignment>().unwrap(), Alignment::Left);
        assert_eq!("R".parse::<Alignment>().unwrap(), Alignment::Right);
        assert_eq!("c".parse::<Alignment>().unwrap(), Alignment::Center);
        assert_eq!("-".parse::<Alignment>().unwrap(), Alignment::None);
        assert_eq!("".parse::<Alignment>().unwrap(), Alignment::None);
        assert_eq!("LEFT".parse::<Alignment>().unwrap(), Alignment::Left);
    }

    #[test]
    fn test_token_delimiter_forms() {
        assert_eq!(":-".parse::<Alignment>().unwrap(), Alignment::Left);
        assert_eq!("-:".parse::<Alignment>().unwrap(), Alignment::Right);
        assert_eq!(":-:".parse::<Alignment>().unwrap(), Alignment::Center);
        assert_eq!("---".parse::<Alignment>().unwrap(), Alignment::None);
        assert_eq!(":----:".parse::<Alignment>().unwrap(), Alignment::Center);
    }

    #[test]
    fn test_token_invalid() {
        for bad in ["x", "::", ":", "le ft", "--x"] {
            let err = bad.parse::<Alignment>().unwrap_err();
            assert!(matches!(err, MdTabError::InvalidToken { .. }), "{bad}");
        }
    }

    #[test]
    fn test_marker_forms() {
        assert_eq!(Alignment::None.marker(), "---");
        assert_eq!(Alignment::Left.marker(), ":--");
        assert_eq!(Alignment::Right.marker(), "--:");
        assert_eq!(Alignment::Center.marker(), ":-:");
    }

    #[test]
    fn test_sequence_normalize() {
        let spec = FormatSpec::from_sequence(["--", "-:", ":-:"]);
        let row = normalize(&spec, &labels(&["a", "b", "c"]), 3).unwrap();
        assert_eq!(row, vec![Alignment::None, Alignment::Right, Alignment::Center]);
    }

    #[test]
    fn test_sequence_length_mismatch() {
        let spec = FormatSpec::from_sequence(["l", "r", "c"]);
        let err = normalize(&spec, &labels(&["a", "b", "c", "d"]), 4).unwrap_err();
        assert!(matches!(
            err,
            MdTabError::FormatLength {
                expected: 4,
                actual: 3
            }
        ));
    }

    #[test]
    fn test_sequence_invalid_token() {
        let spec = FormatSpec::from_sequence(["l", "bogus"]);
        let err = normalize(&spec, &labels(&["a", "b"]), 2).unwrap_err();
        assert!(matches!(err, MdTabError::InvalidToken { .. }));
    }

    #[test]
    fn test_delimited_with_and_without_outer_pipes() {
        let bare = normalize(&FormatSpec::from_delimited("--|-:|--"), &[], 3).unwrap();
        let wrapped = normalize(&FormatSpec::from_delimited("|--|-:|--|"), &[], 3).unwrap();
        assert_eq!(bare, wrapped);
        assert_eq!(bare[1], Alignment::Right);
    }

    #[test]
    fn test_delimited_compact_form() {
        let spec = FormatSpec::from_delimited("lrc-");
        let row = normalize(&spec, &[], 4).unwrap();
        assert_eq!(
            row,
            vec![
                Alignment::Left,
                Alignment::Right,
                Alignment::Center,
                Alignment::None
            ]
        );
    }

    #[test]
    fn test_delimited_single_token() {
        // pipe-free and not a compact code string: one token, one column
        let spec = FormatSpec::from_delimited(":-:");
        assert_eq!(normalize(&spec, &[], 1).unwrap(), vec![Alignment::Center]);
        assert!(normalize(&spec, &[], 2).is_err());
    }

    #[test]
    fn test_delimited_length_mismatch() {
        let spec = FormatSpec::from_delimited("--|-:|--");
        let err = normalize(&spec, &[], 4).unwrap_err();
        assert!(matches!(
            err,
            MdTabError::FormatLength {
                expected: 4,
                actual: 3
            }
        ));
    }

    #[test]
    fn test_mapping_integer_keys() {
        let spec = FormatSpec::from_mapping([(0, "-:"), (-1, ":-:")]);
        let row = normalize(&spec, &labels(&["a", "b", "c"]), 3).unwrap();
        assert_eq!(row, vec![Alignment::Right, Alignment::None, Alignment::Center]);
    }

    #[test]
    fn test_mapping_index_out_of_range() {
        let spec = FormatSpec::from_mapping([(3, "c")]);
        let err = normalize(&spec, &labels(&["a", "b", "c"]), 3).unwrap_err();
        assert!(matches!(
            err,
            MdTabError::ColumnIndex {
                index: 3,
                columns: 3
            }
        ));

        let spec = FormatSpec::from_mapping([(-4, "c")]);
        assert!(normalize(&spec, &labels(&["a", "b", "c"]), 3).is_err());

        let spec = FormatSpec::from_mapping([(isize::MIN, "c")]);
        let err = normalize(&spec, &labels(&["a", "b", "c"]), 3).unwrap_err();
        assert!(matches!(err, MdTabError::ColumnIndex { .. }));

        // boundaries of [-columns, columns)
        let spec = FormatSpec::from_mapping([(-3, "l"), (2, "r")]);
        let row = normalize(&spec, &labels(&["a", "b", "c"]), 3).unwrap();
        assert_eq!(row, vec![Alignment::Left, Alignment::None, Alignment::Right]);
    }

    #[test]
    fn test_mapping_name_keys() {
        let spec = FormatSpec::from_mapping([("foo", "-:"), ("bar", ":-:")]);
        let row = normalize(&spec, &labels(&["foo", "bar", "baz"]), 3).unwrap();
        assert_eq!(row, vec![Alignment::Right, Alignment::Center, Alignment::None]);
    }

    #[test]
    fn test_mapping_unknown_name() {
        let spec = FormatSpec::from_mapping([("nope", "c")]);
        let err = normalize(&spec, &labels(&["a", "b"]), 2).unwrap_err();
        assert!(matches!(err, MdTabError::ColumnName { .. }));
    }

    #[test]
    fn test_mapping_empty_header_row() {
        let spec = FormatSpec::from_mapping([("a", "c")]);
        let err = normalize(&spec, &[], 2).unwrap_err();
        assert!(matches!(err, MdTabError::ColumnName { .. }));
    }

    #[test]
    fn test_mapping_name_priority_over_position() {
        // all keys read as column labels, so "0" addresses the column
        // named "0" (position 1), not position 0
        let spec = FormatSpec::from_mapping([(0, "c")]);
        let row = normalize(&spec, &labels(&["1", "0"]), 2).unwrap();
        assert_eq!(row, vec![Alignment::None, Alignment::Center]);
    }

    #[test]
    fn test_mapping_positional_fallback_on_mixed_keys() {
        // "-1" is not a label, so every key resolves by its own kind
        let spec = FormatSpec::from_mapping([
            (ColumnKey::from("a"), "r"),
            (ColumnKey::from(-1), "c"),
        ]);
        let row = normalize(&spec, &labels(&["a", "b", "c"]), 3).unwrap();
        assert_eq!(row, vec![Alignment::Right, Alignment::None, Alignment::Center]);
    }

    #[test]
    fn test_mapping_duplicate_key_last_wins() {
        let spec = FormatSpec::from_mapping([(0, "l"), (0, "r")]);
        let row = normalize(&spec, &labels(&["a"]), 1).unwrap();
        assert_eq!(row, vec![Alignment::Right]);
    }

    #[test]
    fn test_zero_columns() {
        let empty = FormatSpec::from_sequence(Vec::<String>::new());
        assert_eq!(normalize(&empty, &[], 0).unwrap(), Vec::new());

        for spec in [
            FormatSpec::from_sequence(["l"]),
            FormatSpec::from_delimited("-"),
            FormatSpec::from_mapping([(0, "l")]),
        ] {
            let err = normalize(&spec, &[], 0).unwrap_err();
            assert!(matches!(err, MdTabError::FormatLength { expected: 0, .. }));
        }
    }

    #[test]
    fn test_merge_keeps_baseline_for_no_preference() {
        let baseline = vec!["----:".to_string(), ":----".to_string()];
        let merged = merge_into_baseline(&[Alignment::None, Alignment::None], &baseline);
        assert_eq!(merged, baseline);
    }

    #[test]
    fn test_merge_preserves_cell_width() {
        let baseline = vec!["-----:".to_string(), "------".to_string()];
        let merged = merge_into_baseline(&[Alignment::Center, Alignment::Left], &baseline);
        assert_eq!(merged, vec![":----:", ":-----"]);
    }
}
