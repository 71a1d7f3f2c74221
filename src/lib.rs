//! # mdtab
//!
//! Converts tabular data like dataframes to GitHub Flavored Markdown pipe
//! tables.
//!
//! ## Overview
//!
//! The crate is a thin formatting layer over a pipe-table layout engine.
//! It adds the conventions the raw engine lacks:
//!
//! - **Header inference**: dataframe-like inputs ([`Frame`]) contribute
//!   their column names when no explicit headers are given
//! - **Blank-header fallback**: headerless tables still get a (blank)
//!   header line, since the pipe format requires one to render
//! - **Alignment overrides**: per-column alignment given as a mapping,
//!   a delimited string, or a sequence ([`FormatSpec`])
//! - **Header-only mode**: [`md_header`] for long tables
//!
//! Alignment format examples:
//!
//! * `FormatSpec::from_mapping([(0, "-:"), (-1, ":-:")])` - integer keys,
//!   negative counting from the end
//! * `FormatSpec::from_mapping([("foo", "-:"), ("bar", ":-:")])` - column
//!   name keys (names win over positions when every key reads as a name)
//! * `FormatSpec::from_delimited("--|-:|--")` or `"|--|-:|--|"`
//! * `FormatSpec::from_sequence(["--", "-:", "--"])`
//!
//! ## Example
//!
//! ```rust
//! use mdtab::{md_table, FormatSpec, Frame, RenderOptions};
//!
//! let frame = Frame::new(["name", "count"])
//!     .with_row(["alpha", "1"])
//!     .with_row(["beta", "22"]);
//!
//! let md = md_table(&frame, &RenderOptions::new()).unwrap();
//! assert_eq!(
//!     md,
//!     "| name  | count |\n\
//!      |:------|------:|\n\
//!      | alpha |     1 |\n\
//!      | beta  |    22 |"
//! );
//!
//! // center the last column, keep the numeric default elsewhere
//! let opts = RenderOptions::new().with_formats(FormatSpec::from_mapping([(-1, "c")]));
//! let md = md_table(&frame, &opts).unwrap();
//! assert_eq!(md.lines().nth(1).unwrap(), "|:------|:-----:|");
//! ```

pub mod align;
pub mod error;
pub mod pipe;
pub mod render;
pub mod table;

pub use align::{normalize, Alignment, ColumnKey, FormatSpec};
pub use error::MdTabError;
pub use pipe::PipeOptions;
pub use render::{extract_header, md_header, md_table, RenderOptions};
pub use table::{Frame, Tabular};

/// Result type for mdtab operations
pub type Result<T> = std::result::Result<T, MdTabError>;
