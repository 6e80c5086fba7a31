//! UCTE document importers.
//!
//! Decoding never fails. Every line that could not be taken over verbatim is
//! reported in [`ImportResult::diagnostics`] instead:
//!
//! ```no_run
//! use ucte_io::importers::parse_ucte;
//!
//! let result = parse_ucte("20240115_1030_SN1_SK0.uct")?;
//! let doc = result.document;
//!
//! if result.diagnostics.has_errors() {
//!     eprintln!("{}", result.diagnostics);
//! }
//! for view in doc.area_views() {
//!     println!("{}: {} nodes", view.code(), view.nodes().count());
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Decode Pipeline
//!
//! 1. **Section split** - `##` markers, unknown markers become warnings
//! 2. **Record match** - fixed-column layouts per record type
//! 3. **Collection** - keyed insert, duplicates replace earlier records
//! 4. **Area resolution** - `##Z` code, or the node code prefix under `##N`
//! 5. **Cross-link** - transformers pick up their regulation and tap rows
//!
//! ## Public API
//!
//! - [`decode`] / [`decode_with`] - decode text
//! - [`parse_ucte`] - decode a file (UTF-8 or ISO-8859-1)
//! - [`parse_file_name`] / [`FileNameMetadata`] - standard file name metadata

pub mod file_name;
mod ucte;

pub use file_name::{parse_file_name, BusinessType, FileNameMetadata};
pub use ucte::{decode, decode_with, parse_ucte, ImportResult};
