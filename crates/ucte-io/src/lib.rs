//! # ucte-io: UCTE Data Exchange Format I/O
//!
//! Codec for the line-oriented, fixed-column UCTE grid exchange format.
//! Decodes a document into a [`ucte_core::Document`] and encodes it back in
//! the same layout.
//!
//! ## Design Philosophy
//!
//! **Declarative layouts**: every record type is a table of columns (name,
//! width, value type, optional). One generic matcher and one generic renderer
//! serve all six record types.
//!
//! **Error Recovery**: decoding never fails. Unmatched lines, duplicates,
//! unusable values and unknown section markers are collected as diagnostics.
//!
//! **Stable round trips**: a decoded document re-encodes to text that decodes
//! to the same document.
//!
//! ## Quick Start
//!
//! ```rust
//! use ucte_io::{decode, encode, EncodeOptions};
//!
//! let text = "##C 2007.05.01\nexample\n##N\n##ZSK\n\
//!             QBYST21A BYSTRICANY   0 3 400.00 120.000 30.0000  -400.0  -50.00 \n\
//!             ###L\n\n##T\n\n";
//! let result = decode(text);
//! assert_eq!(result.document.nodes.len(), 1);
//! assert!(!result.diagnostics.has_issues());
//!
//! let out = encode(&result.document, &EncodeOptions::trimmed());
//! assert_eq!(out, text);
//! ```
//!
//! ## Module Overview
//!
//! - [`codec`] - field codec, record layouts, section splitter
//! - [`importers`] - document decode, file reading, file name metadata
//! - [`exporters`] - document encode and file writing

pub mod codec;
pub mod exporters;
pub mod importers;

pub use exporters::{encode, write_ucte, EncodeOptions};
pub use importers::{
    decode, decode_with, parse_file_name, parse_ucte, FileNameMetadata, ImportResult,
};
