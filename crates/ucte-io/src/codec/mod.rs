//! Fixed-column UCTE codec building blocks.
//!
//! - [`field`] - single column decode and render
//! - [`grammar`] - per-record column layouts and the line matcher
//! - [`records`] - record structs to and from column values
//! - [`sections`] - `##` marker splitting

pub mod field;
pub mod grammar;
pub mod records;
pub mod sections;

pub use field::{decode_field, render, FieldKind, FieldValue};
pub use grammar::{spec_for, DecodedFields, FieldSpec, RecordSpec, RejectedField};
pub use records::UcteRecord;
pub use sections::{split, PayloadLine, Section, SectionTag};
