//! UCTE document exporters.
//!
//! The exporter writes sections in canonical order (`##C`, `##N`/`##Z`, `##L`,
//! `##T`, `##R`, `##TT`, `##E`) regardless of the order they were decoded in.

mod ucte;

pub use ucte::{encode, write_ucte, EncodeOptions};
