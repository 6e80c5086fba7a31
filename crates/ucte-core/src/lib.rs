//! # ucte-core: UCTE Grid Document Model
//!
//! Entity graph of a UCTE data exchange document: nodes, lines, two-winding
//! transformers with their regulation and tap tables, scheduled exchanges and
//! the areas the nodes belong to.
//!
//! ## Design Philosophy
//!
//! A [`Document`] is the single owner of every record:
//! - **Keyed collections**: insertion-ordered maps keyed by the record identity
//!   (node code, [`BranchKey`], [`ParameterKey`], [`ScheduleKey`])
//! - **Index links**: transformers refer to their regulation and tap rows by
//!   position, filled by [`Document::link`]
//! - **Lazy membership**: areas store only their code; [`AreaView`] derives
//!   nodes, lines and net positions from the document
//!
//! ## Quick Start
//!
//! ```rust
//! use ucte_core::*;
//!
//! let mut doc = Document::new();
//! doc.register_area("SK");
//! doc.insert_node(Node {
//!     code: "QBYST21A".to_string(),
//!     name: "BYSTRICANY".to_string(),
//!     node_type: Some(NodeType::Slack),
//!     pl: Some(120.0),
//!     pg: Some(-400.0),
//!     area: Some("SK".to_string()),
//!     ..Node::default()
//! });
//! doc.insert_transformer(Transformer {
//!     node1: "QBYST21A".to_string(),
//!     node2: "QBYST51A".to_string(),
//!     order_code: "1".to_string(),
//!     ..Transformer::default()
//! });
//! doc.link();
//!
//! let sk = doc.area("SK").unwrap();
//! assert_eq!(sk.net_position(), 280.0);
//! assert_eq!(doc.slack_nodes().count(), 1);
//! ```
//!
//! ## Area Resolution
//!
//! Nodes declared outside a `##Z` block are assigned through an
//! [`AreaLookup`]. [`CountryTable`] resolves the area from the first character
//! of the node code.

pub mod area;
pub mod diagnostics;
pub mod document;
pub mod elements;
pub mod error;
pub mod reference;

pub use area::{Area, AreaView, X_NODE_AREA};
pub use diagnostics::{DiagnosticIssue, ImportDiagnostics, ImportStats, Severity};
pub use document::Document;
pub use elements::{
    BranchKey, Line, Node, NodeType, Parameter, ParameterKey, RecordKind, Regulation, Schedule,
    ScheduleKey, Transformer,
};
pub use error::{UcteError, UcteResult};
pub use reference::{AreaLookup, Country, CountryTable, COUNTRIES};
