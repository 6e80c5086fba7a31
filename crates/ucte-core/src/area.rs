//! Areas and area membership queries.
//!
//! The registry only stores area codes. Membership is derived from the owning
//! document on demand through [`AreaView`], so edits to nodes are always
//! reflected.

use std::collections::HashSet;

use serde::Serialize;

use crate::document::Document;
use crate::elements::{Line, Node, Schedule, Transformer};

/// Area code of fictitious border nodes.
pub const X_NODE_AREA: &str = "XX";

/// A registered area (country or TSO control area).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Area {
    pub code: String,
}

impl Area {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

/// Read-only view of one area within a document.
#[derive(Debug, Clone, Copy)]
pub struct AreaView<'a> {
    area: &'a Area,
    document: &'a Document,
}

impl<'a> AreaView<'a> {
    pub fn new(area: &'a Area, document: &'a Document) -> Self {
        Self { area, document }
    }

    pub fn code(&self) -> &'a str {
        &self.area.code
    }

    /// Nodes assigned to this area, in document order.
    pub fn nodes(&self) -> impl Iterator<Item = &'a Node> + 'a {
        let code = self.code();
        self.document
            .nodes
            .values()
            .filter(move |node| node.area.as_deref() == Some(code))
    }

    fn contains_node(&self, node_code: &str) -> bool {
        self.document
            .nodes
            .get(node_code)
            .is_some_and(|node| node.area.as_deref() == Some(self.code()))
    }

    /// Lines with at least one endpoint in this area.
    pub fn lines(&self) -> impl Iterator<Item = &'a Line> + 'a {
        let view = *self;
        self.document
            .lines
            .values()
            .filter(move |line| view.contains_node(&line.node1) || view.contains_node(&line.node2))
    }

    /// Transformers with at least one endpoint in this area.
    pub fn transformers(&self) -> impl Iterator<Item = &'a Transformer> + 'a {
        let view = *self;
        self.document.transformers.values().filter(move |t| {
            view.contains_node(&t.node1) || view.contains_node(&t.node2)
        })
    }

    /// Schedules naming this area on either side.
    pub fn schedules(&self) -> impl Iterator<Item = &'a Schedule> + 'a {
        let code = self.code();
        self.document
            .schedules
            .values()
            .filter(move |s| s.country1 == code || s.country2 == code)
    }

    pub fn slack_nodes(&self) -> impl Iterator<Item = &'a Node> + 'a {
        self.nodes().filter(|node| node.is_slack())
    }

    /// Border nodes terminating lines of this area.
    pub fn x_nodes(&self) -> Vec<&'a Node> {
        let endpoints: HashSet<&str> = self
            .lines()
            .flat_map(|line| [line.node1.as_str(), line.node2.as_str()])
            .collect();

        self.document
            .nodes
            .values()
            .filter(|node| node.area.as_deref() == Some(X_NODE_AREA))
            .filter(|node| endpoints.contains(node.code.as_str()))
            .collect()
    }

    /// Net position of the area (MW): export is positive.
    pub fn net_position(&self) -> f64 {
        net_position(self.nodes())
    }

    /// Net position measured at the area's border nodes.
    pub fn x_net_position(&self) -> f64 {
        net_position(self.x_nodes().into_iter())
    }
}

// Generation is negative when feeding the grid; blanks count as zero.
fn net_position<'a>(nodes: impl Iterator<Item = &'a Node>) -> f64 {
    nodes.fold(0.0, |acc, node| {
        acc - node.pg.unwrap_or(0.0) - node.pl.unwrap_or(0.0)
    })
}
