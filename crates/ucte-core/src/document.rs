use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use crate::area::{Area, AreaView};
use crate::elements::{
    BranchKey, Line, Node, Parameter, ParameterKey, RecordKind, Regulation, Schedule,
    ScheduleKey, Transformer,
};

/// A decoded grid document.
///
/// The document is the single owner of every record. Collections keep
/// document order; inserting an existing identity replaces the record in place.
/// Transformers refer to their regulation and tap rows by index, see
/// [`Document::link`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct Document {
    /// Raw text the document was decoded from
    #[serde(skip)]
    pub source: String,
    /// Version token of the comment block
    pub version: Option<String>,
    pub comments: Vec<String>,
    #[serde(serialize_with = "as_values")]
    pub nodes: IndexMap<String, Node>,
    #[serde(serialize_with = "as_values")]
    pub lines: IndexMap<BranchKey, Line>,
    #[serde(serialize_with = "as_values")]
    pub transformers: IndexMap<BranchKey, Transformer>,
    #[serde(serialize_with = "as_values")]
    pub regulations: IndexMap<BranchKey, Regulation>,
    #[serde(serialize_with = "as_values")]
    pub parameters: IndexMap<ParameterKey, Parameter>,
    #[serde(serialize_with = "as_values")]
    pub schedules: IndexMap<ScheduleKey, Schedule>,
    #[serde(serialize_with = "as_values")]
    pub areas: IndexMap<String, Area>,
    /// Record lines that did not match their layout, per record type
    pub unparsed: BTreeMap<RecordKind, Vec<String>>,
}

fn as_values<K, V, S>(map: &IndexMap<K, V>, serializer: S) -> Result<S::Ok, S::Error>
where
    V: Serialize,
    S: Serializer,
{
    serializer.collect_seq(map.values())
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node, returning the record it replaced.
    pub fn insert_node(&mut self, node: Node) -> Option<Node> {
        self.nodes.insert(node.code.clone(), node)
    }

    pub fn insert_line(&mut self, line: Line) -> Option<Line> {
        self.lines.insert(line.key(), line)
    }

    pub fn insert_transformer(&mut self, transformer: Transformer) -> Option<Transformer> {
        self.transformers.insert(transformer.key(), transformer)
    }

    pub fn insert_regulation(&mut self, regulation: Regulation) -> Option<Regulation> {
        self.regulations.insert(regulation.key(), regulation)
    }

    pub fn insert_parameter(&mut self, parameter: Parameter) -> Option<Parameter> {
        self.parameters.insert(parameter.key(), parameter)
    }

    pub fn insert_schedule(&mut self, schedule: Schedule) -> Option<Schedule> {
        self.schedules.insert(schedule.key(), schedule)
    }

    /// Register an area code; registering twice is a no-op.
    pub fn register_area(&mut self, code: &str) {
        if !self.areas.contains_key(code) {
            self.areas.insert(code.to_string(), Area::new(code));
        }
    }

    /// Record a line that did not match the layout of its record type.
    pub fn push_unparsed(&mut self, kind: RecordKind, line: impl Into<String>) {
        self.unparsed.entry(kind).or_default().push(line.into());
    }

    /// Attach regulations and tap rows to their transformers.
    ///
    /// Must run after nodes, transformers, regulations and parameters are all
    /// in place. Previous links are discarded, so the pass can be repeated
    /// after editing.
    pub fn link(&mut self) {
        let mut rows: IndexMap<BranchKey, Vec<usize>> = IndexMap::new();
        for (index, parameter) in self.parameters.values().enumerate() {
            rows.entry(parameter.transformer_key())
                .or_default()
                .push(index);
        }

        for (key, transformer) in self.transformers.iter_mut() {
            transformer.regulation = self.regulations.get_index_of(key);
            transformer.parameters = rows.get(key).cloned().unwrap_or_default();
        }
    }

    pub fn regulation_of(&self, transformer: &Transformer) -> Option<&Regulation> {
        transformer
            .regulation
            .and_then(|index| self.regulations.get_index(index))
            .map(|(_, regulation)| regulation)
    }

    /// Tap rows of a transformer in decode order.
    pub fn parameters_of<'a>(
        &'a self,
        transformer: &'a Transformer,
    ) -> impl Iterator<Item = &'a Parameter> + 'a {
        transformer
            .parameters
            .iter()
            .filter_map(|index| self.parameters.get_index(*index))
            .map(|(_, parameter)| parameter)
    }

    pub fn slack_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values().filter(|node| node.is_slack())
    }

    /// Nodes whose area could not be resolved during decode.
    pub fn unassigned_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values().filter(|node| node.area.is_none())
    }

    pub fn area(&self, code: &str) -> Option<AreaView<'_>> {
        self.areas
            .get(code)
            .map(|area| AreaView::new(area, self))
    }

    pub fn area_views(&self) -> impl Iterator<Item = AreaView<'_>> {
        self.areas.values().map(move |area| AreaView::new(area, self))
    }

    /// Endpoint nodes of a line or transformer identity.
    pub fn endpoints(&self, key: &BranchKey) -> (Option<&Node>, Option<&Node>) {
        (self.nodes.get(&key.node1), self.nodes.get(&key.node2))
    }

    /// Lines connected to a node.
    pub fn node_lines<'a>(&'a self, code: &'a str) -> impl Iterator<Item = &'a Line> + 'a {
        self.lines
            .values()
            .filter(move |line| line.node1 == code || line.node2 == code)
    }

    /// Number of unparsed lines across all record types.
    pub fn unparsed_count(&self) -> usize {
        self.unparsed.values().map(Vec::len).sum()
    }
}
