//! Record types of a UCTE grid document.
//!
//! Every record mirrors one row of its section. Numeric values that were blank
//! or unparseable in the source are `None`; they are rendered back as blanks.

use std::fmt;

use serde::Serialize;

/// The six record types carried by a grid document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum RecordKind {
    Node,
    Line,
    Transformer,
    Regulation,
    Parameter,
    Schedule,
}

impl RecordKind {
    /// Record type name as used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            RecordKind::Node => "Node",
            RecordKind::Line => "Line",
            RecordKind::Transformer => "Transformer",
            RecordKind::Regulation => "Regulation",
            RecordKind::Parameter => "Parameter",
            RecordKind::Schedule => "Schedule",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Nominal voltage (kV) indexed by the 7th character of a node code.
const VOLTAGE_LEVELS: [u32; 10] = [750, 380, 220, 150, 120, 110, 70, 27, 330, 500];

/// Node type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "i64")]
pub enum NodeType {
    /// 0: P and Q fixed (PQ node)
    PqFixed,
    /// 1: Q and angle fixed
    QFixed,
    /// 2: P and U fixed (PU node)
    PuFixed,
    /// 3: U and angle fixed, global slack. At most one per document.
    Slack,
}

impl NodeType {
    pub fn code(&self) -> i64 {
        match self {
            NodeType::PqFixed => 0,
            NodeType::QFixed => 1,
            NodeType::PuFixed => 2,
            NodeType::Slack => 3,
        }
    }
}

impl From<NodeType> for i64 {
    fn from(value: NodeType) -> Self {
        value.code()
    }
}

impl TryFrom<i64> for NodeType {
    type Error = i64;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(NodeType::PqFixed),
            1 => Ok(NodeType::QFixed),
            2 => Ok(NodeType::PuFixed),
            3 => Ok(NodeType::Slack),
            other => Err(other),
        }
    }
}

/// Identity shared by lines, transformers and regulations: both endpoint
/// codes plus the order code distinguishing parallel elements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct BranchKey {
    pub node1: String,
    pub node2: String,
    pub order_code: String,
}

impl BranchKey {
    pub fn new(
        node1: impl Into<String>,
        node2: impl Into<String>,
        order_code: impl Into<String>,
    ) -> Self {
        Self {
            node1: node1.into(),
            node2: node2.into(),
            order_code: order_code.into(),
        }
    }
}

impl fmt::Display for BranchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<8} {:<8} {:<1}",
            self.node1, self.node2, self.order_code
        )
    }
}

/// Identity of one tap-table row: the transformer identity plus tap position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct ParameterKey {
    pub branch: BranchKey,
    pub tap: Option<i64>,
}

impl fmt::Display for ParameterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tap {
            Some(tap) => write!(f, "{} {:>3}", self.branch, tap),
            None => write!(f, "{}    ", self.branch),
        }
    }
}

/// Identity of a scheduled exchange: the ordered country pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct ScheduleKey {
    pub country1: String,
    pub country2: String,
}

impl fmt::Display for ScheduleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<2} {:<2}", self.country1, self.country2)
    }
}

/// Electrical bus (`##N` / `##Z` sections).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Node {
    /// Node code, also its identity
    pub code: String,
    /// Geographical name
    pub name: String,
    /// 0 = real, 1 = equivalent
    pub status: Option<i64>,
    pub node_type: Option<NodeType>,
    /// Reference voltage (kV)
    pub reference_voltage: Option<f64>,
    /// Active load (MW)
    pub pl: Option<f64>,
    /// Reactive load (MVar)
    pub ql: Option<f64>,
    /// Active generation (MW), negative when feeding the grid
    pub pg: Option<f64>,
    /// Reactive generation (MVar)
    pub qg: Option<f64>,
    pub pg_min: Option<f64>,
    pub pg_max: Option<f64>,
    pub qg_min: Option<f64>,
    pub qg_max: Option<f64>,
    /// Static of primary control (%)
    pub primary_control_static: Option<f64>,
    /// Nominal power for primary control (MW)
    pub primary_control_power: Option<f64>,
    /// Three phase short circuit power (MVA)
    pub sk3: Option<f64>,
    pub x_to_r: Option<f64>,
    /// Power plant type (H, N, L, C, G, O, W, F)
    pub plant_type: Option<String>,
    /// Resolved area code, assigned during decode
    pub area: Option<String>,
}

impl Node {
    /// Nominal voltage level encoded in the 7th character of the node code.
    pub fn voltage_level(&self) -> Option<u32> {
        let digit = self.code.chars().nth(6)?.to_digit(10)?;
        VOLTAGE_LEVELS.get(digit as usize).copied()
    }

    pub fn is_slack(&self) -> bool {
        self.node_type == Some(NodeType::Slack)
    }
}

/// Branch between two nodes (`##L`).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Line {
    pub node1: String,
    pub node2: String,
    pub order_code: String,
    pub status: Option<i64>,
    /// Resistance (Ohm)
    pub r: Option<f64>,
    /// Reactance (Ohm)
    pub x: Option<f64>,
    /// Susceptance (uS)
    pub b: Option<f64>,
    /// Current limit (A)
    pub i_max: Option<i64>,
    pub name: Option<String>,
}

impl Line {
    pub fn key(&self) -> BranchKey {
        BranchKey::new(&self.node1, &self.node2, &self.order_code)
    }
}

/// Two-winding transformer (`##T`).
///
/// `regulation` and `parameters` are indices into the owning document's
/// `regulations` and `parameters` maps, filled by [`crate::Document::link`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Transformer {
    /// Non-regulated winding
    pub node1: String,
    /// Regulated winding
    pub node2: String,
    pub order_code: String,
    pub status: Option<i64>,
    /// Rated voltage of the non-regulated winding (kV)
    pub v1: Option<f64>,
    /// Rated voltage of the regulated winding (kV)
    pub v2: Option<f64>,
    /// Nominal power (MVA)
    pub sn: Option<f64>,
    pub r: Option<f64>,
    pub x: Option<f64>,
    pub b: Option<f64>,
    /// Conductance (uS)
    pub g: Option<f64>,
    pub i_max: Option<i64>,
    pub name: Option<String>,
    #[serde(skip)]
    pub regulation: Option<usize>,
    #[serde(skip)]
    pub parameters: Vec<usize>,
}

impl Transformer {
    pub fn key(&self) -> BranchKey {
        BranchKey::new(&self.node1, &self.node2, &self.order_code)
    }
}

/// Tap regulation of a transformer (`##R`).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Regulation {
    pub node1: String,
    pub node2: String,
    pub order_code: String,
    /// Voltage change per tap (%)
    pub phase_delta_u: Option<f64>,
    pub phase_taps: Option<i64>,
    pub phase_tap: Option<i64>,
    /// Target voltage (kV)
    pub phase_u: Option<f64>,
    pub angle_delta_u: Option<f64>,
    /// Phase angle (deg)
    pub angle_phi: Option<f64>,
    pub angle_taps: Option<i64>,
    pub angle_tap: Option<i64>,
    /// Target active power (MW)
    pub angle_p: Option<f64>,
    /// ASYM or SYMM
    pub angle_type: Option<String>,
}

impl Regulation {
    pub fn key(&self) -> BranchKey {
        BranchKey::new(&self.node1, &self.node2, &self.order_code)
    }
}

/// One row of a transformer tap table (`##TT`).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Parameter {
    pub node1: String,
    pub node2: String,
    pub order_code: String,
    /// Tap position
    pub tap: Option<i64>,
    pub r: Option<f64>,
    pub x: Option<f64>,
    /// Voltage change at this tap (%)
    pub delta_u: Option<f64>,
    /// Phase shift angle at this tap (deg)
    pub alpha: Option<f64>,
}

impl Parameter {
    pub fn key(&self) -> ParameterKey {
        ParameterKey {
            branch: self.transformer_key(),
            tap: self.tap,
        }
    }

    /// Identity of the transformer owning this row.
    pub fn transformer_key(&self) -> BranchKey {
        BranchKey::new(&self.node1, &self.node2, &self.order_code)
    }
}

/// Scheduled exchange between two areas (`##E`).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Schedule {
    pub country1: String,
    pub country2: String,
    /// Scheduled active power exchange (MW)
    pub schedule: Option<f64>,
    pub comments: Option<String>,
}

impl Schedule {
    pub fn key(&self) -> ScheduleKey {
        ScheduleKey {
            country1: self.country1.clone(),
            country2: self.country2.clone(),
        }
    }
}
