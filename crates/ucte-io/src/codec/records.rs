//! Mapping between record structs and their column values.

use ucte_core::{Line, Node, NodeType, Parameter, Regulation, Schedule, Transformer};

use super::field::FieldValue;
use super::grammar::{
    DecodedFields, RecordSpec, LINE, NODE, PARAMETER, REGULATION, SCHEDULE, TRANSFORMER,
};

/// A record type with a fixed-column layout.
pub trait UcteRecord: Sized {
    fn spec() -> &'static RecordSpec;

    /// Build the record from decoded columns. Values that decode but are not
    /// acceptable are reported through [`DecodedFields::reject`].
    fn from_fields(fields: &mut DecodedFields) -> Self;

    /// Column values in layout order.
    fn to_fields(&self) -> Vec<Option<FieldValue>>;

    /// Decode one line; `None` when it does not match the layout.
    fn decode_line(line: &str) -> Option<(Self, DecodedFields)> {
        let mut fields = Self::spec().decode(line)?;
        let record = Self::from_fields(&mut fields);
        Some((record, fields))
    }

    fn encode_line(&self, trim: bool) -> String {
        Self::spec().encode(&self.to_fields(), trim)
    }
}

fn text(value: &str) -> Option<FieldValue> {
    Some(FieldValue::Text(value.to_string()))
}

fn opt_text(value: &Option<String>) -> Option<FieldValue> {
    value.clone().map(FieldValue::Text)
}

fn int(value: Option<i64>) -> Option<FieldValue> {
    value.map(FieldValue::Integer)
}

fn real(value: Option<f64>) -> Option<FieldValue> {
    value.map(FieldValue::Real)
}

impl UcteRecord for Node {
    fn spec() -> &'static RecordSpec {
        &NODE
    }

    fn from_fields(fields: &mut DecodedFields) -> Self {
        let node_type = fields
            .integer("node_type")
            .and_then(|code| match NodeType::try_from(code) {
                Ok(node_type) => Some(node_type),
                Err(code) => {
                    fields.reject("node_type", code.to_string());
                    None
                }
            });

        Node {
            code: fields.text("code"),
            name: fields.text("name"),
            status: fields.integer("status"),
            node_type,
            reference_voltage: fields.real("reference_voltage"),
            pl: fields.real("pl"),
            ql: fields.real("ql"),
            pg: fields.real("pg"),
            qg: fields.real("qg"),
            pg_min: fields.real("pg_min"),
            pg_max: fields.real("pg_max"),
            qg_min: fields.real("qg_min"),
            qg_max: fields.real("qg_max"),
            primary_control_static: fields.real("primary_control_static"),
            primary_control_power: fields.real("primary_control_power"),
            sk3: fields.real("sk3"),
            x_to_r: fields.real("x_to_r"),
            plant_type: fields.opt_text("plant_type"),
            area: None,
        }
    }

    fn to_fields(&self) -> Vec<Option<FieldValue>> {
        vec![
            text(&self.code),
            text(&self.name),
            int(self.status),
            int(self.node_type.map(i64::from)),
            real(self.reference_voltage),
            real(self.pl),
            real(self.ql),
            real(self.pg),
            real(self.qg),
            real(self.pg_min),
            real(self.pg_max),
            real(self.qg_min),
            real(self.qg_max),
            real(self.primary_control_static),
            real(self.primary_control_power),
            real(self.sk3),
            real(self.x_to_r),
            opt_text(&self.plant_type),
        ]
    }
}

impl UcteRecord for Line {
    fn spec() -> &'static RecordSpec {
        &LINE
    }

    fn from_fields(fields: &mut DecodedFields) -> Self {
        Line {
            node1: fields.text("node1"),
            node2: fields.text("node2"),
            order_code: fields.text("order_code"),
            status: fields.integer("status"),
            r: fields.real("r"),
            x: fields.real("x"),
            b: fields.real("b"),
            i_max: fields.integer("i_max"),
            name: fields.opt_text("name"),
        }
    }

    fn to_fields(&self) -> Vec<Option<FieldValue>> {
        vec![
            text(&self.node1),
            text(&self.node2),
            text(&self.order_code),
            int(self.status),
            real(self.r),
            real(self.x),
            real(self.b),
            int(self.i_max),
            opt_text(&self.name),
        ]
    }
}

impl UcteRecord for Transformer {
    fn spec() -> &'static RecordSpec {
        &TRANSFORMER
    }

    fn from_fields(fields: &mut DecodedFields) -> Self {
        Transformer {
            node1: fields.text("node1"),
            node2: fields.text("node2"),
            order_code: fields.text("order_code"),
            status: fields.integer("status"),
            v1: fields.real("v1"),
            v2: fields.real("v2"),
            sn: fields.real("sn"),
            r: fields.real("r"),
            x: fields.real("x"),
            b: fields.real("b"),
            g: fields.real("g"),
            i_max: fields.integer("i_max"),
            name: fields.opt_text("name"),
            regulation: None,
            parameters: Vec::new(),
        }
    }

    fn to_fields(&self) -> Vec<Option<FieldValue>> {
        vec![
            text(&self.node1),
            text(&self.node2),
            text(&self.order_code),
            int(self.status),
            real(self.v1),
            real(self.v2),
            real(self.sn),
            real(self.r),
            real(self.x),
            real(self.b),
            real(self.g),
            int(self.i_max),
            opt_text(&self.name),
        ]
    }
}

impl UcteRecord for Regulation {
    fn spec() -> &'static RecordSpec {
        &REGULATION
    }

    fn from_fields(fields: &mut DecodedFields) -> Self {
        Regulation {
            node1: fields.text("node1"),
            node2: fields.text("node2"),
            order_code: fields.text("order_code"),
            phase_delta_u: fields.real("phase_delta_u"),
            phase_taps: fields.integer("phase_taps"),
            phase_tap: fields.integer("phase_tap"),
            phase_u: fields.real("phase_u"),
            angle_delta_u: fields.real("angle_delta_u"),
            angle_phi: fields.real("angle_phi"),
            angle_taps: fields.integer("angle_taps"),
            angle_tap: fields.integer("angle_tap"),
            angle_p: fields.real("angle_p"),
            angle_type: fields.opt_text("angle_type"),
        }
    }

    fn to_fields(&self) -> Vec<Option<FieldValue>> {
        vec![
            text(&self.node1),
            text(&self.node2),
            text(&self.order_code),
            real(self.phase_delta_u),
            int(self.phase_taps),
            int(self.phase_tap),
            real(self.phase_u),
            real(self.angle_delta_u),
            real(self.angle_phi),
            int(self.angle_taps),
            int(self.angle_tap),
            real(self.angle_p),
            opt_text(&self.angle_type),
        ]
    }
}

impl UcteRecord for Parameter {
    fn spec() -> &'static RecordSpec {
        &PARAMETER
    }

    fn from_fields(fields: &mut DecodedFields) -> Self {
        Parameter {
            node1: fields.text("node1"),
            node2: fields.text("node2"),
            order_code: fields.text("order_code"),
            tap: fields.integer("tap"),
            r: fields.real("r"),
            x: fields.real("x"),
            delta_u: fields.real("delta_u"),
            alpha: fields.real("alpha"),
        }
    }

    fn to_fields(&self) -> Vec<Option<FieldValue>> {
        vec![
            text(&self.node1),
            text(&self.node2),
            text(&self.order_code),
            int(self.tap),
            real(self.r),
            real(self.x),
            real(self.delta_u),
            real(self.alpha),
        ]
    }
}

impl UcteRecord for Schedule {
    fn spec() -> &'static RecordSpec {
        &SCHEDULE
    }

    fn from_fields(fields: &mut DecodedFields) -> Self {
        Schedule {
            country1: fields.text("country1"),
            country2: fields.text("country2"),
            schedule: fields.real("schedule"),
            comments: fields.opt_text("comments"),
        }
    }

    fn to_fields(&self) -> Vec<Option<FieldValue>> {
        vec![
            text(&self.country1),
            text(&self.country2),
            real(self.schedule),
            opt_text(&self.comments),
        ]
    }
}
