//! Declarative record layouts and the generic line matcher.
//!
//! A record line is a sequence of fixed-width columns separated by a single
//! space. Optional trailing columns may be missing; each one is tried on its
//! own at the current position.

use ucte_core::RecordKind;

use super::field::{decode_field, render, FieldKind, FieldValue};

/// One column of a record layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub width: usize,
    pub kind: FieldKind,
    pub optional: bool,
}

const fn req(name: &'static str, width: usize, kind: FieldKind) -> FieldSpec {
    FieldSpec {
        name,
        width,
        kind,
        optional: false,
    }
}

const fn opt(name: &'static str, width: usize, kind: FieldKind) -> FieldSpec {
    FieldSpec {
        name,
        width,
        kind,
        optional: true,
    }
}

use FieldKind::{Integer as I, Real as R, Text as T};

/// Column layout of one record type.
#[derive(Debug, PartialEq, Eq)]
pub struct RecordSpec {
    pub kind: RecordKind,
    pub fields: &'static [FieldSpec],
}

pub static NODE: RecordSpec = RecordSpec {
    kind: RecordKind::Node,
    fields: &[
        req("code", 8, T),
        req("name", 12, T),
        req("status", 1, I),
        req("node_type", 1, I),
        req("reference_voltage", 6, R),
        req("pl", 7, R),
        req("ql", 7, R),
        req("pg", 7, R),
        req("qg", 7, R),
        opt("pg_min", 7, R),
        opt("pg_max", 7, R),
        opt("qg_min", 7, R),
        opt("qg_max", 7, R),
        opt("primary_control_static", 5, R),
        opt("primary_control_power", 7, R),
        opt("sk3", 7, R),
        opt("x_to_r", 7, R),
        opt("plant_type", 1, T),
    ],
};

pub static LINE: RecordSpec = RecordSpec {
    kind: RecordKind::Line,
    fields: &[
        req("node1", 8, T),
        req("node2", 8, T),
        req("order_code", 1, T),
        req("status", 1, I),
        req("r", 6, R),
        req("x", 6, R),
        req("b", 8, R),
        req("i_max", 6, I),
        opt("name", 12, T),
    ],
};

pub static TRANSFORMER: RecordSpec = RecordSpec {
    kind: RecordKind::Transformer,
    fields: &[
        req("node1", 8, T),
        req("node2", 8, T),
        req("order_code", 1, T),
        req("status", 1, I),
        req("v1", 5, R),
        req("v2", 5, R),
        req("sn", 5, R),
        req("r", 6, R),
        req("x", 6, R),
        req("b", 8, R),
        req("g", 6, R),
        req("i_max", 6, I),
        opt("name", 12, T),
    ],
};

pub static REGULATION: RecordSpec = RecordSpec {
    kind: RecordKind::Regulation,
    fields: &[
        req("node1", 8, T),
        req("node2", 8, T),
        req("order_code", 1, T),
        req("phase_delta_u", 5, R),
        req("phase_taps", 2, I),
        req("phase_tap", 3, I),
        opt("phase_u", 5, R),
        opt("angle_delta_u", 5, R),
        opt("angle_phi", 5, R),
        opt("angle_taps", 2, I),
        opt("angle_tap", 3, I),
        opt("angle_p", 5, R),
        opt("angle_type", 4, T),
    ],
};

pub static PARAMETER: RecordSpec = RecordSpec {
    kind: RecordKind::Parameter,
    fields: &[
        req("node1", 8, T),
        req("node2", 8, T),
        req("order_code", 1, T),
        req("tap", 3, I),
        req("r", 6, R),
        req("x", 6, R),
        req("delta_u", 5, R),
        req("alpha", 5, R),
    ],
};

pub static SCHEDULE: RecordSpec = RecordSpec {
    kind: RecordKind::Schedule,
    fields: &[
        req("country1", 2, T),
        req("country2", 2, T),
        req("schedule", 7, R),
        opt("comments", 12, T),
    ],
};

/// Layout for a record type.
pub fn spec_for(kind: RecordKind) -> &'static RecordSpec {
    match kind {
        RecordKind::Node => &NODE,
        RecordKind::Line => &LINE,
        RecordKind::Transformer => &TRANSFORMER,
        RecordKind::Regulation => &REGULATION,
        RecordKind::Parameter => &PARAMETER,
        RecordKind::Schedule => &SCHEDULE,
    }
}

impl RecordSpec {
    fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Split a line into raw column slices; `None` entries are missing
    /// optional columns. Returns `None` when a mandatory column is missing.
    pub fn match_line<'a>(&self, line: &'a str) -> Option<Vec<Option<&'a str>>> {
        let line = line.strip_suffix('\r').unwrap_or(line);
        // Byte offset of every character plus the end of the line.
        let bounds: Vec<usize> = line
            .char_indices()
            .map(|(offset, _)| offset)
            .chain(std::iter::once(line.len()))
            .collect();
        let char_count = bounds.len() - 1;

        let mut cursor = 0;
        let mut slices = Vec::with_capacity(self.fields.len());
        for (index, field) in self.fields.iter().enumerate() {
            let lead = usize::from(index > 0);
            let end = cursor + lead + field.width;
            let separated = lead == 0 || line[bounds[cursor]..].starts_with(' ');

            if end <= char_count && separated {
                slices.push(Some(&line[bounds[cursor + lead]..bounds[end]]));
                cursor = end;
            } else if field.optional {
                slices.push(None);
            } else {
                return None;
            }
        }
        Some(slices)
    }

    /// Match and decode a line into typed column values.
    pub fn decode(&'static self, line: &str) -> Option<DecodedFields> {
        let slices = self.match_line(line)?;
        let mut rejected = Vec::new();
        let values = self
            .fields
            .iter()
            .zip(slices)
            .map(|(field, slice)| {
                let raw = slice?;
                let value = decode_field(raw, field.kind);
                if value.is_none() && !raw.trim().is_empty() {
                    rejected.push(RejectedField {
                        field: field.name,
                        raw: raw.trim().to_string(),
                    });
                }
                value
            })
            .collect();

        Some(DecodedFields {
            spec: self,
            values,
            rejected,
        })
    }

    /// Render column values into a record line with one trailing space.
    ///
    /// With `trim`, trailing blanks of absent columns are dropped before the
    /// trailing space is appended.
    pub fn encode(&self, values: &[Option<FieldValue>], trim: bool) -> String {
        let mut out = self
            .fields
            .iter()
            .enumerate()
            .map(|(index, field)| render(values.get(index).and_then(Option::as_ref), field.width))
            .collect::<Vec<_>>()
            .join(" ");

        if trim {
            let keep = out.trim_end().len();
            out.truncate(keep);
        }
        out.push(' ');
        out
    }
}

/// A column that held text which could not be taken as a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedField {
    pub field: &'static str,
    pub raw: String,
}

/// Typed column values of one matched line.
#[derive(Debug, Clone)]
pub struct DecodedFields {
    spec: &'static RecordSpec,
    values: Vec<Option<FieldValue>>,
    rejected: Vec<RejectedField>,
}

impl DecodedFields {
    pub fn spec(&self) -> &'static RecordSpec {
        self.spec
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.spec
            .index_of(name)
            .and_then(|index| self.values.get(index))
            .and_then(Option::as_ref)
    }

    /// Mandatory text; blank is the empty string.
    pub fn text(&self, name: &str) -> String {
        self.opt_text(name).unwrap_or_default()
    }

    pub fn opt_text(&self, name: &str) -> Option<String> {
        self.get(name)
            .and_then(FieldValue::as_text)
            .map(str::to_string)
    }

    pub fn integer(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(FieldValue::as_integer)
    }

    pub fn real(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(FieldValue::as_real)
    }

    /// Record a value that decoded but is not acceptable for its field.
    pub fn reject(&mut self, field: &'static str, raw: impl Into<String>) {
        self.rejected.push(RejectedField {
            field,
            raw: raw.into(),
        });
    }

    pub fn rejected(&self) -> &[RejectedField] {
        &self.rejected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE_TEXT: &str = "SK_NODE1 SK_NODE2 A 0  0.123  5.678   123.45    400";

    #[test]
    fn test_layout_widths() {
        let widths: Vec<_> = LINE.fields.iter().map(|f| f.width).collect();
        assert_eq!(widths, vec![8, 8, 1, 1, 6, 6, 8, 6, 12]);
        assert_eq!(spec_for(RecordKind::Schedule), &SCHEDULE);
    }

    #[test]
    fn test_match_fixed_columns() {
        let fields = LINE.decode(LINE_TEXT).expect("line matches");
        assert_eq!(fields.text("node1"), "SK_NODE1");
        assert_eq!(fields.text("node2"), "SK_NODE2");
        assert_eq!(fields.text("order_code"), "A");
        assert_eq!(fields.integer("status"), Some(0));
        assert_eq!(fields.real("r"), Some(0.123));
        assert_eq!(fields.real("x"), Some(5.678));
        assert_eq!(fields.real("b"), Some(123.45));
        assert_eq!(fields.integer("i_max"), Some(400));
        assert_eq!(fields.opt_text("name"), None);
        assert!(fields.rejected().is_empty());
    }

    #[test]
    fn test_embedded_spaces_stay_in_column() {
        let text = format!(
            "{} {} {} {} {} {} {} {}",
            "AB CD   ", " XY   Z ", "1", "0", "   1.0", "   2.0", "     0.0", "   100"
        );
        let slices = LINE.match_line(&text).expect("matches");
        assert_eq!(slices[0], Some("AB CD   "));
        assert_eq!(slices[1], Some(" XY   Z "));
        assert_eq!(slices[2], Some("1"));
        assert_eq!(slices[8], None);
    }

    #[test]
    fn test_missing_mandatory_column() {
        assert!(LINE.match_line("SK_NODE1 SK_NODE2 A 0").is_none());
        // no separator before the second endpoint
        assert!(LINE.match_line("SK_NODE1SK_NODE2  A 0  0.123  5.678  123.45    400").is_none());
    }

    #[test]
    fn test_optional_columns_tried_independently() {
        let text = format!("{} {:<12}", LINE_TEXT, "VAHOVCE");
        let fields = LINE.decode(&text).unwrap();
        assert_eq!(fields.opt_text("name").as_deref(), Some("VAHOVCE"));

        // Too short for the name column: absent, trailing text ignored.
        let fields = LINE.decode(&format!("{} SHORT", LINE_TEXT)).unwrap();
        assert_eq!(fields.opt_text("name"), None);
    }

    #[test]
    fn test_character_based_columns() {
        let text = format!(
            "{:<8} {:<12} {} {} {:>6} {:>7} {:>7} {:>7} {:>7}",
            "QŽILIN21", "ŽILINA 400", 0, 2, "400.00", "0.00", "0.00", "0.00", "0.00"
        );
        let fields = NODE.decode(&text).expect("node matches");
        assert_eq!(fields.text("code"), "QŽILIN21");
        assert_eq!(fields.text("name"), "ŽILINA 400");
        assert_eq!(fields.integer("node_type"), Some(2));
        assert_eq!(fields.real("reference_voltage"), Some(400.0));
    }

    #[test]
    fn test_carriage_return_stripped() {
        let fields = SCHEDULE.decode("SK CZ   150.0\r").unwrap();
        assert_eq!(fields.real("schedule"), Some(150.0));
        assert_eq!(fields.opt_text("comments"), None);
    }

    #[test]
    fn test_unparseable_number_is_rejected() {
        let fields = SCHEDULE.decode("SK CZ   15x.0").unwrap();
        assert_eq!(fields.real("schedule"), None);
        assert_eq!(
            fields.rejected(),
            &[RejectedField {
                field: "schedule",
                raw: "15x.0".into()
            }]
        );
    }

    #[test]
    fn test_encode_pads_and_trims() {
        let values = vec![
            Some(FieldValue::from("SK")),
            Some(FieldValue::from("CZ")),
            Some(FieldValue::from(150.0)),
            None,
        ];
        assert_eq!(
            SCHEDULE.encode(&values, false),
            format!("SK CZ 150.000 {} ", " ".repeat(12))
        );
        assert_eq!(SCHEDULE.encode(&values, true), "SK CZ 150.000 ");
    }
}
