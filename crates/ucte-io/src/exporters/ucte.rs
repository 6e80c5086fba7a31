use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use ucte_core::{Document, Node};

use crate::codec::UcteRecord;

/// Section selection and line formatting for [`encode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeOptions {
    /// Drop trailing blanks of absent columns
    pub trim: bool,
    pub comments: bool,
    pub nodes: bool,
    pub lines: bool,
    /// Transformers together with their regulation and tap tables
    pub transformers: bool,
    pub schedules: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            trim: false,
            comments: true,
            nodes: true,
            lines: true,
            transformers: true,
            schedules: true,
        }
    }
}

impl EncodeOptions {
    pub fn trimmed() -> Self {
        Self {
            trim: true,
            ..Self::default()
        }
    }
}

/// Encode a document in canonical section order.
///
/// `##L` and `##T` are always written when enabled, `##R`, `##TT` and `##E`
/// only when they have records. Nodes without an area go directly under `##N`.
pub fn encode(document: &Document, options: &EncodeOptions) -> String {
    let mut out = String::new();

    if options.comments {
        out.push_str("##C");
        if let Some(version) = &document.version {
            out.push(' ');
            out.push_str(version);
        }
        out.push('\n');
        for comment in &document.comments {
            out.push_str(comment);
            out.push('\n');
        }
    }

    if options.nodes {
        out.push_str("##N\n");
        write_records(&mut out, document.unassigned_nodes(), options.trim, false);
        for code in area_order(document) {
            let members = document
                .nodes
                .values()
                .filter(|node| node.area.as_deref() == Some(code));
            out.push_str("##Z");
            out.push_str(code);
            out.push('\n');
            write_records(&mut out, members, options.trim, false);
        }
    }

    if options.lines {
        out.push_str("##L\n");
        write_records(&mut out, document.lines.values(), options.trim, true);
    }

    if options.transformers {
        out.push_str("##T\n");
        write_records(&mut out, document.transformers.values(), options.trim, true);
        if !document.regulations.is_empty() {
            out.push_str("##R\n");
            write_records(&mut out, document.regulations.values(), options.trim, true);
        }
        if !document.parameters.is_empty() {
            out.push_str("##TT\n");
            write_records(&mut out, document.parameters.values(), options.trim, true);
        }
    }

    if options.schedules && !document.schedules.is_empty() {
        out.push_str("##E\n");
        write_records(&mut out, document.schedules.values(), options.trim, true);
    }

    out
}

/// Encode a document and write it to `path`.
///
/// The output is always UTF-8. A document decoded from an ISO-8859-1 file
/// keeps its text but is not written back byte for byte when it contains
/// non-ASCII characters.
pub fn write_ucte<P: AsRef<Path>>(
    document: &Document,
    path: P,
    options: &EncodeOptions,
) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, encode(document, options))
        .with_context(|| format!("writing UCTE file '{}'", path.display()))
}

/// Append records one per line. An empty `##L`/`##T` block still gets its
/// line terminator (`always_terminate`).
fn write_records<'a, R, I>(out: &mut String, records: I, trim: bool, always_terminate: bool)
where
    R: UcteRecord + 'a,
    I: Iterator<Item = &'a R>,
{
    let mut any = false;
    for record in records {
        out.push_str(&record.encode_line(trim));
        out.push('\n');
        any = true;
    }
    if !any && always_terminate {
        out.push('\n');
    }
}

/// Registered areas with member nodes, then areas only named by nodes.
fn area_order(document: &Document) -> Vec<&str> {
    let mut codes: Vec<&str> = document
        .areas
        .keys()
        .map(String::as_str)
        .filter(|code| has_members(document.nodes.values(), code))
        .collect();
    for code in document.nodes.values().filter_map(|node| node.area.as_deref()) {
        if !codes.contains(&code) {
            codes.push(code);
        }
    }
    codes
}

fn has_members<'a>(mut nodes: impl Iterator<Item = &'a Node>, code: &str) -> bool {
    nodes.any(|node| node.area.as_deref() == Some(code))
}
