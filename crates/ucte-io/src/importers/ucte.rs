use std::{fs, path::Path};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};
use ucte_core::{
    AreaLookup, CountryTable, Document, ImportDiagnostics, Line, Node, Parameter, RecordKind,
    Regulation, Schedule, Transformer,
};

use crate::codec::{split, RejectedField, Section, SectionTag, UcteRecord};

/// Decoded document together with everything noticed while decoding it.
#[derive(Debug, Clone)]
pub struct ImportResult {
    pub document: Document,
    pub diagnostics: ImportDiagnostics,
}

/// Decode a UCTE file from disk.
///
/// The file is read as UTF-8 and falls back to ISO-8859-1, the encoding most
/// exchange files are written in.
pub fn parse_ucte<P: AsRef<Path>>(path: P) -> Result<ImportResult> {
    let path = path.as_ref();
    let bytes =
        fs::read(path).with_context(|| format!("reading UCTE file '{}'", path.display()))?;
    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            debug!("'{}' is not UTF-8, decoding as ISO-8859-1", path.display());
            err.into_bytes().into_iter().map(char::from).collect()
        }
    };
    Ok(decode(&text))
}

/// Decode a document, resolving node areas with the built-in country table.
pub fn decode(text: &str) -> ImportResult {
    decode_with(text, &CountryTable)
}

/// Decode a document with a caller supplied area lookup.
pub fn decode_with(text: &str, lookup: &dyn AreaLookup) -> ImportResult {
    let mut document = Document::new();
    document.source = text.to_string();
    let mut diag = ImportDiagnostics::new();

    for section in split(text) {
        debug!(
            "Section {} at line {}: {} payload lines",
            section.tag,
            section.header_line,
            section.payload.len()
        );

        match &section.tag {
            SectionTag::Preamble => {
                warn!("Text before the first section marker is ignored");
                diag.add_warning_at_line(
                    "structure",
                    "Text before the first section marker ignored",
                    section.first_line().unwrap_or(1),
                );
            }
            SectionTag::Comments { version } => {
                if version.is_some() {
                    document.version = version.clone();
                }
                document
                    .comments
                    .extend(section.payload.iter().map(|line| line.text.to_string()));
            }
            SectionTag::Nodes { area } => {
                decode_nodes(&section, area.as_deref(), lookup, &mut document, &mut diag);
            }
            SectionTag::Lines => {
                decode_records::<Line>(&section, &mut document, &mut diag);
            }
            SectionTag::Transformers => {
                decode_records::<Transformer>(&section, &mut document, &mut diag);
            }
            SectionTag::Regulations => {
                decode_records::<Regulation>(&section, &mut document, &mut diag);
            }
            SectionTag::Parameters => {
                decode_records::<Parameter>(&section, &mut document, &mut diag);
            }
            SectionTag::Schedules => {
                decode_records::<Schedule>(&section, &mut document, &mut diag);
            }
            SectionTag::Unknown(marker) => {
                warn!(
                    "Unknown section marker ##{} at line {}, {} lines skipped",
                    marker,
                    section.header_line,
                    section.non_blank().count()
                );
                diag.add_warning_for(
                    "structure",
                    &format!(
                        "Unknown section marker, {} lines skipped",
                        section.non_blank().count()
                    ),
                    &format!("##{}", marker),
                    section.header_line,
                );
            }
        }
    }

    document.link();
    check_slack_nodes(&document, &mut diag);

    diag.stats.nodes = document.nodes.len();
    diag.stats.lines = document.lines.len();
    diag.stats.transformers = document.transformers.len();
    diag.stats.regulations = document.regulations.len();
    diag.stats.parameters = document.parameters.len();
    diag.stats.schedules = document.schedules.len();

    info!("Decoded UCTE document: {}", diag.summary());

    ImportResult {
        document,
        diagnostics: diag,
    }
}

/// A decoded record with its line number and rejected column values.
type Decoded<R> = (usize, R, Vec<RejectedField>);

/// Decode every non-blank payload line of a section.
///
/// Lines that do not match the layout are kept on the document and reported.
fn decode_section<R: UcteRecord>(
    section: &Section<'_>,
    document: &mut Document,
    diag: &mut ImportDiagnostics,
) -> Vec<Decoded<R>> {
    let kind = R::spec().kind;
    let mut records = Vec::new();

    for line in section.non_blank() {
        match R::decode_line(line.text) {
            Some((record, fields)) => {
                records.push((line.number, record, fields.rejected().to_vec()));
            }
            None => {
                warn!("Unparsed {} record at line {}", kind, line.number);
                diag.add_unparsed(kind.name(), line.text, line.number);
                document.push_unparsed(kind, line.text);
            }
        }
    }

    debug!("{} {} records decoded from {}", records.len(), kind, section.tag);
    records
}

fn report_rejected(
    diag: &mut ImportDiagnostics,
    rejected: &[RejectedField],
    entity: &str,
    line: usize,
) {
    for field in rejected {
        diag.add_coercion(
            &format!(
                "Value '{}' of {} is not usable, treated as blank",
                field.raw, field.field
            ),
            entity,
            line,
        );
    }
}

/// Keyed insertion of branch and schedule records.
trait Collected: UcteRecord {
    fn identity(&self) -> String;

    /// Insert into the document; true when an earlier record was replaced.
    fn insert_into(self, document: &mut Document) -> bool;
}

impl Collected for Line {
    fn identity(&self) -> String {
        self.key().to_string()
    }

    fn insert_into(self, document: &mut Document) -> bool {
        document.insert_line(self).is_some()
    }
}

impl Collected for Transformer {
    fn identity(&self) -> String {
        self.key().to_string()
    }

    fn insert_into(self, document: &mut Document) -> bool {
        document.insert_transformer(self).is_some()
    }
}

impl Collected for Regulation {
    fn identity(&self) -> String {
        self.key().to_string()
    }

    fn insert_into(self, document: &mut Document) -> bool {
        document.insert_regulation(self).is_some()
    }
}

impl Collected for Parameter {
    fn identity(&self) -> String {
        self.key().to_string()
    }

    fn insert_into(self, document: &mut Document) -> bool {
        document.insert_parameter(self).is_some()
    }
}

impl Collected for Schedule {
    fn identity(&self) -> String {
        self.key().to_string()
    }

    fn insert_into(self, document: &mut Document) -> bool {
        document.insert_schedule(self).is_some()
    }
}

fn decode_records<R: Collected>(
    section: &Section<'_>,
    document: &mut Document,
    diag: &mut ImportDiagnostics,
) {
    let kind = R::spec().kind;
    for (line, record, rejected) in decode_section::<R>(section, document, diag) {
        let entity = record.identity();
        report_rejected(diag, &rejected, &entity, line);
        if record.insert_into(document) {
            warn!(
                "Duplicate {} '{}' at line {} replaces an earlier record",
                kind, entity, line
            );
            diag.add_duplicate(kind.name(), &entity, line);
        }
    }
}

fn decode_nodes(
    section: &Section<'_>,
    area: Option<&str>,
    lookup: &dyn AreaLookup,
    document: &mut Document,
    diag: &mut ImportDiagnostics,
) {
    if !section.has_content() {
        debug!("Empty node section {} skipped", section.tag);
        return;
    }
    if let Some(code) = area {
        document.register_area(code);
    }

    for (line, mut node, rejected) in decode_section::<Node>(section, document, diag) {
        report_rejected(diag, &rejected, &node.code, line);

        node.area = match area {
            Some(code) => Some(code.to_string()),
            None => lookup.area_for_node(&node.code),
        };
        match &node.area {
            Some(code) => document.register_area(code),
            None => {
                warn!("No area known for node '{}' at line {}", node.code, line);
                diag.add_warning_for(
                    "area",
                    "Node code prefix matches no known area",
                    &node.code,
                    line,
                );
            }
        }

        let code = node.code.clone();
        if document.insert_node(node).is_some() {
            warn!("Duplicate node '{}' at line {} replaces an earlier record", code, line);
            diag.add_duplicate(RecordKind::Node.name(), &code, line);
        }
    }
}

fn check_slack_nodes(document: &Document, diag: &mut ImportDiagnostics) {
    let slack: Vec<&str> = document
        .slack_nodes()
        .map(|node| node.code.as_str())
        .collect();
    if slack.len() > 1 {
        warn!("{} slack nodes in document: {}", slack.len(), slack.join(", "));
        diag.add_warning_with_entity(
            "validation",
            &format!("{} slack nodes, at most one expected", slack.len()),
            &slack.join(", "),
        );
    }
}
