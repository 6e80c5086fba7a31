//! Splits a document into tagged sections.
//!
//! A section starts at a line beginning with `##` and runs up to the next such
//! line. The splitter never fails: unrecognised markers come back as
//! [`SectionTag::Unknown`] and text ahead of the first marker as
//! [`SectionTag::Preamble`].

use std::fmt;

use ucte_core::RecordKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionTag {
    /// Lines ahead of the first marker
    Preamble,
    /// `##C`, with the version token following the tag
    Comments { version: Option<String> },
    /// `##N` (no area) or `##Z<aa>`
    Nodes { area: Option<String> },
    Lines,
    Transformers,
    Regulations,
    Parameters,
    Schedules,
    /// Marker text after `##` that names no known section
    Unknown(String),
}

impl SectionTag {
    /// Parse the marker line of a section (including the leading `##`).
    pub fn parse(header: &str) -> Self {
        let body = header
            .strip_prefix("##")
            .unwrap_or(header)
            .trim_end_matches('\r')
            .trim();

        if let Some(rest) = body.strip_prefix('C') {
            if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                let version = rest.trim();
                return SectionTag::Comments {
                    version: (!version.is_empty()).then(|| version.to_string()),
                };
            }
        }

        if let Some(code) = body.strip_prefix('Z') {
            let code = code.trim_start();
            if code.chars().count() == 2 {
                return SectionTag::Nodes {
                    area: Some(code.to_string()),
                };
            }
            return SectionTag::Unknown(body.to_string());
        }

        match body {
            "N" => SectionTag::Nodes { area: None },
            "L" => SectionTag::Lines,
            "T" => SectionTag::Transformers,
            "R" => SectionTag::Regulations,
            "TT" => SectionTag::Parameters,
            "E" => SectionTag::Schedules,
            other => SectionTag::Unknown(other.to_string()),
        }
    }

    /// Record type carried by the section, if any.
    pub fn record_kind(&self) -> Option<RecordKind> {
        match self {
            SectionTag::Nodes { .. } => Some(RecordKind::Node),
            SectionTag::Lines => Some(RecordKind::Line),
            SectionTag::Transformers => Some(RecordKind::Transformer),
            SectionTag::Regulations => Some(RecordKind::Regulation),
            SectionTag::Parameters => Some(RecordKind::Parameter),
            SectionTag::Schedules => Some(RecordKind::Schedule),
            SectionTag::Preamble | SectionTag::Comments { .. } | SectionTag::Unknown(_) => None,
        }
    }
}

impl fmt::Display for SectionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionTag::Preamble => f.write_str("(preamble)"),
            SectionTag::Comments { .. } => f.write_str("##C"),
            SectionTag::Nodes { area: None } => f.write_str("##N"),
            SectionTag::Nodes { area: Some(code) } => write!(f, "##Z{}", code),
            SectionTag::Lines => f.write_str("##L"),
            SectionTag::Transformers => f.write_str("##T"),
            SectionTag::Regulations => f.write_str("##R"),
            SectionTag::Parameters => f.write_str("##TT"),
            SectionTag::Schedules => f.write_str("##E"),
            SectionTag::Unknown(marker) => write!(f, "##{}", marker),
        }
    }
}

/// One payload line with its 1-based line number in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayloadLine<'a> {
    pub number: usize,
    pub text: &'a str,
}

impl PayloadLine<'_> {
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<'a> {
    pub tag: SectionTag,
    /// 1-based line number of the marker (0 for the preamble)
    pub header_line: usize,
    pub payload: Vec<PayloadLine<'a>>,
}

impl<'a> Section<'a> {
    pub fn has_content(&self) -> bool {
        self.payload.iter().any(|line| !line.is_blank())
    }

    /// Line number of the first payload line, if any.
    pub fn first_line(&self) -> Option<usize> {
        self.payload.first().map(|line| line.number)
    }

    pub fn non_blank(&self) -> impl Iterator<Item = &PayloadLine<'a>> {
        self.payload.iter().filter(|line| !line.is_blank())
    }
}

/// Split a document into sections in document order.
///
/// The preamble is only returned when it holds text.
pub fn split(text: &str) -> Vec<Section<'_>> {
    let mut sections = Vec::new();
    let mut current = Section {
        tag: SectionTag::Preamble,
        header_line: 0,
        payload: Vec::new(),
    };

    for (index, raw) in text.lines().enumerate() {
        let number = index + 1;
        if raw.starts_with("##") {
            let finished = std::mem::replace(
                &mut current,
                Section {
                    tag: SectionTag::parse(raw),
                    header_line: number,
                    payload: Vec::new(),
                },
            );
            if finished.tag != SectionTag::Preamble || finished.has_content() {
                sections.push(finished);
            }
        } else {
            current.payload.push(PayloadLine {
                number,
                text: raw.strip_suffix('\r').unwrap_or(raw),
            });
        }
    }

    if current.tag != SectionTag::Preamble || current.has_content() {
        sections.push(current);
    }
    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tags() {
        assert_eq!(
            SectionTag::parse("##C 2007.05.01"),
            SectionTag::Comments {
                version: Some("2007.05.01".into())
            }
        );
        assert_eq!(SectionTag::parse("##C"), SectionTag::Comments { version: None });
        assert_eq!(SectionTag::parse("##N"), SectionTag::Nodes { area: None });
        assert_eq!(
            SectionTag::parse("##ZSK"),
            SectionTag::Nodes {
                area: Some("SK".into())
            }
        );
        assert_eq!(
            SectionTag::parse("## Z CZ  \r"),
            SectionTag::Nodes {
                area: Some("CZ".into())
            }
        );
        assert_eq!(SectionTag::parse("##TT"), SectionTag::Parameters);
        assert_eq!(SectionTag::parse("##T "), SectionTag::Transformers);
        assert_eq!(SectionTag::parse("##X"), SectionTag::Unknown("X".into()));
        assert_eq!(SectionTag::parse("##Z"), SectionTag::Unknown("Z".into()));
        assert_eq!(SectionTag::parse("##CX"), SectionTag::Unknown("CX".into()));
    }

    #[test]
    fn test_split_tracks_line_numbers() {
        let text = "##C 2007.05.01\nfirst comment\n##N\n##ZSK\nQNODE\n\n##L\n";
        let sections = split(text);
        let tags: Vec<_> = sections.iter().map(|s| s.tag.to_string()).collect();
        assert_eq!(tags, vec!["##C", "##N", "##ZSK", "##L"]);

        assert_eq!(sections[0].payload[0].text, "first comment");
        assert_eq!(sections[0].first_line(), Some(2));
        assert!(!sections[1].has_content());
        assert_eq!(sections[2].header_line, 4);
        assert_eq!(sections[2].payload.len(), 2);
        assert_eq!(sections[2].non_blank().count(), 1);
        assert!(sections[3].payload.is_empty());
    }

    #[test]
    fn test_markers_only_at_line_start() {
        let sections = split("##L\nA ##T B\n");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].payload[0].text, "A ##T B");
    }

    #[test]
    fn test_preamble_kept_only_with_text() {
        assert_eq!(split("\n\n##N\n")[0].tag, SectionTag::Nodes { area: None });
        let sections = split("stray\n##N\n");
        assert_eq!(sections[0].tag, SectionTag::Preamble);
        assert_eq!(sections[0].payload[0].number, 1);
    }

    #[test]
    fn test_crlf_payload() {
        let sections = split("##E\r\nSK CZ   150.0\r\n");
        assert_eq!(sections[0].tag, SectionTag::Schedules);
        assert_eq!(sections[0].payload[0].text, "SK CZ   150.0");
    }
}
