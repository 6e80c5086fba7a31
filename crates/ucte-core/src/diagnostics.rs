//! Diagnostics collected while decoding a grid document.
//!
//! Decoding never aborts. Everything that could not be taken over verbatim is
//! recorded here instead:
//!
//! - unparsed record lines (category `parse`)
//! - identity collisions, last record wins (category `duplicate`)
//! - values that parsed but were rejected, e.g. an unknown node type (`coercion`)
//! - unknown or empty section markers (`structure`)
//! - nodes whose area could not be resolved (`area`)
//! - document-level oddities such as several slack nodes (`validation`)
//!
//! # Example
//!
//! ```
//! use ucte_core::diagnostics::{ImportDiagnostics, Severity};
//!
//! let mut diag = ImportDiagnostics::new();
//! diag.add_warning_with_entity("area", "Unknown node prefix", "?NODE123");
//! diag.add_unparsed("Line", "NOT A LINE", 12);
//!
//! assert_eq!(diag.warning_count(), 1);
//! assert_eq!(diag.error_count(), 1);
//! assert_eq!(diag.stats.unparsed_lines, 1);
//! ```

use serde::Serialize;

/// Severity level for diagnostic issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Decoded, but not verbatim (e.g. value dropped, record replaced)
    Warning,
    /// Could not decode the element at all (e.g. malformed record line)
    Error,
}

/// A single issue encountered while decoding
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticIssue {
    pub severity: Severity,
    /// Category for grouping ("parse", "duplicate", "structure", ...)
    pub category: String,
    pub message: String,
    /// 1-based line number in the source document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// Entity reference (e.g. a node code or a branch identity)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
}

impl DiagnosticIssue {
    pub fn new(
        severity: Severity,
        category: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            category: category.into(),
            message: message.into(),
            line: None,
            entity: None,
        }
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }
}

impl std::fmt::Display for DiagnosticIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let severity = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };

        write!(f, "[{}:{}] {}", severity, self.category, self.message)?;

        if let Some(entity) = &self.entity {
            write!(f, " ({})", entity)?;
        }
        if let Some(line) = self.line {
            write!(f, " at line {}", line)?;
        }

        Ok(())
    }
}

/// Record counts and issue counters for one decode
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportStats {
    pub nodes: usize,
    pub lines: usize,
    pub transformers: usize,
    pub regulations: usize,
    pub parameters: usize,
    pub schedules: usize,
    pub unparsed_lines: usize,
    pub duplicate_records: usize,
    pub coerced_values: usize,
}

/// Complete diagnostics for a decode
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportDiagnostics {
    pub stats: ImportStats,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<DiagnosticIssue>,
}

impl ImportDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a warning with line number
    pub fn add_warning_at_line(&mut self, category: &str, message: &str, line: usize) {
        self.issues
            .push(DiagnosticIssue::new(Severity::Warning, category, message).with_line(line));
    }

    pub fn add_warning_with_entity(&mut self, category: &str, message: &str, entity: &str) {
        self.issues
            .push(DiagnosticIssue::new(Severity::Warning, category, message).with_entity(entity));
    }

    /// Add a warning about an entity at a known line
    pub fn add_warning_for(&mut self, category: &str, message: &str, entity: &str, line: usize) {
        self.issues.push(
            DiagnosticIssue::new(Severity::Warning, category, message)
                .with_entity(entity)
                .with_line(line),
        );
    }

    /// Record a replaced record (increments duplicate_records)
    pub fn add_duplicate(&mut self, kind: &str, entity: &str, line: usize) {
        self.issues.push(
            DiagnosticIssue::new(
                Severity::Warning,
                "duplicate",
                format!("Duplicate {} identity, last record wins", kind),
            )
            .with_entity(entity)
            .with_line(line),
        );
        self.stats.duplicate_records += 1;
    }

    /// Record a value that parsed but was not accepted (increments coerced_values)
    pub fn add_coercion(&mut self, message: &str, entity: &str, line: usize) {
        self.issues.push(
            DiagnosticIssue::new(Severity::Warning, "coercion", message)
                .with_entity(entity)
                .with_line(line),
        );
        self.stats.coerced_values += 1;
    }

    /// Record a line that matches no layout of its section (increments unparsed_lines)
    pub fn add_unparsed(&mut self, kind: &str, text: &str, line: usize) {
        self.issues.push(
            DiagnosticIssue::new(
                Severity::Error,
                "parse",
                format!("{} record does not match its layout", kind),
            )
            .with_entity(text.trim_end())
            .with_line(line),
        );
        self.stats.unparsed_lines += 1;
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count()
    }

    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Error)
    }

    pub fn issues_by_category<'a>(
        &'a self,
        category: &'a str,
    ) -> impl Iterator<Item = &'a DiagnosticIssue> {
        self.issues.iter().filter(move |i| i.category == category)
    }

    pub fn summary(&self) -> String {
        let warnings = self.warning_count();
        let errors = self.error_count();
        let issue_summary = match (warnings, errors) {
            (0, 0) => "No issues".to_string(),
            (w, 0) => format!("{} warning{}", w, if w == 1 { "" } else { "s" }),
            (0, e) => format!("{} error{}", e, if e == 1 { "" } else { "s" }),
            (w, e) => format!(
                "{} warning{}, {} error{}",
                w,
                if w == 1 { "" } else { "s" },
                e,
                if e == 1 { "" } else { "s" }
            ),
        };

        format!(
            "{} nodes, {} lines, {} transformers, {} regulations, {} parameters, {} schedules | {}",
            self.stats.nodes,
            self.stats.lines,
            self.stats.transformers,
            self.stats.regulations,
            self.stats.parameters,
            self.stats.schedules,
            issue_summary
        )
    }
}

impl std::fmt::Display for ImportDiagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Decode: {}", self.summary())?;
        for issue in &self.issues {
            writeln!(f, "  {}", issue)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostics_counts() {
        let mut diag = ImportDiagnostics::new();
        diag.add_warning_for("structure", "Unknown section marker", "##X", 40);
        diag.add_unparsed("Line", "QA QB 1 0 ", 42);
        diag.add_duplicate("Line", "A B 1", 50);

        assert_eq!(diag.warning_count(), 2);
        assert_eq!(diag.error_count(), 1);
        assert_eq!(diag.stats.unparsed_lines, 1);
        assert_eq!(diag.stats.duplicate_records, 1);
        assert!(diag.has_errors());

        let unparsed = diag.issues_by_category("parse").next().unwrap();
        assert_eq!(unparsed.message, "Line record does not match its layout");
        assert_eq!(unparsed.entity.as_deref(), Some("QA QB 1 0"));
        assert_eq!(unparsed.line, Some(42));
    }

    #[test]
    fn test_issue_display() {
        let issue = DiagnosticIssue::new(Severity::Error, "parse", "Invalid record")
            .with_entity("Line")
            .with_line(7);

        let display = issue.to_string();
        assert!(display.contains("error"));
        assert!(display.contains("parse"));
        assert!(display.contains("(Line)"));
        assert!(display.contains("line 7"));
    }

    #[test]
    fn test_summary() {
        let mut diag = ImportDiagnostics::new();
        diag.stats.nodes = 4;
        assert!(diag.summary().ends_with("| No issues"));

        diag.add_warning_for("area", "w", "?NODE", 2);
        diag.add_unparsed("Node", "e", 3);
        let summary = diag.summary();
        assert!(summary.starts_with("4 nodes"));
        assert!(summary.ends_with("1 warning, 1 error"));
    }

    #[test]
    fn test_issues_by_category() {
        let mut diag = ImportDiagnostics::new();
        diag.add_coercion("Unknown node type 7", "QNODE", 3);
        diag.add_warning_at_line("structure", "empty section", 1);
        diag.add_coercion("Unknown node type 9", "QNODE2", 4);

        assert_eq!(diag.issues_by_category("coercion").count(), 2);
        assert_eq!(diag.stats.coerced_values, 2);
    }

    #[test]
    fn test_serialization() {
        let mut diag = ImportDiagnostics::new();
        diag.stats.lines = 3;
        diag.add_unparsed("Schedule", "bad", 9);

        let json = serde_json::to_string_pretty(&diag).unwrap();
        assert!(json.contains("\"lines\": 3"));
        assert!(json.contains("\"error\""));
        assert!(json.contains("\"line\": 9"));
    }
}
