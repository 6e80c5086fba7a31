use std::io::{self, Write};
use std::path::Path;

use anyhow::{bail, Result};
use serde::Serialize;
use tabwriter::TabWriter;
use tracing::info;
use ucte_core::{Document, ImportDiagnostics};
use ucte_io::{parse_ucte, ImportResult};

#[derive(Serialize)]
struct DecodeReport<'a> {
    document: &'a Document,
    diagnostics: &'a ImportDiagnostics,
}

pub fn handle(file: &Path, json: bool, strict: bool) -> Result<()> {
    info!("Decoding {}", file.display());
    let result = parse_ucte(file)?;

    if json {
        print_json(&result)?;
    } else {
        print_summary(file, &result)?;
    }

    let unparsed = result.diagnostics.stats.unparsed_lines;
    if strict && unparsed > 0 {
        bail!(
            "{} unparsed line{} in '{}'",
            unparsed,
            if unparsed == 1 { "" } else { "s" },
            file.display()
        );
    }
    Ok(())
}

fn print_json(result: &ImportResult) -> Result<()> {
    let report = DecodeReport {
        document: &result.document,
        diagnostics: &result.diagnostics,
    };
    serde_json::to_writer_pretty(io::stdout(), &report)
        .map_err(|err| anyhow::anyhow!("serializing decode report to JSON: {err}"))?;
    println!();
    Ok(())
}

fn print_summary(file: &Path, result: &ImportResult) -> Result<()> {
    let doc = &result.document;
    let diag = &result.diagnostics;

    println!("UCTE document {}", file.display());
    if let Some(version) = &doc.version {
        println!("Format version: {version}");
    }
    println!();

    let mut writer = TabWriter::new(io::stdout());
    writeln!(writer, "RECORDS\tCOUNT")?;
    writeln!(writer, "nodes\t{}", doc.nodes.len())?;
    writeln!(writer, "lines\t{}", doc.lines.len())?;
    writeln!(writer, "transformers\t{}", doc.transformers.len())?;
    writeln!(writer, "regulations\t{}", doc.regulations.len())?;
    writeln!(writer, "tap rows\t{}", doc.parameters.len())?;
    writeln!(writer, "schedules\t{}", doc.schedules.len())?;
    writeln!(writer, "areas\t{}", doc.areas.len())?;
    writeln!(writer, "unparsed\t{}", diag.stats.unparsed_lines)?;
    writer.flush()?;

    println!();
    println!("{}", diag.summary());
    if diag.has_issues() {
        let mut writer = TabWriter::new(io::stdout());
        writeln!(writer, "SEVERITY\tCATEGORY\tLINE\tENTITY\tMESSAGE")?;
        for issue in &diag.issues {
            writeln!(
                writer,
                "{:?}\t{}\t{}\t{}\t{}",
                issue.severity,
                issue.category,
                issue.line.map(|l| l.to_string()).unwrap_or_default(),
                issue.entity.as_deref().unwrap_or(""),
                issue.message
            )?;
        }
        writer.flush()?;
    }
    Ok(())
}
