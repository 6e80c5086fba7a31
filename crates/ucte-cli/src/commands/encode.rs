use std::path::Path;

use anyhow::{bail, Result};
use tracing::{info, warn};
use ucte_io::{parse_ucte, write_ucte, EncodeOptions};

/// Re-encode `input` into `output`.
///
/// `trim` overrides the configured default when given.
pub fn handle(
    input: &Path,
    output: &Path,
    trim: Option<bool>,
    force: bool,
    defaults: &EncodeOptions,
) -> Result<()> {
    if output.exists() && !force {
        bail!(
            "Output '{}' already exists (use --force to overwrite)",
            output.display()
        );
    }

    info!("Re-encoding {} to {}", input.display(), output.display());
    let result = parse_ucte(input)?;
    if result.diagnostics.has_issues() {
        warn!("{}: {}", input.display(), result.diagnostics.summary());
    }

    let options = EncodeOptions {
        trim: trim.unwrap_or(defaults.trim),
        ..*defaults
    };
    write_ucte(&result.document, output, &options)?;

    let doc = &result.document;
    println!(
        "Wrote {} ({} nodes, {} lines, {} transformers, {} schedules)",
        output.display(),
        doc.nodes.len(),
        doc.lines.len(),
        doc.transformers.len(),
        doc.schedules.len()
    );
    Ok(())
}
