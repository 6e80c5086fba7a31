use std::io::{self, Write};
use std::path::Path;

use anyhow::Result;
use tabwriter::TabWriter;
use ucte_core::CountryTable;
use ucte_io::FileNameMetadata;

pub fn handle(file: &Path, json: bool) -> Result<()> {
    let meta = FileNameMetadata::from_path(file)?;

    if json {
        serde_json::to_writer_pretty(io::stdout(), &meta)
            .map_err(|err| anyhow::anyhow!("serializing file name metadata to JSON: {err}"))?;
        println!();
        return Ok(());
    }

    let area_name = CountryTable
        .by_code(&meta.area)
        .map(|country| country.long_name)
        .unwrap_or("");

    let mut writer = TabWriter::new(io::stdout());
    writeln!(writer, "timestamp\t{}", meta.timestamp.format("%Y-%m-%d %H:%M"))?;
    writeln!(writer, "business type\t{}", meta.business_type)?;
    writeln!(writer, "day of week\t{}", meta.week_day)?;
    writeln!(writer, "area\t{} {}", meta.area, area_name)?;
    writeln!(writer, "version\t{}", meta.version)?;
    writeln!(
        writer,
        "congestion forecast\t{}",
        if meta.congestion { "yes" } else { "no" }
    )?;
    writer.flush()?;
    Ok(())
}
