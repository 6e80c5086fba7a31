use std::io::{self, Write};
use std::path::Path;

use anyhow::Result;
use serde::Serialize;
use tabwriter::TabWriter;
use ucte_core::AreaView;
use ucte_io::parse_ucte;

#[derive(Debug, Serialize)]
struct AreaSummary {
    area: String,
    nodes: usize,
    lines: usize,
    transformers: usize,
    schedules: usize,
    slack_nodes: Vec<String>,
    net_position_mw: f64,
    x_nodes: Vec<String>,
    x_net_position_mw: f64,
}

impl AreaSummary {
    fn from_view(view: AreaView<'_>) -> Self {
        Self {
            area: view.code().to_string(),
            nodes: view.nodes().count(),
            lines: view.lines().count(),
            transformers: view.transformers().count(),
            schedules: view.schedules().count(),
            slack_nodes: view.slack_nodes().map(|n| n.code.clone()).collect(),
            net_position_mw: view.net_position(),
            x_nodes: view.x_nodes().iter().map(|n| n.code.clone()).collect(),
            x_net_position_mw: view.x_net_position(),
        }
    }
}

pub fn handle(file: &Path, json: bool) -> Result<()> {
    let result = parse_ucte(file)?;
    let summaries: Vec<AreaSummary> = result
        .document
        .area_views()
        .map(AreaSummary::from_view)
        .collect();

    if json {
        serde_json::to_writer_pretty(io::stdout(), &summaries)
            .map_err(|err| anyhow::anyhow!("serializing area summaries to JSON: {err}"))?;
        println!();
        return Ok(());
    }

    let mut writer = TabWriter::new(io::stdout());
    writeln!(
        writer,
        "AREA\tNODES\tLINES\tTRANSFORMERS\tSCHEDULES\tSLACK\tNET MW\tX-NODES\tX NET MW"
    )?;
    for summary in &summaries {
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}\t{}\t{:.1}\t{}\t{:.1}",
            summary.area,
            summary.nodes,
            summary.lines,
            summary.transformers,
            summary.schedules,
            summary.slack_nodes.join(","),
            summary.net_position_mw,
            summary.x_nodes.len(),
            summary.x_net_position_mw
        )?;
    }
    writer.flush()?;

    let unassigned = result.document.unassigned_nodes().count();
    if unassigned > 0 {
        println!("{} node(s) without an area", unassigned);
    }
    Ok(())
}
