use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use crate::load::LoadReport;
use crate::state::Session;
use crate::util::{write_json, OutputFormat};

#[derive(Serialize)]
struct StatusView<'a> {
    source: String,
    state: &'a str,
    facilities_loaded: usize,
    load: LoadReport,
    sample_size: usize,
    node_count: usize,
    edge_count: usize,
    isolated_count: usize,
    threshold_miles: f64,
    memory_bytes: usize,
    load_time_ms: f64,
}

/// Print what was loaded and the shape of the resulting graph.
pub fn run(session: &Session, format: OutputFormat, out: &mut dyn Write) -> Result<()> {
    let summary = session.engine.summary();
    let view = StatusView {
        source: session.settings.data_path.display().to_string(),
        state: &session.settings.state,
        facilities_loaded: session.store.len(),
        load: session.report,
        sample_size: session.settings.sample_size,
        node_count: summary.node_count,
        edge_count: summary.edge_count,
        isolated_count: summary.isolated_count,
        threshold_miles: summary.threshold_miles,
        memory_bytes: session.engine.graph().memory_usage(),
        load_time_ms: session.load_time_ms,
    };

    match format {
        OutputFormat::Json => write_json(out, &view)?,
        OutputFormat::Table => {
            writeln!(out, "Source:     {}", view.source)?;
            writeln!(out, "State:      {}", view.state)?;
            writeln!(
                out,
                "Loaded:     {} pharmacies ({} rows read, {} without coordinates)",
                view.facilities_loaded, view.load.rows_read, view.load.skipped_coordinates
            )?;
            writeln!(out, "Sample:     {} (limit {})", view.node_count, view.sample_size)?;
            writeln!(
                out,
                "Network:    {} nodes, {} edges, {} isolated",
                view.node_count, view.edge_count, view.isolated_count
            )?;
            writeln!(out, "Threshold:  {} miles", view.threshold_miles)?;
            writeln!(out, "Memory:     ~{} bytes", view.memory_bytes)?;
            writeln!(out, "Load time:  {:.1}ms", view.load_time_ms)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::fixtures::session;

    #[test]
    fn test_status_table() {
        let mut out = Vec::new();
        run(&session(), OutputFormat::Table, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Network:    4 nodes, 2 edges, 1 isolated"), "{}", text);
        assert!(text.contains("Threshold:  2 miles"), "{}", text);
        assert!(text.contains("Loaded:     5 pharmacies"), "{}", text);
    }

    #[test]
    fn test_status_json() {
        let mut out = Vec::new();
        run(&session(), OutputFormat::Json, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["edge_count"], 2);
        assert_eq!(value["facilities_loaded"], 5);
        assert_eq!(value["state"], "MI");
    }
}
