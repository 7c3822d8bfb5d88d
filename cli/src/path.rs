use std::io::Write;

use anyhow::Result;
use pharmacy_graph_core::{Facility, NodeId};
use serde::Serialize;

use crate::state::Session;
use crate::util::{write_json, OutputFormat};

#[derive(Serialize)]
struct PathView<'a> {
    hops: usize,
    steps: Vec<&'a Facility>,
}

/// Print the fewest-hop route between two pharmacies.
pub fn run(
    session: &Session,
    from: NodeId,
    to: NodeId,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    let ids = session.engine.shortest_path(from, to)?;
    let steps = ids
        .iter()
        .map(|&id| session.engine.facility(id))
        .collect::<Result<Vec<_>, _>>()?;
    let view = PathView {
        hops: steps.len().saturating_sub(1),
        steps,
    };

    match format {
        OutputFormat::Json => write_json(out, &view)?,
        OutputFormat::Table => {
            writeln!(out, "Shortest path ({} hops):", view.hops)?;
            for f in &view.steps {
                writeln!(out, "  - {} ({})", f.name, f.city)?;
            }
        }
    }

    Ok(())
}
