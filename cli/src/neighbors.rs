use std::io::Write;

use anyhow::Result;
use pharmacy_graph_core::NodeId;

use crate::state::Session;
use crate::util::{write_json, OutputFormat};

/// List the pharmacies within the threshold of `id`.
pub fn run(session: &Session, id: NodeId, format: OutputFormat, out: &mut dyn Write) -> Result<()> {
    let neighbors = session.engine.neighbors(id)?;

    match format {
        OutputFormat::Json => write_json(out, &neighbors)?,
        OutputFormat::Table => {
            if neighbors.is_empty() {
                writeln!(out, "No nearby pharmacies found.")?;
            } else {
                writeln!(out, "{} nearby pharmacies:", neighbors.len())?;
                for f in neighbors {
                    writeln!(out, "- {} in {}", f.name, f.city)?;
                }
            }
        }
    }

    Ok(())
}
