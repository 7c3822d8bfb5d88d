use std::io::Write;

use anyhow::Result;
use pharmacy_graph_core::NodeId;

use crate::state::Session;
use crate::util::{write_json, OutputFormat};

/// Print a pharmacy's details and a Google Maps link to it.
pub fn run(session: &Session, id: NodeId, format: OutputFormat, out: &mut dyn Write) -> Result<()> {
    let info = session.engine.get_info(id)?;

    match format {
        OutputFormat::Json => write_json(out, &info)?,
        OutputFormat::Table => {
            let f = info.facility;
            writeln!(out, "Pharmacy Info:")?;
            writeln!(out, "Name: {}", f.name)?;
            writeln!(out, "City: {}", f.city)?;
            writeln!(out, "ZIP: {}", f.zip)?;
            writeln!(out, "Coordinates: {} {}", f.latitude, f.longitude)?;
            writeln!(out, "Google Maps Link: {}", info.map_link)?;
        }
    }

    Ok(())
}
