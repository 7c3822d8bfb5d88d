use std::io::Write;

use anyhow::Result;

use crate::state::Session;
use crate::util::{truncate, write_json, OutputFormat};

const NAME_WIDTH: usize = 30;

/// Print the index reference for the graph sample: index, name, city.
pub fn run(session: &Session, format: OutputFormat, out: &mut dyn Write) -> Result<()> {
    let sample: Vec<_> = session.engine.graph().nodes_iter().collect();

    match format {
        OutputFormat::Json => write_json(out, &sample)?,
        OutputFormat::Table => {
            writeln!(out, "Pharmacy Index Reference (Sample of {})", sample.len())?;
            writeln!(out, "{:<6} | {:<30} | City", "Index", "Name")?;
            writeln!(out, "{:-<57}", "")?;
            for f in sample {
                writeln!(
                    out,
                    "{:<6} | {:<30} | {}",
                    f.id,
                    truncate(&f.name, NAME_WIDTH),
                    f.city
                )?;
            }
        }
    }

    Ok(())
}
