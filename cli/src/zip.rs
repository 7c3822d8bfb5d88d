use std::io::Write;

use anyhow::Result;

use crate::state::Session;
use crate::util::{write_json, OutputFormat};

/// Print every loaded pharmacy whose ZIP starts with `prefix`.
///
/// Searches the whole store, not just the graph sample.
pub fn run(session: &Session, prefix: &str, format: OutputFormat, out: &mut dyn Write) -> Result<()> {
    let matches = session.store.search_zip(prefix)?;

    match format {
        OutputFormat::Json => write_json(out, &matches)?,
        OutputFormat::Table => {
            if matches.is_empty() {
                writeln!(out, "No pharmacies found in that ZIP code.")?;
            } else {
                writeln!(out, "Pharmacies in ZIP code {}:", prefix.trim())?;
                for f in matches {
                    writeln!(out, "- {} ({})", f.name, f.city)?;
                }
            }
        }
    }

    Ok(())
}
