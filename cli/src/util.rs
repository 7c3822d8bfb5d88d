use std::io::Write;

use anyhow::Result;
use pharmacy_graph_core::{GraphError, NodeId};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Parse a facility index typed by the user.
pub fn parse_id(input: &str) -> Result<NodeId, String> {
    let trimmed = input.trim();
    trimmed
        .parse::<NodeId>()
        .map_err(|_| format!("Invalid index '{}': enter a whole number.", trimmed))
}

/// Cut `s` to at most `max` characters.
pub fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// User-facing text for an error, with friendlier wording for query errors.
pub fn describe(err: &anyhow::Error) -> String {
    match err.downcast_ref::<GraphError>() {
        Some(GraphError::UnknownNode(id)) => {
            format!("No pharmacy with index {} in the loaded sample.", id)
        }
        Some(GraphError::NoPathFound { .. }) => {
            "No path found between the selected pharmacies.".to_string()
        }
        Some(GraphError::EmptyGraph) => "No connections found in the network.".to_string(),
        Some(GraphError::InvalidZipPrefix(p)) => {
            format!("Invalid ZIP code '{}': enter up to 5 digits.", p)
        }
        _ => format!("{:#}", err),
    }
}

pub fn write_json<W: Write + ?Sized, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
    Ok(())
}
