use std::io::Write;

use anyhow::Result;
use comfy_table::{ContentArrangement, Table};

use crate::state::Session;
use crate::util::{write_json, OutputFormat};

/// Print the pharmacy with the most neighbors.
pub fn most_connected(session: &Session, format: OutputFormat, out: &mut dyn Write) -> Result<()> {
    let top = session.engine.most_connected()?;

    match format {
        OutputFormat::Json => write_json(out, &top)?,
        OutputFormat::Table => writeln!(
            out,
            "Most connected pharmacy: {} in {} ({} connections)",
            top.facility.name, top.facility.city, top.degree
        )?,
    }

    Ok(())
}

/// Print pharmacies ranked by degree. `top_n == 0` prints all of them.
pub fn rank(session: &Session, top_n: usize, format: OutputFormat, out: &mut dyn Write) -> Result<()> {
    let ranking = session.engine.degree_ranking(top_n);

    match format {
        OutputFormat::Json => write_json(out, &ranking)?,
        OutputFormat::Table => {
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["Index", "Name", "City", "Connections"]);
            for entry in &ranking {
                table.add_row(vec![
                    entry.facility.id.to_string(),
                    entry.facility.name.clone(),
                    entry.facility.city.clone(),
                    entry.degree.to_string(),
                ]);
            }
            writeln!(out, "{}", table)?;
            writeln!(out, "{} row(s)", ranking.len())?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::fixtures::session;

    #[test]
    fn test_most_connected() {
        let mut out = Vec::new();
        most_connected(&session(), OutputFormat::Table, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Most connected pharmacy: Midtown Rx in Detroit (2 connections)\n"
        );
    }

    #[test]
    fn test_most_connected_json() {
        let mut out = Vec::new();
        most_connected(&session(), OutputFormat::Json, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["degree"], 2);
        assert_eq!(value["facility"]["id"], 1);
    }

    #[test]
    fn test_rank_top_two() {
        let mut out = Vec::new();
        rank(&session(), 2, OutputFormat::Json, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let ids: Vec<u64> = value
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["facility"]["id"].as_u64().unwrap())
            .collect();
        assert_eq!(ids, vec![1, 0]);
    }

    #[test]
    fn test_rank_table_lists_everything() {
        let mut out = Vec::new();
        rank(&session(), 0, OutputFormat::Table, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Superior Apothecary"));
        assert!(text.ends_with("4 row(s)\n"));
    }
}
