use std::io::{BufRead, Write};

use anyhow::Result;
use pharmacy_graph_core::NodeId;

use crate::state::Session;
use crate::util::{describe, parse_id, OutputFormat};
use crate::{degree, index, info, neighbors, path, zip};

const MENU: &str = "\
What would you like to do?
1. Find nearby pharmacies (neighbors)
2. Find shortest path between two pharmacies
3. Find the most connected pharmacy
4. Get info and Google Maps link for a pharmacy
5. Search pharmacies by ZIP code
6. Exit";

/// Interactive numeric menu. Query errors are reported and the loop carries
/// on; only I/O failures end it early. EOF behaves like "6".
pub fn run<R: BufRead, W: Write>(
    session: &Session,
    mut input: R,
    out: &mut W,
    format: OutputFormat,
) -> Result<()> {
    let summary = session.engine.summary();
    writeln!(
        out,
        "Loaded {} pharmacies in {}.",
        session.store.len(),
        session.settings.state
    )?;
    writeln!(
        out,
        "Sample network created with {} nodes and {} edges.",
        summary.node_count, summary.edge_count
    )?;
    writeln!(out)?;
    index::run(session, OutputFormat::Table, out)?;

    let range = match session.max_index() {
        Some(max) => format!("0-{}", max),
        None => "none loaded".to_string(),
    };

    loop {
        writeln!(out)?;
        writeln!(out, "{}", MENU)?;
        let Some(choice) = prompt(&mut input, out, "Enter choice (1-6): ")? else {
            break;
        };

        let result = match choice.as_str() {
            "1" => match read_id(&mut input, out, &format!("Enter pharmacy index ({}): ", range))? {
                Prompted::Id(id) => neighbors::run(session, id, format, out),
                Prompted::Invalid => continue,
                Prompted::Eof => break,
            },
            "2" => {
                let from = match read_id(&mut input, out, &format!("Enter start pharmacy index ({}): ", range))? {
                    Prompted::Id(id) => id,
                    Prompted::Invalid => continue,
                    Prompted::Eof => break,
                };
                let to = match read_id(&mut input, out, &format!("Enter end pharmacy index ({}): ", range))? {
                    Prompted::Id(id) => id,
                    Prompted::Invalid => continue,
                    Prompted::Eof => break,
                };
                path::run(session, from, to, format, out)
            }
            "3" => degree::most_connected(session, format, out),
            "4" => match read_id(&mut input, out, &format!("Enter pharmacy index ({}): ", range))? {
                Prompted::Id(id) => info::run(session, id, format, out),
                Prompted::Invalid => continue,
                Prompted::Eof => break,
            },
            "5" => match prompt(&mut input, out, "Enter 5-digit ZIP code (or prefix): ")? {
                Some(code) => zip::run(session, &code, format, out),
                None => break,
            },
            "6" => break,
            _ => {
                writeln!(out, "Invalid input. Please enter a number 1-6.")?;
                continue;
            }
        };

        if let Err(e) = result {
            writeln!(out, "{}", describe(&e))?;
        }
    }

    writeln!(out, "Goodbye!")?;
    Ok(())
}

enum Prompted {
    Id(NodeId),
    Invalid,
    Eof,
}

/// Print `message`, read one line. `None` on EOF.
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, message: &str) -> Result<Option<String>> {
    write!(out, "{}", message)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        writeln!(out)?;
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn read_id<R: BufRead, W: Write>(input: &mut R, out: &mut W, message: &str) -> Result<Prompted> {
    let Some(line) = prompt(input, out, message)? else {
        return Ok(Prompted::Eof);
    };
    match parse_id(&line) {
        Ok(id) => Ok(Prompted::Id(id)),
        Err(msg) => {
            writeln!(out, "{}", msg)?;
            Ok(Prompted::Invalid)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::fixtures::session;
    use std::io::Cursor;

    fn transcript(keys: &str) -> String {
        let mut out = Vec::new();
        run(&session(), Cursor::new(keys.to_string()), &mut out, OutputFormat::Table).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_banner_and_exit() {
        let text = transcript("6\n");
        assert!(text.starts_with("Loaded 5 pharmacies in MI.\nSample network created with 4 nodes and 2 edges.\n"));
        assert!(text.contains("Pharmacy Index Reference (Sample of 4)"));
        assert!(text.contains("Enter choice (1-6): "));
        assert!(text.ends_with("Goodbye!\n"));
    }

    #[test]
    fn test_neighbors_then_exit() {
        let text = transcript("1\n1\n6\n");
        assert!(text.contains("Enter pharmacy index (0-3): "));
        assert!(text.contains("2 nearby pharmacies:\n- Corner Drug in Detroit\n"));
    }

    #[test]
    fn test_unknown_index_does_not_end_loop() {
        let text = transcript("1\n9999\n3\n6\n");
        assert!(text.contains("No pharmacy with index 9999 in the loaded sample."));
        assert!(text.contains("Most connected pharmacy: Midtown Rx in Detroit (2 connections)"));
        assert!(text.ends_with("Goodbye!\n"));
    }

    #[test]
    fn test_non_numeric_index() {
        let text = transcript("4\nfirst\n6\n");
        assert!(text.contains("Invalid index 'first': enter a whole number."));
        assert!(text.ends_with("Goodbye!\n"));
    }

    #[test]
    fn test_path_and_no_path() {
        let text = transcript("2\n0\n2\n2\n0\n3\n6\n");
        assert!(text.contains("Shortest path (2 hops):"));
        assert!(text.contains("No path found between the selected pharmacies."));
    }

    #[test]
    fn test_info_and_zip() {
        let text = transcript("4\n3\n5\n498\n5\n00000\n6\n");
        assert!(text.contains("Google Maps Link: https://www.google.com/maps/search/?api=1&query=46.5436,-87.3954"));
        assert!(text.contains("Pharmacies in ZIP code 498:\n- Superior Apothecary (Marquette)\n"));
        assert!(text.contains("No pharmacies found in that ZIP code."));
    }

    #[test]
    fn test_invalid_choice() {
        let text = transcript("9\n6\n");
        assert!(text.contains("Invalid input. Please enter a number 1-6."));
    }

    #[test]
    fn test_eof_exits_cleanly() {
        assert!(transcript("").ends_with("Goodbye!\n"));
        assert!(transcript("2\n0\n").ends_with("Goodbye!\n"));
    }
}
