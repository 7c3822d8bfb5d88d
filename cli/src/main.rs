//! pharmacy-graph: explore the proximity network of pharmacies in one state.
//!
//! Loads the pharmacy CSV, builds the graph over a leading sample with
//! pharmacy-graph-core, then answers queries either one-shot or through the
//! interactive numeric menu.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use pharmacy_graph_core::NodeId;

mod degree;
mod index;
mod info;
mod load;
mod neighbors;
mod path;
mod settings;
mod shell;
mod state;
mod status;
mod util;
mod zip;

use settings::{Overrides, Settings};
use state::Session;
use util::{describe, OutputFormat};

#[derive(Parser)]
#[command(name = "pharmacy-graph", version, about = "Pharmacy proximity network explorer")]
struct Cli {
    /// TOML settings file (default: ./pharmacy-graph.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Pharmacy CSV to load
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Two-letter state code to keep
    #[arg(long, global = true)]
    state: Option<String>,

    /// Connect pharmacies at most this many miles apart
    #[arg(long, global = true)]
    threshold: Option<f64>,

    /// Number of leading pharmacies to build the graph over
    #[arg(long, global = true)]
    sample_size: Option<usize>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive menu (default)
    Shell,
    /// Pharmacies within the threshold of one pharmacy
    Neighbors { id: NodeId },
    /// Fewest-hop route between two pharmacies
    Path { from: NodeId, to: NodeId },
    /// Pharmacy with the most neighbors
    MostConnected,
    /// Details and map link for one pharmacy
    Info { id: NodeId },
    /// Pharmacies whose ZIP code starts with a prefix
    Zip { prefix: String },
    /// Pharmacies ranked by number of neighbors
    Rank {
        /// How many to show; 0 shows all
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
    /// Loaded data and graph summary
    Status,
    /// Index reference for the graph sample
    Index,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,pharmacy_graph=info".into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", describe(&e));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    settings.apply(&Overrides {
        data_path: cli.data,
        state: cli.state,
        threshold_miles: cli.threshold,
        sample_size: cli.sample_size,
    });
    settings.validate()?;

    let session = Session::open(settings)?;
    let format = cli.format;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => shell::run(&session, io::stdin().lock(), &mut out, format)?,
        Commands::Neighbors { id } => neighbors::run(&session, id, format, &mut out)?,
        Commands::Path { from, to } => path::run(&session, from, to, format, &mut out)?,
        Commands::MostConnected => degree::most_connected(&session, format, &mut out)?,
        Commands::Info { id } => info::run(&session, id, format, &mut out)?,
        Commands::Zip { prefix } => zip::run(&session, &prefix, format, &mut out)?,
        Commands::Rank { top } => degree::rank(&session, top, format, &mut out)?,
        Commands::Status => status::run(&session, format, &mut out)?,
        Commands::Index => index::run(&session, format, &mut out)?,
    }

    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_path_with_overrides() {
        let cli = Cli::parse_from([
            "pharmacy-graph",
            "--threshold",
            "1.5",
            "--format",
            "json",
            "path",
            "3",
            "17",
        ]);
        assert_eq!(cli.threshold, Some(1.5));
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(matches!(cli.command, Some(Commands::Path { from: 3, to: 17 })));
    }

    #[test]
    fn test_no_subcommand_means_shell() {
        let cli = Cli::parse_from(["pharmacy-graph", "--state", "oh"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.state.as_deref(), Some("oh"));
    }

    #[test]
    fn test_end_to_end_from_csv() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("pharmacies.csv");
        std::fs::write(
            &data,
            "X,Y,NAME,CITY,STATE,ZIP\n\
             -83.0458,42.3314,Corner Drug,DETROIT,MI,48201\n\
             -83.0458,42.3400,Midtown Rx,DETROIT,MI,48202\n\
             -81.69,41.49,Lakeside Rx,CLEVELAND,OH,44114\n",
        )
        .unwrap();

        let mut settings = Settings::default();
        settings.apply(&Overrides {
            data_path: Some(data),
            ..Overrides::default()
        });
        settings.validate().unwrap();
        let session = Session::open(settings).unwrap();

        assert_eq!(session.store.len(), 2);
        assert_eq!(session.engine.graph().edge_count(), 1);
        assert_eq!(session.report.skipped_region, 1);
    }
}
