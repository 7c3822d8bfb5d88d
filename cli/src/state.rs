use std::time::Instant;

use anyhow::{Context, Result};
use pharmacy_graph_core::{FacilityRecord, FacilityStore, QueryEngine};
use tracing::info;

use crate::load::{self, LoadReport};
use crate::settings::Settings;

/// Everything a command needs: the full store, the engine over its sample,
/// and where they came from.
pub struct Session {
    pub store: FacilityStore,
    pub engine: QueryEngine,
    pub settings: Settings,
    pub report: LoadReport,
    pub load_time_ms: f64,
}

impl Session {
    /// Read the CSV named in `settings` and build the graph.
    pub fn open(settings: Settings) -> Result<Self> {
        let start = Instant::now();
        let (records, report) = load::load_facilities(&settings.data_path, &settings.state)?;
        let mut session = Self::from_records(records, report, settings)?;
        session.load_time_ms = start.elapsed().as_secs_f64() * 1000.0;
        Ok(session)
    }

    pub fn from_records(
        records: Vec<FacilityRecord>,
        report: LoadReport,
        settings: Settings,
    ) -> Result<Self> {
        let start = Instant::now();
        let store = FacilityStore::new(records);
        let engine = QueryEngine::from_store(&store, &settings.graph_config())
            .context("Failed to build proximity graph")?;

        let summary = engine.summary();
        info!(
            nodes = summary.node_count,
            edges = summary.edge_count,
            isolated = summary.isolated_count,
            threshold_miles = summary.threshold_miles,
            "sample network created"
        );

        Ok(Self {
            store,
            engine,
            settings,
            report,
            load_time_ms: start.elapsed().as_secs_f64() * 1000.0,
        })
    }

    /// Highest id in the graph sample, if any.
    pub fn max_index(&self) -> Option<u64> {
        self.engine.graph().node_count().checked_sub(1).map(|n| n as u64)
    }
}
