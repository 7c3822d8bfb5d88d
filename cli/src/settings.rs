//! Runtime settings: defaults, optional TOML file, then command-line overrides.
//!
//! Precedence: flag > `--config` file (or `pharmacy-graph.toml` in the working
//! directory when present) > built-in default.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use pharmacy_graph_core::{
    GraphConfig, GraphError, DEFAULT_SAMPLE_SIZE, DEFAULT_THRESHOLD_MILES, MAX_SAMPLE_SIZE,
    MAX_THRESHOLD_MILES,
};
use serde::Deserialize;

/// Config file picked up automatically when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "pharmacy-graph.toml";

pub const DEFAULT_DATA_PATH: &str = "Pharmacies.csv";

pub const DEFAULT_STATE: &str = "MI";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Pharmacy CSV to load.
    pub data_path: PathBuf,
    /// Two-letter state code rows are filtered on.
    pub state: String,
    pub threshold_miles: f64,
    pub sample_size: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            state: DEFAULT_STATE.to_string(),
            threshold_miles: DEFAULT_THRESHOLD_MILES,
            sample_size: DEFAULT_SAMPLE_SIZE,
        }
    }
}

/// Values given on the command line; `None` leaves the setting alone.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub data_path: Option<PathBuf>,
    pub state: Option<String>,
    pub threshold_miles: Option<f64>,
    pub sample_size: Option<usize>,
}

impl Settings {
    /// Load from `path`, or from [`DEFAULT_CONFIG_FILE`] if it exists, else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::from_file(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse_toml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn parse_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(ref p) = overrides.data_path {
            self.data_path = p.clone();
        }
        if let Some(ref s) = overrides.state {
            self.state = s.clone();
        }
        if let Some(t) = overrides.threshold_miles {
            self.threshold_miles = t;
        }
        if let Some(n) = overrides.sample_size {
            self.sample_size = n;
        }
    }

    pub fn graph_config(&self) -> GraphConfig {
        GraphConfig {
            threshold_miles: self.threshold_miles,
            sample_size: self.sample_size,
        }
    }

    /// Reject out-of-range values with a message naming the key and its bounds.
    pub fn validate(&self) -> Result<()> {
        let state = self.state.trim();
        if state.len() != 2 || !state.chars().all(|c| c.is_ascii_alphabetic()) {
            bail!("state must be a two-letter code, got '{}'", self.state);
        }

        match self.graph_config().validate() {
            Ok(()) => Ok(()),
            Err(GraphError::InvalidThreshold(t)) => bail!(
                "threshold_miles must be greater than 0 and at most {}, got {}",
                MAX_THRESHOLD_MILES,
                t
            ),
            Err(GraphError::InvalidSampleSize(n)) => bail!(
                "sample_size must be between 1 and {}, got {}",
                MAX_SAMPLE_SIZE,
                n
            ),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.data_path, PathBuf::from("Pharmacies.csv"));
        assert_eq!(s.state, "MI");
        assert_eq!(s.threshold_miles, 2.0);
        assert_eq!(s.sample_size, 200);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let s = Settings::parse_toml("state = \"OH\"\nthreshold_miles = 1.5\n").unwrap();
        assert_eq!(s.state, "OH");
        assert_eq!(s.threshold_miles, 1.5);
        assert_eq!(s.sample_size, 200);
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(Settings::parse_toml("radius = 3.0\n").is_err());
    }

    #[test]
    fn test_overrides_win() {
        let mut s = Settings::parse_toml("sample_size = 50\nstate = \"OH\"\n").unwrap();
        s.apply(&Overrides {
            sample_size: Some(75),
            data_path: Some(PathBuf::from("/tmp/x.csv")),
            ..Overrides::default()
        });
        assert_eq!(s.sample_size, 75);
        assert_eq!(s.state, "OH");
        assert_eq!(s.data_path, PathBuf::from("/tmp/x.csv"));
    }

    #[test]
    fn test_validate_threshold_message() {
        let s = Settings {
            threshold_miles: 250.0,
            ..Settings::default()
        };
        let msg = s.validate().unwrap_err().to_string();
        assert!(msg.contains("threshold_miles"), "{}", msg);
        assert!(msg.contains("100"), "{}", msg);
    }

    #[test]
    fn test_validate_sample_size_message() {
        let s = Settings {
            sample_size: 0,
            ..Settings::default()
        };
        let msg = s.validate().unwrap_err().to_string();
        assert!(msg.contains("sample_size"), "{}", msg);
    }

    #[test]
    fn test_validate_state() {
        let s = Settings {
            state: "Michigan".to_string(),
            ..Settings::default()
        };
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "data_path = \"data/oh.csv\"\nstate = \"OH\"").unwrap();
        let s = Settings::load(Some(file.path())).unwrap();
        assert_eq!(s.data_path, PathBuf::from("data/oh.csv"));
        assert_eq!(s.state, "OH");
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let err = Settings::load(Some(Path::new("/nonexistent/pharmacy-graph.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
