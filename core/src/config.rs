use crate::error::{GraphError, GraphResult};

/// Facilities closer than this (in miles) are connected.
pub const DEFAULT_THRESHOLD_MILES: f64 = 2.0;

/// Number of leading facilities the graph is built over.
pub const DEFAULT_SAMPLE_SIZE: usize = 200;

pub const MAX_THRESHOLD_MILES: f64 = 100.0;

/// Upper bound on the sample: construction is quadratic in this number.
pub const MAX_SAMPLE_SIZE: usize = 5000;

/// Tunables for graph construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphConfig {
    pub threshold_miles: f64,
    pub sample_size: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            threshold_miles: DEFAULT_THRESHOLD_MILES,
            sample_size: DEFAULT_SAMPLE_SIZE,
        }
    }
}

impl GraphConfig {
    /// Check `0 < threshold_miles <= MAX_THRESHOLD_MILES` and
    /// `1 <= sample_size <= MAX_SAMPLE_SIZE`.
    pub fn validate(&self) -> GraphResult<()> {
        let t = self.threshold_miles;
        if !t.is_finite() || t <= 0.0 || t > MAX_THRESHOLD_MILES {
            return Err(GraphError::InvalidThreshold(t));
        }
        if self.sample_size == 0 || self.sample_size > MAX_SAMPLE_SIZE {
            return Err(GraphError::InvalidSampleSize(self.sample_size));
        }
        Ok(())
    }
}
