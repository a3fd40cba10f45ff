use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Largest stop count whose permutation count still fits in a `u64`.
pub const MAX_ENUMERABLE_STOPS: usize = 20;

pub const DEFAULT_MAX_STOPS: usize = 11;
/// 7!; below this a single thread finishes before workers would spin up.
pub const DEFAULT_PARALLEL_THRESHOLD: u64 = 5_040;

/// Solver tuning. Every field falls back to its default when absent from JSON.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Refuse instances with more stops than this.
    pub max_stops: usize,
    /// Worker threads. `0` means one per available core.
    pub workers: usize,
    /// Minimum permutation count before the search is split across workers.
    pub parallel_threshold: u64,
    /// Wall-clock budget per solve, in milliseconds.
    pub time_limit_ms: Option<u64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_stops: DEFAULT_MAX_STOPS,
            workers: 1,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            time_limit_ms: None,
        }
    }
}

impl SolverConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_stops > MAX_ENUMERABLE_STOPS {
            return Err(Error::invalid_config(format!(
                "max_stops={} exceeds the enumerable ceiling of {MAX_ENUMERABLE_STOPS}",
                self.max_stops
            )));
        }
        if self.time_limit_ms == Some(0) {
            return Err(Error::invalid_config("time_limit_ms must be greater than zero"));
        }
        Ok(())
    }

    pub fn with_max_stops(mut self, max_stops: usize) -> Self {
        self.max_stops = max_stops;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_parallel_threshold(mut self, parallel_threshold: u64) -> Self {
        self.parallel_threshold = parallel_threshold;
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit_ms = Some(limit.as_millis().min(u64::MAX as u128) as u64);
        self
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_ms.map(Duration::from_millis)
    }

    /// Worker count with `0` resolved against the machine.
    pub fn resolved_workers(&self) -> usize {
        match self.workers {
            0 => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            n => n,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{SolverConfig, DEFAULT_MAX_STOPS};
    use crate::Error;

    #[test]
    fn missing_fields_take_defaults() {
        let config = SolverConfig::from_json_str(r#"{ "workers": 4 }"#).unwrap();
        assert_eq!(config.workers, 4);
        assert_eq!(config.max_stops, DEFAULT_MAX_STOPS);
        assert_eq!(config.time_limit(), None);
    }

    #[test]
    fn oversized_max_stops_is_rejected() {
        let err = SolverConfig::from_json_str(r#"{ "max_stops": 21 }"#).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn zero_time_limit_is_rejected() {
        let err = SolverConfig::default()
            .with_time_limit(Duration::ZERO)
            .validate()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn malformed_json_surfaces_as_json_error() {
        let err = SolverConfig::from_json_str("{ workers: ").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn zero_workers_resolve_to_at_least_one() {
        assert!(SolverConfig::default().with_workers(0).resolved_workers() >= 1);
        assert_eq!(SolverConfig::default().with_workers(3).resolved_workers(), 3);
    }
}
