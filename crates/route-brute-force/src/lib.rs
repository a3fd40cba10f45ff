//! Exact brute-force route solver.
//!
//! Every ordering of the stops is scored in lexicographic order of their input
//! positions, and the first strictly shortest one wins. With more than one
//! worker the rank space is split into contiguous ranges and the local winners
//! are reduced by `(distance, rank)`, so the answer never depends on the
//! thread count.

#![deny(clippy::all)]

pub mod context;
pub mod permutation;
mod search;
pub mod types;

use route_core::instance::validate_points;
use route_core::{
    Error, Euclidean, Metric, Point, Result, Route, RouteStrategy, SearchControl, SearchResult,
    SolverConfig, StrategyRegistry,
};

use context::SearchContext;
use permutation::factorial;

pub const NAME: &str = "brute_force";
pub const PARALLEL_NAME: &str = "brute_force_parallel";

#[derive(Clone, Debug)]
pub struct BruteForce<M = Euclidean> {
    name: String,
    config: SolverConfig,
    control: SearchControl,
    metric: M,
}

impl BruteForce<Euclidean> {
    pub fn new(config: SolverConfig) -> Self {
        Self {
            name: NAME.to_string(),
            config,
            control: SearchControl::new(),
            metric: Euclidean,
        }
    }

    /// Splits work across one thread per core once the search is big enough.
    pub fn parallel(config: SolverConfig) -> Self {
        let config = if config.workers == 1 {
            config.with_workers(0)
        } else {
            config
        };
        Self::new(config).named(PARALLEL_NAME)
    }
}

impl Default for BruteForce<Euclidean> {
    fn default() -> Self {
        Self::new(SolverConfig::default())
    }
}

impl<M: Metric> BruteForce<M> {
    pub fn with_metric<N: Metric>(self, metric: N) -> BruteForce<N> {
        BruteForce {
            name: self.name,
            config: self.config,
            control: self.control,
            metric,
        }
    }

    pub fn with_control(mut self, control: SearchControl) -> Self {
        self.control = control;
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn control(&self) -> &SearchControl {
        &self.control
    }

    pub fn solve(&self, origin: Point, destination: Point, stops: &[Point]) -> Result<SearchResult> {
        self.config.validate()?;
        validate_points(origin, destination, stops)?;

        let n = stops.len();
        if n > self.config.max_stops {
            return Err(Error::CapacityExceeded {
                stops: n,
                limit: self.config.max_stops,
            });
        }

        let ctx = SearchContext::new(&self.metric, origin, destination, stops)?;
        if n == 0 {
            return Ok(SearchResult {
                route: Route::from_order(origin, stops, &[], destination),
                distance: ctx.score(&[]),
                evaluated: 1,
            });
        }

        let total = factorial(n).ok_or(Error::CapacityExceeded {
            stops: n,
            limit: self.config.max_stops,
        })?;
        let control = match self.config.time_limit() {
            Some(limit) => self.control.clone().with_time_limit(limit),
            None => self.control.clone(),
        };

        let workers = self.config.resolved_workers();
        let use_parallel = workers > 1 && total >= self.config.parallel_threshold;
        log::debug!(
            "{}: n={n} permutations={total} workers={}",
            self.name,
            if use_parallel { workers } else { 1 }
        );

        let best = if use_parallel {
            search::scan_parallel(&ctx, &control, total, workers)?
        } else {
            search::scan_range(&ctx, &control, 0, total)?
        };
        // A non-empty rank range always yields a candidate
        let best = best.ok_or(Error::Cancelled)?;

        log::debug!(
            "{}: best rank={} dist={}",
            self.name,
            best.rank,
            best.distance
        );

        Ok(SearchResult {
            route: Route::from_order(origin, stops, &best.order, destination),
            distance: best.distance,
            evaluated: total,
        })
    }
}

impl<M: Metric> RouteStrategy for BruteForce<M> {
    fn name(&self) -> &str {
        &self.name
    }

    fn solve(&self, origin: Point, destination: Point, stops: &[Point]) -> Result<SearchResult> {
        BruteForce::solve(self, origin, destination, stops)
    }
}

/// Installs [`NAME`] (single-threaded) and [`PARALLEL_NAME`].
pub fn register_defaults(registry: &mut StrategyRegistry, config: &SolverConfig) {
    registry.register(Box::new(BruteForce::new(config.clone().with_workers(1))));
    registry.register(Box::new(BruteForce::parallel(config.clone())));
}

/// Free-function form with the default configuration.
pub fn solve(origin: Point, destination: Point, stops: &[Point]) -> Result<SearchResult> {
    BruteForce::default().solve(origin, destination, stops)
}
