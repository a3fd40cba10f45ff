//! Empirical validation for the route solvers: seeded random instances, every
//! registered strategy run on each, and one CSV row per (instance, strategy).

#![deny(clippy::all)]

pub mod logging;

use std::time::Instant;

use rand::Rng;
use route_brute_force::permutation::next_permutation;
use route_core::{
    route_distance, Error, Instance, Point, Result, SearchResult,
    StrategyRegistry,
};

/// Instances up to this size are re-checked against an independent scan.
pub const EXHAUSTIVE_RECHECK_MAX: usize = 7;

/// Rejects sweep parameters [`random_instance`] cannot sample from.
pub fn check_sweep_bounds(min_stops: usize, max_stops: usize, extent: f64) -> Result<()> {
    if !extent.is_finite() || extent < 0.0 {
        return Err(Error::invalid_input(format!(
            "extent must be finite and non-negative, got {extent}"
        )));
    }
    if min_stops > max_stops {
        return Err(Error::invalid_input(format!(
            "min stops {min_stops} is greater than max stops {max_stops}"
        )));
    }
    Ok(())
}

/// Uniform instance in `[-extent, extent]²`. `extent` must pass
/// [`check_sweep_bounds`].
pub fn random_instance<R: Rng>(rng: &mut R, stops: usize, extent: f64) -> Instance {
    let mut point = || Point::new(rng.gen_range(-extent..=extent), rng.gen_range(-extent..=extent));
    let origin = point();
    let destination = point();
    let stops = (0..stops).map(|_| point()).collect();
    Instance::new(origin, destination, stops)
}

#[derive(Clone, Debug, PartialEq)]
pub struct SweepRow {
    pub seed: u64,
    pub stops: usize,
    pub strategy: String,
    pub distance: f64,
    pub evaluated: u64,
    pub elapsed_ms: f64,
    /// Reported distance equals the recomputed route length.
    pub consistent: bool,
    /// Same route and distance as the reference strategy, and no worse than
    /// the independent re-check when one ran.
    pub agrees: bool,
}

impl SweepRow {
    pub const CSV_HEADER: &'static str =
        "seed,stops,strategy,distance,evaluated,elapsed_ms,consistent,agrees";

    pub fn passed(&self) -> bool {
        self.consistent && self.agrees
    }

    pub fn to_csv(&self) -> String {
        format!(
            "{},{},{},{:.6},{},{:.3},{},{}",
            self.seed,
            self.stops,
            self.strategy,
            self.distance,
            self.evaluated,
            self.elapsed_ms,
            self.consistent,
            self.agrees
        )
    }
}

/// Smallest route length over every ordering of the stops, walked with the
/// plain permutation successor and no precomputed matrix.
pub fn reference_optimum(instance: &Instance) -> f64 {
    let mut order: Vec<usize> = (0..instance.stops.len()).collect();
    let mut route = Vec::with_capacity(order.len() + 2);
    let mut best = f64::INFINITY;
    loop {
        route.clear();
        route.push(instance.origin);
        route.extend(order.iter().map(|&i| instance.stops[i]));
        route.push(instance.destination);
        best = best.min(route_distance(&route));
        if !next_permutation(&mut order) {
            return best;
        }
    }
}

/// Runs every strategy in `strategies` on `instance`. The first strategy is
/// the reference the others must match.
pub fn check_instance(
    seed: u64,
    instance: &Instance,
    registry: &StrategyRegistry,
    strategies: &[String],
) -> Result<Vec<SweepRow>> {
    let optimum = (instance.stops.len() <= EXHAUSTIVE_RECHECK_MAX).then(|| reference_optimum(instance));

    let mut reference: Option<SearchResult> = None;
    let mut rows = Vec::with_capacity(strategies.len());
    for name in strategies {
        let strategy = registry.get(name)?;
        let started = Instant::now();
        let result = strategy.solve_instance(instance)?;
        let elapsed_ms = started.elapsed().as_secs_f64() * 1e3;

        let consistent = result.distance == route_distance(result.route.as_slice());
        let matches_reference = reference.as_ref().is_none_or(|r| {
            r.route == result.route && r.distance.to_bits() == result.distance.to_bits()
        });
        let optimal = optimum.is_none_or(|best| result.distance <= best);
        let row = SweepRow {
            seed,
            stops: instance.stops.len(),
            strategy: name.clone(),
            distance: result.distance,
            evaluated: result.evaluated,
            elapsed_ms,
            consistent,
            agrees: matches_reference && optimal,
        };

        if row.passed() {
            log::debug!("sweep: seed={seed} strategy={name} dist={} ok", result.distance);
        } else {
            log::warn!(
                "sweep: seed={seed} strategy={name} consistent={consistent} agrees={}",
                row.agrees
            );
        }

        rows.push(row);
        if reference.is_none() {
            reference = Some(result);
        }
    }
    Ok(rows)
}
