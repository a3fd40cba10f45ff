use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use route_brute_force::{register_defaults, BruteForce, NAME, PARALLEL_NAME};
use route_core::{
    route_distance, Error, Instance, Point, Result, Route, RouteStrategy, SearchResult,
    SolverConfig, StrategyRegistry,
};
use route_validation::{check_instance, random_instance};

/// Visits the stops in input order.
struct InputOrder;

impl RouteStrategy for InputOrder {
    fn name(&self) -> &str {
        "input_order"
    }

    fn solve(&self, origin: Point, destination: Point, stops: &[Point]) -> Result<SearchResult> {
        let route = Route::new(origin, stops.iter().copied(), destination);
        let distance = route_distance(route.as_slice());
        Ok(SearchResult {
            route,
            distance,
            evaluated: 1,
        })
    }
}

/// Finds the optimal route but reports a longer distance for it.
struct MisreportedDistance(BruteForce);

impl RouteStrategy for MisreportedDistance {
    fn name(&self) -> &str {
        "misreported_distance"
    }

    fn solve(&self, origin: Point, destination: Point, stops: &[Point]) -> Result<SearchResult> {
        let mut result = self.0.solve(origin, destination, stops)?;
        result.distance += 1.0;
        Ok(result)
    }
}

fn registry() -> StrategyRegistry {
    let mut registry = StrategyRegistry::new();
    let config = SolverConfig::default().with_workers(3).with_parallel_threshold(1);
    register_defaults(&mut registry, &config);
    registry
}

#[test]
fn every_row_passes_on_random_instances() {
    let registry = registry();
    let strategies = vec![NAME.to_string(), PARALLEL_NAME.to_string()];
    for seed in 0..12u64 {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        let instance = random_instance(&mut rng, (seed % 8) as usize, 50.0);
        let rows = check_instance(seed, &instance, &registry, &strategies).unwrap();
        assert_eq!(rows.len(), 2);
        for row in rows {
            assert!(row.passed(), "{row:?}");
            assert_eq!(row.stops, instance.stops.len());
        }
    }
}

#[test]
fn unknown_strategy_aborts_the_check() {
    let registry = registry();
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
    let instance = random_instance(&mut rng, 3, 10.0);
    let err = check_instance(1, &instance, &registry, &["simulated_annealing".to_string()])
        .unwrap_err();
    assert!(matches!(err, Error::UnknownStrategy(_)));
}

#[test]
fn wrong_strategies_are_flagged() {
    let mut registry = registry();
    registry.register(Box::new(InputOrder));
    registry.register(Box::new(MisreportedDistance(BruteForce::default())));

    let instance = Instance::new(
        Point::new(0.0, 0.0),
        Point::new(4.0, 4.0),
        vec![
            Point::new(2.0, 2.0),
            Point::new(2.0, 1.0),
            Point::new(5.0, 3.0),
            Point::new(8.0, 3.0),
        ],
    );
    let strategies = [NAME, "input_order", "misreported_distance"].map(String::from);
    let rows = check_instance(7, &instance, &registry, &strategies).unwrap();
    assert_eq!(rows.len(), 3);

    assert!(rows[0].passed(), "{:?}", rows[0]);

    let input_order = &rows[1];
    assert!(input_order.consistent);
    assert!(!input_order.agrees);
    assert!(!input_order.passed());

    let misreported = &rows[2];
    assert!(!misreported.consistent);
    assert!(!misreported.passed());
}
