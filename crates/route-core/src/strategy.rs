use std::collections::BTreeMap;

use crate::models::{Point, SearchResult};
use crate::{Error, Instance, Result};

/// A way of producing the shortest origin-to-destination route through all
/// stops. Implementations are interchangeable behind [`StrategyRegistry`].
pub trait RouteStrategy: Send + Sync {
    /// Registry key, e.g. `"brute_force"`.
    fn name(&self) -> &str;

    fn solve(&self, origin: Point, destination: Point, stops: &[Point]) -> Result<SearchResult>;

    fn solve_instance(&self, instance: &Instance) -> Result<SearchResult> {
        self.solve(instance.origin, instance.destination, &instance.stops)
    }
}

/// Maps external identifiers to strategies.
#[derive(Default)]
pub struct StrategyRegistry {
    strategies: BTreeMap<String, Box<dyn RouteStrategy>>,
}

impl StrategyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers under `strategy.name()`, replacing any previous entry.
    pub fn register(&mut self, strategy: Box<dyn RouteStrategy>) -> Option<Box<dyn RouteStrategy>> {
        let name = strategy.name().to_string();
        log::debug!("registry: register strategy={name}");
        self.strategies.insert(name, strategy)
    }

    pub fn get(&self, name: &str) -> Result<&dyn RouteStrategy> {
        self.strategies
            .get(name)
            .map(|s| s.as_ref())
            .ok_or_else(|| Error::UnknownStrategy(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.strategies.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.strategies.keys().map(String::as_str)
    }

    pub fn solve(
        &self,
        name: &str,
        origin: Point,
        destination: Point,
        stops: &[Point],
    ) -> Result<SearchResult> {
        self.get(name)?.solve(origin, destination, stops)
    }
}

impl std::fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{RouteStrategy, StrategyRegistry};
    use crate::models::{Point, Route, SearchResult};
    use crate::{route_distance, Error, Result};

    /// Visits stops in input order.
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

    #[test]
    fn lookup_by_name() {
        let mut registry = StrategyRegistry::new();
        assert!(registry.register(Box::new(InputOrder)).is_none());
        assert!(registry.contains("input_order"));

        let result = registry
            .solve("input_order", Point::new(0.0, 0.0), Point::new(0.0, 2.0), &[Point::new(0.0, 1.0)])
            .unwrap();
        assert_eq!(result.distance, 2.0);
    }

    #[test]
    fn unknown_name_is_an_error() {
        let registry = StrategyRegistry::new();
        match registry.get("nearest_neighbor") {
            Err(Error::UnknownStrategy(name)) => assert_eq!(name, "nearest_neighbor"),
            _ => panic!("expected unknown strategy"),
        }
    }

    #[test]
    fn re_registering_replaces() {
        let mut registry = StrategyRegistry::new();
        registry.register(Box::new(InputOrder));
        assert!(registry.register(Box::new(InputOrder)).is_some());
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["input_order"]);
    }
}
