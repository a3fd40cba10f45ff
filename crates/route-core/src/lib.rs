//! Shared types and primitives for fixed-endpoint route optimization.
//!
//! A route starts at an origin, visits every intermediate stop exactly once and
//! ends at a destination. Solvers live in their own crates and plug in through
//! [`RouteStrategy`] and [`StrategyRegistry`].

#![deny(clippy::all)]

pub mod config;
pub mod control;
pub mod distance;
pub mod error;
pub mod instance;
pub mod models;
pub mod strategy;

pub use config::SolverConfig;
pub use control::{CancelHandle, SearchControl};
pub use distance::{euclidean, route_distance, route_distance_with, Euclidean, FnMetric, Metric};
pub use error::{Error, Result};
pub use instance::Instance;
pub use models::{Point, Route, SearchResult, StopRole};
pub use strategy::{RouteStrategy, StrategyRegistry};
