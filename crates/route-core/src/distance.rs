use std::fmt;

use crate::models::Point;

/// Edge cost between two points.
pub trait Metric: Send + Sync {
    fn distance(&self, a: Point, b: Point) -> f64;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Euclidean;

impl Metric for Euclidean {
    #[inline(always)]
    fn distance(&self, a: Point, b: Point) -> f64 {
        euclidean(a, b)
    }
}

/// Adapts a closure into a [`Metric`].
#[derive(Clone, Copy)]
pub struct FnMetric<F>(pub F);

impl<F> Metric for FnMetric<F>
where
    F: Fn(Point, Point) -> f64 + Send + Sync,
{
    #[inline(always)]
    fn distance(&self, a: Point, b: Point) -> f64 {
        (self.0)(a, b)
    }
}

impl<F> fmt::Debug for FnMetric<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnMetric")
    }
}

#[inline(always)]
pub fn euclidean(a: Point, b: Point) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

/// Sum of consecutive edge lengths, accumulated from the first point onward.
/// Routes shorter than two points have length zero.
pub fn route_distance(route: &[Point]) -> f64 {
    route_distance_with(&Euclidean, route)
}

pub fn route_distance_with<M: Metric + ?Sized>(metric: &M, route: &[Point]) -> f64 {
    route
        .windows(2)
        .fold(0.0, |acc, pair| acc + metric.distance(pair[0], pair[1]))
}
