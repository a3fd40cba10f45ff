use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};

/// Planar coordinate pair. Serialized as `[x, y]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<Point> for (f64, f64) {
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopRole {
    Origin,
    Stop,
    Destination,
}

/// Ordered visit sequence: origin, every stop once, destination.
///
/// Only solvers build routes, so the first and last entries are always the
/// endpoints the solve was called with.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Route(Vec<Point>);

impl Route {
    pub fn new(origin: Point, stops: impl IntoIterator<Item = Point>, destination: Point) -> Self {
        let stops = stops.into_iter();
        let mut points = Vec::with_capacity(stops.size_hint().0 + 2);
        points.push(origin);
        points.extend(stops);
        points.push(destination);
        Self(points)
    }

    /// Builds the route for `order`, a list of indices into `stops`.
    pub fn from_order(origin: Point, stops: &[Point], order: &[usize], destination: Point) -> Self {
        Self::new(origin, order.iter().map(|&i| stops[i]), destination)
    }

    pub fn origin(&self) -> Point {
        self.0[0]
    }

    pub fn destination(&self) -> Point {
        self.0[self.0.len() - 1]
    }

    pub fn stops(&self) -> &[Point] {
        &self.0[1..self.0.len() - 1]
    }

    pub fn as_slice(&self) -> &[Point] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.0.iter()
    }

    /// Same points in reverse order. Origin and destination swap places.
    pub fn reversed(&self) -> Self {
        Self(self.0.iter().rev().copied().collect())
    }

    /// Each point tagged with its role, for styling by a renderer.
    pub fn roles(&self) -> impl Iterator<Item = (StopRole, Point)> + '_ {
        let last = self.0.len() - 1;
        self.0.iter().enumerate().map(move |(i, &p)| {
            let role = if i == 0 {
                StopRole::Origin
            } else if i == last {
                StopRole::Destination
            } else {
                StopRole::Stop
            };
            (role, p)
        })
    }

    pub fn into_points(self) -> Vec<Point> {
        self.0
    }
}

impl Index<usize> for Route {
    type Output = Point;

    fn index(&self, index: usize) -> &Point {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a Route {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, p) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{p}")?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SearchResult {
    pub route: Route,
    pub distance: f64,
    /// Number of candidate routes scored.
    pub evaluated: u64,
}

impl SearchResult {
    /// Distance rounded to two decimals, for labels.
    pub fn display_distance(&self) -> f64 {
        (self.distance * 100.0).round() / 100.0
    }
}

impl fmt::Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (distance {:.2})", self.route, self.distance)
    }
}
