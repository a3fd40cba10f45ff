use serde::{Deserialize, Serialize};

use crate::models::Point;
use crate::{Error, Result};

/// One routing problem as supplied by a caller or a fixture file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    pub origin: Point,
    pub destination: Point,
    #[serde(default)]
    pub stops: Vec<Point>,
}

impl Instance {
    pub fn new(origin: Point, destination: Point, stops: Vec<Point>) -> Self {
        Self {
            origin,
            destination,
            stops,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let instance: Self = serde_json::from_str(json)?;
        instance.validate()?;
        Ok(instance)
    }

    /// Rejects non-finite coordinates, naming the first offending point.
    pub fn validate(&self) -> Result<()> {
        validate_points(self.origin, self.destination, &self.stops)
    }
}

pub fn validate_points(origin: Point, destination: Point, stops: &[Point]) -> Result<()> {
    if !origin.is_finite() {
        return Err(Error::invalid_input(format!("origin {origin} is not finite")));
    }
    if !destination.is_finite() {
        return Err(Error::invalid_input(format!(
            "destination {destination} is not finite"
        )));
    }
    if let Some((idx, p)) = stops.iter().enumerate().find(|(_, p)| !p.is_finite()) {
        return Err(Error::invalid_input(format!("stop {idx} {p} is not finite")));
    }
    Ok(())
}
