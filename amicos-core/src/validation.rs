//! Input domain checks
//!
//! The evaluator itself accepts anything. Callers that drive it from
//! free-form input (an API, a config file) use these ranges to keep
//! snapshots inside the domain where every output is finite.

use crate::model::CorneringInputs;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Inclusive bounds for one input
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Accepted range for every field of a [`CorneringInputs`] snapshot
///
/// Defaults are the dashboard control ranges for the GR86 Cup car.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputRanges {
    pub mass: Range,
    pub power: Range,
    pub tire_temperature: Range,
    pub tire_pressure: Range,
    pub corner_radius: Range,
    pub grip_coefficient: Range,
    pub elevation_change: Range,
    pub entry_speed: Range,
    pub brake_force: Range,
    pub steering_angle: Range,
    pub throttle: Range,
}

impl Default for InputRanges {
    fn default() -> Self {
        Self {
            mass: Range::new(1200.0, 1350.0),
            power: Range::new(200.0, 250.0),
            tire_temperature: Range::new(60.0, 110.0),
            tire_pressure: Range::new(28.0, 36.0),
            corner_radius: Range::new(20.0, 200.0),
            grip_coefficient: Range::new(0.7, 1.3),
            elevation_change: Range::new(-10.0, 10.0),
            entry_speed: Range::new(50.0, 200.0),
            brake_force: Range::new(0.0, 100.0),
            steering_angle: Range::new(0.0, 90.0),
            throttle: Range::new(0.0, 100.0),
        }
    }
}

/// A single offending input
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },

    #[error("{field} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

impl FieldError {
    pub fn field(&self) -> &'static str {
        match self {
            FieldError::NonFinite { field } | FieldError::OutOfRange { field, .. } => field,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("invalid inputs: {}", FieldList(.0))]
    Invalid(Vec<FieldError>),
}

impl ValidationError {
    pub fn errors(&self) -> &[FieldError] {
        match self {
            ValidationError::Invalid(errors) => errors,
        }
    }
}

struct FieldList<'a>(&'a [FieldError]);

impl fmt::Display for FieldList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", err)?;
        }
        Ok(())
    }
}

impl CorneringInputs {
    /// Check every field against `ranges`, reporting all violations at once
    pub fn validate(&self, ranges: &InputRanges) -> Result<(), ValidationError> {
        let v = &self.vehicle;
        let t = &self.track;
        let tel = &self.telemetry;

        let checks = [
            ("mass", v.mass.0, ranges.mass),
            ("power", v.power.0, ranges.power),
            ("tire_temperature", v.tire_temperature.0, ranges.tire_temperature),
            ("tire_pressure", v.tire_pressure.0, ranges.tire_pressure),
            ("corner_radius", t.corner_radius.0, ranges.corner_radius),
            ("grip_coefficient", t.grip_coefficient, ranges.grip_coefficient),
            ("elevation_change", t.elevation_change.0, ranges.elevation_change),
            ("entry_speed", tel.entry_speed.0, ranges.entry_speed),
            ("brake_force", tel.brake_force.0, ranges.brake_force),
            ("steering_angle", tel.steering_angle.0, ranges.steering_angle),
            ("throttle", tel.throttle.0, ranges.throttle),
        ];

        let errors: Vec<FieldError> = checks
            .into_iter()
            .filter_map(|(field, value, range)| check(field, value, range))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::Invalid(errors))
        }
    }
}

fn check(field: &'static str, value: f64, range: Range) -> Option<FieldError> {
    if !value.is_finite() {
        Some(FieldError::NonFinite { field })
    } else if !range.contains(value) {
        Some(FieldError::OutOfRange {
            field,
            value,
            min: range.min,
            max: range.max,
        })
    } else {
        None
    }
}
