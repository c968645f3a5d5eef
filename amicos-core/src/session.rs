//! Live input session
//!
//! Owns the current input snapshot on behalf of a single writer and runs
//! the evaluator once per committed change. Nothing is memoised: every
//! commit, including one that repeats the previous snapshot, re-evaluates
//! from scratch. Batching several field edits into one evaluation is done
//! by sending them together in one [`InputsPatch`].

use crate::model::{CorneringInputs, Evaluation};
use crate::units::*;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A partial update to a [`CorneringInputs`] snapshot
///
/// Absent fields keep their current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputsPatch {
    pub vehicle: VehiclePatch,
    pub track: TrackPatch,
    pub telemetry: TelemetryPatch,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehiclePatch {
    pub mass: Option<Kilograms>,
    pub power: Option<Horsepower>,
    pub tire_temperature: Option<Celsius>,
    pub tire_pressure: Option<Psi>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackPatch {
    pub corner_radius: Option<Meters>,
    pub grip_coefficient: Option<f64>,
    pub elevation_change: Option<Degrees>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryPatch {
    pub entry_speed: Option<KilometersPerHour>,
    pub brake_force: Option<Percent>,
    pub steering_angle: Option<Degrees>,
    pub throttle: Option<Percent>,
}

fn set<T>(slot: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *slot = v;
    }
}

impl InputsPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Return `base` with this patch's fields applied
    pub fn apply_to(&self, base: CorneringInputs) -> CorneringInputs {
        let mut next = base;

        let v = &self.vehicle;
        set(&mut next.vehicle.mass, v.mass);
        set(&mut next.vehicle.power, v.power);
        set(&mut next.vehicle.tire_temperature, v.tire_temperature);
        set(&mut next.vehicle.tire_pressure, v.tire_pressure);

        let t = &self.track;
        set(&mut next.track.corner_radius, t.corner_radius);
        set(&mut next.track.grip_coefficient, t.grip_coefficient);
        set(&mut next.track.elevation_change, t.elevation_change);

        let tel = &self.telemetry;
        set(&mut next.telemetry.entry_speed, tel.entry_speed);
        set(&mut next.telemetry.brake_force, tel.brake_force);
        set(&mut next.telemetry.steering_angle, tel.steering_angle);
        set(&mut next.telemetry.throttle, tel.throttle);

        next
    }
}

/// Single-writer holder of the live inputs
#[derive(Debug, Clone, Default)]
pub struct CorneringSession {
    inputs: CorneringInputs,
    revision: u64,
}

impl CorneringSession {
    pub fn new(inputs: CorneringInputs) -> Self {
        Self {
            inputs,
            revision: 0,
        }
    }

    pub fn inputs(&self) -> &CorneringInputs {
        &self.inputs
    }

    /// Number of commits so far
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replace the whole snapshot and evaluate it
    pub fn commit(&mut self, inputs: CorneringInputs) -> Evaluation {
        self.inputs = inputs;
        self.revision += 1;
        self.evaluate_current()
    }

    /// Apply a batch of field changes and evaluate once for the batch
    pub fn apply(&mut self, patch: &InputsPatch) -> Evaluation {
        let next = patch.apply_to(self.inputs);
        self.commit(next)
    }

    /// Evaluate the current snapshot without committing anything
    pub fn evaluate_current(&self) -> Evaluation {
        Evaluation {
            revision: self.revision,
            timestamp: Utc::now(),
            inputs: self.inputs,
            outputs: self.inputs.evaluate(),
        }
    }
}
