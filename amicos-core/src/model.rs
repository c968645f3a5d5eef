//! Cornering data model
//!
//! Defines the three input groups a dashboard supplies to the engine
//! (vehicle setup, track corner, live telemetry), the committed snapshot
//! that bundles them, and the derived `PhysicsOutputs` record.
//!
//! Defaults describe the Toyota GR86 Cup car on a 50 m corner with
//! Michelin Cup 2 tyres at their optimal operating point.

use crate::classifier::Recommendation;
use crate::units::*;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;

/// Static vehicle setup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleParameters {
    /// Vehicle mass including driver
    pub mass: Kilograms,

    /// Engine power. Carried for display; no formula consumes it.
    pub power: Horsepower,

    /// Tyre surface temperature
    pub tire_temperature: Celsius,

    /// Tyre pressure (hot)
    pub tire_pressure: Psi,
}

impl Default for VehicleParameters {
    fn default() -> Self {
        Self {
            mass: Kilograms(1270.0),
            power: Horsepower(228.0),
            tire_temperature: Celsius(85.0),
            tire_pressure: Psi(32.0),
        }
    }
}

/// The corner being evaluated
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackParameters {
    pub corner_radius: Meters,

    /// Surface friction coefficient μ (dimensionless)
    pub grip_coefficient: f64,

    /// Elevation change through the corner. Carried for display; no formula consumes it.
    pub elevation_change: Degrees,
}

impl Default for TrackParameters {
    fn default() -> Self {
        Self {
            corner_radius: Meters(50.0),
            grip_coefficient: 1.1,
            elevation_change: Degrees(0.0),
        }
    }
}

/// Instantaneous driving state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TelemetryInputs {
    pub entry_speed: KilometersPerHour,

    /// Brake pedal (0-100)
    pub brake_force: Percent,

    /// Steering angle (0 = straight, 90 = full quarter-turn)
    pub steering_angle: Degrees,

    /// Throttle pedal (0-100)
    pub throttle: Percent,
}

impl Default for TelemetryInputs {
    fn default() -> Self {
        Self {
            entry_speed: KilometersPerHour(120.0),
            brake_force: Percent(80.0),
            steering_angle: Degrees(45.0),
            throttle: Percent(60.0),
        }
    }
}

/// A committed snapshot of every engine input
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CorneringInputs {
    pub vehicle: VehicleParameters,
    pub track: TrackParameters,
    pub telemetry: TelemetryInputs,
}

impl CorneringInputs {
    pub fn new(
        vehicle: VehicleParameters,
        track: TrackParameters,
        telemetry: TelemetryInputs,
    ) -> Self {
        Self {
            vehicle,
            track,
            telemetry,
        }
    }

    /// Run the physics evaluator over this snapshot
    pub fn evaluate(&self) -> PhysicsOutputs {
        crate::physics::evaluate(&self.vehicle, &self.track, &self.telemetry)
    }
}

/// Everything the evaluator derives from one input snapshot
///
/// Values are never clamped or sanitised. A configuration outside the
/// physical domain (zero radius, non-positive effective grip) shows up
/// here as NaN or infinity; see [`PhysicsOutputs::non_finite_fields`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicsOutputs {
    /// Theoretical limit speed for the corner: sqrt(μ_eff · g · R)
    pub max_cornering_speed: KilometersPerHour,

    pub lateral_g: GForce,
    pub braking_g: GForce,

    /// Distance from the origin of the traction circle
    pub combined_g: GForce,

    pub yaw_rate: RadiansPerSecond,
    pub angular_momentum: KilogramMetersSquaredPerSecond,

    /// Left/right vertical load shifted by lateral acceleration
    pub lateral_load_transfer: Newtons,

    /// Predicted apex speed, capped at `max_cornering_speed`
    pub apex_speed: KilometersPerHour,
    pub exit_speed: KilometersPerHour,
    pub time_to_apex: Seconds,

    /// Demanded combined G over available grip. Exceeds 100 when over the limit.
    pub grip_utilization: Percent,

    /// max(0, 100 - grip_utilization)
    pub safety_margin: Percent,

    /// Track μ after tyre temperature and pressure attenuation
    #[serde(deserialize_with = "crate::units::nan_if_null")]
    pub effective_grip: f64,

    pub recommendation: Recommendation,
}

impl PhysicsOutputs {
    /// Names of the numeric outputs that are NaN or infinite
    pub fn non_finite_fields(&self) -> Vec<&'static str> {
        self.numeric_fields()
            .into_iter()
            .filter(|(_, v)| !v.is_finite())
            .map(|(name, _)| name)
            .collect()
    }

    /// True when every numeric output is finite
    pub fn is_finite(&self) -> bool {
        self.numeric_fields().iter().all(|(_, v)| v.is_finite())
    }

    fn numeric_fields(&self) -> [(&'static str, f64); 13] {
        [
            ("max_cornering_speed", self.max_cornering_speed.0),
            ("lateral_g", self.lateral_g.0),
            ("braking_g", self.braking_g.0),
            ("combined_g", self.combined_g.0),
            ("yaw_rate", self.yaw_rate.0),
            ("angular_momentum", self.angular_momentum.0),
            ("lateral_load_transfer", self.lateral_load_transfer.0),
            ("apex_speed", self.apex_speed.0),
            ("exit_speed", self.exit_speed.0),
            ("time_to_apex", self.time_to_apex.0),
            ("grip_utilization", self.grip_utilization.0),
            ("safety_margin", self.safety_margin.0),
            ("effective_grip", self.effective_grip),
        ]
    }
}

/// One evaluation pass: the committed inputs and what they produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    /// Commit counter of the session that produced this evaluation
    pub revision: u64,

    /// When the evaluation ran
    pub timestamp: DateTime<Utc>,

    pub inputs: CorneringInputs,
    pub outputs: PhysicsOutputs,
}

// === Field Masking for Selective Output ===

/// Specifies which output fields to include in serialized evaluations
///
/// Dashboards that only render a gauge or two subscribe with a mask to
/// keep the stream small.
#[derive(Debug, Clone, Default)]
pub struct FieldMask {
    fields: HashSet<String>,
    include_all: bool,
}

impl FieldMask {
    /// Create a mask that includes all fields
    pub fn all() -> Self {
        Self {
            fields: HashSet::new(),
            include_all: true,
        }
    }

    /// Create a mask from a comma-separated list of field names
    pub fn parse(fields: &str) -> Self {
        let fields: HashSet<String> = fields
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        Self {
            fields,
            include_all: false,
        }
    }

    /// Create a builder for constructing masks
    pub fn builder() -> FieldMaskBuilder {
        FieldMaskBuilder::default()
    }

    /// Check if a field should be included
    pub fn includes(&self, field: &str) -> bool {
        self.include_all || self.fields.contains(&field.to_lowercase())
    }

    /// Check if all fields should be included
    pub fn is_all(&self) -> bool {
        self.include_all
    }
}

impl FromStr for FieldMask {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

/// Builder for FieldMask
#[derive(Debug, Default)]
pub struct FieldMaskBuilder {
    fields: HashSet<String>,
}

impl FieldMaskBuilder {
    pub fn with_field(mut self, field: &str) -> Self {
        self.fields.insert(field.to_lowercase());
        self
    }

    pub fn inputs(self) -> Self {
        self.with_field("inputs")
    }

    pub fn lateral_g(self) -> Self {
        self.with_field("lateral_g")
    }

    pub fn grip_utilization(self) -> Self {
        self.with_field("grip_utilization")
    }

    pub fn build(self) -> FieldMask {
        FieldMask {
            fields: self.fields,
            include_all: false,
        }
    }
}

impl Evaluation {
    /// Serialize this evaluation respecting the given field mask
    ///
    /// If mask is None or includes all fields, serialize everything.
    /// Otherwise `revision`, `timestamp` and `outputs.recommendation` are
    /// always present, `inputs` only when requested, and the other output
    /// fields only when named.
    pub fn to_json_filtered(&self, mask: Option<&FieldMask>) -> serde_json::Result<String> {
        let mask = match mask {
            Some(m) if !m.is_all() => m,
            _ => return serde_json::to_string(self),
        };

        let mut map = serde_json::Map::new();
        map.insert("revision".to_string(), serde_json::to_value(self.revision)?);
        map.insert(
            "timestamp".to_string(),
            serde_json::to_value(self.timestamp)?,
        );

        if mask.includes("inputs") {
            map.insert("inputs".to_string(), serde_json::to_value(self.inputs)?);
        }

        let mut outputs = match serde_json::to_value(&self.outputs)? {
            serde_json::Value::Object(fields) => fields,
            _ => serde_json::Map::new(),
        };
        outputs.retain(|name, _| name == "recommendation" || mask.includes(name));
        map.insert("outputs".to_string(), serde_json::Value::Object(outputs));

        serde_json::to_string(&serde_json::Value::Object(map))
    }
}
