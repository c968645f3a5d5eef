//! Cornering physics evaluator
//!
//! A pure function from one input snapshot to a fresh [`PhysicsOutputs`].
//! No bounds checking happens here: callers constrain inputs upstream
//! (see [`crate::validation`]) and anything outside the physical domain
//! is reported as NaN/infinity rather than patched over.

use crate::classifier::{classify, Recommendation, Tier};
use crate::constants::*;
use crate::model::{PhysicsOutputs, TelemetryInputs, TrackParameters, VehicleParameters};
use crate::units::*;
use std::f64::consts::FRAC_PI_2;

/// Grip multipliers from running the tyres away from their optimal point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TireGripFactors {
    pub temperature: f64,
    pub pressure: f64,
}

impl TireGripFactors {
    pub fn for_vehicle(vehicle: &VehicleParameters) -> Self {
        let temp_dev = (vehicle.tire_temperature.0 - OPTIMAL_TIRE_TEMP_C).abs();
        let pressure_dev = (vehicle.tire_pressure.0 - OPTIMAL_TIRE_PRESSURE_PSI).abs();
        Self {
            temperature: 1.0 - temp_dev / TIRE_TEMP_SENSITIVITY_C,
            pressure: 1.0 - pressure_dev / TIRE_PRESSURE_SENSITIVITY_PSI,
        }
    }
}

/// Track μ attenuated by tyre temperature and pressure
pub fn effective_grip(vehicle: &VehicleParameters, track: &TrackParameters) -> f64 {
    let factors = TireGripFactors::for_vehicle(vehicle);
    track.grip_coefficient * factors.temperature * factors.pressure
}

/// V_max = sqrt(μ · g · R)
pub fn max_cornering_speed(effective_grip: f64, corner_radius: Meters) -> KilometersPerHour {
    MetersPerSecond((effective_grip * GRAVITY * corner_radius.0).sqrt()).to_kilometers_per_hour()
}

/// Evaluate every physics output for one input snapshot
pub fn evaluate(
    vehicle: &VehicleParameters,
    track: &TrackParameters,
    telemetry: &TelemetryInputs,
) -> PhysicsOutputs {
    let radius = track.corner_radius.0;
    let mass = vehicle.mass.0;

    let effective_grip = effective_grip(vehicle, track);
    let max_cornering_speed = max_cornering_speed(effective_grip, track.corner_radius);

    let entry_ms = telemetry.entry_speed.to_meters_per_second().0;

    // a_y = v² / r, expressed in g
    let lateral_g = (entry_ms * entry_ms) / (radius * GRAVITY);
    let braking_g = telemetry.brake_force.fraction() * effective_grip * BRAKING_GRIP_GAIN;
    let combined_g = (lateral_g * lateral_g + braking_g * braking_g).sqrt();

    let yaw_rate = entry_ms / radius;
    let angular_momentum = (mass * YAW_INERTIA_FACTOR) * yaw_rate;

    // ΔF = m · a_y · h / t
    let lateral_load_transfer = (mass * lateral_g * GRAVITY * CG_HEIGHT_M) / TRACK_WIDTH_M;

    let apex_speed = cap_at(
        telemetry.entry_speed.0 * APEX_SPEED_RATIO,
        max_cornering_speed.0,
    );
    let exit_speed = apex_speed + telemetry.throttle.fraction() * FULL_THROTTLE_EXIT_GAIN_KMH;

    let distance_to_apex =
        radius * (telemetry.steering_angle.0 / FULL_LOCK_STEERING_DEG) * FRAC_PI_2;
    let time_to_apex = distance_to_apex / entry_ms;

    let grip_utilization = (combined_g / effective_grip) * 100.0;
    let safety_margin = if grip_utilization.is_nan() {
        f64::NAN
    } else {
        (100.0 - grip_utilization).max(0.0)
    };

    // With no grip left the ratio flips sign or blows up; neither is a tier.
    let recommendation = if effective_grip > 0.0 {
        classify(Percent(grip_utilization))
    } else {
        Recommendation::from(Tier::Undefined)
    };

    PhysicsOutputs {
        max_cornering_speed,
        lateral_g: GForce(lateral_g),
        braking_g: GForce(braking_g),
        combined_g: GForce(combined_g),
        yaw_rate: RadiansPerSecond(yaw_rate),
        angular_momentum: KilogramMetersSquaredPerSecond(angular_momentum),
        lateral_load_transfer: Newtons(lateral_load_transfer),
        apex_speed: KilometersPerHour(apex_speed),
        exit_speed: KilometersPerHour(exit_speed),
        time_to_apex: Seconds(time_to_apex),
        grip_utilization: Percent(grip_utilization),
        safety_margin: Percent(safety_margin),
        effective_grip,
        recommendation,
    }
}

/// `min` that propagates a NaN limit instead of discarding it
fn cap_at(value: f64, limit: f64) -> f64 {
    if limit.is_nan() || value > limit {
        limit
    } else {
        value
    }
}
