//! Regression tests pinning the GR86 Cup reference corner
//!
//! mass 1270 kg, 228 hp, 85 °C / 32 psi, 50 m radius, μ 1.1,
//! 120 km/h entry, 80% brake, 45° steering, 60% throttle.

use amicos_core::units::*;
use amicos_core::{evaluate, CorneringInputs, Tier};

const G: f64 = 9.81;

fn assert_close(actual: f64, expected: f64, tol: f64, what: &str) {
    assert!(
        (actual - expected).abs() < tol,
        "{}: expected {}, got {}",
        what,
        expected,
        actual
    );
}

fn reference() -> CorneringInputs {
    let inputs = CorneringInputs::default();
    assert_eq!(inputs.vehicle.mass, Kilograms(1270.0));
    assert_eq!(inputs.telemetry.entry_speed, KilometersPerHour(120.0));
    inputs
}

#[test]
fn test_reference_effective_grip() {
    let out = reference().evaluate();
    assert_eq!(out.effective_grip, 1.1);
}

#[test]
fn test_reference_max_cornering_speed() {
    let out = reference().evaluate();
    assert_close(
        out.max_cornering_speed.0,
        (1.1 * G * 50.0_f64).sqrt() * 3.6,
        1e-9,
        "max_cornering_speed",
    );
    assert_close(out.max_cornering_speed.0, 83.6216, 1e-4, "max_cornering_speed");
}

#[test]
fn test_reference_entry_speed_in_ms() {
    let inputs = reference();
    assert_close(
        inputs.telemetry.entry_speed.to_meters_per_second().0,
        33.3333,
        1e-4,
        "entry_speed_ms",
    );
}

#[test]
fn test_reference_g_forces() {
    let out = reference().evaluate();
    assert_close(out.lateral_g.0, 2.265262, 1e-6, "lateral_g");
    assert_close(out.braking_g.0, 1.056, 1e-12, "braking_g");
    assert_close(out.combined_g.0, 2.499310, 1e-6, "combined_g");
}

#[test]
fn test_reference_grip_utilization_and_tier() {
    let out = reference().evaluate();
    assert_close(out.grip_utilization.0, 227.2100, 1e-4, "grip_utilization");
    assert_eq!(out.safety_margin, Percent(0.0));
    assert_eq!(out.recommendation.tier, Tier::Danger);
    assert_eq!(
        out.recommendation.message,
        "exceeding grip limits; reduce speed or brake force"
    );
}

#[test]
fn test_reference_rotation_and_load() {
    let out = reference().evaluate();
    assert_close(out.yaw_rate.0, 2.0 / 3.0, 1e-12, "yaw_rate");
    assert_close(out.angular_momentum.0, 1270.0, 1e-9, "angular_momentum");
    assert_close(out.lateral_load_transfer.0, 8912.2807, 1e-4, "lateral_load_transfer");
}

#[test]
fn test_reference_speed_predictions() {
    let out = reference().evaluate();
    // 0.7 * 120 = 84 exceeds the limit, so apex sits on it
    assert_eq!(out.apex_speed, out.max_cornering_speed);
    assert_close(out.exit_speed.0, out.apex_speed.0 + 18.0, 1e-9, "exit_speed");
    assert_close(out.time_to_apex.0, 1.178097, 1e-6, "time_to_apex");
}

#[test]
fn test_free_function_matches_snapshot_method() {
    let inputs = reference();
    let via_fn = evaluate(&inputs.vehicle, &inputs.track, &inputs.telemetry);
    assert_eq!(via_fn, inputs.evaluate());
}

#[test]
fn test_reference_output_serializes_rounded() {
    let out = reference().evaluate();
    let json = serde_json::to_value(&out).unwrap();
    assert_eq!(json["lateral_g"], 2.2653);
    assert_eq!(json["grip_utilization"], 227.21);
    assert_eq!(json["recommendation"]["tier"], "Danger");
}
