//! Physical constants and fixed vehicle parameters used by the evaluator.

/// Standard gravity (m/s²)
pub const GRAVITY: f64 = 9.81;

/// km/h per m/s
pub const KMH_PER_MS: f64 = 3.6;

// Tyre operating window (Michelin Pilot Sport Cup 2 on the GR86 Cup car)
pub const OPTIMAL_TIRE_TEMP_C: f64 = 85.0;
pub const OPTIMAL_TIRE_PRESSURE_PSI: f64 = 32.0;

/// °C of deviation from optimal that costs the whole grip budget
pub const TIRE_TEMP_SENSITIVITY_C: f64 = 100.0;
/// psi of deviation from optimal that costs the whole grip budget
pub const TIRE_PRESSURE_SENSITIVITY_PSI: f64 = 50.0;

/// Half-widths of the dashboard's "in window" indicator
pub const TIRE_TEMP_WINDOW_C: f64 = 10.0;
pub const TIRE_PRESSURE_WINDOW_PSI: f64 = 3.0;

/// Peak braking deceleration per unit of effective grip at 100% brake
pub const BRAKING_GRIP_GAIN: f64 = 1.2;

/// Simplified yaw moment of inertia: I = mass * factor (kg·m²)
pub const YAW_INERTIA_FACTOR: f64 = 1.5;

/// Centre of gravity height (m)
pub const CG_HEIGHT_M: f64 = 0.48;
/// Track width (m)
pub const TRACK_WIDTH_M: f64 = 1.52;

/// Apex speed as a fraction of entry speed, before the grip cap
pub const APEX_SPEED_RATIO: f64 = 0.7;
/// km/h gained between apex and exit at full throttle
pub const FULL_THROTTLE_EXIT_GAIN_KMH: f64 = 30.0;

/// Steering angle treated as a full quarter turn of the corner
pub const FULL_LOCK_STEERING_DEG: f64 = 90.0;
