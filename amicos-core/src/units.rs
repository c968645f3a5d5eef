//! Type-safe wrappers for physical units
//!
//! This module provides newtype wrappers around f64 to ensure
//! type safety and prevent unit confusion between the dashboard's
//! mixed km/h, m/s, degree and percentage inputs.
//!
//! All unit types serialize with 4 decimal places to reduce JSON payload size.
//! Non-finite values serialize as `null` and deserialize from `null` as NaN.

use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::KMH_PER_MS;

/// Round f64 to 4 decimal places for compact JSON serialization
fn round4<S: serde::Serializer>(val: &f64, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64((*val * 10000.0).round() / 10000.0)
}

/// Read a `null` written for a NaN or infinite value back as NaN
pub(crate) fn nan_if_null<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(d)?.unwrap_or(f64::NAN))
}

/// Kilograms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Kilograms(
    #[serde(serialize_with = "round4", deserialize_with = "nan_if_null")] pub f64,
);

/// Mechanical horsepower
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Horsepower(
    #[serde(serialize_with = "round4", deserialize_with = "nan_if_null")] pub f64,
);

/// Celsius
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Celsius(
    #[serde(serialize_with = "round4", deserialize_with = "nan_if_null")] pub f64,
);

/// Pounds per square inch (tyre pressure)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Psi(
    #[serde(serialize_with = "round4", deserialize_with = "nan_if_null")] pub f64,
);

/// Meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Meters(
    #[serde(serialize_with = "round4", deserialize_with = "nan_if_null")] pub f64,
);

/// Meters per second
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct MetersPerSecond(
    #[serde(serialize_with = "round4", deserialize_with = "nan_if_null")] pub f64,
);

impl MetersPerSecond {
    pub fn to_kilometers_per_hour(self) -> KilometersPerHour {
        KilometersPerHour(self.0 * KMH_PER_MS)
    }
}

/// Kilometers per hour
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct KilometersPerHour(
    #[serde(serialize_with = "round4", deserialize_with = "nan_if_null")] pub f64,
);

impl KilometersPerHour {
    pub fn to_meters_per_second(self) -> MetersPerSecond {
        MetersPerSecond(self.0 / KMH_PER_MS)
    }
}

/// Degrees
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Degrees(
    #[serde(serialize_with = "round4", deserialize_with = "nan_if_null")] pub f64,
);

/// Percentage on a 0-100 scale
///
/// Unlike a normalised ratio this is deliberately unclamped: grip
/// utilization above 100 is how an over-limit corner is reported.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Percent(
    #[serde(serialize_with = "round4", deserialize_with = "nan_if_null")] pub f64,
);

impl Percent {
    /// Get as a fraction (100% = 1.0)
    pub fn fraction(&self) -> f64 {
        self.0 / 100.0
    }
}

/// G-force (multiples of gravitational acceleration)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct GForce(
    #[serde(serialize_with = "round4", deserialize_with = "nan_if_null")] pub f64,
);

/// Radians per second
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct RadiansPerSecond(
    #[serde(serialize_with = "round4", deserialize_with = "nan_if_null")] pub f64,
);

/// Kilogram square meters per second (angular momentum)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct KilogramMetersSquaredPerSecond(
    #[serde(serialize_with = "round4", deserialize_with = "nan_if_null")] pub f64,
);

/// Newtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Newtons(
    #[serde(serialize_with = "round4", deserialize_with = "nan_if_null")] pub f64,
);

/// Seconds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Seconds(
    #[serde(serialize_with = "round4", deserialize_with = "nan_if_null")] pub f64,
);
