//! Presentation helpers
//!
//! Fixed-precision rendering of outputs as the dashboard shows them, and
//! the tyre operating-window indicator. Non-finite values are rendered
//! verbatim (`NaN`, `inf`) so an invalid configuration stays visible.

use crate::classifier::Tier;
use crate::constants::*;
use crate::model::{PhysicsOutputs, VehicleParameters};
use serde::{Deserialize, Serialize};

/// Every output rendered to its display precision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayOutputs {
    pub max_cornering_speed: String,
    pub lateral_g: String,
    pub braking_g: String,
    pub combined_g: String,
    pub yaw_rate: String,
    pub angular_momentum: String,
    pub lateral_load_transfer: String,
    pub apex_speed: String,
    pub exit_speed: String,
    pub time_to_apex: String,
    pub grip_utilization: String,
    pub safety_margin: String,
    pub effective_grip: String,
    pub tier: Tier,
    pub recommendation: String,
}

fn fixed(value: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, value)
}

impl From<&PhysicsOutputs> for DisplayOutputs {
    fn from(out: &PhysicsOutputs) -> Self {
        Self {
            // speeds: 1 decimal
            max_cornering_speed: fixed(out.max_cornering_speed.0, 1),
            apex_speed: fixed(out.apex_speed.0, 1),
            exit_speed: fixed(out.exit_speed.0, 1),
            // G-forces and ratios: 2 decimals
            lateral_g: fixed(out.lateral_g.0, 2),
            braking_g: fixed(out.braking_g.0, 2),
            combined_g: fixed(out.combined_g.0, 2),
            effective_grip: fixed(out.effective_grip, 2),
            time_to_apex: fixed(out.time_to_apex.0, 2),
            yaw_rate: fixed(out.yaw_rate.0, 3),
            angular_momentum: fixed(out.angular_momentum.0, 1),
            lateral_load_transfer: fixed(out.lateral_load_transfer.0, 1),
            grip_utilization: fixed(out.grip_utilization.0, 1),
            safety_margin: fixed(out.safety_margin.0, 1),
            tier: out.recommendation.tier,
            recommendation: out.recommendation.message.clone(),
        }
    }
}

/// Whether the tyres sit inside their operating window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TireWindow {
    /// Within ±10 °C of optimal
    pub temperature_in_window: bool,
    /// Within ±3 psi of optimal
    pub pressure_in_window: bool,
}

impl TireWindow {
    pub fn assess(vehicle: &VehicleParameters) -> Self {
        Self {
            temperature_in_window: (vehicle.tire_temperature.0 - OPTIMAL_TIRE_TEMP_C).abs()
                < TIRE_TEMP_WINDOW_C,
            pressure_in_window: (vehicle.tire_pressure.0 - OPTIMAL_TIRE_PRESSURE_PSI).abs()
                < TIRE_PRESSURE_WINDOW_PSI,
        }
    }

    pub fn all_in_window(&self) -> bool {
        self.temperature_in_window && self.pressure_in_window
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CorneringInputs;
    use crate::units::*;

    #[test]
    fn test_reference_scenario_display() {
        let out = CorneringInputs::default().evaluate();
        let display = DisplayOutputs::from(&out);

        assert_eq!(display.max_cornering_speed, "83.6");
        assert_eq!(display.lateral_g, "2.27");
        assert_eq!(display.braking_g, "1.06");
        assert_eq!(display.combined_g, "2.50");
        assert_eq!(display.yaw_rate, "0.667");
        assert_eq!(display.angular_momentum, "1270.0");
        assert_eq!(display.lateral_load_transfer, "8912.3");
        assert_eq!(display.apex_speed, "83.6");
        assert_eq!(display.exit_speed, "101.6");
        assert_eq!(display.time_to_apex, "1.18");
        assert_eq!(display.grip_utilization, "227.2");
        assert_eq!(display.safety_margin, "0.0");
        assert_eq!(display.effective_grip, "1.10");
        assert_eq!(display.tier, Tier::Danger);
    }

    #[test]
    fn test_non_finite_rendered_verbatim() {
        let mut inputs = CorneringInputs::default();
        inputs.track.corner_radius = Meters(0.0);
        let display = DisplayOutputs::from(&inputs.evaluate());

        assert_eq!(display.lateral_g, "inf");
        assert_eq!(display.yaw_rate, "inf");
        assert_eq!(display.tier, Tier::Undefined);
    }

    #[test]
    fn test_tire_window_at_optimum() {
        let window = TireWindow::assess(&VehicleParameters::default());
        assert!(window.all_in_window());
    }

    #[test]
    fn test_tire_window_edges_are_exclusive() {
        let mut vehicle = VehicleParameters::default();
        vehicle.tire_temperature = Celsius(95.0);
        vehicle.tire_pressure = Psi(34.5);
        let window = TireWindow::assess(&vehicle);
        assert!(!window.temperature_in_window);
        assert!(window.pressure_in_window);

        vehicle.tire_temperature = Celsius(76.0);
        vehicle.tire_pressure = Psi(29.0);
        let window = TireWindow::assess(&vehicle);
        assert!(window.temperature_in_window);
        assert!(!window.pressure_in_window);
        assert!(!window.all_in_window());
    }
}
