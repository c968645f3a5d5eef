//! AMICOS Core Library
//!
//! Adaptive Momentum-Inertia Cornering Optimization: a pure cornering
//! physics evaluator for a race-telemetry dashboard. Given a vehicle
//! setup, the corner and a live telemetry snapshot it derives grip,
//! G-forces, angular momentum, load transfer and speed predictions, and
//! classifies the driving state into an advisory tier.
//!
//! ```
//! use amicos_core::{classify, CorneringInputs, Tier};
//!
//! let outputs = CorneringInputs::default().evaluate();
//! assert_eq!(outputs.recommendation.tier, Tier::Danger);
//! assert_eq!(classify(outputs.grip_utilization).tier, Tier::Danger);
//! ```

pub mod classifier;
pub mod constants;
pub mod display;
pub mod model;
pub mod physics;
pub mod session;
pub mod units;
pub mod validation;

pub use classifier::{classify, Recommendation, Tier};
pub use model::{
    CorneringInputs, Evaluation, FieldMask, PhysicsOutputs, TelemetryInputs, TrackParameters,
    VehicleParameters,
};
pub use physics::evaluate;
pub use session::{CorneringSession, InputsPatch};
pub use validation::{InputRanges, ValidationError};
