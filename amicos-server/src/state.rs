//! Application state management

use crate::config::ServerConfig;
use amicos_core::{CorneringInputs, CorneringSession, Evaluation, InputsPatch, ValidationError};
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, warn};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Live inputs. The write lock is the single writer.
    pub session: Arc<RwLock<CorneringSession>>,

    /// Broadcast channel for committed evaluations
    /// Multiple consumers can subscribe to receive evaluations
    pub evaluation_tx: broadcast::Sender<Evaluation>,

    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let (evaluation_tx, _) = broadcast::channel(config.broadcast_capacity.max(1));

        Self {
            session: Arc::new(RwLock::new(CorneringSession::new(config.initial_inputs))),
            evaluation_tx,
            config: Arc::new(config),
        }
    }

    /// Subscribe to committed evaluations
    pub fn subscribe(&self) -> broadcast::Receiver<Evaluation> {
        self.evaluation_tx.subscribe()
    }

    /// Check a snapshot against the configured ranges, if enforcement is on
    pub fn check(&self, inputs: &CorneringInputs) -> Result<(), ValidationError> {
        if self.config.enforce_input_ranges {
            inputs.validate(&self.config.ranges)
        } else {
            Ok(())
        }
    }

    /// Replace the live snapshot, evaluate it once and broadcast the result
    ///
    /// The broadcast happens under the write lock so subscribers see
    /// revisions in commit order.
    pub async fn commit(&self, inputs: CorneringInputs) -> Result<Evaluation, ValidationError> {
        self.check(&inputs)?;
        let mut session = self.session.write().await;
        let evaluation = session.commit(inputs);
        self.publish(&evaluation);
        Ok(evaluation)
    }

    /// Apply a batch of field changes as one commit
    pub async fn apply(&self, patch: &InputsPatch) -> Result<Evaluation, ValidationError> {
        let mut session = self.session.write().await;
        let next = patch.apply_to(*session.inputs());
        self.check(&next)?;
        let evaluation = session.commit(next);
        self.publish(&evaluation);
        Ok(evaluation)
    }

    fn publish(&self, evaluation: &Evaluation) {
        let outputs = &evaluation.outputs;
        debug!(
            revision = evaluation.revision,
            tier = ?outputs.recommendation.tier,
            grip_utilization = outputs.grip_utilization.0,
            "Inputs committed"
        );

        let non_finite = outputs.non_finite_fields();
        if !non_finite.is_empty() {
            warn!(
                revision = evaluation.revision,
                "Evaluation produced non-finite outputs: {}",
                non_finite.join(", ")
            );
        }

        // Ignore error if no receivers (they'll get the next evaluation)
        let _ = self.evaluation_tx.send(evaluation.clone());
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ServerConfig::default())
    }
}
