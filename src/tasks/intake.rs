//! Pickup sequencing: run the rollers until a piece is held.

use super::coordinator::Ejector;
use crate::config::DockingConfig;
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// State of one pickup attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PickupState {
    /// Waiting to be started.
    #[default]
    Idle,

    /// Rollers running, waiting for the piece sensor.
    ///
    /// No timeout: whether a piece arrives depends entirely on the
    /// supply station and the operator, so the rollers keep running
    /// until the sensor trips or an external cancel intervenes.
    Intaking,

    /// Piece held, rollers stopped.
    Done,

    /// Externally cancelled; output zeroed.
    Cancelled,
}

impl PickupState {
    /// Whether the attempt is still running.
    pub fn is_active(&self) -> bool {
        *self == PickupState::Intaking
    }
}

/// Sequences one pickup at the supply station.
///
/// Driven by [`PickupSequencer::tick`] once per control cycle, like the
/// docking coordinator. Each active cycle re-asserts the intake voltage;
/// the cycle the piece sensor trips, the output is zeroed and the
/// attempt completes.
#[derive(Debug, Default)]
pub struct PickupSequencer {
    state: PickupState,
}

impl PickupSequencer {
    /// Create an idle sequencer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> PickupState {
        self.state
    }

    /// Whether the attempt ran to completion (not cancelled).
    pub fn is_done(&self) -> bool {
        self.state == PickupState::Done
    }

    /// Begin an attempt. A piece already in the mechanism completes on
    /// the first tick without ever running the rollers.
    pub fn start(&mut self) {
        self.state = PickupState::Intaking;
        info!("Pickup started");
    }

    /// Advance by one control cycle.
    pub fn tick(&mut self, ejector: &mut dyn Ejector, config: &DockingConfig) {
        match self.state {
            PickupState::Idle | PickupState::Done | PickupState::Cancelled => {}

            PickupState::Intaking => {
                if ejector.has_piece() {
                    ejector.set_output(0.0);
                    debug!("Pickup: piece acquired, rollers stopped");
                    self.state = PickupState::Done;
                } else {
                    ejector.set_output(config.intake_voltage);
                }
            }
        }
    }

    /// Cancel from any state, zeroing the output.
    pub fn cancel(&mut self, ejector: &mut dyn Ejector) {
        if self.state.is_active() {
            info!("Pickup cancelled");
        }
        ejector.set_output(0.0);
        self.state = PickupState::Cancelled;
    }
}
