//! Docking state machine: approach, raise, eject.

use crate::config::DockingConfig;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

/// Lift collaborator: set a target, poll whether it got there.
///
/// The motor control loop behind this is somebody else's problem; the
/// coordinator only commands heights and reads the at-target predicate.
pub trait LiftActuator {
    /// Command a target height in meters.
    fn set_target_height(&mut self, height_m: f32);

    /// Whether the lift has settled at the commanded height.
    fn is_at_target(&self) -> bool;

    /// Current height in meters.
    fn height(&self) -> f32;
}

/// Ejector/intake collaborator.
pub trait Ejector {
    /// Set the output voltage. Positive ejects; zero stops.
    fn set_output(&mut self, voltage: f32);

    /// Whether a game piece is currently held.
    fn has_piece(&self) -> bool;
}

/// State of one docking/scoring attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DockState {
    /// Waiting to be started.
    #[default]
    Idle,

    /// Drivetrain is executing the approach plan.
    Approaching,

    /// Approach finished; about to command the lift.
    AtTarget,

    /// Lift commanded, waiting for its at-target predicate.
    ///
    /// There is deliberately no timeout here: ejecting without a
    /// confirmed height jams the mechanism, so a stuck lift stalls the
    /// sequence until an external cancel intervenes.
    RaisingActuator,

    /// Lift confirmed at height.
    ActuatorReady,

    /// Ejector running for the fixed eject duration.
    Ejecting,

    /// Attempt complete.
    Done,

    /// Externally cancelled; all outputs zeroed.
    Cancelled,
}

impl DockState {
    /// Whether the attempt is still running.
    pub fn is_active(&self) -> bool {
        !matches!(self, DockState::Idle | DockState::Done | DockState::Cancelled)
    }
}

/// Sequences one docking attempt: approach → raise lift → eject.
///
/// Driven by [`DockingCoordinator::tick`] once per control cycle; every
/// wait is expressed as staying in a state, never as blocking. The
/// approach phase carries a deadline so a stalled planner cannot hang
/// the sequence; the lift phase deliberately does not (see
/// [`DockState::RaisingActuator`]).
#[derive(Debug)]
pub struct DockingCoordinator {
    state: DockState,
    lift_height_m: f32,
    approach_deadline_us: u64,
    eject_until_us: u64,
}

impl DockingCoordinator {
    /// Create an idle coordinator that will raise the lift to
    /// `lift_height_m` before ejecting.
    pub fn new(lift_height_m: f32) -> Self {
        Self {
            state: DockState::Idle,
            lift_height_m,
            approach_deadline_us: 0,
            eject_until_us: 0,
        }
    }

    /// Current state.
    pub fn state(&self) -> DockState {
        self.state
    }

    /// Whether the attempt ran to completion (not cancelled).
    pub fn is_done(&self) -> bool {
        self.state == DockState::Done
    }

    /// Begin an attempt. The approach must finish before the configured
    /// timeout or the attempt cancels itself.
    pub fn start(&mut self, now_us: u64, config: &DockingConfig) {
        self.state = DockState::Approaching;
        self.approach_deadline_us = now_us + (config.approach_timeout_s * 1e6) as u64;
        info!("Docking attempt started, lift target {:.2} m", self.lift_height_m);
    }

    /// Advance the state machine by one control cycle.
    ///
    /// `approach_complete` is the drivetrain's report that every step of
    /// the approach plan has finished; the coordinator polls it rather
    /// than computing it.
    pub fn tick(
        &mut self,
        now_us: u64,
        approach_complete: bool,
        lift: &mut dyn LiftActuator,
        ejector: &mut dyn Ejector,
        config: &DockingConfig,
    ) {
        match self.state {
            DockState::Idle | DockState::Done | DockState::Cancelled => {}

            DockState::Approaching => {
                if approach_complete {
                    self.transition(DockState::AtTarget);
                } else if now_us >= self.approach_deadline_us {
                    warn!("Approach timed out, cancelling docking attempt");
                    self.cancel(ejector);
                }
            }

            DockState::AtTarget => {
                lift.set_target_height(self.lift_height_m);
                self.transition(DockState::RaisingActuator);
            }

            DockState::RaisingActuator => {
                // Stall here on a jammed lift; only an external cancel
                // may get us out.
                if lift.is_at_target() {
                    self.transition(DockState::ActuatorReady);
                }
            }

            DockState::ActuatorReady => {
                ejector.set_output(config.eject_voltage);
                self.eject_until_us = now_us + (config.eject_duration_s * 1e6) as u64;
                self.transition(DockState::Ejecting);
            }

            DockState::Ejecting => {
                if now_us >= self.eject_until_us {
                    // Completion is not observable; stop on the clock
                    ejector.set_output(0.0);
                    self.transition(DockState::Done);
                } else {
                    ejector.set_output(config.eject_voltage);
                }
            }
        }
    }

    /// Cancel from any state, leaving outputs safe.
    ///
    /// Zeroing the ejector is a hard invariant; the lift holds its last
    /// commanded target because it has no open output to zero.
    pub fn cancel(&mut self, ejector: &mut dyn Ejector) {
        if self.state.is_active() {
            info!("Docking attempt cancelled in {:?}", self.state);
        }
        ejector.set_output(0.0);
        self.state = DockState::Cancelled;
    }

    fn transition(&mut self, next: DockState) {
        debug!("Docking: {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}
