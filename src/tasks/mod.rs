//! Docking, pickup and follow-up sequencing.
//!
//! The [`DockingCoordinator`] owns the per-attempt scoring state
//! machine, the [`PickupSequencer`] runs the supply-station intake, and
//! the [`RouteTable`] decides where to drive next once an attempt
//! finishes, keyed by whichever marker the robot ended up closest to.

mod coordinator;
mod intake;
mod routes;

pub use coordinator::{DockState, DockingCoordinator, Ejector, LiftActuator};
pub use intake::{PickupSequencer, PickupState};
pub use routes::{select_follow_up, Route, RouteTable};
