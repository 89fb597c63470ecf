//! Target selection and approach planning.
//!
//! Flow: current odometry pose → [`find_nearest`] marker for the role →
//! [`compute_destination`] with the role's standoff rules →
//! [`ApproachPlanner::plan`] assembles the motion steps at execution
//! time, using whatever the pose is *then*.

mod destination;
mod planner;
mod resolver;

pub use destination::{compute_destination, ApproachSide};
pub use planner::{
    ApproachPlanner, ApproachRequest, MotionStep, PathPlanner, PlannedPath, StraightLinePlanner,
};
pub use resolver::find_nearest;
