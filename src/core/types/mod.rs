//! Geometry types shared across the crate.

mod pose;
mod pose3;
mod timestamped;

pub use pose::{Point2D, Pose2D};
pub use pose3::{Pose3D, Rotation3};
pub use timestamped::Timestamped;
