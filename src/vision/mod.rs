//! Camera-based field localization.
//!
//! One [`PoseFuser`] per physical camera converts tag detections into
//! robot-frame pose candidates and submits them to shared odometry,
//! gated by range and marker validity, with a decaying freshness budget
//! that reports camera health without ever disconnecting anything.

mod camera;
mod fuser;

pub use camera::{CameraIo, CameraMount, Detection};
pub use fuser::PoseFuser;
