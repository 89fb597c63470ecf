//! Camera mount geometry and the camera collaborator interface.

use crate::core::math::deg_to_rad;
use crate::core::types::{Pose3D, Rotation3};
use serde::{Deserialize, Serialize};

/// Where a camera sits on the robot. Immutable per camera instance.
///
/// Offsets are from the robot center in the robot frame (x forward,
/// y left, z up); yaw and pitch describe the optical axis. A camera
/// pitched down 10° has `pitch_deg = -10.0`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraMount {
    /// Identifier used in logs and on the dashboard.
    pub name: String,
    /// Forward offset from robot center (meters).
    pub x: f32,
    /// Left offset from robot center (meters).
    pub y: f32,
    /// Height above robot center (meters).
    pub z: f32,
    /// Optical axis yaw (degrees).
    pub yaw_deg: f32,
    /// Optical axis pitch (degrees).
    pub pitch_deg: f32,
}

impl CameraMount {
    /// Describe a camera mount.
    pub fn new(name: impl Into<String>, x: f32, y: f32, z: f32, yaw_deg: f32, pitch_deg: f32) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            z,
            yaw_deg,
            pitch_deg,
        }
    }

    /// Robot-to-camera transform.
    pub fn transform(&self) -> Pose3D {
        Pose3D::new(
            self.x,
            self.y,
            self.z,
            Rotation3::from_euler(0.0, deg_to_rad(self.pitch_deg), deg_to_rad(self.yaw_deg)),
        )
    }
}

/// One tag observation from a camera pipeline.
#[derive(Debug, Clone, Copy)]
pub struct Detection {
    /// Fiducial id the detector reported.
    pub marker_id: u32,
    /// Straight-line camera-to-tag distance (meters).
    pub range: f32,
    /// Pose of the tag in the camera frame.
    pub camera_to_target: Pose3D,
    /// Capture time of the frame (microseconds, monotonic).
    pub timestamp_us: u64,
}

/// Camera collaborator: connection status plus unread detection batches.
///
/// `poll_unread_detections` drains everything that arrived since the
/// last poll, so a slow cycle never silently drops frames.
pub trait CameraIo {
    /// Whether the camera is currently connected.
    fn is_connected(&self) -> bool;

    /// Take all detections accumulated since the previous call.
    fn poll_unread_detections(&mut self) -> Vec<Detection>;
}
