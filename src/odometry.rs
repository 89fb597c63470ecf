//! Odometry collaborator seam.
//!
//! The drivetrain owns the authoritative pose estimate; this crate only
//! reads it and submits vision candidates. [`OdometrySource`] is the
//! narrow interface both sides agree on. [`BlendedOdometry`] is a
//! reference implementation with a simple smoothing blend, used by the
//! tests and by simulation; real robots wire their wheel-odometry stack
//! in behind the same trait.

use crate::core::math::{angle_diff, deg_to_rad, normalize_angle};
use crate::core::types::{Pose2D, Timestamped};

/// Shared robot pose: read by every consumer, written only by the
/// odometry owner. Vision never overwrites the pose directly; it submits
/// candidates and lets the owner decide how much to trust them.
pub trait OdometrySource {
    /// Latest fused pose estimate.
    fn pose(&self) -> Pose2D;

    /// Submit a vision-derived pose candidate with the capture timestamp
    /// of the underlying camera frame.
    ///
    /// The implementation chooses the blending policy. Submissions from
    /// multiple cameras in one cycle are unordered; last-submission-wins
    /// is an acceptable resolution.
    fn submit_vision_pose(&mut self, pose: Pose2D, timestamp_us: u64);

    /// Hard pose override in field coordinates, heading in degrees.
    /// Calibration and test use only.
    fn set_pose(&mut self, x: f32, y: f32, heading_deg: f32);
}

/// Reference odometry with exponential vision blending.
///
/// Each submitted vision pose pulls the estimate toward itself by
/// `vision_gain` (position lerp, shortest-path heading lerp). With the
/// default gain a steady stream of detections converges quickly while a
/// single outlier moves the estimate only a few percent of its error.
#[derive(Debug, Clone)]
pub struct BlendedOdometry {
    pose: Pose2D,
    vision_gain: f32,
    last_vision: Option<Timestamped<Pose2D>>,
}

impl BlendedOdometry {
    /// Create at the origin with the given blend gain (0..=1).
    pub fn new(vision_gain: f32) -> Self {
        Self {
            pose: Pose2D::identity(),
            vision_gain: vision_gain.clamp(0.0, 1.0),
            last_vision: None,
        }
    }

    /// Most recent vision candidate, as submitted (before blending).
    pub fn last_vision(&self) -> Option<Timestamped<Pose2D>> {
        self.last_vision
    }

    /// Timestamp of the most recent vision submission, zero if none yet.
    pub fn last_vision_timestamp_us(&self) -> u64 {
        self.last_vision.map_or(0, |v| v.timestamp_us)
    }

    /// Apply a motion delta in the robot frame (simulation/test helper).
    pub fn apply_motion(&mut self, delta: &Pose2D) {
        self.pose = self.pose.compose(delta);
    }
}

impl OdometrySource for BlendedOdometry {
    fn pose(&self) -> Pose2D {
        self.pose
    }

    fn submit_vision_pose(&mut self, pose: Pose2D, timestamp_us: u64) {
        let g = self.vision_gain;
        let theta = normalize_angle(self.pose.theta + angle_diff(self.pose.theta, pose.theta) * g);
        self.pose = Pose2D::new(
            self.pose.x + (pose.x - self.pose.x) * g,
            self.pose.y + (pose.y - self.pose.y) * g,
            theta,
        );
        // Last submission wins; ordering across cameras is not our problem
        self.last_vision = Some(Timestamped::new(pose, timestamp_us));
    }

    fn set_pose(&mut self, x: f32, y: f32, heading_deg: f32) {
        self.pose = Pose2D::new(x, y, deg_to_rad(heading_deg));
    }
}
