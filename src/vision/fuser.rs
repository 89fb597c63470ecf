//! Per-camera pose fusion with staleness gating.

use super::camera::{CameraIo, CameraMount};
use crate::config::VisionConfig;
use crate::core::types::Pose3D;
use crate::field::FieldLayout;
use crate::odometry::OdometrySource;
use log::{debug, warn};

/// Fuses one camera's tag detections into shared odometry.
///
/// Call [`PoseFuser::update`] once per control cycle. Each cycle the
/// freshness counter ages down by one; any cycle with at least one
/// accepted submission resets it to the configured budget. The derived
/// [`PoseFuser::is_healthy`] flag is what the dashboard shows: it decays
/// to "stale" when the camera stops seeing usable tags, without anything
/// being disconnected or torn down.
#[derive(Debug)]
pub struct PoseFuser {
    mount: CameraMount,
    robot_to_camera: Pose3D,
    freshness: u32,
}

impl PoseFuser {
    /// Create a fuser for one mounted camera.
    pub fn new(mount: CameraMount) -> Self {
        let robot_to_camera = mount.transform();
        Self {
            mount,
            robot_to_camera,
            freshness: 0,
        }
    }

    /// Camera name, for logs and dashboards.
    pub fn name(&self) -> &str {
        &self.mount.name
    }

    /// True while the freshness budget has not run out.
    pub fn is_healthy(&self) -> bool {
        self.freshness > 0
    }

    /// Remaining freshness budget in cycles.
    pub fn freshness(&self) -> u32 {
        self.freshness
    }

    /// Process this cycle's detections.
    ///
    /// Ages the freshness counter, drains unread detections, drops
    /// out-of-range and unknown-marker observations, converts the rest
    /// to robot poses and submits them to odometry. At most one counter
    /// reset per cycle no matter how many detections were accepted.
    pub fn update(
        &mut self,
        camera: &mut dyn CameraIo,
        layout: &FieldLayout,
        odometry: &mut dyn OdometrySource,
        config: &VisionConfig,
    ) {
        // Default for this cycle: one step closer to stale
        self.freshness = self.freshness.saturating_sub(1);

        if !camera.is_connected() {
            return;
        }

        let mut accepted = false;
        for detection in camera.poll_unread_detections() {
            if detection.range > config.max_detection_range_m {
                debug!(
                    "{}: dropping tag {} at {:.2} m (ceiling {:.2} m)",
                    self.mount.name, detection.marker_id, detection.range, config.max_detection_range_m
                );
                continue;
            }

            let Some(marker_pose) = layout.marker_pose(detection.marker_id) else {
                warn!(
                    "{}: tag {} has no known field pose, ignoring",
                    self.mount.name, detection.marker_id
                );
                continue;
            };

            // Field pose of the tag, back through the observation, back
            // through the mount, projected onto the floor.
            let robot_pose = marker_pose
                .compose(&detection.camera_to_target.inverse())
                .compose(&self.robot_to_camera.inverse())
                .to_pose2d();

            debug!(
                "{}: tag {} -> robot at ({:.2}, {:.2}, {:.1}°)",
                self.mount.name,
                detection.marker_id,
                robot_pose.x,
                robot_pose.y,
                robot_pose.heading_degrees()
            );
            odometry.submit_vision_pose(robot_pose, detection.timestamp_us);
            accepted = true;
        }

        if accepted {
            self.freshness = config.freshness_budget;
        }
    }
}
