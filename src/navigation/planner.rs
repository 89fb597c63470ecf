//! Deferred approach planning.
//!
//! An approach is requested long before it runs (an operator holds a
//! button, an autonomous routine reaches that step). The robot keeps
//! moving in between, so nothing about the plan may be computed at
//! request time. [`ApproachRequest`] captures only the role and side;
//! [`ApproachPlanner::plan`] does all pose reads and geometry at the
//! moment the scheduler actually starts the approach.

use super::destination::{compute_destination, ApproachSide};
use super::resolver::find_nearest;
use crate::config::ApproachConfig;
use crate::core::math::{angle_diff, rad_to_deg};
use crate::core::types::{Point2D, Pose2D};
use crate::error::Result;
use crate::field::{FieldLayout, MarkerRole};
use crate::odometry::OdometrySource;
use log::{debug, info, warn};

/// A generated path for the long-range leg of an approach.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedPath {
    /// Waypoints from start to destination, field frame.
    pub waypoints: Vec<Point2D>,
}

/// External curve/trajectory generator seam.
///
/// Generation may fail for degenerate requests (very short moves,
/// geometrically impossible curvature); that failure is recoverable by
/// contract and the planner degrades to rotate-and-translate.
pub trait PathPlanner {
    /// Plan a path from `from` to `to`, entering and leaving along
    /// `bearing_deg` (relative to the field frame).
    fn plan(&self, from: &Pose2D, to: &Pose2D, bearing_deg: f32) -> Result<PlannedPath>;
}

/// One step of an approach plan, executed in order by the drivetrain.
#[derive(Debug, Clone, PartialEq)]
pub enum MotionStep {
    /// Follow a generated path, finishing at the given heading (degrees).
    FollowPath {
        path: PlannedPath,
        final_heading_deg: f32,
    },
    /// Rotate in place to a field heading (degrees).
    RotateTo { heading_deg: f32 },
    /// Drive to a field position while holding a heading (degrees).
    TranslateTo {
        x: f32,
        y: f32,
        heading_deg: f32,
    },
}

/// What an approach should do, captured at request time.
///
/// Deliberately tiny: the marker, destination and steps are all chosen
/// later, from live state, when [`ApproachPlanner::plan`] runs.
#[derive(Debug, Clone, Copy)]
pub struct ApproachRequest {
    /// Which marker role to dock at.
    pub role: MarkerRole,
    /// Which slot to align with (scoring only).
    pub side: ApproachSide,
}

/// Builds approach plans from live state.
pub struct ApproachPlanner<'a> {
    layout: &'a FieldLayout,
    path_planner: &'a dyn PathPlanner,
}

impl<'a> ApproachPlanner<'a> {
    /// Create a planner over the field layout and the path generator.
    pub fn new(layout: &'a FieldLayout, path_planner: &'a dyn PathPlanner) -> Self {
        Self {
            layout,
            path_planner,
        }
    }

    /// Assemble the motion steps for an approach, using the pose as of
    /// right now.
    ///
    /// - No marker matches the role: empty plan (a valid, already-done
    ///   outcome).
    /// - Farther than the long-range threshold: try a generated path
    ///   first; if generation fails, log and continue without it.
    /// - Always: rotate to the destination heading, then translate to
    ///   the destination holding that heading.
    pub fn plan(
        &self,
        odometry: &dyn OdometrySource,
        request: ApproachRequest,
        config: &ApproachConfig,
    ) -> Vec<MotionStep> {
        let robot_pose = odometry.pose();

        let Some(marker) = find_nearest(&robot_pose, request.role, self.layout) else {
            info!("No {:?} marker on the field, approach is a no-op", request.role);
            return Vec::new();
        };
        let destination = compute_destination(marker, request.side, config);

        let distance = robot_pose.distance_to(&destination.translation());
        // Travel direction relative to the current heading, in degrees,
        // matching what the path generator expects
        let bearing_deg = rad_to_deg(angle_diff(
            robot_pose.theta,
            robot_pose.bearing_to(&destination.translation()),
        ));
        debug!(
            "Approach to marker {}: {:.2} m at {:.1}°",
            marker.id, distance, bearing_deg
        );

        let mut steps = Vec::new();
        if distance > config.long_range_threshold_m {
            // A generated path is worth it when far away; close in it
            // tends to fail and the rotate/translate pair is enough.
            match self.path_planner.plan(&robot_pose, &destination, bearing_deg) {
                Ok(path) => steps.push(MotionStep::FollowPath {
                    path,
                    final_heading_deg: destination.heading_degrees(),
                }),
                Err(e) => warn!("Path generation failed, falling back to direct move: {}", e),
            }
        }

        steps.push(MotionStep::RotateTo {
            heading_deg: destination.heading_degrees(),
        });
        steps.push(MotionStep::TranslateTo {
            x: destination.x,
            y: destination.y,
            heading_deg: destination.heading_degrees(),
        });
        steps
    }
}

/// Straight-line fallback path generator.
///
/// Produces a two-point path and refuses requests shorter than a small
/// epsilon, mimicking the failure mode of real trajectory generators on
/// degenerate inputs. Useful for simulation and tests; real robots plug
/// in their spline generator behind [`PathPlanner`].
#[derive(Debug, Default)]
pub struct StraightLinePlanner;

impl PathPlanner for StraightLinePlanner {
    fn plan(&self, from: &Pose2D, to: &Pose2D, _bearing_deg: f32) -> Result<PlannedPath> {
        let distance = from.distance_to(&to.translation());
        if distance < 1e-3 {
            return Err(crate::error::DishaError::Planning(format!(
                "degenerate move of {:.4} m",
                distance
            )));
        }
        Ok(PlannedPath {
            waypoints: vec![from.translation(), to.translation()],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Pose3D;
    use crate::field::Marker;
    use crate::odometry::{BlendedOdometry, OdometrySource};

    struct AlwaysFails;

    impl PathPlanner for AlwaysFails {
        fn plan(&self, _from: &Pose2D, _to: &Pose2D, _bearing_deg: f32) -> Result<PlannedPath> {
            Err(crate::error::DishaError::Planning("forced failure".into()))
        }
    }

    fn layout_with_marker_at(x: f32, y: f32) -> FieldLayout {
        FieldLayout::new(vec![Marker::new(
            6,
            Pose3D::from_planar(x, y, std::f32::consts::PI),
            MarkerRole::Scoring,
        )])
        .unwrap()
    }

    #[test]
    fn test_short_move_is_rotate_then_translate() {
        // Destination lands ~0.65 m ahead: no path step
        let layout = layout_with_marker_at(1.0, 0.0);
        let planner = StraightLinePlanner;
        let approach = ApproachPlanner::new(&layout, &planner);
        let odom = BlendedOdometry::new(0.0);

        let steps = approach.plan(
            &odom,
            ApproachRequest {
                role: MarkerRole::Scoring,
                side: ApproachSide::Left,
            },
            &ApproachConfig::default(),
        );

        assert_eq!(steps.len(), 2);
        assert!(matches!(steps[0], MotionStep::RotateTo { .. }));
        assert!(matches!(steps[1], MotionStep::TranslateTo { .. }));
    }

    #[test]
    fn test_long_move_gets_path_step() {
        let layout = layout_with_marker_at(6.0, 0.0);
        let planner = StraightLinePlanner;
        let approach = ApproachPlanner::new(&layout, &planner);
        let odom = BlendedOdometry::new(0.0);

        let steps = approach.plan(
            &odom,
            ApproachRequest {
                role: MarkerRole::Scoring,
                side: ApproachSide::Left,
            },
            &ApproachConfig::default(),
        );

        assert_eq!(steps.len(), 3);
        assert!(matches!(steps[0], MotionStep::FollowPath { .. }));
        assert!(matches!(steps[1], MotionStep::RotateTo { .. }));
        assert!(matches!(steps[2], MotionStep::TranslateTo { .. }));
    }

    #[test]
    fn test_path_failure_degrades_gracefully() {
        let layout = layout_with_marker_at(6.0, 0.0);
        let planner = AlwaysFails;
        let approach = ApproachPlanner::new(&layout, &planner);
        let odom = BlendedOdometry::new(0.0);

        let steps = approach.plan(
            &odom,
            ApproachRequest {
                role: MarkerRole::Scoring,
                side: ApproachSide::Left,
            },
            &ApproachConfig::default(),
        );

        // Path step silently omitted, the rest still runs
        assert_eq!(steps.len(), 2);
        assert!(matches!(steps[0], MotionStep::RotateTo { .. }));
    }

    #[test]
    fn test_no_marker_is_empty_plan() {
        let layout = FieldLayout::new(vec![]).unwrap();
        let planner = StraightLinePlanner;
        let approach = ApproachPlanner::new(&layout, &planner);
        let odom = BlendedOdometry::new(0.0);

        let steps = approach.plan(
            &odom,
            ApproachRequest {
                role: MarkerRole::Scoring,
                side: ApproachSide::Right,
            },
            &ApproachConfig::default(),
        );
        assert!(steps.is_empty());
    }

    #[test]
    fn test_plan_uses_live_pose() {
        // Same request, different poses at plan time, different plans:
        // this is the deferred-construction property.
        let layout = layout_with_marker_at(6.0, 0.0);
        let planner = StraightLinePlanner;
        let approach = ApproachPlanner::new(&layout, &planner);
        let request = ApproachRequest {
            role: MarkerRole::Scoring,
            side: ApproachSide::Left,
        };
        let config = ApproachConfig::default();

        let mut odom = BlendedOdometry::new(0.0);
        let far = approach.plan(&odom, request, &config);
        assert_eq!(far.len(), 3);

        // Robot drove most of the way before the plan actually started
        odom.set_pose(5.0, 0.0, 0.0);
        let near = approach.plan(&odom, request, &config);
        assert_eq!(near.len(), 2);
    }
}
