//! Destination computation: from a marker pose to a robot target pose.

use crate::config::ApproachConfig;
use crate::core::types::Pose2D;
use crate::field::{Marker, MarkerRole};
use log::debug;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Which of the two scoring slots to line up with.
///
/// The slots sit left and right of the marker centerline. Supply
/// stations have a single slot; the side is ignored there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApproachSide {
    Left,
    Right,
}

/// Compute the robot's target pose for docking at a marker.
///
/// Pure function of the marker, the side and the tunables: identical
/// inputs give identical output, so it is safe to call as often as the
/// planner re-plans.
///
/// - Scoring markers: rotate the marker's planar pose 180° about its own
///   position so the robot faces the marker, then step back by the
///   scoring standoff and sideways by ± the half-spacing (right slot is
///   the negative lateral direction in the rotated frame).
/// - Supply markers: keep the marker's own heading (robot backs up to
///   the station), step forward along it by the supply standoff and
///   apply the small lateral bias.
/// - Role `None` falls back to supply-style handling; the resolver never
///   selects such markers as targets, so this only matters for direct calls.
pub fn compute_destination(marker: &Marker, side: ApproachSide, config: &ApproachConfig) -> Pose2D {
    let marker_pose = marker.pose.to_pose2d();

    let dest = match marker.role {
        MarkerRole::Scoring => {
            let facing = marker_pose.rotate_around(marker_pose.translation(), PI);
            let lateral = match side {
                ApproachSide::Right => -config.scoring_half_spacing_m,
                ApproachSide::Left => config.scoring_half_spacing_m,
            };
            facing.compose(&Pose2D::new(-config.scoring_standoff_m, lateral, 0.0))
        }
        MarkerRole::Supply | MarkerRole::None => marker_pose.compose(&Pose2D::new(
            config.supply_standoff_m,
            config.supply_lateral_bias_m,
            0.0,
        )),
    };

    debug!(
        "Destination for marker {} ({:?}, {:?}): ({:.2}, {:.2}, {:.1}°)",
        marker.id,
        marker.role,
        side,
        dest.x,
        dest.y,
        dest.heading_degrees()
    );
    dest
}
