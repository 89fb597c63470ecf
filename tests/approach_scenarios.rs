//! End-to-end approach scenarios: localization, destination geometry
//! and plan shape, exercised through the public API the way a robot
//! program would wire it.

use approx::assert_relative_eq;
use disha_nav::{
    compute_destination, ApproachConfig, ApproachPlanner, ApproachRequest, ApproachSide,
    BlendedOdometry, DishaError, FieldLayout, Marker, MarkerRole, MotionStep, OdometrySource,
    PathPlanner, PlannedPath, Pose2D, Pose3D, Result, StraightLinePlanner, VisionConfig,
};
use std::f32::consts::PI;

/// Path generator that can be forced to fail, to prove degradation.
struct FlakyPlanner {
    fail: bool,
}

impl PathPlanner for FlakyPlanner {
    fn plan(&self, from: &Pose2D, to: &Pose2D, bearing_deg: f32) -> Result<PlannedPath> {
        if self.fail {
            Err(DishaError::Planning("generator rejected request".into()))
        } else {
            StraightLinePlanner.plan(from, to, bearing_deg)
        }
    }
}

fn scoring_marker(id: u32, x: f32, y: f32, yaw: f32) -> Marker {
    Marker::new(id, Pose3D::from_planar(x, y, yaw), MarkerRole::Scoring)
}

fn request(side: ApproachSide) -> ApproachRequest {
    ApproachRequest {
        role: MarkerRole::Scoring,
        side,
    }
}

/// Scenario A: scoring destination geometry for a marker at (5, 3)
/// facing 180°, right slot selected.
#[test]
fn scenario_a_scoring_destination_geometry() {
    let config = ApproachConfig::default();
    let marker = scoring_marker(6, 5.0, 3.0, PI);

    let dest = compute_destination(&marker, ApproachSide::Right, &config);

    // 0.35 back along the reversed heading, 0.175 to the right,
    // final heading 180° rotated from the marker's 180°
    assert_relative_eq!(dest.x, 5.0 - config.scoring_standoff_m, epsilon = 1e-5);
    assert_relative_eq!(dest.y, 3.0 - config.scoring_half_spacing_m, epsilon = 1e-5);
    assert_relative_eq!(dest.theta, 0.0, epsilon = 1e-5);
}

/// Scenario B: a 1 m move stays below the long-range threshold and
/// plans exactly rotate + translate.
#[test]
fn scenario_b_short_move_two_steps() {
    let config = ApproachConfig::default();
    // Destination comes out at (1.0, 0.0, 0°) for this marker
    let layout = FieldLayout::new(vec![scoring_marker(
        6,
        1.0 + config.scoring_standoff_m,
        -config.scoring_half_spacing_m,
        PI,
    )])
    .unwrap();
    let path_gen = StraightLinePlanner;
    let planner = ApproachPlanner::new(&layout, &path_gen);
    let odom = BlendedOdometry::new(0.0);

    let steps = planner.plan(&odom, request(ApproachSide::Left), &config);

    assert_eq!(steps.len(), 2);
    match (&steps[0], &steps[1]) {
        (
            MotionStep::RotateTo { heading_deg },
            MotionStep::TranslateTo {
                x,
                y,
                heading_deg: hold,
            },
        ) => {
            assert_relative_eq!(*heading_deg, 0.0, epsilon = 1e-3);
            assert_relative_eq!(*x, 1.0, epsilon = 1e-4);
            assert_relative_eq!(*y, 0.0, epsilon = 1e-4);
            // Translate holds the same final heading
            assert_relative_eq!(*hold, *heading_deg, epsilon = 1e-6);
        }
        other => panic!("Unexpected plan shape: {:?}", other),
    }
}

/// Scenario C: a 5 m move is long-range. Three steps when path
/// generation works, two when it is forced to fail.
#[test]
fn scenario_c_long_move_path_step_optional() {
    let config = ApproachConfig::default();
    let layout = FieldLayout::new(vec![scoring_marker(
        6,
        5.0 + config.scoring_standoff_m,
        config.scoring_half_spacing_m,
        PI,
    )])
    .unwrap();
    let odom = BlendedOdometry::new(0.0);

    let working = FlakyPlanner { fail: false };
    let planner = ApproachPlanner::new(&layout, &working);
    let steps = planner.plan(&odom, request(ApproachSide::Right), &config);
    assert_eq!(steps.len(), 3);
    assert!(matches!(steps[0], MotionStep::FollowPath { .. }));
    assert!(matches!(steps[1], MotionStep::RotateTo { .. }));
    assert!(matches!(steps[2], MotionStep::TranslateTo { .. }));

    let broken = FlakyPlanner { fail: true };
    let planner = ApproachPlanner::new(&layout, &broken);
    let steps = planner.plan(&odom, request(ApproachSide::Right), &config);
    assert_eq!(steps.len(), 2);
    assert!(matches!(steps[0], MotionStep::RotateTo { .. }));
    assert!(matches!(steps[1], MotionStep::TranslateTo { .. }));
}

/// Scenario D: no marker matches the role filter; planning is a no-op,
/// never an error.
#[test]
fn scenario_d_no_marker_empty_plan() {
    let layout = FieldLayout::new(vec![Marker::new(
        3,
        Pose3D::from_planar(2.0, 2.0, 0.0),
        MarkerRole::None,
    )])
    .unwrap();
    let path_gen = StraightLinePlanner;
    let planner = ApproachPlanner::new(&layout, &path_gen);
    let odom = BlendedOdometry::new(0.0);

    let steps = planner.plan(
        &odom,
        ApproachRequest {
            role: MarkerRole::Supply,
            side: ApproachSide::Left,
        },
        &ApproachConfig::default(),
    );
    assert!(steps.is_empty());
}

/// The stock field resolves and plans without any hand-built layout.
#[test]
fn stock_field_nearest_approach() {
    let config = ApproachConfig::default();
    let layout = FieldLayout::stock_field();
    let path_gen = StraightLinePlanner;
    let planner = ApproachPlanner::new(&layout, &path_gen);

    // Parked just west of the near-side structure: marker 18 is closest
    let mut odom = BlendedOdometry::new(0.0);
    odom.set_pose(3.0, 4.026, 0.0);

    let steps = planner.plan(&odom, request(ApproachSide::Right), &config);
    assert_eq!(steps.len(), 2);
    match &steps[1] {
        MotionStep::TranslateTo { x, y, .. } => {
            // Marker 18 sits at (3.658, 4.026) facing 180°
            assert_relative_eq!(*x, 3.658 - config.scoring_standoff_m, epsilon = 1e-4);
            assert_relative_eq!(*y, 4.026 - config.scoring_half_spacing_m, epsilon = 1e-4);
        }
        other => panic!("Unexpected final step: {:?}", other),
    }
}

/// Vision-to-plan pipeline: a camera detection localizes the robot,
/// and the subsequent plan reflects the corrected pose.
#[test]
fn camera_detection_feeds_approach_plan() {
    use disha_nav::{CameraIo, CameraMount, Detection, PoseFuser};

    struct OneShotCamera {
        detection: Option<Detection>,
    }

    impl CameraIo for OneShotCamera {
        fn is_connected(&self) -> bool {
            true
        }

        fn poll_unread_detections(&mut self) -> Vec<Detection> {
            self.detection.take().into_iter().collect()
        }
    }

    let approach_config = ApproachConfig::default();
    let layout = FieldLayout::new(vec![scoring_marker(6, 6.0, 3.0, PI)]).unwrap();

    // Full-trust blend so one detection fixes the pose outright
    let mut odom = BlendedOdometry::new(1.0);
    let mut fuser = PoseFuser::new(CameraMount::new("front", 0.0, 0.0, 0.0, 0.0, 0.0));
    let mut camera = OneShotCamera {
        detection: Some(Detection {
            marker_id: 6,
            range: 0.9,
            camera_to_target: Pose3D::from_planar(0.9, 0.0, PI),
            timestamp_us: 1_000_000,
        }),
    };

    fuser.update(
        &mut camera,
        &layout,
        &mut odom,
        &VisionConfig::default(),
    );
    assert!(fuser.is_healthy());

    // Robot localized 0.9 m in front of the tag, facing it
    let pose = odom.pose();
    assert_relative_eq!(pose.x, 5.1, epsilon = 1e-4);
    assert_relative_eq!(pose.y, 3.0, epsilon = 1e-4);

    // Planned from the corrected pose: well inside short range
    let path_gen = StraightLinePlanner;
    let planner = ApproachPlanner::new(&layout, &path_gen);
    let steps = planner.plan(&odom, request(ApproachSide::Left), &approach_config);
    assert_eq!(steps.len(), 2);
    match &steps[1] {
        MotionStep::TranslateTo { x, y, .. } => {
            assert_relative_eq!(*x, 6.0 - approach_config.scoring_standoff_m, epsilon = 1e-4);
            assert_relative_eq!(
                *y,
                3.0 + approach_config.scoring_half_spacing_m,
                epsilon = 1e-4
            );
        }
        other => panic!("Unexpected final step: {:?}", other),
    }
}
