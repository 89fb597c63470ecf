//! DishaNav - Fiducial-marker field localization and docking approach
//! planning for mobile robots.
//!
//! # Architecture
//!
//! The crate is organized into layers, leaves first:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                     tasks/                          │  ← Sequencing
//! │          (docking coordinator, routes)              │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                  navigation/                        │  ← Planning
//! │        (resolver, destination, planner)             │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │              vision/    odometry                    │  ← Localization
//! │        (camera fusion, pose blending)               │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │              field/      core/                      │  ← Foundation
//! │        (marker registry, geometry, math)            │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Control model
//!
//! Everything runs on a single control thread at a fixed period
//! (~20 ms, owned by the external scheduler). Components expose `tick`
//! or `update` style entry points and never block: waiting is a state
//! that gets re-checked next cycle. Cameras submit pose candidates into
//! the shared odometry; planners read the latest pose as of the start
//! of their cycle.
//!
//! # Collaborator seams
//!
//! The drivetrain, lift, ejector and cameras are external. This crate
//! talks to them through narrow traits
//! ([`OdometrySource`], [`PathPlanner`], [`LiftActuator`], [`Ejector`],
//! [`CameraIo`]) so the whole docking pipeline runs unchanged against
//! hardware, simulation or test doubles.

pub mod config;
pub mod core;
pub mod error;
pub mod field;
pub mod navigation;
pub mod odometry;
pub mod tasks;
pub mod vision;

// Convenience re-exports (flat namespace for common use)

pub use crate::core::math;
pub use crate::core::types::{Point2D, Pose2D, Pose3D, Rotation3, Timestamped};

pub use config::{ApproachConfig, DishaConfig, DockingConfig, VisionConfig};
pub use error::{DishaError, Result};
pub use field::{FieldLayout, Marker, MarkerRole};
pub use navigation::{
    compute_destination, find_nearest, ApproachPlanner, ApproachRequest, ApproachSide, MotionStep,
    PathPlanner, PlannedPath, StraightLinePlanner,
};
pub use odometry::{BlendedOdometry, OdometrySource};
pub use tasks::{
    select_follow_up, DockState, DockingCoordinator, Ejector, LiftActuator, PickupSequencer,
    PickupState, Route, RouteTable,
};
pub use vision::{CameraIo, CameraMount, Detection, PoseFuser};
