//! Minimal 3D rigid transforms for the tag → camera → robot chain.
//!
//! Marker poses and camera extrinsics are 3D (cameras are mounted above
//! the floor and often pitched down), but the robot lives on a planar
//! field. [`Pose3D`] carries just enough structure to compose and invert
//! the detection chain, then [`Pose3D::to_pose2d`] projects the result
//! onto the floor by dropping z, roll and pitch.

use super::{Point2D, Pose2D};
use serde::{Deserialize, Serialize};

/// 3D rotation stored as a row-major rotation matrix.
///
/// Built from intrinsic Z-Y-X Euler angles (yaw, then pitch, then roll),
/// the same convention the camera extrinsics are specified in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rotation3 {
    m: [[f32; 3]; 3],
}

impl Rotation3 {
    /// Identity rotation.
    pub fn identity() -> Self {
        Self {
            m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    /// Build from Euler angles in radians: R = Rz(yaw) · Ry(pitch) · Rx(roll).
    pub fn from_euler(roll: f32, pitch: f32, yaw: f32) -> Self {
        let (sr, cr) = roll.sin_cos();
        let (sp, cp) = pitch.sin_cos();
        let (sy, cy) = yaw.sin_cos();
        Self {
            m: [
                [cy * cp, cy * sp * sr - sy * cr, cy * sp * cr + sy * sr],
                [sy * cp, sy * sp * sr + cy * cr, sy * sp * cr - cy * sr],
                [-sp, cp * sr, cp * cr],
            ],
        }
    }

    /// Rotation about the vertical axis only.
    pub fn from_yaw(yaw: f32) -> Self {
        Self::from_euler(0.0, 0.0, yaw)
    }

    /// Compose: `self · other`.
    pub fn multiply(&self, other: &Rotation3) -> Rotation3 {
        let mut m = [[0.0f32; 3]; 3];
        for (i, row) in m.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = (0..3).map(|k| self.m[i][k] * other.m[k][j]).sum();
            }
        }
        Rotation3 { m }
    }

    /// Inverse rotation (transpose).
    pub fn transpose(&self) -> Rotation3 {
        let mut m = [[0.0f32; 3]; 3];
        for (i, row) in m.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = self.m[j][i];
            }
        }
        Rotation3 { m }
    }

    /// Rotate a vector.
    pub fn apply(&self, v: [f32; 3]) -> [f32; 3] {
        [
            self.m[0][0] * v[0] + self.m[0][1] * v[1] + self.m[0][2] * v[2],
            self.m[1][0] * v[0] + self.m[1][1] * v[1] + self.m[1][2] * v[2],
            self.m[2][0] * v[0] + self.m[2][1] * v[1] + self.m[2][2] * v[2],
        ]
    }

    /// Yaw component (rotation projected onto the floor plane).
    pub fn yaw(&self) -> f32 {
        self.m[1][0].atan2(self.m[0][0])
    }
}

/// A 3D pose: position in meters plus orientation.
///
/// Doubles as a rigid transform; `compose` chains transforms the way
/// the detection pipeline needs: field pose of the marker, composed
/// with the inverted camera-to-marker observation, composed with the
/// inverted camera mount, yields the robot's field pose.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose3D {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub rot: Rotation3,
}

impl Pose3D {
    /// Create from position and orientation.
    pub fn new(x: f32, y: f32, z: f32, rot: Rotation3) -> Self {
        Self { x, y, z, rot }
    }

    /// Pose at a position with only a yaw heading.
    pub fn from_planar(x: f32, y: f32, yaw: f32) -> Self {
        Self::new(x, y, 0.0, Rotation3::from_yaw(yaw))
    }

    /// Identity transform.
    pub fn identity() -> Self {
        Self::new(0.0, 0.0, 0.0, Rotation3::identity())
    }

    /// Apply `other` in this pose's frame: `self ⊕ other`.
    pub fn compose(&self, other: &Pose3D) -> Pose3D {
        let t = self.rot.apply([other.x, other.y, other.z]);
        Pose3D {
            x: self.x + t[0],
            y: self.y + t[1],
            z: self.z + t[2],
            rot: self.rot.multiply(&other.rot),
        }
    }

    /// Inverse transform.
    pub fn inverse(&self) -> Pose3D {
        let rot_inv = self.rot.transpose();
        let t = rot_inv.apply([-self.x, -self.y, -self.z]);
        Pose3D {
            x: t[0],
            y: t[1],
            z: t[2],
            rot: rot_inv,
        }
    }

    /// Project onto the floor plane: keep x, y and yaw; drop the rest.
    pub fn to_pose2d(&self) -> Pose2D {
        Pose2D::new(self.x, self.y, self.rot.yaw())
    }

    /// Planar position, ignoring elevation.
    pub fn translation2d(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }
}

impl Default for Pose3D {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_rotation_identity_apply() {
        let r = Rotation3::identity();
        let v = r.apply([1.0, 2.0, 3.0]);
        assert_relative_eq!(v[0], 1.0);
        assert_relative_eq!(v[1], 2.0);
        assert_relative_eq!(v[2], 3.0);
    }

    #[test]
    fn test_yaw_extraction() {
        let r = Rotation3::from_yaw(1.2);
        assert_relative_eq!(r.yaw(), 1.2, epsilon = 1e-6);
        // Pitch does not disturb the projected yaw
        let r = Rotation3::from_euler(0.0, 0.3, 1.2);
        assert_relative_eq!(r.yaw(), 1.2, epsilon = 1e-5);
    }

    #[test]
    fn test_rotation_transpose_is_inverse() {
        let r = Rotation3::from_euler(0.2, -0.4, 1.0);
        let round = r.multiply(&r.transpose());
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_relative_eq!(round.m[i][j], expected, epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn test_compose_inverse_roundtrip() {
        let p = Pose3D::new(1.0, -2.0, 0.5, Rotation3::from_euler(0.1, 0.2, 0.3));
        let round = p.compose(&p.inverse());
        assert_relative_eq!(round.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(round.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(round.z, 0.0, epsilon = 1e-5);
        assert_relative_eq!(round.rot.yaw(), 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_compose_yaw_frames() {
        // Facing +Y, one meter "forward" lands at +Y
        let p = Pose3D::from_planar(0.0, 0.0, FRAC_PI_2);
        let step = Pose3D::from_planar(1.0, 0.0, 0.0);
        let result = p.compose(&step);
        assert_relative_eq!(result.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(result.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_to_pose2d_projection() {
        // Elevated, pitched camera-style pose still projects cleanly
        let p = Pose3D::new(4.0, 2.0, 1.3, Rotation3::from_euler(0.0, -0.2, PI));
        let flat = p.to_pose2d();
        assert_relative_eq!(flat.x, 4.0);
        assert_relative_eq!(flat.y, 2.0);
        assert_relative_eq!(flat.theta.abs(), PI, epsilon = 1e-5);
    }

    #[test]
    fn test_detection_chain() {
        // Marker at (6, 3) facing back toward -X; camera mounted at robot
        // center sees it 1 m straight ahead. Robot must be at (5, 3), yaw 0.
        let marker = Pose3D::from_planar(6.0, 3.0, PI);
        let camera_to_target = Pose3D::from_planar(1.0, 0.0, PI);
        let mount = Pose3D::identity();

        let robot = marker
            .compose(&camera_to_target.inverse())
            .compose(&mount.inverse())
            .to_pose2d();
        assert_relative_eq!(robot.x, 5.0, epsilon = 1e-5);
        assert_relative_eq!(robot.y, 3.0, epsilon = 1e-5);
        assert_relative_eq!(robot.theta, 0.0, epsilon = 1e-5);
    }
}
