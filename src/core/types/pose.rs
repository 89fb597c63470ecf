//! Planar pose and point types.

use crate::core::math::{normalize_angle, rad_to_deg};
use serde::{Deserialize, Serialize};

/// A 2D point in meters.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    /// X coordinate in meters
    pub x: f32,
    /// Y coordinate in meters
    pub y: f32,
}

impl Point2D {
    /// Create a new point.
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Squared distance to another point (avoids sqrt).
    #[inline]
    pub fn distance_squared(&self, other: &Point2D) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(&self, other: &Point2D) -> f32 {
        self.distance_squared(other).sqrt()
    }
}

/// Robot pose on the field.
///
/// Position (x, y) in meters, heading (theta) in radians normalized
/// to [-π, π]. The field origin and axis convention come from the
/// marker layout; this type is convention-agnostic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose2D {
    /// X position in meters
    pub x: f32,
    /// Y position in meters
    pub y: f32,
    /// Heading in radians, normalized to [-π, π]
    pub theta: f32,
}

impl Pose2D {
    /// Create a new pose with theta normalized to [-π, π].
    #[inline]
    pub fn new(x: f32, y: f32, theta: f32) -> Self {
        Self {
            x,
            y,
            theta: normalize_angle(theta),
        }
    }

    /// Identity pose at origin with zero heading.
    #[inline]
    pub fn identity() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            theta: 0.0,
        }
    }

    /// Position component of this pose.
    #[inline]
    pub fn translation(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }

    /// Heading in degrees (for the drivetrain interface).
    #[inline]
    pub fn heading_degrees(&self) -> f32 {
        rad_to_deg(self.theta)
    }

    /// Compose this pose with a transform expressed in its own frame.
    ///
    /// `self ⊕ other`: translate by `other` rotated into `self`'s frame,
    /// add headings. This is the "transform by" operation used to step
    /// back from a marker and shift sideways into a slot.
    #[inline]
    pub fn compose(&self, other: &Pose2D) -> Pose2D {
        let (sin_t, cos_t) = self.theta.sin_cos();
        Pose2D::new(
            self.x + other.x * cos_t - other.y * sin_t,
            self.y + other.x * sin_t + other.y * cos_t,
            self.theta + other.theta,
        )
    }

    /// Inverse transform: `self ⊕ self.inverse() == identity`.
    #[inline]
    pub fn inverse(&self) -> Pose2D {
        let (sin_t, cos_t) = self.theta.sin_cos();
        Pose2D::new(
            -self.x * cos_t - self.y * sin_t,
            self.x * sin_t - self.y * cos_t,
            -self.theta,
        )
    }

    /// Rotate this pose around a pivot point by `angle` radians.
    ///
    /// Rotating a marker pose 180° around its own translation keeps the
    /// position and flips the heading, which is how scoring destinations
    /// face the marker instead of pointing away from it.
    pub fn rotate_around(&self, pivot: Point2D, angle: f32) -> Pose2D {
        let (sin_a, cos_a) = angle.sin_cos();
        let dx = self.x - pivot.x;
        let dy = self.y - pivot.y;
        Pose2D::new(
            pivot.x + dx * cos_a - dy * sin_a,
            pivot.y + dx * sin_a + dy * cos_a,
            self.theta + angle,
        )
    }

    /// Planar distance to a point.
    #[inline]
    pub fn distance_to(&self, point: &Point2D) -> f32 {
        self.translation().distance(point)
    }

    /// Field-frame bearing from this pose to a point (radians).
    #[inline]
    pub fn bearing_to(&self, point: &Point2D) -> f32 {
        (point.y - self.y).atan2(point.x - self.x)
    }
}

impl Default for Pose2D {
    fn default() -> Self {
        Self::identity()
    }
}
