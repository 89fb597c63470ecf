//! Angle arithmetic for planar navigation.
//!
//! Core geometry works in radians; the drivetrain and operator-facing
//! interfaces speak degrees, so conversions live here as well.

use std::f32::consts::PI;

/// Normalize angle to [-π, π].
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(2.0 * PI);
    if wrapped == 0.0 && angle > 0.0 {
        // rem_euclid maps exactly +π to 0; keep it at +π
        PI
    } else {
        wrapped - PI
    }
}

/// Shortest signed rotation from angle `a` to angle `b` (radians).
#[inline]
pub fn angle_diff(a: f32, b: f32) -> f32 {
    normalize_angle(b - a)
}

/// Degrees to radians.
#[inline]
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees * PI / 180.0
}

/// Radians to degrees.
#[inline]
pub fn rad_to_deg(radians: f32) -> f32 {
    radians * 180.0 / PI
}
