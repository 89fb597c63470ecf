//! Nearest-marker resolution.

use crate::core::types::Pose2D;
use crate::field::{FieldLayout, Marker, MarkerRole};
use log::debug;

/// Find the marker of the given role closest to `pose` in the plane.
///
/// Ties go to the first minimum in layout order. Returns `None` when no
/// marker carries the role; callers treat that as "nothing to do", not
/// as a failure.
pub fn find_nearest<'a>(
    pose: &Pose2D,
    role: MarkerRole,
    layout: &'a FieldLayout,
) -> Option<&'a Marker> {
    let mut nearest: Option<(&Marker, f32)> = None;
    for marker in layout.members_of(role) {
        let d = pose.distance_to(&marker.position());
        match nearest {
            Some((_, best)) if d >= best => {}
            _ => nearest = Some((marker, d)),
        }
    }
    if let Some((marker, d)) = nearest {
        debug!("Nearest {:?} marker: {} at {:.2} m", role, marker.id, d);
    }
    nearest.map(|(marker, _)| marker)
}
