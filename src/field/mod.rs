//! Field marker registry.
//!
//! A [`FieldLayout`] is the static catalog of fiducial markers and their
//! surveyed field poses, loaded once at startup and never mutated. Each
//! marker carries an explicit [`MarkerRole`] so the approach logic can
//! filter for scoring structures versus supply stations without keeping
//! separate id lists scattered through the code.

use crate::core::math::deg_to_rad;
use crate::core::types::{Point2D, Pose3D, Rotation3};
use crate::error::{DishaError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Semantic role of a field marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerRole {
    /// Marker on a scoring structure; approaches face the marker and
    /// offer a left/right slot selection.
    Scoring,

    /// Marker at a supply pickup station; single approach slot, robot
    /// keeps its back to the station.
    Supply,

    /// Marker that exists on the field but is never a docking target.
    #[default]
    None,
}

/// A fiducial marker with a known field pose. Immutable after load.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    /// Fiducial id as reported by the detector.
    pub id: u32,
    /// Surveyed field pose of the marker.
    pub pose: Pose3D,
    /// Semantic role for target selection.
    pub role: MarkerRole,
}

impl Marker {
    /// Create a marker.
    pub fn new(id: u32, pose: Pose3D, role: MarkerRole) -> Self {
        Self { id, pose, role }
    }

    /// Marker position projected onto the floor plane.
    pub fn position(&self) -> Point2D {
        self.pose.translation2d()
    }
}

/// Serialized form of a marker in a layout file.
#[derive(Debug, Deserialize)]
struct MarkerEntry {
    id: u32,
    x: f32,
    y: f32,
    #[serde(default)]
    z: f32,
    /// Marker facing in degrees
    yaw_deg: f32,
    #[serde(default)]
    role: MarkerRole,
}

#[derive(Debug, Deserialize)]
struct LayoutFile {
    marker: Vec<MarkerEntry>,
}

/// Static catalog of all markers on the field.
#[derive(Debug, Clone, Default)]
pub struct FieldLayout {
    markers: Vec<Marker>,
}

impl FieldLayout {
    /// Build a layout from a list of markers.
    ///
    /// Duplicate ids are rejected; a layout with two poses for one id
    /// would make every detection of that id ambiguous.
    pub fn new(markers: Vec<Marker>) -> Result<Self> {
        for (i, m) in markers.iter().enumerate() {
            if markers[..i].iter().any(|other| other.id == m.id) {
                return Err(DishaError::Layout(format!("Duplicate marker id {}", m.id)));
            }
        }
        Ok(Self { markers })
    }

    /// The stock competition field: twelve scoring markers on the two
    /// hexagonal structures (ids 6-11 and 17-22) and four supply-station
    /// markers (ids 1, 2, 12 and 13), at their surveyed poses.
    ///
    /// Real deployments load a surveyed layout file instead; this is the
    /// out-of-the-box table for simulation, demos and tests.
    pub fn stock_field() -> Self {
        fn m(id: u32, x: f32, y: f32, z: f32, yaw_deg: f32, role: MarkerRole) -> Marker {
            Marker::new(
                id,
                Pose3D::new(x, y, z, Rotation3::from_yaw(deg_to_rad(yaw_deg))),
                role,
            )
        }
        let s = MarkerRole::Scoring;
        let p = MarkerRole::Supply;
        let markers = vec![
            // Far-side scoring structure
            m(6, 13.474, 3.306, 0.308, 300.0, s),
            m(7, 13.890, 4.026, 0.308, 0.0, s),
            m(8, 13.474, 4.745, 0.308, 60.0, s),
            m(9, 13.058, 4.745, 0.308, 120.0, s),
            m(10, 12.643, 4.026, 0.308, 180.0, s),
            m(11, 13.058, 3.306, 0.308, 240.0, s),
            // Near-side scoring structure
            m(17, 4.074, 3.306, 0.308, 240.0, s),
            m(18, 3.658, 4.026, 0.308, 180.0, s),
            m(19, 4.074, 4.745, 0.308, 120.0, s),
            m(20, 4.905, 4.745, 0.308, 60.0, s),
            m(21, 5.321, 4.026, 0.308, 0.0, s),
            m(22, 4.905, 3.306, 0.308, 300.0, s),
            // Supply stations in the four corners
            m(1, 16.697, 0.655, 1.355, 126.0, p),
            m(2, 16.697, 7.396, 1.355, 234.0, p),
            m(12, 0.851, 0.655, 1.355, 54.0, p),
            m(13, 0.851, 7.396, 1.355, 306.0, p),
        ];
        // Ids above are distinct by construction
        Self { markers }
    }

    /// Load a layout from a TOML file of `[[marker]]` tables.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| DishaError::Layout(format!("Failed to read layout file: {}", e)))?;
        let file: LayoutFile =
            toml::from_str(&content).map_err(|e| DishaError::Layout(e.to_string()))?;
        let markers = file
            .marker
            .into_iter()
            .map(|m| {
                Marker::new(
                    m.id,
                    Pose3D::new(m.x, m.y, m.z, Rotation3::from_yaw(deg_to_rad(m.yaw_deg))),
                    m.role,
                )
            })
            .collect();
        Self::new(markers)
    }

    /// All markers on the field.
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Look up a marker by id.
    pub fn marker(&self, id: u32) -> Option<&Marker> {
        self.markers.iter().find(|m| m.id == id)
    }

    /// Field pose for a marker id. `None` means the detection should be
    /// ignored, not that anything is broken.
    pub fn marker_pose(&self, id: u32) -> Option<Pose3D> {
        self.marker(id).map(|m| m.pose)
    }

    /// Markers belonging to a role, in layout order.
    pub fn members_of(&self, role: MarkerRole) -> impl Iterator<Item = &Marker> {
        self.markers.iter().filter(move |m| m.role == role)
    }
}
