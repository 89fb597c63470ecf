//! Configuration loading for DishaNav.
//!
//! All approach and vision tunables live here so they can be changed at
//! runtime without touching code. Components receive a reference to the
//! relevant section on every cycle and never cache individual values,
//! so edits to the live configuration take effect on the next cycle.
//!
//! The field revisions this was calibrated against disagreed on several
//! of these numbers (standoff distances, detection range ceiling), which
//! is exactly why they are configuration and not constants.

use crate::error::{DishaError, Result};
use serde::Deserialize;
use std::path::Path;

/// Main configuration structure
#[derive(Clone, Debug, Deserialize)]
pub struct DishaConfig {
    #[serde(default)]
    pub vision: VisionConfig,
    #[serde(default)]
    pub approach: ApproachConfig,
    #[serde(default)]
    pub docking: DockingConfig,
}

/// Camera fusion settings
#[derive(Clone, Debug, Deserialize)]
pub struct VisionConfig {
    /// Detections farther than this from the camera are dropped (meters).
    ///
    /// Long-range tag solves are low confidence and would pollute odometry.
    #[serde(default = "default_max_detection_range")]
    pub max_detection_range_m: f32,

    /// Freshness budget: cycles of "trustworthy" status granted by one
    /// accepted detection (default: 25, i.e. 0.5 s at 20 ms cycles).
    #[serde(default = "default_freshness_budget")]
    pub freshness_budget: u32,

    /// Blend gain applied by [`BlendedOdometry`](crate::odometry::BlendedOdometry)
    /// when folding a vision estimate into the running pose (0..1).
    #[serde(default = "default_vision_gain")]
    pub vision_gain: f32,
}

/// Destination and approach-planning settings
#[derive(Clone, Debug, Deserialize)]
pub struct ApproachConfig {
    /// Standoff in front of a scoring marker (meters, default: 0.35)
    #[serde(default = "default_scoring_standoff")]
    pub scoring_standoff_m: f32,

    /// Half the spacing between the two scoring slots (meters, default: 0.175).
    ///
    /// The slots sit ~0.33-0.35 m apart center to center, symmetric about
    /// the marker; left/right selection flips the sign of this offset.
    #[serde(default = "default_scoring_half_spacing")]
    pub scoring_half_spacing_m: f32,

    /// Standoff in front of a supply station marker (meters, default: 0.5)
    #[serde(default = "default_supply_standoff")]
    pub supply_standoff_m: f32,

    /// Small lateral bias at the supply station (meters, default: 0.0)
    #[serde(default = "default_supply_lateral_bias")]
    pub supply_lateral_bias_m: f32,

    /// Moves longer than this get a generated path before the final
    /// rotate-and-translate (meters, default: 2.0)
    #[serde(default = "default_long_range_threshold")]
    pub long_range_threshold_m: f32,
}

/// Docking sequence settings
#[derive(Clone, Debug, Deserialize)]
pub struct DockingConfig {
    /// Give up on an approach after this long (seconds, default: 10.0)
    #[serde(default = "default_approach_timeout")]
    pub approach_timeout_s: f32,

    /// Fixed eject run time; completion is not observable (seconds, default: 0.5)
    #[serde(default = "default_eject_duration")]
    pub eject_duration_s: f32,

    /// Ejector output while ejecting (volts, default: 3.0)
    #[serde(default = "default_eject_voltage")]
    pub eject_voltage: f32,

    /// Output while pulling a piece in; negative runs the rollers in
    /// reverse (volts, default: -2.0)
    #[serde(default = "default_intake_voltage")]
    pub intake_voltage: f32,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            max_detection_range_m: default_max_detection_range(),
            freshness_budget: default_freshness_budget(),
            vision_gain: default_vision_gain(),
        }
    }
}

impl Default for ApproachConfig {
    fn default() -> Self {
        Self {
            scoring_standoff_m: default_scoring_standoff(),
            scoring_half_spacing_m: default_scoring_half_spacing(),
            supply_standoff_m: default_supply_standoff(),
            supply_lateral_bias_m: default_supply_lateral_bias(),
            long_range_threshold_m: default_long_range_threshold(),
        }
    }
}

impl Default for DockingConfig {
    fn default() -> Self {
        Self {
            approach_timeout_s: default_approach_timeout(),
            eject_duration_s: default_eject_duration(),
            eject_voltage: default_eject_voltage(),
            intake_voltage: default_intake_voltage(),
        }
    }
}

impl Default for DishaConfig {
    fn default() -> Self {
        Self {
            vision: VisionConfig::default(),
            approach: ApproachConfig::default(),
            docking: DockingConfig::default(),
        }
    }
}

// Default value functions
fn default_max_detection_range() -> f32 {
    1.0
}
fn default_freshness_budget() -> u32 {
    25
}
fn default_vision_gain() -> f32 {
    0.05
}
fn default_scoring_standoff() -> f32 {
    0.35
}
fn default_scoring_half_spacing() -> f32 {
    0.175
}
fn default_supply_standoff() -> f32 {
    0.5
}
fn default_supply_lateral_bias() -> f32 {
    0.0
}
fn default_long_range_threshold() -> f32 {
    2.0
}
fn default_approach_timeout() -> f32 {
    10.0
}
fn default_eject_duration() -> f32 {
    0.5
}
fn default_eject_voltage() -> f32 {
    3.0
}
fn default_intake_voltage() -> f32 {
    -2.0
}

impl DishaConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| DishaError::Config(format!("Failed to read config file: {}", e)))?;
        let config: DishaConfig = toml::from_str(&content)?;
        Ok(config)
    }
}
