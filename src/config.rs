use std::path::Path;

use anyhow::{Context, Result};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::types::CameraPose;

/// Tuning constants for every navigation mode.
///
/// Missing fields in a JSON config fall back to the defaults below, so a
/// config file only needs to name what it changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Pose used at startup and by `reset_camera`
    pub default_pose: CameraPose,

    /// Fraction of the remaining distance covered per orbit tick
    pub seek_factor: f32,
    /// Orbit animation completes below this distance
    pub seek_epsilon: f32,

    /// Velocity added per tick while a movement key is held
    pub fly_speed: f32,
    /// Velocity multiplier applied every fly tick
    pub fly_damping: f32,
    /// Radians of yaw/pitch per pixel of pointer motion
    pub mouse_sensitivity: f32,
    /// Distance ahead of the eye at which fly and tour modes place the pose target
    pub look_distance: f32,

    /// Waypoints traversed per second
    pub tour_speed: f32,
    /// How far ahead on the path the tour camera looks, in waypoints
    pub tour_lookahead: f32,
    /// Per-tick lerp factor from the camera toward the spline point
    pub tour_position_lerp: f32,
    /// Per-tick slerp factor toward the look-ahead rotation
    pub tour_rotation_slerp: f32,
    /// Seed for waypoint sampling and jitter
    pub tour_seed: u64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            default_pose: CameraPose::new(Vec3::new(0.0, 5.0, 20.0), Vec3::ZERO),
            seek_factor: 0.08,
            seek_epsilon: 0.1,
            fly_speed: 0.01,
            fly_damping: 0.92,
            mouse_sensitivity: 0.002,
            look_distance: 10.0,
            tour_speed: 0.15,
            tour_lookahead: 0.3,
            tour_position_lerp: 0.05,
            tour_rotation_slerp: 0.03,
            tour_seed: 0x5eed,
        }
    }
}

impl NavigationConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse navigation config")
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::from_json_str(&text)
            .with_context(|| format!("Invalid config: {}", path.display()))
    }
}
