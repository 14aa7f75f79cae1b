use glam::Vec3;

use crate::navigation::NavigationMode;
use crate::types::{CameraPose, FocusTarget};

pub const DEFAULT_SEEK_FACTOR: f32 = 0.08;
pub const DEFAULT_SEEK_EPSILON: f32 = 0.1;

/// Owns the shared camera pose and the orbit-mode focus animation.
///
/// Fly and tour modes write the pose through [`CameraController::pose_mut`];
/// the navigator decides which writer runs on a given tick.
#[derive(Clone, Debug)]
pub struct CameraController {
    pose: CameraPose,
    request: Option<FocusTarget>,
    animating: bool,
    seek_factor: f32,
    epsilon: f32,
}

impl CameraController {
    pub fn new(pose: CameraPose) -> Self {
        Self {
            pose,
            request: None,
            animating: false,
            seek_factor: DEFAULT_SEEK_FACTOR,
            epsilon: DEFAULT_SEEK_EPSILON,
        }
    }

    pub fn with_smoothing(mut self, seek_factor: f32, epsilon: f32) -> Self {
        self.seek_factor = seek_factor.clamp(f32::EPSILON, 1.0);
        self.epsilon = epsilon.max(0.0);
        self
    }

    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    pub fn pose_mut(&mut self) -> &mut CameraPose {
        &mut self.pose
    }

    /// Replace any pending request; the animation restarts from the current pose
    pub fn request(&mut self, target: FocusTarget) {
        self.request = Some(target);
        self.animating = true;
    }

    pub fn current_request(&self) -> Option<FocusTarget> {
        self.request
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Jump to `pose` and drop the pending request
    pub fn reset(&mut self, pose: CameraPose) {
        self.pose = pose;
        self.request = None;
        self.animating = false;
    }

    /// Advance the focus animation one tick. Returns true while still moving.
    pub fn update(&mut self, mode: NavigationMode) -> bool {
        if mode != NavigationMode::Orbit || !self.animating {
            return false;
        }
        let Some(request) = self.request else {
            self.animating = false;
            return false;
        };

        self.pose.position += (request.position - self.pose.position) * self.seek_factor;
        self.pose.target += (request.look_at - self.pose.target) * self.seek_factor;

        if self.pose.position.distance(request.position) < self.epsilon {
            self.animating = false;
            log::debug!("Focus animation settled at {:?}", self.pose.position);
        }
        self.animating
    }

    pub fn distance_to_request(&self) -> Option<f32> {
        self.request
            .map(|r| self.pose.position.distance(r.position))
    }

    pub fn forward(&self) -> Vec3 {
        self.pose.forward()
    }
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new(CameraPose::default())
    }
}
