use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::{Quat, Vec2, Vec3};

use crate::config::NavigationConfig;
use crate::error::Result;
use crate::traits::{Button, InputSource, PointerCapture};
use crate::types::CameraPose;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MovementState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl MovementState {
    pub fn from_input(input: &dyn InputSource) -> Self {
        let any = |a: Button, b: Button| input.is_down(a) || input.is_down(b);
        Self {
            forward: any(Button::KeyW, Button::ArrowUp),
            backward: any(Button::KeyS, Button::ArrowDown),
            left: any(Button::KeyA, Button::ArrowLeft),
            right: any(Button::KeyD, Button::ArrowRight),
            up: any(Button::Space, Button::KeyE),
            down: any(Button::Shift, Button::KeyQ),
        }
    }

    const fn to_direction(positive: bool, negative: bool) -> f32 {
        match (positive, negative) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        }
    }

    /// Unit direction in camera space (-Z forward), zero when idle
    pub fn local_direction(&self) -> Vec3 {
        Vec3::new(
            Self::to_direction(self.right, self.left),
            Self::to_direction(self.up, self.down),
            Self::to_direction(self.backward, self.forward),
        )
        .normalize_or_zero()
    }

    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }
}

/// First-person flight with pointer-look and inertial movement.
///
/// Input is gathered by [`FlyInputHandler::ingest`] and applied on the next
/// [`FlyInputHandler::update`]. Nothing happens while detached.
#[derive(Debug, Clone)]
pub struct FlyInputHandler {
    attached: bool,
    captured: bool,
    movement: MovementState,
    pending_motion: Vec2,
    yaw: f32,
    pitch: f32,
    orientation: Quat,
    velocity: Vec3,
    speed: f32,
    damping: f32,
    sensitivity: f32,
    look_distance: f32,
}

impl FlyInputHandler {
    pub fn new(config: &NavigationConfig) -> Self {
        Self {
            attached: false,
            captured: false,
            movement: MovementState::default(),
            pending_motion: Vec2::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            orientation: Quat::IDENTITY,
            velocity: Vec3::ZERO,
            speed: config.fly_speed,
            damping: config.fly_damping,
            sensitivity: config.mouse_sensitivity,
            look_distance: config.look_distance,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn is_captured(&self) -> bool {
        self.captured
    }

    pub fn movement(&self) -> MovementState {
        self.movement
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::NEG_Z
    }

    /// Start listening, looking the way the pose already looks
    pub fn attach(&mut self, pose: &CameraPose) {
        let dir = pose.forward();
        self.yaw = (-dir.x).atan2(-dir.z);
        self.pitch = dir.y.clamp(-1.0, 1.0).asin();
        self.rebuild_orientation();
        self.velocity = Vec3::ZERO;
        self.pending_motion = Vec2::ZERO;
        self.movement = MovementState::default();
        self.attached = true;
    }

    /// Stop listening and hand the pointer back
    pub fn detach(&mut self, capture: &mut dyn PointerCapture) {
        if self.captured {
            capture.release();
        }
        self.attached = false;
        self.captured = false;
        self.movement = MovementState::default();
        self.pending_motion = Vec2::ZERO;
        self.velocity = Vec3::ZERO;
    }

    /// Drain one frame of input. A denied capture request is returned, but
    /// the handler stays attached so the next click can retry.
    pub fn ingest(
        &mut self,
        input: &mut dyn InputSource,
        capture: &mut dyn PointerCapture,
    ) -> Result<()> {
        let presses = input.take_presses();
        let motion = input.take_motion();
        if !self.attached {
            return Ok(());
        }

        // The platform can drop the lock on its own (focus loss, browser Esc)
        if self.captured && !capture.is_captured() {
            log::debug!("Pointer lock lost outside fly mode");
            self.captured = false;
            self.movement = MovementState::default();
            self.pending_motion = Vec2::ZERO;
        }

        let mut outcome = Ok(());
        for button in presses {
            match button {
                Button::MouseLeft if !self.captured => match capture.request() {
                    Ok(()) => {
                        self.captured = true;
                        log::debug!("Pointer captured for fly mode");
                    }
                    Err(e) => {
                        log::warn!("Fly mode inert: {}", e);
                        outcome = Err(e);
                    }
                },
                Button::Escape if self.captured => {
                    capture.release();
                    self.captured = false;
                    self.movement = MovementState::default();
                    self.pending_motion = Vec2::ZERO;
                }
                _ => {}
            }
        }

        if self.captured {
            self.movement = MovementState::from_input(input);
            self.pending_motion += motion;
        }
        outcome
    }

    /// One frame of flight. Damping runs every tick, so the camera glides to
    /// a stop after keys are released.
    pub fn update(&mut self, pose: &mut CameraPose) {
        if !self.attached {
            return;
        }

        if self.pending_motion != Vec2::ZERO {
            let motion = std::mem::take(&mut self.pending_motion);
            self.yaw = wrap_angle(self.yaw - motion.x * self.sensitivity);
            self.pitch = (self.pitch - motion.y * self.sensitivity).clamp(-FRAC_PI_2, FRAC_PI_2);
            self.rebuild_orientation();
        }

        let world = self.orientation * self.movement.local_direction();
        self.velocity = self.velocity * self.damping + world * self.speed;

        pose.position += self.velocity;
        pose.target = pose.position + self.forward() * self.look_distance;
    }

    /// Yaw about world up, then pitch about the yawed right axis
    fn rebuild_orientation(&mut self) {
        self.orientation = Quat::from_rotation_y(self.yaw) * Quat::from_rotation_x(self.pitch);
    }
}

fn wrap_angle(angle: f32) -> f32 {
    (angle + PI).rem_euclid(TAU) - PI
}
