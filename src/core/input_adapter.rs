use std::collections::HashSet;

use glam::Vec2;
use winit::event::{DeviceEvent, ElementState, MouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::traits::{Button, InputSource};

/// Adapter that bridges Winit events to the InputSource trait
#[derive(Debug, Clone, Default)]
pub struct WinitController {
    state: ButtonState,
}

impl WinitController {
    /// Create a new WinitController with no pressed keys
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a Winit WindowEvent and update internal state
    pub fn process_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(keycode) = event.physical_key {
                    if let Some(button) = Self::keycode_to_button(keycode) {
                        self.state.set(button, event.state == ElementState::Pressed);
                    }
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(btn) = Self::mouse_button_to_button(*button) {
                    self.state.set(btn, *state == ElementState::Pressed);
                }
            }
            // Keys held while focus leaves would otherwise stick
            WindowEvent::Focused(false) => self.state.release_all(),
            _ => {}
        }
    }

    /// Raw pointer motion arrives as a device event, independent of cursor position
    pub fn process_device_event(&mut self, event: &DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.state.motion += Vec2::new(delta.0 as f32, delta.1 as f32);
        }
    }

    /// Map Winit KeyCode to Button
    fn keycode_to_button(keycode: KeyCode) -> Option<Button> {
        match keycode {
            KeyCode::KeyW => Some(Button::KeyW),
            KeyCode::KeyA => Some(Button::KeyA),
            KeyCode::KeyS => Some(Button::KeyS),
            KeyCode::KeyD => Some(Button::KeyD),
            KeyCode::KeyQ => Some(Button::KeyQ),
            KeyCode::KeyE => Some(Button::KeyE),
            KeyCode::ArrowUp => Some(Button::ArrowUp),
            KeyCode::ArrowDown => Some(Button::ArrowDown),
            KeyCode::ArrowLeft => Some(Button::ArrowLeft),
            KeyCode::ArrowRight => Some(Button::ArrowRight),
            KeyCode::Space => Some(Button::Space),
            KeyCode::ShiftLeft | KeyCode::ShiftRight => Some(Button::Shift),
            KeyCode::Escape => Some(Button::Escape),
            _ => None,
        }
    }

    /// Map Winit MouseButton to Button
    fn mouse_button_to_button(button: MouseButton) -> Option<Button> {
        match button {
            MouseButton::Left => Some(Button::MouseLeft),
            MouseButton::Right => Some(Button::MouseRight),
            _ => None,
        }
    }
}

impl InputSource for WinitController {
    fn is_down(&self, button: Button) -> bool {
        self.state.is_down(button)
    }

    fn take_motion(&mut self) -> Vec2 {
        std::mem::take(&mut self.state.motion)
    }

    fn take_presses(&mut self) -> Vec<Button> {
        std::mem::take(&mut self.state.presses)
    }
}

/// Programmable input for headless hosts and synthetic-frame tests
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    state: ButtonState,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, button: Button) -> &mut Self {
        self.state.set(button, true);
        self
    }

    pub fn release(&mut self, button: Button) -> &mut Self {
        self.state.set(button, false);
        self
    }

    /// Press and release within one frame
    pub fn tap(&mut self, button: Button) -> &mut Self {
        self.press(button).release(button)
    }

    pub fn move_pointer(&mut self, dx: f32, dy: f32) -> &mut Self {
        self.state.motion += Vec2::new(dx, dy);
        self
    }
}

impl InputSource for ScriptedInput {
    fn is_down(&self, button: Button) -> bool {
        self.state.is_down(button)
    }

    fn take_motion(&mut self) -> Vec2 {
        std::mem::take(&mut self.state.motion)
    }

    fn take_presses(&mut self) -> Vec<Button> {
        std::mem::take(&mut self.state.presses)
    }
}

/// Shared bookkeeping for held buttons, press edges and pointer motion
#[derive(Debug, Clone, Default)]
struct ButtonState {
    /// Currently pressed buttons
    pressed_keys: HashSet<Button>,
    presses: Vec<Button>,
    motion: Vec2,
}

impl ButtonState {
    fn set(&mut self, button: Button, down: bool) {
        if down {
            // Key repeat does not produce a new edge
            if self.pressed_keys.insert(button) {
                self.presses.push(button);
            }
        } else {
            self.pressed_keys.remove(&button);
        }
    }

    fn is_down(&self, button: Button) -> bool {
        self.pressed_keys.contains(&button)
    }

    fn release_all(&mut self) {
        self.pressed_keys.clear();
    }
}
