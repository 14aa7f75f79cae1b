use glam::Vec2;

/// Input button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    KeyW,
    KeyA,
    KeyS,
    KeyD,
    KeyQ,
    KeyE,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Space,
    Shift,
    Escape,
    MouseLeft,
    MouseRight,
}

/// Platform-independent input capability.
///
/// Hosts buffer raw events between frames; the navigator drains them once
/// per frame, so nothing is applied mid-tick.
pub trait InputSource {
    /// Check if button is currently down
    fn is_down(&self, button: Button) -> bool;

    /// Relative pointer motion accumulated since the last call
    fn take_motion(&mut self) -> Vec2;

    /// Press edges since the last call, oldest first
    fn take_presses(&mut self) -> Vec<Button>;
}
