use crate::error::Result;

/// Exclusive pointer capture (pointer lock) provided by the host window
pub trait PointerCapture {
    /// Ask the platform for raw relative pointer motion
    fn request(&mut self) -> Result<()>;

    /// Give the pointer back. Safe to call when not captured.
    fn release(&mut self);

    fn is_captured(&self) -> bool;
}

/// Capture that always succeeds, for headless hosts and tests
#[derive(Debug, Default, Clone)]
pub struct VirtualCapture {
    captured: bool,
}

impl PointerCapture for VirtualCapture {
    fn request(&mut self) -> Result<()> {
        self.captured = true;
        Ok(())
    }

    fn release(&mut self) {
        self.captured = false;
    }

    fn is_captured(&self) -> bool {
        self.captured
    }
}
