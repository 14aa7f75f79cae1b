use std::time::Instant;

/// Longest step handed to the navigator; a stalled frame would otherwise
/// jump the tour along its path.
pub const MAX_FRAME_DELTA: f32 = 0.1;

/// Frame clock for real-time hosts
#[derive(Debug)]
pub struct Clock {
    last_tick: Instant,
    frames: u64,
}

impl Clock {
    /// Create new clock starting now
    pub fn new() -> Self {
        Self {
            last_tick: Instant::now(),
            frames: 0,
        }
    }

    /// Seconds since the previous tick, capped at [`MAX_FRAME_DELTA`]
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let delta = now.duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;
        self.frames += 1;
        delta.min(MAX_FRAME_DELTA)
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Reset clock to current time
    pub fn reset(&mut self) {
        self.last_tick = Instant::now();
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}
