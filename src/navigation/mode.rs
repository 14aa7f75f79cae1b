/// Which component owns the camera pose
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NavigationMode {
    /// Idle orbit; the camera controller seeks focus targets
    #[default]
    Orbit,
    /// First-person flight driven by captured input
    Fly,
    /// Scripted tour along a closed spline
    AutoPilot,
}

/// A mode change, reported so the owner can run exit and enter hooks
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModeTransition {
    pub from: NavigationMode,
    pub to: NavigationMode,
}

impl ModeTransition {
    pub fn exited(&self, mode: NavigationMode) -> bool {
        self.from == mode
    }

    pub fn entered(&self, mode: NavigationMode) -> bool {
        self.to == mode
    }
}

/// Exclusive navigation state. Fly and AutoPilot can never both be active
/// because there is only one mode value and one way to change it.
#[derive(Clone, Debug, Default)]
pub struct ModeManager {
    mode: NavigationMode,
}

impl ModeManager {
    pub fn mode(&self) -> NavigationMode {
        self.mode
    }

    pub fn is_flying(&self) -> bool {
        self.mode == NavigationMode::Fly
    }

    pub fn is_autopilot(&self) -> bool {
        self.mode == NavigationMode::AutoPilot
    }

    /// Switch to `next`, returning the transition if anything changed
    pub fn set(&mut self, next: NavigationMode) -> Option<ModeTransition> {
        if self.mode == next {
            return None;
        }
        let transition = ModeTransition {
            from: self.mode,
            to: next,
        };
        self.mode = next;
        log::debug!("Navigation mode {:?} -> {:?}", transition.from, transition.to);
        Some(transition)
    }

    pub fn toggle_fly(&mut self) -> Option<ModeTransition> {
        self.toggle(NavigationMode::Fly)
    }

    pub fn toggle_autopilot(&mut self) -> Option<ModeTransition> {
        self.toggle(NavigationMode::AutoPilot)
    }

    fn toggle(&mut self, mode: NavigationMode) -> Option<ModeTransition> {
        if self.mode == mode {
            self.set(NavigationMode::Orbit)
        } else {
            self.set(mode)
        }
    }
}
