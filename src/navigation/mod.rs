pub mod fly;
pub mod mode;
pub mod tour;

pub use fly::{FlyInputHandler, MovementState};
pub use mode::{ModeManager, ModeTransition, NavigationMode};
pub use tour::{build_waypoints, look_rotation, TourPathGenerator};
