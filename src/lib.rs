pub mod camera;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod focus;
pub mod math;
pub mod navigation;
pub mod navigator;
pub mod selection;
pub mod store;
pub mod traits;
pub mod types;

pub use camera::CameraController;
pub use config::NavigationConfig;
pub use error::NavError;
pub use focus::{FocusRequest, FocusResolver};
pub use navigation::NavigationMode;
pub use navigator::{FocusAttempt, Navigator};
pub use selection::{ComparisonMetrics, ComparisonState, SelectionState};
pub use store::{Filter, PointCloudStore};
pub use types::{CameraPose, Group, Point};
