// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::navigation::NavigationMode;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartMode {
    Orbit,
    Fly,
    Autopilot,
}

impl From<StartMode> for NavigationMode {
    fn from(mode: StartMode) -> Self {
        match mode {
            StartMode::Orbit => NavigationMode::Orbit,
            StartMode::Fly => NavigationMode::Fly,
            StartMode::Autopilot => NavigationMode::AutoPilot,
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(name = "cloud-nav")]
#[command(about = "Headless camera navigation over a point-cloud scene", long_about = None)]
pub struct Cli {
    /// Scene snapshot (clusters + terms JSON)
    pub scene: PathBuf,

    /// Navigation config JSON; defaults are used for missing fields
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of frames to simulate
    #[arg(long, default_value_t = 600)]
    pub ticks: u32,

    /// Simulated frame rate
    #[arg(long, default_value_t = 60.0)]
    pub fps: f32,

    /// Pace frames with the wall clock instead of a fixed step
    #[arg(long, default_value = "false")]
    pub realtime: bool,

    /// Navigation mode to enter before the first frame
    #[arg(long, value_enum, default_value = "orbit")]
    pub mode: StartMode,

    /// Initial focus, e.g. `category:leukemia`, `group:3`, `point:12`
    #[arg(long)]
    pub focus: Option<String>,

    /// Only show points of this category
    #[arg(long)]
    pub category: Option<String>,

    /// Override the tour seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the pose every N frames
    #[arg(long, default_value_t = 30)]
    pub every: u32,
}
