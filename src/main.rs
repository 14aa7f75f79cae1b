use anyhow::{bail, Context, Result};
use clap::Parser;
use serde_json::json;

use cloud_nav::cli::Cli;
use cloud_nav::core::Clock;
use cloud_nav::{Filter, FocusRequest, NavigationConfig, NavigationMode, Navigator, PointCloudStore};

fn load_config(cli: &Cli) -> Result<NavigationConfig> {
    let mut config = match &cli.config {
        Some(path) => NavigationConfig::from_json_file(path)?,
        None => NavigationConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.tour_seed = seed;
    }
    Ok(config)
}

fn enter_mode(navigator: &mut Navigator, mode: NavigationMode) {
    match mode {
        NavigationMode::Orbit => {}
        NavigationMode::Fly => {
            navigator.toggle_fly();
        }
        NavigationMode::AutoPilot => {
            navigator.toggle_autopilot();
        }
    }
}

fn print_pose(frame: u32, navigator: &Navigator) -> Result<()> {
    let pose = navigator.camera_pose();
    let line = json!({
        "frame": frame,
        "mode": format!("{:?}", navigator.mode()),
        "position": pose.position,
        "target": pose.target,
    });
    println!("{}", serde_json::to_string(&line).context("Failed to encode pose")?);
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    if cli.fps <= 0.0 {
        bail!("--fps must be positive, got {}", cli.fps);
    }

    let config = load_config(&cli)?;
    let store = PointCloudStore::from_json_file(&cli.scene)?;
    let mut navigator = Navigator::new(config, store);

    if let Some(category) = &cli.category {
        navigator.set_filter(Filter::category(category));
    }

    if let Some(text) = &cli.focus {
        let request = FocusRequest::parse(text)
            .with_context(|| format!("Unrecognized focus request: {}", text))?;
        if let Err(e) = navigator.request_focus(request) {
            eprintln!("Focus not found: {}", e);
        }
    }

    enter_mode(&mut navigator, cli.mode.into());

    let fixed_delta = 1.0 / cli.fps;
    let every = cli.every.max(1);
    let mut clock = Clock::new();

    for frame in 0..cli.ticks {
        let delta = if cli.realtime {
            std::thread::sleep(std::time::Duration::from_secs_f32(fixed_delta));
            clock.tick()
        } else {
            fixed_delta
        };

        navigator.tick(delta);

        if frame % every == 0 {
            print_pose(frame, &navigator)?;
        }
    }
    print_pose(cli.ticks, &navigator)?;

    Ok(())
}
