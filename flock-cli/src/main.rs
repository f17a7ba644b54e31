use anyhow::{Context, Result};
use clap::Parser;
use flock_shared::FlockSettings;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless flocking simulation driver", long_about = None)]
struct Args {
    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 600)]
    frames: u64,

    /// Number of agents (overrides the settings file)
    #[arg(short, long)]
    count: Option<usize>,

    /// Fixed simulation rate in frames per second
    #[arg(long, default_value_t = 60.0)]
    fps: f32,

    /// JSON settings file; defaults apply when omitted
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Wrap agent positions at the domain edges
    #[arg(short, long)]
    wrap: bool,

    /// Print the final state of every agent as JSON lines
    #[arg(short, long)]
    report: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    let mut settings = match &args.settings {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading settings file {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing settings file {}", path.display()))?
        }
        None => FlockSettings::default(),
    };
    if let Some(count) = args.count {
        settings.agent_count = count;
    }
    if args.wrap {
        settings.wrap_edges = true;
    }
    anyhow::ensure!(args.fps > 0.0, "fps must be positive");
    anyhow::ensure!(
        settings.profile.perception_radius > 0.0,
        "perception radius must be positive"
    );

    let dt = 1.0 / args.fps;
    log::info!(
        "Simulating {} agents for {} frames at {} fps",
        settings.agent_count,
        args.frames,
        args.fps
    );

    let mut flock = flock_cli::build_flock(&settings);
    flock_cli::run(&mut flock, args.frames, dt);

    if args.report {
        for report in flock_cli::agent_reports(&flock) {
            println!("{}", serde_json::to_string(&report)?);
        }
    }
    let summary = flock_cli::summarize(&flock, args.frames);
    println!("{}", serde_json::to_string(&summary)?);

    Ok(())
}
