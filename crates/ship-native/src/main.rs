use anyhow::{Context, Result};
use clap::Parser;
use instant::Instant;
use ship_core::{new_node, FlightConfig, InputState, ShipRig};
use std::path::PathBuf;

mod script;

use script::{Playback, Script};

/// Replays a key timeline through the ship rig at a fixed frame rate and
/// logs the ship transform and jet state.
#[derive(Parser, Debug)]
#[command(name = "ship-native", version, about)]
struct Args {
    /// Flight config JSON (motion constants, key bindings, exhaust)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Key timeline JSON; the built-in demo runs when omitted
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Simulated frames per second
    #[arg(long, default_value_t = 60.0)]
    fps: f32,

    /// Seed for the exhaust emitters
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Log the transform every N frames
    #[arg(long, default_value_t = 30)]
    log_every: u32,

    /// Print the effective config as JSON and exit
    #[arg(long)]
    dump_config: bool,
}

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => FlightConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => FlightConfig::default(),
    };
    if args.dump_config {
        println!("{}", config.to_json_pretty()?);
        return Ok(());
    }
    if !(args.fps.is_finite() && args.fps > 0.0) {
        anyhow::bail!("--fps must be a positive number, got {}", args.fps);
    }

    let script = match &args.script {
        Some(path) => Script::load(path)?,
        None => Script::demo(&config.keys),
    };
    run(&config, &script, &args)
}

fn run(config: &FlightConfig, script: &Script, args: &Args) -> Result<()> {
    let ship = new_node();
    let mut rig = ShipRig::new(config, args.seed).context("building ship rig")?;
    rig.attach(&ship);

    let dt = 1.0 / args.fps;
    let frames = (script.seconds * args.fps).ceil() as u32;
    let mut input = InputState::new();
    let mut playback = Playback::new(script);
    log::info!(
        "[driver] {} frames at {:.0} fps, {} key events",
        frames,
        args.fps,
        script.events.len()
    );

    let started = Instant::now();
    let log_every = args.log_every.max(1);
    for frame in 0..frames {
        let now = frame as f32 * dt;
        playback.advance_to(now, &mut input);
        let snapshot = input.snapshot();
        let jets = rig.frame(dt, &snapshot);

        if frame % log_every == 0 {
            let t = *ship.borrow();
            log::info!(
                "[driver] t={:5.2}s pos=({:+.2},{:+.2},{:+.2}) rot=({:+.3},{:+.3},{:+.3}) jets L={} R={} rev={} particles={}/{}",
                now,
                t.position.x,
                t.position.y,
                t.position.z,
                t.rotation.x,
                t.rotation.y,
                t.rotation.z,
                jets.left,
                jets.right,
                jets.reverse,
                rig.exhaust().left().live_count(),
                rig.exhaust().right().live_count(),
            );
        }
    }

    let t = *ship.borrow();
    log::info!(
        "[driver] done in {:.1} ms: travelled {:.2} units, heading {:+.3} rad",
        started.elapsed().as_secs_f64() * 1000.0,
        t.position.length(),
        t.heading()
    );
    rig.cleanup();
    Ok(())
}
