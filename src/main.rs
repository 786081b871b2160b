//! Fog Crawl entry point
//!
//! Runs the scene headless on autopilot and reports what happened.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use fog_crawl::consts::FRAME_DT;
use fog_crawl::host::HeadlessHost;
use fog_crawl::scene::GameScene;
use fog_crawl::sim::TickInput;
use fog_crawl::{ConfigError, Settings};

#[derive(Debug, Parser)]
#[command(name = "fog-crawl", about = "Run the fog crawl scene headless on autopilot")]
struct Args {
    /// Directory holding the tilemap and images
    #[arg(long, default_value = "assets")]
    assets: PathBuf,

    /// JSON settings file (defaults are used when absent)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Number of frames to simulate at 60 Hz
    #[arg(long, default_value_t = 3600)]
    frames: u64,

    /// Override the RNG seed from settings
    #[arg(long)]
    seed: Option<u64>,
}

fn run(args: &Args) -> Result<(), ConfigError> {
    let mut settings = Settings::load_or_default(args.settings.as_deref())?;
    if let Some(seed) = args.seed {
        settings.seed = seed;
    }

    let host = HeadlessHost::new(&args.assets, FRAME_DT);
    let mut scene = GameScene::new(settings);
    host.start(&mut scene)?;

    let autopilot = TickInput {
        autopilot: true,
        ..Default::default()
    };
    let summary = host.run(&mut scene, args.frames, |_| autopilot.clone());

    log::info!(
        "Ran {} frames: {} potions collected, {} relocations, {} skipped resets",
        summary.frames,
        summary.potions_collected,
        summary.relocations,
        summary.skipped_resets
    );
    println!(
        "frames={} potions={} relocations={} phase={:?} pos=({:.1}, {:.1})",
        summary.frames,
        summary.potions_collected,
        summary.relocations,
        summary.final_phase,
        summary.final_pos.x,
        summary.final_pos.y
    );

    if let Some(world) = scene.world() {
        print!("{}", scene.overlay().sketch(&world.mask, 25.0));
    }
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> ExitCode {
    env_logger::init();
    log::info!("Fog Crawl (headless) starting...");

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Scene setup failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser host yet; the library is usable from one
}
