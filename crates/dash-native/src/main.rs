use anyhow::Result;
use clap::Parser;
use dash_core::constants::{DEFAULT_MASTER_VOLUME, DEFAULT_MAX_PARTICLES, LEADERBOARD_TOP};
use dash_core::{format_number, GameContext, RuntimeConfig};
use std::path::PathBuf;
use std::time::{Duration, Instant};

mod audio;
mod sim;
mod store;

use audio::CpalAudio;
use sim::ScriptedRun;
use store::FileStore;

#[derive(Parser)]
#[command(name = "dash-native")]
#[command(about = "Headless squirrel-dash run with native audio and on-disk settings", long_about = None)]
#[command(version)]
struct Args {
    /// Length of the scripted run in seconds
    #[arg(long, default_value_t = 20.0)]
    seconds: f32,

    /// Simulated frame rate
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Settings file (defaults to the platform config dir)
    #[arg(long)]
    storage: Option<PathBuf>,

    /// Run without opening an audio device
    #[arg(long)]
    no_audio: bool,

    /// Do not pace frames against the wall clock
    #[arg(long)]
    fast: bool,

    /// Seed for particles and noise beds
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value_t = DEFAULT_MAX_PARTICLES)]
    max_particles: usize,

    #[arg(long, default_value_t = DEFAULT_MASTER_VOLUME)]
    volume: f32,

    /// Leaderboard name for this run
    #[arg(long)]
    name: Option<String>,

    /// Persist the sound toggle and exit
    #[arg(long)]
    sound: Option<bool>,
}

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
    let args = Args::parse();

    let store = FileStore::new(args.storage.clone().unwrap_or_else(FileStore::default_path));
    log::info!("settings at {}", store.path().display());
    let audio = if args.no_audio { None } else { CpalAudio::new() };
    let config = RuntimeConfig {
        max_particles: args.max_particles,
        master_volume: args.volume.clamp(0.0, 1.0),
        seed: args.seed,
    };
    let mut game = GameContext::new(audio, store, config);

    if let Some(enabled) = args.sound {
        game.set_sound_enabled(enabled);
        log::info!("sound {}", if enabled { "enabled" } else { "disabled" });
        return Ok(());
    }

    let fps = args.fps.max(1);
    let dt = 1.0 / fps as f32;
    let frame_budget = Duration::from_secs_f32(dt);
    let frames = (args.seconds.max(0.0) * fps as f32) as u64;

    let mut run = ScriptedRun::default();
    game.start_ambient();
    let start = Instant::now();
    for frame in 0..frames {
        let frame_start = Instant::now();
        let scaled = dt * game.effects.time_scale();
        run.step(&mut game, scaled);
        // unpaced runs report stats against simulated time
        let now_ms = if args.fast {
            (frame + 1) as f64 * dt as f64 * 1000.0
        } else {
            start.elapsed().as_secs_f64() * 1000.0
        };
        game.frame_at(dt, now_ms);

        if frame % fps as u64 == 0 {
            log::info!(
                "t={:>5.1}s dist={:>6.1}m score={:>7} fps={} quality={} particles={} voices={} shake={:.2} time_scale={:.2} bloom={:.2}",
                start.elapsed().as_secs_f32(),
                run.distance,
                format_number(run.score() as i64),
                game.frame_stats.fps(),
                game.frame_stats.quality_level().as_str(),
                game.particles.len(),
                game.sound.backend().map_or(0, CpalAudio::active_voices),
                game.effects.shake.magnitude().x,
                game.effects.time_scale(),
                game.effects.bloom_intensity(),
            );
        }
        if !args.fast {
            if let Some(rest) = frame_budget.checked_sub(frame_start.elapsed()) {
                std::thread::sleep(rest);
            }
        }
    }
    game.stop_ambient();

    let summary = game.finish_run(
        args.name.as_deref(),
        run.score(),
        run.distance as f64,
        "local",
    );
    let settings = game.current_settings();
    println!(
        "score {} ({} acorns, {} collisions, {:.0} m){}",
        format_number(run.score() as i64),
        run.acorns,
        run.collisions,
        run.distance,
        if summary.new_high_score { " - new high score!" } else { "" }
    );
    println!(
        "high score {} over {} games, {:.0} m total",
        format_number(settings.high_score as i64),
        settings.total_games,
        settings.total_distance
    );
    match summary.rank {
        Some(rank) => println!("leaderboard rank #{rank}"),
        None => println!("did not place on the leaderboard"),
    }
    for (i, entry) in game.leaderboard.top(LEADERBOARD_TOP).iter().enumerate() {
        println!("{:>2}. {:<16} {:>8}", i + 1, entry.name, format_number(entry.score as i64));
    }
    println!("{}", serde_json::to_string_pretty(&game.leaderboard.stats())?);
    Ok(())
}
