//! Whale Lake command-line runner
//!
//! Plays a session with the autopilot at the controls, either headless (as
//! fast as possible, deterministic for a given seed) or in realtime on the
//! threaded runtime, and reports the result.

use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;

use whale_lake::audio::{AudioManager, LogSink};
use whale_lake::consts::TICKS_PER_SECOND;
use whale_lake::host::{
    EventRouter, HeadlessDriver, RunSummary, Runtime, SceneTransition, SharedSession,
};
use whale_lake::sim::{Autopilot, GameSession, SceneSnapshot};
use whale_lake::{HighScoreStore, JsonHighScoreFile, MemoryHighScore, Settings, Tuning};

#[derive(Debug, Parser)]
#[command(name = "whale-lake", about = "Run a Whale Lake session with the autopilot")]
struct Args {
    /// RNG seed (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Longest run to play, in seconds of game time
    #[arg(long, default_value_t = 120.0)]
    seconds: f32,

    /// Tuning JSON overriding the default balance
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Settings JSON (mute flags and volumes)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// High score file; kept in memory when omitted
    #[arg(long)]
    high_score: Option<PathBuf>,

    /// Run on the threaded runtime at wall-clock speed
    #[arg(long)]
    realtime: bool,

    /// Disable the difficulty ramp
    #[arg(long)]
    no_ramp: bool,

    /// Write the final scene snapshot as JSON to this path
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

/// Prints the game-over screen
struct ConsoleScene;

impl SceneTransition for ConsoleScene {
    fn game_over(&mut self, score: u64, high_score: u64) {
        println!("Game over! Score: {score}  Best: {high_score}");
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut tuning = match &args.tuning {
        Some(path) => Tuning::load(path)
            .with_context(|| format!("loading tuning from {}", path.display()))?,
        None => Tuning::default(),
    };
    if args.no_ramp {
        tuning.ramp_enabled = false;
    }

    let settings = args
        .settings
        .as_deref()
        .map(Settings::load_or_default)
        .unwrap_or_default();

    let high_scores: Box<dyn HighScoreStore> = match &args.high_score {
        Some(path) => {
            let file = JsonHighScoreFile::open(path);
            log::info!("High score kept in {}", file.path().display());
            Box::new(file)
        }
        None => Box::new(MemoryHighScore::default()),
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    let session =
        GameSession::new(tuning, seed, high_scores).context("starting the game session")?;
    let router = EventRouter::new(
        AudioManager::new(Box::new(LogSink), settings),
        Box::new(ConsoleScene),
    );

    log::info!("Whale Lake starting (seed {seed})");
    let (summary, snapshot) = if args.realtime {
        run_realtime(session, router, args.seconds)
    } else {
        run_headless(session, router, args.seconds)
    };

    println!(
        "seed {}: score {} (best {}), level {}, {} ticks{}",
        summary.seed,
        summary.score,
        summary.high_score,
        summary.level,
        summary.ticks,
        if summary.game_over { ", crashed" } else { "" }
    );

    if let Some(path) = &args.snapshot {
        let json = serde_json::to_string_pretty(&snapshot).context("serializing snapshot")?;
        std::fs::write(path, json)
            .with_context(|| format!("writing snapshot to {}", path.display()))?;
        log::info!("Snapshot written to {}", path.display());
    }
    Ok(())
}

fn run_headless(
    mut session: GameSession,
    mut router: EventRouter,
    seconds: f32,
) -> (RunSummary, SceneSnapshot) {
    let max_ticks = (seconds.max(0.0) * TICKS_PER_SECOND as f32) as u64;
    let mut driver = HeadlessDriver::new(Some(Autopilot::default()));
    let summary = driver.run(&mut session, &mut router, max_ticks);
    let snapshot = session.snapshot();
    driver.finish(&mut session, &mut router);
    (summary, snapshot)
}

fn run_realtime(
    session: GameSession,
    router: EventRouter,
    seconds: f32,
) -> (RunSummary, SceneSnapshot) {
    let shared = SharedSession::new(session);
    let pilot = Autopilot::default();
    let mut runtime = Runtime::start(
        shared.clone(),
        router,
        Some(Box::new(move |s: &mut GameSession| {
            for event in pilot.steer(s) {
                s.handle_pointer(event);
            }
        })),
    );

    let deadline = Instant::now() + Duration::from_secs_f32(seconds.max(0.0));
    while Instant::now() < deadline && !shared.is_over() {
        thread::sleep(Duration::from_millis(50));
    }

    let (summary, snapshot) = {
        let s = shared.lock();
        let ticks = s.state().tick_count;
        (RunSummary::of(&s, ticks), s.snapshot())
    };
    runtime.shutdown();
    (summary, snapshot)
}
