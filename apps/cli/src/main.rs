#![deny(warnings)]

//! Headless runner: plays a factory for a fixed wall-clock duration and
//! prints a production summary.

mod autobuild;
mod scheduler;

use anyhow::{Context, Result};
use scheduler::{LoopOptions, Scheduler};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tycoon_core::{BuildingKind, Catalog, GameConfig, GameState, ResourceType};
use tycoon_runtime::{Game, GameEvent};

#[derive(Debug, Default)]
struct Args {
    seconds: Option<f64>,
    speed: Option<f64>,
    config: Option<PathBuf>,
    catalog: Option<PathBuf>,
    load: Option<PathBuf>,
    save: Option<PathBuf>,
    build: Vec<String>,
    auto: bool,
    version: bool,
}

fn parse_args() -> Args {
    let mut args = Args::default();
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--seconds" => args.seconds = it.next().and_then(|s| s.parse().ok()),
            "--speed" => args.speed = it.next().and_then(|s| s.parse().ok()),
            "--config" => args.config = it.next().map(PathBuf::from),
            "--catalog" => args.catalog = it.next().map(PathBuf::from),
            "--load" => args.load = it.next().map(PathBuf::from),
            "--save" => args.save = it.next().map(PathBuf::from),
            "--build" => args.build.extend(it.next()),
            "--auto" => args.auto = true,
            "--version" => args.version = true,
            other => warn!(arg = other, "ignoring unknown argument"),
        }
    }
    args
}

fn load_config(path: Option<&PathBuf>) -> Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    GameConfig::from_yaml_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

fn load_catalog(path: Option<&PathBuf>) -> Result<Catalog> {
    let Some(path) = path else {
        return Ok(Catalog::standard());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading catalog {}", path.display()))?;
    Catalog::from_yaml_str(&text).with_context(|| format!("parsing catalog {}", path.display()))
}

/// Wall-clock run time; ten seconds unless `--seconds` says otherwise.
fn run_duration(seconds: Option<f64>) -> Result<Duration> {
    let seconds = seconds.unwrap_or(10.0);
    Duration::try_from_secs_f64(seconds)
        .with_context(|| format!("--seconds {seconds} is not a usable duration"))
}

fn print_summary(game: &Game) {
    let rules = game.rules();
    let state = game.state();
    let owned: Vec<String> = state
        .buildings
        .iter()
        .filter(|(_, b)| b.count > 0)
        .map(|(kind, b)| format!("{}×{}", kind.key(), b.count))
        .collect();
    println!(
        "Factory | buildings: {} | play time: {:.1}s | ticks: {} | resets: {}",
        state.total_units(),
        state.stats.total_play_time_secs,
        state.stats.total_ticks,
        state.prestige.total_resets
    );
    if !owned.is_empty() {
        println!("Owned | {}", owned.join(" "));
    }
    for r in ResourceType::ALL {
        if !state.ledger.is_unlocked(r) || r.prestige_currency().is_some() {
            continue;
        }
        let rate = rules.rate(state, r);
        println!(
            "  {:<16} {:>14.1}  ({:+.2}/s)",
            r.name(),
            state.ledger.get(r),
            rate.net
        );
    }
    let report = game.research_report();
    let next = report.next_reset;
    println!(
        "Research | bonus: x{:.3} | since reset: {}s | reset would grant: {} RP, {} PT, {} IP, {} AC",
        report.current_bonus,
        report.seconds_since_last_reset,
        next.research_points,
        next.production_tokens,
        next.innovation_points,
        next.automation_credits
    );
    if let Some(next) = rules.next_unlock(state) {
        println!(
            "Next unlock | {} needs {} {} (own {})",
            next.building.key(),
            next.requirement.count,
            next.requirement.building.key(),
            next.owned
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = parse_args();
    if args.version {
        println!(
            "factory-tycoon {} ({} built {})",
            env!("CARGO_PKG_VERSION"),
            env!("GIT_SHA"),
            env!("BUILD_DATE")
        );
        return Ok(());
    }
    info!(?args, "starting CLI");

    let config = load_config(args.config.as_ref())?;
    let catalog = Arc::new(load_catalog(args.catalog.as_ref())?);
    let mut game = Game::new(catalog, config);
    if let Some(path) = &args.load {
        let found = game
            .load_from(path)
            .with_context(|| format!("loading {}", path.display()))?;
        info!(path = %path.display(), found, "load");
    }
    game.subscribe(|_: &GameState, e: &GameEvent| -> anyhow::Result<()> {
        match e {
            GameEvent::BuildingUnlocked { building } => info!(building = %building, "unlocked"),
            GameEvent::ResearchReset { gained } => info!(?gained, "research reset"),
            _ => {}
        }
        Ok(())
    });
    game.announce();

    let save_path = args.save.clone().unwrap_or_else(persistence::default_save_path);
    let sched = Scheduler::spawn(
        game,
        LoopOptions {
            speed: args.speed.unwrap_or(1.0).max(0.0),
            auto_build: args.auto,
            save_path: save_path.clone(),
        },
    );

    for key in &args.build {
        let kind: BuildingKind = key.parse()?;
        match sched.build(kind).await? {
            Ok(()) => info!(building = %kind, "built"),
            Err(e) => warn!(building = %kind, error = %e, "build refused"),
        }
    }

    let run_for = run_duration(args.seconds)?;
    tokio::time::sleep(run_for).await;

    let state = sched.snapshot().await?;
    if state.settings.auto_save || args.save.is_some() {
        sched.save(save_path.clone()).await?;
        info!(path = %save_path.display(), "saved");
    }
    let game = sched.shutdown().await?;
    print_summary(&game);
    Ok(())
}
