//! Single-owner game loop.
//!
//! One tokio task owns the [`Game`]. Ticks and commands are handled from the
//! same `select!`, so a tick never interleaves with a transaction.

use crate::autobuild::cheapest_buildable;
use persistence::PersistenceError;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{interval, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};
use tycoon_core::{BuildingKind, GameState};
use tycoon_runtime::{ActionError, Game};

pub enum Command {
    Build(BuildingKind, oneshot::Sender<Result<(), ActionError>>),
    Snapshot(oneshot::Sender<GameState>),
    Save(PathBuf, oneshot::Sender<Result<(), PersistenceError>>),
}

#[derive(Clone, Debug)]
pub struct LoopOptions {
    /// Simulated seconds per wall-clock second.
    pub speed: f64,
    pub auto_build: bool,
    pub save_path: PathBuf,
}

/// Handle to a running game loop.
pub struct Scheduler {
    tx: mpsc::Sender<Command>,
    task: JoinHandle<Game>,
}

impl Scheduler {
    pub fn spawn(game: Game, opts: LoopOptions) -> Self {
        let (tx, rx) = mpsc::channel(64);
        let task = tokio::spawn(run(game, opts, rx));
        Self { tx, task }
    }

    async fn send(&self, cmd: Command) -> anyhow::Result<()> {
        self.tx
            .send(cmd)
            .await
            .map_err(|_| anyhow::anyhow!("game loop has stopped"))
    }

    pub async fn build(&self, kind: BuildingKind) -> anyhow::Result<Result<(), ActionError>> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Build(kind, reply)).await?;
        Ok(rx.await?)
    }

    pub async fn snapshot(&self) -> anyhow::Result<GameState> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Snapshot(reply)).await?;
        Ok(rx.await?)
    }

    pub async fn save(&self, path: PathBuf) -> anyhow::Result<()> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Save(path, reply)).await?;
        rx.await??;
        Ok(())
    }

    /// Close the command channel and take the game back.
    pub async fn shutdown(self) -> anyhow::Result<Game> {
        drop(self.tx);
        Ok(self.task.await?)
    }
}

async fn run(mut game: Game, opts: LoopOptions, mut rx: mpsc::Receiver<Command>) -> Game {
    let period = Duration::from_millis(game.config().update_interval_ms.max(1));
    let save_every = Duration::from_millis(game.config().save_interval_ms.max(1));
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut last_tick = Instant::now();
    let mut last_save = Instant::now();

    loop {
        tokio::select! {
            now = ticker.tick() => {
                let dt = (now - last_tick).as_secs_f64() * opts.speed;
                last_tick = now;
                if let Err(e) = game.tick(dt) {
                    warn!(error = %e, "tick rejected");
                }
                if opts.auto_build {
                    while let Some(kind) = cheapest_buildable(&game) {
                        if game.build(kind).is_err() {
                            break;
                        }
                        debug!(building = %kind, "auto-built");
                    }
                }
                if game.state().settings.auto_save && now - last_save >= save_every {
                    last_save = now;
                    match game.save_to(&opts.save_path) {
                        Ok(()) => debug!(path = %opts.save_path.display(), "auto-saved"),
                        Err(e) => warn!(error = %e, "auto-save failed"),
                    }
                }
            }
            cmd = rx.recv() => match cmd {
                Some(Command::Build(kind, reply)) => {
                    let _ = reply.send(game.build(kind));
                }
                Some(Command::Snapshot(reply)) => {
                    let _ = reply.send(game.snapshot());
                }
                Some(Command::Save(path, reply)) => {
                    let _ = reply.send(game.save_to(&path));
                }
                None => break,
            }
        }
    }
    info!(ticks = game.state().stats.total_ticks, "game loop stopped");
    game
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> LoopOptions {
        LoopOptions {
            speed: 10.0,
            auto_build: false,
            save_path: std::env::temp_dir().join("tycoon-cli-unused.json"),
        }
    }

    #[tokio::test]
    async fn commands_are_served_between_ticks() {
        let mut game = Game::standard();
        let mut settings = game.state().settings.clone();
        settings.auto_save = false;
        game.set_settings(settings);
        let sched = Scheduler::spawn(game, opts());
        sched.build(BuildingKind::IronMine).await.unwrap().unwrap();
        assert_eq!(
            sched.build(BuildingKind::StoneFurnace).await.unwrap(),
            Err(ActionError::BuildingLocked(BuildingKind::StoneFurnace))
        );
        let snap = sched.snapshot().await.unwrap();
        assert_eq!(snap.count(BuildingKind::IronMine), 1);
        tokio::time::sleep(Duration::from_millis(250)).await;
        let game = sched.shutdown().await.unwrap();
        assert!(game.state().stats.total_ticks >= 1);
        assert!(game.state().stats.total_play_time_secs > 0.0);
    }
}
