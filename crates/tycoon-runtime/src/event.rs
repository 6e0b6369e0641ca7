//! Change notification for a running game.
//!
//! Listeners are called synchronously after every successful mutation and
//! every tick, in registration order. A listener that returns an error or
//! panics is logged and skipped; it never affects the mutation or the other
//! listeners.

use serde::Serialize;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use tracing::error;
use tycoon_core::{BuildingKind, GameState, UpgradeId};
use tycoon_econ::{ActionError, ResetYield, TickDeltas};

/// Something that happened to a game.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    Initialize,
    Tick { dt: f64, deltas: TickDeltas },
    BuildingAdded { building: BuildingKind, count: u32 },
    BuildingUnlocked { building: BuildingKind },
    BuildingUpgraded { building: BuildingKind, efficiency: f64 },
    UpgradePurchased { id: UpgradeId },
    ResearchReset { gained: ResetYield },
    ActionFailed { action: &'static str, error: ActionError },
    Save { ok: bool },
    Load { ok: bool },
    Reset,
    Settings,
}

impl GameEvent {
    /// Stable tag for the event type.
    pub fn kind(&self) -> &'static str {
        match self {
            GameEvent::Initialize => "initialize",
            GameEvent::Tick { .. } => "tick",
            GameEvent::BuildingAdded { .. } => "buildingAdded",
            GameEvent::BuildingUnlocked { .. } => "buildingUnlocked",
            GameEvent::BuildingUpgraded { .. } => "buildingUpgraded",
            GameEvent::UpgradePurchased { .. } => "upgradePurchased",
            GameEvent::ResearchReset { .. } => "researchReset",
            GameEvent::ActionFailed { .. } => "actionFailed",
            GameEvent::Save { .. } => "save",
            GameEvent::Load { .. } => "load",
            GameEvent::Reset => "reset",
            GameEvent::Settings => "settings",
        }
    }
}

/// Handle returned by [`EventBus::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ListenerId(u64);

/// Receives every event together with the state it left behind.
pub trait GameListener: Send {
    fn on_event(&mut self, state: &GameState, event: &GameEvent) -> anyhow::Result<()>;
}

impl<F> GameListener for F
where
    F: FnMut(&GameState, &GameEvent) -> anyhow::Result<()> + Send,
{
    fn on_event(&mut self, state: &GameState, event: &GameEvent) -> anyhow::Result<()> {
        self(state, event)
    }
}

#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    listeners: Vec<(ListenerId, Box<dyn GameListener>)>,
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl EventBus {
    pub fn subscribe<L: GameListener + 'static>(&mut self, listener: L) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `false` if the id was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(l, _)| *l != id);
        self.listeners.len() != before
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn emit(&mut self, state: &GameState, event: &GameEvent) {
        for (id, listener) in &mut self.listeners {
            match catch_unwind(AssertUnwindSafe(|| listener.on_event(state, event))) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    error!(listener = ?id, event = event.kind(), error = %e, "listener failed")
                }
                Err(_) => error!(listener = ?id, event = event.kind(), "listener panicked"),
            }
        }
    }
}
