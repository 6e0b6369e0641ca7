#![deny(warnings)]

//! Live game sessions: the [`Game`] state owner and its event bus.
//!
//! A [`Game`] applies the pure rules from `tycoon-econ` to the state it owns
//! and notifies subscribed [`GameListener`]s after every change. Scheduling
//! ticks is left to the host (see `apps/cli`).

mod event;
mod game;

pub use event::{EventBus, GameEvent, GameListener, ListenerId};
pub use game::Game;
pub use tycoon_econ::{ActionError, ResetYield, TickDeltas};
