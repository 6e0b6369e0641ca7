#![deny(warnings)]

//! Factory rules: bonus resolution, the bottleneck production engine, cost
//! scaling, transaction preconditions and prestige yields.
//!
//! Everything here is a pure function of a `&GameState` snapshot plus the
//! static [`Catalog`] and [`GameConfig`], bundled as [`Rules`]. Callers apply
//! the returned deltas or costs themselves; `tycoon-runtime` does that for a
//! live game.

use tycoon_core::{Catalog, GameConfig};

mod bonus;
mod cost;
mod prestige;
mod production;
mod progress;
mod transaction;

pub use bonus::Bonuses;
pub use prestige::{ResearchReport, ResetYield};
pub use production::{BuildingOutput, ResourceRate, TickDeltas};
pub use progress::{NextUnlock, UpgradeOffer};
pub use transaction::ActionError;

/// Read-only view of the static rules of a game.
#[derive(Clone, Copy, Debug)]
pub struct Rules<'a> {
    pub catalog: &'a Catalog,
    pub config: &'a GameConfig,
}

impl<'a> Rules<'a> {
    pub fn new(catalog: &'a Catalog, config: &'a GameConfig) -> Self {
        Self { catalog, config }
    }
}
