//! Preconditions for player actions.
//!
//! Each `check_*` returns what the action would cost (or yield) when it is
//! allowed, so the caller can apply it without re-deriving anything.

use crate::{ResetYield, Rules};
use thiserror::Error;
use tycoon_core::{BuildingKind, CostMap, GameState, UpgradeId};

/// Why an action was refused. A refused action never mutates state.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ActionError {
    #[error("unknown upgrade: {0}")]
    UnknownUpgrade(UpgradeId),
    #[error("{0} is not unlocked")]
    BuildingLocked(BuildingKind),
    #[error("cannot afford {cost:?}")]
    CannotAfford { cost: CostMap },
    #[error("another {0} would starve its inputs")]
    Unsustainable(BuildingKind),
    #[error("no {0} to upgrade")]
    NoUnits(BuildingKind),
    #[error("upgrade {0} already purchased")]
    AlreadyPurchased(UpgradeId),
    #[error("upgrade {0} is not unlocked")]
    UpgradeLocked(UpgradeId),
    #[error("research reset would yield nothing")]
    NotWorthwhile,
    #[error("invalid tick delta: {0}")]
    InvalidDelta(f64),
}

impl Rules<'_> {
    fn afford(&self, state: &GameState, cost: CostMap) -> Result<CostMap, ActionError> {
        if self.can_afford(state, &cost) {
            Ok(cost)
        } else {
            Err(ActionError::CannotAfford { cost })
        }
    }

    /// Cost of one more unit, if building it is allowed.
    pub fn check_build(&self, state: &GameState, kind: BuildingKind) -> Result<CostMap, ActionError> {
        let building = state
            .building(kind)
            .filter(|b| b.unlocked && self.catalog.building(kind).is_some())
            .ok_or(ActionError::BuildingLocked(kind))?;
        let cost = self.afford(state, self.building_cost(kind, building.count))?;
        if !self.can_sustain(state, kind) {
            return Err(ActionError::Unsustainable(kind));
        }
        Ok(cost)
    }

    pub fn can_build(&self, state: &GameState, kind: BuildingKind) -> bool {
        self.check_build(state, kind).is_ok()
    }

    /// Cost of the next efficiency upgrade, if allowed.
    pub fn check_upgrade(&self, state: &GameState, kind: BuildingKind) -> Result<CostMap, ActionError> {
        let building = state
            .building(kind)
            .filter(|b| b.count > 0 && self.catalog.building(kind).is_some())
            .ok_or(ActionError::NoUnits(kind))?;
        self.afford(state, self.upgrade_cost(kind, building.efficiency))
    }

    pub fn can_upgrade(&self, state: &GameState, kind: BuildingKind) -> bool {
        self.check_upgrade(state, kind).is_ok()
    }

    pub fn check_purchase(&self, state: &GameState, id: &UpgradeId) -> Result<CostMap, ActionError> {
        let def = self
            .catalog
            .upgrade(id)
            .ok_or_else(|| ActionError::UnknownUpgrade(id.clone()))?;
        if state.is_purchased(id) {
            return Err(ActionError::AlreadyPurchased(id.clone()));
        }
        if !self.is_upgrade_unlocked(state, id) {
            return Err(ActionError::UpgradeLocked(id.clone()));
        }
        self.afford(state, def.cost.clone())
    }

    pub fn can_purchase(&self, state: &GameState, id: &UpgradeId) -> bool {
        self.check_purchase(state, id).is_ok()
    }

    pub fn check_reset(&self, state: &GameState) -> Result<ResetYield, ActionError> {
        let gained = self.reset_yield(state);
        if gained.is_worthwhile() {
            Ok(gained)
        } else {
            Err(ActionError::NotWorthwhile)
        }
    }
}
