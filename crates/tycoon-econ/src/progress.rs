//! Progression queries: upgrade and building unlocks, upgrade offers.

use crate::Rules;
use serde::Serialize;
use tycoon_core::{BuildingKind, GameState, UnlockRequirement, UpgradeCategory, UpgradeId};

/// The next locked building in unlock order and what it takes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct NextUnlock {
    pub building: BuildingKind,
    pub requirement: UnlockRequirement,
    /// Units of the required building currently owned.
    pub owned: u32,
}

/// An unlocked upgrade as presented to a player.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UpgradeOffer {
    pub id: UpgradeId,
    pub can_afford: bool,
    pub is_purchased: bool,
}

impl Rules<'_> {
    /// Conjunction of the upgrade's unlock condition. Unknown ids are locked.
    pub fn is_upgrade_unlocked(&self, state: &GameState, id: &UpgradeId) -> bool {
        let Some(def) = self.catalog.upgrade(id) else {
            return false;
        };
        let cond = &def.unlock_condition;
        cond.upgrades.iter().all(|u| state.is_purchased(u))
            && cond
                .buildings
                .iter()
                .all(|(kind, need)| state.count(*kind) >= *need)
            && state.prestige.total_resets >= cond.total_resets
            && cond
                .resources
                .iter()
                .all(|(r, need)| state.ledger.get(*r) >= *need)
    }

    /// Locked buildings whose requirement is now met, in catalog order.
    pub fn newly_unlocked_buildings(&self, state: &GameState) -> Vec<BuildingKind> {
        self.catalog
            .buildings()
            .filter(|(kind, _)| state.building(*kind).is_some_and(|b| !b.unlocked))
            .filter_map(|(kind, def)| {
                let req = def.unlock_requirement?;
                (state.count(req.building) >= req.count).then_some(kind)
            })
            .collect()
    }

    /// First still-locked main-line building in unlock order.
    pub fn next_unlock(&self, state: &GameState) -> Option<NextUnlock> {
        self.catalog.unlock_order().into_iter().find_map(|kind| {
            let def = self.catalog.building(kind)?;
            if def.is_alternative || state.building(kind).map_or(true, |b| b.unlocked) {
                return None;
            }
            let requirement = def.unlock_requirement?;
            Some(NextUnlock {
                building: kind,
                requirement,
                owned: state.count(requirement.building),
            })
        })
    }

    /// Unlocked upgrades, optionally restricted to one category.
    pub fn available_upgrades(
        &self,
        state: &GameState,
        category: Option<UpgradeCategory>,
    ) -> Vec<UpgradeOffer> {
        self.catalog
            .upgrades()
            .filter(|(_, u)| category.map_or(true, |c| u.category == c))
            .filter(|(id, _)| self.is_upgrade_unlocked(state, id))
            .map(|(id, _)| UpgradeOffer {
                id: id.clone(),
                can_afford: self.can_purchase(state, id),
                is_purchased: state.is_purchased(id),
            })
            .collect()
    }

    /// Unlocked upgrades listed under `kind`.
    pub fn building_upgrades(&self, state: &GameState, kind: BuildingKind) -> Vec<UpgradeOffer> {
        self.available_upgrades(state, None)
            .into_iter()
            .filter(|o| {
                self.catalog
                    .upgrade(&o.id)
                    .is_some_and(|u| u.building == Some(kind))
            })
            .collect()
    }

    /// `1 + Σ count × global_bonus` over buildings that carry a global bonus.
    pub fn state_global_multiplier(&self, state: &GameState) -> f64 {
        1.0 + self
            .catalog
            .buildings()
            .filter_map(|(kind, def)| def.global_bonus.map(|g| f64::from(state.count(kind)) * g))
            .sum::<f64>()
    }
}
