//! Cost scaling, affordability and the sustainability gate.

use crate::Rules;
use tracing::warn;
use tycoon_core::{BuildingKind, CostMap, GameState};

fn scaled(base: &CostMap, multiplier: f64) -> CostMap {
    base.iter()
        .map(|(r, amount)| (*r, (amount * multiplier).floor()))
        .collect()
}

impl Rules<'_> {
    /// `floor(base × building_cost_multiplier^count)` per resource.
    pub fn building_cost(&self, kind: BuildingKind, count: u32) -> CostMap {
        let Some(def) = self.catalog.building(kind) else {
            return CostMap::new();
        };
        let exp = i32::try_from(count).unwrap_or(i32::MAX);
        scaled(&def.base_cost, self.config.building_cost_multiplier.powi(exp))
    }

    /// Cost of the next unit at current holdings.
    pub fn next_building_cost(&self, state: &GameState, kind: BuildingKind) -> CostMap {
        self.building_cost(kind, state.count(kind))
    }

    /// Efficiency upgrade cost; the exponent is `floor(efficiency - 1)`.
    pub fn upgrade_cost(&self, kind: BuildingKind, efficiency: f64) -> CostMap {
        let Some(def) = self.catalog.building(kind) else {
            return CostMap::new();
        };
        let level = (efficiency - 1.0).floor().max(0.0);
        scaled(&def.upgrade_cost, self.config.upgrade_cost_multiplier.powf(level))
    }

    /// Whether `state` can pay `cost`.
    ///
    /// Ledger resources compare `floor(have) >= ceil(need)`. Prestige
    /// currencies are checked against the accumulators. Negative or
    /// non-finite amounts, and resources that are missing or still locked,
    /// are unaffordable.
    pub fn can_afford(&self, state: &GameState, cost: &CostMap) -> bool {
        cost.iter().all(|(r, need)| {
            if !need.is_finite() || *need < 0.0 {
                return false;
            }
            if let Some(c) = r.prestige_currency() {
                return state.prestige.get(c) >= *need;
            }
            let Some(have) = state.ledger.amount(*r) else {
                warn!(resource = %r, need, "resource missing from ledger; cannot afford");
                return false;
            };
            if !state.ledger.is_unlocked(*r) {
                warn!(resource = %r, need, "resource not unlocked yet; cannot afford");
                return false;
            }
            have.floor() >= need.ceil()
        })
    }

    /// Whether one more unit of `kind` keeps every consumed resource's net
    /// rate non-negative. Uses the current per-second net and the raw recipe
    /// ratio, without simulating the extra unit.
    pub fn can_sustain(&self, state: &GameState, kind: BuildingKind) -> bool {
        let Some(def) = self.catalog.building(kind) else {
            return true;
        };
        if def.consumes.is_empty() {
            return true;
        }
        let rates = self.rates(state);
        def.consumes
            .iter()
            .all(|(r, ratio)| rates.net(*r) - ratio >= 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::{set, standard, with_units};
    use tycoon_core::ResourceType as R;
    use BuildingKind as B;

    #[test]
    fn building_cost_scales_and_floors() {
        let (catalog, cfg) = standard();
        let rules = Rules::new(&catalog, &cfg);
        assert_eq!(rules.building_cost(B::IronMine, 0)[&R::Stone], 5.0);
        assert_eq!(rules.building_cost(B::IronMine, 1)[&R::Stone], 5.0); // 5.75
        assert_eq!(rules.building_cost(B::IronMine, 2)[&R::Stone], 6.0); // 6.61
        assert_eq!(rules.building_cost(B::IronMine, 10)[&R::Stone], 20.0); // 20.2
        let furnace = rules.building_cost(B::StoneFurnace, 3);
        assert_eq!(furnace[&R::IronOre], 30.0); // 30.4
    }

    #[test]
    fn upgrade_cost_uses_integer_efficiency_levels() {
        let (catalog, cfg) = standard();
        let rules = Rules::new(&catalog, &cfg);
        let base = rules.upgrade_cost(B::IronMine, 1.0);
        assert_eq!(base[&R::IronPlates], 10.0);
        assert_eq!(base[&R::Stone], 10.0);
        // 1.25^3 = 1.95 still level 0
        assert_eq!(rules.upgrade_cost(B::IronMine, 1.953125), base);
        let lvl1 = rules.upgrade_cost(B::IronMine, 2.44140625);
        assert_eq!(lvl1[&R::IronPlates], 15.0);
        let lvl2 = rules.upgrade_cost(B::StoneQuarry, 3.1);
        assert_eq!(lvl2[&R::IronPlates], 33.0); // 15 * 2.25
    }

    #[test]
    fn afford_rounds_have_down_and_need_up() {
        let (catalog, cfg) = standard();
        let rules = Rules::new(&catalog, &cfg);
        let mut s = GameState::new(&catalog, &cfg);
        set(&mut s, &[(R::Stone, 4.99)]);
        let cost: CostMap = [(R::Stone, 4.0)].into_iter().collect();
        assert!(rules.can_afford(&s, &cost));
        let cost: CostMap = [(R::Stone, 4.01)].into_iter().collect();
        assert!(!rules.can_afford(&s, &cost));
        let cost: CostMap = [(R::Stone, -1.0)].into_iter().collect();
        assert!(!rules.can_afford(&s, &cost));
        let cost: CostMap = [(R::Stone, f64::NAN)].into_iter().collect();
        assert!(!rules.can_afford(&s, &cost));
        assert!(rules.can_afford(&s, &CostMap::new()));
    }

    #[test]
    fn locked_resources_are_unaffordable() {
        let (catalog, cfg) = standard();
        let rules = Rules::new(&catalog, &cfg);
        let mut s = GameState::new(&catalog, &cfg);
        set(&mut s, &[(R::IronPlates, 500.0)]);
        let cost: CostMap = [(R::IronPlates, 10.0)].into_iter().collect();
        assert!(!rules.can_afford(&s, &cost));
        s.ledger.unlock(R::IronPlates);
        assert!(rules.can_afford(&s, &cost));
    }

    #[test]
    fn prestige_currencies_checked_against_accumulators() {
        let (catalog, cfg) = standard();
        let rules = Rules::new(&catalog, &cfg);
        let mut s = GameState::new(&catalog, &cfg);
        s.ledger.unlock(R::ResearchPoints);
        set(&mut s, &[(R::ResearchPoints, 100.0)]);
        let cost: CostMap = [(R::ResearchPoints, 10.0)].into_iter().collect();
        assert!(!rules.can_afford(&s, &cost));
        s.prestige.research_points = 10.0;
        assert!(rules.can_afford(&s, &cost));
    }

    #[test]
    fn sustain_gate_uses_current_net() {
        let (catalog, cfg) = standard();
        let rules = Rules::new(&catalog, &cfg);
        let mut s = with_units(&catalog, &cfg, &[(B::IronMine, 1), (B::CoalMine, 1)]);
        set(&mut s, &[(R::IronOre, 0.0), (R::Coal, 0.0)]);
        // net ore 2, coal 2; furnace needs 1 and 0.25
        assert!(rules.can_sustain(&s, B::StoneFurnace));
        s.building_mut(B::StoneFurnace).unwrap().count = 2;
        set(&mut s, &[(R::IronOre, 100.0), (R::Coal, 100.0)]);
        // furnaces now eat 4 ore/s against 2 produced
        assert!(!rules.can_sustain(&s, B::StoneFurnace));
        assert!(rules.can_sustain(&s, B::IronMine));
    }
}
