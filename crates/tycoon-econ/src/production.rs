//! The bottleneck production engine.
//!
//! Each building type with units computes its candidate input and output
//! vectors, finds the scarcest input (including any electricity surcharge
//! from upgrades) and scales its whole recipe by that single limiting factor.
//! Recipe ratios therefore hold exactly even under starvation.

use crate::{Bonuses, Rules};
use serde::Serialize;
use tycoon_core::{BuildingKind, BuildingState, GameState, RateMap, ResourceType};

/// Gross production and consumption accumulated over one period.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TickDeltas {
    pub production: RateMap,
    pub consumption: RateMap,
}

impl TickDeltas {
    pub fn produced(&self, r: ResourceType) -> f64 {
        self.production.get(&r).copied().unwrap_or(0.0)
    }

    pub fn consumed(&self, r: ResourceType) -> f64 {
        self.consumption.get(&r).copied().unwrap_or(0.0)
    }

    pub fn net(&self, r: ResourceType) -> f64 {
        self.produced(r) - self.consumed(r)
    }

    fn absorb(&mut self, out: &BuildingOutput) {
        for (r, v) in &out.produced {
            *self.production.entry(*r).or_insert(0.0) += v;
        }
        for (r, v) in &out.consumed {
            *self.consumption.entry(*r).or_insert(0.0) += v;
        }
    }
}

/// What one building type did over a period.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BuildingOutput {
    pub kind: BuildingKind,
    /// Fraction of full throughput achieved, in [0, 1].
    pub limiting_factor: f64,
    pub produced: RateMap,
    pub consumed: RateMap,
}

/// Per-second rates for a single resource.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct ResourceRate {
    pub production: f64,
    pub consumption: f64,
    pub net: f64,
}

fn availability(available: f64, required: f64) -> f64 {
    if required > 0.0 {
        (available / required).min(1.0)
    } else {
        1.0
    }
}

impl Rules<'_> {
    /// Production and consumption over `dt` seconds. Pure: the caller applies
    /// the result.
    pub fn simulate(&self, state: &GameState, dt: f64) -> TickDeltas {
        let bonuses = self.bonuses(&state.purchased_upgrades);
        let research = self.research_bonus_with(state, &bonuses);
        let mut deltas = TickDeltas::default();
        for (kind, building) in &state.buildings {
            if building.count == 0 {
                continue;
            }
            if let Some(out) = self.run_building(state, &bonuses, research, *kind, building, dt) {
                deltas.absorb(&out);
            }
        }
        deltas
    }

    /// Same pass as [`Rules::simulate`], restricted to one building type.
    /// `None` when no units are owned.
    pub fn building_output(
        &self,
        state: &GameState,
        kind: BuildingKind,
        dt: f64,
    ) -> Option<BuildingOutput> {
        let building = state.building(kind).filter(|b| b.count > 0)?;
        let bonuses = self.bonuses(&state.purchased_upgrades);
        let research = self.research_bonus_with(state, &bonuses);
        self.run_building(state, &bonuses, research, kind, building, dt)
    }

    fn run_building(
        &self,
        state: &GameState,
        bonuses: &Bonuses<'_>,
        research_bonus: f64,
        kind: BuildingKind,
        building: &BuildingState,
        dt: f64,
    ) -> Option<BuildingOutput> {
        let def = self.catalog.building(kind)?;
        let base_rate = f64::from(building.count) * def.base_production * building.efficiency;
        let total_multiplier = state.global_multiplier
            * bonuses.building_multiplier(kind)
            * bonuses.global_multiplier()
            * research_bonus;
        let scale = base_rate * total_multiplier * dt;

        let mut limiting_factor: f64 = 1.0;
        for (input, ratio) in &def.consumes {
            let required = scale * ratio;
            limiting_factor = limiting_factor.min(availability(state.ledger.get(*input), required));
        }
        let surcharge = bonuses.electricity_surcharge(kind);
        if surcharge > 0.0 {
            let required = scale * surcharge;
            let available = state.ledger.get(ResourceType::Electricity);
            limiting_factor = limiting_factor.min(availability(available, required));
        }

        let effective = scale * limiting_factor;
        let produced: RateMap = def
            .produces
            .iter()
            .map(|(r, ratio)| (*r, effective * ratio))
            .collect();
        let mut consumed: RateMap = def
            .consumes
            .iter()
            .map(|(r, ratio)| (*r, effective * ratio))
            .collect();
        if surcharge > 0.0 {
            *consumed.entry(ResourceType::Electricity).or_insert(0.0) += effective * surcharge;
        }

        Some(BuildingOutput {
            kind,
            limiting_factor,
            produced,
            consumed,
        })
    }

    /// Rates per second at current holdings.
    pub fn rates(&self, state: &GameState) -> TickDeltas {
        self.simulate(state, 1.0)
    }

    pub fn rate(&self, state: &GameState, r: ResourceType) -> ResourceRate {
        let rates = self.rates(state);
        ResourceRate {
            production: rates.produced(r),
            consumption: rates.consumed(r),
            net: rates.net(r),
        }
    }

    /// Sum of positive per-second production over all resources.
    pub fn total_production_rate(&self, state: &GameState) -> f64 {
        self.rates(state)
            .production
            .values()
            .filter(|v| **v > 0.0)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::{set, standard, with_units};
    use proptest::prelude::*;
    use tycoon_core::UpgradeId;
    use BuildingKind as B;
    use ResourceType as R;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn iron_mine_produces_without_inputs() {
        let (catalog, cfg) = standard();
        let rules = Rules::new(&catalog, &cfg);
        let mut s = with_units(&catalog, &cfg, &[(B::IronMine, 1)]);
        let d = rules.simulate(&s, 1.0);
        assert_eq!(d.produced(R::IronOre), 2.0);
        assert!(d.consumption.is_empty());
        s.ledger.apply(&d.production, &d.consumption);
        assert_eq!(s.ledger.get(R::IronOre), 52.0);
    }

    #[test]
    fn furnace_throttled_by_scarce_ore() {
        let (catalog, cfg) = standard();
        let rules = Rules::new(&catalog, &cfg);
        let mut s = with_units(&catalog, &cfg, &[(B::StoneFurnace, 1)]);
        set(&mut s, &[(R::IronOre, 1.0), (R::Coal, 100.0)]);
        let out = rules.building_output(&s, B::StoneFurnace, 1.0).unwrap();
        assert!(close(out.limiting_factor, 0.5));
        let d = rules.simulate(&s, 1.0);
        assert!(close(d.produced(R::IronPlates), 1.0));
        assert!(close(d.consumed(R::IronOre), 1.0));
        assert!(close(d.consumed(R::Coal), 0.25));
        s.ledger.apply(&d.production, &d.consumption);
        assert!(close(s.ledger.get(R::IronOre), 0.0));
        assert!(close(s.ledger.get(R::Coal), 99.75));
    }

    #[test]
    fn building_without_inputs_has_full_factor() {
        let (catalog, cfg) = standard();
        let rules = Rules::new(&catalog, &cfg);
        let s = with_units(&catalog, &cfg, &[(B::SolarPanel, 3)]);
        let out = rules.building_output(&s, B::SolarPanel, 1.0).unwrap();
        assert_eq!(out.limiting_factor, 1.0);
        assert_eq!(out.produced[&R::Electricity], 6.0);
        assert!(rules.building_output(&s, B::WindTurbine, 1.0).is_none());
    }

    #[test]
    fn surcharge_throttles_through_electricity() {
        let (catalog, cfg) = standard();
        let rules = Rules::new(&catalog, &cfg);
        let mut s = with_units(&catalog, &cfg, &[(B::IronMine, 1)]);
        s.purchased_upgrades.insert(UpgradeId::new("electric_iron_boost"));
        set(&mut s, &[(R::Electricity, 1.5)]);
        // rate 2 * 1.5 = 3/s, surcharge 1 per rate unit -> 3 electricity needed
        let out = rules.building_output(&s, B::IronMine, 1.0).unwrap();
        assert!(close(out.limiting_factor, 0.5));
        assert!(close(out.produced[&R::IronOre], 1.5));
        assert!(close(out.consumed[&R::Electricity], 1.5));
    }

    #[test]
    fn shared_resource_tracked_independently() {
        let (catalog, cfg) = standard();
        let rules = Rules::new(&catalog, &cfg);
        let mut s = with_units(&catalog, &cfg, &[(B::StoneFurnace, 1), (B::ManualGearPress, 1)]);
        set(&mut s, &[(R::IronOre, 100.0), (R::Coal, 100.0), (R::IronPlates, 10.0)]);
        let d = rules.simulate(&s, 1.0);
        assert!(close(d.produced(R::IronPlates), 2.0));
        assert!(close(d.consumed(R::IronPlates), 2.0));
        assert!(close(d.net(R::IronPlates), 0.0));
        let rate = rules.rate(&s, R::IronPlates);
        assert!(close(rate.production, 2.0));
        assert!(close(rate.net, 0.0));
    }

    #[test]
    fn zero_dt_changes_nothing() {
        let (catalog, cfg) = standard();
        let rules = Rules::new(&catalog, &cfg);
        let s = with_units(&catalog, &cfg, &[(B::StoneFurnace, 2)]);
        let d = rules.simulate(&s, 0.0);
        assert!(d.production.values().all(|v| *v == 0.0));
        assert!(d.consumption.values().all(|v| *v == 0.0));
    }

    #[test]
    fn multipliers_scale_throughput() {
        let (catalog, cfg) = standard();
        let rules = Rules::new(&catalog, &cfg);
        let mut s = with_units(&catalog, &cfg, &[(B::IronMine, 2)]);
        s.purchased_upgrades.insert(UpgradeId::new("better_pickaxes"));
        s.purchased_upgrades.insert(UpgradeId::new("factory_organization"));
        s.building_mut(B::IronMine).unwrap().efficiency = 1.25;
        s.global_multiplier = 2.0;
        let expected = 2.0 * 2.0 * 1.25 * 2.0 * 1.5 * 1.2;
        assert!(close(rules.rates(&s).produced(R::IronOre), expected));
        assert!(close(rules.total_production_rate(&s), expected));
    }

    proptest! {
        #[test]
        fn recipe_ratio_holds_under_scarcity(
            ore in 0.0f64..10.0,
            coal in 0.0f64..3.0,
            count in 1u32..6,
            dt in 0.01f64..5.0,
        ) {
            let (catalog, cfg) = standard();
            let rules = Rules::new(&catalog, &cfg);
            let mut s = with_units(&catalog, &cfg, &[(B::StoneFurnace, count)]);
            set(&mut s, &[(R::IronOre, ore), (R::Coal, coal)]);
            let out = rules.building_output(&s, B::StoneFurnace, dt).unwrap();
            prop_assert!((0.0..=1.0).contains(&out.limiting_factor));
            let used_ore = out.consumed[&R::IronOre];
            let used_coal = out.consumed[&R::Coal];
            let plates = out.produced[&R::IronPlates];
            prop_assert!(used_ore <= ore + 1e-9);
            prop_assert!(used_coal <= coal + 1e-9);
            if used_coal > 0.0 {
                prop_assert!((used_ore / used_coal - 4.0).abs() < 1e-9);
            }
            prop_assert!((plates - used_ore).abs() < 1e-9);
        }

        #[test]
        fn ticks_keep_ledger_non_negative_and_lifetime_monotonic(
            counts in proptest::collection::vec(0u32..4, 30),
            dts in proptest::collection::vec(0.0f64..3.0, 1..12),
        ) {
            let (catalog, cfg) = standard();
            let rules = Rules::new(&catalog, &cfg);
            let units: Vec<_> = B::ALL.iter().copied().zip(counts).collect();
            let mut s = with_units(&catalog, &cfg, &units);
            for dt in dts {
                let before: Vec<f64> = R::ALL.iter().map(|r| s.ledger.lifetime(*r)).collect();
                let d = rules.simulate(&s, dt);
                s.ledger.apply(&d.production, &d.consumption);
                for (i, r) in R::ALL.iter().enumerate() {
                    prop_assert!(s.ledger.get(*r) >= 0.0);
                    prop_assert!(s.ledger.lifetime(*r) >= before[i]);
                }
            }
        }
    }
}
