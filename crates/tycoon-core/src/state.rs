//! Mutable game state: ledger, buildings, prestige and bookkeeping.
//!
//! All quantities are mutated through typed methods that keep the ledger
//! non-negative. Rules that decide *whether* a mutation is allowed live in
//! `tycoon-econ`; this module only guarantees the data invariants.

use crate::{
    BuildingKind, Catalog, CostMap, GameConfig, PrestigeCurrency, RateMap, ResourceType, UpgradeId,
    GAME_VERSION,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Resource quantities with unlock flags and lifetime production.
///
/// Quantities never go below zero: every mutator floor-clamps its result.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceLedger {
    amounts: BTreeMap<ResourceType, f64>,
    unlocked: BTreeMap<ResourceType, bool>,
    lifetime: BTreeMap<ResourceType, f64>,
}

impl ResourceLedger {
    /// Every resource present, starting amounts applied, basic ores unlocked.
    pub fn fresh(starting: &CostMap) -> Self {
        let amounts = ResourceType::ALL
            .iter()
            .map(|r| (*r, starting.get(r).copied().unwrap_or(0.0).max(0.0)))
            .collect();
        let unlocked = ResourceType::ALL
            .iter()
            .map(|r| (*r, r.unlocked_by_default()))
            .collect();
        Self {
            amounts,
            unlocked,
            lifetime: BTreeMap::new(),
        }
    }

    /// Quantity held, or `None` if the resource has no ledger entry.
    pub fn amount(&self, r: ResourceType) -> Option<f64> {
        self.amounts.get(&r).copied()
    }

    /// Quantity held; missing entries read as zero.
    pub fn get(&self, r: ResourceType) -> f64 {
        self.amount(r).unwrap_or(0.0)
    }

    pub fn set(&mut self, r: ResourceType, v: f64) {
        self.amounts.insert(r, v.max(0.0));
    }

    /// Add `v` (may be negative). Positive additions count as production.
    pub fn add(&mut self, r: ResourceType, v: f64) {
        let slot = self.amounts.entry(r).or_insert(0.0);
        *slot = (*slot + v).max(0.0);
        if v > 0.0 {
            *self.lifetime.entry(r).or_insert(0.0) += v;
        }
    }

    pub fn deduct(&mut self, r: ResourceType, v: f64) {
        let slot = self.amounts.entry(r).or_insert(0.0);
        *slot = (*slot - v).max(0.0);
    }

    /// Apply one tick's totals: the net is applied once per resource and
    /// clamped, while lifetime grows by the gross production.
    pub fn apply(&mut self, production: &RateMap, consumption: &RateMap) {
        let touched: BTreeSet<ResourceType> =
            production.keys().chain(consumption.keys()).copied().collect();
        for r in touched {
            let p = production.get(&r).copied().unwrap_or(0.0);
            let c = consumption.get(&r).copied().unwrap_or(0.0);
            let slot = self.amounts.entry(r).or_insert(0.0);
            *slot = (*slot + p - c).max(0.0);
            if p > 0.0 {
                *self.lifetime.entry(r).or_insert(0.0) += p;
            }
        }
    }

    /// Returns `true` if the flag flipped.
    pub fn unlock(&mut self, r: ResourceType) -> bool {
        let flag = self.unlocked.entry(r).or_insert(false);
        let flipped = !*flag;
        *flag = true;
        flipped
    }

    /// `None` when the resource has no unlock entry at all.
    pub fn unlock_flag(&self, r: ResourceType) -> Option<bool> {
        self.unlocked.get(&r).copied()
    }

    pub fn is_unlocked(&self, r: ResourceType) -> bool {
        self.unlock_flag(r).unwrap_or(false)
    }

    pub fn lifetime(&self, r: ResourceType) -> f64 {
        self.lifetime.get(&r).copied().unwrap_or(0.0)
    }

    pub fn total_lifetime(&self) -> f64 {
        self.lifetime.values().sum()
    }

    pub fn lifetime_map(&self) -> &BTreeMap<ResourceType, f64> {
        &self.lifetime
    }

    /// Carry lifetime production over from another ledger (prestige).
    pub fn restore_lifetime(&mut self, lifetime: BTreeMap<ResourceType, f64>) {
        self.lifetime = lifetime;
    }

    /// Floor-clamp amounts and lifetime totals that bypassed the mutators
    /// (negative or NaN). Returns how many entries changed.
    pub fn normalize(&mut self) -> usize {
        clamp_non_negative(self.amounts.values_mut().chain(self.lifetime.values_mut()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (ResourceType, f64)> + '_ {
        self.amounts.iter().map(|(r, v)| (*r, *v))
    }
}

fn clamp_non_negative<'a>(values: impl IntoIterator<Item = &'a mut f64>) -> usize {
    let mut changed = 0;
    for v in values {
        if v.is_nan() || *v < 0.0 {
            *v = 0.0;
            changed += 1;
        }
    }
    changed
}

/// Per-type building ownership.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildingState {
    pub count: u32,
    /// Starts at 1, multiplied by the upgrade bonus on each upgrade.
    pub efficiency: f64,
    pub total_built: u64,
    pub unlocked: bool,
}

impl BuildingState {
    pub fn new(unlocked: bool) -> Self {
        Self {
            count: 0,
            efficiency: 1.0,
            total_built: 0,
            unlocked,
        }
    }
}

/// Prestige accumulators. Only ever grow through resets; spent by research
/// upgrades.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PrestigeState {
    pub research_points: f64,
    pub production_tokens: f64,
    pub innovation_points: f64,
    pub automation_credits: f64,
    pub total_resets: u32,
}

impl PrestigeState {
    pub fn get(&self, c: PrestigeCurrency) -> f64 {
        match c {
            PrestigeCurrency::Research => self.research_points,
            PrestigeCurrency::Production => self.production_tokens,
            PrestigeCurrency::Innovation => self.innovation_points,
            PrestigeCurrency::Automation => self.automation_credits,
        }
    }

    fn slot(&mut self, c: PrestigeCurrency) -> &mut f64 {
        match c {
            PrestigeCurrency::Research => &mut self.research_points,
            PrestigeCurrency::Production => &mut self.production_tokens,
            PrestigeCurrency::Innovation => &mut self.innovation_points,
            PrestigeCurrency::Automation => &mut self.automation_credits,
        }
    }

    pub fn add(&mut self, c: PrestigeCurrency, v: f64) {
        let slot = self.slot(c);
        *slot = (*slot + v).max(0.0);
    }

    pub fn spend(&mut self, c: PrestigeCurrency, v: f64) {
        let slot = self.slot(c);
        *slot = (*slot - v).max(0.0);
    }

    /// Floor-clamp the accumulators. Returns how many changed.
    pub fn normalize(&mut self) -> usize {
        clamp_non_negative([
            &mut self.research_points,
            &mut self.production_tokens,
            &mut self.innovation_points,
            &mut self.automation_credits,
        ])
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Stats {
    pub game_start_time: DateTime<Utc>,
    pub last_save_time: DateTime<Utc>,
    pub last_reset_time: Option<DateTime<Utc>>,
    pub total_play_time_secs: f64,
    pub total_buildings: u64,
    pub total_ticks: u64,
}

impl Stats {
    pub fn started_now() -> Self {
        let now = Utc::now();
        Self {
            game_start_time: now,
            last_save_time: now,
            last_reset_time: None,
            total_play_time_secs: 0.0,
            total_buildings: 0,
            total_ticks: 0,
        }
    }
}

/// UI preferences; persisted but never read by the rules.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    pub auto_save: bool,
    pub show_notifications: bool,
    pub show_floating_text: bool,
    pub sound_enabled: bool,
    pub particle_effects: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_save: true,
            show_notifications: true,
            show_floating_text: true,
            sound_enabled: false,
            particle_effects: true,
        }
    }
}

/// Aggregate root of a game session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GameState {
    pub version: String,
    pub ledger: ResourceLedger,
    pub buildings: BTreeMap<BuildingKind, BuildingState>,
    pub purchased_upgrades: BTreeSet<UpgradeId>,
    pub prestige: PrestigeState,
    /// State-level multiplier fed by global-bonus buildings.
    pub global_multiplier: f64,
    pub stats: Stats,
    pub settings: Settings,
}

impl GameState {
    /// Fresh game: every catalog building at zero, starting resources applied.
    pub fn new(catalog: &Catalog, config: &GameConfig) -> Self {
        let buildings = catalog
            .buildings()
            .map(|(kind, def)| (kind, BuildingState::new(def.unlocked)))
            .collect();
        Self {
            version: GAME_VERSION.to_string(),
            ledger: ResourceLedger::fresh(&config.starting_resources),
            buildings,
            purchased_upgrades: BTreeSet::new(),
            prestige: PrestigeState::default(),
            global_multiplier: 1.0,
            stats: Stats::started_now(),
            settings: Settings::default(),
        }
    }

    pub fn building(&self, kind: BuildingKind) -> Option<&BuildingState> {
        self.buildings.get(&kind)
    }

    pub fn building_mut(&mut self, kind: BuildingKind) -> Option<&mut BuildingState> {
        self.buildings.get_mut(&kind)
    }

    /// Units owned; zero for unknown kinds.
    pub fn count(&self, kind: BuildingKind) -> u32 {
        self.building(kind).map_or(0, |b| b.count)
    }

    pub fn is_purchased(&self, id: &UpgradeId) -> bool {
        self.purchased_upgrades.contains(id)
    }

    /// Deduct a cost bundle. Prestige currencies come out of the accumulators,
    /// everything else out of the ledger. Affordability is the caller's job.
    pub fn pay(&mut self, cost: &CostMap) {
        for (r, v) in cost {
            match r.prestige_currency() {
                Some(c) => self.prestige.spend(c, *v),
                None => self.ledger.deduct(*r, *v),
            }
        }
    }

    /// Total units owned across all types.
    pub fn total_units(&self) -> u64 {
        self.buildings.values().map(|b| u64::from(b.count)).sum()
    }

    /// Restore the data invariants on a state that did not come from the
    /// mutators, e.g. a decoded save: quantities and accumulators are
    /// floor-clamped at zero, efficiencies and the global multiplier raised
    /// to at least 1. Returns how many fields changed.
    pub fn normalize(&mut self) -> usize {
        let mut changed = self.ledger.normalize() + self.prestige.normalize();
        for b in self.buildings.values_mut() {
            if b.efficiency.is_nan() || b.efficiency < 1.0 {
                b.efficiency = 1.0;
                changed += 1;
            }
        }
        if self.global_multiplier.is_nan() || self.global_multiplier < 1.0 {
            self.global_multiplier = 1.0;
            changed += 1;
        }
        changed += clamp_non_negative([&mut self.stats.total_play_time_secs]);
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn fresh() -> GameState {
        GameState::new(&Catalog::standard(), &GameConfig::default())
    }

    #[test]
    fn new_game_matches_starting_layout() {
        let s = fresh();
        assert_eq!(s.version, GAME_VERSION);
        assert_eq!(s.ledger.get(ResourceType::IronOre), 50.0);
        assert_eq!(s.ledger.get(ResourceType::Stone), 20.0);
        assert_eq!(s.ledger.amount(ResourceType::Robots), Some(0.0));
        assert_eq!(s.buildings.len(), 30);
        assert!(s.building(BuildingKind::IronMine).unwrap().unlocked);
        assert!(!s.building(BuildingKind::StoneFurnace).unwrap().unlocked);
        assert!(s.ledger.is_unlocked(ResourceType::Coal));
        assert!(!s.ledger.is_unlocked(ResourceType::IronPlates));
        assert_eq!(s.global_multiplier, 1.0);
        assert_eq!(s.ledger.total_lifetime(), 0.0);
    }

    #[test]
    fn ledger_clamps_and_tracks_lifetime() {
        let mut l = ResourceLedger::fresh(&CostMap::new());
        l.add(ResourceType::Coal, 3.0);
        l.deduct(ResourceType::Coal, 10.0);
        assert_eq!(l.get(ResourceType::Coal), 0.0);
        assert_eq!(l.lifetime(ResourceType::Coal), 3.0);
        l.set(ResourceType::Coal, -4.0);
        assert_eq!(l.get(ResourceType::Coal), 0.0);
    }

    #[test]
    fn apply_nets_once() {
        let mut l = ResourceLedger::fresh(&CostMap::new());
        l.set(ResourceType::IronPlates, 1.0);
        let production: RateMap = [(ResourceType::IronPlates, 2.0)].into_iter().collect();
        let consumption: RateMap = [(ResourceType::IronPlates, 2.5)].into_iter().collect();
        l.apply(&production, &consumption);
        assert!((l.get(ResourceType::IronPlates) - 0.5).abs() < 1e-12);
        assert_eq!(l.lifetime(ResourceType::IronPlates), 2.0);
    }

    #[test]
    fn unlock_reports_flip_once() {
        let mut l = ResourceLedger::fresh(&CostMap::new());
        assert!(l.unlock(ResourceType::Steel));
        assert!(!l.unlock(ResourceType::Steel));
        assert!(!l.unlock(ResourceType::IronOre));
    }

    #[test]
    fn pay_routes_prestige_currencies() {
        let mut s = fresh();
        s.prestige.research_points = 12.0;
        s.ledger.set(ResourceType::ResearchPoints, 7.0);
        let cost: CostMap = [(ResourceType::ResearchPoints, 10.0), (ResourceType::Stone, 5.0)]
            .into_iter()
            .collect();
        s.pay(&cost);
        assert_eq!(s.prestige.research_points, 2.0);
        assert_eq!(s.ledger.get(ResourceType::ResearchPoints), 7.0);
        assert_eq!(s.ledger.get(ResourceType::Stone), 15.0);
    }

    #[test]
    fn json_roundtrip_preserves_state() {
        let mut s = fresh();
        s.purchased_upgrades.insert(UpgradeId::new("better_pickaxes"));
        s.prestige.add(PrestigeCurrency::Innovation, 3.0);
        let text = serde_json::to_string(&s).unwrap();
        let back: GameState = serde_json::from_str(&text).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn normalize_repairs_out_of_range_fields() {
        let mut s = fresh();
        assert_eq!(s.clone().normalize(), 0);
        s.ledger.amounts.insert(ResourceType::Stone, -5.0);
        s.ledger.lifetime.insert(ResourceType::Coal, f64::NAN);
        s.prestige.research_points = -2.0;
        s.building_mut(BuildingKind::IronMine).unwrap().efficiency = 0.5;
        s.global_multiplier = 0.0;
        assert_eq!(s.normalize(), 5);
        assert_eq!(s.ledger.get(ResourceType::Stone), 0.0);
        assert_eq!(s.ledger.lifetime(ResourceType::Coal), 0.0);
        assert_eq!(s.prestige.research_points, 0.0);
        assert_eq!(s.building(BuildingKind::IronMine).unwrap().efficiency, 1.0);
        assert_eq!(s.global_multiplier, 1.0);
        assert_eq!(s.normalize(), 0);
    }

    proptest! {
        #[test]
        fn ledger_never_negative(ops in proptest::collection::vec((0usize..22, -100.0f64..100.0), 0..64)) {
            let mut l = ResourceLedger::fresh(&CostMap::new());
            for (idx, v) in ops {
                let r = ResourceType::ALL[idx];
                let before = l.lifetime(r);
                l.add(r, v);
                prop_assert!(l.get(r) >= 0.0);
                prop_assert!(l.lifetime(r) >= before);
            }
        }
    }
}
