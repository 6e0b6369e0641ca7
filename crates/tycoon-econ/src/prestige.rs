//! Research reset yields and the permanent research bonus.

use crate::{Bonuses, Rules};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tycoon_core::{GameState, PrestigeCurrency};

/// Currencies a research reset would grant right now.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ResetYield {
    pub research_points: u64,
    pub production_tokens: u64,
    pub innovation_points: u64,
    pub automation_credits: u64,
}

impl ResetYield {
    pub fn is_worthwhile(&self) -> bool {
        self.research_points > 0
            || self.production_tokens > 0
            || self.innovation_points > 0
            || self.automation_credits > 0
    }

    pub fn get(&self, c: PrestigeCurrency) -> u64 {
        match c {
            PrestigeCurrency::Research => self.research_points,
            PrestigeCurrency::Production => self.production_tokens,
            PrestigeCurrency::Innovation => self.innovation_points,
            PrestigeCurrency::Automation => self.automation_credits,
        }
    }
}

/// Summary of the prestige layer for display.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResearchReport {
    pub current_bonus: f64,
    pub total_resets: u32,
    pub next_reset: ResetYield,
    pub seconds_since_last_reset: i64,
    /// Research points held per hour since the game started; zero before the
    /// first reset.
    pub points_per_hour: f64,
}

// Saturating float-to-int; negative and NaN become 0.
fn whole(v: f64) -> u64 {
    v.floor() as u64
}

impl Rules<'_> {
    pub fn reset_yield(&self, state: &GameState) -> ResetYield {
        let total = state.ledger.total_lifetime();
        let base = self.config.reset_cost_base;
        let mut types_owned = 0u64;
        let mut alternatives_owned = 0u64;
        for (kind, b) in &state.buildings {
            if b.count == 0 {
                continue;
            }
            types_owned += 1;
            if self.catalog.building(*kind).is_some_and(|d| d.is_alternative) {
                alternatives_owned += 1;
            }
        }
        ResetYield {
            research_points: whole((total / base).sqrt()),
            production_tokens: whole(total / (base * 2.0)),
            innovation_points: whole(types_owned as f64 * alternatives_owned as f64 * 0.5),
            automation_credits: state.total_units() / 10,
        }
    }

    /// Production multiplier from held prestige currencies.
    pub fn research_bonus(&self, state: &GameState) -> f64 {
        let bonuses = self.bonuses(&state.purchased_upgrades);
        self.research_bonus_with(state, &bonuses)
    }

    pub(crate) fn research_bonus_with(&self, state: &GameState, bonuses: &Bonuses<'_>) -> f64 {
        let p = &state.prestige;
        let cfg = self.config;
        1.0 + p.research_points * cfg.research_rate * bonuses.research_multiplier()
            + p.production_tokens * cfg.production_token_bonus
            + p.innovation_points * cfg.innovation_point_bonus
            + p.automation_credits * cfg.automation_credit_bonus
    }

    /// State after a research reset: a fresh game that keeps the prestige
    /// accumulators (plus `gained`), the purchased upgrades, lifetime
    /// production, statistics and settings.
    pub fn after_reset(&self, state: &GameState, gained: ResetYield, now: DateTime<Utc>) -> GameState {
        let mut next = GameState::new(self.catalog, self.config);
        next.prestige = state.prestige.clone();
        for c in [
            PrestigeCurrency::Research,
            PrestigeCurrency::Production,
            PrestigeCurrency::Innovation,
            PrestigeCurrency::Automation,
        ] {
            next.prestige.add(c, gained.get(c) as f64);
        }
        next.prestige.total_resets += 1;
        next.purchased_upgrades = state.purchased_upgrades.clone();
        next.ledger.restore_lifetime(state.ledger.lifetime_map().clone());
        next.stats = state.stats.clone();
        next.stats.last_reset_time = Some(now);
        next.settings = state.settings.clone();
        next
    }

    pub fn research_report(&self, state: &GameState, now: DateTime<Utc>) -> ResearchReport {
        let since = state
            .stats
            .last_reset_time
            .unwrap_or(state.stats.game_start_time);
        let points_per_hour = if state.prestige.total_resets == 0 {
            0.0
        } else {
            let hours = (now - state.stats.game_start_time).num_milliseconds() as f64 / 3.6e6;
            if hours > 0.0 {
                state.prestige.research_points / hours
            } else {
                0.0
            }
        };
        ResearchReport {
            current_bonus: self.research_bonus(state),
            total_resets: state.prestige.total_resets,
            next_reset: self.reset_yield(state),
            seconds_since_last_reset: (now - since).num_seconds(),
            points_per_hour,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::{standard, with_units};
    use chrono::Duration;
    use tycoon_core::{BuildingKind as B, ResourceType as R, UpgradeId};

    #[test]
    fn fresh_game_is_not_worth_resetting() {
        let (catalog, cfg) = standard();
        let rules = Rules::new(&catalog, &cfg);
        let s = GameState::new(&catalog, &cfg);
        assert_eq!(rules.reset_yield(&s), ResetYield::default());
        assert!(!rules.reset_yield(&s).is_worthwhile());
        assert_eq!(rules.research_bonus(&s), 1.0);
    }

    #[test]
    fn yields_follow_lifetime_and_portfolio() {
        let (catalog, cfg) = standard();
        let rules = Rules::new(&catalog, &cfg);
        let mut s = with_units(
            &catalog,
            &cfg,
            &[
                (B::IronMine, 12),
                (B::CoalMine, 3),
                (B::CoalGasifier, 2),
                (B::WindTurbine, 1),
            ],
        );
        s.ledger.add(R::IronOre, 4_000_000.0);
        s.ledger.add(R::Coal, 500_000.0);
        let y = rules.reset_yield(&s);
        assert_eq!(y.research_points, 2); // sqrt(4.5) = 2.12
        assert_eq!(y.production_tokens, 2); // 4.5e6 / 2e6
        assert_eq!(y.innovation_points, 4); // 4 types * 2 alternatives * 0.5
        assert_eq!(y.automation_credits, 1); // 18 units
        assert!(y.is_worthwhile());
    }

    #[test]
    fn ten_units_alone_are_worthwhile() {
        let (catalog, cfg) = standard();
        let rules = Rules::new(&catalog, &cfg);
        let s = with_units(&catalog, &cfg, &[(B::IronMine, 10)]);
        let y = rules.reset_yield(&s);
        assert_eq!(y.automation_credits, 1);
        assert_eq!(y.innovation_points, 0);
        assert!(y.is_worthwhile());
    }

    #[test]
    fn bonus_weights_each_currency() {
        let (catalog, cfg) = standard();
        let rules = Rules::new(&catalog, &cfg);
        let mut s = GameState::new(&catalog, &cfg);
        s.prestige.research_points = 10.0;
        s.prestige.production_tokens = 20.0;
        s.prestige.innovation_points = 10.0;
        s.prestige.automation_credits = 50.0;
        let expected = 1.0 + 0.1 + 0.1 + 0.03 + 0.1;
        assert!((rules.research_bonus(&s) - expected).abs() < 1e-12);
        s.purchased_upgrades.insert(UpgradeId::new("research_efficiency"));
        assert!((rules.research_bonus(&s) - (expected + 0.05)).abs() < 1e-12);
    }

    #[test]
    fn reset_keeps_the_permanent_subset() {
        let (catalog, cfg) = standard();
        let rules = Rules::new(&catalog, &cfg);
        let mut s = with_units(&catalog, &cfg, &[(B::IronMine, 10), (B::StoneFurnace, 2)]);
        s.purchased_upgrades.insert(UpgradeId::new("better_pickaxes"));
        s.prestige.research_points = 3.0;
        s.prestige.total_resets = 2;
        s.ledger.add(R::IronPlates, 250.0);
        s.settings.sound_enabled = true;
        s.stats.total_play_time_secs = 99.0;
        let gained = rules.reset_yield(&s);
        let now = s.stats.game_start_time + Duration::hours(2);
        let next = rules.after_reset(&s, gained, now);

        assert_eq!(next.purchased_upgrades, s.purchased_upgrades);
        assert_eq!(next.prestige.total_resets, 3);
        assert_eq!(next.prestige.research_points, 3.0);
        assert_eq!(next.prestige.automation_credits, 1.0);
        assert!(next.buildings.values().all(|b| b.count == 0));
        assert!(!next.building(B::StoneFurnace).unwrap().unlocked);
        assert_eq!(next.ledger.get(R::IronOre), 50.0);
        assert_eq!(next.ledger.get(R::IronPlates), 0.0);
        assert_eq!(next.ledger.lifetime(R::IronPlates), 250.0);
        assert_eq!(next.stats.total_play_time_secs, 99.0);
        assert_eq!(next.stats.last_reset_time, Some(now));
        assert!(next.settings.sound_enabled);

        let report = rules.research_report(&next, now + Duration::minutes(5));
        assert_eq!(report.total_resets, 3);
        assert_eq!(report.seconds_since_last_reset, 300);
        assert!(report.points_per_hour > 0.0);
    }
}
