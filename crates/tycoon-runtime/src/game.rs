//! The state owner: one value per game session.

use crate::event::{EventBus, GameEvent, GameListener, ListenerId};
use chrono::{DateTime, Utc};
use persistence::PersistenceError;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};
use tycoon_core::{BuildingKind, Catalog, GameConfig, GameState, ResourceType, Settings, UpgradeId};
use tycoon_econ::{
    ActionError, BuildingOutput, NextUnlock, ResearchReport, ResetYield, ResourceRate, Rules,
    TickDeltas,
};

/// A game session: static rules, the mutable state and its listeners.
///
/// Every mutation goes through a method here. Failed actions leave the state
/// exactly as it was and emit [`GameEvent::ActionFailed`].
#[derive(Debug)]
pub struct Game {
    catalog: Arc<Catalog>,
    config: GameConfig,
    state: GameState,
    bus: EventBus,
}

impl Game {
    pub fn new(catalog: Arc<Catalog>, config: GameConfig) -> Self {
        let state = GameState::new(&catalog, &config);
        Self::with_state(catalog, config, state)
    }

    pub fn with_state(catalog: Arc<Catalog>, config: GameConfig, state: GameState) -> Self {
        Self {
            catalog,
            config,
            state,
            bus: EventBus::default(),
        }
    }

    /// Standard catalog, default tuning.
    pub fn standard() -> Self {
        Self::new(Arc::new(Catalog::standard()), GameConfig::default())
    }

    pub fn rules(&self) -> Rules<'_> {
        Rules::new(&self.catalog, &self.config)
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Read-only view of the live state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Owned copy of the current state.
    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    pub fn subscribe<L: GameListener + 'static>(&mut self, listener: L) -> ListenerId {
        self.bus.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.bus.unsubscribe(id)
    }

    /// Announce the current state to listeners, e.g. after wiring up a UI.
    pub fn announce(&mut self) {
        self.bus.emit(&self.state, &GameEvent::Initialize);
    }

    fn refuse<T>(&mut self, action: &'static str, error: ActionError) -> Result<T, ActionError> {
        debug!(action, %error, "action refused");
        self.bus.emit(
            &self.state,
            &GameEvent::ActionFailed {
                action,
                error: error.clone(),
            },
        );
        Err(error)
    }

    /// Advance the simulation by `dt` seconds.
    pub fn tick(&mut self, dt: f64) -> Result<TickDeltas, ActionError> {
        if !dt.is_finite() || dt < 0.0 {
            return self.refuse("tick", ActionError::InvalidDelta(dt));
        }
        let deltas = Rules::new(&self.catalog, &self.config).simulate(&self.state, dt);
        self.state.ledger.apply(&deltas.production, &deltas.consumption);
        self.state.stats.total_play_time_secs += dt;
        self.state.stats.total_ticks += 1;
        let event = GameEvent::Tick {
            dt,
            deltas: deltas.clone(),
        };
        self.bus.emit(&self.state, &event);
        Ok(deltas)
    }

    /// Build one unit of `kind`, then re-evaluate unlocks.
    pub fn build(&mut self, kind: BuildingKind) -> Result<(), ActionError> {
        let rules = Rules::new(&self.catalog, &self.config);
        let cost = match rules.check_build(&self.state, kind) {
            Ok(cost) => cost,
            Err(e) => return self.refuse("build", e),
        };
        self.state.pay(&cost);
        let count = match self.state.building_mut(kind) {
            Some(b) => {
                b.count += 1;
                b.total_built += 1;
                b.count
            }
            None => 0,
        };
        self.state.stats.total_buildings = self.state.total_units();
        debug!(building = %kind, count, "built");
        self.bus.emit(
            &self.state,
            &GameEvent::BuildingAdded {
                building: kind,
                count,
            },
        );
        self.check_unlocks();
        self.state.global_multiplier =
            Rules::new(&self.catalog, &self.config).state_global_multiplier(&self.state);
        Ok(())
    }

    fn check_unlocks(&mut self) {
        let unlocked = Rules::new(&self.catalog, &self.config).newly_unlocked_buildings(&self.state);
        for kind in unlocked {
            if let Some(b) = self.state.building_mut(kind) {
                b.unlocked = true;
            }
            if let Some(def) = self.catalog.building(kind) {
                for r in def.produces.keys() {
                    self.state.ledger.unlock(*r);
                }
            }
            info!(building = %kind, "building unlocked");
            self.bus
                .emit(&self.state, &GameEvent::BuildingUnlocked { building: kind });
        }
    }

    /// Raise the efficiency of `kind`. Returns the new efficiency.
    pub fn upgrade(&mut self, kind: BuildingKind) -> Result<f64, ActionError> {
        let cost = match Rules::new(&self.catalog, &self.config).check_upgrade(&self.state, kind) {
            Ok(cost) => cost,
            Err(e) => return self.refuse("upgrade", e),
        };
        self.state.pay(&cost);
        let bonus = self.config.upgrade_efficiency_bonus;
        let efficiency = match self.state.building_mut(kind) {
            Some(b) => {
                b.efficiency *= bonus;
                b.efficiency
            }
            None => 1.0,
        };
        self.bus.emit(
            &self.state,
            &GameEvent::BuildingUpgraded {
                building: kind,
                efficiency,
            },
        );
        Ok(efficiency)
    }

    pub fn purchase_upgrade(&mut self, id: &UpgradeId) -> Result<(), ActionError> {
        let cost = match Rules::new(&self.catalog, &self.config).check_purchase(&self.state, id) {
            Ok(cost) => cost,
            Err(e) => return self.refuse("purchaseUpgrade", e),
        };
        self.state.pay(&cost);
        self.state.purchased_upgrades.insert(id.clone());
        debug!(upgrade = %id, "upgrade purchased");
        self.bus
            .emit(&self.state, &GameEvent::UpgradePurchased { id: id.clone() });
        Ok(())
    }

    /// Trade the current run for prestige currencies.
    pub fn perform_reset(&mut self) -> Result<ResetYield, ActionError> {
        let rules = Rules::new(&self.catalog, &self.config);
        let gained = match rules.check_reset(&self.state) {
            Ok(gained) => gained,
            Err(e) => return self.refuse("performReset", e),
        };
        self.state = rules.after_reset(&self.state, gained, Utc::now());
        info!(?gained, resets = self.state.prestige.total_resets, "research reset");
        self.bus
            .emit(&self.state, &GameEvent::ResearchReset { gained });
        Ok(gained)
    }

    /// Discard everything, prestige included.
    pub fn new_game(&mut self) {
        self.state = GameState::new(&self.catalog, &self.config);
        self.bus.emit(&self.state, &GameEvent::Reset);
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.state.settings = settings;
        self.bus.emit(&self.state, &GameEvent::Settings);
    }

    fn finish_save<T>(
        &mut self,
        now: DateTime<Utc>,
        result: Result<T, PersistenceError>,
    ) -> Result<T, PersistenceError> {
        let ok = result.is_ok();
        if ok {
            self.state.stats.last_save_time = now;
        }
        self.bus.emit(&self.state, &GameEvent::Save { ok });
        result
    }

    fn finish_load(
        &mut self,
        result: Result<GameState, PersistenceError>,
    ) -> Result<(), PersistenceError> {
        match result {
            Ok(state) => {
                self.state = state;
                self.bus.emit(&self.state, &GameEvent::Load { ok: true });
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "load failed; keeping current game");
                self.bus.emit(&self.state, &GameEvent::Load { ok: false });
                Err(e)
            }
        }
    }

    fn stamped(&self, now: DateTime<Utc>) -> GameState {
        let mut state = self.state.clone();
        state.stats.last_save_time = now;
        state
    }

    /// Serialize the state, stamping the save time on success.
    pub fn save_json(&mut self) -> Result<String, PersistenceError> {
        let now = Utc::now();
        let result = persistence::encode_state(&self.stamped(now));
        self.finish_save(now, result)
    }

    /// Replace the state with a decoded save. On error nothing changes.
    pub fn load_json(&mut self, text: &str) -> Result<(), PersistenceError> {
        let defaults = GameState::new(&self.catalog, &self.config);
        let result = persistence::decode_state(text, &defaults);
        self.finish_load(result)
    }

    pub fn save_to(&mut self, path: &Path) -> Result<(), PersistenceError> {
        let now = Utc::now();
        let result = persistence::write_save(path, &self.stamped(now));
        self.finish_save(now, result)
    }

    /// Load from a file. `Ok(false)` when no save exists.
    pub fn load_from(&mut self, path: &Path) -> Result<bool, PersistenceError> {
        let defaults = GameState::new(&self.catalog, &self.config);
        match persistence::read_save(path, &defaults) {
            Ok(None) => Ok(false),
            Ok(Some(state)) => self.finish_load(Ok(state)).map(|()| true),
            Err(e) => self.finish_load(Err(e)).map(|()| false),
        }
    }

    pub fn can_build(&self, kind: BuildingKind) -> bool {
        self.rules().can_build(&self.state, kind)
    }

    pub fn can_upgrade(&self, kind: BuildingKind) -> bool {
        self.rules().can_upgrade(&self.state, kind)
    }

    pub fn can_purchase(&self, id: &UpgradeId) -> bool {
        self.rules().can_purchase(&self.state, id)
    }

    pub fn reset_yield(&self) -> ResetYield {
        self.rules().reset_yield(&self.state)
    }

    pub fn research_bonus(&self) -> f64 {
        self.rules().research_bonus(&self.state)
    }

    pub fn research_report(&self) -> ResearchReport {
        self.rules().research_report(&self.state, Utc::now())
    }

    pub fn rate(&self, r: ResourceType) -> ResourceRate {
        self.rules().rate(&self.state, r)
    }

    pub fn building_output(&self, kind: BuildingKind) -> Option<BuildingOutput> {
        self.rules().building_output(&self.state, kind, 1.0)
    }

    pub fn next_unlock(&self) -> Option<NextUnlock> {
        self.rules().next_unlock(&self.state)
    }
}
