#![deny(warnings)]

//! Persistence layer: JSON save documents and binary snapshots.
//!
//! A save is the serialized [`GameState`], which carries its own `version`
//! string. Loading deep-merges the saved document over a freshly initialized
//! state so that fields added since the save was written are back-filled.
//! Nothing here touches a live game: callers decode fully, then swap.

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};
use tycoon_core::{GameState, GAME_VERSION};

/// Errors from encoding, decoding or file access.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("binary: {0}")]
    Binary(#[from] bincode::Error),
}

/// Returns the default path used for local saves.
pub fn default_save_path() -> PathBuf {
    PathBuf::from("./saves/factory-tycoon.json")
}

/// Serialize a state to a JSON save document.
pub fn encode_state(state: &GameState) -> Result<String, PersistenceError> {
    Ok(serde_json::to_string_pretty(state)?)
}

/// Merge `source` into `target`. Objects merge key by key; any other value in
/// `source` replaces the one in `target`.
pub fn deep_merge(target: &mut Value, source: Value) {
    match (target, source) {
        (Value::Object(dst), Value::Object(src)) => {
            for (key, value) in src {
                match dst.get_mut(&key) {
                    Some(slot) => deep_merge(slot, value),
                    None => {
                        dst.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

/// Decode a save document over `defaults`.
///
/// A version different from [`GAME_VERSION`] is logged and tolerated; the
/// decoded state is restamped with the current version. Unknown fields are
/// an error. Out-of-range values (negative quantities, efficiency below 1)
/// are clamped back into range and logged.
pub fn decode_state(text: &str, defaults: &GameState) -> Result<GameState, PersistenceError> {
    let saved: Value = serde_json::from_str(text)?;
    if let Some(version) = saved.get("version").and_then(Value::as_str) {
        if version != GAME_VERSION {
            warn!(saved = version, current = GAME_VERSION, "save version mismatch");
        }
    }
    let mut merged = serde_json::to_value(defaults)?;
    deep_merge(&mut merged, saved);
    let mut state: GameState = serde_json::from_value(merged)?;
    let repaired = state.normalize();
    if repaired > 0 {
        warn!(repaired, "save held out-of-range values; clamped");
    }
    state.version = GAME_VERSION.to_string();
    Ok(state)
}

/// Canonical binary encoding, used to compare states byte for byte.
pub fn snapshot_bytes(state: &GameState) -> Result<Vec<u8>, PersistenceError> {
    Ok(bincode::serialize(state)?)
}

/// Write a save document, creating parent directories as needed.
pub fn write_save(path: &Path, state: &GameState) -> Result<(), PersistenceError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let text = encode_state(state)?;
    fs::write(path, text)?;
    debug!(path = %path.display(), "game saved");
    Ok(())
}

/// Read a save document. `Ok(None)` when no save exists at `path`.
pub fn read_save(path: &Path, defaults: &GameState) -> Result<Option<GameState>, PersistenceError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    decode_state(&text, defaults).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use proptest::prelude::*;
    use serde_json::json;
    use tycoon_core::{BuildingKind, Catalog, GameConfig, ResourceType, UpgradeId};

    fn fresh() -> GameState {
        GameState::new(&Catalog::standard(), &GameConfig::default())
    }

    #[test]
    fn path_is_json() {
        assert!(default_save_path().to_string_lossy().ends_with(".json"));
    }

    #[test]
    fn merge_prefers_source_and_keeps_missing_keys() {
        let mut target = json!({"a": {"x": 1, "y": 2}, "b": [1, 2, 3], "c": true});
        deep_merge(
            &mut target,
            json!({"a": {"y": 5, "z": 6}, "b": [9], "d": "new"}),
        );
        assert_eq!(
            target,
            json!({"a": {"x": 1, "y": 5, "z": 6}, "b": [9], "c": true, "d": "new"})
        );
    }

    #[test]
    fn roundtrip_preserves_state() {
        let mut s = fresh();
        s.ledger.add(ResourceType::Coal, 12.5);
        s.purchased_upgrades.insert(UpgradeId::new("better_pickaxes"));
        s.building_mut(BuildingKind::CoalMine).unwrap().count = 4;
        let text = encode_state(&s).unwrap();
        let back = decode_state(&text, &fresh()).unwrap();
        assert_eq!(back.ledger, s.ledger);
        assert_eq!(back.buildings, s.buildings);
        assert_eq!(back.purchased_upgrades, s.purchased_upgrades);
        assert_eq!(back.stats, s.stats);
    }

    #[test]
    fn partial_save_is_backfilled() {
        let defaults = fresh();
        let text = r#"{
            "version": "0.9.0",
            "prestige": { "research_points": 4.0, "total_resets": 1 },
            "buildings": { "ironMine": { "count": 3 } }
        }"#;
        let s = decode_state(text, &defaults).unwrap();
        assert_eq!(s.version, GAME_VERSION);
        assert_eq!(s.prestige.research_points, 4.0);
        assert_eq!(s.prestige.total_resets, 1);
        assert_eq!(s.prestige.production_tokens, 0.0);
        let mine = s.building(BuildingKind::IronMine).unwrap();
        assert_eq!(mine.count, 3);
        assert_eq!(mine.efficiency, 1.0);
        assert!(mine.unlocked);
        assert_eq!(s.ledger.get(ResourceType::IronOre), 50.0);
        assert_eq!(s.settings, defaults.settings);
    }

    #[test]
    fn corrupt_or_unknown_input_is_an_error() {
        let defaults = fresh();
        assert!(matches!(
            decode_state("{not json", &defaults),
            Err(PersistenceError::Json(_))
        ));
        assert!(decode_state(r#"{"click_power": 3}"#, &defaults).is_err());
        assert!(decode_state(r#"{"buildings": {"workshop": {"count": 1}}}"#, &defaults).is_err());
        assert!(decode_state("[]", &defaults).is_err());
    }

    #[test]
    fn out_of_range_values_are_clamped_on_load() {
        let defaults = fresh();
        let text = r#"{
            "ledger": { "amounts": { "stone": -5.0 }, "lifetime": { "coal": -1.0 } },
            "prestige": { "production_tokens": -3.0 },
            "buildings": { "ironMine": { "count": 2, "efficiency": 0.25 } }
        }"#;
        let s = decode_state(text, &defaults).unwrap();
        assert_eq!(s.ledger.get(ResourceType::Stone), 0.0);
        assert_eq!(s.ledger.lifetime(ResourceType::Coal), 0.0);
        assert_eq!(s.prestige.production_tokens, 0.0);
        let mine = s.building(BuildingKind::IronMine).unwrap();
        assert_eq!(mine.count, 2);
        assert_eq!(mine.efficiency, 1.0);
        assert!(s.ledger.iter().all(|(_, v)| v >= 0.0));
    }

    #[test]
    fn snapshot_bytes_track_changes() {
        let s = fresh();
        let a = snapshot_bytes(&s).unwrap();
        assert_eq!(a, snapshot_bytes(&s.clone()).unwrap());
        let mut t = s.clone();
        t.stats.last_save_time = Utc::now() + chrono::Duration::seconds(5);
        assert_ne!(a, snapshot_bytes(&t).unwrap());
    }

    #[test]
    fn files_roundtrip_and_missing_is_none() {
        let dir = std::env::temp_dir().join(format!("tycoon-save-{}", std::process::id()));
        let path = dir.join("nested").join("save.json");
        let defaults = fresh();
        assert!(read_save(&path, &defaults).unwrap().is_none());
        let mut s = fresh();
        s.ledger.add(ResourceType::Stone, 7.0);
        write_save(&path, &s).unwrap();
        let loaded = read_save(&path, &defaults).unwrap().unwrap();
        assert_eq!(loaded.ledger, s.ledger);
        fs::remove_dir_all(&dir).unwrap();
    }

    proptest! {
        #[test]
        fn partial_building_entries_keep_defaults(i in 0usize..30, count in 0u32..10_000) {
            let defaults = fresh();
            let kind = BuildingKind::ALL[i];
            let text = json!({ "buildings": { kind.key(): { "count": count } } }).to_string();
            let s = decode_state(&text, &defaults).unwrap();
            let b = s.building(kind).unwrap();
            prop_assert_eq!(b.count, count);
            prop_assert_eq!(b.efficiency, 1.0);
            prop_assert_eq!(b.unlocked, defaults.building(kind).unwrap().unlocked);
            prop_assert_eq!(s.total_units(), u64::from(count));
        }
    }
}
