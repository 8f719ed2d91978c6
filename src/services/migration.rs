//! Bringing stored team records up to the current [`GameState`] schema.
//!
//! Two older shapes are still found in storage:
//! - `known_rules` as a plain list of indices instead of an index -> label map
//! - `bingo_spoiled` as a boolean instead of the spoiler text
//!
//! Both are resolved here and nowhere else.

use std::collections::BTreeMap;

use log::warn;
use serde::Deserialize;
use serde_json::Value;

use crate::errors::MigrationError;
use crate::services::game::{GameState, INITIAL_COINS, STATE_VERSION};
use crate::services::predicates::{BONUS_RULES, RULE_COUNT};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredKnownRules {
    Indices(Vec<usize>),
    // JSON object keys are always strings
    Labelled(BTreeMap<String, String>),
}

impl Default for StoredKnownRules {
    fn default() -> Self {
        StoredKnownRules::Indices(Vec::new())
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredSpoiled {
    Flag(bool),
    Text(String),
    Unset,
}

impl Default for StoredSpoiled {
    fn default() -> Self {
        StoredSpoiled::Text(String::new())
    }
}

fn default_version() -> u32 {
    1
}

fn default_coins() -> u32 {
    INITIAL_COINS
}

#[derive(Debug, Deserialize)]
struct StoredState {
    #[serde(default = "default_version")]
    version: u32,
    #[serde(default = "default_coins")]
    bingo_coin_num: u32,
    #[serde(default)]
    known_rules: StoredKnownRules,
    #[serde(default)]
    bingo_spoiled: StoredSpoiled,
    #[serde(default)]
    word_history: Vec<String>,
}

fn check_index(idx: usize) -> Result<usize, MigrationError> {
    if idx < RULE_COUNT {
        Ok(idx)
    } else {
        Err(MigrationError::UnknownRule(idx.to_string()))
    }
}

fn parse_index(key: &str) -> Result<usize, MigrationError> {
    key.trim()
        .parse::<usize>()
        .map_err(|_| MigrationError::UnknownRule(key.to_string()))
        .and_then(check_index)
}

/// Decode a stored record of any known version into the current schema.
///
/// Labels are always taken from the current rule table, and the bonus rules
/// are granted on every load.
pub fn migrate(raw: Value, spoil_text: &str) -> Result<GameState, MigrationError> {
    let stored: StoredState = serde_json::from_value(raw)?;

    let indices: Vec<usize> = match stored.known_rules {
        StoredKnownRules::Indices(list) => list
            .into_iter()
            .map(check_index)
            .collect::<Result<_, _>>()?,
        StoredKnownRules::Labelled(map) => map
            .keys()
            .map(|key| parse_index(key))
            .collect::<Result<_, _>>()?,
    };

    let bingo_spoiled = match stored.bingo_spoiled {
        StoredSpoiled::Flag(true) => spoil_text.to_string(),
        StoredSpoiled::Flag(false) | StoredSpoiled::Unset => String::new(),
        StoredSpoiled::Text(text) => text,
    };

    if stored.version > STATE_VERSION {
        warn!(
            "Stored game state has version {} (newer than {}); reading it as {}",
            stored.version,
            STATE_VERSION,
            STATE_VERSION
        );
    }

    let mut state = GameState {
        version: STATE_VERSION,
        bingo_coin_num: stored.bingo_coin_num,
        known_rules: BTreeMap::new(),
        bingo_spoiled,
        word_history: stored.word_history,
    };
    state.grant(indices);
    state.grant(BONUS_RULES);
    Ok(state)
}

/// Load a record that may be absent: missing or `null` means a fresh team
pub fn load_or_default(raw: Option<Value>, spoil_text: &str) -> Result<GameState, MigrationError> {
    match raw {
        None | Some(Value::Null) => Ok(GameState::default()),
        Some(raw) => migrate(raw, spoil_text),
    }
}

/// The economy fields of a record that failed to migrate, read field by
/// field so error replies still show the team's balance and spoiler.
/// Anything unreadable falls back to the fresh-team value.
pub fn salvage_economy(raw: Option<&Value>, spoil_text: &str) -> GameState {
    let field = |name: &str| raw.and_then(|raw| raw.get(name));
    let bingo_coin_num = field("bingo_coin_num")
        .and_then(Value::as_u64)
        .and_then(|coins| u32::try_from(coins).ok())
        .unwrap_or(INITIAL_COINS);
    let bingo_spoiled = match field("bingo_spoiled") {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Bool(true)) => spoil_text.to_string(),
        _ => String::new(),
    };
    GameState {
        bingo_coin_num,
        bingo_spoiled,
        ..GameState::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SPOILER: &str = "The answer is BINGO";

    #[test]
    fn test_legacy_list_shape() {
        let raw = json!({
            "bingo_coin_num": 15,
            "known_rules": [0, 1, 2, 3, 4],
            "bingo_spoiled": false,
            "word_history": ["SILVER 1,2,3"]
        });
        let state = migrate(raw, SPOILER).unwrap();

        assert_eq!(state.version, STATE_VERSION);
        assert_eq!(state.bingo_coin_num, 15);
        assert_eq!(state.known_rules.keys().copied().collect::<Vec<_>>(), vec![0, 1, 2, 3, 4, 25, 26]);
        assert_eq!(state.known_rules[&1], "Chemical element");
        assert!(!state.is_spoiled());
        assert_eq!(state.word_history, vec!["SILVER 1,2,3"]);
    }

    #[test]
    fn test_current_map_shape_without_bonus_rules() {
        let raw = json!({
            "bingo_coin_num": 3,
            "known_rules": {"12": "stale label"},
            "bingo_spoiled": "",
            "word_history": []
        });
        let state = migrate(raw, SPOILER).unwrap();

        assert_eq!(state.known_rules.len(), 3);
        assert_eq!(state.known_rules[&12], "Adjective");
        assert!(state.known_rules.contains_key(&25));
        assert!(state.known_rules.contains_key(&26));
    }

    #[test]
    fn test_spoiled_flag_becomes_text() {
        let raw = json!({"bingo_coin_num": 0, "known_rules": {}, "bingo_spoiled": true, "word_history": []});
        let state = migrate(raw, SPOILER).unwrap();
        assert_eq!(state.bingo_spoiled, SPOILER);

        let raw = json!({"bingo_coin_num": 0, "known_rules": {}, "bingo_spoiled": "already here", "word_history": []});
        assert_eq!(migrate(raw, SPOILER).unwrap().bingo_spoiled, "already here");
    }

    #[test]
    fn test_null_spoiled_is_not_spoiled() {
        let raw = json!({"bingo_coin_num": 4, "bingo_spoiled": null});
        let state = migrate(raw, SPOILER).unwrap();
        assert_eq!(state.bingo_spoiled, "");
        assert_eq!(state.bingo_coin_num, 4);
    }

    #[test]
    fn test_salvage_economy() {
        let raw = json!({"bingo_coin_num": 60, "bingo_spoiled": "", "known_rules": [99]});
        let state = salvage_economy(Some(&raw), SPOILER);
        assert_eq!(state.bingo_coin_num, 60);
        assert_eq!(state.bingo_spoiled, "");

        let raw = json!({"bingo_coin_num": "lots", "bingo_spoiled": true});
        let state = salvage_economy(Some(&raw), SPOILER);
        assert_eq!(state.bingo_coin_num, INITIAL_COINS);
        assert_eq!(state.bingo_spoiled, SPOILER);

        assert_eq!(salvage_economy(Some(&json!([1, 2])), SPOILER), GameState::default());
        assert_eq!(salvage_economy(None, SPOILER), GameState::default());
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let state = migrate(json!({}), SPOILER).unwrap();
        assert_eq!(state, GameState::default());
    }

    #[test]
    fn test_migration_is_stable() {
        let first = migrate(json!({"known_rules": [7, 3]}), SPOILER).unwrap();
        let again = migrate(serde_json::to_value(&first).unwrap(), SPOILER).unwrap();
        assert_eq!(first, again);
    }

    #[test]
    fn test_unknown_rule_index_is_rejected() {
        let raw = json!({"known_rules": {"27": "??"}});
        assert!(matches!(migrate(raw, SPOILER), Err(MigrationError::UnknownRule(key)) if key == "27"));

        let raw = json!({"known_rules": [40]});
        assert!(matches!(migrate(raw, SPOILER), Err(MigrationError::UnknownRule(_))));

        let raw = json!({"known_rules": {"abc": "??"}});
        assert!(migrate(raw, SPOILER).is_err());
    }

    #[test]
    fn test_bad_shape_is_rejected() {
        assert!(matches!(migrate(json!({"bingo_coin_num": -4}), SPOILER), Err(MigrationError::Shape(_))));
        assert!(matches!(migrate(json!("not a record"), SPOILER), Err(MigrationError::Shape(_))));
    }

    #[test]
    fn test_absent_record() {
        assert_eq!(load_or_default(None, SPOILER).unwrap(), GameState::default());
        assert_eq!(load_or_default(Some(Value::Null), SPOILER).unwrap(), GameState::default());
    }
}
