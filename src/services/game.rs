use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::errors::EngineError;
use crate::services::board::newly_completed;
use crate::services::predicates::{label, BONUS_RULES};

pub const STATE_VERSION: u32 = 2;
pub const INITIAL_COINS: u32 = 10;
pub const COIN_REWARD: u32 = 5;
pub const SPOIL_COST: u32 = 50;
pub const BUY_A_SAMPLE_COST: u32 = 1;
pub const MAX_WORD_HISTORY: usize = 100;

/// One team's bingo progress, in the current schema.
///
/// `known_rules` only grows, `bingo_spoiled` is set at most once, and
/// `word_history` holds at most [`MAX_WORD_HISTORY`] distinct entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    pub version: u32,
    pub bingo_coin_num: u32,
    pub known_rules: BTreeMap<usize, String>,
    /// Empty until the spoiler is bought, then the full spoiler text
    pub bingo_spoiled: String,
    pub word_history: Vec<String>,
}

impl Default for GameState {
    fn default() -> Self {
        let mut state = GameState {
            version: STATE_VERSION,
            bingo_coin_num: INITIAL_COINS,
            known_rules: BTreeMap::new(),
            bingo_spoiled: String::new(),
            word_history: Vec::new(),
        };
        state.grant(BONUS_RULES);
        state
    }
}

impl GameState {
    pub fn is_spoiled(&self) -> bool {
        !self.bingo_spoiled.is_empty()
    }

    pub fn known_indices(&self) -> BTreeSet<usize> {
        self.known_rules.keys().copied().collect()
    }

    /// Mark rules as known with their current labels. Known rules stay untouched;
    /// indices outside the table are ignored.
    pub fn grant<I: IntoIterator<Item = usize>>(&mut self, indices: I) {
        for index in indices {
            if let Some(label) = label(index) {
                self.known_rules.entry(index).or_insert_with(|| label.to_string());
            }
        }
    }

    /// Append a history entry, moving an identical older entry to the end and
    /// evicting the oldest beyond the cap
    pub fn record(&mut self, entry: String) {
        self.word_history.retain(|old| *old != entry);
        self.word_history.push(entry);
        if self.word_history.len() > MAX_WORD_HISTORY {
            let excess = self.word_history.len() - MAX_WORD_HISTORY;
            self.word_history.drain(..excess);
        }
    }
}

/// `"ICELAND 5,8,10"`: the word and its triggered rules, numbered from 1
pub fn history_entry(word: &str, triggered: &BTreeSet<usize>) -> String {
    let numbers: Vec<String> = triggered.iter().map(|idx| (idx + 1).to_string()).collect();
    format!("{} {}", word, numbers.join(","))
}

/// Apply one scored submission. Returns the new state and the rules that
/// became known because a line was completed.
pub fn update(
    state: &GameState,
    triggered: &BTreeSet<usize>,
    word: &str,
) -> Result<(GameState, BTreeSet<usize>), EngineError> {
    let known = state.known_indices();
    let newly_known: BTreeSet<usize> = newly_completed(&known, triggered)
        .difference(&known)
        .copied()
        .collect();

    let reward = COIN_REWARD * newly_known.len() as u32;
    let balance = state
        .bingo_coin_num
        .checked_add(reward)
        .ok_or(EngineError::CoinOverflow { balance: state.bingo_coin_num, reward })?;

    let mut next = state.clone();
    next.grant(newly_known.iter().copied());
    next.bingo_coin_num = balance;
    next.record(history_entry(word, triggered));

    Ok((next, newly_known))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[usize]) -> BTreeSet<usize> {
        items.iter().copied().collect()
    }

    #[test]
    fn test_default_state() {
        let state = GameState::default();
        assert_eq!(state.bingo_coin_num, 10);
        assert_eq!(state.known_indices(), set(&[25, 26]));
        assert!(!state.is_spoiled());
        assert!(state.word_history.is_empty());
        assert_eq!(state.version, STATE_VERSION);
    }

    #[test]
    fn test_history_entry_format() {
        let triggered = set(&[4, 7, 9, 17, 18, 19, 22, 23, 24, 25, 26]);
        assert_eq!(history_entry("ICELAND", &triggered), "ICELAND 5,8,10,18,19,20,23,24,25,26,27");
        assert_eq!(history_entry("XYZ", &BTreeSet::new()), "XYZ ");
    }

    #[test]
    fn test_iceland_completes_nothing() {
        let state = GameState::default();
        let triggered = set(&[4, 7, 9, 17, 18, 19, 22, 23, 24, 25, 26]);
        let (next, newly) = update(&state, &triggered, "ICELAND").unwrap();

        assert!(newly.is_empty());
        assert_eq!(next.bingo_coin_num, 10);
        assert_eq!(next.known_indices(), set(&[25, 26]));
        assert_eq!(next.word_history, vec!["ICELAND 5,8,10,18,19,20,23,24,25,26,27"]);
    }

    #[test]
    fn test_completed_row_pays_per_new_rule() {
        let state = GameState::default();
        let (next, newly) = update(&state, &set(&[0, 1, 2, 3, 4, 25]), "WORD").unwrap();

        assert_eq!(newly, set(&[0, 1, 2, 3, 4]));
        assert_eq!(next.bingo_coin_num, 10 + 5 * 5);
        assert_eq!(next.known_rules.get(&2).map(String::as_str), Some("Even length"));
    }

    #[test]
    fn test_shared_cells_pay_once() {
        let state = GameState::default();
        let (state, _) = update(&state, &set(&[0, 1, 2, 3, 4]), "ROW").unwrap();
        assert_eq!(state.bingo_coin_num, 35);

        // Column 0 reuses the known 0; only 5, 10, 15, 20 are new
        let (state, newly) = update(&state, &set(&[5, 10, 15, 20]), "COLUMN").unwrap();
        assert_eq!(newly, set(&[5, 10, 15, 20]));
        assert_eq!(state.bingo_coin_num, 55);
    }

    #[test]
    fn test_resubmission_is_idempotent() {
        let state = GameState::default();
        let triggered = set(&[0, 1, 2, 3, 4]);
        let (first, _) = update(&state, &triggered, "ROW").unwrap();
        let (second, newly) = update(&first, &triggered, "ROW").unwrap();

        assert!(newly.is_empty());
        assert_eq!(second.bingo_coin_num, first.bingo_coin_num);
        assert_eq!(second.known_rules, first.known_rules);
        assert_eq!(second.word_history, first.word_history);
    }

    #[test]
    fn test_history_is_bounded_and_refreshed() {
        let mut state = GameState::default();
        for n in 0..150 {
            state = update(&state, &BTreeSet::new(), &format!("W{}", n)).unwrap().0;
        }
        assert_eq!(state.word_history.len(), MAX_WORD_HISTORY);
        assert_eq!(state.word_history.first().map(String::as_str), Some("W50 "));
        assert_eq!(state.word_history.last().map(String::as_str), Some("W149 "));

        let state = update(&state, &BTreeSet::new(), "W60").unwrap().0;
        assert_eq!(state.word_history.len(), MAX_WORD_HISTORY);
        assert_eq!(state.word_history.last().map(String::as_str), Some("W60 "));
        assert_eq!(state.word_history.iter().filter(|e| *e == "W60 ").count(), 1);
    }

    #[test]
    fn test_coin_overflow_is_an_error() {
        let mut state = GameState::default();
        state.bingo_coin_num = u32::MAX;
        let result = update(&state, &set(&[0, 1, 2, 3, 4]), "ROW");
        assert!(matches!(result, Err(EngineError::CoinOverflow { .. })));
    }
}
