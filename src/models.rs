use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::services::dispatcher::BingoEngine;
use crate::services::game::GameState;

/// Application state shared across all handlers
pub struct AppState {
    pub engine: BingoEngine,
    /// Raw stored records by team name. One lock around the whole
    /// load -> update -> save sequence keeps a team's submissions in order.
    pub teams: Mutex<BTreeMap<String, Value>>,
}

impl AppState {
    pub fn new(engine: BingoEngine, seed: BTreeMap<String, Value>) -> Self {
        AppState {
            engine,
            teams: Mutex::new(seed),
        }
    }
}

/// A player action, selected by `mode`
#[derive(Debug, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum BingoRequest {
    GuessAWord {
        #[serde(default)]
        word: String,
    },
    DoSpoil,
    BuyASample {
        // Validated by the dispatcher so a bad index is a game message, not a parse error
        #[serde(default)]
        rule_index: Option<Value>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    GuessAWord,
    DoSpoil,
    BuyASample,
    Unknown,
}

impl BingoRequest {
    pub fn mode(&self) -> Mode {
        match self {
            BingoRequest::GuessAWord { .. } => Mode::GuessAWord,
            BingoRequest::DoSpoil => Mode::DoSpoil,
            BingoRequest::BuyASample { .. } => Mode::BuyASample,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BingoResponse {
    /// Empty on success, otherwise a message for the player
    pub error: String,
    /// Always true: the request was handled, whatever the game outcome
    pub correct: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub triggered_rules: Option<BTreeMap<usize, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spoil_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_word: Option<String>,
    pub bingo_coin_num: u32,
    pub bingo_spoiled: String,
}

impl BingoResponse {
    /// The empty reply for `mode`, echoing the economy fields of `state`
    pub fn new(mode: Mode, state: &GameState) -> Self {
        let (triggered_rules, sample_word) = match mode {
            Mode::BuyASample => (None, Some(String::new())),
            _ => (Some(BTreeMap::new()), None),
        };
        BingoResponse {
            error: String::new(),
            correct: true,
            triggered_rules,
            spoil_text: None,
            sample_word,
            bingo_coin_num: state.bingo_coin_num,
            bingo_spoiled: state.bingo_spoiled.clone(),
        }
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = error.into();
        self
    }
}

/// What a team sees when opening the puzzle page
#[derive(Debug, Serialize)]
pub struct StateView {
    pub bingo_coin_num: u32,
    pub bingo_spoiled: String,
    pub known_rules: BTreeMap<usize, String>,
    pub word_history: Vec<String>,
}

impl From<&GameState> for StateView {
    fn from(state: &GameState) -> Self {
        StateView {
            bingo_coin_num: state.bingo_coin_num,
            bingo_spoiled: state.bingo_spoiled.clone(),
            known_rules: state.known_rules.clone(),
            word_history: state.word_history.clone(),
        }
    }
}
