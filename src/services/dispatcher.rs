use std::collections::{BTreeMap, BTreeSet};

use log::{error, info, warn};
use rand::Rng;
use serde_json::Value;
use thiserror::Error;

use crate::errors::{EngineError, MigrationError};
use crate::models::{BingoRequest, BingoResponse, Mode};
use crate::services::game::{update, GameState, BUY_A_SAMPLE_COST, SPOIL_COST};
use crate::services::generator::{sample_word, SAMPLE_FALLBACK};
use crate::services::migration::{load_or_default, salvage_economy};
use crate::services::predicates::{evaluate, RULE_COUNT};
use crate::services::word_loader::Lexicon;
use crate::utils::clear_word;

/// Guessing this word earns a special message (and nothing else)
pub const MILESTONE: &str = "DIYBINGOCARD";

pub const MILESTONE_MESSAGE: &str =
    "BINGO! 999999999 coins just landed in your account. Now send us a bingo card of your own design~";

pub const DEFAULT_SPOIL_TEXT: &str = "The spoiler for this bingo card has not been configured.";

pub const UNKNOWN_ERROR: &str = "An unknown error occurred, please contact an administrator.";

/// Bad input: reported to the player, state untouched
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Invalid {
    #[error("Please choose a word from the provided dictionary.")]
    NotInDictionary(String),
    #[error("An unknown error occurred, please contact an administrator.")]
    BadRuleIndex(Option<Value>),
    #[error("An unknown error occurred, please contact an administrator.")]
    UnknownRequest,
}

/// A well-formed action the team cannot take right now
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Precondition {
    #[error("You have already bought the spoiler!")]
    AlreadySpoiled,
    #[error("You do not have enough coins for the spoiler (it costs {cost}).")]
    CannotAffordSpoiler { cost: u32 },
    #[error("Build up a fortune with your wits first...")]
    CannotAffordSample,
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Invalid(#[from] Invalid),
    #[error(transparent)]
    Precondition(#[from] Precondition),
    #[error("internal failure: {0}")]
    Internal(#[from] EngineError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Success {
    Guessed {
        word: String,
        triggered: BTreeSet<usize>,
        newly_known: BTreeSet<usize>,
    },
    Spoiled {
        spoil_text: String,
    },
    Sampled {
        sample_word: String,
    },
}

pub type Outcome = Result<(GameState, Success), DispatchError>;

/// The bingo rules bound to one lexicon and spoiler.
///
/// Every action takes the current state by reference and returns the next
/// state; nothing is mutated in place, so a failed action leaves the
/// caller's state as it was.
pub struct BingoEngine {
    lexicon: Lexicon,
    spoil_text: String,
}

impl BingoEngine {
    /// A blank `spoil_text` is replaced by [`DEFAULT_SPOIL_TEXT`] so that
    /// buying the spoiler always leaves the team marked as spoiled.
    pub fn new(lexicon: Lexicon, spoil_text: impl Into<String>) -> Self {
        let mut spoil_text = spoil_text.into();
        if spoil_text.trim().is_empty() {
            warn!("Empty spoiler text, using the placeholder");
            spoil_text = DEFAULT_SPOIL_TEXT.to_string();
        }
        BingoEngine { lexicon, spoil_text }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn spoil_text(&self) -> &str {
        &self.spoil_text
    }

    /// Bring a stored record (or its absence) up to the current schema
    pub fn load_state(&self, raw: Option<Value>) -> Result<GameState, MigrationError> {
        load_or_default(raw, &self.spoil_text)
    }

    /// Best-effort balance and spoiler of a record [`Self::load_state`] rejected
    pub fn salvage_state(&self, raw: Option<&Value>) -> GameState {
        salvage_economy(raw, &self.spoil_text)
    }

    pub fn guess_a_word(&self, state: &GameState, raw_word: &str) -> Outcome {
        let word = clear_word(raw_word);
        if !self.lexicon.is_word(&word) {
            return Err(Invalid::NotInDictionary(word).into());
        }

        let triggered = evaluate(&word, &self.lexicon);
        let (next, newly_known) = update(state, &triggered, &word)?;
        info!(
            "Guessed {}: triggered {:?}, newly known {:?}, coins {} -> {}",
            word, triggered, newly_known, state.bingo_coin_num, next.bingo_coin_num
        );
        Ok((next, Success::Guessed { word, triggered, newly_known }))
    }

    pub fn do_spoil(&self, state: &GameState) -> Outcome {
        if state.is_spoiled() {
            return Err(Precondition::AlreadySpoiled.into());
        }
        if state.bingo_coin_num < SPOIL_COST {
            return Err(Precondition::CannotAffordSpoiler { cost: SPOIL_COST }.into());
        }

        let mut next = state.clone();
        next.bingo_coin_num -= SPOIL_COST;
        next.bingo_spoiled = self.spoil_text.clone();
        Ok((next, Success::Spoiled { spoil_text: self.spoil_text.clone() }))
    }

    pub fn buy_a_sample<R: Rng + ?Sized>(
        &self,
        state: &GameState,
        rule_index: Option<&Value>,
        rng: &mut R,
    ) -> Outcome {
        if state.bingo_coin_num < BUY_A_SAMPLE_COST {
            return Err(Precondition::CannotAffordSample.into());
        }
        let index = rule_index
            .and_then(Value::as_u64)
            .and_then(|idx| usize::try_from(idx).ok())
            .filter(|&idx| idx < RULE_COUNT)
            .ok_or_else(|| Invalid::BadRuleIndex(rule_index.cloned()))?;

        let sample_word = sample_word(&self.lexicon, index, rng).unwrap_or_else(|| {
            warn!("No sample found for rule {}", index);
            SAMPLE_FALLBACK.to_string()
        });
        info!("Sold sample {} for rule {}", sample_word, index);

        let mut next = state.clone();
        next.bingo_coin_num -= BUY_A_SAMPLE_COST;
        Ok((next, Success::Sampled { sample_word }))
    }

    /// Run one request against `state`.
    ///
    /// Returns the state to persist and the reply. Failures of any kind
    /// return `state` unchanged, and the reply echoes its economy fields.
    pub fn dispatch<R: Rng + ?Sized>(
        &self,
        state: GameState,
        body: Value,
        rng: &mut R,
    ) -> (GameState, BingoResponse) {
        info!("Bingo request: {}", body);

        let (mode, outcome) = match serde_json::from_value::<BingoRequest>(body) {
            Ok(request) => {
                let mode = request.mode();
                let outcome = match request {
                    BingoRequest::GuessAWord { word } => self.guess_a_word(&state, &word),
                    BingoRequest::DoSpoil => self.do_spoil(&state),
                    BingoRequest::BuyASample { rule_index } => {
                        self.buy_a_sample(&state, rule_index.as_ref(), rng)
                    }
                };
                (mode, outcome)
            }
            Err(e) => {
                warn!("Unrecognized bingo request: {}", e);
                (Mode::Unknown, Err(Invalid::UnknownRequest.into()))
            }
        };

        match outcome {
            Ok((next, success)) => {
                let response = respond(mode, &next, success);
                (next, response)
            }
            Err(DispatchError::Internal(e)) => {
                error!("Bingo request failed: {}", e);
                let response = BingoResponse::new(mode, &state).with_error(UNKNOWN_ERROR);
                (state, response)
            }
            Err(e) => {
                info!("Bingo request declined: {:?}", e);
                let response = BingoResponse::new(mode, &state).with_error(e.to_string());
                (state, response)
            }
        }
    }
}

fn respond(mode: Mode, next: &GameState, success: Success) -> BingoResponse {
    let response = BingoResponse::new(mode, next);
    match success {
        Success::Guessed { word, triggered, .. } => {
            // Only the word is echoed per rule; labels stay hidden until known
            let triggered_rules: BTreeMap<usize, String> =
                triggered.into_iter().map(|idx| (idx, word.clone())).collect();
            let message = if word == MILESTONE { MILESTONE_MESSAGE } else { "" };
            BingoResponse {
                triggered_rules: Some(triggered_rules),
                ..response.with_error(message)
            }
        }
        Success::Spoiled { spoil_text } => BingoResponse {
            spoil_text: Some(spoil_text),
            ..response
        },
        Success::Sampled { sample_word } => BingoResponse {
            sample_word: Some(sample_word),
            ..response
        },
    }
}
