use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::services::predicates::rule;
use crate::services::word_loader::Lexicon;

/// Handed out when no word satisfies the requested rule
pub const SAMPLE_FALLBACK: &str = "Something went wrong... please contact an administrator.";

/// Pick a random word satisfying rule `rule_index`.
///
/// Rules backed directly by a word list sample from that list. Every other
/// rule walks the dictionary in shuffled order and returns the first match;
/// `None` when the list is empty or nothing matches.
pub fn sample_word<R: Rng + ?Sized>(
    lexicon: &Lexicon,
    rule_index: usize,
    rng: &mut R,
) -> Option<String> {
    let direct = match rule_index {
        1 => Some(lexicon.elements()),
        12 => Some(lexicon.adjectives()),
        19 => Some(lexicon.animals()),
        23 => Some(lexicon.countries()),
        _ => None,
    };
    if let Some(list) = direct {
        return list.choose(rng).cloned();
    }

    let rule = rule(rule_index)?;
    let mut candidates: Vec<&String> = lexicon.words().iter().collect();
    candidates.shuffle(rng);

    let found = candidates
        .into_iter()
        .enumerate()
        .find(|(_, word)| rule.matches(word, lexicon));

    match found {
        Some((trial, word)) => {
            debug!("Sampled {} for rule {} after {} trials", word, rule_index, trial + 1);
            Some(word.clone())
        }
        None => {
            debug!("No word satisfies rule {}", rule_index);
            None
        }
    }
}
