//! The 27 bingo rules.
//!
//! Rule indices are persisted in team records, so the order of [`RULES`] is
//! fixed forever: append, never reorder or renumber.

use std::collections::BTreeSet;

use crate::services::letter_classifier::{count_closed_regions, is_alternating_vowel_consonant};
use crate::services::word_loader::Lexicon;
use crate::utils::{
    collapse_runs, count_char, count_vowels_consonants, first_missing_letter,
    has_duplicate_letters, shared_letter_count,
};

pub const RULE_COUNT: usize = 27;
pub const NO_DUPLICATE_RULE: usize = 25;
pub const ALMOST_BINGO_RULE: usize = 26;

/// Rules every team knows from the start
pub const BONUS_RULES: [usize; 2] = [NO_DUPLICATE_RULE, ALMOST_BINGO_RULE];

pub type RuleTest = fn(&str, &Lexicon) -> bool;

/// A named test over a cleared word (ASCII A-Z only; the byte-slicing
/// rules rely on it)
pub struct Rule {
    pub index: usize,
    pub label: &'static str,
    test: RuleTest,
}

impl Rule {
    pub fn matches(&self, word: &str, lexicon: &Lexicon) -> bool {
        (self.test)(word, lexicon)
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("index", &self.index)
            .field("label", &self.label)
            .finish()
    }
}

macro_rules! rule {
    ($index:expr, $label:expr, $test:expr) => {
        Rule { index: $index, label: $label, test: $test }
    };
}

pub static RULES: [Rule; RULE_COUNT] = [
    rule!(0, "Has the /ɪ/ sound", |w, lx| lx.ipa(w).is_some_and(|t| t.contains('ɪ'))),
    rule!(1, "Chemical element", |w, lx| lx.is_element(w)),
    rule!(2, "Even length", |w, _| w.len() % 2 == 0),
    rule!(3, "Contains E and L", |w, _| w.contains('E') && w.contains('L')),
    rule!(4, "Length 6", |w, _| w.len() == 6),
    rule!(5, "Ends in ED", |w, _| w.ends_with("ED")),
    rule!(6, "Contains L", |w, _| w.contains('L')),
    rule!(7, "Silent B", has_silent_b),
    rule!(8, "Contains I", |w, _| w.contains('I')),
    rule!(9, "Drop one letter, still a word", can_drop_one_letter),
    rule!(10, "Contains Y", |w, _| w.contains('Y')),
    rule!(11, "Contains M", |w, _| w.contains('M')),
    rule!(12, "Adjective", |w, lx| lx.is_adjective(w)),
    rule!(13, "Compound word", is_compound_word),
    rule!(14, "Contains a 5-letter word", contains_five_letter_word),
    rule!(15, "Alternates vowel and consonant", |w, _| is_alternating_vowel_consonant(w)),
    rule!(16, "Capitals enclose 2 regions", |w, _| count_closed_regions(w) == 2),
    rule!(17, "Contains N", |w, _| w.contains('N')),
    rule!(18, "One more consonant than vowels", |w, _| {
        let (vowels, consonants) = count_vowels_consonants(w);
        consonants == vowels + 1
    }),
    rule!(19, "Animal", |w, lx| lx.is_animal(w)),
    rule!(20, "Contains T", |w, _| w.contains('T')),
    rule!(21, "Three vowels", |w, _| count_vowels_consonants(w).0 == 3),
    rule!(22, "Length 7 or 8", |w, _| matches!(w.len(), 7 | 8)),
    rule!(23, "Country", is_country_name),
    rule!(24, "Contains A and E", |w, _| w.contains('A') && w.contains('E')),
    rule!(25, "No repeated letters", |w, _| !has_duplicate_letters(w)),
    rule!(26, "Almost BINGO on exactly one line", |w, _| has_almost_line(w)),
];

pub fn rule(index: usize) -> Option<&'static Rule> {
    RULES.get(index)
}

pub fn label(index: usize) -> Option<&'static str> {
    rule(index).map(|r| r.label)
}

/// Indices of every rule the word satisfies, ascending
pub fn evaluate(word: &str, lexicon: &Lexicon) -> BTreeSet<usize> {
    RULES
        .iter()
        .filter(|r| r.matches(word, lexicon))
        .map(|r| r.index)
        .collect()
}

/// Fewer `b` sounds in the transcription than `B`s in the spelling
/// (doubled letters counted once, so EBBED has one B)
fn has_silent_b(word: &str, lexicon: &Lexicon) -> bool {
    match lexicon.ipa(word) {
        Some(transcription) => {
            count_char(transcription, 'b') < count_char(&collapse_runs(word), 'B')
        }
        None => false,
    }
}

fn can_drop_one_letter(word: &str, lexicon: &Lexicon) -> bool {
    (0..word.len()).any(|i| {
        let shorter = format!("{}{}", &word[..i], &word[i + 1..]);
        lexicon.is_word(&shorter)
    })
}

fn is_compound_word(word: &str, lexicon: &Lexicon) -> bool {
    if word == "IRELAND" || word.len() < 4 {
        return false;
    }
    (2..word.len() - 2).any(|i| lexicon.is_word(&word[..i]) && lexicon.is_word(&word[i..]))
}

fn contains_five_letter_word(word: &str, lexicon: &Lexicon) -> bool {
    if word.len() < 6 {
        return false;
    }
    (0..=word.len() - 5).any(|i| lexicon.is_word(&word[i..i + 5]))
}

fn is_country_name(word: &str, lexicon: &Lexicon) -> bool {
    lexicon.is_country(word)
}

/// Rows, columns and diagonals of the classic 5x5 letter BINGO card,
/// with I/J variants for the cell they share.
pub const ALMOST_LINES: [&str; 15] = [
    "ABCDE", "FGHIK", "FGHJK", "LMNOP", "QRSTU", "VWXYZ", "AFLQV", "BGMRW", "CHNSX", "DIOTY",
    "DJOTY", "EKPUZ", "AGNTZ", "EINRV", "EJNRV",
];

fn has_almost_line(word: &str) -> bool {
    if has_duplicate_letters(word) {
        return false;
    }
    let four_of = |line: &str| shared_letter_count(word, line) == 4;

    let counted = ALMOST_LINES
        .iter()
        .filter(|&&line| four_of(line))
        .filter(|&&line| match first_missing_letter(word, line) {
            Some('J') => false,
            Some('I') => four_of("DJOTY") || four_of("EJNRV"),
            _ => true,
        })
        .count();

    counted == 1
}
