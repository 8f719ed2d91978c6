use std::collections::HashSet;

use crate::services::letter_classifier::is_vowel;

/// Reduce raw input to the letters the rules look at: upper-case A-Z only.
/// Digits, punctuation, whitespace and non-Latin letters are dropped.
pub fn clear_word(raw: &str) -> String {
    raw.to_uppercase()
        .chars()
        .filter(|c| c.is_ascii_uppercase())
        .collect()
}

/// Count vowels and consonants in an already cleared word
pub fn count_vowels_consonants(word: &str) -> (usize, usize) {
    let mut vowel_count = 0;
    let mut consonant_count = 0;

    for ch in word.chars() {
        if is_vowel(ch) {
            vowel_count += 1;
        } else {
            consonant_count += 1;
        }
    }

    (vowel_count, consonant_count)
}

pub fn count_char(text: &str, target: char) -> usize {
    text.chars().filter(|&c| c == target).count()
}

pub fn has_duplicate_letters(word: &str) -> bool {
    let mut seen = HashSet::new();
    word.chars().any(|c| !seen.insert(c))
}

/// Collapse every run of a repeated letter into a single letter ("BOBBY" -> "BOBY")
pub fn collapse_runs(word: &str) -> String {
    let mut collapsed = String::with_capacity(word.len());
    let mut last = None;
    for ch in word.chars() {
        if last != Some(ch) {
            collapsed.push(ch);
        }
        last = Some(ch);
    }
    collapsed
}

/// Count the letters of `word` that also occur in `line`
pub fn shared_letter_count(word: &str, line: &str) -> usize {
    word.chars().filter(|&c| line.contains(c)).count()
}

/// First letter of `line` that does not occur in `word`
pub fn first_missing_letter(word: &str, line: &str) -> Option<char> {
    line.chars().find(|&c| !word.contains(c))
}
