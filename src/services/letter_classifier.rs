/// Letters treated as vowels by every rule. Y is a consonant.
pub const VOWELS: [char; 5] = ['A', 'E', 'I', 'O', 'U'];

pub fn is_vowel(ch: char) -> bool {
    VOWELS.contains(&ch)
}

/// Number of enclosed regions in the capital letter's glyph
pub fn closed_regions(ch: char) -> usize {
    match ch {
        'A' | 'D' | 'O' | 'P' | 'Q' | 'R' => 1,
        'B' => 2,
        _ => 0,
    }
}

pub fn count_closed_regions(word: &str) -> usize {
    word.chars().map(closed_regions).sum()
}

/// True when no two neighbouring letters are both vowels or both consonants.
/// Words of zero or one letter alternate trivially.
pub fn is_alternating_vowel_consonant(word: &str) -> bool {
    let classes: Vec<bool> = word.chars().map(is_vowel).collect();
    classes.windows(2).all(|pair| pair[0] != pair[1])
}
