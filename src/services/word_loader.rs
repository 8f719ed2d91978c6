use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use log::info;

use crate::errors::LexiconError;

/// Normalize a country name the way the country rule compares it
pub fn normalize_country(name: &str) -> String {
    name.replace([' ', '-'], "").to_uppercase()
}

/// Immutable word lists backing the rules. Loaded once, shared read-only.
#[derive(Debug, Default)]
pub struct Lexicon {
    words: HashSet<String>,
    adjectives: HashSet<String>,
    animals: HashSet<String>,
    countries: HashSet<String>,
    elements: HashSet<String>,
    ipa: HashMap<String, String>,
    // Sorted copies for uniform sampling. Entries with apostrophes,
    // accents or digits are left out: no cleared guess can equal them.
    word_list: Vec<String>,
    adjective_list: Vec<String>,
    animal_list: Vec<String>,
    country_list: Vec<String>,
    element_list: Vec<String>,
}

fn is_cleared(word: &str) -> bool {
    word.chars().all(|ch| ch.is_ascii_uppercase())
}

/// Sorted entries that a cleared guess could ever equal
fn sorted(set: &HashSet<String>) -> Vec<String> {
    let mut list: Vec<String> = set.iter().filter(|w| is_cleared(w)).cloned().collect();
    list.sort();
    list
}

fn upper_set<I, S>(items: I) -> HashSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|s| s.as_ref().trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect()
}

impl Lexicon {
    /// Build a lexicon from in-memory lists. Entries are trimmed and upper-cased;
    /// country names are additionally stripped of spaces and hyphens.
    pub fn from_lists<S: AsRef<str>>(
        words: &[S],
        adjectives: &[S],
        animals: &[S],
        countries: &[S],
        elements: &[S],
        ipa: &[(S, S)],
    ) -> Self {
        let words = upper_set(words);
        let adjectives = upper_set(adjectives);
        let animals = upper_set(animals);
        let countries: HashSet<String> = countries
            .iter()
            .map(|c| normalize_country(c.as_ref().trim()))
            .filter(|c| !c.is_empty())
            .collect();
        let elements = upper_set(elements);
        let ipa = ipa
            .iter()
            .map(|(w, t)| (w.as_ref().trim().to_uppercase(), t.as_ref().to_string()))
            .collect();

        Self::assemble(words, adjectives, animals, countries, elements, ipa)
    }

    fn assemble(
        words: HashSet<String>,
        adjectives: HashSet<String>,
        animals: HashSet<String>,
        countries: HashSet<String>,
        elements: HashSet<String>,
        ipa: HashMap<String, String>,
    ) -> Self {
        Lexicon {
            word_list: sorted(&words),
            adjective_list: sorted(&adjectives),
            animal_list: sorted(&animals),
            element_list: sorted(&elements),
            country_list: sorted(&countries),
            words,
            adjectives,
            animals,
            countries,
            elements,
            ipa,
        }
    }

    /// Load every list from `<share_dir>/words/`. Any missing or unreadable
    /// file is an error: no rule can be answered without the full set.
    pub fn load(share_dir: &Path) -> Result<Self, LexiconError> {
        let dir = share_dir.join("words");

        let words = load_words(&dir.join("dictionary.txt"))?;
        let adjectives = load_words(&dir.join("adjectives.txt"))?;
        let animals = load_words(&dir.join("animals.txt"))?;
        let countries = load_words(&dir.join("countries.txt"))?
            .iter()
            .map(|c| normalize_country(c))
            .collect();
        let elements = load_words(&dir.join("elements.txt"))?;
        let ipa = load_ipa(&dir.join("ipa.json"))?;

        let lexicon = Self::assemble(words, adjectives, animals, countries, elements, ipa);
        info!(
            "Loaded lexicon from {}: {} words, {} adjectives, {} animals, {} countries, {} elements, {} transcriptions",
            dir.display(),
            lexicon.words.len(),
            lexicon.adjectives.len(),
            lexicon.animals.len(),
            lexicon.countries.len(),
            lexicon.elements.len(),
            lexicon.ipa.len()
        );
        Ok(lexicon)
    }

    pub fn is_word(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn is_adjective(&self, word: &str) -> bool {
        self.adjectives.contains(word)
    }

    pub fn is_animal(&self, word: &str) -> bool {
        self.animals.contains(word)
    }

    /// `word` must already be normalized with [`normalize_country`] or cleared
    pub fn is_country(&self, word: &str) -> bool {
        self.countries.contains(word)
    }

    pub fn is_element(&self, word: &str) -> bool {
        self.elements.contains(word)
    }

    pub fn ipa(&self, word: &str) -> Option<&str> {
        self.ipa.get(word).map(String::as_str)
    }

    pub fn words(&self) -> &[String] {
        &self.word_list
    }

    pub fn adjectives(&self) -> &[String] {
        &self.adjective_list
    }

    pub fn animals(&self) -> &[String] {
        &self.animal_list
    }

    pub fn countries(&self) -> &[String] {
        &self.country_list
    }

    pub fn elements(&self) -> &[String] {
        &self.element_list
    }
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> LexiconError {
    let path = PathBuf::from(path);
    move |source| LexiconError::Io { path, source }
}

/// Load words from a plain text file (one entry per line)
pub fn load_words(file_path: &Path) -> Result<HashSet<String>, LexiconError> {
    let file = File::open(file_path).map_err(io_error(file_path))?;
    let reader = io::BufReader::new(file);

    let mut words = HashSet::new();
    for line in reader.lines() {
        let line = line.map_err(io_error(file_path))?;
        let word = line.trim();
        if !word.is_empty() {
            words.insert(word.to_uppercase());
        }
    }

    Ok(words)
}

/// Load the word -> IPA transcription map from a JSON object
pub fn load_ipa(file_path: &Path) -> Result<HashMap<String, String>, LexiconError> {
    let file = File::open(file_path).map_err(io_error(file_path))?;
    let raw: HashMap<String, String> =
        serde_json::from_reader(io::BufReader::new(file)).map_err(|source| LexiconError::Parse {
            path: file_path.to_path_buf(),
            source,
        })?;

    Ok(raw
        .into_iter()
        .map(|(word, transcription)| (word.trim().to_uppercase(), transcription))
        .collect())
}
