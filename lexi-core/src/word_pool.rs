use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use lexi_types::GameError;

use crate::random::{RandomSource, choose};

/// Words used by the scramble and hangman games when no list is configured
pub const DEFAULT_WORDS: &[&str] = &[
    "apple",
    "banana",
    "cherry",
    "date",
    "elderberry",
    "fig",
    "grape",
];

/// Words the dashboard draws its "word of the day" from
pub const FEATURED_WORDS: &[&str] = &[
    "serendipity",
    "ephemeral",
    "mellifluous",
    "eloquent",
    "ethereal",
    "luminous",
    "enigmatic",
    "resilient",
    "nostalgic",
    "effervescent",
];

const DEFAULT_QUIZ: &[(&str, &str)] = &[
    ("apple", "A round fruit with red, green, or yellow skin and crisp white flesh"),
    ("banana", "A long curved fruit with a yellow skin and soft sweet flesh"),
    ("cherry", "A small round stone fruit that is typically bright or dark red"),
    ("date", "A sweet brown fruit from a palm tree"),
    ("elderberry", "A small dark berry of the elder shrub, often cooked into syrup"),
    ("fig", "A soft pear-shaped fruit with sweet dark flesh and many small seeds"),
    ("grape", "A small juicy fruit that grows in clusters on a vine"),
];

/// Ordered list of playable words
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordPool {
    words: Vec<String>,
}

impl WordPool {
    /// Parse a newline separated word list. Blank lines and `#` comments are
    /// skipped, entries are trimmed and lowercased, and anything that is not
    /// purely alphabetic is dropped.
    pub fn from_word_list(word_list: &str) -> Self {
        Self::from_words(
            word_list
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut pool = Vec::new();
        for word in words {
            let word = word.as_ref().trim().to_lowercase();
            if !word.is_empty() && is_alphabetic(&word) && !pool.contains(&word) {
                pool.push(word);
            }
        }
        Self { words: pool }
    }

    /// Load a word list file; an empty result is an error
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read word list {}", path.display()))?;
        let pool = Self::from_word_list(&contents);
        if pool.is_empty() {
            return Err(anyhow!("Word list {} contains no usable words", path.display()));
        }
        tracing::info!("Loaded {} words from {}", pool.len(), path.display());
        Ok(pool)
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        let word = word.trim().to_lowercase();
        self.words.contains(&word)
    }

    /// Uniformly pick one word
    pub fn random_word(&self, rng: &mut impl RandomSource) -> Result<&str, GameError> {
        choose(&self.words, rng)
            .map(String::as_str)
            .ok_or(GameError::EmptyWordPool)
    }
}

impl Default for WordPool {
    fn default() -> Self {
        Self::from_words(DEFAULT_WORDS)
    }
}

/// Fixed word -> definition mapping for the quiz
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizBank {
    definitions: BTreeMap<String, String>,
}

impl QuizBank {
    pub fn new(definitions: BTreeMap<String, String>) -> Self {
        Self { definitions }
    }

    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self::new(
            pairs
                .into_iter()
                .map(|(word, definition)| (word.to_string(), definition.to_string()))
                .collect(),
        )
    }

    pub fn definitions(&self) -> &BTreeMap<String, String> {
        &self.definitions
    }

    pub fn definition(&self, word: &str) -> Option<&str> {
        self.definitions.get(word).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl Default for QuizBank {
    fn default() -> Self {
        Self::from_pairs(DEFAULT_QUIZ.iter().copied())
    }
}

/// Check if word contains only ASCII letters, the only letters a hangman
/// guess can name
pub fn is_alphabetic(word: &str) -> bool {
    word.chars().all(|c| c.is_ascii_alphabetic())
}
