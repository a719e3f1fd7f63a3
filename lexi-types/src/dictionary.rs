use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One entry returned by the dictionary service for a looked-up word
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct WordEntry {
    pub word: String,
    #[serde(default)]
    pub phonetic: Option<String>,
    #[serde(default)]
    pub phonetics: Vec<Phonetic>,
    #[serde(default)]
    pub meanings: Vec<Meaning>,
}

impl WordEntry {
    /// First phonetic spelling, preferring the top-level one
    pub fn primary_phonetic(&self) -> Option<&str> {
        self.phonetic
            .as_deref()
            .filter(|text| !text.is_empty())
            .or_else(|| self.phonetics.iter().find_map(|p| p.text.as_deref()))
    }

    /// First pronunciation recording that has a non-empty URL
    pub fn audio_url(&self) -> Option<&str> {
        self.phonetics.iter().find_map(Phonetic::audio_url)
    }

    /// All synonyms across meanings, in order, without duplicates
    pub fn synonyms(&self) -> Vec<&str> {
        collect_unique(self.meanings.iter().flat_map(|meaning| {
            meaning
                .synonyms
                .iter()
                .chain(meaning.definitions.iter().flat_map(|d| d.synonyms.iter()))
        }))
    }

    /// All antonyms across meanings, in order, without duplicates
    pub fn antonyms(&self) -> Vec<&str> {
        collect_unique(self.meanings.iter().flat_map(|meaning| {
            meaning
                .antonyms
                .iter()
                .chain(meaning.definitions.iter().flat_map(|d| d.antonyms.iter()))
        }))
    }

    pub fn first_definition(&self) -> Option<&str> {
        self.meanings
            .iter()
            .flat_map(|meaning| meaning.definitions.iter())
            .map(|d| d.definition.as_str())
            .next()
    }
}

fn collect_unique<'a>(words: impl Iterator<Item = &'a String>) -> Vec<&'a str> {
    let mut seen = Vec::new();
    for word in words {
        if !seen.contains(&word.as_str()) {
            seen.push(word.as_str());
        }
    }
    seen
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Phonetic {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub audio: Option<String>,
}

impl Phonetic {
    pub fn audio_url(&self) -> Option<&str> {
        self.audio.as_deref().filter(|url| !url.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Meaning {
    pub part_of_speech: String,
    #[serde(default)]
    pub definitions: Vec<Definition>,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub antonyms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Definition {
    pub definition: String,
    #[serde(default)]
    pub example: Option<String>,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub antonyms: Vec<String>,
}
