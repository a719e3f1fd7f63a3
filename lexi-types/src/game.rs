use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Number of wrong letters a hangman round tolerates
pub const HANGMAN_MAX_GUESSES: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum GameKind {
    Scramble,
    Hangman,
    Quiz,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ScrambleState {
    pub original_word: String,
    pub scrambled_word: String,
    pub user_guess: String,
    pub attempts: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct HangmanState {
    pub word: String,
    pub guessed_letters: BTreeSet<char>,
    pub remaining_guesses: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuizState {
    pub candidate_words: Vec<String>,
    pub correct_word: String,
    pub definition: String,
    pub selected_word: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum HangmanOutcome {
    Continue,
    Win,
    Lose,
}

/// The round currently being played in a game session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", content = "state", rename_all = "lowercase")]
pub enum Round {
    Scramble(ScrambleState),
    Hangman(HangmanState),
    Quiz(QuizState),
}

impl Round {
    pub fn kind(&self) -> GameKind {
        match self {
            Round::Scramble(_) => GameKind::Scramble,
            Round::Hangman(_) => GameKind::Hangman,
            Round::Quiz(_) => GameKind::Quiz,
        }
    }

    pub fn target_word(&self) -> &str {
        match self {
            Round::Scramble(state) => &state.original_word,
            Round::Hangman(state) => &state.word,
            Round::Quiz(state) => &state.correct_word,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum RoundOutcome {
    Continue, // Round still in progress
    Won,      // Round finished, score increased
    Lost,     // Round finished, score unchanged
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TurnReport {
    pub outcome: RoundOutcome,
    /// Target word of the round that just ended
    pub revealed_word: Option<String>,
    pub score: u32,
    pub round: u32,
}

/// Client-safe view of a game session. Scramble and hangman boards
/// never carry the target word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct GameSessionView {
    pub kind: GameKind,
    pub score: u32,
    pub round: u32,
    pub board: BoardView,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BoardView {
    Scramble(ScrambleBoard),
    Hangman(HangmanBoard),
    Quiz(QuizBoard),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ScrambleBoard {
    pub scrambled_word: String,
    pub user_guess: String,
    pub attempts: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct HangmanBoard {
    pub masked_word: String,
    pub word_length: u32,
    pub guessed_letters: Vec<char>,
    pub remaining_guesses: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuizBoard {
    pub definition: String,
    pub candidate_words: Vec<String>,
}
