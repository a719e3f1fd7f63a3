use std::sync::Arc;

use lexi_types::{
    BoardView, GameError, GameKind, GameSessionView, HangmanOutcome, Round, RoundOutcome,
    TurnReport,
};

use crate::random::RandomSource;
use crate::word_pool::{QuizBank, WordPool, is_alphabetic};
use crate::{HangmanEngine, QuizEngine, ScrambleEngine};

/// Word sources shared by every session
#[derive(Debug, Clone, Default)]
pub struct GamePools {
    pub words: WordPool,
    pub quiz: QuizBank,
}

/// The single active game of a user: the current round plus the running
/// score. Rounds that end are replaced immediately by a fresh draw.
#[derive(Debug, Clone)]
pub struct GameSession {
    pools: Arc<GamePools>,
    round: Round,
    score: u32,
    round_number: u32,
}

impl GameSession {
    pub fn start(
        kind: GameKind,
        pools: Arc<GamePools>,
        rng: &mut impl RandomSource,
    ) -> Result<Self, GameError> {
        let round = Self::draw_round(kind, &pools, rng)?;
        Ok(Self {
            pools,
            round,
            score: 0,
            round_number: 1,
        })
    }

    /// Start with a word resolved elsewhere, e.g. fetched from the
    /// dictionary. Quiz rounds always come from the quiz bank, and a word
    /// that is not plain ASCII letters falls back to a pool draw.
    pub fn start_with_word(
        kind: GameKind,
        word: &str,
        pools: Arc<GamePools>,
        rng: &mut impl RandomSource,
    ) -> Result<Self, GameError> {
        let word = word.trim().to_lowercase();
        if word.is_empty() || !is_alphabetic(&word) {
            return Self::start(kind, pools, rng);
        }

        let round = match kind {
            GameKind::Scramble => Round::Scramble(ScrambleEngine::round_for_word(&word, rng)),
            GameKind::Hangman => Round::Hangman(HangmanEngine::round_for_word(&word)),
            GameKind::Quiz => Round::Quiz(QuizEngine::new_round(&pools.quiz, rng)?),
        };
        Ok(Self {
            pools,
            round,
            score: 0,
            round_number: 1,
        })
    }

    pub fn kind(&self) -> GameKind {
        self.round.kind()
    }

    pub fn target_word(&self) -> &str {
        self.round.target_word()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn submit_scramble_guess(
        &mut self,
        guess: &str,
        rng: &mut impl RandomSource,
    ) -> Result<TurnReport, GameError> {
        let Round::Scramble(state) = &mut self.round else {
            return Err(self.wrong_kind(GameKind::Scramble));
        };

        if ScrambleEngine::submit_guess(state, guess) {
            self.finish_round(RoundOutcome::Won, rng)
        } else {
            Ok(self.report(RoundOutcome::Continue, None))
        }
    }

    pub fn guess_letter(
        &mut self,
        letter: char,
        rng: &mut impl RandomSource,
    ) -> Result<TurnReport, GameError> {
        let Round::Hangman(state) = &mut self.round else {
            return Err(self.wrong_kind(GameKind::Hangman));
        };

        match HangmanEngine::guess_letter(state, letter) {
            HangmanOutcome::Continue => Ok(self.report(RoundOutcome::Continue, None)),
            HangmanOutcome::Win => self.finish_round(RoundOutcome::Won, rng),
            HangmanOutcome::Lose => self.finish_round(RoundOutcome::Lost, rng),
        }
    }

    /// Every quiz answer ends the round, right or wrong
    pub fn submit_quiz_choice(
        &mut self,
        choice: &str,
        rng: &mut impl RandomSource,
    ) -> Result<TurnReport, GameError> {
        let Round::Quiz(state) = &mut self.round else {
            return Err(self.wrong_kind(GameKind::Quiz));
        };

        let outcome = if QuizEngine::submit_choice(state, choice) {
            RoundOutcome::Won
        } else {
            RoundOutcome::Lost
        };
        self.finish_round(outcome, rng)
    }

    /// Client-safe snapshot of the session
    pub fn view(&self) -> GameSessionView {
        let board = match &self.round {
            Round::Scramble(state) => BoardView::Scramble(ScrambleEngine::board(state)),
            Round::Hangman(state) => BoardView::Hangman(HangmanEngine::board(state)),
            Round::Quiz(state) => BoardView::Quiz(QuizEngine::board(state)),
        };

        GameSessionView {
            kind: self.kind(),
            score: self.score,
            round: self.round_number,
            board,
        }
    }

    fn finish_round(
        &mut self,
        outcome: RoundOutcome,
        rng: &mut impl RandomSource,
    ) -> Result<TurnReport, GameError> {
        let revealed_word = self.target_word().to_string();
        if outcome == RoundOutcome::Won {
            self.score += 1;
        }

        self.round = Self::draw_round(self.kind(), &self.pools, rng)?;
        self.round_number += 1;

        Ok(self.report(outcome, Some(revealed_word)))
    }

    fn draw_round(
        kind: GameKind,
        pools: &GamePools,
        rng: &mut impl RandomSource,
    ) -> Result<Round, GameError> {
        Ok(match kind {
            GameKind::Scramble => Round::Scramble(ScrambleEngine::new_round(&pools.words, rng)?),
            GameKind::Hangman => Round::Hangman(HangmanEngine::new_round(&pools.words, rng)?),
            GameKind::Quiz => Round::Quiz(QuizEngine::new_round(&pools.quiz, rng)?),
        })
    }

    fn report(&self, outcome: RoundOutcome, revealed_word: Option<String>) -> TurnReport {
        TurnReport {
            outcome,
            revealed_word,
            score: self.score,
            round: self.round_number,
        }
    }

    fn wrong_kind(&self, expected: GameKind) -> GameError {
        GameError::WrongGameKind {
            expected,
            actual: self.kind(),
        }
    }
}
