use std::collections::BTreeSet;

use lexi_types::{GameError, HANGMAN_MAX_GUESSES, HangmanBoard, HangmanOutcome, HangmanState};

use crate::random::RandomSource;
use crate::word_pool::WordPool;

pub struct HangmanEngine;

impl HangmanEngine {
    pub fn new_round(
        pool: &WordPool,
        rng: &mut impl RandomSource,
    ) -> Result<HangmanState, GameError> {
        let word = pool.random_word(rng)?;
        Ok(Self::round_for_word(word))
    }

    pub fn round_for_word(word: &str) -> HangmanState {
        HangmanState {
            word: word.to_lowercase(),
            guessed_letters: BTreeSet::new(),
            remaining_guesses: HANGMAN_MAX_GUESSES,
        }
    }

    /// Reveal a letter. Repeating a letter changes nothing; a letter missing
    /// from the word costs one guess.
    ///
    /// A winning letter can never be a miss, so a round cannot be won and
    /// lost by the same guess.
    pub fn guess_letter(state: &mut HangmanState, letter: char) -> HangmanOutcome {
        let letter = letter.to_ascii_lowercase();
        if state.guessed_letters.insert(letter) && !state.word.contains(letter) {
            state.remaining_guesses = state.remaining_guesses.saturating_sub(1);
        }
        Self::evaluate(state)
    }

    pub fn evaluate(state: &HangmanState) -> HangmanOutcome {
        if state.remaining_guesses == 0 {
            HangmanOutcome::Lose
        } else if Self::is_solved(state) {
            HangmanOutcome::Win
        } else {
            HangmanOutcome::Continue
        }
    }

    pub fn is_solved(state: &HangmanState) -> bool {
        state
            .word
            .chars()
            .all(|c| state.guessed_letters.contains(&c))
    }

    /// Guessed letters that are not in the word
    pub fn misses(state: &HangmanState) -> usize {
        state
            .guessed_letters
            .iter()
            .filter(|c| !state.word.contains(**c))
            .count()
    }

    /// Board text, e.g. `c h e r r _` with one blank per hidden letter
    pub fn masked_word(state: &HangmanState) -> String {
        state
            .word
            .chars()
            .map(|c| {
                if state.guessed_letters.contains(&c) {
                    c.to_string()
                } else {
                    "_".to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn board(state: &HangmanState) -> HangmanBoard {
        HangmanBoard {
            masked_word: Self::masked_word(state),
            word_length: state.word.chars().count() as u32,
            guessed_letters: state.guessed_letters.iter().copied().collect(),
            remaining_guesses: state.remaining_guesses,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SequenceSource;

    fn guess_all(state: &mut HangmanState, letters: &str) -> Vec<HangmanOutcome> {
        letters
            .chars()
            .map(|c| HangmanEngine::guess_letter(state, c))
            .collect()
    }

    #[test]
    fn test_new_round() {
        let pool = WordPool::from_words(["cherry"]);
        let state = HangmanEngine::new_round(&pool, &mut SequenceSource::zeros()).unwrap();

        assert_eq!(state.word, "cherry");
        assert!(state.guessed_letters.is_empty());
        assert_eq!(state.remaining_guesses, 6);
    }

    #[test]
    fn test_cherry_is_won_without_misses() {
        let mut state = HangmanEngine::round_for_word("cherry");
        let outcomes = guess_all(&mut state, "chery");

        assert_eq!(
            outcomes,
            vec![
                HangmanOutcome::Continue,
                HangmanOutcome::Continue,
                HangmanOutcome::Continue,
                HangmanOutcome::Continue,
                HangmanOutcome::Win,
            ]
        );
        assert_eq!(state.remaining_guesses, 6);
    }

    #[test]
    fn test_each_miss_costs_exactly_one_guess() {
        let mut state = HangmanEngine::round_for_word("fig");
        for (k, letter) in "abcde".chars().enumerate() {
            HangmanEngine::guess_letter(&mut state, letter);
            assert_eq!(state.remaining_guesses, 6 - (k as u32 + 1));
            assert_eq!(HangmanEngine::misses(&state), k + 1);
        }
    }

    #[test]
    fn test_sixth_miss_loses_even_with_correct_letters() {
        let mut state = HangmanEngine::round_for_word("banana");
        assert_eq!(HangmanEngine::guess_letter(&mut state, 'b'), HangmanOutcome::Continue);
        assert_eq!(HangmanEngine::guess_letter(&mut state, 'n'), HangmanOutcome::Continue);

        let outcomes = guess_all(&mut state, "xyzqwe");
        assert_eq!(&outcomes[..5], &[HangmanOutcome::Continue; 5]);
        assert_eq!(outcomes[5], HangmanOutcome::Lose);
        assert_eq!(state.remaining_guesses, 0);
    }

    #[test]
    fn test_win_after_five_misses() {
        let mut state = HangmanEngine::round_for_word("fig");
        guess_all(&mut state, "abcde");
        assert_eq!(state.remaining_guesses, 1);

        let outcomes = guess_all(&mut state, "fig");
        assert_eq!(outcomes.last(), Some(&HangmanOutcome::Win));
        assert_eq!(state.remaining_guesses, 1);
    }

    #[test]
    fn test_repeated_letter_is_noop() {
        let mut state = HangmanEngine::round_for_word("apple");
        HangmanEngine::guess_letter(&mut state, 'z');
        let before = state.clone();

        assert_eq!(HangmanEngine::guess_letter(&mut state, 'z'), HangmanOutcome::Continue);
        assert_eq!(state, before);

        HangmanEngine::guess_letter(&mut state, 'p');
        HangmanEngine::guess_letter(&mut state, 'p');
        assert_eq!(state.remaining_guesses, 5);
    }

    #[test]
    fn test_uppercase_letter_is_normalized() {
        let mut state = HangmanEngine::round_for_word("Date");
        assert_eq!(state.word, "date");
        HangmanEngine::guess_letter(&mut state, 'D');
        assert!(state.guessed_letters.contains(&'d'));
        assert_eq!(state.remaining_guesses, 6);
    }

    #[test]
    fn test_masked_word_and_board() {
        let mut state = HangmanEngine::round_for_word("cherry");
        guess_all(&mut state, "rzc");

        assert_eq!(HangmanEngine::masked_word(&state), "c _ _ r r _");

        let board = HangmanEngine::board(&state);
        assert_eq!(board.word_length, 6);
        assert_eq!(board.guessed_letters, vec!['c', 'r', 'z']);
        assert_eq!(board.remaining_guesses, 5);
    }
}
