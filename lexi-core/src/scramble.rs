use lexi_types::{GameError, ScrambleBoard, ScrambleState};

use crate::random::{RandomSource, shuffle};
use crate::word_pool::WordPool;

pub struct ScrambleEngine;

impl ScrambleEngine {
    /// Draw a word from the pool and scramble it
    pub fn new_round(
        pool: &WordPool,
        rng: &mut impl RandomSource,
    ) -> Result<ScrambleState, GameError> {
        let word = pool.random_word(rng)?.to_string();
        Ok(Self::round_for_word(&word, rng))
    }

    /// Start a round for an already chosen word. The scrambled word may
    /// equal the original; there is no re-roll.
    pub fn round_for_word(word: &str, rng: &mut impl RandomSource) -> ScrambleState {
        ScrambleState {
            original_word: word.to_string(),
            scrambled_word: Self::scramble(word, rng),
            user_guess: String::new(),
            attempts: 0,
        }
    }

    pub fn scramble(word: &str, rng: &mut impl RandomSource) -> String {
        let mut letters: Vec<char> = word.chars().collect();
        shuffle(&mut letters, rng);
        letters.into_iter().collect()
    }

    /// Case-insensitive comparison against the original word. A miss costs
    /// one attempt; an empty guess is just a miss.
    pub fn submit_guess(state: &mut ScrambleState, guess: &str) -> bool {
        state.user_guess = guess.to_string();
        if guess.to_lowercase() == state.original_word.to_lowercase() {
            return true;
        }
        state.attempts += 1;
        false
    }

    pub fn board(state: &ScrambleState) -> ScrambleBoard {
        ScrambleBoard {
            scrambled_word: state.scrambled_word.clone(),
            user_guess: state.user_guess.clone(),
            attempts: state.attempts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{RngSource, SequenceSource};

    fn sorted(word: &str) -> Vec<char> {
        let mut letters: Vec<char> = word.chars().collect();
        letters.sort_unstable();
        letters
    }

    #[test]
    fn test_scramble_is_permutation() {
        let mut rng = RngSource::thread();
        for word in ["apple", "banana", "elderberry", "a", ""] {
            let scrambled = ScrambleEngine::scramble(word, &mut rng);
            assert_eq!(scrambled.chars().count(), word.chars().count());
            assert_eq!(sorted(&scrambled), sorted(word));
        }
    }

    #[test]
    fn test_new_round_with_fixed_source() {
        let pool = WordPool::from_words(["cherry", "grape"]);
        let mut source = SequenceSource::new(vec![1, 0]);

        let state = ScrambleEngine::new_round(&pool, &mut source).unwrap();
        assert_eq!(state.original_word, "grape");
        assert_eq!(sorted(&state.scrambled_word), sorted("grape"));
        assert_eq!(state.attempts, 0);
        assert!(state.user_guess.is_empty());
    }

    #[test]
    fn test_identity_shuffle_is_allowed() {
        // j == i at every step leaves the word untouched
        let mut source = SequenceSource::new(vec![4, 3, 2, 1]);
        let state = ScrambleEngine::round_for_word("grape", &mut source);
        assert_eq!(state.scrambled_word, "grape");
    }

    #[test]
    fn test_correct_guess_any_case() {
        let mut state = ScrambleEngine::round_for_word("banana", &mut SequenceSource::zeros());
        assert!(ScrambleEngine::submit_guess(&mut state, "BaNaNa"));
        assert_eq!(state.attempts, 0);
    }

    #[test]
    fn test_wrong_guesses_count_attempts() {
        let mut state = ScrambleEngine::round_for_word("banana", &mut SequenceSource::zeros());

        assert!(!ScrambleEngine::submit_guess(&mut state, "bandana"));
        assert!(!ScrambleEngine::submit_guess(&mut state, ""));
        assert!(!ScrambleEngine::submit_guess(&mut state, "banana "));

        assert_eq!(state.attempts, 3);
        assert_eq!(state.user_guess, "banana ");
        assert_eq!(state.original_word, "banana");
    }

    #[test]
    fn test_empty_pool_is_rejected() {
        let pool = WordPool::from_words(Vec::<String>::new());
        let result = ScrambleEngine::new_round(&pool, &mut SequenceSource::zeros());
        assert_eq!(result, Err(GameError::EmptyWordPool));
    }
}
