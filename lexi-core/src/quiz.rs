use lexi_types::{GameError, QuizBoard, QuizState};

use crate::random::{RandomSource, choose};
use crate::word_pool::QuizBank;

pub struct QuizEngine;

impl QuizEngine {
    /// Pick the word to define. Every word in the bank is a candidate, in the
    /// bank's (alphabetical) order.
    pub fn new_round(bank: &QuizBank, rng: &mut impl RandomSource) -> Result<QuizState, GameError> {
        let candidate_words: Vec<String> = bank.definitions().keys().cloned().collect();
        let correct_word = choose(&candidate_words, rng)
            .cloned()
            .ok_or(GameError::EmptyWordPool)?;
        let definition = bank
            .definition(&correct_word)
            .ok_or(GameError::EmptyWordPool)?
            .to_string();

        Ok(QuizState {
            candidate_words,
            correct_word,
            definition,
            selected_word: None,
        })
    }

    pub fn submit_choice(state: &mut QuizState, choice: &str) -> bool {
        state.selected_word = Some(choice.to_string());
        choice == state.correct_word
    }

    pub fn board(state: &QuizState) -> QuizBoard {
        QuizBoard {
            definition: state.definition.clone(),
            candidate_words: state.candidate_words.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SequenceSource;
    use std::collections::BTreeMap;

    #[test]
    fn test_single_entry_round() {
        let bank = QuizBank::from_pairs([("date", "A sweet brown fruit from a palm tree")]);
        let mut state = QuizEngine::new_round(&bank, &mut SequenceSource::zeros()).unwrap();

        assert_eq!(state.correct_word, "date");
        assert_eq!(state.definition, "A sweet brown fruit from a palm tree");
        assert_eq!(state.candidate_words, vec!["date"]);
        assert_eq!(state.selected_word, None);

        assert!(QuizEngine::submit_choice(&mut state, "date"));
        assert_eq!(state.selected_word.as_deref(), Some("date"));
    }

    #[test]
    fn test_definition_matches_correct_word() {
        let bank = QuizBank::default();
        for index in 0..bank.len() {
            let state = QuizEngine::new_round(&bank, &mut SequenceSource::new(vec![index])).unwrap();
            assert_eq!(bank.definition(&state.correct_word), Some(state.definition.as_str()));
            assert!(state.candidate_words.contains(&state.correct_word));
            assert_eq!(state.candidate_words.len(), bank.len());
        }
    }

    #[test]
    fn test_candidate_order_is_stable() {
        let bank = QuizBank::default();
        let first = QuizEngine::new_round(&bank, &mut SequenceSource::new(vec![1])).unwrap();
        let second = QuizEngine::new_round(&bank, &mut SequenceSource::new(vec![5])).unwrap();

        assert_eq!(first.candidate_words, second.candidate_words);
        assert_eq!(first.correct_word, "banana");
        assert_eq!(second.correct_word, "fig");
    }

    #[test]
    fn test_wrong_choice() {
        let bank = QuizBank::default();
        let mut state = QuizEngine::new_round(&bank, &mut SequenceSource::new(vec![0])).unwrap();
        assert_eq!(state.correct_word, "apple");

        assert!(!QuizEngine::submit_choice(&mut state, "grape"));
        assert!(!QuizEngine::submit_choice(&mut state, "Apple"));
        assert_eq!(state.selected_word.as_deref(), Some("Apple"));
    }

    #[test]
    fn test_empty_bank() {
        let bank = QuizBank::new(BTreeMap::new());
        assert_eq!(
            QuizEngine::new_round(&bank, &mut SequenceSource::zeros()),
            Err(GameError::EmptyWordPool)
        );
    }
}
