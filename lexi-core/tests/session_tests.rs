mod common;

use common::*;
use lexi_core::{GameEvent, GameEventBus, GamePools, GameSession, SequenceSource};
use lexi_types::{BoardView, GameError, GameKind, Round, RoundOutcome};
use std::sync::Arc;

#[test]
fn test_scramble_wrong_guess_costs_an_attempt() {
    let mut session = start_session(GameKind::Scramble, create_single_word_pools());
    let mut rng = SequenceSource::zeros();

    let report = session.submit_scramble_guess("cheery", &mut rng).unwrap();
    assert_eq!(report.outcome, RoundOutcome::Continue);
    assert_eq!(report.revealed_word, None);

    match session.view().board {
        BoardView::Scramble(board) => {
            assert_eq!(board.attempts, 1);
            assert_eq!(board.user_guess, "cheery");
        }
        other => panic!("Expected scramble board, got {:?}", other),
    }
    assert_session_state(&session, GameKind::Scramble, 0, 1);
}

#[test]
fn test_scramble_win_scores_and_starts_new_round() {
    let mut session = start_session(GameKind::Scramble, create_single_word_pools());
    let mut rng = SequenceSource::zeros();
    session.submit_scramble_guess("cherries", &mut rng).unwrap();

    let report = session.submit_scramble_guess("CHERRY", &mut rng).unwrap();
    assert_eq!(report.outcome, RoundOutcome::Won);
    assert_eq!(report.revealed_word.as_deref(), Some("cherry"));
    assert_eq!(report.score, 1);
    assert_eq!(report.round, 2);

    // Fresh round: attempts reset
    match session.round() {
        Round::Scramble(state) => {
            assert_eq!(state.attempts, 0);
            assert!(state.user_guess.is_empty());
        }
        other => panic!("Expected scramble round, got {:?}", other),
    }
}

#[test]
fn test_hangman_cherry_scenario() {
    let mut session = start_session(GameKind::Hangman, create_single_word_pools());

    let reports = guess_letters(&mut session, "cher");
    assert!(reports.iter().all(|r| r.outcome == RoundOutcome::Continue));
    match session.round() {
        Round::Hangman(state) => assert_eq!(state.remaining_guesses, 6),
        other => panic!("Expected hangman round, got {:?}", other),
    }

    let report = guess_letters(&mut session, "y").pop().unwrap();
    assert_eq!(report.outcome, RoundOutcome::Won);
    assert_eq!(report.revealed_word.as_deref(), Some("cherry"));
    assert_session_state(&session, GameKind::Hangman, 1, 2);
}

#[test]
fn test_hangman_loss_keeps_score() {
    let mut session = start_session(GameKind::Hangman, create_single_word_pools());

    let reports = guess_letters(&mut session, "abdfgi");
    assert_eq!(reports[4].outcome, RoundOutcome::Continue);
    assert_eq!(reports[5].outcome, RoundOutcome::Lost);
    assert_eq!(reports[5].revealed_word.as_deref(), Some("cherry"));
    assert_session_state(&session, GameKind::Hangman, 0, 2);

    match session.view().board {
        BoardView::Hangman(board) => {
            assert_eq!(board.remaining_guesses, 6);
            assert!(board.guessed_letters.is_empty());
        }
        other => panic!("Expected hangman board, got {:?}", other),
    }
}

#[test]
fn test_quiz_date_scenario() {
    let mut session = start_session(GameKind::Quiz, create_single_word_pools());
    let mut rng = SequenceSource::zeros();

    match session.view().board {
        BoardView::Quiz(board) => {
            assert_eq!(board.definition, "A sweet brown fruit from a palm tree");
            assert_eq!(board.candidate_words, vec!["date"]);
        }
        other => panic!("Expected quiz board, got {:?}", other),
    }

    let report = session.submit_quiz_choice("date", &mut rng).unwrap();
    assert_eq!(report.outcome, RoundOutcome::Won);
    assert_eq!(report.score, 1);
    assert_session_state(&session, GameKind::Quiz, 1, 2);
}

#[test]
fn test_quiz_wrong_choice_still_advances() {
    let pools = create_pools(
        &["fig"],
        &[
            ("date", "A sweet brown fruit from a palm tree"),
            ("fig", "A soft pear-shaped fruit"),
        ],
    );
    let mut session = start_session(GameKind::Quiz, pools);
    let mut rng = SequenceSource::zeros();
    assert_eq!(session.target_word(), "date");

    let report = session.submit_quiz_choice("fig", &mut rng).unwrap();
    assert_eq!(report.outcome, RoundOutcome::Lost);
    assert_eq!(report.revealed_word.as_deref(), Some("date"));
    assert_session_state(&session, GameKind::Quiz, 0, 2);
}

#[test]
fn test_move_for_wrong_game_is_rejected() {
    let mut session = start_session(GameKind::Quiz, create_single_word_pools());
    let mut rng = SequenceSource::zeros();

    let result = session.guess_letter('a', &mut rng);
    assert_eq!(
        result,
        Err(GameError::WrongGameKind {
            expected: GameKind::Hangman,
            actual: GameKind::Quiz,
        })
    );
    assert!(session.submit_scramble_guess("date", &mut rng).is_err());
    assert_session_state(&session, GameKind::Quiz, 0, 1);
}

#[test]
fn test_start_with_live_word() {
    let pools = create_single_word_pools();
    let mut rng = SequenceSource::zeros();

    let hangman = GameSession::start_with_word(GameKind::Hangman, "Luminous", pools.clone(), &mut rng)
        .unwrap();
    assert_eq!(hangman.target_word(), "luminous");

    let quiz = GameSession::start_with_word(GameKind::Quiz, "luminous", pools, &mut rng).unwrap();
    assert_eq!(quiz.target_word(), "date");
}

#[test]
fn test_accented_live_word_falls_back_to_pool() {
    let pools = create_single_word_pools();
    let mut rng = SequenceSource::zeros();

    let mut session =
        GameSession::start_with_word(GameKind::Hangman, "café", pools, &mut rng).unwrap();
    assert_eq!(session.target_word(), "cherry");

    let mut last = None;
    for letter in ['c', 'h', 'e', 'r', 'y'] {
        last = Some(session.guess_letter(letter, &mut rng).unwrap());
    }
    assert_eq!(last.unwrap().outcome, RoundOutcome::Won);
}

#[test]
fn test_empty_pool_cannot_start() {
    let pools = Arc::new(GamePools {
        words: lexi_core::WordPool::from_word_list(""),
        quiz: lexi_core::QuizBank::default(),
    });
    let result = GameSession::start(GameKind::Scramble, pools, &mut SequenceSource::zeros());
    assert_eq!(result.unwrap_err(), GameError::EmptyWordPool);
}

#[test]
fn test_session_events_reach_handlers() {
    let collector = EventCollector::new();
    let mut bus = GameEventBus::new();
    bus.add_handler(Box::new(collector.clone()));

    let mut session = start_session(GameKind::Hangman, create_single_word_pools());
    bus.publish(GameEvent::SessionStarted {
        user_id: "user-1".to_string(),
        kind: session.kind(),
    });

    for report in guess_letters(&mut session, "cheryq") {
        if let Some(event) = GameEvent::from_report("user-1", session.kind(), &report) {
            bus.publish(event);
        }
    }

    assert_eq!(collector.event_count(), 2);
    assert_eq!(
        collector.get_events()[1],
        GameEvent::RoundWon {
            user_id: "user-1".to_string(),
            kind: GameKind::Hangman,
            word: "cherry".to_string(),
            score: 1,
        }
    );
}
