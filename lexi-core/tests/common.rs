use lexi_core::{GameEvent, GameEventHandler, GamePools, GameSession, QuizBank, SequenceSource, WordPool};
use lexi_types::{GameKind, TurnReport};
use std::sync::{Arc, Mutex};

/// Pools with a known word list and quiz bank
pub fn create_pools(words: &[&str], quiz: &[(&str, &str)]) -> Arc<GamePools> {
    Arc::new(GamePools {
        words: WordPool::from_words(words),
        quiz: QuizBank::from_pairs(quiz.iter().copied()),
    })
}

/// Pools whose only word is "cherry" and whose only quiz entry is "date"
pub fn create_single_word_pools() -> Arc<GamePools> {
    create_pools(&["cherry"], &[("date", "A sweet brown fruit from a palm tree")])
}

/// Starts a session drawing every random index as zero
pub fn start_session(kind: GameKind, pools: Arc<GamePools>) -> GameSession {
    GameSession::start(kind, pools, &mut SequenceSource::zeros()).unwrap()
}

/// Guess each letter in order, collecting the reports
pub fn guess_letters(session: &mut GameSession, letters: &str) -> Vec<TurnReport> {
    let mut rng = SequenceSource::zeros();
    letters
        .chars()
        .map(|letter| session.guess_letter(letter, &mut rng).unwrap())
        .collect()
}

/// Asserts score and round counter of a session
pub fn assert_session_state(session: &GameSession, kind: GameKind, score: u32, round: u32) {
    assert_eq!(session.kind(), kind, "Expected kind {:?}", kind);
    assert_eq!(session.score(), score, "Expected score {}", score);
    assert_eq!(session.round_number(), round, "Expected round {}", round);
}

/// Event collector for testing event emissions
#[derive(Clone)]
pub struct EventCollector {
    events: Arc<Mutex<Vec<GameEvent>>>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn get_events(&self) -> Vec<GameEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn event_count(&self) -> usize {
        self.events.lock().unwrap().len()
    }
}

impl GameEventHandler for EventCollector {
    fn handle_event(&mut self, event: &GameEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}
