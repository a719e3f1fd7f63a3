use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tracing::info;

use lexi_core::{
    GameEvent, GameEventBus, GameEventHandler, GamePools, GameSession, QuizBank, RngSource,
    TracingEventHandler, WordPool,
};
use lexi_types::{GameError, GameKind, GameSessionView, TurnResponse};

#[derive(Debug)]
struct ActiveGame {
    session: GameSession,
    started_at: Instant,
    last_activity: Instant,
}

impl ActiveGame {
    fn new(session: GameSession) -> Self {
        let now = Instant::now();
        Self {
            session,
            started_at: now,
            last_activity: now,
        }
    }

    fn update_activity(&mut self) {
        self.last_activity = Instant::now();
    }

    fn is_expired(&self, timeout: Duration) -> bool {
        self.last_activity.elapsed() > timeout
    }
}

/// Holds the one active game of every signed-in user.
///
/// Engine calls run under the map's write lock and never cross an `.await`,
/// so a move is applied to a session exactly once.
pub struct GameManager {
    active_games: RwLock<HashMap<String, ActiveGame>>,
    pools: Arc<GamePools>,
    events: Mutex<GameEventBus>,
}

impl GameManager {
    pub fn new(pools: GamePools) -> Self {
        let mut events = GameEventBus::new();
        events.add_handler(Box::new(TracingEventHandler));
        Self {
            active_games: RwLock::new(HashMap::new()),
            pools: Arc::new(pools),
            events: Mutex::new(events),
        }
    }

    /// Built-in fruit words and quiz definitions
    pub fn new_with_default_words() -> Self {
        Self::new(GamePools::default())
    }

    /// Scramble and hangman words read from a word list file
    pub fn new_with_word_list<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        Ok(Self::new(GamePools {
            words: WordPool::load(path)?,
            quiz: QuizBank::default(),
        }))
    }

    pub fn pools(&self) -> &Arc<GamePools> {
        &self.pools
    }

    pub fn add_event_handler(&self, handler: Box<dyn GameEventHandler>) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .add_handler(handler);
    }

    fn publish(&self, event: GameEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .publish(event);
    }

    /// Start a new game for the user, replacing any game in progress. A
    /// `seed_word` fetched from the live dictionary is used for the opening
    /// round of scramble and hangman.
    pub async fn start_game(
        &self,
        user_id: &str,
        kind: GameKind,
        seed_word: Option<&str>,
    ) -> Result<GameSessionView, GameError> {
        let session = {
            let mut rng = RngSource::thread();
            match seed_word {
                Some(word) => {
                    GameSession::start_with_word(kind, word, self.pools.clone(), &mut rng)?
                }
                None => GameSession::start(kind, self.pools.clone(), &mut rng)?,
            }
        };
        let view = session.view();

        let replaced = self
            .active_games
            .write()
            .await
            .insert(user_id.to_string(), ActiveGame::new(session));
        if let Some(previous) = replaced {
            self.publish_ended(user_id, &previous.session);
        }

        self.publish(GameEvent::SessionStarted {
            user_id: user_id.to_string(),
            kind,
        });
        Ok(view)
    }

    pub async fn current_game(&self, user_id: &str) -> Option<GameSessionView> {
        let games = self.active_games.read().await;
        games.get(user_id).map(|game| game.session.view())
    }

    /// Leave the current game, returning its final state
    pub async fn end_game(&self, user_id: &str) -> Option<GameSessionView> {
        let game = self.active_games.write().await.remove(user_id)?;
        self.publish_ended(user_id, &game.session);
        Some(game.session.view())
    }

    pub async fn submit_scramble_guess(
        &self,
        user_id: &str,
        guess: &str,
    ) -> Result<TurnResponse, GameError> {
        self.play(user_id, |session, rng| session.submit_scramble_guess(guess, rng))
            .await
    }

    /// `letter` must be a single ASCII letter; case is ignored
    pub async fn guess_letter(&self, user_id: &str, letter: &str) -> Result<TurnResponse, GameError> {
        let letter = match parse_letter(letter) {
            Ok(letter) => letter,
            Err(e) => {
                self.publish(GameEvent::MoveRejected {
                    user_id: user_id.to_string(),
                    reason: e.to_string(),
                });
                return Err(e);
            }
        };
        self.play(user_id, |session, rng| session.guess_letter(letter, rng))
            .await
    }

    pub async fn submit_quiz_choice(
        &self,
        user_id: &str,
        choice: &str,
    ) -> Result<TurnResponse, GameError> {
        self.play(user_id, |session, rng| session.submit_quiz_choice(choice, rng))
            .await
    }

    async fn play<F>(&self, user_id: &str, turn: F) -> Result<TurnResponse, GameError>
    where
        F: FnOnce(
            &mut GameSession,
            &mut RngSource<rand::rngs::ThreadRng>,
        ) -> Result<lexi_types::TurnReport, GameError>,
    {
        let mut games = self.active_games.write().await;
        let Some(game) = games.get_mut(user_id) else {
            return Err(GameError::NoActiveGame);
        };
        game.update_activity();

        let kind = game.session.kind();
        let result = turn(&mut game.session, &mut RngSource::thread());
        match result {
            Ok(report) => {
                if let Some(event) = GameEvent::from_report(user_id, kind, &report) {
                    self.publish(event);
                }
                Ok(TurnResponse {
                    report,
                    session: game.session.view(),
                })
            }
            Err(e) => {
                self.publish(GameEvent::MoveRejected {
                    user_id: user_id.to_string(),
                    reason: e.to_string(),
                });
                Err(e)
            }
        }
    }

    fn publish_ended(&self, user_id: &str, session: &GameSession) {
        self.publish(GameEvent::SessionEnded {
            user_id: user_id.to_string(),
            kind: session.kind(),
            final_score: session.score(),
        });
    }

    /// End games for users whose sessions are gone
    pub async fn end_games_for(&self, user_ids: &[String]) {
        if user_ids.is_empty() {
            return;
        }
        let mut games = self.active_games.write().await;
        for user_id in user_ids {
            if let Some(game) = games.remove(user_id) {
                self.publish_ended(user_id, &game.session);
            }
        }
    }

    pub async fn cleanup_abandoned_games(&self, timeout: Duration) {
        let mut games = self.active_games.write().await;
        let expired: Vec<String> = games
            .iter()
            .filter(|(_, game)| game.is_expired(timeout))
            .map(|(user_id, _)| user_id.clone())
            .collect();

        for user_id in expired {
            if let Some(game) = games.remove(&user_id) {
                info!(
                    "Removed abandoned game of user {} after {}s",
                    user_id,
                    game.started_at.elapsed().as_secs()
                );
                self.publish_ended(&user_id, &game.session);
            }
        }
    }

    pub async fn get_active_games_count(&self) -> usize {
        self.active_games.read().await.len()
    }
}

impl Default for GameManager {
    fn default() -> Self {
        Self::new_with_default_words()
    }
}

fn parse_letter(input: &str) -> Result<char, GameError> {
    let trimmed = input.trim();
    let mut chars = trimmed.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) if letter.is_ascii_alphabetic() => Ok(letter.to_ascii_lowercase()),
        _ => Err(GameError::InvalidLetter {
            letter: input.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_letter() {
        assert_eq!(parse_letter("a"), Ok('a'));
        assert_eq!(parse_letter(" Q "), Ok('q'));
        assert!(parse_letter("").is_err());
        assert!(parse_letter("ab").is_err());
        assert!(parse_letter("7").is_err());
        assert!(parse_letter("é").is_err());
    }

    #[tokio::test]
    async fn test_start_replaces_previous_game() {
        let manager = GameManager::new_with_default_words();

        manager.start_game("ada", GameKind::Scramble, None).await.unwrap();
        let view = manager.start_game("ada", GameKind::Quiz, None).await.unwrap();

        assert_eq!(view.kind, GameKind::Quiz);
        assert_eq!(manager.get_active_games_count().await, 1);
        assert_eq!(manager.current_game("ada").await.unwrap().kind, GameKind::Quiz);
    }

    #[tokio::test]
    async fn test_cleanup_abandoned_games() {
        let manager = GameManager::new_with_default_words();
        manager.start_game("ada", GameKind::Hangman, None).await.unwrap();

        manager.cleanup_abandoned_games(Duration::from_secs(60)).await;
        assert_eq!(manager.get_active_games_count().await, 1);

        tokio::time::sleep(Duration::from_millis(5)).await;
        manager.cleanup_abandoned_games(Duration::from_millis(1)).await;
        assert_eq!(manager.get_active_games_count().await, 0);
    }
}
