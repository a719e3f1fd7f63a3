use lexi_types::{GameKind, RoundOutcome, TurnReport};

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    SessionStarted {
        user_id: String,
        kind: GameKind,
    },
    RoundWon {
        user_id: String,
        kind: GameKind,
        word: String,
        score: u32,
    },
    RoundLost {
        user_id: String,
        kind: GameKind,
        word: String,
    },
    MoveRejected {
        user_id: String,
        reason: String,
    },
    SessionEnded {
        user_id: String,
        kind: GameKind,
        final_score: u32,
    },
}

impl GameEvent {
    pub fn user_id(&self) -> &str {
        match self {
            GameEvent::SessionStarted { user_id, .. } => user_id,
            GameEvent::RoundWon { user_id, .. } => user_id,
            GameEvent::RoundLost { user_id, .. } => user_id,
            GameEvent::MoveRejected { user_id, .. } => user_id,
            GameEvent::SessionEnded { user_id, .. } => user_id,
        }
    }

    /// Event for a finished round, `None` while the round continues
    pub fn from_report(user_id: &str, kind: GameKind, report: &TurnReport) -> Option<Self> {
        let word = report.revealed_word.clone()?;
        match report.outcome {
            RoundOutcome::Continue => None,
            RoundOutcome::Won => Some(GameEvent::RoundWon {
                user_id: user_id.to_string(),
                kind,
                word,
                score: report.score,
            }),
            RoundOutcome::Lost => Some(GameEvent::RoundLost {
                user_id: user_id.to_string(),
                kind,
                word,
            }),
        }
    }
}

/// Event handler trait for processing game events
pub trait GameEventHandler: Send + Sync {
    fn handle_event(&mut self, event: &GameEvent);
}

/// Simple event bus for distributing game events
pub struct GameEventBus {
    handlers: Vec<Box<dyn GameEventHandler>>,
}

impl GameEventBus {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Box<dyn GameEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn publish(&mut self, event: GameEvent) {
        for handler in &mut self.handlers {
            handler.handle_event(&event);
        }
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }
}

impl Default for GameEventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Writes every event to the tracing log
pub struct TracingEventHandler;

impl GameEventHandler for TracingEventHandler {
    fn handle_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::SessionStarted { user_id, kind } => {
                tracing::info!("User {} started a {:?} game", user_id, kind);
            }
            GameEvent::RoundWon {
                user_id,
                kind,
                word,
                score,
            } => {
                tracing::info!(
                    "User {} solved {:?} word '{}' (score {})",
                    user_id,
                    kind,
                    word,
                    score
                );
            }
            GameEvent::RoundLost {
                user_id,
                kind,
                word,
            } => {
                tracing::info!("User {} missed {:?} word '{}'", user_id, kind, word);
            }
            GameEvent::MoveRejected { user_id, reason } => {
                tracing::warn!("Rejected move from user {}: {}", user_id, reason);
            }
            GameEvent::SessionEnded {
                user_id,
                kind,
                final_score,
            } => {
                tracing::info!(
                    "User {} left {:?} game with score {}",
                    user_id,
                    kind,
                    final_score
                );
            }
        }
    }
}
