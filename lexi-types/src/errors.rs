use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::GameKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, thiserror::Error)]
#[ts(export)]
pub enum GameError {
    #[error("No words available in the word pool")]
    EmptyWordPool,
    #[error("Invalid letter: {letter:?}")]
    InvalidLetter { letter: String },
    #[error("Move is for {expected:?} but the active game is {actual:?}")]
    WrongGameKind { expected: GameKind, actual: GameKind },
    #[error("No active game")]
    NoActiveGame,
}
