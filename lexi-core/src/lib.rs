pub mod game_events;
pub mod game_session;
pub mod hangman;
pub mod history;
pub mod quiz;
pub mod random;
pub mod scramble;
pub mod word_lists;
pub mod word_pool;

// Re-export main components
pub use game_events::*;
pub use game_session::*;
pub use hangman::*;
pub use history::*;
pub use quiz::*;
pub use random::*;
pub use scramble::*;
pub use word_lists::*;
pub use word_pool::*;
