pub mod dictionary;
pub mod documents;
pub mod errors;
pub mod game;
pub mod messages;
pub mod user;

// Re-export all types
pub use dictionary::*;
pub use documents::*;
pub use errors::*;
pub use game::*;
pub use messages::*;
pub use user::*;
