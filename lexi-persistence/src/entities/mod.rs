pub mod documents;
pub mod prelude;
