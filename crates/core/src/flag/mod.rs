pub mod model;

pub use model::{Flag, FlagError, FlaggedItem};
