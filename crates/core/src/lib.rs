//! Domain model, pure pipelines and storage backends for the campus
//! lost-and-found board.

pub mod browse;
pub mod document;
pub mod events;
pub mod flag;
pub mod item;
pub mod moderation;
pub mod store;

pub use browse::{browse, BrowseOutcome, ItemFilter, View};
pub use flag::model::{Flag, FlagError, FlaggedItem};
pub use item::model::{Item, ItemError, ItemStatus, ItemType, Message, NewItem};
pub use store::{DocumentStore, StoreError, StoreResult};
