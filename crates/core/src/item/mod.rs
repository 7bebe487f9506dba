pub mod model;

pub use model::{items_from_documents, Item, ItemError, ItemStatus, ItemType, Message, NewItem};
