pub mod id;
pub mod model;
pub mod validate;

pub use id::{DocumentKey, ITEM_PREFIX};
pub use model::StoredDocument;
pub use validate::{validate_put_request, ValidationError};
