//! Client side of the lost-and-found board.
//!
//! [`ItemRepository`] wraps the storage endpoint and never surfaces
//! transport failures to readers: they degrade to "no data" and are logged.
//! [`BoardClient`] and [`AdminClient`] build the UI operations on top of it,
//! with all page state held in an explicit [`AppSession`].

pub mod admin;
pub mod board;
pub mod config;
pub mod debounce;
pub mod error;
mod http;
pub mod repository;
pub mod session;

pub use admin::AdminClient;
pub use board::{BoardClient, ItemDetails};
pub use config::ClientConfig;
pub use debounce::Debouncer;
pub use error::{ClientError, ClientResult};
pub use repository::{ItemRepository, UpsertReceipt, Versioned};
pub use session::AppSession;
