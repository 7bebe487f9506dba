#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use chrono::Duration as TokenTtl;
use lostfound_api::middleware::auth::{issue_token, ADMIN_ROLE};
use lostfound_api::{build_app, AppConfig, AppState};
use lostfound_client::{AdminClient, BoardClient, ClientConfig, ItemRepository};
use lostfound_core::events::EventBus;
use lostfound_core::store::MemoryDocumentStore;
use lostfound_core::{ItemType, NewItem};

pub const SECRET: &str = "client-test-secret";

/// A live server on an ephemeral port, backed by the in-memory store.
pub struct TestServer {
    pub config: ClientConfig,
}

impl TestServer {
    pub async fn start() -> Self {
        let config = AppConfig {
            jwt_secret: SECRET.to_string(),
            ..AppConfig::default()
        };
        let state = AppState::new(
            Arc::new(MemoryDocumentStore::new()),
            config,
            EventBus::new(16),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, build_app(state)).await.unwrap();
        });

        Self {
            config: ClientConfig::new(format!("http://{addr}")),
        }
    }

    pub fn repository(&self) -> ItemRepository {
        ItemRepository::new(&self.config).unwrap()
    }

    pub fn board(&self) -> BoardClient {
        BoardClient::new(&self.config).unwrap()
    }

    pub fn admin(&self) -> AdminClient {
        let token = issue_token(
            SECRET,
            "admin@campus.edu",
            Some(ADMIN_ROLE),
            TokenTtl::hours(1),
        )
        .unwrap();
        AdminClient::new(&self.config, token).unwrap()
    }
}

/// Client pointed at a port nothing listens on.
pub fn unreachable_config() -> ClientConfig {
    ClientConfig {
        base_url: "http://127.0.0.1:9".to_string(),
        timeout: Duration::from_secs(2),
    }
}

pub fn new_item(name: &str, kind: ItemType, category: &str, owner: &str) -> NewItem {
    NewItem {
        name: name.to_string(),
        kind,
        category: category.to_string(),
        description: format!("{name} description"),
        location: "Library".to_string(),
        contact_email: owner.to_string(),
        image: None,
    }
}
