mod common;

use common::{unreachable_config, TestServer};
use lostfound_client::{ClientError, ItemRepository};
use serde_json::json;

#[tokio::test]
async fn upsert_then_fetch_returns_document_and_revision() {
    let server = TestServer::start().await;
    let repo = server.repository();
    let doc = json!({ "id": "item_1", "name": "Umbrella" });

    let receipt = repo.upsert("item_1", &doc).await.unwrap();
    assert_eq!(receipt.key, "item_1");

    let fetched = repo.fetch_versioned("item_1").await.unwrap();
    assert_eq!(fetched.document, doc);
    assert_eq!(fetched.revision, receipt.revision);
}

#[tokio::test]
async fn missing_key_is_none() {
    let server = TestServer::start().await;
    assert!(server.repository().fetch_one("item_missing").await.is_none());
}

#[tokio::test]
async fn list_only_contains_item_documents() {
    let server = TestServer::start().await;
    let repo = server.repository();
    repo.upsert("item_1", &json!({ "name": "Keys" })).await.unwrap();
    repo.upsert("settings", &json!({ "theme": "dark" })).await.unwrap();

    let all = repo.fetch_all().await;
    assert_eq!(all, vec![json!({ "id": "item_1", "name": "Keys" })]);
}

#[tokio::test]
async fn stale_revision_is_a_conflict() {
    let server = TestServer::start().await;
    let repo = server.repository();
    let first = repo.upsert("item_1", &json!({ "v": 1 })).await.unwrap();
    repo.upsert("item_1", &json!({ "v": 2 })).await.unwrap();

    let result = repo
        .upsert_if("item_1", &json!({ "v": 3 }), first.revision.as_deref())
        .await;
    assert!(matches!(result, Err(ClientError::Conflict(_))));
    assert_eq!(repo.fetch_one("item_1").await, Some(json!({ "v": 2 })));
}

#[tokio::test]
async fn delete_is_idempotent() {
    let server = TestServer::start().await;
    let repo = server.repository();
    repo.upsert("item_1", &json!({})).await.unwrap();

    repo.delete("item_1").await.unwrap();
    repo.delete("item_1").await.unwrap();
    assert!(repo.fetch_one("item_1").await.is_none());
}

#[tokio::test]
async fn unreachable_server_degrades_to_no_data() {
    let repo = ItemRepository::new(&unreachable_config()).unwrap();

    assert!(repo.fetch_all().await.is_empty());
    assert!(repo.fetch_one("item_1").await.is_none());
    assert!(repo.upsert("item_1", &json!({})).await.is_none());
    assert!(matches!(
        repo.delete("item_1").await,
        Err(ClientError::Http(_))
    ));
}
