mod common;

use common::{new_item, TestServer};
use lostfound_client::{AdminClient, AppSession, ClientError};
use lostfound_core::{FlagError, ItemType};

const OWNER: &str = "owner@campus.edu";

#[tokio::test]
async fn flag_then_approve_clears_the_queue() {
    let server = TestServer::start().await;
    let mut owner = AppSession::signed_in(OWNER);
    let item = server
        .board()
        .post_item(&mut owner, new_item("Phone", ItemType::Found, "Electronics", OWNER))
        .await
        .unwrap();
    let admin = server.admin();

    let flag = admin.flag_item(&item.id, "Looks like spam").await.unwrap();
    assert_eq!(flag.item_id, item.id);

    let queue = admin.flagged_items().await;
    assert_eq!(queue.len(), 1);
    assert_eq!(queue[0].item.id, item.id);
    assert_eq!(queue[0].flag_reason, "Looks like spam");

    assert_eq!(admin.approve_item(&item.id).await.unwrap(), 1);
    assert!(admin.flagged_items().await.is_empty());
    assert!(server.board().item_details(&owner, &item.id).await.is_some());
}

#[tokio::test]
async fn blank_reason_is_rejected_locally() {
    let server = TestServer::start().await;
    let result = server.admin().flag_item("item_1", "  ").await;
    assert!(matches!(
        result,
        Err(ClientError::Flag(FlagError::EmptyReason))
    ));
}

#[tokio::test]
async fn deleted_items_drop_out_of_the_flag_queue() {
    let server = TestServer::start().await;
    let mut owner = AppSession::signed_in(OWNER);
    let item = server
        .board()
        .post_item(&mut owner, new_item("Hat", ItemType::Lost, "Clothing", OWNER))
        .await
        .unwrap();
    let admin = server.admin();
    admin.flag_item(&item.id, "Offensive").await.unwrap();

    admin.delete_item(&item.id).await.unwrap();

    assert!(admin.flagged_items().await.is_empty());
    assert!(server.board().item_details(&owner, &item.id).await.is_none());
}

#[tokio::test]
async fn non_admin_token_is_refused() {
    let server = TestServer::start().await;
    let admin = AdminClient::new(&server.config, "not-a-token").unwrap();

    let result = admin.flag_item("item_1", "spam").await;
    assert!(matches!(result, Err(ClientError::Status { status: 401, .. })));
    assert!(admin.dashboard(0).await.is_none());
    assert!(admin.users().await.is_empty());
}

#[tokio::test]
async fn dashboard_users_and_export_reflect_posts() {
    let server = TestServer::start().await;
    let board = server.board();
    let mut owner = AppSession::signed_in(OWNER);
    let wallet = board
        .post_item(&mut owner, new_item("Wallet", ItemType::Lost, "Wallets", OWNER))
        .await
        .unwrap();
    board
        .post_item(&mut owner, new_item("Charger", ItemType::Found, "Electronics", OWNER))
        .await
        .unwrap();
    board.toggle_status(&owner, &wallet.id).await.unwrap();

    let admin = server.admin();
    let stats = admin.dashboard(0).await.unwrap();
    assert_eq!(stats.total_items, 2);
    assert_eq!(stats.claimed_items, 1);
    assert_eq!(stats.unclaimed_items, 1);
    assert_eq!(stats.active_users, 1);
    assert_eq!(stats.weekly_activity.len(), 7);

    let users = admin.users().await;
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].total_posts, 2);

    let analytics = admin.analytics().await.unwrap();
    assert_eq!(analytics.success_rate, 50);

    let csv = admin.export_csv().await.unwrap();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("ID,Name,Type,Category,Status,Location,Description,Email,Date")
    );
    assert_eq!(lines.count(), 2);
}
