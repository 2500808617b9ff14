mod common;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use common::category_ref;
use common::user_payload;
use common::TestApp;
use common::TestDb;
use tonic::Code;
use user_service::inbound::grpc::UserGrpcService;
use user_service::proto::get_user_request::View;
use user_service::user::errors::UserError;
use user_service::user::models::CreateUserCommand;
use user_service::user::models::UpdateUserCommand;
use user_service::user::models::User;
use user_service::user::models::UserId;
use user_service::user::models::UserView;
use user_service::user::ports::UserServicePort;

/// Service whose reads never finish within the server timeout
struct SlowService;

#[async_trait]
impl UserServicePort for SlowService {
    async fn create_user(&self, _command: CreateUserCommand) -> Result<User, UserError> {
        Err(UserError::DatabaseError("unavailable".to_string()))
    }

    async fn get_user(&self, id: UserId, _view: UserView) -> Result<User, UserError> {
        tokio::time::sleep(Duration::from_secs(2)).await;
        Err(UserError::NotFound(id))
    }

    async fn update_user(
        &self,
        _id: UserId,
        _command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        Err(UserError::DatabaseError("unavailable".to_string()))
    }

    async fn delete_user(&self, _id: UserId) -> Result<(), UserError> {
        Err(UserError::DatabaseError("unavailable".to_string()))
    }
}

#[tokio::test]
async fn test_create_then_get_default_view() {
    let app = TestApp::spawn().await;

    let mut user = user_payload("user_1", "user_1@example.com");
    user.alias = Some("John Doe".to_string());

    let created = app.client.create(user).await.expect("Create failed");
    assert!(created.id > 0);

    let created_user = created.user.expect("Create reply carries the user");
    assert_eq!(created_user.id, created.id);
    assert_eq!(created_user.name, "user_1");

    let fetched = app
        .client
        .get(created.id, View::Basic)
        .await
        .expect("Get failed");
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.name, "user_1");
    assert_eq!(fetched.email_address, "user_1@example.com");
    assert_eq!(fetched.alias.as_deref(), Some("John Doe"));
    assert!(fetched.administered.is_empty());
}

#[tokio::test]
async fn test_alias_absent_and_empty_are_distinct() {
    let app = TestApp::spawn().await;

    let without = app
        .client
        .create(user_payload("plain", "plain@example.com"))
        .await
        .unwrap();

    let mut empty = user_payload("empty", "empty@example.com");
    empty.alias = Some(String::new());
    let with_empty = app.client.create(empty).await.unwrap();

    let without = app.client.get(without.id, View::Basic).await.unwrap();
    let with_empty = app.client.get(with_empty.id, View::Basic).await.unwrap();

    assert_eq!(without.alias, None);
    assert_eq!(with_empty.alias, Some(String::new()));
}

#[tokio::test]
async fn test_get_with_edge_ids_lists_each_category_once() {
    let app = TestApp::spawn().await;

    let admin = app
        .client
        .create(user_payload("admin", "admin@example.com"))
        .await
        .unwrap();
    let other = app
        .client
        .create(user_payload("other", "other@example.com"))
        .await
        .unwrap();

    let first = app.db.create_category("first", Some(admin.id)).await;
    let second = app.db.create_category("second", Some(admin.id)).await;
    app.db.create_category("foreign", Some(other.id)).await;
    app.db.create_category("orphan", None).await;

    let basic = app.client.get(admin.id, View::Basic).await.unwrap();
    assert!(basic.administered.is_empty());

    let with_edges = app.client.get(admin.id, View::WithEdgeIds).await.unwrap();
    let ids: Vec<i32> = with_edges.administered.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![first.id.0, second.id.0]);
}

#[tokio::test]
async fn test_get_unknown_user_is_not_found() {
    let app = TestApp::spawn().await;

    let status = app.client.get(12345, View::WithEdgeIds).await.unwrap_err();

    assert_eq!(status.code(), Code::NotFound);
}

#[tokio::test]
async fn test_create_with_duplicate_category_reference_links_once() {
    let app = TestApp::spawn().await;

    let category = app.db.create_category("cat_1", None).await;

    let mut user = user_payload("user", "user@service.code");
    user.administered = vec![category_ref(category.id.0), category_ref(category.id.0)];

    let created = app.client.create(user).await.unwrap();

    assert_eq!(app.db.count_categories_administered_by(created.id).await, 1);
    let fetched = app.client.get(created.id, View::WithEdgeIds).await.unwrap();
    assert_eq!(fetched.administered.len(), 1);
}

#[tokio::test]
async fn test_create_with_missing_category_is_not_found() {
    let app = TestApp::spawn().await;

    let mut user = user_payload("user", "user@service.code");
    user.administered = vec![category_ref(999)];

    let status = app.client.create(user).await.unwrap_err();

    assert_eq!(status.code(), Code::NotFound);
    assert!(status.message().contains("999"));
    assert_eq!(app.db.count_users().await, 0);
}

#[tokio::test]
async fn test_create_accepts_any_non_empty_name_and_email() {
    let app = TestApp::spawn().await;

    for (name, email) in [("user", "user"), ("  ", "a@b.c")] {
        let created = app
            .client
            .create(user_payload(name, email))
            .await
            .expect("Create failed");

        let fetched = app.client.get(created.id, View::Basic).await.unwrap();
        assert_eq!(fetched.name, name);
        assert_eq!(fetched.email_address, email);
    }

    let status = app
        .client
        .create(user_payload("user", ""))
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::InvalidArgument);
    assert_eq!(app.db.count_users().await, 2);
}

#[tokio::test]
async fn test_get_returns_rows_written_outside_the_service() {
    let app = TestApp::spawn().await;

    let id = sqlx::query("INSERT INTO users (name, email_address) VALUES ('admin', 'admin')")
        .execute(&app.db.pool)
        .await
        .unwrap()
        .last_insert_rowid() as i32;

    let fetched = app.client.get(id, View::WithEdgeIds).await.unwrap();

    assert_eq!(fetched.name, "admin");
    assert_eq!(fetched.email_address, "admin");
    assert_eq!(fetched.alias, None);
}

#[tokio::test]
async fn test_update_replaces_administered_set() {
    let app = TestApp::spawn().await;

    let kept = app.db.create_category("kept", None).await;
    let dropped = app.db.create_category("dropped", None).await;
    let added = app.db.create_category("added", None).await;

    let mut user = user_payload("user", "user@service.code");
    user.administered = vec![category_ref(kept.id.0), category_ref(dropped.id.0)];
    let created = app.client.create(user).await.unwrap();

    let mut update = user_payload("renamed", "renamed@service.code");
    update.id = created.id;
    update.alias = Some("Jane".to_string());
    update.administered = vec![category_ref(kept.id.0), category_ref(added.id.0)];
    let updated = app.client.update(update).await.unwrap();
    assert_eq!(updated.name, "renamed");

    let fetched = app.client.get(created.id, View::WithEdgeIds).await.unwrap();
    assert_eq!(fetched.email_address, "renamed@service.code");
    assert_eq!(fetched.alias.as_deref(), Some("Jane"));
    let ids: Vec<i32> = fetched.administered.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![kept.id.0, added.id.0]);
    assert_eq!(app.db.categories_admin(dropped.id.0).await, None);
}

#[tokio::test]
async fn test_update_with_missing_category_keeps_previous_state() {
    let app = TestApp::spawn().await;

    let category = app.db.create_category("cat_1", None).await;

    let mut user = user_payload("user", "user@service.code");
    user.administered = vec![category_ref(category.id.0)];
    let created = app.client.create(user).await.unwrap();

    let mut update = user_payload("renamed", "renamed@service.code");
    update.id = created.id;
    update.administered = vec![category_ref(999)];
    let status = app.client.update(update).await.unwrap_err();
    assert_eq!(status.code(), Code::NotFound);

    let fetched = app.client.get(created.id, View::WithEdgeIds).await.unwrap();
    assert_eq!(fetched.name, "user");
    assert_eq!(fetched.administered.len(), 1);
}

#[tokio::test]
async fn test_update_unknown_user_is_not_found() {
    let app = TestApp::spawn().await;

    let mut update = user_payload("ghost", "ghost@example.com");
    update.id = 77;

    let status = app.client.update(update).await.unwrap_err();

    assert_eq!(status.code(), Code::NotFound);
}

#[tokio::test]
async fn test_delete_clears_admin_and_keeps_categories() {
    let app = TestApp::spawn().await;

    let created = app
        .client
        .create(user_payload("rotemtam", "r@entgo.io"))
        .await
        .unwrap();
    let category = app.db.create_category("category", Some(created.id)).await;

    app.client.delete(created.id).await.expect("Delete failed");

    let status = app.client.get(created.id, View::Basic).await.unwrap_err();
    assert_eq!(status.code(), Code::NotFound);
    assert_eq!(app.db.categories_admin(category.id.0).await, None);

    let status = app.client.delete(created.id).await.unwrap_err();
    assert_eq!(status.code(), Code::NotFound);
}

#[tokio::test]
async fn test_concurrent_creates_race_on_the_same_category() {
    let app = TestApp::spawn().await;

    let category = app.db.create_category("contested", None).await;

    let mut handles = Vec::new();
    for i in 0..8 {
        let client = app.client.clone();
        let category_id = category.id.0;
        handles.push(tokio::spawn(async move {
            let mut user = user_payload(&format!("user_{}", i), &format!("user_{}@example.com", i));
            user.administered = vec![category_ref(category_id)];
            client.create(user).await.map(|reply| reply.id)
        }));
    }

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap().expect("Create failed"));
    }

    // Last committed wins: exactly one of the creators ends up as admin.
    let admin = app
        .db
        .categories_admin(category.id.0)
        .await
        .expect("Category lost its admin");
    assert!(ids.contains(&admin));

    let mut total = 0;
    for id in &ids {
        total += app.db.count_categories_administered_by(*id).await;
    }
    assert_eq!(total, 1);
}

#[tokio::test]
async fn test_slow_call_is_cut_off_by_request_timeout() {
    let service = UserGrpcService::new(Arc::new(SlowService));
    let app = TestApp::spawn_with(TestDb::new().await, service, Duration::from_millis(50)).await;

    let status = app.client.get(1, View::Basic).await.unwrap_err();

    assert_eq!(status.code(), Code::Cancelled);
}

#[tokio::test]
async fn test_graceful_shutdown_stops_serving() {
    let mut app = TestApp::spawn().await;

    let created = app
        .client
        .create(user_payload("user", "user@service.code"))
        .await
        .unwrap();

    app.shutdown().await.expect("Server did not shut down cleanly");

    assert!(app.client.get(created.id, View::Basic).await.is_err());
}
