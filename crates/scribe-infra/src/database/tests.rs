use std::sync::Arc;

use chrono::{TimeDelta, Utc};
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult, Transaction};
use uuid::Uuid;

use scribe_core::domain::{PostDraft, User};
use scribe_core::error::RepoError;
use scribe_core::pagination::{MAX_SKIP, PAGE_SIZE, PageNumber, PageWindow};
use scribe_core::ports::{PostRepository, UserRepository};
use scribe_core::search::SearchTerm;

use crate::database::entity::{post, user};
use crate::database::postgres_repo::{PostgresPostRepository, PostgresUserRepository};

fn post_model(title: &str, minutes_ago: i64) -> post::Model {
    let at = Utc::now() - TimeDelta::minutes(minutes_ago);
    post::Model {
        id: Uuid::new_v4(),
        title: title.to_owned(),
        body: "Content".to_owned(),
        created_at: at.into(),
        updated_at: at.into(),
    }
}

fn user_model(username: &str) -> user::Model {
    user::Model {
        id: Uuid::new_v4(),
        username: username.to_owned(),
        password_hash: "$argon2id$v=19$...".to_owned(),
        created_at: Utc::now().into(),
    }
}

/// The statements a mock connection saw. The repository must be dropped first.
fn transaction_log(db: Arc<DatabaseConnection>) -> Vec<Transaction> {
    Arc::try_unwrap(db)
        .ok()
        .expect("connection still shared")
        .into_transaction_log()
}

#[tokio::test]
async fn test_find_post_by_id() {
    let model = post_model("Test Post", 0);
    let post_id = model.id;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model]])
        .into_connection();

    let repo = PostgresPostRepository::new(Arc::new(db));

    let post = repo.find_by_id(post_id).await.unwrap().unwrap();
    assert_eq!(post.title, "Test Post");
    assert_eq!(post.id, post_id);
}

#[tokio::test]
async fn test_list_recent_orders_and_windows() {
    let db = Arc::new(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![post_model("newer", 1), post_model("older", 2)]])
            .into_connection(),
    );

    let repo = PostgresPostRepository::new(Arc::clone(&db));
    let posts = repo
        .list_recent(PageWindow { skip: 10, limit: 5 })
        .await
        .unwrap();
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].title, "newer");
    drop(repo);

    let sql = format!("{:?}", transaction_log(db)[0]);
    assert!(sql.contains("created_at"));
    assert!(sql.contains("DESC"));
    assert!(sql.contains("LIMIT"));
    assert!(sql.contains("OFFSET"));
}

#[tokio::test]
async fn test_list_recent_huge_page_is_empty() {
    let db = Arc::new(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<post::Model>::new()])
            .into_connection(),
    );

    let window = PageNumber::parse(Some("2000000000000000000")).window(PAGE_SIZE);
    let repo = PostgresPostRepository::new(Arc::clone(&db));
    let posts = repo.list_recent(window).await.unwrap();
    assert!(posts.is_empty());
    drop(repo);

    let sql = format!("{:?}", transaction_log(db)[0]);
    assert!(sql.contains(&MAX_SKIP.to_string()));
}

#[tokio::test]
async fn test_search_filters_on_title_and_body() {
    let db = Arc::new(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![post_model("NodeJS", 0)]])
            .into_connection(),
    );

    let repo = PostgresPostRepository::new(Arc::clone(&db));
    let hits = repo.search(&SearchTerm::sanitize("Node.js")).await.unwrap();
    assert_eq!(hits.len(), 1);
    drop(repo);

    let sql = format!("{:?}", transaction_log(db)[0]);
    assert!(sql.contains("LOWER"));
    assert!(sql.contains(" OR "));
    assert!(sql.contains("%nodejs%"));
}

#[tokio::test]
async fn test_update_post() {
    let mut model = post_model("Old", 5);
    let post_id = model.id;
    let created_at = model.created_at;
    model.title = "New".to_owned();
    model.updated_at = Utc::now().into();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model]])
        .into_connection();

    let repo = PostgresPostRepository::new(Arc::new(db));
    let draft = PostDraft {
        title: "New".to_owned(),
        body: "Content".to_owned(),
    };

    let post = repo.update(post_id, draft).await.unwrap();
    assert_eq!(post.id, post_id);
    assert_eq!(post.title, "New");
    assert_eq!(post.created_at, created_at);
}

#[tokio::test]
async fn test_update_missing_post() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(Arc::new(db));
    let draft = PostDraft {
        title: "T".to_owned(),
        body: "B".to_owned(),
    };

    let result = repo.update(Uuid::new_v4(), draft).await;
    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_delete_missing_post() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(Arc::new(db));
    let result = repo.delete(Uuid::new_v4()).await;
    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_find_user_by_username() {
    let model = user_model("alice");
    let user_id = model.id;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model]])
        .into_connection();

    let repo = PostgresUserRepository::new(Arc::new(db));
    let found = repo.find_by_username("alice").await.unwrap().unwrap();
    assert_eq!(found.id, user_id);
    assert_eq!(found.username, "alice");
}

#[tokio::test]
async fn test_create_user() {
    let model = user_model("alice");
    let user_id = model.id;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::new(), vec![model]])
        .into_connection();

    let repo = PostgresUserRepository::new(Arc::new(db));
    let created = repo
        .create(User::new("alice".to_owned(), "hash".to_owned()))
        .await
        .unwrap();
    assert_eq!(created.id, user_id);
}

#[tokio::test]
async fn test_create_duplicate_username() {
    let db = Arc::new(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![user_model("alice")]])
            .into_connection(),
    );

    let repo = PostgresUserRepository::new(Arc::clone(&db));
    let result = repo
        .create(User::new("alice".to_owned(), "other".to_owned()))
        .await;
    assert!(matches!(result, Err(RepoError::Constraint(_))));
    drop(repo);

    // Only the lookup ran, no INSERT
    let log = transaction_log(db);
    assert_eq!(log.len(), 1);
    assert!(!format!("{:?}", log[0]).contains("INSERT"));
}
