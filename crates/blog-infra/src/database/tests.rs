use chrono::Utc;
use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult, RuntimeErr};
use uuid::Uuid;

use blog_core::domain::{Post, PostStatus};
use blog_core::error::RepoError;
use blog_core::ports::{CategoryRepository, PostRepository, TokenBlacklist};

use crate::database::entity::{category, post, revoked_token};
use crate::database::postgres_repo::{
    PostgresCategoryRepository, PostgresPostRepository, PostgresTokenBlacklist,
};

fn post_model(status: &str) -> post::Model {
    post::Model {
        id: Uuid::new_v4(),
        title: "Test Post".to_owned(),
        content: "Content".to_owned(),
        category_id: Uuid::new_v4(),
        author_id: Uuid::new_v4(),
        created_at: Utc::now().into(),
        status: status.to_owned(),
    }
}

#[tokio::test]
async fn test_find_post_by_id_maps_status() {
    let model = post_model("draft");
    let post_id = model.id;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![model]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

    let post = result.unwrap();
    assert_eq!(post.id, post_id);
    assert_eq!(post.status, PostStatus::Draft);
}

#[tokio::test]
async fn test_find_post_by_id_missing() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    assert!(repo.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_published_maps_rows() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post_model("published"), post_model("published")]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let posts = repo.list_published().await.unwrap();

    assert_eq!(posts.len(), 2);
    assert!(posts.iter().all(|p| p.status == PostStatus::Published));
}

#[tokio::test]
async fn test_category_list() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![
            category::Model {
                id: Uuid::new_v4(),
                name: "Tech".to_owned(),
            },
            category::Model {
                id: Uuid::new_v4(),
                name: "Life".to_owned(),
            },
        ]])
        .into_connection();

    let repo = PostgresCategoryRepository::new(db);
    let categories = repo.list().await.unwrap();

    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0].name, "Tech");
}

#[tokio::test]
async fn test_blacklist_is_revoked() {
    let jti = Uuid::new_v4();
    let now = Utc::now();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![
            vec![revoked_token::Model {
                jti,
                expires_at: now.into(),
                revoked_at: now.into(),
            }],
            Vec::<revoked_token::Model>::new(),
        ])
        .into_connection();

    let blacklist = PostgresTokenBlacklist::new(db);

    assert!(blacklist.is_revoked(jti).await.unwrap());
    assert!(!blacklist.is_revoked(Uuid::new_v4()).await.unwrap());
}

#[tokio::test]
async fn test_delete_missing_post_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let result = repo.delete(Uuid::new_v4()).await;

    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_unique_violation_keeps_constraint_message() {
    let jti = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors(vec![DbErr::Query(RuntimeErr::Internal(
            "duplicate key value violates unique constraint \"revoked_tokens_pkey\"".to_owned(),
        ))])
        .into_connection();

    let blacklist = PostgresTokenBlacklist::new(db);
    let result = blacklist.revoke(jti, Utc::now()).await;

    match result {
        Err(RepoError::Constraint(msg)) => {
            assert!(msg.contains("revoked_tokens_pkey"));
        }
        other => panic!("expected constraint violation, got {other:?}"),
    }
}
