use blog_api::domain::entities::{NewPost, NewUser, PostChanges, User};
use blog_api::domain::repositories::{PostRepository, UserRepository};
use blog_api::error::AppError;
use blog_api::infrastructure::persistence::{PgPostRepository, PgUserRepository};
use sqlx::PgPool;
use std::sync::Arc;

async fn setup(pool: PgPool) -> (PgUserRepository, PgPostRepository, User) {
    let pool = Arc::new(pool);
    let users = PgUserRepository::new(pool.clone());
    let posts = PgPostRepository::new(pool);

    let author = users
        .create(NewUser {
            name: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "hash".to_string(),
        })
        .await
        .unwrap();

    (users, posts, author)
}

fn new_post(title: &str, author_id: i64) -> NewPost {
    NewPost {
        title: title.to_string(),
        content: format!("Content of {title}"),
        author_id,
    }
}

#[sqlx::test]
async fn test_create_embeds_author(pool: PgPool) {
    let (_users, posts, author) = setup(pool).await;

    let post = posts.create(new_post("Hello", author.id)).await.unwrap();

    assert_eq!(post.title, "Hello");
    assert_eq!(post.author_id, author.id);
    assert_eq!(post.author.name, "alice");
    assert_eq!(post.author.email, "alice@example.com");
}

#[sqlx::test]
async fn test_create_with_unknown_author(pool: PgPool) {
    let (_users, posts, _author) = setup(pool).await;

    let result = posts.create(new_post("Orphan", 9999)).await;

    assert!(matches!(result, Err(AppError::Validation { .. })));
}

#[sqlx::test]
async fn test_duplicate_title(pool: PgPool) {
    let (_users, posts, author) = setup(pool).await;
    posts.create(new_post("Hello", author.id)).await.unwrap();

    match posts.create(new_post("Hello", author.id)).await {
        Err(AppError::Conflict { message, .. }) => assert_eq!(message, "Title Already Taken"),
        other => panic!("expected conflict, got {other:?}"),
    }
}

#[sqlx::test]
async fn test_find_and_list(pool: PgPool) {
    let (_users, posts, author) = setup(pool).await;
    let first = posts.create(new_post("First", author.id)).await.unwrap();
    posts.create(new_post("Second", author.id)).await.unwrap();

    let found = posts.find_by_id(first.id).await.unwrap().unwrap();
    assert_eq!(found.title, "First");
    assert_eq!(found.author.id, author.id);

    assert!(posts.find_by_id(9999).await.unwrap().is_none());

    let list = posts.list(0, 100).await.unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].title, "First");
    assert_eq!(list[1].title, "Second");
    assert_eq!(posts.count().await.unwrap(), 2);
}

#[sqlx::test]
async fn test_update(pool: PgPool) {
    let (_users, posts, author) = setup(pool).await;
    let post = posts.create(new_post("Hello", author.id)).await.unwrap();

    let updated = posts
        .update(
            post.id,
            PostChanges {
                title: "Hello again".to_string(),
                content: "Edited".to_string(),
            },
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.title, "Hello again");
    assert_eq!(updated.content, "Edited");
    assert_eq!(updated.author.id, author.id);
}

#[sqlx::test]
async fn test_delete_requires_author(pool: PgPool) {
    let (_users, posts, author) = setup(pool).await;
    let post = posts.create(new_post("Hello", author.id)).await.unwrap();

    assert!(!posts.delete(post.id, author.id + 1).await.unwrap());
    assert!(posts.delete(post.id, author.id).await.unwrap());
    assert!(posts.find_by_id(post.id).await.unwrap().is_none());
}

#[sqlx::test]
async fn test_user_delete_cascades(pool: PgPool) {
    let (users, posts, author) = setup(pool).await;
    posts.create(new_post("One", author.id)).await.unwrap();
    posts.create(new_post("Two", author.id)).await.unwrap();

    assert!(users.delete(author.id).await.unwrap());

    assert_eq!(posts.count().await.unwrap(), 0);
}
