#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use blog_api::domain::entities::{NewPost, NewUser, Post, PostChanges, User, UserChanges};
use blog_api::domain::repositories::{PostRepository, UserRepository};
use blog_api::error::AppError;
use blog_api::routes::api_router;
use blog_api::state::AppState;
use blog_api::utils::db_error::conflict_message;
use chrono::Utc;
use serde_json::json;
use std::sync::{Arc, Mutex};

pub const TEST_SECRET: &str = "test-api-secret";
pub const TEST_PASSWORD: &str = "password123";

/// Shared in-memory tables so posts can embed their author and user
/// deletion can cascade.
#[derive(Default)]
pub struct MemoryStore {
    users: Vec<User>,
    posts: Vec<(i64, String, String, i64)>,
    next_user_id: i64,
    next_post_id: i64,
}

impl MemoryStore {
    fn post(&self, id: i64) -> Option<Post> {
        let (id, title, content, author_id) = self.posts.iter().find(|p| p.0 == id)?.clone();
        let author = self.users.iter().find(|u| u.id == author_id)?.clone();
        let now = Utc::now();

        Some(Post {
            id,
            title,
            content,
            author_id,
            author,
            created_at: now,
            updated_at: now,
        })
    }

    fn check_user_unique(
        &self,
        name: &str,
        email: &str,
        except: Option<i64>,
    ) -> Result<(), AppError> {
        let others = self.users.iter().filter(|u| Some(u.id) != except);

        for u in others {
            if u.name == name {
                return Err(conflict("users_name_key"));
            }
            if u.email == email {
                return Err(conflict("users_email_key"));
            }
        }

        Ok(())
    }

    fn check_title_unique(&self, title: &str, except: Option<i64>) -> Result<(), AppError> {
        if self
            .posts
            .iter()
            .any(|p| Some(p.0) != except && p.1 == title)
        {
            return Err(conflict("posts_title_key"));
        }

        Ok(())
    }
}

fn conflict(constraint: &str) -> AppError {
    AppError::conflict(
        conflict_message(Some(constraint)),
        json!({ "constraint": constraint }),
    )
}

pub type Store = Arc<Mutex<MemoryStore>>;

pub struct MemoryUserRepository {
    store: Store,
}

pub struct MemoryPostRepository {
    store: Store,
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut store = self.store.lock().unwrap();
        store.check_user_unique(&new_user.name, &new_user.email, None)?;

        store.next_user_id += 1;
        let now = Utc::now();
        let user = User {
            id: store.next_user_id,
            name: new_user.name,
            email: new_user.email,
            password_hash: new_user.password_hash,
            created_at: now,
            updated_at: now,
        };
        store.users.push(user.clone());

        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let store = self.store.lock().unwrap();
        Ok(store.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let store = self.store.lock().unwrap();
        Ok(store.users.iter().find(|u| u.email == email).cloned())
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<User>, AppError> {
        let store = self.store.lock().unwrap();
        Ok(store
            .users
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn update(&self, id: i64, changes: UserChanges) -> Result<Option<User>, AppError> {
        let mut store = self.store.lock().unwrap();
        store.check_user_unique(&changes.name, &changes.email, Some(id))?;

        let Some(user) = store.users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        user.name = changes.name;
        user.email = changes.email;
        user.password_hash = changes.password_hash;
        user.updated_at = Utc::now();

        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut store = self.store.lock().unwrap();
        let before = store.users.len();
        store.users.retain(|u| u.id != id);
        store.posts.retain(|p| p.3 != id);

        Ok(store.users.len() < before)
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.store.lock().unwrap().users.len() as i64)
    }
}

#[async_trait]
impl PostRepository for MemoryPostRepository {
    async fn create(&self, new_post: NewPost) -> Result<Post, AppError> {
        let mut store = self.store.lock().unwrap();
        store.check_title_unique(&new_post.title, None)?;

        if !store.users.iter().any(|u| u.id == new_post.author_id) {
            return Err(AppError::validation(
                "Referenced record does not exist",
                json!({ "constraint": "posts_author_id_fkey" }),
            ));
        }

        store.next_post_id += 1;
        let id = store.next_post_id;
        store
            .posts
            .push((id, new_post.title, new_post.content, new_post.author_id));

        store
            .post(id)
            .ok_or_else(|| AppError::internal("Post vanished", json!({})))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, AppError> {
        Ok(self.store.lock().unwrap().post(id))
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Post>, AppError> {
        let store = self.store.lock().unwrap();
        Ok(store
            .posts
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .filter_map(|p| store.post(p.0))
            .collect())
    }

    async fn update(&self, id: i64, changes: PostChanges) -> Result<Option<Post>, AppError> {
        let mut store = self.store.lock().unwrap();
        store.check_title_unique(&changes.title, Some(id))?;

        let Some(post) = store.posts.iter_mut().find(|p| p.0 == id) else {
            return Ok(None);
        };
        post.1 = changes.title;
        post.2 = changes.content;

        Ok(store.post(id))
    }

    async fn delete(&self, id: i64, author_id: i64) -> Result<bool, AppError> {
        let mut store = self.store.lock().unwrap();
        let before = store.posts.len();
        store.posts.retain(|p| !(p.0 == id && p.3 == author_id));

        Ok(store.posts.len() < before)
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.store.lock().unwrap().posts.len() as i64)
    }
}

/// Builds state over fresh in-memory repositories with the cheapest bcrypt cost.
pub fn create_test_state() -> AppState {
    let store: Store = Arc::new(Mutex::new(MemoryStore::default()));

    AppState::new(
        Arc::new(MemoryUserRepository {
            store: store.clone(),
        }),
        Arc::new(MemoryPostRepository { store }),
        TEST_SECRET,
        3600,
        4,
    )
}

pub fn make_server() -> (TestServer, AppState) {
    let state = create_test_state();
    let server = TestServer::new(api_router(state.clone())).unwrap();
    (server, state)
}

/// Registers a user directly through the service and returns it with a
/// token for that user.
pub async fn create_user_with_token(state: &AppState, name: &str) -> (User, String) {
    let user = state
        .user_service
        .create_user(
            name.to_string(),
            format!("{name}@example.com"),
            TEST_PASSWORD.to_string(),
        )
        .await
        .unwrap();

    let token = state.auth_service.issue_token(user.id).unwrap();
    (user, token)
}

pub async fn create_test_post(state: &AppState, author: &User, title: &str) -> Post {
    state
        .post_service
        .create_post(
            author.id,
            title.to_string(),
            format!("Content of {title}"),
            author.id,
        )
        .await
        .unwrap()
}
