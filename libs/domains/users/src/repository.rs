use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::UserResult;
use crate::models::{NewUser, User};

/// Repository trait for User persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Return the user with `input.email`, creating it first if none exists.
    ///
    /// An existing user is returned untouched.
    async fn upsert_by_email(&self, input: NewUser) -> UserResult<User>;

    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>>;
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn upsert_by_email(&self, input: NewUser) -> UserResult<User> {
        let mut users = self.users.write().await;
        let user = users
            .entry(input.email.clone())
            .or_insert_with(|| {
                let user = User::new(input);
                tracing::info!(user_id = %user.id, email = %user.email, "Created user");
                user
            })
            .clone();
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        Ok(self.users.read().await.get(email).cloned())
    }
}
