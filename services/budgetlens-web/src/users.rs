//! In-memory user store
//!
//! The user table lives outside this system's scope, so the service
//! ships a process-local store behind the [`UserStore`] seam. Accounts
//! are seeded at startup (see `--demo-user`); there is no sign-up flow.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use budgetlens_session::{User, UserStore};

/// Process-local user store.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an account and return it.
    pub async fn insert(&self, email: &str) -> User {
        let user = User {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
        };
        self.users
            .write()
            .await
            .insert(user.id.clone(), user.clone());
        user
    }

    /// Remove an account by id. Returns whether it existed.
    pub async fn remove(&self, id: &str) -> bool {
        self.users.write().await.remove(id).is_some()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn user_by_id(&self, id: &str) -> Option<User> {
        self.users.read().await.get(id).cloned()
    }

    async fn user_by_email(&self, email: &str) -> Option<User> {
        self.users
            .read()
            .await
            .values()
            .find(|user| user.email == email)
            .cloned()
    }
}
