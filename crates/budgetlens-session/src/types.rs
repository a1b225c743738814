//! Session data types and the user-lookup seam

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Cookie-carried session record.
///
/// All three fields are independently optional. An absent access token
/// gates off every budget view; an absent user id gates off every
/// user-scoped view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque user identifier
    #[serde(rename = "userId", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    /// Bearer credential for the remote budgeting API
    #[serde(rename = "accessToken", skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    /// Currently selected budget
    #[serde(rename = "budgetId", skip_serializing_if = "Option::is_none")]
    pub budget_id: Option<String>,
}

impl Session {
    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        self.user_id.is_none() && self.access_token.is_none() && self.budget_id.is_none()
    }

    /// Return a copy with the user id replaced
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Return a copy with the access token replaced
    pub fn with_access_token(mut self, access_token: impl Into<String>) -> Self {
        self.access_token = Some(access_token.into());
        self
    }

    /// Return a copy with the selected budget replaced
    pub fn with_budget_id(mut self, budget_id: impl Into<String>) -> Self {
        self.budget_id = Some(budget_id.into());
        self
    }
}

/// A user account record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Stable identifier (what the session stores)
    pub id: String,
    /// Login email
    pub email: String,
}

/// User lookup collaborator for [`crate::require_user`].
///
/// A lookup that cannot resolve an id returns `None`; the gate treats
/// that as stale identity and forces a logout.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Resolve a user by id
    async fn user_by_id(&self, id: &str) -> Option<User>;

    /// Resolve a user by login email
    async fn user_by_email(&self, email: &str) -> Option<User>;
}
