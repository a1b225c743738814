//! Application state

use std::sync::Arc;

use budgetlens_session::{SessionStore, UserStore};
use budgetlens_ynab::BudgetClient;

/// Shared state handed to every handler.
///
/// Everything here is immutable after startup; per-request state lives
/// in the session cookie.
#[derive(Clone)]
pub struct AppState {
    /// Signed-cookie session store
    pub sessions: SessionStore,
    /// Remote budgeting API client
    pub client: BudgetClient,
    /// User account lookup
    pub users: Arc<dyn UserStore>,
}
