//! BudgetLens web front end
//!
//! Server-rendered views over a remote budgeting API: token entry,
//! budget selection, and per-month category analysis. Request flow is
//! always session gate -> remote client -> summarizer -> HTML.

use axum::routing::{get, post};
use axum::Router;

pub mod error;
pub mod handlers;
pub mod render;
pub mod state;
pub mod users;

pub use state::AppState;

/// Build the application router.
///
/// Observability layers (trace, compression) are applied by the binary,
/// not here, so tests exercise the bare routes.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/login", get(handlers::login_form).post(handlers::login_submit))
        .route("/logout", post(handlers::logout))
        .route(
            "/accessToken",
            get(handlers::access_token_form).post(handlers::access_token_submit),
        )
        .route(
            "/analysis",
            get(handlers::budget_picker).post(handlers::select_budget),
        )
        .route("/analysis/:budget_id", get(handlers::budget_home))
        .route("/analysis/:budget_id/:month", get(handlers::month_view))
        .route("/profile", get(handlers::profile))
        .with_state(state)
}
