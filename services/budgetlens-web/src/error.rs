//! Service error boundary
//!
//! Upstream failures are not retried or classified beyond what the
//! client already did; they land here and become an error page.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;

use budgetlens_ynab::YnabError;

use crate::render;

/// Request-level errors that escape a handler
#[derive(Debug, Error)]
pub enum AppError {
    /// The remote budgeting API failed
    #[error(transparent)]
    Upstream(#[from] YnabError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Upstream(YnabError::InvalidMonth(segment)) => {
                let body = render::error_page(
                    "Not found",
                    &format!("\"{segment}\" is not a month. Try \"current\" or YYYY-MM."),
                );
                (StatusCode::NOT_FOUND, Html(body)).into_response()
            }
            AppError::Upstream(err) => {
                tracing::error!(%err, "remote budgeting API call failed");
                let body = render::error_page(
                    "Budgeting service error",
                    "The budgeting service could not be reached or rejected the request. \
                     Check your access token and try again.",
                );
                (StatusCode::BAD_GATEWAY, Html(body)).into_response()
            }
        }
    }
}
