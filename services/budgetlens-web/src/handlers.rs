//! Route handlers
//!
//! Each handler follows the same sequence: load the session, run the
//! gate, call the remote client if needed, summarize, render. Redirects
//! from the gate are ordinary values (`Gate::Redirect`), matched and
//! returned early. Form input is parsed into optional strings and
//! validated explicitly; a missing required field re-renders the form
//! with a 400, never a redirect.

use axum::extract::{Path, Query, State};
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::{AppendHeaders, Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;

use budgetlens_analysis::summarize;
use budgetlens_session::{
    require_access_token, require_user, safe_redirect, Denial, Gate, Session,
};
use budgetlens_ynab::MonthRef;

use crate::error::AppError;
use crate::render;
use crate::state::AppState;

/// Query parameters carried by credential-collection forms
#[derive(Debug, Deserialize)]
pub struct RedirectQuery {
    #[serde(rename = "redirectTo")]
    redirect_to: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    email: Option<String>,
    remember: Option<String>,
    #[serde(rename = "redirectTo")]
    redirect_to: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AccessTokenForm {
    #[serde(rename = "accessToken")]
    access_token: Option<String>,
    #[serde(rename = "redirectTo")]
    redirect_to: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SelectBudgetForm {
    budget: Option<String>,
    #[serde(rename = "redirectTo")]
    redirect_to: Option<String>,
}

/// Turn a gate denial into a redirect response, clearing the session
/// cookie when the denial demands it.
fn deny(state: &AppState, denial: Denial) -> Response {
    let redirect = Redirect::to(&denial.location);
    if denial.clear_session {
        (
            AppendHeaders([(SET_COOKIE, state.sessions.destroy())]),
            redirect,
        )
            .into_response()
    } else {
        redirect.into_response()
    }
}

/// Commit a session mutation and redirect.
fn commit_and_redirect(
    state: &AppState,
    session: &Session,
    ttl: Option<std::time::Duration>,
    to: &str,
) -> Response {
    let cookie = state.sessions.commit(session, ttl);
    (AppendHeaders([(SET_COOKIE, cookie)]), Redirect::to(to)).into_response()
}

/// A required form field: present and non-blank after trimming.
fn require_field(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// GET / - session status and entry points
pub async fn home(State(state): State<AppState>, headers: HeaderMap) -> Html<String> {
    let session = state.sessions.load(&headers);
    let user = match &session.user_id {
        Some(id) => state.users.user_by_id(id).await,
        None => None,
    };
    Html(render::home_page(
        user.as_ref().map(|u| u.email.as_str()),
        session.access_token.is_some(),
        session.budget_id.as_deref(),
    ))
}

/// GET /login
pub async fn login_form(Query(query): Query<RedirectQuery>) -> Html<String> {
    Html(render::login_page(query.redirect_to.as_deref(), None))
}

/// POST /login
pub async fn login_submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<LoginForm>,
) -> Response {
    let redirect_to = form.redirect_to.as_deref();
    let Some(email) = require_field(form.email) else {
        let body = render::login_page(redirect_to, Some("Please enter an email address"));
        return (StatusCode::BAD_REQUEST, Html(body)).into_response();
    };

    let Some(user) = state.users.user_by_email(email.trim()).await else {
        let body = render::login_page(redirect_to, Some("No account found for that email"));
        return (StatusCode::BAD_REQUEST, Html(body)).into_response();
    };

    let session = state.sessions.load(&headers).with_user_id(user.id);
    let ttl = form
        .remember
        .is_some()
        .then(|| state.sessions.remember_ttl());
    let to = safe_redirect(redirect_to, "/");
    commit_and_redirect(&state, &session, ttl, &to)
}

/// POST /logout - destroy the session and go home
pub async fn logout(State(state): State<AppState>) -> Response {
    tracing::debug!("destroying session");
    (
        AppendHeaders([(SET_COOKIE, state.sessions.destroy())]),
        Redirect::to("/"),
    )
        .into_response()
}

/// GET /accessToken
pub async fn access_token_form(Query(query): Query<RedirectQuery>) -> Html<String> {
    Html(render::access_token_page(query.redirect_to.as_deref(), None))
}

/// POST /accessToken
pub async fn access_token_submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<AccessTokenForm>,
) -> Response {
    let redirect_to = form.redirect_to.as_deref();
    let Some(token) = require_field(form.access_token) else {
        let body = render::access_token_page(redirect_to, Some("Please enter an access token"));
        return (StatusCode::BAD_REQUEST, Html(body)).into_response();
    };

    let session = state.sessions.load(&headers).with_access_token(token);
    let to = safe_redirect(redirect_to, "/analysis");
    commit_and_redirect(&state, &session, Some(state.sessions.remember_ttl()), &to)
}

/// GET /analysis - budget picker
pub async fn budget_picker(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let session = state.sessions.load(&headers);
    let token = match require_access_token(&session, uri.path()) {
        Gate::Proceed(token) => token,
        Gate::Redirect(denial) => return Ok(deny(&state, denial)),
    };

    let budgets = state.client.list_budgets(&token).await?;
    Ok(Html(render::budget_picker_page(&budgets, None)).into_response())
}

/// POST /analysis - select a budget
pub async fn select_budget(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<SelectBudgetForm>,
) -> Response {
    let Some(budget_id) = require_field(form.budget) else {
        let body = render::budget_picker_page(&[], Some("Budget id must be specified"));
        return (StatusCode::BAD_REQUEST, Html(body)).into_response();
    };

    let session = state.sessions.load(&headers).with_budget_id(budget_id.as_str());
    let default = format!("/analysis/{budget_id}");
    let to = safe_redirect(form.redirect_to.as_deref(), &default);
    commit_and_redirect(&state, &session, Some(state.sessions.remember_ttl()), &to)
}

/// GET /analysis/:budgetId - no month segment means the current month
pub async fn budget_home(
    State(state): State<AppState>,
    Path(budget_id): Path<String>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let session = state.sessions.load(&headers);
    match require_access_token(&session, uri.path()) {
        Gate::Proceed(_) => Redirect::to(&format!("/analysis/{budget_id}/current")).into_response(),
        Gate::Redirect(denial) => deny(&state, denial),
    }
}

/// GET /analysis/:budgetId/:month - month summary table
pub async fn month_view(
    State(state): State<AppState>,
    Path((budget_id, month)): Path<(String, String)>,
    uri: Uri,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let session = state.sessions.load(&headers);
    let token = match require_access_token(&session, uri.path()) {
        Gate::Proceed(token) => token,
        Gate::Redirect(denial) => return Ok(deny(&state, denial)),
    };

    let month_ref = MonthRef::parse(&month)?;
    let detail = state
        .client
        .month_detail(&token, &budget_id, &month_ref)
        .await?;
    let rows = summarize(&detail.categories);
    Ok(Html(render::month_page(&budget_id, &month, &detail, &rows)).into_response())
}

/// GET /profile - identity first, then token
pub async fn profile(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let session = state.sessions.load(&headers);

    let user = match require_user(&session, uri.path(), state.users.as_ref()).await {
        Gate::Proceed(user) => user,
        Gate::Redirect(denial) => return deny(&state, denial),
    };
    let token = match require_access_token(&session, uri.path()) {
        Gate::Proceed(token) => token,
        Gate::Redirect(denial) => return deny(&state, denial),
    };

    Html(render::profile_page(
        &user,
        session.budget_id.as_deref(),
        &token,
    ))
    .into_response()
}
