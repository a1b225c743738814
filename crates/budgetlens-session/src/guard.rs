//! Authorization gate
//!
//! Guard operations over a loaded [`Session`]. Each returns a [`Gate`]:
//! either the value the route needs, or a [`Denial`] telling the caller
//! where to send the browser instead. Redirects are ordinary values here,
//! not errors or panics; handlers pattern-match and short-circuit.

use crate::types::{Session, User, UserStore};

/// Outcome of a guard operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gate<T> {
    /// The request may proceed with the extracted value
    Proceed(T),
    /// The request must be redirected
    Redirect(Denial),
}

/// A redirect issued by a guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Denial {
    /// Where to send the browser
    pub location: String,
    /// Also emit a session-clearing cookie (forced logout)
    pub clear_session: bool,
}

impl Denial {
    /// Plain redirect, session untouched
    pub fn to(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            clear_session: false,
        }
    }

    /// Forced logout: clear the session and go home
    pub fn logout() -> Self {
        Self {
            location: "/".to_string(),
            clear_session: true,
        }
    }
}

/// Require a user id in the session.
///
/// Absent id redirects to the login form, carrying the current path so
/// the user comes back after signing in.
pub fn require_user_id(session: &Session, current_path: &str) -> Gate<String> {
    match &session.user_id {
        Some(user_id) => Gate::Proceed(user_id.clone()),
        None => Gate::Redirect(Denial::to(redirect_with_return("/login", current_path))),
    }
}

/// Require a remote-API access token in the session.
///
/// Absent token redirects to the token entry form.
pub fn require_access_token(session: &Session, current_path: &str) -> Gate<String> {
    match &session.access_token {
        Some(token) => Gate::Proceed(token.clone()),
        None => Gate::Redirect(Denial::to(redirect_with_return(
            "/accessToken",
            current_path,
        ))),
    }
}

/// Require a user id that still resolves to a real account.
///
/// A missing id is ordinary unauthenticated flow (login redirect). An id
/// with no backing record means the session is stale, which forces a
/// full logout instead.
pub async fn require_user(
    session: &Session,
    current_path: &str,
    users: &dyn UserStore,
) -> Gate<User> {
    let user_id = match require_user_id(session, current_path) {
        Gate::Proceed(user_id) => user_id,
        Gate::Redirect(denial) => return Gate::Redirect(denial),
    };

    match users.user_by_id(&user_id).await {
        Some(user) => Gate::Proceed(user),
        None => {
            tracing::info!(%user_id, "session references unknown user, forcing logout");
            Gate::Redirect(Denial::logout())
        }
    }
}

/// Validate a caller-supplied redirect target.
///
/// Only relative same-origin paths pass: the target must start with `/`
/// and must not be protocol-relative (`//`). Anything else is replaced
/// with `default`, silently; an open-redirect attempt is normalized, not
/// reported.
pub fn safe_redirect(candidate: Option<&str>, default: &str) -> String {
    match candidate {
        Some(to) if to.starts_with('/') && !to.starts_with("//") => to.to_string(),
        _ => default.to_string(),
    }
}

fn redirect_with_return(path: &str, current_path: &str) -> String {
    format!("{path}?redirectTo={}", urlencoding::encode(current_path))
}
