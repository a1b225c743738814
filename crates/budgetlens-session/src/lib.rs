//! Session layer for BudgetLens
//!
//! Everything a request needs to know about who it belongs to lives in a
//! single signed cookie: user id, remote-API access token, and the
//! currently selected budget. There is no server-side session storage;
//! the cookie is the whole record.
//!
//! Two pieces:
//! - [`SessionStore`]: decodes, re-signs, and clears the cookie. Loading
//!   never fails; a missing or tampered cookie is just an empty session.
//! - The authorization gate ([`require_user_id`], [`require_access_token`],
//!   [`require_user`]): guard operations returning [`Gate`], an explicit
//!   continue-or-redirect result that callers pattern-match on.

pub mod codec;
pub mod config;
pub mod error;
pub mod guard;
pub mod store;
pub mod types;

pub use config::SessionConfig;
pub use error::{SessionError, SessionResult};
pub use guard::{require_access_token, require_user, require_user_id, safe_redirect, Denial, Gate};
pub use store::SessionStore;
pub use types::{Session, User, UserStore};
