//! Session error types
//!
//! The session layer has very few failure modes by design: loading a
//! cookie degrades to an empty session instead of erroring, so the only
//! real errors are configuration problems caught at startup.

use thiserror::Error;

/// Result type alias for session operations
pub type SessionResult<T> = Result<T, SessionError>;

/// Session error types
#[derive(Debug, Error)]
pub enum SessionError {
    /// No signing secret was provided
    #[error("session signing secret must be set (SESSION_SECRET)")]
    MissingSecret,

    /// The signing secret is too short to be safe
    #[error("session signing secret must be at least {min} bytes")]
    WeakSecret {
        /// Minimum accepted secret length in bytes
        min: usize,
    },
}
