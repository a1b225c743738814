//! Session configuration
//!
//! The signing secret is process-wide, loaded once at startup, and
//! validated eagerly: a missing or weak secret refuses to boot rather
//! than failing on the first request.

use std::time::Duration;

use crate::error::{SessionError, SessionResult};

/// Minimum signing secret length in bytes (256 bits)
pub const MIN_SECRET_LEN: usize = 32;

/// Session cookie configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Cookie name
    pub cookie_name: String,
    /// HMAC signing secret
    pub secret: String,
    /// Emit the `Secure` attribute (set in production)
    pub secure: bool,
    /// Max-Age used for "remember me" commits
    pub remember_ttl: Duration,
}

impl SessionConfig {
    /// Build a configuration with the given secret and library defaults
    /// for everything else.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            cookie_name: "__session".to_string(),
            secret: secret.into(),
            secure: false,
            remember_ttl: Duration::from_secs(7 * 24 * 60 * 60),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> SessionResult<()> {
        if self.secret.is_empty() {
            return Err(SessionError::MissingSecret);
        }
        if self.secret.len() < MIN_SECRET_LEN {
            return Err(SessionError::WeakSecret {
                min: MIN_SECRET_LEN,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_empty_secret() {
        let config = SessionConfig::new("");
        assert!(matches!(
            config.validate(),
            Err(SessionError::MissingSecret)
        ));
    }

    #[test]
    fn test_validate_rejects_short_secret() {
        let config = SessionConfig::new("too-short");
        assert!(matches!(
            config.validate(),
            Err(SessionError::WeakSecret { .. })
        ));
    }

    #[test]
    fn test_validate_accepts_long_secret() {
        let config = SessionConfig::new("a".repeat(MIN_SECRET_LEN));
        assert!(config.validate().is_ok());
    }
}
