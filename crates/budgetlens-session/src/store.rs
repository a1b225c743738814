//! Session store
//!
//! Reads and writes the signed session cookie. Side effects are confined
//! to header construction; there is no network or disk I/O here.

use std::time::Duration;

use http::header::COOKIE;
use http::HeaderMap;

use crate::codec;
use crate::config::SessionConfig;
use crate::error::SessionResult;
use crate::types::Session;

/// Signed-cookie session store.
///
/// Cheap to clone; holds only configuration.
#[derive(Debug, Clone)]
pub struct SessionStore {
    config: SessionConfig,
}

impl SessionStore {
    /// Create a store, validating the configuration eagerly.
    pub fn new(config: SessionConfig) -> SessionResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The Max-Age applied to "remember me" commits.
    pub fn remember_ttl(&self) -> Duration {
        self.config.remember_ttl
    }

    /// Decode the session from request headers.
    ///
    /// Never fails: a missing, malformed, or badly signed cookie loads as
    /// an empty session.
    pub fn load(&self, headers: &HeaderMap) -> Session {
        let Some(value) = self.cookie_value(headers) else {
            return Session::default();
        };
        let Some(payload) = codec::open(self.config.secret.as_bytes(), &value) else {
            tracing::debug!("session cookie failed verification, starting empty");
            return Session::default();
        };
        match serde_json::from_slice(&payload) {
            Ok(session) => session,
            Err(err) => {
                tracing::debug!(%err, "session payload did not parse, starting empty");
                Session::default()
            }
        }
    }

    /// Re-serialize and re-sign the whole session, returning a
    /// `Set-Cookie` header value. `Some(ttl)` yields a persistent cookie,
    /// `None` a browser-session cookie.
    pub fn commit(&self, session: &Session, ttl: Option<Duration>) -> String {
        // Session serialization cannot fail: every field is a string
        let payload = serde_json::to_vec(session).expect("session payload");
        let value = codec::seal(self.config.secret.as_bytes(), &payload);

        let mut header = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            self.config.cookie_name, value
        );
        if self.config.secure {
            header.push_str("; Secure");
        }
        if let Some(ttl) = ttl {
            header.push_str(&format!("; Max-Age={}", ttl.as_secs()));
        }
        header
    }

    /// Return a `Set-Cookie` header value that clears the cookie.
    pub fn destroy(&self) -> String {
        let mut header = format!(
            "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
            self.config.cookie_name
        );
        if self.config.secure {
            header.push_str("; Secure");
        }
        header
    }

    /// Extract the raw cookie value from the request's `Cookie` headers.
    fn cookie_value(&self, headers: &HeaderMap) -> Option<String> {
        for header in headers.get_all(COOKIE) {
            let Ok(cookies) = header.to_str() else {
                continue;
            };
            for cookie in cookies.split(';') {
                if let Some((name, value)) = cookie.trim().split_once('=') {
                    if name == self.config.cookie_name {
                        return Some(value.to_string());
                    }
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SessionStore {
        SessionStore::new(SessionConfig::new("a".repeat(32))).unwrap()
    }

    fn headers_with_cookie(set_cookie: &str) -> HeaderMap {
        // Reuse only the name=value part of a Set-Cookie header
        let pair = set_cookie.split(';').next().unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, pair.parse().unwrap());
        headers
    }

    #[test]
    fn test_no_cookie_loads_empty() {
        assert!(store().load(&HeaderMap::new()).is_empty());
    }

    #[test]
    fn test_commit_then_load_round_trip() {
        let store = store();
        let session = Session::default().with_access_token("tok-1");

        let header = store.commit(&session, None);
        let loaded = store.load(&headers_with_cookie(&header));

        assert_eq!(loaded.access_token.as_deref(), Some("tok-1"));
        assert_eq!(loaded.user_id, None);
    }

    #[test]
    fn test_tampered_cookie_loads_empty() {
        let store = store();
        let header = store.commit(&Session::default().with_user_id("u-1"), None);
        let pair = header.split(';').next().unwrap();
        let mut forged = pair.to_string();
        forged.push('x');

        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, forged.parse().unwrap());
        assert!(store.load(&headers).is_empty());
    }

    #[test]
    fn test_commit_ttl_controls_max_age() {
        let store = store();
        let session = Session::default().with_user_id("u-1");

        let persistent = store.commit(&session, Some(Duration::from_secs(604800)));
        assert!(persistent.contains("Max-Age=604800"));

        let ephemeral = store.commit(&session, None);
        assert!(!ephemeral.contains("Max-Age"));
    }

    #[test]
    fn test_cookie_attributes() {
        let header = store().commit(&Session::default(), None);
        assert!(header.starts_with("__session="));
        assert!(header.contains("Path=/"));
        assert!(header.contains("HttpOnly"));
        assert!(header.contains("SameSite=Lax"));
        assert!(!header.contains("Secure"));
    }

    #[test]
    fn test_secure_attribute_in_production() {
        let mut config = SessionConfig::new("a".repeat(32));
        config.secure = true;
        let store = SessionStore::new(config).unwrap();
        assert!(store.commit(&Session::default(), None).contains("; Secure"));
        assert!(store.destroy().contains("; Secure"));
    }

    #[test]
    fn test_destroy_clears_immediately() {
        let header = store().destroy();
        assert!(header.starts_with("__session=;"));
        assert!(header.contains("Max-Age=0"));
    }

    #[test]
    fn test_load_picks_session_cookie_among_others() {
        let store = store();
        let committed = store.commit(&Session::default().with_budget_id("b-1"), None);
        let pair = committed.split(';').next().unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            format!("theme=dark; {pair}; lang=en").parse().unwrap(),
        );
        assert_eq!(store.load(&headers).budget_id.as_deref(), Some("b-1"));
    }
}
