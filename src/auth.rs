//! Admin sign-in and the session cookie.
//!
//! The hosted provider owns accounts and tokens. The site only keeps the
//! access token in an `HttpOnly` cookie and asks the provider who it belongs
//! to on every admin request.

use crate::backend::{AuthBackend, AuthUser, ContentError, Session};
use axum::http::{header, HeaderMap};
use std::sync::Arc;
use tracing::{error, info, warn};

pub const SESSION_COOKIE: &str = "admin_session";
pub const LANG_COOKIE: &str = "lang";

/// A verified admin session, attached to admin requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSession {
    pub access_token: String,
    pub user: AuthUser,
}

/// Value of cookie `name` from the request headers.
pub fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

fn with_secure(cookie: String, secure: bool) -> String {
    if secure {
        format!("{}; Secure", cookie)
    } else {
        cookie
    }
}

pub fn session_cookie(access_token: &str, secure: bool) -> String {
    with_secure(
        format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, access_token),
        secure,
    )
}

pub fn clear_session_cookie(secure: bool) -> String {
    with_secure(
        format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", SESSION_COOKIE),
        secure,
    )
}

/// Session cookie (no expiry) remembering the visitor's language.
pub fn lang_cookie(code: &str, secure: bool) -> String {
    with_secure(format!("{}={}; Path=/; SameSite=Lax", LANG_COOKIE, code), secure)
}

#[derive(Clone)]
pub struct AuthGate {
    backend: Arc<dyn AuthBackend>,
}

impl AuthGate {
    pub fn new(backend: Arc<dyn AuthBackend>) -> Self {
        Self { backend }
    }

    /// `Ok(None)` for wrong credentials.
    pub async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<Session>, ContentError> {
        let session = self.backend.sign_in(email.trim(), password).await?;
        match &session {
            Some(session) => info!("Admin signed in: {}", session.user.id),
            None => warn!("Rejected admin sign-in"),
        }
        Ok(session)
    }

    /// The session behind `access_token`, or `None` when it is invalid or the
    /// provider cannot be reached.
    pub async fn verify(&self, access_token: &str) -> Option<AdminSession> {
        match self.backend.user(access_token).await {
            Ok(Some(user)) => Some(AdminSession {
                access_token: access_token.to_string(),
                user,
            }),
            Ok(None) => None,
            Err(e) => {
                error!("Session check failed: {}", e);
                None
            }
        }
    }

    /// Best effort; the cookie is cleared either way.
    pub async fn sign_out(&self, access_token: &str) {
        if let Err(e) = self.backend.sign_out(access_token).await {
            warn!("Sign-out failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use axum::http::HeaderValue;

    fn headers(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    // ==================== Cookie Tests ====================

    #[test]
    fn test_read_cookie() {
        let headers = headers("lang=mn; admin_session=abc123; other=x");
        assert_eq!(read_cookie(&headers, LANG_COOKIE), Some("mn"));
        assert_eq!(read_cookie(&headers, SESSION_COOKIE), Some("abc123"));
        assert_eq!(read_cookie(&headers, "missing"), None);
    }

    #[test]
    fn test_read_cookie_ignores_empty_and_prefix_matches() {
        let headers = headers("admin_session=; xlang=mn");
        assert_eq!(read_cookie(&headers, SESSION_COOKIE), None);
        assert_eq!(read_cookie(&headers, LANG_COOKIE), None);
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("tok", false);
        assert!(cookie.starts_with("admin_session=tok;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(!cookie.contains("Secure"));
        assert!(session_cookie("tok", true).ends_with("; Secure"));
        assert!(clear_session_cookie(false).contains("Max-Age=0"));
    }

    #[test]
    fn test_lang_cookie_has_no_expiry() {
        let cookie = lang_cookie("mn", false);
        assert_eq!(cookie, "lang=mn; Path=/; SameSite=Lax");
    }

    // ==================== Gate Tests ====================

    #[tokio::test]
    async fn test_sign_in_verify_sign_out() {
        let backend = MemoryBackend::new().with_admin("admin@armos.mn", "secret");
        let gate = AuthGate::new(Arc::new(backend));

        assert!(gate.sign_in("admin@armos.mn", "nope").await.unwrap().is_none());

        let session = gate
            .sign_in(" admin@armos.mn ", "secret")
            .await
            .unwrap()
            .unwrap();
        let verified = gate.verify(&session.access_token).await.unwrap();
        assert_eq!(verified.user.email.as_deref(), Some("admin@armos.mn"));

        gate.sign_out(&session.access_token).await;
        assert!(gate.verify(&session.access_token).await.is_none());
    }

    #[tokio::test]
    async fn test_unknown_token() {
        let gate = AuthGate::new(Arc::new(MemoryBackend::new()));
        assert!(gate.verify("forged").await.is_none());
    }
}
