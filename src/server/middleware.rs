//! Request middleware: visitor language and the admin session check.

use crate::auth::{lang_cookie, read_cookie, LANG_COOKIE, SESSION_COOKIE};
use crate::i18n::{Language, LocaleHolder};
use crate::server::AppState;
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::{debug, warn};

/// `lang` value from the query string, if any.
fn requested_language(request: &Request) -> Option<Language> {
    request
        .uri()
        .query()?
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "lang")
        .and_then(|(_, code)| Language::from_code(code).ok())
}

/// Resolve the visitor's language for this request.
///
/// The `lang` cookie carries the choice across requests; `?lang=` switches
/// it. Unknown codes are ignored. Handlers read the result as an
/// `Extension<Locale>`.
pub async fn locale_layer(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let stored = read_cookie(request.headers(), LANG_COOKIE)
        .and_then(|code| Language::from_code(code).ok())
        .unwrap_or_default();

    let holder = LocaleHolder::new(stored);
    let mut reader = holder.subscribe();
    if let Some(language) = requested_language(&request) {
        holder.set(language);
    }

    let changed = reader.has_changed();
    let locale = reader.snapshot();
    if changed {
        debug!("Switched language to {}", locale.code());
    }

    request.extensions_mut().insert(locale);
    let mut response = next.run(request).await;

    if changed {
        let cookie = lang_cookie(locale.code(), state.secure_cookies);
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(e) => warn!("Could not set language cookie: {}", e),
        }
    }
    response
}

/// Admit requests with a valid admin session; send everyone else to `/login`.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let session = match read_cookie(request.headers(), SESSION_COOKIE) {
        Some(token) => state.auth.verify(token).await,
        None => None,
    };

    match session {
        Some(session) => {
            request.extensions_mut().insert(session);
            next.run(request).await
        }
        None => {
            let requested = request
                .uri()
                .path_and_query()
                .map(|pq| pq.as_str())
                .unwrap_or_else(|| request.uri().path());
            let target = format!("/login?next={}", urlencoding::encode(requested));
            Redirect::to(&target).into_response()
        }
    }
}
