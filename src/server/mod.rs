//! HTTP server: public pages, admin console and sign-in.
//!
//! Every handler owns its backend calls. When a client disconnects axum drops
//! the handler future, which drops any request still in flight, so a late
//! response never reaches a finished page.

mod admin;
mod forms;
mod middleware;
mod public;

use crate::auth::AuthGate;
use crate::backend::{AuthBackend, ContentBackend, SupabaseBackend};
use crate::config::Config;
use crate::content::ContentClient;
use crate::public::PublicSite;
use crate::render::Renderer;
use anyhow::{Context as _, Result};
use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    middleware::from_fn_with_state,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

pub use middleware::{locale_layer, require_session};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub content: ContentClient,
    pub site: PublicSite,
    pub auth: AuthGate,
    pub renderer: Arc<Renderer>,
    pub secure_cookies: bool,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(
        content: Arc<dyn ContentBackend>,
        auth: Arc<dyn AuthBackend>,
        secure_cookies: bool,
        max_upload_bytes: usize,
    ) -> Result<Self> {
        let content = ContentClient::new(content);
        Ok(Self {
            site: PublicSite::new(content.clone()),
            content,
            auth: AuthGate::new(auth),
            renderer: Arc::new(Renderer::new()?),
            secure_cookies,
            max_upload_bytes,
        })
    }
}

/// Internal failure while producing a page.
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("Request failed: {:#}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html("<h1>Internal Server Error</h1>"),
        )
            .into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

pub fn router(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route("/admin", get(admin::index))
        .route("/admin/contact", post(admin::save_contact))
        .route("/admin/news", post(admin::create_news))
        .route("/admin/news/new", get(admin::new_news))
        .route("/admin/news/:id", post(admin::update_news))
        .route("/admin/news/:id/edit", get(admin::edit_news))
        .route(
            "/admin/news/:id/delete",
            get(admin::confirm_delete_news).post(admin::delete_news),
        )
        .route("/admin/services", post(admin::create_service))
        .route("/admin/services/new", get(admin::new_service))
        .route("/admin/services/:id", post(admin::update_service))
        .route("/admin/services/:id/edit", get(admin::edit_service))
        .route(
            "/admin/services/:id/delete",
            get(admin::confirm_delete_service).post(admin::delete_service),
        )
        .route("/admin/partners", post(admin::create_partner))
        .route("/admin/partners/new", get(admin::new_partner))
        .route("/admin/partners/:id", post(admin::update_partner))
        .route("/admin/partners/:id/edit", get(admin::edit_partner))
        .route(
            "/admin/partners/:id/delete",
            get(admin::confirm_delete_partner).post(admin::delete_partner),
        )
        .layer(DefaultBodyLimit::max(state.max_upload_bytes))
        .route_layer(from_fn_with_state(state.clone(), require_session));

    Router::new()
        .route("/", get(public::home))
        .route("/contact", post(public::submit_contact))
        .route("/news", get(public::news_list))
        .route("/news/:id", get(public::news_detail))
        .route("/service/:id", get(public::service_detail))
        .route("/health", get(public::health))
        .route("/login", get(admin::login_page).post(admin::login))
        .route("/logout", post(admin::logout))
        .merge(admin_routes)
        .fallback(public::not_found)
        .layer(from_fn_with_state(state.clone(), locale_layer))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the site against the hosted backend until the process is stopped.
pub async fn serve(config: &Config) -> Result<()> {
    let backend = Arc::new(SupabaseBackend::from_config(config));
    let state = AppState::new(
        backend.clone(),
        backend,
        config.secure_cookies,
        config.max_upload_bytes,
    )?;

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .with_context(|| format!("Failed to bind port {}", config.port))?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .await
        .context("Server error")
}
