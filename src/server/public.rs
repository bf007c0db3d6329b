//! Public page handlers.

use crate::i18n::{Language, Locale};
use crate::models::{NewsArticle, Partner, Service};
use crate::public::{
    excerpt, format_date, ContactSubmission, PublicSite, SubmitError, SERVICE_EXCERPT_CHARS,
};
use crate::render::Renderer;
use crate::sections::{
    ABOUT_PILLARS, APPLICATIONS, MOTTO_KEYS, PERSONNEL_STANDARD, STATISTICS, TEAM_FEATURES,
};
use crate::server::{AppError, AppState};
use axum::{
    extract::{Path, State},
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    Extension, Form,
};
use serde_json::{json, Value};
use tracing::warn;

const NEWS_EXCERPT_CHARS: usize = 150;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContactFormState {
    Idle,
    Sent,
    Failed,
}

fn service_card(service: &Service) -> Value {
    json!({
        "id": service.id,
        "title": service.title,
        "excerpt": excerpt(&service.description, SERVICE_EXCERPT_CHARS),
        "glyph": service.icon().map(|icon| icon.glyph()),
    })
}

fn partner_card(site: &PublicSite, partner: &Partner) -> Value {
    json!({
        "name": partner.name,
        "description": partner.description,
        "logo_url": partner.logo_path.as_deref().map(|path| site.partner_logo_url(path)),
        "website": partner.website,
    })
}

fn article_card(article: &NewsArticle, language: Language) -> Value {
    json!({
        "id": article.id,
        "title": article.title,
        "cat": article.cat,
        "date": format_date(&article.created_at, language),
        "created_at": article.created_at.to_rfc3339(),
        "excerpt": excerpt(&article.content, NEWS_EXCERPT_CHARS),
    })
}

async fn render_home(
    state: &AppState,
    locale: Locale,
    form: &ContactSubmission,
    form_state: ContactFormState,
) -> Result<Html<String>, AppError> {
    let language = locale.language();
    let home = state.site.home().await;

    let services: Vec<Value> = home.services.items().iter().map(service_card).collect();
    let partners: Vec<Value> = home
        .partners
        .items()
        .iter()
        .map(|partner| partner_card(&state.site, partner))
        .collect();
    let statistics: Vec<Value> = STATISTICS
        .iter()
        .map(|stat| {
            json!({
                "value": stat.value,
                "suffix": stat.suffix,
                "label": stat.label.get(language),
                "description": stat.description.get(language),
            })
        })
        .collect();
    let team_features: Vec<Value> = TEAM_FEATURES
        .iter()
        .map(|feature| {
            json!({
                "title": feature.title.get(language),
                "description": feature.description.get(language),
            })
        })
        .collect();
    let applications: Vec<&str> = APPLICATIONS.iter().map(|a| a.get(language)).collect();
    let about_pillars: Vec<Value> = ABOUT_PILLARS
        .iter()
        .map(|(title_key, description_key)| {
            json!({"title_key": title_key, "description_key": description_key})
        })
        .collect();

    let mut context = Renderer::base_context(locale, "/");
    context.insert("services", &services);
    context.insert("partners", &partners);
    context.insert("statistics", &statistics);
    context.insert("team_features", &team_features);
    context.insert("applications", &applications);
    context.insert("about_pillars", &about_pillars);
    context.insert("motto_keys", &MOTTO_KEYS);
    context.insert("personnel_standard", PERSONNEL_STANDARD);
    context.insert("contact", &home.contact);
    context.insert("contact_image_url", &home.contact_image_url);
    context.insert("form", form);
    context.insert("form_success", &(form_state == ContactFormState::Sent));
    context.insert("form_error", &(form_state == ContactFormState::Failed));

    Ok(Html(state.renderer.render("home.html", &context)?))
}

pub async fn home(
    State(state): State<AppState>,
    Extension(locale): Extension<Locale>,
) -> Result<Html<String>, AppError> {
    render_home(&state, locale, &ContactSubmission::default(), ContactFormState::Idle).await
}

/// Success re-renders an empty form with a thank-you notice; failure keeps
/// what the visitor typed and shows an alert.
pub async fn submit_contact(
    State(state): State<AppState>,
    Extension(locale): Extension<Locale>,
    Form(submission): Form<ContactSubmission>,
) -> Result<Html<String>, AppError> {
    match state.site.submit_contact(&submission).await {
        Ok(_) => {
            render_home(
                &state,
                locale,
                &ContactSubmission::default(),
                ContactFormState::Sent,
            )
            .await
        }
        Err(e) => {
            if let SubmitError::MissingField(_) = e {
                warn!("Rejected contact message: {}", e);
            }
            render_home(&state, locale, &submission, ContactFormState::Failed).await
        }
    }
}

pub async fn news_list(
    State(state): State<AppState>,
    Extension(locale): Extension<Locale>,
) -> Result<Html<String>, AppError> {
    let articles: Vec<Value> = state
        .site
        .news()
        .await
        .items()
        .iter()
        .map(|article| article_card(article, locale.language()))
        .collect();

    let mut context = Renderer::base_context(locale, "/news");
    context.insert("articles", &articles);
    Ok(Html(state.renderer.render("news.html", &context)?))
}

pub async fn news_detail(
    State(state): State<AppState>,
    Extension(locale): Extension<Locale>,
    uri: Uri,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let Some(detail) = state.site.news_detail(&id).await else {
        return render_not_found(
            &state,
            locale,
            uri.path(),
            ("news.notFound", None),
            ("/news", "news.backToNews"),
        );
    };

    let language = locale.language();
    let related: Vec<Value> = detail
        .related
        .iter()
        .map(|article| article_card(article, language))
        .collect();

    let mut context = Renderer::base_context(locale, uri.path());
    context.insert("article", &article_card(&detail.article, language));
    context.insert("paragraphs", &detail.paragraphs);
    context.insert("document", &detail.document);
    context.insert("related", &related);
    Ok(Html(state.renderer.render("news_detail.html", &context)?).into_response())
}

pub async fn service_detail(
    State(state): State<AppState>,
    Extension(locale): Extension<Locale>,
    uri: Uri,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let Some(detail) = state.site.service_detail(&id).await else {
        return render_not_found(
            &state,
            locale,
            uri.path(),
            ("service.notFound", None),
            ("/#services", "service.backToServices"),
        );
    };

    let service = json!({
        "title": detail.service.title,
        "description": detail.service.description,
        "glyph": detail.service.icon().map(|icon| icon.glyph()),
    });

    let mut context = Renderer::base_context(locale, uri.path());
    context.insert("service", &service);
    context.insert("documents", &detail.documents);
    Ok(Html(state.renderer.render("service_detail.html", &context)?).into_response())
}

pub async fn health() -> &'static str {
    "OK"
}

pub async fn not_found(
    State(state): State<AppState>,
    Extension(locale): Extension<Locale>,
    uri: Uri,
) -> Result<Response, AppError> {
    render_not_found(
        &state,
        locale,
        uri.path(),
        ("notFound.title", Some("notFound.description")),
        ("/", "notFound.home"),
    )
}

/// Not-found view as `(title key, description key)` and `(back link, label key)`.
fn render_not_found(
    state: &AppState,
    locale: Locale,
    path: &str,
    (title_key, description_key): (&str, Option<&str>),
    (back_href, back_key): (&str, &str),
) -> Result<Response, AppError> {
    let mut context = Renderer::base_context(locale, path);
    context.insert("title_key", title_key);
    context.insert("description_key", &description_key);
    context.insert("back_href", back_href);
    context.insert("back_key", back_key);

    let html = state.renderer.render("not_found.html", &context)?;
    Ok((StatusCode::NOT_FOUND, Html(html)).into_response())
}
