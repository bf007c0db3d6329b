//! Admin console and sign-in handlers.
//!
//! Successful writes redirect back to the collection's tab. Failed writes
//! re-render the form with the submitted values and an alert.

use crate::admin::{
    AdminError, AdminTab, ContactForm, ContactManager, ContactsInbox, NewsForm, NewsManager,
    PartnerForm, PartnersManager, ServiceForm, ServicesManager,
};
use crate::auth::{clear_session_cookie, read_cookie, session_cookie, AdminSession, SESSION_COOKIE};
use crate::content::ContentClient;
use crate::i18n::Language;
use crate::models::{NewsArticle, Partner, Service, ServiceIcon};
use crate::public::format_date;
use crate::security::is_local_path;
use crate::server::forms::{contact_form, news_form, partner_form, service_form, FormData};
use crate::server::{AppError, AppState};
use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, HeaderMap},
    response::{Html, IntoResponse, Redirect, Response},
    Extension, Form,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tera::Context;
use tracing::{error, warn};

const CONTACT_SAVED: &str = "Contact information saved successfully!";

fn session_content(state: &AppState, session: &AdminSession) -> ContentClient {
    state.content.with_session(&session.access_token)
}

fn admin_date(date: &chrono::DateTime<chrono::Utc>) -> String {
    format_date(date, Language::ENGLISH)
}

/// Alert text for a failed save: validation messages as-is, anything else
/// as a generic message.
fn save_error(err: &AdminError, what: &str) -> String {
    match err {
        AdminError::MissingField(_) | AdminError::InvalidField { .. } => err.to_string(),
        AdminError::Content(_) | AdminError::NotFound => format!("Error saving {}", what),
    }
}

fn render(state: &AppState, template: &str, context: &Context) -> Result<Response, AppError> {
    Ok(Html(state.renderer.render(template, context)?).into_response())
}

fn tab_links(active: AdminTab) -> Vec<Value> {
    AdminTab::ALL
        .iter()
        .map(|t| json!({"name": t.as_str(), "label": t.label(), "active": *t == active}))
        .collect()
}

fn tab_redirect(tab: AdminTab) -> Response {
    Redirect::to(&format!("/admin?tab={}", tab.as_str())).into_response()
}

// ==================== Sign-in ====================

#[derive(Debug, Default, Deserialize)]
pub struct LoginQuery {
    next: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    email: String,
    password: String,
    next: String,
}

fn login_target(next: &str) -> &str {
    if is_local_path(next) && next.starts_with("/admin") {
        next
    } else {
        "/admin"
    }
}

fn render_login(
    state: &AppState,
    email: &str,
    next: &str,
    error: Option<&str>,
) -> Result<Response, AppError> {
    let mut context = Context::new();
    context.insert("email", email);
    context.insert("next", next);
    context.insert("error", &error);
    render(state, "login.html", &context)
}

pub async fn login_page(
    State(state): State<AppState>,
    Query(query): Query<LoginQuery>,
) -> Result<Response, AppError> {
    let next = query.next.unwrap_or_default();
    render_login(&state, "", &next, None)
}

pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    match state.auth.sign_in(&form.email, &form.password).await {
        Ok(Some(session)) => {
            let cookie = session_cookie(&session.access_token, state.secure_cookies);
            Ok((
                [(header::SET_COOKIE, cookie)],
                Redirect::to(login_target(&form.next)),
            )
                .into_response())
        }
        Ok(None) => render_login(
            &state,
            &form.email,
            &form.next,
            Some("Invalid email or password"),
        ),
        Err(e) => {
            error!("Sign-in failed: {}", e);
            render_login(
                &state,
                &form.email,
                &form.next,
                Some("Sign-in failed, please try again"),
            )
        }
    }
}

pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = read_cookie(&headers, SESSION_COOKIE) {
        state.auth.sign_out(token).await;
    }
    (
        [(header::SET_COOKIE, clear_session_cookie(state.secure_cookies))],
        Redirect::to("/"),
    )
        .into_response()
}

// ==================== Dashboard ====================

#[derive(Debug, Default, Deserialize)]
pub struct AdminQuery {
    tab: Option<String>,
    page: Option<String>,
    saved: Option<String>,
}

pub async fn index(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Query(query): Query<AdminQuery>,
) -> Result<Response, AppError> {
    let tab = AdminTab::from_query(query.tab.as_deref());
    let content = session_content(&state, &session);

    let mut context = Context::new();
    context.insert("tab", tab.as_str());
    context.insert("tabs", &tab_links(tab));
    context.insert("user_email", &session.user.email);
    let mut alert: Option<String> = None;
    let mut notice: Option<&str> = None;

    match tab {
        AdminTab::News => {
            let manager = NewsManager::new(content);
            let news: Vec<Value> = match manager.list().await {
                Ok(articles) => articles.iter().map(news_row).collect(),
                Err(_) => {
                    alert = Some("Error fetching news".to_string());
                    Vec::new()
                }
            };
            context.insert("news", &news);
        }
        AdminTab::Services => {
            let manager = ServicesManager::new(content);
            let services: Vec<Value> = match manager.list().await {
                Ok(services) => services.iter().map(service_row).collect(),
                Err(_) => {
                    alert = Some("Error fetching services".to_string());
                    Vec::new()
                }
            };
            context.insert("services", &services);
        }
        AdminTab::Partners => {
            let manager = PartnersManager::new(content);
            let partners: Vec<Value> = match manager.list().await {
                Ok(partners) => partners
                    .iter()
                    .map(|partner| partner_row(&manager, partner))
                    .collect(),
                Err(_) => {
                    alert = Some("Error fetching partners".to_string());
                    Vec::new()
                }
            };
            context.insert("partners", &partners);
        }
        AdminTab::Contact => {
            let page = query
                .page
                .as_deref()
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or(1);
            let manager = ContactManager::new(content.clone());
            let inbox = ContactsInbox::new(content);
            let (profile, messages) = futures::join!(manager.load(), inbox.page(page));

            let profile = profile.unwrap_or_else(|_| {
                alert = Some("Error fetching contact information".to_string());
                None
            });
            let form = profile.as_ref().map(ContactForm::from).unwrap_or_default();
            let image_url = profile
                .as_ref()
                .and_then(|p| p.image_path.as_deref())
                .map(|path| manager.image_url(path));
            context.insert("contact_form", &contact_form_view(&form, image_url));

            let inbox_view = match messages {
                Ok(page) => json!({
                    "messages": page.messages.iter().map(|m| json!({
                        "name": m.name,
                        "email": m.email,
                        "content": m.content,
                        "date": admin_date(&m.created_at),
                    })).collect::<Vec<_>>(),
                    "page": page.page,
                    "total_pages": page.total_pages,
                    "total": page.total,
                    "has_previous": page.has_previous(),
                    "has_next": page.has_next(),
                }),
                Err(_) => {
                    alert = Some("Error fetching messages".to_string());
                    json!({"messages": [], "page": 1, "total_pages": 1, "total": 0,
                           "has_previous": false, "has_next": false})
                }
            };
            context.insert("inbox", &inbox_view);

            if query.saved.is_some() {
                notice = Some(CONTACT_SAVED);
            }
        }
    }

    context.insert("error", &alert);
    context.insert("notice", &notice);
    render(&state, "admin/index.html", &context)
}

fn news_row(article: &NewsArticle) -> Value {
    json!({
        "id": article.id,
        "title": article.title,
        "cat": article.cat,
        "published": article.published,
        "date": admin_date(&article.created_at),
    })
}

fn service_row(service: &Service) -> Value {
    json!({
        "id": service.id,
        "title": service.title,
        "icon": service.icon().map(|icon| icon.glyph()).unwrap_or(""),
        "documents": service.documents().len(),
        "active": service.active,
    })
}

fn partner_row(manager: &PartnersManager, partner: &Partner) -> Value {
    json!({
        "id": partner.id,
        "name": partner.name,
        "order_index": partner.order_index,
        "website": partner.website,
        "logo_url": partner.logo_path.as_deref().map(|path| manager.logo_url(path)),
    })
}

fn contact_form_view(form: &ContactForm, image_url: Option<String>) -> Value {
    json!({
        "name": form.name,
        "email": form.email,
        "phone": form.phone,
        "address": form.address,
        "image_url": image_url,
    })
}

pub async fn save_contact(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let form = contact_form(FormData::read(multipart).await?);
    let manager = ContactManager::new(session_content(&state, &session));

    match manager.save(form.clone()).await {
        Ok(_) => Ok(Redirect::to("/admin?tab=contact&saved=1").into_response()),
        Err(e) => {
            let message = save_error(&e, "contact information");
            let mut context = Context::new();
            context.insert("tab", AdminTab::Contact.as_str());
            context.insert("tabs", &tab_links(AdminTab::Contact));
            context.insert("user_email", &session.user.email);
            context.insert("contact_form", &contact_form_view(&form, None));
            context.insert(
                "inbox",
                &json!({"messages": [], "page": 1, "total_pages": 1, "total": 0,
                        "has_previous": false, "has_next": false}),
            );
            context.insert("error", &Some(message));
            context.insert("notice", &None::<&str>);
            render(&state, "admin/index.html", &context)
        }
    }
}

// ==================== Delete confirmation ====================

fn render_confirm_delete(
    state: &AppState,
    message: &str,
    label: &str,
    action: String,
    tab: AdminTab,
    error: Option<String>,
) -> Result<Response, AppError> {
    let mut context = Context::new();
    context.insert("message", message);
    context.insert("label", label);
    context.insert("action", &action);
    context.insert("cancel_href", &format!("/admin?tab={}", tab.as_str()));
    context.insert("error", &error);
    render(state, "admin/confirm_delete.html", &context)
}

fn report_orphans(what: &str, id: &str, orphaned: &[String]) {
    if !orphaned.is_empty() {
        warn!("{} {} left orphaned objects: {:?}", what, id, orphaned);
    }
}

// ==================== News ====================

const NEWS_DELETE_PROMPT: &str = "Are you sure you want to delete this news item?";

fn render_news_form(
    state: &AppState,
    manager: &NewsManager,
    id: Option<&str>,
    existing: Option<&NewsArticle>,
    form: &NewsForm,
    error: Option<String>,
) -> Result<Response, AppError> {
    let mut context = Context::new();
    context.insert("editing", &id.is_some());
    context.insert(
        "action",
        &id
            .map(|id| format!("/admin/news/{}", id))
            .unwrap_or_else(|| "/admin/news".to_string()),
    );
    context.insert(
        "form",
        &json!({
            "title": form.title,
            "content": form.content,
            "cat": form.cat,
            "published": form.published,
        }),
    );
    context.insert(
        "document_url",
        &existing
            .and_then(|a| a.pdf_file_path.as_deref())
            .map(|path| manager.document_url(path)),
    );
    context.insert("error", &error);
    render(state, "admin/news_form.html", &context)
}

pub async fn new_news(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
) -> Result<Response, AppError> {
    let manager = NewsManager::new(session_content(&state, &session));
    render_news_form(&state, &manager, None, None, &NewsForm::default(), None)
}

pub async fn edit_news(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let manager = NewsManager::new(session_content(&state, &session));
    match manager.get(&id).await? {
        Some(article) => render_news_form(
            &state,
            &manager,
            Some(&id),
            Some(&article),
            &NewsForm::from(&article),
            None,
        ),
        None => Ok(tab_redirect(AdminTab::News)),
    }
}

async fn save_news(
    state: &AppState,
    session: &AdminSession,
    id: Option<&str>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let form = news_form(FormData::read(multipart).await?);
    let manager = NewsManager::new(session_content(state, session));

    let existing = match id {
        Some(id) => match manager.get(id).await {
            Ok(Some(article)) => Some(article),
            Ok(None) => return Ok(tab_redirect(AdminTab::News)),
            Err(_) => {
                return render_news_form(
                    state,
                    &manager,
                    Some(id),
                    None,
                    &form,
                    Some("Error saving news".to_string()),
                )
            }
        },
        None => None,
    };

    match manager.save(existing.as_ref(), form.clone()).await {
        Ok(outcome) => {
            report_orphans("News", &outcome.record.id, &outcome.orphaned);
            Ok(tab_redirect(AdminTab::News))
        }
        Err(e) => render_news_form(
            state,
            &manager,
            id,
            existing.as_ref(),
            &form,
            Some(save_error(&e, "news")),
        ),
    }
}

pub async fn create_news(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    save_news(&state, &session, None, multipart).await
}

pub async fn update_news(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    save_news(&state, &session, Some(&id), multipart).await
}

pub async fn confirm_delete_news(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let manager = NewsManager::new(session_content(&state, &session));
    match manager.get(&id).await? {
        Some(article) => render_confirm_delete(
            &state,
            NEWS_DELETE_PROMPT,
            &article.title,
            format!("/admin/news/{}/delete", article.id),
            AdminTab::News,
            None,
        ),
        None => Ok(tab_redirect(AdminTab::News)),
    }
}

pub async fn delete_news(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let manager = NewsManager::new(session_content(&state, &session));
    let article = match manager.get(&id).await {
        Ok(Some(article)) => article,
        Ok(None) => return Ok(tab_redirect(AdminTab::News)),
        Err(_) => {
            return render_confirm_delete(
                &state,
                NEWS_DELETE_PROMPT,
                "",
                format!("/admin/news/{}/delete", id),
                AdminTab::News,
                Some("Error deleting news".to_string()),
            )
        }
    };

    match manager.delete(&article).await {
        Ok(outcome) => {
            report_orphans("News", &article.id, &outcome.orphaned);
            Ok(tab_redirect(AdminTab::News))
        }
        Err(_) => render_confirm_delete(
            &state,
            NEWS_DELETE_PROMPT,
            &article.title,
            format!("/admin/news/{}/delete", article.id),
            AdminTab::News,
            Some("Error deleting news".to_string()),
        ),
    }
}

// ==================== Services ====================

const SERVICE_DELETE_PROMPT: &str = "Are you sure you want to delete this service?";

fn render_service_form(
    state: &AppState,
    manager: &ServicesManager,
    id: Option<&str>,
    existing: Option<&Service>,
    form: &ServiceForm,
    error: Option<String>,
) -> Result<Response, AppError> {
    let icons: Vec<Value> = ServiceIcon::ALL
        .iter()
        .map(|icon| json!({"name": icon.as_str(), "glyph": icon.glyph()}))
        .collect();
    let documents: Vec<Value> = existing
        .map(|s| s.documents())
        .unwrap_or_default()
        .iter()
        .enumerate()
        .map(|(n, path)| {
            json!({
                "name": format!("Document {}", n + 1),
                "path": path,
                "url": manager.document_url(path),
            })
        })
        .collect();

    let mut context = Context::new();
    context.insert("editing", &id.is_some());
    context.insert(
        "action",
        &id
            .map(|id| format!("/admin/services/{}", id))
            .unwrap_or_else(|| "/admin/services".to_string()),
    );
    context.insert(
        "form",
        &json!({
            "title": form.title,
            "description": form.description,
            "icon": form.icon,
            "active": form.active,
        }),
    );
    context.insert("icons", &icons);
    context.insert("documents", &documents);
    context.insert("error", &error);
    render(state, "admin/service_form.html", &context)
}

pub async fn new_service(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
) -> Result<Response, AppError> {
    let manager = ServicesManager::new(session_content(&state, &session));
    render_service_form(&state, &manager, None, None, &ServiceForm::default(), None)
}

pub async fn edit_service(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let manager = ServicesManager::new(session_content(&state, &session));
    match manager.get(&id).await? {
        Some(service) => render_service_form(
            &state,
            &manager,
            Some(&id),
            Some(&service),
            &ServiceForm::from(&service),
            None,
        ),
        None => Ok(tab_redirect(AdminTab::Services)),
    }
}

async fn save_service(
    state: &AppState,
    session: &AdminSession,
    id: Option<&str>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let form = service_form(FormData::read(multipart).await?);
    let manager = ServicesManager::new(session_content(state, session));

    let existing = match id {
        Some(id) => match manager.get(id).await {
            Ok(Some(service)) => Some(service),
            Ok(None) => return Ok(tab_redirect(AdminTab::Services)),
            Err(_) => {
                return render_service_form(
                    state,
                    &manager,
                    Some(id),
                    None,
                    &form,
                    Some("Error saving service".to_string()),
                )
            }
        },
        None => None,
    };

    match manager.save(existing.as_ref(), form.clone()).await {
        Ok(outcome) => {
            report_orphans("Service", &outcome.record.id, &outcome.orphaned);
            Ok(tab_redirect(AdminTab::Services))
        }
        Err(e) => render_service_form(
            state,
            &manager,
            id,
            existing.as_ref(),
            &form,
            Some(save_error(&e, "service")),
        ),
    }
}

pub async fn create_service(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    save_service(&state, &session, None, multipart).await
}

pub async fn update_service(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    save_service(&state, &session, Some(&id), multipart).await
}

pub async fn confirm_delete_service(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let manager = ServicesManager::new(session_content(&state, &session));
    match manager.get(&id).await? {
        Some(service) => render_confirm_delete(
            &state,
            SERVICE_DELETE_PROMPT,
            &service.title,
            format!("/admin/services/{}/delete", service.id),
            AdminTab::Services,
            None,
        ),
        None => Ok(tab_redirect(AdminTab::Services)),
    }
}

pub async fn delete_service(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let manager = ServicesManager::new(session_content(&state, &session));
    let service = match manager.get(&id).await {
        Ok(Some(service)) => service,
        Ok(None) => return Ok(tab_redirect(AdminTab::Services)),
        Err(_) => {
            return render_confirm_delete(
                &state,
                SERVICE_DELETE_PROMPT,
                "",
                format!("/admin/services/{}/delete", id),
                AdminTab::Services,
                Some("Error deleting service".to_string()),
            )
        }
    };

    match manager.delete(&service).await {
        Ok(outcome) => {
            report_orphans("Service", &service.id, &outcome.orphaned);
            Ok(tab_redirect(AdminTab::Services))
        }
        Err(_) => render_confirm_delete(
            &state,
            SERVICE_DELETE_PROMPT,
            &service.title,
            format!("/admin/services/{}/delete", service.id),
            AdminTab::Services,
            Some("Error deleting service".to_string()),
        ),
    }
}

// ==================== Partners ====================

const PARTNER_DELETE_PROMPT: &str = "Are you sure you want to delete this partner?";

fn render_partner_form(
    state: &AppState,
    manager: &PartnersManager,
    id: Option<&str>,
    existing: Option<&Partner>,
    form: &PartnerForm,
    error: Option<String>,
) -> Result<Response, AppError> {
    let mut context = Context::new();
    context.insert("editing", &id.is_some());
    context.insert(
        "action",
        &id
            .map(|id| format!("/admin/partners/{}", id))
            .unwrap_or_else(|| "/admin/partners".to_string()),
    );
    context.insert(
        "form",
        &json!({
            "name": form.name,
            "description": form.description,
            "website": form.website,
            "order_index": form.order_index,
        }),
    );
    context.insert(
        "logo_url",
        &existing
            .and_then(|p| p.logo_path.as_deref())
            .map(|path| manager.logo_url(path)),
    );
    context.insert("error", &error);
    render(state, "admin/partner_form.html", &context)
}

/// New partners go to the end of the display order.
async fn new_partner_form(manager: &PartnersManager) -> PartnerForm {
    let count = manager.list().await.map(|partners| partners.len()).unwrap_or(0);
    PartnerForm {
        order_index: i32::try_from(count).unwrap_or(i32::MAX),
        ..PartnerForm::default()
    }
}

pub async fn new_partner(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
) -> Result<Response, AppError> {
    let manager = PartnersManager::new(session_content(&state, &session));
    render_partner_form(
        &state,
        &manager,
        None,
        None,
        &new_partner_form(&manager).await,
        None,
    )
}

pub async fn edit_partner(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let manager = PartnersManager::new(session_content(&state, &session));
    match manager.get(&id).await? {
        Some(partner) => render_partner_form(
            &state,
            &manager,
            Some(&id),
            Some(&partner),
            &PartnerForm::from(&partner),
            None,
        ),
        None => Ok(tab_redirect(AdminTab::Partners)),
    }
}

async fn save_partner(
    state: &AppState,
    session: &AdminSession,
    id: Option<&str>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let form = partner_form(FormData::read(multipart).await?);
    let manager = PartnersManager::new(session_content(state, session));

    let existing = match id {
        Some(id) => match manager.get(id).await {
            Ok(Some(partner)) => Some(partner),
            Ok(None) => return Ok(tab_redirect(AdminTab::Partners)),
            Err(_) => {
                return render_partner_form(
                    state,
                    &manager,
                    Some(id),
                    None,
                    &form,
                    Some("Error saving partner".to_string()),
                )
            }
        },
        None => None,
    };

    match manager.save(existing.as_ref(), form.clone()).await {
        Ok(outcome) => {
            report_orphans("Partner", &outcome.record.id, &outcome.orphaned);
            Ok(tab_redirect(AdminTab::Partners))
        }
        Err(e) => render_partner_form(
            state,
            &manager,
            id,
            existing.as_ref(),
            &form,
            Some(save_error(&e, "partner")),
        ),
    }
}

pub async fn create_partner(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    save_partner(&state, &session, None, multipart).await
}

pub async fn update_partner(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    save_partner(&state, &session, Some(&id), multipart).await
}

pub async fn confirm_delete_partner(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let manager = PartnersManager::new(session_content(&state, &session));
    match manager.get(&id).await? {
        Some(partner) => render_confirm_delete(
            &state,
            PARTNER_DELETE_PROMPT,
            &partner.name,
            format!("/admin/partners/{}/delete", partner.id),
            AdminTab::Partners,
            None,
        ),
        None => Ok(tab_redirect(AdminTab::Partners)),
    }
}

pub async fn delete_partner(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let manager = PartnersManager::new(session_content(&state, &session));
    let partner = match manager.get(&id).await {
        Ok(Some(partner)) => partner,
        Ok(None) => return Ok(tab_redirect(AdminTab::Partners)),
        Err(_) => {
            return render_confirm_delete(
                &state,
                PARTNER_DELETE_PROMPT,
                "",
                format!("/admin/partners/{}/delete", id),
                AdminTab::Partners,
                Some("Error deleting partner".to_string()),
            )
        }
    };

    match manager.delete(&partner).await {
        Ok(outcome) => {
            report_orphans("Partner", &partner.id, &outcome.orphaned);
            Ok(tab_redirect(AdminTab::Partners))
        }
        Err(_) => render_confirm_delete(
            &state,
            PARTNER_DELETE_PROMPT,
            &partner.name,
            format!("/admin/partners/{}/delete", partner.id),
            AdminTab::Partners,
            Some("Error deleting partner".to_string()),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::ContentError;

    #[test]
    fn test_login_target_only_allows_admin_paths() {
        assert_eq!(login_target("/admin/news/new"), "/admin/news/new");
        assert_eq!(login_target("//evil.example"), "/admin");
        assert_eq!(login_target("https://evil.example/admin"), "/admin");
        assert_eq!(login_target("/news"), "/admin");
        assert_eq!(login_target(""), "/admin");
    }

    #[test]
    fn test_save_error_messages() {
        assert_eq!(
            save_error(&AdminError::MissingField("Title"), "news"),
            "Title is required"
        );
        assert_eq!(
            save_error(
                &AdminError::Content(ContentError::Unavailable("down".to_string())),
                "news"
            ),
            "Error saving news"
        );
        assert_eq!(save_error(&AdminError::NotFound, "partner"), "Error saving partner");
    }
}
