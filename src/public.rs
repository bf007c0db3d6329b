//! Content behind the public pages.
//!
//! Each page issues its reads, then renders whatever came back. A read that
//! fails is logged and rendered exactly like an empty result; the visitor
//! never sees an error for a list. Single-record pages treat a failed lookup
//! like a missing record and show the not-found view.

use crate::admin::PartnersManager;
use crate::backend::{ContentError, Query};
use crate::content::ContentClient;
use crate::i18n::Language;
use crate::models::{
    Bucket, ContactMessage, ContactMessageDraft, ContactProfile, NewsArticle, Partner, Service,
};
use crate::sections::ContactDetails;
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

/// Related articles shown under a news article.
pub const RELATED_NEWS: usize = 2;

/// Characters of a service description shown on its card.
pub const SERVICE_EXCERPT_CHARS: usize = 40;

/// Outcome of a public read.
#[derive(Debug, Clone, PartialEq)]
pub enum Loadable<T> {
    Populated(T),
    Empty,
    /// Logged where it happened; renders like `Empty`
    Failed,
}

impl<T> Loadable<Vec<T>> {
    fn from_rows(result: Result<Vec<T>, ContentError>, what: &str) -> Self {
        match result {
            Ok(rows) if rows.is_empty() => Loadable::Empty,
            Ok(rows) => Loadable::Populated(rows),
            Err(e) => {
                error!("Error fetching {}: {}", what, e);
                Loadable::Failed
            }
        }
    }

    /// Rows to render; none for `Empty` and `Failed`.
    pub fn items(&self) -> &[T] {
        match self {
            Loadable::Populated(rows) => rows,
            Loadable::Empty | Loadable::Failed => &[],
        }
    }

    pub fn into_items(self) -> Vec<T> {
        match self {
            Loadable::Populated(rows) => rows,
            Loadable::Empty | Loadable::Failed => Vec::new(),
        }
    }
}

impl<T> Loadable<T> {
    pub fn is_failed(&self) -> bool {
        matches!(self, Loadable::Failed)
    }
}

/// Everything the home page fetches.
#[derive(Debug, Clone)]
pub struct HomeContent {
    pub services: Loadable<Vec<Service>>,
    pub partners: Loadable<Vec<Partner>>,
    pub contact: ContactDetails,
    pub contact_image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentLink {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct NewsDetail {
    pub article: NewsArticle,
    pub paragraphs: Vec<String>,
    pub document: Option<DocumentLink>,
    pub related: Vec<NewsArticle>,
}

#[derive(Debug, Clone)]
pub struct ServiceDetail {
    pub service: Service,
    pub documents: Vec<DocumentLink>,
}

/// A message from the public contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error(transparent)]
    Content(#[from] ContentError),
}

/// Read side of the site, plus the one anonymous write (contact messages).
#[derive(Clone)]
pub struct PublicSite {
    content: ContentClient,
}

impl PublicSite {
    pub fn new(content: ContentClient) -> Self {
        Self { content }
    }

    /// Active services, oldest first.
    pub async fn services(&self) -> Loadable<Vec<Service>> {
        let query = Query::new().eq("active", true).order_asc("created_at");
        Loadable::from_rows(self.content.list(query).await, "services")
    }

    pub async fn partners(&self) -> Loadable<Vec<Partner>> {
        Loadable::from_rows(
            self.content.list(PartnersManager::display_order()).await,
            "partners",
        )
    }

    /// The stored company profile; `None` when absent or unreadable.
    pub async fn contact_profile(&self) -> Option<ContactProfile> {
        match self.content.find_one(Query::new()).await {
            Ok(profile) => profile,
            Err(e) => {
                error!("Error fetching contact: {}", e);
                None
            }
        }
    }

    pub async fn home(&self) -> HomeContent {
        let (services, partners, profile) = futures::join!(
            self.services(),
            self.partners(),
            self.contact_profile()
        );

        let contact_image_url = profile
            .as_ref()
            .and_then(|p| p.image_path.as_deref())
            .map(|path| self.content.public_url(Bucket::ContactImages, path));

        HomeContent {
            services,
            partners,
            contact: ContactDetails::resolve(profile.as_ref()),
            contact_image_url,
        }
    }

    pub fn partner_logo_url(&self, path: &str) -> String {
        self.content.public_url(Bucket::PartnerLogos, path)
    }

    /// Published articles, newest first.
    pub async fn news(&self) -> Loadable<Vec<NewsArticle>> {
        let query = Query::new().eq("published", true).order_desc("created_at");
        Loadable::from_rows(self.content.list(query).await, "news")
    }

    /// A published article with its related news; `None` renders not-found.
    pub async fn news_detail(&self, id: &str) -> Option<NewsDetail> {
        let article_query = Query::new().eq("id", id).eq("published", true);
        let related_query = Query::new()
            .eq("published", true)
            .neq("id", id)
            .order_desc("created_at")
            .limit(RELATED_NEWS);

        let (article, related) = futures::join!(
            self.content.find_one::<NewsArticle>(article_query),
            self.content.list::<NewsArticle>(related_query)
        );

        let article = match article {
            Ok(Some(article)) => article,
            Ok(None) => return None,
            Err(e) => {
                error!("Error fetching news {}: {}", id, e);
                return None;
            }
        };

        let related = Loadable::from_rows(related, "related news").into_items();
        let document = article.pdf_file_path.as_deref().map(|path| DocumentLink {
            name: path.to_string(),
            url: self.content.public_url(Bucket::NewsPdfs, path),
        });

        Some(NewsDetail {
            paragraphs: paragraphs(&article.content),
            document,
            related,
            article,
        })
    }

    /// An active service with links to its documents; `None` renders not-found.
    pub async fn service_detail(&self, id: &str) -> Option<ServiceDetail> {
        let query = Query::new().eq("id", id).eq("active", true);
        let service: Service = match self.content.find_one(query).await {
            Ok(service) => service?,
            Err(e) => {
                error!("Error fetching service {}: {}", id, e);
                return None;
            }
        };

        let documents = service
            .documents()
            .iter()
            .enumerate()
            .map(|(n, path)| DocumentLink {
                name: format!("Document {}", n + 1),
                url: self.content.public_url(Bucket::ServicePdfs, path),
            })
            .collect();

        Some(ServiceDetail { service, documents })
    }

    /// Store one contact message.
    pub async fn submit_contact(
        &self,
        submission: &ContactSubmission,
    ) -> Result<ContactMessage, SubmitError> {
        for (value, field) in [
            (&submission.name, "Name"),
            (&submission.email, "Email"),
            (&submission.message, "Message"),
        ] {
            if value.trim().is_empty() {
                return Err(SubmitError::MissingField(field));
            }
        }

        let draft = ContactMessageDraft {
            name: submission.name.clone(),
            email: submission.email.clone(),
            content: submission.message.clone(),
        };

        let message: ContactMessage = self.content.create(&draft).await.inspect_err(|e| {
            error!("Failed to send message: {}", e);
        })?;
        info!("Received contact message {}", message.id);
        Ok(message)
    }
}

/// Split article text into paragraphs on blank lines.
pub fn paragraphs(content: &str) -> Vec<String> {
    content
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// First `max_chars` characters of `text`, with an ellipsis when cut.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Long-form date in the visitor's language.
pub fn format_date(date: &DateTime<Utc>, language: Language) -> String {
    if language == Language::MONGOLIAN {
        format!(
            "{} оны {}-р сарын {}",
            date.year(),
            date.month(),
            date.day()
        )
    } else {
        date.format("%B %-d, %Y").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use crate::models::Table;
    use chrono::TimeZone;
    use serde_json::json;
    use std::sync::Arc;

    fn setup() -> (MemoryBackend, PublicSite) {
        let backend = MemoryBackend::new();
        let site = PublicSite::new(ContentClient::new(Arc::new(backend.clone())));
        (backend, site)
    }

    fn seed_service(backend: &MemoryBackend, title: &str, active: bool) -> String {
        let row = backend.seed(
            Table::Services,
            json!({"title": title, "description": "d", "icon": "Scan", "files": null,
                   "active": active}),
        );
        row["id"].as_str().unwrap().to_string()
    }

    fn seed_news(backend: &MemoryBackend, title: &str, published: bool) -> String {
        let row = backend.seed(
            Table::News,
            json!({"title": title, "content": "First.\n\nSecond.", "cat": "Company",
                   "pdf_file_path": null, "published": published}),
        );
        row["id"].as_str().unwrap().to_string()
    }

    // ==================== Services Tests ====================

    #[tokio::test]
    async fn test_services_only_active_oldest_first() {
        let (backend, site) = setup();
        seed_service(&backend, "UT", true);
        seed_service(&backend, "Hidden", false);
        seed_service(&backend, "MT", true);

        let titles: Vec<_> = site
            .services()
            .await
            .into_items()
            .into_iter()
            .map(|s| s.title)
            .collect();
        assert_eq!(titles, vec!["UT", "MT"]);
    }

    #[tokio::test]
    async fn test_failed_read_renders_like_empty() {
        let (backend, site) = setup();
        backend.fail_reads_from(Table::Services, true);

        let services = site.services().await;

        assert!(services.is_failed());
        assert!(services.items().is_empty());
    }

    #[tokio::test]
    async fn test_service_detail_hides_inactive() {
        let (backend, site) = setup();
        let hidden = seed_service(&backend, "Hidden", false);
        let shown = seed_service(&backend, "UT", true);

        assert!(site.service_detail(&hidden).await.is_none());
        assert!(site.service_detail("missing").await.is_none());
        assert_eq!(site.service_detail(&shown).await.unwrap().service.title, "UT");
    }

    #[tokio::test]
    async fn test_service_detail_links_documents() {
        let (backend, site) = setup();
        let row = backend.seed(
            Table::Services,
            json!({"title": "UT", "description": "d", "icon": null,
                   "files": ["a.pdf", "b.pdf"], "active": true}),
        );

        let detail = site
            .service_detail(row["id"].as_str().unwrap())
            .await
            .unwrap();

        assert_eq!(detail.documents.len(), 2);
        assert_eq!(detail.documents[0].name, "Document 1");
        assert!(detail.documents[1].url.ends_with("/service-pdfs/b.pdf"));
    }

    // ==================== Home Tests ====================

    #[tokio::test]
    async fn test_home_falls_back_to_built_in_contact() {
        let (backend, site) = setup();
        backend.fail_reads_from(Table::Contact, true);
        backend.seed(
            Table::Partners,
            json!({"name": "P", "description": "", "logo_path": null, "website": null,
                   "order_index": 0}),
        );

        let home = site.home().await;

        assert_eq!(home.contact, ContactDetails::default());
        assert!(home.contact_image_url.is_none());
        assert_eq!(home.partners.items().len(), 1);
        assert_eq!(home.services, Loadable::Empty);
    }

    // ==================== News Tests ====================

    #[tokio::test]
    async fn test_news_list_only_published_newest_first() {
        let (backend, site) = setup();
        seed_news(&backend, "Old", true);
        seed_news(&backend, "Draft", false);
        seed_news(&backend, "New", true);

        let titles: Vec<_> = site
            .news()
            .await
            .into_items()
            .into_iter()
            .map(|a| a.title)
            .collect();
        assert_eq!(titles, vec!["New", "Old"]);
    }

    #[tokio::test]
    async fn test_news_detail_with_related() {
        let (backend, site) = setup();
        seed_news(&backend, "A", true);
        seed_news(&backend, "B", true);
        seed_news(&backend, "C", true);
        let id = seed_news(&backend, "D", true);

        let detail = site.news_detail(&id).await.unwrap();

        assert_eq!(detail.article.title, "D");
        assert_eq!(detail.paragraphs, vec!["First.", "Second."]);
        let related: Vec<_> = detail.related.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(related, vec!["C", "B"]);
    }

    #[tokio::test]
    async fn test_news_detail_missing_or_unpublished() {
        let (backend, site) = setup();
        let draft = seed_news(&backend, "Draft", false);

        assert!(site.news_detail("does-not-exist").await.is_none());
        assert!(site.news_detail(&draft).await.is_none());
    }

    #[tokio::test]
    async fn test_news_detail_read_failure_is_not_found() {
        let (backend, site) = setup();
        let id = seed_news(&backend, "A", true);
        backend.fail_reads_from(Table::News, true);

        assert!(site.news_detail(&id).await.is_none());
    }

    // ==================== Contact Form Tests ====================

    #[tokio::test]
    async fn test_submit_contact_stores_one_message() {
        let (backend, site) = setup();
        let submission = ContactSubmission {
            name: "Bat".to_string(),
            email: "bat@example.mn".to_string(),
            message: "Need an inspection".to_string(),
        };

        let stored = site.submit_contact(&submission).await.unwrap();

        assert_eq!(stored.content, "Need an inspection");
        assert_eq!(backend.rows(Table::Contacts).len(), 1);
    }

    #[tokio::test]
    async fn test_submit_contact_failure() {
        let (backend, site) = setup();
        backend.fail_writes_to(Table::Contacts, true);
        let submission = ContactSubmission {
            name: "Bat".to_string(),
            email: "bat@example.mn".to_string(),
            message: "Hello".to_string(),
        };

        let err = site.submit_contact(&submission).await.unwrap_err();

        assert!(matches!(err, SubmitError::Content(_)));
        assert!(backend.rows(Table::Contacts).is_empty());
    }

    #[tokio::test]
    async fn test_submit_contact_requires_message() {
        let (backend, site) = setup();
        let submission = ContactSubmission {
            name: "Bat".to_string(),
            email: "bat@example.mn".to_string(),
            message: "  ".to_string(),
        };

        let err = site.submit_contact(&submission).await.unwrap_err();

        assert_eq!(err.to_string(), "Message is required");
        assert!(backend.rows(Table::Contacts).is_empty());
    }

    // ==================== Formatting Tests ====================

    #[test]
    fn test_format_date_per_language() {
        let date = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(format_date(&date, Language::ENGLISH), "January 15, 2024");
        assert_eq!(format_date(&date, Language::MONGOLIAN), "2024 оны 1-р сарын 15");
    }

    #[test]
    fn test_excerpt() {
        assert_eq!(excerpt("short", 40), "short");
        assert_eq!(excerpt("abcdef", 3), "abc...");
        assert_eq!(excerpt("Хэт авиан шинжилгээ", 3), "Хэт...");
    }

    #[test]
    fn test_paragraphs_skip_blank_blocks() {
        assert_eq!(paragraphs("One\n\n\n\nTwo  "), vec!["One", "Two"]);
        assert!(paragraphs("").is_empty());
    }
}
