//! Record shapes stored in the hosted backend.
//!
//! Field names match the backend's column names so rows deserialize as-is.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Backend record collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    News,
    Services,
    Partners,
    /// Singleton company contact profile
    Contact,
    /// Inbound messages from the public contact form
    Contacts,
}

impl Table {
    pub fn as_str(&self) -> &'static str {
        match self {
            Table::News => "news",
            Table::Services => "services",
            Table::Partners => "partners",
            Table::Contact => "contact",
            Table::Contacts => "contacts",
        }
    }

    /// Whether rows get a server-filled `created_at`.
    pub fn has_created_at(&self) -> bool {
        !matches!(self, Table::Contact)
    }

    /// Whether rows get a server-filled `updated_at` on insert.
    pub fn has_updated_at(&self) -> bool {
        matches!(self, Table::News | Table::Services | Table::Contact)
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Object storage buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    NewsPdfs,
    ServicePdfs,
    PartnerLogos,
    ContactImages,
}

impl Bucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            Bucket::NewsPdfs => "news-pdfs",
            Bucket::ServicePdfs => "service-pdfs",
            Bucket::PartnerLogos => "partner-logos",
            Bucket::ContactImages => "contact-images",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A row type with a matching insert/update payload.
pub trait Record: DeserializeOwned + Serialize + Clone + Send + Sync + 'static {
    /// Fields an admin can write.
    type Draft: Serialize + Send + Sync;

    const TABLE: Table;

    /// Whether updates stamp `updated_at`.
    const TRACKS_UPDATES: bool;

    fn id(&self) -> &str;
}

// ==================== News ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub id: String,
    pub title: String,
    pub content: String,
    /// Category label
    pub cat: String,
    pub pdf_file_path: Option<String>,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewsDraft {
    pub title: String,
    pub content: String,
    pub cat: String,
    pub pdf_file_path: Option<String>,
    pub published: bool,
}

impl Record for NewsArticle {
    type Draft = NewsDraft;
    const TABLE: Table = Table::News;
    const TRACKS_UPDATES: bool = true;

    fn id(&self) -> &str {
        &self.id
    }
}

impl From<&NewsArticle> for NewsDraft {
    fn from(article: &NewsArticle) -> Self {
        Self {
            title: article.title.clone(),
            content: article.content.clone(),
            cat: article.cat.clone(),
            pdf_file_path: article.pdf_file_path.clone(),
            published: article.published,
        }
    }
}

// ==================== Services ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: Option<String>,
    /// Stored document paths in `service-pdfs`, in upload order
    pub files: Option<Vec<String>>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Service {
    pub fn documents(&self) -> &[String] {
        self.files.as_deref().unwrap_or(&[])
    }

    /// The stored icon, if it names a supported one.
    pub fn icon(&self) -> Option<ServiceIcon> {
        self.icon.as_deref().and_then(|name| name.parse().ok())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceDraft {
    pub title: String,
    pub description: String,
    pub icon: Option<String>,
    pub files: Vec<String>,
    pub active: bool,
}

impl Default for ServiceDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            icon: Some(ServiceIcon::default().as_str().to_string()),
            files: Vec::new(),
            active: true,
        }
    }
}

impl Record for Service {
    type Draft = ServiceDraft;
    const TABLE: Table = Table::Services;
    const TRACKS_UPDATES: bool = true;

    fn id(&self) -> &str {
        &self.id
    }
}

impl From<&Service> for ServiceDraft {
    fn from(service: &Service) -> Self {
        Self {
            title: service.title.clone(),
            description: service.description.clone(),
            icon: service.icon.clone(),
            files: service.documents().to_vec(),
            active: service.active,
        }
    }
}

/// Icons a service card can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ServiceIcon {
    #[default]
    Radio,
    Scan,
    Magnet,
    Eye,
    Droplets,
    Ruler,
    Building2,
    Flame,
}

impl ServiceIcon {
    pub const ALL: [ServiceIcon; 8] = [
        ServiceIcon::Radio,
        ServiceIcon::Scan,
        ServiceIcon::Magnet,
        ServiceIcon::Eye,
        ServiceIcon::Droplets,
        ServiceIcon::Ruler,
        ServiceIcon::Building2,
        ServiceIcon::Flame,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceIcon::Radio => "Radio",
            ServiceIcon::Scan => "Scan",
            ServiceIcon::Magnet => "Magnet",
            ServiceIcon::Eye => "Eye",
            ServiceIcon::Droplets => "Droplets",
            ServiceIcon::Ruler => "Ruler",
            ServiceIcon::Building2 => "Building2",
            ServiceIcon::Flame => "Flame",
        }
    }

    /// Glyph used in place of the icon font.
    pub fn glyph(&self) -> &'static str {
        match self {
            ServiceIcon::Radio => "📡",
            ServiceIcon::Scan => "🔍",
            ServiceIcon::Magnet => "🧲",
            ServiceIcon::Eye => "👁",
            ServiceIcon::Droplets => "💧",
            ServiceIcon::Ruler => "📏",
            ServiceIcon::Building2 => "🏢",
            ServiceIcon::Flame => "🔥",
        }
    }
}

impl FromStr for ServiceIcon {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ServiceIcon::ALL
            .into_iter()
            .find(|icon| icon.as_str() == s)
            .ok_or_else(|| format!("Unsupported service icon: '{}'", s))
    }
}

impl fmt::Display for ServiceIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ==================== Partners ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partner {
    pub id: String,
    pub name: String,
    pub description: String,
    pub logo_path: Option<String>,
    pub website: Option<String>,
    pub order_index: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartnerDraft {
    pub name: String,
    pub description: String,
    pub logo_path: Option<String>,
    pub website: Option<String>,
    pub order_index: i32,
}

impl Record for Partner {
    type Draft = PartnerDraft;
    const TABLE: Table = Table::Partners;
    const TRACKS_UPDATES: bool = false;

    fn id(&self) -> &str {
        &self.id
    }
}

impl From<&Partner> for PartnerDraft {
    fn from(partner: &Partner) -> Self {
        Self {
            name: partner.name.clone(),
            description: partner.description.clone(),
            logo_path: partner.logo_path.clone(),
            website: partner.website.clone(),
            order_index: partner.order_index,
        }
    }
}

// ==================== Contact profile ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub image_path: Option<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactProfileDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub image_path: Option<String>,
}

impl Record for ContactProfile {
    type Draft = ContactProfileDraft;
    const TABLE: Table = Table::Contact;
    const TRACKS_UPDATES: bool = true;

    fn id(&self) -> &str {
        &self.id
    }
}

impl From<&ContactProfile> for ContactProfileDraft {
    fn from(profile: &ContactProfile) -> Self {
        Self {
            name: profile.name.clone(),
            email: profile.email.clone(),
            phone: profile.phone.clone(),
            address: profile.address.clone(),
            image_path: profile.image_path.clone(),
        }
    }
}

// ==================== Contact messages ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: String,
    pub name: String,
    pub email: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactMessageDraft {
    pub name: String,
    pub email: String,
    pub content: String,
}

impl Record for ContactMessage {
    type Draft = ContactMessageDraft;
    const TABLE: Table = Table::Contacts;
    const TRACKS_UPDATES: bool = false;

    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ==================== Deserialization Tests ====================

    #[test]
    fn test_news_row_deserialization() {
        let row = json!({
            "id": "0b7f4c1e-2d1c-4a57-9a8e-3f4b5c6d7e8f",
            "title": "New ultrasonic equipment",
            "content": "We added phased array units.",
            "cat": "Equipment",
            "pdf_file_path": null,
            "published": true,
            "created_at": "2024-01-15T10:30:00.123456+00:00",
            "updated_at": "2024-01-15T10:30:00+00:00"
        });

        let article: NewsArticle = serde_json::from_value(row).expect("Should deserialize");
        assert_eq!(article.cat, "Equipment");
        assert!(article.pdf_file_path.is_none());
        assert!(article.published);
    }

    #[test]
    fn test_service_with_null_files_has_no_documents() {
        let row = json!({
            "id": "s1",
            "title": "Ultrasonic Testing",
            "description": "UT",
            "icon": null,
            "files": null,
            "active": true,
            "created_at": "2024-01-15T10:30:00Z",
            "updated_at": "2024-01-15T10:30:00Z"
        });

        let service: Service = serde_json::from_value(row).expect("Should deserialize");
        assert!(service.documents().is_empty());
        assert!(service.icon().is_none());
    }

    #[test]
    fn test_partner_website_optional() {
        let row = json!({
            "id": "p1",
            "name": "Erdenet Mining",
            "description": "Copper",
            "logo_path": "1700000000000-a.png",
            "website": null,
            "order_index": 2,
            "created_at": "2024-01-15T10:30:00Z"
        });

        let partner: Partner = serde_json::from_value(row).expect("Should deserialize");
        assert_eq!(partner.order_index, 2);
        assert!(partner.website.is_none());
    }

    #[test]
    fn test_news_draft_serializes_null_path() {
        let draft = NewsDraft {
            title: "t".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["pdf_file_path"], serde_json::Value::Null);
        assert_eq!(value["published"], false);
    }

    // ==================== Service Icon Tests ====================

    #[test]
    fn test_icon_parse_known() {
        for icon in ServiceIcon::ALL {
            assert_eq!(icon.as_str().parse::<ServiceIcon>().unwrap(), icon);
        }
    }

    #[test]
    fn test_icon_parse_unknown() {
        assert!("Wrench".parse::<ServiceIcon>().is_err());
        assert!("radio".parse::<ServiceIcon>().is_err());
        assert!("".parse::<ServiceIcon>().is_err());
    }

    #[test]
    fn test_service_icon_accessor_ignores_unknown_names() {
        let mut service = Service {
            id: "s1".to_string(),
            title: "Magnetic Particle".to_string(),
            description: "MT".to_string(),
            icon: Some("Magnet".to_string()),
            files: Some(vec!["a.pdf".to_string()]),
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(service.icon(), Some(ServiceIcon::Magnet));

        service.icon = Some("Unicorn".to_string());
        assert_eq!(service.icon(), None);
    }

    #[test]
    fn test_service_draft_defaults_to_radio_and_active() {
        let draft = ServiceDraft::default();
        assert_eq!(draft.icon.as_deref(), Some("Radio"));
        assert!(draft.active);
    }

    // ==================== Table Tests ====================

    #[test]
    fn test_table_names() {
        assert_eq!(Table::News.as_str(), "news");
        assert_eq!(Table::Contact.as_str(), "contact");
        assert_eq!(Table::Contacts.as_str(), "contacts");
        assert_eq!(Bucket::PartnerLogos.as_str(), "partner-logos");
    }

    #[test]
    fn test_table_timestamps() {
        assert!(Table::Partners.has_created_at());
        assert!(!Table::Partners.has_updated_at());
        assert!(!Table::Contact.has_created_at());
        assert!(Table::Contact.has_updated_at());
    }
}
