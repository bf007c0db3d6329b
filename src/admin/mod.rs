//! Content management behind the admin console.
//!
//! One manager per collection. Managers validate the fields a form marks as
//! required, run attachment staging around the record write, and report
//! objects that could not be cleaned up. They never retry: a failure is
//! returned to the caller, which shows it to the admin.

pub mod contact;
pub mod inbox;
pub mod news;
pub mod partners;
pub mod services;

pub use contact::{ContactForm, ContactManager};
pub use inbox::{ContactsInbox, InboxPage, PAGE_SIZE};
pub use news::{NewsForm, NewsManager};
pub use partners::{PartnerForm, PartnersManager};
pub use services::{ServiceForm, ServicesManager};

use crate::attachments::StagedUploads;
use crate::backend::ContentError;
use crate::content::ContentClient;
use crate::models::{Bucket, Record};
use tracing::{error, warn};

#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    #[error(transparent)]
    Content(#[from] ContentError),

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("{field} is invalid: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("Record no longer exists")]
    NotFound,
}

/// A committed write and the objects it failed to clean up.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveOutcome<R> {
    pub record: R,
    pub orphaned: Vec<String>,
}

/// A committed delete and the objects it failed to remove.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub orphaned: Vec<String>,
}

/// Admin console sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminTab {
    #[default]
    News,
    Services,
    Contact,
    Partners,
}

impl AdminTab {
    pub const ALL: [AdminTab; 4] = [
        AdminTab::News,
        AdminTab::Services,
        AdminTab::Contact,
        AdminTab::Partners,
    ];

    /// Tab named in a query string; anything unknown opens news.
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("services") => AdminTab::Services,
            Some("contact") => AdminTab::Contact,
            Some("partners") => AdminTab::Partners,
            _ => AdminTab::News,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AdminTab::News => "news",
            AdminTab::Services => "services",
            AdminTab::Contact => "contact",
            AdminTab::Partners => "partners",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AdminTab::News => "News",
            AdminTab::Services => "Services",
            AdminTab::Contact => "Contact",
            AdminTab::Partners => "Partners",
        }
    }
}

pub(crate) fn require(value: &str, field: &'static str) -> Result<(), AdminError> {
    if value.trim().is_empty() {
        return Err(AdminError::MissingField(field));
    }
    Ok(())
}

/// Create when `existing_id` is `None`, otherwise update that record.
pub(crate) async fn write_record<R: Record>(
    content: &ContentClient,
    existing_id: Option<&str>,
    draft: &R::Draft,
) -> Result<Option<R>, ContentError> {
    match existing_id {
        Some(id) => content.update::<R>(id, draft).await,
        None => content.create::<R>(draft).await.map(Some),
    }
}

/// Finish a write that may have staged uploads: keep them on success,
/// discard them on failure.
pub(crate) async fn commit<R>(
    content: &ContentClient,
    staged: StagedUploads,
    written: Result<Option<R>, ContentError>,
    what: &str,
) -> Result<R, AdminError> {
    match written {
        Ok(Some(record)) => {
            let _ = staged.keep();
            Ok(record)
        }
        Ok(None) => {
            error!("Error saving {}: record no longer exists", what);
            staged.discard(content).await;
            Err(AdminError::NotFound)
        }
        Err(e) => {
            error!("Error saving {}: {}", what, e);
            staged.discard(content).await;
            Err(e.into())
        }
    }
}

/// Delete a record, then remove its objects.
///
/// The record goes first. If object removal fails afterwards the record stays
/// deleted and the objects are reported as orphaned; there is no rollback.
pub(crate) async fn delete_with_objects<R: Record>(
    content: &ContentClient,
    id: &str,
    bucket: Bucket,
    paths: Vec<String>,
    what: &str,
) -> Result<DeleteOutcome, AdminError> {
    if let Err(e) = content.delete::<R>(id).await {
        error!("Error deleting {}: {}", what, e);
        return Err(e.into());
    }

    if paths.is_empty() {
        return Ok(DeleteOutcome::default());
    }

    match content.remove(bucket, &paths).await {
        Ok(()) => Ok(DeleteOutcome::default()),
        Err(e) => {
            warn!(
                "Deleted {} {} but could not remove {:?} from {}: {}",
                what, id, paths, bucket, e
            );
            Ok(DeleteOutcome { orphaned: paths })
        }
    }
}
