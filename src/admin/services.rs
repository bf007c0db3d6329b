use crate::admin::{
    commit, delete_with_objects, require, write_record, AdminError, DeleteOutcome, SaveOutcome,
};
use crate::attachments::{remove_superseded, stage, superseded};
use crate::backend::{ContentError, Query};
use crate::content::{ContentClient, Upload};
use crate::models::{Bucket, Service, ServiceDraft, ServiceIcon};
use tracing::{error, info};

const BUCKET: Bucket = Bucket::ServicePdfs;

/// Submitted service form.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceForm {
    pub title: String,
    pub description: String,
    /// Icon name as submitted; must name a `ServiceIcon`
    pub icon: String,
    pub active: bool,
    /// New documents, appended after the existing ones
    pub documents: Vec<Upload>,
    /// Existing document paths the admin chose to drop
    pub removed_documents: Vec<String>,
}

impl Default for ServiceForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            icon: ServiceIcon::default().as_str().to_string(),
            active: true,
            documents: Vec::new(),
            removed_documents: Vec::new(),
        }
    }
}

impl From<&Service> for ServiceForm {
    fn from(service: &Service) -> Self {
        Self {
            title: service.title.clone(),
            description: service.description.clone(),
            icon: service
                .icon()
                .unwrap_or_default()
                .as_str()
                .to_string(),
            active: service.active,
            documents: Vec::new(),
            removed_documents: Vec::new(),
        }
    }
}

pub struct ServicesManager {
    content: ContentClient,
}

impl ServicesManager {
    pub fn new(content: ContentClient) -> Self {
        Self { content }
    }

    /// Every service, newest first, active or not.
    pub async fn list(&self) -> Result<Vec<Service>, ContentError> {
        self.content
            .list(Query::new().order_desc("created_at"))
            .await
            .inspect_err(|e| error!("Error fetching services: {}", e))
    }

    pub async fn get(&self, id: &str) -> Result<Option<Service>, ContentError> {
        self.content
            .get(id)
            .await
            .inspect_err(|e| error!("Error fetching service {}: {}", id, e))
    }

    pub fn document_url(&self, path: &str) -> String {
        self.content.public_url(BUCKET, path)
    }

    pub async fn save(
        &self,
        existing: Option<&Service>,
        form: ServiceForm,
    ) -> Result<SaveOutcome<Service>, AdminError> {
        require(&form.title, "Title")?;
        require(&form.description, "Description")?;
        let icon: ServiceIcon = form
            .icon
            .parse()
            .map_err(|reason| AdminError::InvalidField {
                field: "Icon",
                reason,
            })?;

        let staged = stage(&self.content, BUCKET, &form.documents).await?;

        let before = existing.map(|s| s.documents().to_vec()).unwrap_or_default();
        let mut files: Vec<String> = before
            .iter()
            .filter(|path| !form.removed_documents.contains(path))
            .cloned()
            .collect();
        files.extend(staged.paths().iter().cloned());
        let dropped = superseded(&before, &files);

        let draft = ServiceDraft {
            title: form.title,
            description: form.description,
            icon: Some(icon.as_str().to_string()),
            files,
            active: form.active,
        };

        let written = write_record(&self.content, existing.map(|s| s.id.as_str()), &draft).await;
        let record: Service = commit(&self.content, staged, written, "service").await?;
        let orphaned = remove_superseded(&self.content, BUCKET, dropped).await;

        info!("Saved service {}", record.id);
        Ok(SaveOutcome { record, orphaned })
    }

    pub async fn delete(&self, service: &Service) -> Result<DeleteOutcome, AdminError> {
        let paths = service.documents().to_vec();
        let outcome =
            delete_with_objects::<Service>(&self.content, &service.id, BUCKET, paths, "service")
                .await?;
        info!("Deleted service {}", service.id);
        Ok(outcome)
    }
}
