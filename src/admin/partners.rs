use crate::admin::{
    commit, delete_with_objects, require, write_record, AdminError, DeleteOutcome, SaveOutcome,
};
use crate::attachments::{remove_superseded, stage};
use crate::backend::{ContentError, Query};
use crate::content::{ContentClient, Upload};
use crate::models::{Bucket, Partner, PartnerDraft};
use tracing::{error, info};

const BUCKET: Bucket = Bucket::PartnerLogos;

/// Submitted partner form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartnerForm {
    pub name: String,
    pub description: String,
    /// Blank means no website
    pub website: String,
    pub order_index: i32,
    pub logo: Option<Upload>,
}

impl From<&Partner> for PartnerForm {
    fn from(partner: &Partner) -> Self {
        Self {
            name: partner.name.clone(),
            description: partner.description.clone(),
            website: partner.website.clone().unwrap_or_default(),
            order_index: partner.order_index,
            logo: None,
        }
    }
}

pub struct PartnersManager {
    content: ContentClient,
}

impl PartnersManager {
    pub fn new(content: ContentClient) -> Self {
        Self { content }
    }

    /// Display order: `order_index`, then creation order.
    pub fn display_order() -> Query {
        Query::new()
            .order_asc("order_index")
            .order_asc("created_at")
    }

    pub async fn list(&self) -> Result<Vec<Partner>, ContentError> {
        self.content
            .list(Self::display_order())
            .await
            .inspect_err(|e| error!("Error fetching partners: {}", e))
    }

    pub async fn get(&self, id: &str) -> Result<Option<Partner>, ContentError> {
        self.content
            .get(id)
            .await
            .inspect_err(|e| error!("Error fetching partner {}: {}", id, e))
    }

    pub fn logo_url(&self, path: &str) -> String {
        self.content.public_url(BUCKET, path)
    }

    pub async fn save(
        &self,
        existing: Option<&Partner>,
        form: PartnerForm,
    ) -> Result<SaveOutcome<Partner>, AdminError> {
        require(&form.name, "Name")?;
        require(&form.description, "Description")?;

        let staged = stage(&self.content, BUCKET, form.logo.as_slice()).await?;
        let previous = existing.and_then(|p| p.logo_path.clone());
        let website = Some(form.website.trim().to_string()).filter(|w| !w.is_empty());

        let draft = PartnerDraft {
            name: form.name,
            description: form.description,
            logo_path: staged.first().cloned().or_else(|| previous.clone()),
            website,
            order_index: form.order_index,
        };

        let replaced = !staged.is_empty();
        let written = write_record(&self.content, existing.map(|p| p.id.as_str()), &draft).await;
        let record: Partner = commit(&self.content, staged, written, "partner").await?;

        let orphaned = match previous {
            Some(old) if replaced => remove_superseded(&self.content, BUCKET, vec![old]).await,
            _ => Vec::new(),
        };

        info!("Saved partner {}", record.id);
        Ok(SaveOutcome { record, orphaned })
    }

    pub async fn delete(&self, partner: &Partner) -> Result<DeleteOutcome, AdminError> {
        let paths = partner.logo_path.iter().cloned().collect();
        let outcome =
            delete_with_objects::<Partner>(&self.content, &partner.id, BUCKET, paths, "partner")
                .await?;
        info!("Deleted partner {}", partner.id);
        Ok(outcome)
    }
}
