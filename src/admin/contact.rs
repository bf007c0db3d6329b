use crate::admin::{commit, require, write_record, AdminError, SaveOutcome};
use crate::attachments::{remove_superseded, stage};
use crate::backend::{ContentError, Query};
use crate::content::{ContentClient, Upload};
use crate::models::{Bucket, ContactProfile, ContactProfileDraft};
use tracing::{error, info};

const BUCKET: Bucket = Bucket::ContactImages;

/// Submitted contact profile form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub image: Option<Upload>,
}

impl From<&ContactProfile> for ContactForm {
    fn from(profile: &ContactProfile) -> Self {
        Self {
            name: profile.name.clone(),
            email: profile.email.clone(),
            phone: profile.phone.clone(),
            address: profile.address.clone(),
            image: None,
        }
    }
}

/// The company's own contact profile. There is at most one.
pub struct ContactManager {
    content: ContentClient,
}

impl ContactManager {
    pub fn new(content: ContentClient) -> Self {
        Self { content }
    }

    pub async fn load(&self) -> Result<Option<ContactProfile>, ContentError> {
        self.content
            .find_one(Query::new())
            .await
            .inspect_err(|e| error!("Error fetching contact: {}", e))
    }

    pub fn image_url(&self, path: &str) -> String {
        self.content.public_url(BUCKET, path)
    }

    /// Create the profile if none exists yet, otherwise update it.
    pub async fn save(&self, form: ContactForm) -> Result<SaveOutcome<ContactProfile>, AdminError> {
        require(&form.name, "Name")?;
        require(&form.email, "Email")?;
        require(&form.phone, "Phone")?;
        require(&form.address, "Address")?;

        let existing = self.load().await?;
        let staged = stage(&self.content, BUCKET, form.image.as_slice()).await?;
        let previous = existing.as_ref().and_then(|p| p.image_path.clone());

        let draft = ContactProfileDraft {
            name: form.name,
            email: form.email,
            phone: form.phone,
            address: form.address,
            image_path: staged.first().cloned().or_else(|| previous.clone()),
        };

        let replaced = !staged.is_empty();
        let written = write_record(
            &self.content,
            existing.as_ref().map(|p| p.id.as_str()),
            &draft,
        )
        .await;
        let record: ContactProfile =
            commit(&self.content, staged, written, "contact information").await?;

        let orphaned = match previous {
            Some(old) if replaced => remove_superseded(&self.content, BUCKET, vec![old]).await,
            _ => Vec::new(),
        };

        info!("Saved contact information");
        Ok(SaveOutcome { record, orphaned })
    }
}
