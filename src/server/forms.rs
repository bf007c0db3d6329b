//! Multipart admin forms.

use crate::admin::{ContactForm, NewsForm, PartnerForm, ServiceForm};
use crate::content::Upload;
use anyhow::Context as _;
use axum::extract::Multipart;
use std::collections::HashMap;

/// Text fields and files of a submitted form.
#[derive(Debug, Default)]
pub struct FormData {
    fields: HashMap<String, Vec<String>>,
    files: HashMap<String, Vec<Upload>>,
}

impl FormData {
    /// Read the whole body. File inputs left empty by the browser are dropped.
    pub async fn read(mut multipart: Multipart) -> anyhow::Result<Self> {
        let mut form = FormData::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .context("Failed to read multipart form")?
        {
            let name = field.name().unwrap_or("").to_string();
            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let content_type = field
                        .content_type()
                        .unwrap_or("application/octet-stream")
                        .to_string();
                    let bytes = field
                        .bytes()
                        .await
                        .with_context(|| format!("Failed to read file field '{}'", name))?;
                    if file_name.is_empty() || bytes.is_empty() {
                        continue;
                    }
                    form.files.entry(name).or_default().push(Upload::new(
                        &file_name,
                        &content_type,
                        bytes.to_vec(),
                    ));
                }
                None => {
                    let value = field
                        .text()
                        .await
                        .with_context(|| format!("Failed to read field '{}'", name))?;
                    form.fields.entry(name).or_default().push(value);
                }
            }
        }

        Ok(form)
    }

    pub fn text(&self, name: &str) -> String {
        self.fields
            .get(name)
            .and_then(|values| values.first())
            .cloned()
            .unwrap_or_default()
    }

    pub fn texts(&self, name: &str) -> Vec<String> {
        self.fields.get(name).cloned().unwrap_or_default()
    }

    /// Checkbox state: present with any value but "false".
    pub fn flag(&self, name: &str) -> bool {
        self.fields
            .get(name)
            .map(|values| values.iter().any(|v| v != "false"))
            .unwrap_or(false)
    }

    pub fn file(&mut self, name: &str) -> Option<Upload> {
        self.files.get_mut(name).and_then(|files| files.drain(..).next())
    }

    pub fn files(&mut self, name: &str) -> Vec<Upload> {
        self.files.remove(name).unwrap_or_default()
    }

    #[cfg(test)]
    pub fn with_text(mut self, name: &str, value: &str) -> Self {
        self.fields
            .entry(name.to_string())
            .or_default()
            .push(value.to_string());
        self
    }
}

pub fn news_form(mut data: FormData) -> NewsForm {
    NewsForm {
        title: data.text("title"),
        content: data.text("content"),
        cat: data.text("cat"),
        published: data.flag("published"),
        document: data.file("document"),
    }
}

pub fn service_form(mut data: FormData) -> ServiceForm {
    ServiceForm {
        title: data.text("title"),
        description: data.text("description"),
        icon: data.text("icon"),
        active: data.flag("active"),
        documents: data.files("documents"),
        removed_documents: data.texts("remove_document"),
    }
}

/// Unparseable display order falls back to 0, the form's default.
pub fn partner_form(mut data: FormData) -> PartnerForm {
    PartnerForm {
        name: data.text("name"),
        description: data.text("description"),
        website: data.text("website"),
        order_index: data.text("order_index").trim().parse().unwrap_or(0),
        logo: data.file("logo"),
    }
}

pub fn contact_form(mut data: FormData) -> ContactForm {
    ContactForm {
        name: data.text("name"),
        email: data.text("email"),
        phone: data.text("phone"),
        address: data.text("address"),
        image: data.file("image"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags() {
        let data = FormData::default()
            .with_text("published", "true")
            .with_text("active", "false");
        assert!(data.flag("published"));
        assert!(!data.flag("active"));
        assert!(!data.flag("missing"));
    }

    #[test]
    fn test_partner_order_index_parsing() {
        let data = FormData::default()
            .with_text("name", "P")
            .with_text("order_index", " 3 ");
        assert_eq!(partner_form(data).order_index, 3);

        let data = FormData::default().with_text("order_index", "abc");
        assert_eq!(partner_form(data).order_index, 0);
    }

    #[test]
    fn test_service_form_collects_removals() {
        let data = FormData::default()
            .with_text("title", "UT")
            .with_text("icon", "Scan")
            .with_text("remove_document", "a.pdf")
            .with_text("remove_document", "b.pdf");
        let form = service_form(data);
        assert_eq!(form.removed_documents, vec!["a.pdf", "b.pdf"]);
        assert!(!form.active);
        assert!(form.documents.is_empty());
    }
}
