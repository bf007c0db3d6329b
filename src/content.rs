//! Typed content client over a `ContentBackend`.
//!
//! Converts between record structs and backend rows, names uploaded objects,
//! and stamps `updated_at` on records that track it.

use crate::backend::{ContentBackend, ContentError, Page, Query};
use crate::models::{Bucket, Record};
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// A file received from a form, ready to store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(file_name: &str, content_type: &str, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.to_string(),
            content_type: content_type.to_string(),
            bytes,
        }
    }
}

/// Collision-resistant object name: `<unix-millis>-<uuid>.<ext>`.
///
/// Only the original extension survives, lower-cased; files without one get
/// `bin`.
pub fn generate_object_name(original: &str) -> String {
    let ext = original
        .rsplit_once('.')
        .map(|(stem, ext)| (stem, ext.trim()))
        .filter(|(stem, ext)| !stem.is_empty() && !ext.is_empty())
        .filter(|(_, ext)| ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_else(|| "bin".to_string());

    format!(
        "{}-{}.{}",
        Utc::now().timestamp_millis(),
        uuid::Uuid::new_v4(),
        ext
    )
}

#[derive(Clone)]
pub struct ContentClient {
    backend: Arc<dyn ContentBackend>,
}

impl ContentClient {
    pub fn new(backend: Arc<dyn ContentBackend>) -> Self {
        Self { backend }
    }

    /// The same client acting for a signed-in admin.
    pub fn with_session(&self, access_token: &str) -> Self {
        Self {
            backend: self.backend.with_session(access_token),
        }
    }

    fn decode<R: Record>(row: Value) -> Result<R, ContentError> {
        serde_json::from_value(row).map_err(|source| ContentError::Decode {
            table: R::TABLE.as_str(),
            source,
        })
    }

    fn encode<T: Serialize>(table: &'static str, value: &T) -> Result<Value, ContentError> {
        serde_json::to_value(value).map_err(|source| ContentError::Decode { table, source })
    }

    /// All records matching the query, in the order the backend returns them.
    pub async fn list<R: Record>(&self, query: Query) -> Result<Vec<R>, ContentError> {
        Ok(self.list_page(query).await?.rows)
    }

    /// One window of records, with the total when the query asks for it.
    pub async fn list_page<R: Record>(&self, query: Query) -> Result<Page<R>, ContentError> {
        let page = self.backend.select(R::TABLE, &query).await?;
        debug!("Fetched {} {} rows", page.rows.len(), R::TABLE);

        let rows = page
            .rows
            .into_iter()
            .map(Self::decode::<R>)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page {
            rows,
            total: page.total,
        })
    }

    /// Record by id. A missing record is `Ok(None)`.
    pub async fn get<R: Record>(&self, id: &str) -> Result<Option<R>, ContentError> {
        self.find_one(Query::new().eq("id", id)).await
    }

    /// First record matching the query, if any.
    pub async fn find_one<R: Record>(&self, query: Query) -> Result<Option<R>, ContentError> {
        let page = self.backend.select(R::TABLE, &query.limit(1)).await?;
        page.rows.into_iter().next().map(Self::decode::<R>).transpose()
    }

    pub async fn create<R: Record>(&self, draft: &R::Draft) -> Result<R, ContentError> {
        let row = Self::encode(R::TABLE.as_str(), draft)?;
        let stored = self.backend.insert(R::TABLE, row).await?;
        Self::decode(stored)
    }

    /// Overwrite the record's writable fields. `Ok(None)` when it no longer exists.
    pub async fn update<R: Record>(
        &self,
        id: &str,
        draft: &R::Draft,
    ) -> Result<Option<R>, ContentError> {
        let mut patch = Self::encode(R::TABLE.as_str(), draft)?;
        if R::TRACKS_UPDATES {
            if let Value::Object(fields) = &mut patch {
                fields.insert("updated_at".to_string(), Value::String(Utc::now().to_rfc3339()));
            }
        }

        self.backend
            .update(R::TABLE, id, patch)
            .await?
            .map(Self::decode)
            .transpose()
    }

    pub async fn delete<R: Record>(&self, id: &str) -> Result<(), ContentError> {
        self.backend.delete(R::TABLE, id).await
    }

    /// Store a file under a generated name and return that name.
    pub async fn upload(&self, bucket: Bucket, upload: &Upload) -> Result<String, ContentError> {
        let path = generate_object_name(&upload.file_name);
        self.backend
            .upload(bucket, &path, &upload.content_type, upload.bytes.clone())
            .await?;
        debug!("Stored {} as {}/{}", upload.file_name, bucket, path);
        Ok(path)
    }

    pub async fn remove(&self, bucket: Bucket, paths: &[String]) -> Result<(), ContentError> {
        self.backend.remove(bucket, paths).await
    }

    pub fn public_url(&self, bucket: Bucket, path: &str) -> String {
        self.backend.public_url(bucket, path)
    }
}
