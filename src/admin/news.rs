use crate::admin::{
    commit, delete_with_objects, require, write_record, AdminError, DeleteOutcome, SaveOutcome,
};
use crate::attachments::{remove_superseded, stage};
use crate::backend::{ContentError, Query};
use crate::content::{ContentClient, Upload};
use crate::models::{Bucket, NewsArticle, NewsDraft};
use tracing::{error, info};

const BUCKET: Bucket = Bucket::NewsPdfs;

/// Submitted news form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewsForm {
    pub title: String,
    pub content: String,
    pub cat: String,
    pub published: bool,
    /// Replacement document; `None` keeps the current one
    pub document: Option<Upload>,
}

impl From<&NewsArticle> for NewsForm {
    fn from(article: &NewsArticle) -> Self {
        Self {
            title: article.title.clone(),
            content: article.content.clone(),
            cat: article.cat.clone(),
            published: article.published,
            document: None,
        }
    }
}

pub struct NewsManager {
    content: ContentClient,
}

impl NewsManager {
    pub fn new(content: ContentClient) -> Self {
        Self { content }
    }

    /// Every article, newest first, published or not.
    pub async fn list(&self) -> Result<Vec<NewsArticle>, ContentError> {
        self.content
            .list(Query::new().order_desc("created_at"))
            .await
            .inspect_err(|e| error!("Error fetching news: {}", e))
    }

    pub async fn get(&self, id: &str) -> Result<Option<NewsArticle>, ContentError> {
        self.content
            .get(id)
            .await
            .inspect_err(|e| error!("Error fetching news {}: {}", id, e))
    }

    pub fn document_url(&self, path: &str) -> String {
        self.content.public_url(BUCKET, path)
    }

    /// Create (`existing` is `None`) or update an article.
    ///
    /// A new document is stored before the record is written; the document it
    /// replaces is removed only after the write succeeded.
    pub async fn save(
        &self,
        existing: Option<&NewsArticle>,
        form: NewsForm,
    ) -> Result<SaveOutcome<NewsArticle>, AdminError> {
        require(&form.title, "Title")?;
        require(&form.cat, "Category")?;
        require(&form.content, "Content")?;

        let staged = stage(&self.content, BUCKET, form.document.as_slice()).await?;
        let previous = existing.and_then(|a| a.pdf_file_path.clone());

        let draft = NewsDraft {
            title: form.title,
            content: form.content,
            cat: form.cat,
            pdf_file_path: staged.first().cloned().or_else(|| previous.clone()),
            published: form.published,
        };

        let replaced = !staged.is_empty();
        let written = write_record(&self.content, existing.map(|a| a.id.as_str()), &draft).await;
        let record: NewsArticle = commit(&self.content, staged, written, "news").await?;

        let orphaned = match previous {
            Some(old) if replaced => remove_superseded(&self.content, BUCKET, vec![old]).await,
            _ => Vec::new(),
        };

        info!("Saved news {}", record.id);
        Ok(SaveOutcome { record, orphaned })
    }

    pub async fn delete(&self, article: &NewsArticle) -> Result<DeleteOutcome, AdminError> {
        let paths = article.pdf_file_path.iter().cloned().collect();
        let outcome =
            delete_with_objects::<NewsArticle>(&self.content, &article.id, BUCKET, paths, "news")
                .await?;
        info!("Deleted news {}", article.id);
        Ok(outcome)
    }
}
