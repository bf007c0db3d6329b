use crate::backend::{ContentError, Query};
use crate::content::ContentClient;
use crate::models::ContactMessage;
use tracing::error;

/// Messages shown per inbox page.
pub const PAGE_SIZE: usize = 10;

/// Highest page number whose offset still fits in a `usize`.
const LAST_ADDRESSABLE_PAGE: usize = usize::MAX / PAGE_SIZE;

/// One page of inbound contact messages.
#[derive(Debug, Clone, PartialEq)]
pub struct InboxPage {
    pub messages: Vec<ContactMessage>,
    /// 1-based
    pub page: usize,
    /// Never less than 1, even for an empty inbox
    pub total_pages: usize,
    pub total: usize,
}

impl InboxPage {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Read-only view of messages sent through the public contact form.
pub struct ContactsInbox {
    content: ContentClient,
}

impl ContactsInbox {
    pub fn new(content: ContentClient) -> Self {
        Self { content }
    }

    /// Page `page` (1-based, anything lower reads as 1), newest first.
    /// Pages past the end come back empty.
    pub async fn page(&self, page: usize) -> Result<InboxPage, ContentError> {
        let page = page.clamp(1, LAST_ADDRESSABLE_PAGE);
        let query = Query::new()
            .order_desc("created_at")
            .range((page - 1) * PAGE_SIZE, PAGE_SIZE)
            .with_count();

        let result = self
            .content
            .list_page::<ContactMessage>(query)
            .await
            .inspect_err(|e| error!("Error fetching contacts: {}", e))?;

        let total = result.total.unwrap_or(result.rows.len());
        Ok(InboxPage {
            messages: result.rows,
            page,
            total_pages: total.div_ceil(PAGE_SIZE).max(1),
            total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use crate::models::Table;
    use serde_json::json;
    use std::sync::Arc;

    fn setup(messages: usize) -> (MemoryBackend, ContactsInbox) {
        let backend = MemoryBackend::new();
        for n in 0..messages {
            backend.seed(
                Table::Contacts,
                json!({"name": format!("Sender {n}"), "email": "a@b.mn", "content": "Hello"}),
            );
        }
        let inbox = ContactsInbox::new(ContentClient::new(Arc::new(backend.clone())));
        (backend, inbox)
    }

    #[tokio::test]
    async fn test_empty_inbox_has_one_page() {
        let (_, inbox) = setup(0);
        let page = inbox.page(1).await.unwrap();
        assert!(page.messages.is_empty());
        assert_eq!(page.total_pages, 1);
        assert!(!page.has_next());
        assert!(!page.has_previous());
    }

    #[tokio::test]
    async fn test_pages_newest_first() {
        let (_, inbox) = setup(23);

        let first = inbox.page(1).await.unwrap();
        assert_eq!(first.messages.len(), PAGE_SIZE);
        assert_eq!(first.messages[0].name, "Sender 22");
        assert_eq!(first.total, 23);
        assert_eq!(first.total_pages, 3);
        assert!(first.has_next());

        let last = inbox.page(3).await.unwrap();
        assert_eq!(last.messages.len(), 3);
        assert_eq!(last.messages[2].name, "Sender 0");
        assert!(!last.has_next());
    }

    #[tokio::test]
    async fn test_page_zero_reads_as_first() {
        let (_, inbox) = setup(2);
        let page = inbox.page(0).await.unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.messages.len(), 2);
    }

    #[tokio::test]
    async fn test_huge_page_number_is_empty() {
        let (_, inbox) = setup(3);
        let page = inbox.page(usize::MAX).await.unwrap();
        assert!(page.messages.is_empty());
        assert_eq!(page.page, LAST_ADDRESSABLE_PAGE);
        assert_eq!(page.total, 3);
        assert!(!page.has_next());
    }

    #[tokio::test]
    async fn test_read_failure() {
        let (backend, inbox) = setup(1);
        backend.fail_reads_from(Table::Contacts, true);
        assert!(inbox.page(1).await.is_err());
    }
}
