//! Storage seam: record collections, object buckets and authentication.
//!
//! Everything the site persists lives in a hosted backend. The traits here
//! are the narrow contract the rest of the crate depends on, so the provider
//! can be swapped.
//!
//! - `supabase`: HTTP implementation for the hosted backend
//! - `memory`: in-process implementation with failure injection

pub mod memory;
pub mod supabase;

pub use memory::MemoryBackend;
pub use supabase::SupabaseBackend;

use crate::models::{Bucket, Table};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

/// Failures talking to the backend.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("Request to backend failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Backend returned {status} for {context}: {body}")]
    Status {
        status: u16,
        context: String,
        body: String,
    },

    #[error("Failed to decode {table} row: {source}")]
    Decode {
        table: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Backend returned no row for {0}")]
    MissingRow(&'static str),

    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid request: {0}")]
    Invalid(String),
}

/// Comparison used by a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Neq,
}

impl FilterOp {
    fn as_str(&self) -> &'static str {
        match self {
            FilterOp::Eq => "eq",
            FilterOp::Neq => "neq",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: String,
    pub op: FilterOp,
    pub value: Value,
}

impl Filter {
    /// Whether a row satisfies this filter. A missing column compares as null.
    pub fn matches(&self, row: &Value) -> bool {
        let actual = row.get(&self.column).unwrap_or(&Value::Null);
        let equal = actual == &self.value;
        match self.op {
            FilterOp::Eq => equal,
            FilterOp::Neq => !equal,
        }
    }

    /// `op.value` as the REST interface expects it.
    fn encoded(&self) -> String {
        let value = match &self.value {
            Value::String(s) => s.clone(),
            Value::Null => "null".to_string(),
            other => other.to_string(),
        };
        format!("{}.{}", self.op.as_str(), value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub column: String,
    pub ascending: bool,
}

/// Row selection: filters, ordering, window and count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    filters: Vec<Filter>,
    order: Vec<Order>,
    range: Option<(usize, usize)>,
    count: bool,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.filters.push(Filter {
            column: column.to_string(),
            op: FilterOp::Eq,
            value: value.into(),
        });
        self
    }

    pub fn neq(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.filters.push(Filter {
            column: column.to_string(),
            op: FilterOp::Neq,
            value: value.into(),
        });
        self
    }

    pub fn order_asc(mut self, column: &str) -> Self {
        self.order.push(Order {
            column: column.to_string(),
            ascending: true,
        });
        self
    }

    pub fn order_desc(mut self, column: &str) -> Self {
        self.order.push(Order {
            column: column.to_string(),
            ascending: false,
        });
        self
    }

    /// Return at most `limit` rows starting at `offset`.
    pub fn range(mut self, offset: usize, limit: usize) -> Self {
        self.range = Some((offset, limit));
        self
    }

    pub fn limit(self, limit: usize) -> Self {
        self.range(0, limit)
    }

    /// Ask for the total number of matching rows alongside the window.
    pub fn with_count(mut self) -> Self {
        self.count = true;
        self
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn ordering(&self) -> &[Order] {
        &self.order
    }

    pub fn window(&self) -> Option<(usize, usize)> {
        self.range
    }

    pub fn wants_count(&self) -> bool {
        self.count
    }

    /// Query string parameters for the REST interface.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("select".to_string(), "*".to_string())];

        for filter in &self.filters {
            params.push((filter.column.clone(), filter.encoded()));
        }

        if !self.order.is_empty() {
            let order = self
                .order
                .iter()
                .map(|o| format!("{}.{}", o.column, if o.ascending { "asc" } else { "desc" }))
                .collect::<Vec<_>>()
                .join(",");
            params.push(("order".to_string(), order));
        }

        if let Some((offset, limit)) = self.range {
            params.push(("offset".to_string(), offset.to_string()));
            params.push(("limit".to_string(), limit.to_string()));
        }

        params
    }
}

/// One window of rows plus the total when it was requested.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub rows: Vec<T>,
    pub total: Option<usize>,
}

/// Record collections and object buckets.
///
/// Rows travel as JSON objects; typing happens one layer up in
/// `content::ContentClient`.
#[async_trait]
pub trait ContentBackend: Send + Sync {
    async fn select(&self, table: Table, query: &Query) -> Result<Page<Value>, ContentError>;

    /// Insert one row and return it as stored.
    async fn insert(&self, table: Table, row: Value) -> Result<Value, ContentError>;

    /// Patch the row with `id`. `Ok(None)` when no row matched.
    async fn update(&self, table: Table, id: &str, patch: Value)
        -> Result<Option<Value>, ContentError>;

    /// Delete the row with `id`. Deleting a missing row is not an error.
    async fn delete(&self, table: Table, id: &str) -> Result<(), ContentError>;

    async fn upload(
        &self,
        bucket: Bucket,
        path: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<(), ContentError>;

    async fn remove(&self, bucket: Bucket, paths: &[String]) -> Result<(), ContentError>;

    fn public_url(&self, bucket: Bucket, path: &str) -> String;

    /// The same backend acting on behalf of a signed-in user.
    fn with_session(&self, access_token: &str) -> Arc<dyn ContentBackend>;
}

/// The signed-in account as reported by the auth provider.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub access_token: String,
    pub user: AuthUser,
}

/// Password authentication against the hosted provider.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// `Ok(None)` for wrong credentials.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Option<Session>, ContentError>;

    /// `Ok(None)` when the token is unknown or expired.
    async fn user(&self, access_token: &str) -> Result<Option<AuthUser>, ContentError>;

    async fn sign_out(&self, access_token: &str) -> Result<(), ContentError>;
}
