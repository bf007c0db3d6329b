//! In-process backend.
//!
//! Behaves like the hosted backend as far as the site can tell: filters and
//! ordering are applied on the "server" side, ordering is stable (ties keep
//! insertion order), ids and timestamps are filled on insert, and exact counts
//! are reported on request. Failures can be injected per table and per
//! storage operation.

use crate::backend::{
    AuthBackend, AuthUser, ContentBackend, ContentError, Order, Page, Query, Session,
};
use crate::models::{Bucket, Table};
use crate::security::constant_time_compare;
use async_trait::async_trait;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

const PUBLIC_BASE: &str = "http://storage.memory.local";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug)]
struct Account {
    password: String,
    user: AuthUser,
}

#[derive(Debug, Default)]
struct State {
    tables: HashMap<Table, Vec<Value>>,
    objects: HashMap<(Bucket, String), StoredObject>,
    accounts: HashMap<String, Account>,
    tokens: HashMap<String, AuthUser>,
    last_timestamp: Option<DateTime<Utc>>,

    failing_reads: HashSet<Table>,
    failing_writes: HashSet<Table>,
    /// Uploads left before uploads start failing; `None` = never fail
    uploads_before_failure: Option<usize>,
    fail_removals: bool,
    row_level_security: bool,
}

impl State {
    /// Strictly increasing timestamps so creation order is always observable.
    fn next_timestamp(&mut self) -> String {
        let mut now = Utc::now();
        if let Some(last) = self.last_timestamp {
            if now <= last {
                now = last + Duration::microseconds(1);
            }
        }
        self.last_timestamp = Some(now);
        now.to_rfc3339_opts(SecondsFormat::Micros, true)
    }
}

/// Shared in-memory backend. Clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    state: Arc<Mutex<State>>,
    session: Option<String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Register an admin account for password sign-in.
    pub fn with_admin(self, email: &str, password: &str) -> Self {
        let user = AuthUser {
            id: uuid::Uuid::new_v4().to_string(),
            email: Some(email.to_string()),
        };
        self.state().accounts.insert(
            email.to_string(),
            Account {
                password: password.to_string(),
                user,
            },
        );
        self
    }

    /// Reject writes without a signed-in session, except new contact
    /// messages, which anonymous visitors may insert.
    pub fn with_row_level_security(self) -> Self {
        self.state().row_level_security = true;
        self
    }

    /// Insert a row as-is, filling only what the server would fill.
    pub fn seed(&self, table: Table, row: Value) -> Value {
        let mut state = self.state();
        let row = fill_defaults(&mut state, table, row);
        state.tables.entry(table).or_default().push(row.clone());
        row
    }

    /// Every row of a table in storage order.
    pub fn rows(&self, table: Table) -> Vec<Value> {
        self.state().tables.get(&table).cloned().unwrap_or_default()
    }

    pub fn seed_object(&self, bucket: Bucket, path: &str, bytes: &[u8]) {
        self.state().objects.insert(
            (bucket, path.to_string()),
            StoredObject {
                content_type: "application/octet-stream".to_string(),
                bytes: bytes.to_vec(),
            },
        );
    }

    pub fn object(&self, bucket: Bucket, path: &str) -> Option<StoredObject> {
        self.state().objects.get(&(bucket, path.to_string())).cloned()
    }

    pub fn object_exists(&self, bucket: Bucket, path: &str) -> bool {
        self.object(bucket, path).is_some()
    }

    /// Stored paths in a bucket, sorted.
    pub fn objects_in(&self, bucket: Bucket) -> Vec<String> {
        let mut paths: Vec<String> = self
            .state()
            .objects
            .keys()
            .filter(|(b, _)| *b == bucket)
            .map(|(_, path)| path.clone())
            .collect();
        paths.sort();
        paths
    }

    pub fn fail_reads_from(&self, table: Table, fail: bool) {
        let mut state = self.state();
        if fail {
            state.failing_reads.insert(table);
        } else {
            state.failing_reads.remove(&table);
        }
    }

    pub fn fail_writes_to(&self, table: Table, fail: bool) {
        let mut state = self.state();
        if fail {
            state.failing_writes.insert(table);
        } else {
            state.failing_writes.remove(&table);
        }
    }

    pub fn fail_uploads(&self, fail: bool) {
        self.state().uploads_before_failure = if fail { Some(0) } else { None };
    }

    /// Let `successes` more uploads through, then fail every upload.
    pub fn fail_uploads_after(&self, successes: usize) {
        self.state().uploads_before_failure = Some(successes);
    }

    pub fn fail_object_removal(&self, fail: bool) {
        self.state().fail_removals = fail;
    }

    fn check_write(&self, state: &State, table: Table, inserting: bool) -> Result<(), ContentError> {
        if state.failing_writes.contains(&table) {
            return Err(ContentError::Unavailable(format!("writes to {} are failing", table)));
        }
        let anonymous_allowed = inserting && table == Table::Contacts;
        if state.row_level_security && !anonymous_allowed && !self.has_valid_session(state) {
            return Err(ContentError::Status {
                status: 401,
                context: format!("write {}", table),
                body: "new row violates row-level security policy".to_string(),
            });
        }
        Ok(())
    }

    fn check_storage(&self, state: &State, bucket: Bucket) -> Result<(), ContentError> {
        if state.row_level_security && !self.has_valid_session(state) {
            return Err(ContentError::Status {
                status: 403,
                context: format!("storage {}", bucket),
                body: "Unauthorized".to_string(),
            });
        }
        Ok(())
    }

    fn has_valid_session(&self, state: &State) -> bool {
        self.session
            .as_ref()
            .map(|token| state.tokens.contains_key(token))
            .unwrap_or(false)
    }
}

fn fill_defaults(state: &mut State, table: Table, row: Value) -> Value {
    let mut object = match row {
        Value::Object(map) => map,
        _ => Map::new(),
    };

    object
        .entry("id")
        .or_insert_with(|| Value::String(uuid::Uuid::new_v4().to_string()));

    let needs_created = table.has_created_at() && !object.contains_key("created_at");
    let needs_updated = table.has_updated_at() && !object.contains_key("updated_at");
    if needs_created || needs_updated {
        let now = state.next_timestamp();
        if needs_created {
            object.insert("created_at".to_string(), Value::String(now.clone()));
        }
        if needs_updated {
            let updated = object
                .get("created_at")
                .cloned()
                .unwrap_or(Value::String(now));
            object.insert("updated_at".to_string(), updated);
        }
    }

    Value::Object(object)
}

/// Order two column values the way the database would: numbers numerically,
/// timestamps chronologically, text lexically, nulls after everything.
fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Greater,
        (_, Value::Null) => Ordering::Less,
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(0.0);
            let y = y.as_f64().unwrap_or(0.0);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::String(x), Value::String(y)) => {
            match (
                DateTime::parse_from_rfc3339(x),
                DateTime::parse_from_rfc3339(y),
            ) {
                (Ok(x), Ok(y)) => x.cmp(&y),
                _ => x.cmp(y),
            }
        }
        _ => a.to_string().cmp(&b.to_string()),
    }
}

fn compare_rows(a: &Value, b: &Value, order: &[Order]) -> Ordering {
    for o in order {
        let left = a.get(&o.column).unwrap_or(&Value::Null);
        let right = b.get(&o.column).unwrap_or(&Value::Null);
        let ordering = if o.ascending {
            compare_values(left, right)
        } else {
            compare_values(right, left)
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

#[async_trait]
impl ContentBackend for MemoryBackend {
    async fn select(&self, table: Table, query: &Query) -> Result<Page<Value>, ContentError> {
        let state = self.state();
        if state.failing_reads.contains(&table) {
            return Err(ContentError::Unavailable(format!("reads from {} are failing", table)));
        }

        let mut rows: Vec<Value> = state
            .tables
            .get(&table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| query.filters().iter().all(|f| f.matches(row)))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        // Stable: equal keys keep storage order.
        rows.sort_by(|a, b| compare_rows(a, b, query.ordering()));

        let total = query.wants_count().then_some(rows.len());
        let rows = match query.window() {
            Some((offset, limit)) => rows.into_iter().skip(offset).take(limit).collect(),
            None => rows,
        };

        Ok(Page { rows, total })
    }

    async fn insert(&self, table: Table, row: Value) -> Result<Value, ContentError> {
        if !row.is_object() {
            return Err(ContentError::Invalid(format!("{} row must be an object", table)));
        }
        let mut state = self.state();
        self.check_write(&state, table, true)?;

        let row = fill_defaults(&mut state, table, row);
        state.tables.entry(table).or_default().push(row.clone());
        Ok(row)
    }

    async fn update(
        &self,
        table: Table,
        id: &str,
        patch: Value,
    ) -> Result<Option<Value>, ContentError> {
        let Value::Object(patch) = patch else {
            return Err(ContentError::Invalid(format!("{} patch must be an object", table)));
        };
        let mut state = self.state();
        self.check_write(&state, table, false)?;

        let Some(row) = state
            .tables
            .get_mut(&table)
            .and_then(|rows| rows.iter_mut().find(|row| row["id"] == id))
        else {
            return Ok(None);
        };

        if let Value::Object(fields) = row {
            for (key, value) in patch {
                if key != "id" {
                    fields.insert(key, value);
                }
            }
        }
        Ok(Some(row.clone()))
    }

    async fn delete(&self, table: Table, id: &str) -> Result<(), ContentError> {
        let mut state = self.state();
        self.check_write(&state, table, false)?;

        if let Some(rows) = state.tables.get_mut(&table) {
            rows.retain(|row| row["id"] != id);
        }
        Ok(())
    }

    async fn upload(
        &self,
        bucket: Bucket,
        path: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<(), ContentError> {
        let mut state = self.state();
        self.check_storage(&state, bucket)?;

        match state.uploads_before_failure {
            Some(0) => {
                return Err(ContentError::Unavailable(format!(
                    "uploads to {} are failing",
                    bucket
                )))
            }
            Some(n) => state.uploads_before_failure = Some(n - 1),
            None => {}
        }

        let key = (bucket, path.to_string());
        if state.objects.contains_key(&key) {
            return Err(ContentError::Status {
                status: 409,
                context: format!("upload {}/{}", bucket, path),
                body: "The resource already exists".to_string(),
            });
        }

        state.objects.insert(
            key,
            StoredObject {
                content_type: content_type.to_string(),
                bytes,
            },
        );
        Ok(())
    }

    async fn remove(&self, bucket: Bucket, paths: &[String]) -> Result<(), ContentError> {
        let mut state = self.state();
        self.check_storage(&state, bucket)?;

        if state.fail_removals {
            return Err(ContentError::Unavailable(format!(
                "removals from {} are failing",
                bucket
            )));
        }

        for path in paths {
            state.objects.remove(&(bucket, path.clone()));
        }
        Ok(())
    }

    fn public_url(&self, bucket: Bucket, path: &str) -> String {
        format!("{}/storage/v1/object/public/{}/{}", PUBLIC_BASE, bucket, path)
    }

    fn with_session(&self, access_token: &str) -> Arc<dyn ContentBackend> {
        Arc::new(Self {
            state: Arc::clone(&self.state),
            session: Some(access_token.to_string()),
        })
    }
}

#[async_trait]
impl AuthBackend for MemoryBackend {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Option<Session>, ContentError> {
        let mut state = self.state();

        let user = match state.accounts.get(email) {
            Some(account) if constant_time_compare(&account.password, password) => {
                account.user.clone()
            }
            _ => return Ok(None),
        };

        let access_token = uuid::Uuid::new_v4().to_string();
        state.tokens.insert(access_token.clone(), user.clone());
        Ok(Some(Session { access_token, user }))
    }

    async fn user(&self, access_token: &str) -> Result<Option<AuthUser>, ContentError> {
        Ok(self.state().tokens.get(access_token).cloned())
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), ContentError> {
        self.state().tokens.remove(access_token);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ==================== Select Tests ====================

    #[tokio::test]
    async fn test_filters_apply_before_ordering() {
        let backend = MemoryBackend::new();
        backend.seed(Table::Services, json!({"title": "A", "active": true}));
        backend.seed(Table::Services, json!({"title": "B", "active": false}));
        backend.seed(Table::Services, json!({"title": "C", "active": true}));

        let page = backend
            .select(Table::Services, &Query::new().eq("active", true).order_asc("created_at"))
            .await
            .unwrap();

        let titles: Vec<_> = page.rows.iter().map(|r| r["title"].clone()).collect();
        assert_eq!(titles, vec![json!("A"), json!("C")]);
    }

    #[tokio::test]
    async fn test_ordering_ties_keep_insertion_order() {
        let backend = MemoryBackend::new();
        backend.seed(Table::Partners, json!({"name": "second", "order_index": 2}));
        backend.seed(Table::Partners, json!({"name": "first-a", "order_index": 1}));
        backend.seed(Table::Partners, json!({"name": "first-b", "order_index": 1}));

        let page = backend
            .select(Table::Partners, &Query::new().order_asc("order_index"))
            .await
            .unwrap();

        let names: Vec<_> = page.rows.iter().map(|r| r["name"].clone()).collect();
        assert_eq!(names, vec![json!("first-a"), json!("first-b"), json!("second")]);
    }

    #[tokio::test]
    async fn test_descending_and_window_with_count() {
        let backend = MemoryBackend::new();
        for n in 0..25 {
            backend.seed(Table::Contacts, json!({"name": format!("sender {n}")}));
        }

        let page = backend
            .select(
                Table::Contacts,
                &Query::new().order_desc("created_at").range(20, 10).with_count(),
            )
            .await
            .unwrap();

        assert_eq!(page.total, Some(25));
        assert_eq!(page.rows.len(), 5);
        assert_eq!(page.rows[0]["name"], "sender 4");
        assert_eq!(page.rows[4]["name"], "sender 0");
    }

    #[tokio::test]
    async fn test_failing_reads() {
        let backend = MemoryBackend::new();
        backend.fail_reads_from(Table::News, true);
        assert!(backend.select(Table::News, &Query::new()).await.is_err());

        backend.fail_reads_from(Table::News, false);
        assert!(backend.select(Table::News, &Query::new()).await.is_ok());
    }

    #[test]
    fn test_compare_values_orders_timestamps_chronologically() {
        let earlier = json!("2024-01-15T10:30:00+08:00");
        let later = json!("2024-01-15T03:00:00Z");
        assert_eq!(compare_values(&earlier, &later), Ordering::Less);
    }

    #[test]
    fn test_compare_values_nulls_last() {
        assert_eq!(compare_values(&Value::Null, &json!(1)), Ordering::Greater);
        assert_eq!(compare_values(&json!(1), &json!(2)), Ordering::Less);
    }

    // ==================== Write Tests ====================

    #[tokio::test]
    async fn test_insert_fills_id_and_timestamps() {
        let backend = MemoryBackend::new();
        let row = backend.insert(Table::News, json!({"title": "T"})).await.unwrap();

        assert!(row["id"].is_string());
        assert!(row["created_at"].is_string());
        assert_eq!(row["created_at"], row["updated_at"]);

        let partner = backend.insert(Table::Partners, json!({"name": "P"})).await.unwrap();
        assert!(partner.get("updated_at").is_none());

        let contact = backend.insert(Table::Contact, json!({"name": "C"})).await.unwrap();
        assert!(contact.get("created_at").is_none());
        assert!(contact["updated_at"].is_string());
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let backend = MemoryBackend::new();
        let row = backend.seed(Table::News, json!({"id": "n1", "title": "Old", "cat": "A"}));

        let updated = backend
            .update(Table::News, "n1", json!({"title": "New", "id": "hijack"}))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated["title"], "New");
        assert_eq!(updated["cat"], "A");
        assert_eq!(updated["id"], "n1");
        assert_eq!(updated["created_at"], row["created_at"]);
    }

    #[tokio::test]
    async fn test_update_missing_row() {
        let backend = MemoryBackend::new();
        let result = backend.update(Table::News, "nope", json!({})).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete_and_failing_writes() {
        let backend = MemoryBackend::new();
        backend.seed(Table::News, json!({"id": "n1"}));

        backend.fail_writes_to(Table::News, true);
        assert!(backend.delete(Table::News, "n1").await.is_err());
        assert_eq!(backend.rows(Table::News).len(), 1);

        backend.fail_writes_to(Table::News, false);
        backend.delete(Table::News, "n1").await.unwrap();
        assert!(backend.rows(Table::News).is_empty());
    }

    // ==================== Storage Tests ====================

    #[tokio::test]
    async fn test_upload_and_remove() {
        let backend = MemoryBackend::new();
        backend
            .upload(Bucket::NewsPdfs, "a.pdf", "application/pdf", b"pdf".to_vec())
            .await
            .unwrap();
        assert!(backend.object_exists(Bucket::NewsPdfs, "a.pdf"));
        assert!(!backend.object_exists(Bucket::ServicePdfs, "a.pdf"));

        backend
            .remove(Bucket::NewsPdfs, &["a.pdf".to_string(), "missing.pdf".to_string()])
            .await
            .unwrap();
        assert!(!backend.object_exists(Bucket::NewsPdfs, "a.pdf"));
    }

    #[tokio::test]
    async fn test_duplicate_upload_conflicts() {
        let backend = MemoryBackend::new();
        backend.seed_object(Bucket::PartnerLogos, "logo.png", b"x");
        let err = backend
            .upload(Bucket::PartnerLogos, "logo.png", "image/png", b"y".to_vec())
            .await
            .unwrap_err();
        assert!(matches!(err, ContentError::Status { status: 409, .. }));
    }

    #[tokio::test]
    async fn test_fail_uploads_after() {
        let backend = MemoryBackend::new();
        backend.fail_uploads_after(1);

        assert!(backend
            .upload(Bucket::ServicePdfs, "1.pdf", "application/pdf", vec![])
            .await
            .is_ok());
        assert!(backend
            .upload(Bucket::ServicePdfs, "2.pdf", "application/pdf", vec![])
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_failing_removal_keeps_object() {
        let backend = MemoryBackend::new();
        backend.seed_object(Bucket::NewsPdfs, "a.pdf", b"x");
        backend.fail_object_removal(true);

        assert!(backend.remove(Bucket::NewsPdfs, &["a.pdf".to_string()]).await.is_err());
        assert!(backend.object_exists(Bucket::NewsPdfs, "a.pdf"));
    }

    // ==================== Auth Tests ====================

    #[tokio::test]
    async fn test_sign_in_and_out() {
        let backend = MemoryBackend::new().with_admin("admin@armos.mn", "secret");

        assert!(backend.sign_in("admin@armos.mn", "wrong").await.unwrap().is_none());
        assert!(backend.sign_in("nobody@armos.mn", "secret").await.unwrap().is_none());

        let session = backend.sign_in("admin@armos.mn", "secret").await.unwrap().unwrap();
        let user = backend.user(&session.access_token).await.unwrap().unwrap();
        assert_eq!(user.email.as_deref(), Some("admin@armos.mn"));

        backend.sign_out(&session.access_token).await.unwrap();
        assert!(backend.user(&session.access_token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_row_level_security() {
        let backend = MemoryBackend::new()
            .with_admin("admin@armos.mn", "secret")
            .with_row_level_security();

        assert!(backend.insert(Table::News, json!({"title": "T"})).await.is_err());
        assert!(backend
            .insert(Table::Contacts, json!({"name": "Visitor"}))
            .await
            .is_ok());

        let session = backend.sign_in("admin@armos.mn", "secret").await.unwrap().unwrap();
        let admin = backend.with_session(&session.access_token);
        assert!(admin.insert(Table::News, json!({"title": "T"})).await.is_ok());
        assert!(admin
            .upload(Bucket::NewsPdfs, "a.pdf", "application/pdf", vec![])
            .await
            .is_ok());

        let stale = backend.with_session("forged-token");
        assert!(stale.delete(Table::News, "x").await.is_err());
    }
}
