//! Hosted backend client.
//!
//! Talks to three HTTP surfaces under one base URL:
//! - `/rest/v1/{table}`: row queries and writes
//! - `/storage/v1/object/...`: bucket uploads, removals and public URLs
//! - `/auth/v1/...`: password sign-in, user lookup and sign-out
//!
//! Every request carries the project's public key as `apikey`. The bearer
//! token is the public key for anonymous access and the admin's access token
//! once `with_session` has been applied.

use crate::backend::{AuthBackend, AuthUser, ContentBackend, ContentError, Page, Query, Session};
use crate::config::Config;
use crate::models::{Bucket, Table};
use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct SupabaseBackend {
    client: reqwest::Client,
    base_url: String,
    anon_key: String,
    bearer: String,
}

#[derive(Debug, Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    user: AuthUser,
}

#[derive(Debug, Serialize)]
struct RemoveObjects<'a> {
    prefixes: &'a [String],
}

impl SupabaseBackend {
    pub fn new(base_url: &str, anon_key: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
            bearer: anon_key.to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.supabase_url, &config.supabase_anon_key)
    }

    fn rest_url(&self, table: Table) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn object_url(&self, bucket: Bucket, path: &str) -> String {
        format!("{}/storage/v1/object/{}/{}", self.base_url, bucket, path)
    }

    fn auth_url(&self, endpoint: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, endpoint)
    }

    fn authorized(&self, request: RequestBuilder, bearer: &str) -> RequestBuilder {
        request
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", bearer))
    }

    /// Turn a non-success status into `ContentError::Status`.
    async fn check(response: Response, context: String) -> Result<Response, ContentError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Err(ContentError::Status {
            status,
            context,
            body,
        })
    }

    async fn rows(response: Response, table: Table) -> Result<Vec<Value>, ContentError> {
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|source| ContentError::Decode {
            table: table.as_str(),
            source,
        })
    }
}

/// Total from a `Content-Range` header such as `0-9/42` or `*/0`.
fn parse_total(content_range: &str) -> Option<usize> {
    content_range.rsplit_once('/')?.1.parse().ok()
}

#[async_trait]
impl ContentBackend for SupabaseBackend {
    async fn select(&self, table: Table, query: &Query) -> Result<Page<Value>, ContentError> {
        debug!("Selecting from {} with {:?}", table, query.to_params());

        let mut request = self
            .authorized(self.client.get(self.rest_url(table)), &self.bearer)
            .query(&query.to_params());
        if query.wants_count() {
            request = request.header("Prefer", "count=exact");
        }

        let response = Self::check(request.send().await?, format!("select {}", table)).await?;

        let total = if query.wants_count() {
            response
                .headers()
                .get("content-range")
                .and_then(|v| v.to_str().ok())
                .and_then(parse_total)
        } else {
            None
        };

        let rows = Self::rows(response, table).await?;
        Ok(Page { rows, total })
    }

    async fn insert(&self, table: Table, row: Value) -> Result<Value, ContentError> {
        let request = self
            .authorized(self.client.post(self.rest_url(table)), &self.bearer)
            .header("Prefer", "return=representation")
            .json(&row);

        let response = Self::check(request.send().await?, format!("insert {}", table)).await?;

        Self::rows(response, table)
            .await?
            .into_iter()
            .next()
            .ok_or(ContentError::MissingRow(table.as_str()))
    }

    async fn update(
        &self,
        table: Table,
        id: &str,
        patch: Value,
    ) -> Result<Option<Value>, ContentError> {
        let request = self
            .authorized(self.client.patch(self.rest_url(table)), &self.bearer)
            .query(&[("id", format!("eq.{}", id))])
            .header("Prefer", "return=representation")
            .json(&patch);

        let response = Self::check(request.send().await?, format!("update {}", table)).await?;

        Ok(Self::rows(response, table).await?.into_iter().next())
    }

    async fn delete(&self, table: Table, id: &str) -> Result<(), ContentError> {
        let request = self
            .authorized(self.client.delete(self.rest_url(table)), &self.bearer)
            .query(&[("id", format!("eq.{}", id))]);

        Self::check(request.send().await?, format!("delete {}", table)).await?;
        Ok(())
    }

    async fn upload(
        &self,
        bucket: Bucket,
        path: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<(), ContentError> {
        let request = self
            .authorized(self.client.post(self.object_url(bucket, path)), &self.bearer)
            .header("Content-Type", content_type)
            .header("x-upsert", "false")
            .body(bytes);

        Self::check(request.send().await?, format!("upload {}/{}", bucket, path)).await?;
        Ok(())
    }

    async fn remove(&self, bucket: Bucket, paths: &[String]) -> Result<(), ContentError> {
        if paths.is_empty() {
            return Ok(());
        }

        let request = self
            .authorized(
                self.client
                    .delete(format!("{}/storage/v1/object/{}", self.base_url, bucket)),
                &self.bearer,
            )
            .json(&RemoveObjects { prefixes: paths });

        Self::check(request.send().await?, format!("remove from {}", bucket)).await?;
        Ok(())
    }

    fn public_url(&self, bucket: Bucket, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, bucket, path
        )
    }

    fn with_session(&self, access_token: &str) -> Arc<dyn ContentBackend> {
        Arc::new(Self {
            bearer: access_token.to_string(),
            ..self.clone()
        })
    }
}

#[async_trait]
impl AuthBackend for SupabaseBackend {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Option<Session>, ContentError> {
        let request = self
            .authorized(self.client.post(self.auth_url("token")), &self.anon_key)
            .query(&[("grant_type", "password")])
            .json(&PasswordGrant { email, password });

        let response = request.send().await?;
        if matches!(
            response.status(),
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED
        ) {
            return Ok(None);
        }

        let response = Self::check(response, "sign in".to_string()).await?;
        let body = response.bytes().await?;
        let token: TokenResponse =
            serde_json::from_slice(&body).map_err(|source| ContentError::Decode {
                table: "auth token",
                source,
            })?;

        Ok(Some(Session {
            access_token: token.access_token,
            user: token.user,
        }))
    }

    async fn user(&self, access_token: &str) -> Result<Option<AuthUser>, ContentError> {
        let request = self.authorized(self.client.get(self.auth_url("user")), access_token);

        let response = request.send().await?;
        if matches!(
            response.status(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            return Ok(None);
        }

        let response = Self::check(response, "user lookup".to_string()).await?;
        let body = response.bytes().await?;
        let user = serde_json::from_slice(&body).map_err(|source| ContentError::Decode {
            table: "auth user",
            source,
        })?;
        Ok(Some(user))
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), ContentError> {
        let request = self.authorized(self.client.post(self.auth_url("logout")), access_token);
        let response = request.send().await?;

        // An already-expired token is as good as signed out.
        if response.status() == StatusCode::UNAUTHORIZED {
            return Ok(());
        }
        Self::check(response, "sign out".to_string()).await?;
        Ok(())
    }
}
