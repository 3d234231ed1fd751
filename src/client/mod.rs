//! Membership REST API client
//!
//! Thin typed wrapper over the backend: searches built from a
//! [`SearchQuery`], member fetch and member update. Failed calls are mapped
//! through the [`status`] table.

pub mod status;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;
use uuid::Uuid;

use flock_types::{MemberKind, MemberRecord, SearchQuery, UpdateMemberRequest};

use crate::config::FlockConfig;
use crate::error::{ApiError, ApiResult};

pub use status::{status_message, StatusMessage, STATUS_MESSAGES};

/// Membership API client
pub struct ApiClient {
    http: Client,
    base_url: Url,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &FlockConfig) -> ApiResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()?;

        let mut base_url = Url::parse(&config.api_url)?;
        // Url::join replaces the last segment unless the base ends in '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            http,
            base_url,
            token: config.api_token.clone(),
        })
    }

    fn url(&self, path: &str) -> ApiResult<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    /// Full request URL for a search, query string included
    pub fn search_url(&self, query: &SearchQuery) -> ApiResult<Url> {
        let mut url = self.url(&query.path())?;
        url.query_pairs_mut().extend_pairs(query.to_query_pairs());
        Ok(url)
    }

    fn member_url(&self, kind: MemberKind, id: Uuid) -> ApiResult<Url> {
        self.url(&format!("{}/{}", kind.resource_path(), id))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let entry = status_message(status.as_u16());
            if entry.requires_logout {
                warn!(status = entry.status, "session rejected by API; logout required");
            } else {
                warn!(status = entry.status, body = %truncate(&body, 200), "API call failed");
            }
            return Err(ApiError::Status {
                status: entry.status,
                message: entry.message,
                requires_logout: entry.requires_logout,
                body,
            });
        }

        Ok(response.json().await?)
    }

    /// Run a search; `T` is the record type of the searched collection
    pub async fn search<T: DeserializeOwned>(&self, query: &SearchQuery) -> ApiResult<Vec<T>> {
        let url = self.search_url(query)?;
        debug!(entity = %query.entity, search_type = %query.search_type, "searching");
        self.send(self.http.get(url)).await
    }

    pub async fn get_member(&self, kind: MemberKind, id: Uuid) -> ApiResult<MemberRecord> {
        let url = self.member_url(kind, id)?;
        self.send(self.http.get(url)).await
    }

    pub async fn update_member(
        &self,
        kind: MemberKind,
        id: Uuid,
        request: &UpdateMemberRequest,
    ) -> ApiResult<MemberRecord> {
        let url = self.member_url(kind, id)?;
        debug!(%kind, member_id = %id, roles = %request.roles, "updating member");
        self.send(self.http.patch(url).json(request)).await
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}
