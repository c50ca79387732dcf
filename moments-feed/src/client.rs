//! Moments REST client
//!
//! Thin typed wrapper around the moments backend. Each call builds its URL
//! from the configured base plus a resource path, issues exactly one request
//! and hands the parsed JSON back to the caller.
//!
//! # Behaviour
//! - No retry, no timeout, no backoff. Failures go straight to the caller.
//! - Non-2xx → [`ClientError::Status`], network failure →
//!   [`ClientError::Transport`]; both display as `Failed to <action>`.
//! - Write calls attach `Authorization: Bearer <token>` only when the client
//!   was built with a [`Credential`]. The backend is the sole enforcer of
//!   access control.
//!
//! # Example
//! ```rust,ignore
//! use moments_feed::client::{Credential, MomentsClient};
//! use moments_feed::query::MomentQuery;
//!
//! let client = MomentsClient::new("http://localhost:8000/api", Some(Credential::bearer("token")))?;
//! let envelope = client.list_moments(&MomentQuery::page(1, 10)).await?;
//! ```

use crate::api::MomentsApi;
use crate::error::{ClientError, ClientResult};
use crate::query::MomentQuery;
use async_trait::async_trait;
use moments_common::{
    ApiResponse, LikeResult, MomentComment, MomentListEnvelope, MomentUpdate, MusicMoment,
    NewComment, NewMoment,
};
use reqwest::{header, Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use tracing::{debug, warn};

/// User-Agent header sent with every request
const USER_AGENT: &str = concat!("moments-feed/", env!("CARGO_PKG_VERSION"));

/// Bearer token for the admin endpoints
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    token: String,
}

impl Credential {
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    fn header_value(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// HTTP implementation of [`MomentsApi`]
#[derive(Debug, Clone)]
pub struct MomentsClient {
    /// HTTP client for API requests
    http_client: Client,
    /// Base URL, e.g. `http://localhost:8000/api`
    base_url: Url,
    /// Admin credential, if any
    credential: Option<Credential>,
}

impl MomentsClient {
    /// Create a client for `base_url`
    ///
    /// # Errors
    /// Returns [`ClientError::Url`] if `base_url` is not an absolute
    /// http(s) URL that can carry path segments.
    pub fn new(base_url: &str, credential: Option<Credential>) -> ClientResult<Self> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| ClientError::Url(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Url(base_url.to_string()));
        }

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(USER_AGENT),
        );

        let http_client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ClientError::Url(format!("HTTP client setup failed: {}", e)))?;

        if credential.is_none() {
            debug!("Moments client created without credential; admin calls will be rejected");
        }

        Ok(Self {
            http_client,
            base_url,
            credential,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    /// Base URL extended with percent-encoded path segments
    fn endpoint(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::Url(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Attach the bearer header when a credential is held
    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.credential {
            Some(credential) => builder.header(header::AUTHORIZATION, credential.header_value()),
            None => builder,
        }
    }

    /// Send once, check status, decode JSON
    async fn execute<T: DeserializeOwned>(
        &self,
        action: &'static str,
        builder: RequestBuilder,
    ) -> ClientResult<T> {
        let response = builder
            .send()
            .await
            .map_err(|source| {
                warn!(action, error = %source, "Moments request failed");
                ClientError::Transport { action, source }
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(action, %status, "Moments backend returned error status");
            return Err(ClientError::Status { action, status });
        }

        response
            .json::<T>()
            .await
            .map_err(|source| ClientError::Decode { action, source })
    }

    async fn get<T: DeserializeOwned>(
        &self,
        action: &'static str,
        segments: &[&str],
    ) -> ClientResult<T> {
        let url = self.endpoint(segments)?;
        debug!(%url, "GET");
        self.execute(action, self.http_client.get(url)).await
    }

    async fn admin<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        action: &'static str,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
    ) -> ClientResult<T> {
        let url = self.endpoint(segments)?;
        debug!(%method, %url, authorized = self.has_credential(), "admin request");

        let mut builder = self.authorized(self.http_client.request(method, url));
        builder = match body {
            Some(body) => builder.json(body),
            None => builder.header(header::CONTENT_TYPE, "application/json"),
        };
        self.execute(action, builder).await
    }
}

#[async_trait]
impl MomentsApi for MomentsClient {
    async fn list_moments(&self, query: &MomentQuery) -> ClientResult<MomentListEnvelope> {
        let url = self.endpoint(&["moments"])?;
        debug!(%url, query = %query, "GET moments");
        let builder = self.http_client.get(url).query(&query.to_pairs());
        self.execute("fetch moments", builder).await
    }

    async fn get_moment(&self, id: &str) -> ClientResult<MusicMoment> {
        self.get("fetch moment", &["moments", id]).await
    }

    async fn song_moment(&self, song_id: &str) -> ClientResult<ApiResponse<MusicMoment>> {
        self.get("fetch song moment", &["songs", song_id, "moment"])
            .await
    }

    async fn like_moment(&self, id: &str) -> ClientResult<ApiResponse<LikeResult>> {
        let url = self.endpoint(&["moments", id, "like"])?;
        debug!(%url, "POST like");
        self.execute("like moment", self.http_client.post(url)).await
    }

    async fn create_moment(&self, moment: &NewMoment) -> ClientResult<ApiResponse<MusicMoment>> {
        self.admin(
            "create moment",
            Method::POST,
            &["admin", "moments"],
            Some(moment),
        )
        .await
    }

    async fn update_moment(
        &self,
        id: &str,
        update: &MomentUpdate,
    ) -> ClientResult<ApiResponse<MusicMoment>> {
        self.admin(
            "update moment",
            Method::PUT,
            &["admin", "moments", id],
            Some(update),
        )
        .await
    }

    async fn delete_moment(&self, id: &str) -> ClientResult<ApiResponse<Value>> {
        self.admin::<Value, _>(
            "delete moment",
            Method::DELETE,
            &["admin", "moments", id],
            None,
        )
        .await
    }

    async fn add_comment(
        &self,
        moment_id: &str,
        comment: &NewComment,
    ) -> ClientResult<ApiResponse<MomentComment>> {
        self.admin(
            "add comment",
            Method::POST,
            &["admin", "moments", moment_id, "comments"],
            Some(comment),
        )
        .await
    }

    async fn delete_comment(
        &self,
        moment_id: &str,
        comment_id: &str,
    ) -> ClientResult<ApiResponse<Value>> {
        self.admin::<Value, _>(
            "delete comment",
            Method::DELETE,
            &["admin", "moments", moment_id, "comments", comment_id],
            None,
        )
        .await
    }

    async fn filter_tags(&self) -> ClientResult<ApiResponse<Vec<String>>> {
        self.get("fetch tags", &["moments", "filters", "tags"]).await
    }

    async fn filter_years(&self) -> ClientResult<ApiResponse<Vec<i32>>> {
        self.get("fetch years", &["moments", "filters", "years"]).await
    }

    async fn filter_periods(&self) -> ClientResult<ApiResponse<Vec<String>>> {
        self.get("fetch periods", &["moments", "filters", "periods"])
            .await
    }
}
