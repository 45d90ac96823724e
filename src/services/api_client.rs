//! Raindrop.io REST gateway.
//!
//! Issues authenticated `GET` requests, drops empty query parameters and
//! classifies non-success statuses into [`ApiError`]. The gateway never
//! notifies the user itself; callers map failures through
//! [`Notification::for_api_error`](crate::types::notification::Notification::for_api_error).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::services::query_composer::RaindropQuery;
use crate::types::collection::{Collection, CollectionsResponse};
use crate::types::errors::ApiError;
use crate::types::raindrop::RaindropsResponse;
use crate::types::settings::ApiSettings;

/// A query parameter; `None` and empty values are left out of the URL.
pub type QueryParam<'a> = (&'a str, Option<String>);

/// Read-only operations against the bookmarking service.
#[async_trait]
pub trait RaindropApi: Send + Sync {
    /// `GET /collections`
    async fn get_root_collections(&self) -> Result<Vec<Collection>, ApiError>;

    /// `GET /collections/childrens`
    async fn get_child_collections(&self) -> Result<Vec<Collection>, ApiError>;

    /// Root collections followed by nested ones, fetched concurrently.
    ///
    /// The two lists are concatenated as-is.
    async fn get_all_collections(&self) -> Result<Vec<Collection>, ApiError> {
        let (mut roots, children) =
            tokio::try_join!(self.get_root_collections(), self.get_child_collections())?;
        roots.extend(children);
        Ok(roots)
    }

    /// `GET /raindrops/{collectionId}` with the composed search parameters.
    async fn get_raindrops(&self, query: &RaindropQuery) -> Result<RaindropsResponse, ApiError>;
}

/// Builds `base_url + endpoint` and appends every parameter with a non-empty value.
pub fn build_url(base_url: &str, endpoint: &str, params: &[QueryParam<'_>]) -> Result<Url, ApiError> {
    let raw = format!("{}{}", base_url.trim_end_matches('/'), endpoint);
    let mut url = Url::parse(&raw).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", raw, e)))?;

    let present: Vec<(&str, &str)> = params
        .iter()
        .filter_map(|(key, value)| {
            value
                .as_deref()
                .filter(|v| !v.is_empty())
                .map(|v| (*key, v))
        })
        .collect();

    // query_pairs_mut() leaves a dangling '?' when nothing is appended.
    if !present.is_empty() {
        url.query_pairs_mut().extend_pairs(present);
    }
    Ok(url)
}

/// HTTP client for the Raindrop.io REST API.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Zeroizing<String>,
}

impl ApiClient {
    /// Creates a client for the configured endpoint and bearer token.
    pub fn new(settings: &ApiSettings) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(concat!("raindrop-search/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: settings.base_url.clone(),
            token: Zeroizing::new(settings.token.clone()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Performs an authenticated `GET` and decodes the JSON body.
    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[QueryParam<'_>],
    ) -> Result<T, ApiError> {
        let url = build_url(&self.base_url, endpoint, params)?;
        let request_id = Uuid::new_v4();
        debug!(%request_id, %url, "GET");

        let response = self
            .http
            .get(url)
            .bearer_auth(self.token.as_str())
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| {
                let err = ApiError::from(e);
                warn!(%request_id, endpoint, error = %err, "request failed");
                err
            })?;

        let status = response.status().as_u16();
        if let Some(err) = ApiError::from_status(status) {
            warn!(%request_id, endpoint, status, "non-success response");
            return Err(err);
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl RaindropApi for ApiClient {
    async fn get_root_collections(&self) -> Result<Vec<Collection>, ApiError> {
        let response: CollectionsResponse = self.request("/collections", &[]).await?;
        Ok(response.items)
    }

    async fn get_child_collections(&self) -> Result<Vec<Collection>, ApiError> {
        let response: CollectionsResponse = self.request("/collections/childrens", &[]).await?;
        Ok(response.items)
    }

    async fn get_raindrops(&self, query: &RaindropQuery) -> Result<RaindropsResponse, ApiError> {
        let endpoint = format!("/raindrops/{}", query.collection_id);
        self.request(&endpoint, &query.to_params()).await
    }
}
