// ── MCP Connect SDK: Registry Client ────────────────────────────────────────
// Read-mostly HTTP client for the registry collaborator. The connection
// layer only ever calls `get_package`; search and registration are part of
// the wider SDK surface.
//
// Every registry response arrives wrapped in `{ success, data, message }`
// and is unwrapped here, so callers see plain records or a typed error.

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::config::SdkConfig;
use crate::error::{SdkError, SdkResult};
use crate::types::{ApiEnvelope, CreatePackageRequest, PackageRecord, SearchResult};

// ── Trait seam ──────────────────────────────────────────────────────────────

/// Read-only package lookup. The endpoint resolver depends on this trait,
/// not on the HTTP client, so tests can substitute canned records.
#[async_trait]
pub trait PackageRegistry: Send + Sync {
    async fn get_package(&self, name: &str) -> SdkResult<PackageRecord>;
}

// ── HTTP implementation ─────────────────────────────────────────────────────

/// Registry client bound to one base URL. Holds no state beyond the
/// connection pool; every call is an independent round trip.
pub struct HttpRegistry {
    base_url: String,
    api_key: Option<String>,
    http: Client,
}

impl HttpRegistry {
    pub fn new(config: &SdkConfig) -> Self {
        HttpRegistry {
            base_url: config.registry_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            http: Client::builder()
                .timeout(config.timeout)
                .build()
                .unwrap_or_default(),
        }
    }

    /// Search packages by free-text query and/or tags.
    pub async fn search_packages(
        &self,
        query: Option<&str>,
        tags: &[String],
        limit: u64,
        offset: u64,
    ) -> SdkResult<SearchResult> {
        let url = format!("{}/packages/search", self.base_url);
        debug!("[registry] GET {} q={:?} tags={:?}", url, query, tags);

        let mut req = self
            .http
            .get(&url)
            .query(&[("limit", limit.to_string()), ("offset", offset.to_string())]);
        if let Some(q) = query {
            req = req.query(&[("q", q)]);
        }
        if !tags.is_empty() {
            req = req.query(&[("tags", tags.join(","))]);
        }
        if let Some(ref key) = self.api_key {
            req = req.bearer_auth(key);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| SdkError::Registry(format!("Registry request failed: {}", e)))?;
        decode_envelope(resp).await
    }

    /// Register a new package. Requires an API key with publish rights.
    pub async fn register_package(
        &self,
        package: &CreatePackageRequest,
    ) -> SdkResult<PackageRecord> {
        let url = format!("{}/packages", self.base_url);
        debug!("[registry] POST {} name={}", url, package.name);

        let mut req = self.http.post(&url).json(package);
        if let Some(ref key) = self.api_key {
            req = req.bearer_auth(key);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| SdkError::Registry(format!("Registry request failed: {}", e)))?;
        decode_envelope(resp).await
    }
}

#[async_trait]
impl PackageRegistry for HttpRegistry {
    async fn get_package(&self, name: &str) -> SdkResult<PackageRecord> {
        if name.trim().is_empty() {
            return Err(SdkError::Registry("Package name is required".into()));
        }

        let url = format!(
            "{}/packages/{}",
            self.base_url,
            urlencoding::encode(name)
        );
        debug!("[registry] GET {}", url);

        let mut req = self.http.get(&url);
        if let Some(ref key) = self.api_key {
            req = req.bearer_auth(key);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| SdkError::Registry(format!("Registry request failed: {}", e)))?;
        decode_envelope(resp).await
    }
}

// ── Envelope decode ─────────────────────────────────────────────────────────

/// Unwrap the registry's `{ success, data, message }` envelope, preferring
/// the server's own failure message over a bare status code.
async fn decode_envelope<T: DeserializeOwned>(resp: reqwest::Response) -> SdkResult<T> {
    let status = resp.status();
    let body = resp
        .text()
        .await
        .map_err(|e| SdkError::Registry(format!("Failed to read registry response: {}", e)))?;

    if let Ok(envelope) = serde_json::from_str::<ApiEnvelope<T>>(&body) {
        if envelope.success {
            return envelope
                .data
                .ok_or_else(|| SdkError::Registry("Registry response missing data".into()));
        }
        return Err(SdkError::Registry(envelope.failure_message()));
    }

    if !status.is_success() {
        return Err(SdkError::Registry(format!(
            "Registry returned status {}",
            status
        )));
    }

    // Unwrapped body (older registry builds respond without the envelope).
    serde_json::from_str(&body).map_err(SdkError::Serialization)
}

// ── Tests ───────────────────────────────────────────────────────────────────
