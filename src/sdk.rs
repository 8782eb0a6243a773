// ── MCP Connect SDK: Entry Points ───────────────────────────────────────────
// Top-level orchestration: resolve a package to its endpoint, bind an HTTP
// transport to a fresh client, and hand the client back. Plus the legacy
// direct-URL path, which skips the registry entirely, and the `Sdk` facade
// that carries one configuration across all of it.

use log::info;
use reqwest::Client as HttpClient;
use serde_json::Value;

use crate::client::Client;
use crate::config::SdkConfig;
use crate::error::{SdkError, SdkResult};
use crate::registry::{HttpRegistry, PackageRegistry};
use crate::resolver;
use crate::transport::HttpTransport;
use crate::types::{CreatePackageRequest, PackageRecord, SearchResult};

// ── Registry-resolved connect ───────────────────────────────────────────────

/// Connect to a package by name: resolve its endpoint through the registry,
/// bind an HTTP transport, and return the connected client.
///
/// Resolution runs fresh on every call — no endpoint caching — so a
/// redeploy is picked up on the next connect. Resolution errors propagate
/// unwrapped.
pub async fn connect(package_name: &str, config: &SdkConfig) -> SdkResult<Client> {
    let registry = HttpRegistry::new(config);
    connect_with_registry(&registry, package_name, config).await
}

/// Same as [`connect`] but against a caller-supplied registry collaborator.
pub async fn connect_with_registry(
    registry: &dyn PackageRegistry,
    package_name: &str,
    config: &SdkConfig,
) -> SdkResult<Client> {
    let endpoint = resolver::resolve(registry, package_name).await?;
    info!("[sdk] Connecting to '{}' at {}", package_name, endpoint);

    let transport = HttpTransport::new(endpoint, config.timeout, config.api_key.clone());
    let mut client = Client::new();
    client.connect(Box::new(transport)).await?;
    Ok(client)
}

// ── Direct invocation (legacy path) ─────────────────────────────────────────

/// A stateless invoker for one caller-specified URL. No registry, no
/// JSON-RPC envelope, no `result` unwrap — the response body comes back
/// as-is. Kept for back-compat with pre-registry tool endpoints.
pub struct DirectTool {
    url: String,
    api_key: Option<String>,
    http: HttpClient,
}

impl DirectTool {
    /// POST `input` as the JSON body and return the decoded response.
    pub async fn invoke(&self, input: Value) -> SdkResult<Value> {
        let mut req = self
            .http
            .post(&self.url)
            .header("Content-Type", "application/json")
            .json(&input);
        if let Some(ref key) = self.api_key {
            req = req.header("Authorization", format!("Bearer {}", key));
        }

        let resp = req.send().await.map_err(|_| SdkError::no_response(""))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SdkError::invocation(
                status.as_u16(),
                status.canonical_reason().unwrap_or_default(),
            ));
        }

        let body = resp.text().await.map_err(|_| SdkError::no_response(""))?;
        Ok(serde_json::from_str(&body).unwrap_or(Value::String(body)))
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

// Manual impl so the bearer credential never lands in debug output.
impl std::fmt::Debug for DirectTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectTool")
            .field("url", &self.url)
            .field("has_api_key", &self.api_key.is_some())
            .finish()
    }
}

/// Build a [`DirectTool`] for an arbitrary URL.
///
/// The URL is validated up front — a malformed URL fails with `InvalidUrl`
/// before any network call is attempted.
pub fn connect_direct(url: &str, config: &SdkConfig) -> SdkResult<DirectTool> {
    if url::Url::parse(url).is_err() {
        return Err(SdkError::InvalidUrl(url.to_string()));
    }

    Ok(DirectTool {
        url: url.to_string(),
        api_key: config.api_key.clone(),
        http: HttpClient::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_default(),
    })
}

// ── Facade ──────────────────────────────────────────────────────────────────

/// Convenience facade carrying one `SdkConfig` across registry lookups and
/// connections. Pure delegation — every method maps 1:1 onto a free
/// function or registry call.
pub struct Sdk {
    config: SdkConfig,
    registry: HttpRegistry,
}

impl Sdk {
    pub fn new(config: SdkConfig) -> Self {
        let registry = HttpRegistry::new(&config);
        Sdk { config, registry }
    }

    pub fn config(&self) -> &SdkConfig {
        &self.config
    }

    /// Resolve and connect to a package by name.
    pub async fn connect(&self, package_name: &str) -> SdkResult<Client> {
        connect_with_registry(&self.registry, package_name, &self.config).await
    }

    /// Build a direct invoker for an arbitrary tool URL.
    pub fn connect_direct(&self, url: &str) -> SdkResult<DirectTool> {
        connect_direct(url, &self.config)
    }

    /// Manually invoke a tool by URL — one-shot direct POST.
    pub async fn invoke(&self, url: &str, input: Value) -> SdkResult<Value> {
        self.connect_direct(url)?.invoke(input).await
    }

    /// Fetch a package's full record (deployments and tools included).
    pub async fn get_package(&self, name: &str) -> SdkResult<PackageRecord> {
        self.registry.get_package(name).await
    }

    /// Search the registry by free-text query and/or tags.
    pub async fn search_packages(
        &self,
        query: Option<&str>,
        tags: &[String],
        limit: u64,
        offset: u64,
    ) -> SdkResult<SearchResult> {
        self.registry.search_packages(query, tags, limit, offset).await
    }

    /// Register a new package. Requires an API key with publish rights.
    pub async fn register_package(
        &self,
        package: &CreatePackageRequest,
    ) -> SdkResult<PackageRecord> {
        self.registry.register_package(package).await
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
