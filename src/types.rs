// ── MCP Connect SDK: Wire Types ─────────────────────────────────────────────
// Registry API records and the JSON-RPC 2.0 envelope.
// Field names mirror the registry wire format exactly (snake_case).

use serde::{Deserialize, Serialize};

// ── Registry records ────────────────────────────────────────────────────────

/// A package as returned by the registry's detail endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageRecord {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Top-level fallback URL used when no deployment is active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_api_url: Option<String>,
    /// Second top-level fallback: some registry builds write the deployment
    /// URL straight onto the record instead of the deployments list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub deployments: Vec<Deployment>,
    #[serde(default)]
    pub tools: Vec<ToolDef>,
}

/// One running instance of a package. Lifecycle is owned by the registry;
/// the SDK only reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deployment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub deployment_url: String,
    #[serde(default)]
    pub status: DeploymentStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentStatus {
    Active,
    Inactive,
    Failed,
    /// Forward-compat: statuses this SDK version does not know are never
    /// treated as active.
    #[serde(other)]
    Unknown,
}

impl Default for DeploymentStatus {
    fn default() -> Self {
        DeploymentStatus::Inactive
    }
}

/// A single named remote operation exposed by a deployed package.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_schema: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_schema: Option<serde_json::Value>,
}

/// Payload for registering a new package.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePackageRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_api_url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolDef>,
}

/// Page of results from the registry search endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub packages: Vec<PackageRecord>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

/// The registry API wraps every response in `{ success, data, message }`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    // No `serde(default)` here: it would demand `T: Default` from every
    // caller, and serde already reads a missing `Option` field as `None`.
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// The server's failure detail, preferring `message` over `error`.
    pub fn failure_message(&self) -> String {
        self.message
            .clone()
            .or_else(|| self.error.clone())
            .unwrap_or_else(|| "API request failed".to_string())
    }
}

// ── JSON-RPC 2.0 framing ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcRequest {
    pub jsonrpc: String,
    /// Unique per outgoing request (per-transport monotonic counter).
    /// Never correlated against responses — the HTTP call/response pairing
    /// is the correlation.
    pub id: u64,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<serde_json::Value>,
}

impl RpcRequest {
    pub fn new(id: u64, method: &str, params: Option<serde_json::Value>) -> Self {
        RpcRequest {
            jsonrpc: "2.0".into(),
            id,
            method: method.into(),
            params,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<serde_json::Value>,
}

// ── Tests ───────────────────────────────────────────────────────────────────
