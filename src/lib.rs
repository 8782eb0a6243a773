// ── MCP Connect SDK ─────────────────────────────────────────────────────────
// Client SDK for the MCP Connect registry: resolve a package name to a live
// tool-server endpoint, open a client session, and invoke remote tools over
// JSON-RPC 2.0 on HTTP — plus a legacy direct-URL invocation path.
//
// Typical flow:
//
//   let config = SdkConfig::new().with_api_key("sk_...");
//   let mut client = mcpconnect::connect("text-summarizer", &config).await?;
//   let out = client.invoke("summarize", json!({"text": "hello"})).await?;
//   client.close().await?;

pub mod client;
pub mod config;
pub mod error;
pub mod registry;
pub mod resolver;
pub mod sdk;
pub mod transport;
pub mod types;

pub use client::{classify, CallKind, Client};
pub use config::{SdkConfig, DEFAULT_REGISTRY_URL, DEFAULT_TIMEOUT_MS};
pub use error::{SdkError, SdkResult};
pub use registry::{HttpRegistry, PackageRegistry};
pub use resolver::{resolve, resolve_endpoint};
pub use sdk::{connect, connect_direct, connect_with_registry, DirectTool, Sdk};
pub use transport::{HttpTransport, Transport};
pub use types::{
    ApiEnvelope, CreatePackageRequest, Deployment, DeploymentStatus, PackageRecord, RpcRequest,
    RpcResponse, SearchResult, ToolDef,
};
