// ── MCP Connect SDK: Error Types ────────────────────────────────────────────
// Single canonical error enum for the SDK, built with `thiserror`.
//
// Design rules:
//   • Variants are coarse-grained by failure domain (resolution, transport,
//     client state, registry).
//   • `ToolInvocation` and `NoResponse` are kept distinct so callers can tell
//     "server rejected" apart from "server unreachable".
//   • Timeouts fold into `NoResponse` — the request was sent, nothing came
//     back. There is no dedicated timeout variant.
//   • No variant carries credential material (API keys) in its message.

use thiserror::Error;

// ── Primary error enum ──────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum SdkError {
    /// No usable deployment or source URL exists for the package.
    #[error("No deployment URL found for package '{package}'")]
    EndpointResolution { package: String },

    /// The direct-invocation URL is not a valid absolute URL.
    /// Raised before any network call is attempted.
    #[error("Invalid tool URL: {0}")]
    InvalidUrl(String),

    /// `invoke` was called on a client with no bound transport, or after
    /// `close()`. Programmer error, surfaced immediately.
    #[error("Client is not connected to a transport")]
    NotConnected,

    /// A transport is already bound to this client. A client binds exactly
    /// one transport for its lifetime; rebinding would leak the old one.
    #[error("Client is already connected to a transport")]
    AlreadyConnected,

    /// The tool server answered with a non-2xx status.
    #[error("Tool invocation failed: {status} {status_text}")]
    ToolInvocation { status: u16, status_text: String },

    /// The request was sent but no response arrived (connection refused,
    /// reset, or timed out).
    #[error("Tool invocation failed: No response received{0}")]
    NoResponse(String),

    /// The server sent an event-stream body with no extractable
    /// `data: {...}` JSON payload.
    #[error("Malformed event-stream response: {0}")]
    MalformedResponse(String),

    /// The registry collaborator rejected the request or returned a
    /// `success: false` envelope.
    #[error("Registry error: {0}")]
    Registry(String),

    /// JSON serialization / deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// ── Convenience constructors ────────────────────────────────────────────────

impl SdkError {
    /// Non-2xx status error from a tool server response.
    pub fn invocation(status: u16, status_text: impl Into<String>) -> Self {
        SdkError::ToolInvocation {
            status,
            status_text: status_text.into(),
        }
    }

    /// No-response error, optionally naming the endpoint that went dark.
    pub fn no_response(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        if detail.is_empty() {
            SdkError::NoResponse(String::new())
        } else {
            SdkError::NoResponse(format!(" from {}", detail))
        }
    }
}

// ── Convenience alias ───────────────────────────────────────────────────────

/// All SDK operations return this type.
pub type SdkResult<T> = Result<T, SdkError>;

// ── Tests ───────────────────────────────────────────────────────────────────
