// ── MCP Connect SDK: Configuration ──────────────────────────────────────────
// Every entry point takes an explicit `SdkConfig`. Defaults are applied at
// construction time; there is no module-level mutable configuration.

use std::time::Duration;

/// Default registry API base URL (local development registry).
pub const DEFAULT_REGISTRY_URL: &str = "http://localhost:3000/api/v1";

/// Default per-request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// SDK configuration shared by every entry point.
#[derive(Debug, Clone)]
pub struct SdkConfig {
    /// Registry API base URL.
    pub registry_url: String,
    /// Per-request millisecond budget. Applies to registry lookups and
    /// tool invocations alike. There is no mid-flight cancellation.
    pub timeout: Duration,
    /// Bearer credential sent as `Authorization: Bearer <key>` on registry
    /// and tool-server requests when present.
    pub api_key: Option<String>,
}

impl Default for SdkConfig {
    fn default() -> Self {
        SdkConfig {
            registry_url: DEFAULT_REGISTRY_URL.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            api_key: None,
        }
    }
}

impl SdkConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the registry base URL.
    pub fn with_registry_url(mut self, url: impl Into<String>) -> Self {
        self.registry_url = url.into();
        self
    }

    /// Override the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the bearer credential.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = SdkConfig::default();
        assert_eq!(cfg.registry_url, DEFAULT_REGISTRY_URL);
        assert_eq!(cfg.timeout, Duration::from_millis(10_000));
        assert!(cfg.api_key.is_none());
    }

    #[test]
    fn builder_overrides() {
        let cfg = SdkConfig::new()
            .with_registry_url("https://registry.example/api/v1")
            .with_timeout(Duration::from_secs(5))
            .with_api_key("sk_test");
        assert_eq!(cfg.registry_url, "https://registry.example/api/v1");
        assert_eq!(cfg.timeout, Duration::from_secs(5));
        assert_eq!(cfg.api_key.as_deref(), Some("sk_test"));
    }
}
