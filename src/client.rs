// ── MCP Connect SDK: Client ─────────────────────────────────────────────────
// A thin session object: exactly one transport, one `connected` flag, one
// `invoke` entry point. The only decision a call makes is whether the method
// string names a protocol-management call or a tool — classified once, up
// front, as a tagged enum.

use log::debug;
use serde_json::Value;

use crate::error::{SdkError, SdkResult};
use crate::transport::Transport;

// ── Call classification ─────────────────────────────────────────────────────

/// How an `invoke` method string routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    /// The method is a tool name — goes through `tools/call`.
    ToolCall,
    /// The method is a protocol-management call (`tools/list` and friends)
    /// — sent as-is.
    ManagementCall,
}

/// Classify a method string. Purely syntactic: anything under the `tools/`
/// namespace is a management call, every other name is treated as a tool.
pub fn classify(method: &str) -> CallKind {
    if method == "tools/list" || method.starts_with("tools/") {
        CallKind::ManagementCall
    } else {
        CallKind::ToolCall
    }
}

// ── Client ──────────────────────────────────────────────────────────────────

/// A session over one transport.
///
/// Binding is one-shot: a client accepts exactly one transport for its
/// lifetime, and rebinding is an error rather than a silent leak of the
/// previous transport.
pub struct Client {
    transport: Option<Box<dyn Transport>>,
    connected: bool,
}

impl Client {
    pub fn new() -> Self {
        Client {
            transport: None,
            connected: false,
        }
    }

    /// Bind a transport and open it.
    pub async fn connect(&mut self, transport: Box<dyn Transport>) -> SdkResult<()> {
        if self.transport.is_some() {
            return Err(SdkError::AlreadyConnected);
        }
        transport.connect().await?;
        self.transport = Some(transport);
        self.connected = true;
        Ok(())
    }

    /// Invoke a remote operation. `method` is either a tool name or a
    /// `tools/`-namespaced management call.
    pub async fn invoke(&self, method: &str, input: Value) -> SdkResult<Value> {
        let transport = match self.transport {
            Some(ref t) if self.connected => t,
            _ => return Err(SdkError::NotConnected),
        };

        match classify(method) {
            CallKind::ManagementCall => {
                debug!("[client] management call {}", method);
                transport.invoke_raw(method, input).await
            }
            CallKind::ToolCall => {
                debug!("[client] tool call {}", method);
                transport.invoke_tool(method, input).await
            }
        }
    }

    /// Close the session. Idempotent — closing an already-closed client is
    /// a no-op.
    pub async fn close(&mut self) -> SdkResult<()> {
        if let Some(ref transport) = self.transport {
            if self.connected {
                transport.close().await?;
            }
            self.connected = false;
        }
        Ok(())
    }

    pub fn is_connected(&self) -> bool {
        self.connected && self.transport.is_some()
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

// Manual impl: `Box<dyn Transport>` is not `Debug`, so only report whether
// one is bound.
impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("transport_bound", &self.transport.is_some())
            .field("connected", &self.connected)
            .finish()
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn classify_management_calls() {
        assert_eq!(classify("tools/list"), CallKind::ManagementCall);
        assert_eq!(classify("tools/call"), CallKind::ManagementCall);
        assert_eq!(classify("tools/whatever"), CallKind::ManagementCall);
    }

    #[test]
    fn classify_tool_names() {
        assert_eq!(classify("summarize"), CallKind::ToolCall);
        assert_eq!(classify("read_file"), CallKind::ToolCall);
        // Only the `tools/` namespace is management; a bare "tools" is a
        // tool name like any other.
        assert_eq!(classify("tools"), CallKind::ToolCall);
    }

    /// Records which trait method each invoke landed on.
    struct CountingTransport {
        tool_calls: Arc<AtomicUsize>,
        raw_calls: Arc<AtomicUsize>,
        close_calls: Arc<AtomicUsize>,
    }

    impl CountingTransport {
        fn new() -> (Self, Arc<AtomicUsize>, Arc<AtomicUsize>, Arc<AtomicUsize>) {
            let tool = Arc::new(AtomicUsize::new(0));
            let raw = Arc::new(AtomicUsize::new(0));
            let close = Arc::new(AtomicUsize::new(0));
            (
                CountingTransport {
                    tool_calls: tool.clone(),
                    raw_calls: raw.clone(),
                    close_calls: close.clone(),
                },
                tool,
                raw,
                close,
            )
        }
    }

    #[async_trait]
    impl Transport for CountingTransport {
        async fn connect(&self) -> SdkResult<()> {
            Ok(())
        }

        async fn invoke_tool(&self, _tool_name: &str, _input: Value) -> SdkResult<Value> {
            self.tool_calls.fetch_add(1, Ordering::SeqCst);
            Ok(Value::Null)
        }

        async fn invoke_raw(&self, _method: &str, _params: Value) -> SdkResult<Value> {
            self.raw_calls.fetch_add(1, Ordering::SeqCst);
            Ok(Value::Null)
        }

        async fn close(&self) -> SdkResult<()> {
            self.close_calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn debug_format_reports_binding_state_only() {
        let repr = format!("{:?}", Client::new());
        assert!(repr.contains("transport_bound: false"));
        assert!(repr.contains("connected: false"));
    }

    #[tokio::test]
    async fn invoke_before_connect_fails_without_touching_transport() {
        let client = Client::new();
        let err = client.invoke("summarize", Value::Null).await.unwrap_err();
        assert!(matches!(err, SdkError::NotConnected));
    }

    #[tokio::test]
    async fn invoke_routes_by_call_kind() {
        let (transport, tool, raw, _) = CountingTransport::new();
        let mut client = Client::new();
        client.connect(Box::new(transport)).await.unwrap();

        client.invoke("tools/list", Value::Null).await.unwrap();
        assert_eq!(raw.load(Ordering::SeqCst), 1);
        assert_eq!(tool.load(Ordering::SeqCst), 0);

        client
            .invoke("summarize", serde_json::json!({"text": "x"}))
            .await
            .unwrap();
        assert_eq!(tool.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn rebinding_is_an_explicit_error() {
        let (first, ..) = CountingTransport::new();
        let (second, ..) = CountingTransport::new();
        let mut client = Client::new();
        client.connect(Box::new(first)).await.unwrap();
        let err = client.connect(Box::new(second)).await.unwrap_err();
        assert!(matches!(err, SdkError::AlreadyConnected));
        assert!(client.is_connected()); // original binding untouched
    }

    #[tokio::test]
    async fn close_is_idempotent_and_gates_invoke() {
        let (transport, tool, _, close) = CountingTransport::new();
        let mut client = Client::new();
        client.connect(Box::new(transport)).await.unwrap();

        client.close().await.unwrap();
        client.close().await.unwrap(); // second close must not fail
        assert_eq!(close.load(Ordering::SeqCst), 1);

        let err = client.invoke("summarize", Value::Null).await.unwrap_err();
        assert!(matches!(err, SdkError::NotConnected));
        assert_eq!(tool.load(Ordering::SeqCst), 0);
    }
}
