// ── MCP Connect SDK: Transport ──────────────────────────────────────────────
// Polymorphic transport capability plus the one concrete implementation:
// JSON-RPC 2.0 over HTTP POST to `{base}/mcp`.
//
// `connect`/`close` are no-ops for HTTP (stateless protocol); they exist so
// a future stateful transport (persistent socket) can implement a real
// handshake and teardown behind the same trait.
//
// Response decoding is two optional stages, attempted in sequence:
//   1. SSE frame unwrap — some servers answer in `text/event-stream` framing
//      regardless of the request's streaming need. Bodies starting with
//      `event: message` have the first `data: {...}` line extracted and
//      parsed as the effective body.
//   2. JSON-RPC unwrap — an object with a `result` key yields only that
//      value; anything else is returned unmodified.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};

use crate::error::{SdkError, SdkResult};
use crate::types::RpcRequest;

// ── Trait ───────────────────────────────────────────────────────────────────

/// One protocol binding to one network endpoint.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Establish the connection. No-op for stateless protocols.
    async fn connect(&self) -> SdkResult<()>;

    /// Invoke a named tool via the registry's `tools/call` convention.
    async fn invoke_tool(&self, tool_name: &str, input: Value) -> SdkResult<Value>;

    /// Invoke a raw protocol method (e.g. `tools/list`) with caller-supplied
    /// params.
    async fn invoke_raw(&self, method: &str, params: Value) -> SdkResult<Value>;

    /// Release transport resources. No-op for stateless protocols.
    async fn close(&self) -> SdkResult<()>;
}

// ── HTTP / JSON-RPC implementation ──────────────────────────────────────────

/// HTTP transport bound to one base URL. Lives exactly as long as the
/// client that owns it; no shared or global transport state.
pub struct HttpTransport {
    base_url: String,
    api_key: Option<String>,
    http: Client,
    /// Monotonic request ID — unique per outgoing request on this transport.
    next_id: AtomicU64,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>, timeout: Duration, api_key: Option<String>) -> Self {
        HttpTransport {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            http: Client::builder().timeout(timeout).build().unwrap_or_default(),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    /// POST one JSON-RPC envelope and run the two-stage decode.
    async fn post(&self, request: RpcRequest) -> SdkResult<Value> {
        let url = format!("{}/mcp", self.base_url);
        debug!("[transport] POST {} method={}", url, request.method);

        let mut req = self
            .http
            .post(&url)
            .header("Content-Type", "application/json")
            // Signals willingness to receive either a plain JSON body or an
            // SSE-framed one — some endpoints always frame as event-stream.
            .header("Accept", "application/json, text/event-stream")
            .json(&request);
        if let Some(ref key) = self.api_key {
            req = req.header("Authorization", format!("Bearer {}", key));
        }

        // Send errors (refused, reset, timed out) mean the request produced
        // no response — distinct from a server that answered with an error.
        let resp = req.send().await.map_err(|_| SdkError::no_response(&url))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SdkError::invocation(
                status.as_u16(),
                status.canonical_reason().unwrap_or_default(),
            ));
        }

        let body = resp.text().await.map_err(|_| SdkError::no_response(&url))?;
        Ok(unwrap_result(decode_body(&body)?))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn connect(&self) -> SdkResult<()> {
        // HTTP needs no persistent connection.
        Ok(())
    }

    async fn invoke_tool(&self, tool_name: &str, input: Value) -> SdkResult<Value> {
        let params = json!({ "name": tool_name, "arguments": input });
        self.post(RpcRequest::new(self.next_id(), "tools/call", Some(params)))
            .await
    }

    async fn invoke_raw(&self, method: &str, params: Value) -> SdkResult<Value> {
        self.post(RpcRequest::new(self.next_id(), method, Some(params)))
            .await
    }

    async fn close(&self) -> SdkResult<()> {
        // Nothing to release.
        Ok(())
    }
}

// ── Response decoding ───────────────────────────────────────────────────────

/// A response body, classified before parsing.
#[derive(Debug, PartialEq)]
enum ResponseBody<'a> {
    /// Already JSON (or at least not SSE-framed).
    PlainJson(&'a str),
    /// SSE-framed: the JSON payload hides in a `data:` line.
    EventStream(&'a str),
}

fn classify_body(body: &str) -> ResponseBody<'_> {
    if body.starts_with("event: message") {
        ResponseBody::EventStream(body)
    } else {
        ResponseBody::PlainJson(body)
    }
}

/// Decode an HTTP body into its effective JSON value.
///
/// Plain bodies that fail to parse are passed through as a JSON string —
/// the protocol does not require servers to speak JSON on every path.
/// Event-stream bodies with no extractable payload are a hard error.
fn decode_body(body: &str) -> SdkResult<Value> {
    match classify_body(body) {
        ResponseBody::EventStream(raw) => parse_event_stream(raw),
        ResponseBody::PlainJson(raw) => {
            Ok(serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string())))
        }
    }
}

/// Extract the first `data: {...}` line of an SSE-framed body and parse it.
fn parse_event_stream(raw: &str) -> SdkResult<Value> {
    for line in raw.lines() {
        if let Some(payload) = line.strip_prefix("data:") {
            let payload = payload.trim_start();
            if payload.starts_with('{') {
                if let Ok(value) = serde_json::from_str(payload) {
                    return Ok(value);
                }
            }
        }
    }
    Err(SdkError::MalformedResponse(
        "no data line with a JSON payload".into(),
    ))
}

/// JSON-RPC unwrap: return the `result` field if present, else the value
/// unmodified.
fn unwrap_result(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key("result") => {
            map.remove("result").unwrap_or(Value::Null)
        }
        other => other,
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_sse_body() {
        assert_eq!(
            classify_body("event: message\ndata: {}"),
            ResponseBody::EventStream("event: message\ndata: {}")
        );
        assert_eq!(
            classify_body("{\"result\":1}"),
            ResponseBody::PlainJson("{\"result\":1}")
        );
    }

    #[test]
    fn decode_plain_json() {
        let value = decode_body(r#"{"jsonrpc":"2.0","id":1,"result":{"b":2}}"#).unwrap();
        assert_eq!(value["result"]["b"], 2);
    }

    #[test]
    fn decode_plain_non_json_passes_through_as_string() {
        let value = decode_body("OK").unwrap();
        assert_eq!(value, Value::String("OK".into()));
    }

    #[test]
    fn decode_event_stream_extracts_data_line() {
        let body = "event: message\ndata: {\"jsonrpc\":\"2.0\",\"id\":1,\"result\":{\"b\":2}}\n\n";
        let value = decode_body(body).unwrap();
        assert_eq!(value["result"]["b"], 2);
    }

    #[test]
    fn decode_event_stream_skips_non_json_data_lines() {
        let body = "event: message\ndata: ping\ndata: {\"result\":7}\n\n";
        let value = decode_body(body).unwrap();
        assert_eq!(value["result"], 7);
    }

    #[test]
    fn decode_event_stream_without_data_line_is_an_error() {
        let body = "event: message\nid: 42\n\n";
        let err = decode_body(body).unwrap_err();
        assert!(matches!(err, SdkError::MalformedResponse(_)));
    }

    #[test]
    fn unwrap_result_present() {
        let value = serde_json::json!({"jsonrpc":"2.0","id":1,"result":{"b":2}});
        assert_eq!(unwrap_result(value), serde_json::json!({"b":2}));
    }

    #[test]
    fn unwrap_result_absent_returns_value_unmodified() {
        let value = serde_json::json!({"status":"ok"});
        assert_eq!(unwrap_result(value.clone()), value);
    }

    #[test]
    fn request_ids_are_monotonic() {
        let t = HttpTransport::new("http://localhost:9", Duration::from_secs(1), None);
        let a = t.next_id();
        let b = t.next_id();
        assert!(b > a);
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let t = HttpTransport::new("https://svc.example/", Duration::from_secs(1), None);
        assert_eq!(t.base_url(), "https://svc.example");
    }
}
