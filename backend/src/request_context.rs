use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::{Instant, SystemTime, UNIX_EPOCH},
};

use axum::{
    extract::Request,
    http::{header::HeaderName, HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;

pub const REQUEST_ID_HEADER: &str = "x-request-id";
pub const TRACE_ID_HEADER: &str = "x-trace-id";

/// Caller-provided ids longer than this are replaced with generated ones.
const MAX_ID_LEN: usize = 128;

static SEQUENCE: AtomicU64 = AtomicU64::new(1);

/// Wraps every API request in an `http_request` span and echoes the
/// request/trace ids back to the caller.
pub async fn request_context_middleware(request: Request, next: Next) -> Response {
    let request_id = incoming_id(request.headers(), REQUEST_ID_HEADER).unwrap_or_else(|| new_id("req"));
    let trace_id = incoming_id(request.headers(), TRACE_ID_HEADER).unwrap_or_else(|| request_id.clone());

    let span = tracing::info_span!(
        "http_request",
        request_id = %request_id,
        trace_id = %trace_id,
        method = %request.method(),
        path = %request.uri().path(),
        query = request.uri().query().unwrap_or_default(),
    );
    let started = Instant::now();

    let mut response = next.run(request).instrument(span.clone()).await;

    let headers = response.headers_mut();
    echo_header(headers, REQUEST_ID_HEADER, &request_id);
    echo_header(headers, TRACE_ID_HEADER, &trace_id);

    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis();
    if status.is_server_error() {
        tracing::warn!(parent: &span, status = status.as_u16(), elapsed_ms, "request failed");
    } else {
        tracing::info!(parent: &span, status = status.as_u16(), elapsed_ms, "request completed");
    }

    response
}

fn incoming_id(headers: &HeaderMap, name: &'static str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty() && value.len() <= MAX_ID_LEN)
        .map(ToOwned::to_owned)
}

fn new_id(prefix: &str) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or_default();
    let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{millis:x}-{seq:06x}")
}

fn echo_header(headers: &mut HeaderMap, name: &'static str, value: &str) {
    if let Ok(value) = HeaderValue::from_str(value) {
        headers.insert(HeaderName::from_static(name), value);
    }
}
