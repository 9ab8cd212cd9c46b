use axum::{
    body::{to_bytes, Body, Bytes},
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::time::Instant;

const BODY_LIMIT: usize = 1024 * 1024;
const LOGGED_BODY_LEN: usize = 2000;

/// Middleware that logs request and response bodies.
/// Receipts are replaced by their length before logging.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let (parts, body) = request.into_parts();

    let bytes = match to_bytes(body, BODY_LIMIT).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(request_id = %request_id, "Failed to read request body: {}", e);
            return (StatusCode::BAD_REQUEST, "Failed to read request body").into_response();
        }
    };

    let request_body = redact_receipt(&String::from_utf8_lossy(&bytes));
    tracing::info!(
        request_id = %request_id,
        method = %method,
        uri = %uri,
        body = %truncate_body(&request_body, LOGGED_BODY_LEN),
        "→ Request"
    );

    let request = Request::from_parts(parts, Body::from(bytes));
    let response = next.run(request).await;

    let status = response.status();
    let (parts, body) = response.into_parts();

    let bytes = match to_bytes(body, BODY_LIMIT).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(request_id = %request_id, "Failed to read response body: {}", e);
            Bytes::new()
        }
    };

    let response_body = String::from_utf8_lossy(&bytes);
    tracing::info!(
        request_id = %request_id,
        method = %method,
        uri = %uri,
        status = %status.as_u16(),
        latency_ms = %start.elapsed().as_millis(),
        body = %truncate_body(&response_body, LOGGED_BODY_LEN),
        "← Response"
    );

    Response::from_parts(parts, Body::from(bytes))
}

/// Replace the `receipt` field of a JSON body with a placeholder
fn redact_receipt(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(mut value) => {
            if let Some(receipt) = value.get_mut("receipt") {
                let len = receipt.as_str().map(str::len).unwrap_or_default();
                *receipt = serde_json::Value::String(format!("[{} bytes]", len));
            }
            value.to_string()
        }
        Err(_) => body.to_string(),
    }
}

/// Truncate body for logging, adding ellipsis if truncated
fn truncate_body(body: &str, max_len: usize) -> String {
    let body = body.trim();
    if body.len() <= max_len {
        return body.to_string();
    }

    let mut end = max_len;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...[truncated, {} bytes total]", &body[..end], body.len())
}
