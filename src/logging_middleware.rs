// src/logging_middleware.rs
//! Middleware for logging request and response bodies at debug level

use axum::body::{to_bytes, Body};
use axum::{extract::Request, http::StatusCode, middleware::Next, response::Response};
use tracing::debug;

const MAX_LOGGED_BODY: usize = 4096;

/// Log JSON request and response bodies when debug logging is enabled.
/// Bodies are buffered either way, so this layer stays cheap only because
/// every payload in this API is small.
pub async fn log_request_response(request: Request, next: Next) -> Result<Response, StatusCode> {
    let (parts, body) = request.into_parts();

    let bytes = to_bytes(body, usize::MAX)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    if !bytes.is_empty() {
        debug!(
            method = %parts.method,
            uri = %parts.uri,
            body = %preview(&bytes),
            "📥 Request"
        );
    }

    let request = Request::from_parts(parts, Body::from(bytes));
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();

    let bytes = to_bytes(body, usize::MAX)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    if !bytes.is_empty() {
        debug!(
            status = %parts.status,
            body = %preview(&bytes),
            "📤 Response"
        );
    }

    Ok(Response::from_parts(parts, Body::from(bytes)))
}

fn preview(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) if s.len() <= MAX_LOGGED_BODY => s.to_string(),
        Ok(s) => {
            let end = (0..=MAX_LOGGED_BODY)
                .rev()
                .find(|&i| s.is_char_boundary(i))
                .unwrap_or(0);
            format!("{}... ({} bytes)", &s[..end], bytes.len())
        }
        Err(_) => format!("<{} non-utf8 bytes>", bytes.len()),
    }
}
