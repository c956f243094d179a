//! Request middleware: request IDs and JSON body parsing.
//!
//! `request_id_layer` generates a UUID v4 for each incoming request and creates
//! a tracing span that wraps the entire request lifecycle, so every log emitted
//! while handling the request carries the request_id field.
//!
//! `json_body_layer` is the pre-handler decoding stage. It buffers bodies that
//! declare a JSON content type, decodes them once, and attaches the outcome as
//! a [`Payload`] extension. Malformed bodies are rejected here, before routing
//! reaches any handler.

use std::time::Instant;

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header::CONTENT_TYPE, HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use http_body_util::{BodyExt, LengthLimitError, Limited};
use serde_json::Value;
use tracing::Instrument;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Response header echoing the request ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Extension type for accessing request ID in handlers if needed.
#[derive(Clone, Debug)]
pub struct RequestId(pub Uuid);

/// The caller's `x-request-id` when it parses as a UUID, otherwise a fresh v4.
pub fn resolve_request_id(headers: &HeaderMap) -> Uuid {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| Uuid::parse_str(v.trim()).ok())
        .unwrap_or_else(Uuid::new_v4)
}

/// Middleware that tags each request with an ID and runs it inside a span.
///
/// Must be the outermost layer so body-parsing rejections carry a request_id
/// too. The ID is echoed back in the `x-request-id` response header.
pub async fn request_id_layer(mut request: Request, next: Next) -> Response {
    let request_id = resolve_request_id(request.headers());

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %request.method(),
        path = %request.uri().path(),
        status = tracing::field::Empty,
        duration_ms = tracing::field::Empty,
    );

    request.extensions_mut().insert(RequestId(request_id));
    let echoed = HeaderValue::from_str(&request_id.to_string());

    async move {
        let start = Instant::now();
        let mut response = next.run(request).await;
        let status = response.status();
        let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        let span = tracing::Span::current();
        span.record("status", status.as_u16());
        span.record("duration_ms", duration_ms);

        if status.is_server_error() {
            tracing::warn!(status = status.as_u16(), duration_ms, "Request failed");
        } else {
            tracing::info!(status = status.as_u16(), duration_ms, "Request completed");
        }

        if let Ok(value) = echoed {
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
        }

        response
    }
    .instrument(span)
    .await
}

/// Outcome of the body-parsing stage for one request.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// No body, or a body not declared as JSON.
    Empty,
    Json(Value),
}

impl Payload {
    /// JSON rendering; an empty payload renders as `{}`.
    pub fn to_value(&self) -> Value {
        match self {
            Payload::Empty => Value::Object(Default::default()),
            Payload::Json(value) => value.clone(),
        }
    }
}

/// True only for `application/json`, with or without parameters.
pub fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence == "application/json"
}

/// Decode a buffered body. Only a zero-length body counts as absent;
/// whitespace alone is malformed.
pub fn decode_payload(bytes: &[u8]) -> Result<Payload, ApiError> {
    if bytes.is_empty() {
        return Ok(Payload::Empty);
    }
    Ok(Payload::Json(serde_json::from_slice(bytes)?))
}

/// Middleware that decodes JSON bodies ahead of routing.
///
/// The buffered bytes are put back on the request so later extractors can
/// still read the raw body.
pub async fn json_body_layer(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !is_json_content_type(request.headers()) {
        let mut request = request;
        request.extensions_mut().insert(Payload::Empty);
        return Ok(next.run(request).await);
    }

    let limit = state.body_limit();
    let (parts, body) = request.into_parts();

    let bytes = Limited::new(body, limit)
        .collect()
        .await
        .map_err(|err| {
            if err.downcast_ref::<LengthLimitError>().is_some() {
                ApiError::PayloadTooLarge { limit }
            } else {
                ApiError::BodyRead(err.to_string())
            }
        })?
        .to_bytes();

    let payload = decode_payload(&bytes)?;
    tracing::debug!(bytes = bytes.len(), "Decoded JSON body");

    let mut request = axum::http::Request::from_parts(parts, Body::from(bytes));
    request.extensions_mut().insert(payload);

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn headers_with(content_type: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_str(content_type).unwrap());
        headers
    }

    #[test]
    fn test_json_content_types() {
        assert!(is_json_content_type(&headers_with("application/json")));
        assert!(is_json_content_type(&headers_with(
            "Application/JSON; charset=utf-8"
        )));
    }

    #[test]
    fn test_non_json_content_types() {
        assert!(!is_json_content_type(&HeaderMap::new()));
        assert!(!is_json_content_type(&headers_with("text/plain")));
        assert!(!is_json_content_type(&headers_with("application/jsonl")));
        assert!(!is_json_content_type(&headers_with("text/x+json")));
        assert!(!is_json_content_type(&headers_with("application/problem+json")));
    }

    #[test]
    fn test_decode_empty_body() {
        assert_eq!(decode_payload(b"").unwrap(), Payload::Empty);
    }

    #[test]
    fn test_decode_whitespace_only_is_malformed() {
        let err = decode_payload(b"   \n").unwrap_err();
        assert!(matches!(err, ApiError::MalformedJson(_)));

        let err = decode_payload(b"\t").unwrap_err();
        assert!(matches!(err, ApiError::MalformedJson(_)));
    }

    #[test]
    fn test_decode_surrounding_whitespace_allowed() {
        assert_eq!(
            decode_payload(b" {\"x\":5}\n").unwrap(),
            Payload::Json(json!({"x": 5}))
        );
    }

    #[test]
    fn test_request_id_reuses_caller_uuid() {
        let id = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert(
            REQUEST_ID_HEADER,
            HeaderValue::from_str(&id.to_string()).unwrap(),
        );
        assert_eq!(resolve_request_id(&headers), id);
    }

    #[test]
    fn test_request_id_replaces_garbage() {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("not-a-uuid"));
        let id = resolve_request_id(&headers);
        assert_eq!(id.get_version_num(), 4);

        assert_ne!(resolve_request_id(&HeaderMap::new()), id);
    }

    #[test]
    fn test_decode_values() {
        assert_eq!(
            decode_payload(br#"{"a":1}"#).unwrap(),
            Payload::Json(json!({"a": 1}))
        );
        assert_eq!(decode_payload(b"[]").unwrap(), Payload::Json(json!([])));
        assert_eq!(decode_payload(b"42").unwrap(), Payload::Json(json!(42)));
    }

    #[test]
    fn test_decode_malformed() {
        let err = decode_payload(b"not json").unwrap_err();
        assert!(matches!(err, ApiError::MalformedJson(_)));

        let err = decode_payload(br#"{"a":"#).unwrap_err();
        assert!(matches!(err, ApiError::MalformedJson(_)));
    }

    #[test]
    fn test_empty_payload_renders_as_object() {
        assert_eq!(Payload::Empty.to_value(), json!({}));
    }
}
