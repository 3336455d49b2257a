//! Route handlers for the API endpoints.

use axum::{
    body::Bytes,
    extract::{Path, Query, RawQuery, State},
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{NaiveDate, Utc};
use gq_proxy::{ProxyBody, ProxyRequest, ProxyResponse};
use gq_synthetic::FusedSignal;
use gq_upstream::{RequestMethod, Transport};
use std::sync::Arc;

use crate::error::ApiError;
use crate::state::AppState;
use crate::types::{FusionQuery, HealthResponse};

/// GET /health - Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET|POST|PUT|DELETE /api/gq-core/*path - Proxy to the upstream.
///
/// Always answers: upstream status and body when reachable, 200 with a
/// synthetic envelope when not.
pub async fn proxy<T: Transport + 'static>(
    State(state): State<Arc<AppState<T>>>,
    method: Method,
    Path(path): Path<String>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let method = request_method(&method)?;

    if path.split(['/', '\\']).any(is_dot_segment) {
        return Err(ApiError::InvalidPath(path));
    }

    let mut request = ProxyRequest::new(method, path.split('/').filter(|s| !s.is_empty()));

    if let Some(query) = query.filter(|q| !q.is_empty()) {
        request = request.with_query(query);
    }
    if let Some(auth) = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    {
        request = request.with_authorization(auth);
    }
    if !body.is_empty() {
        request = request.with_body(body.to_vec());
    }

    let response = state.controller.handle(request).await;
    into_http(response)
}

/// GET /api/fusion/:entity - Fused engine score for an entity.
pub async fn get_fusion<T: Transport + 'static>(
    State(state): State<Arc<AppState<T>>>,
    Path(entity): Path<String>,
    Query(query): Query<FusionQuery>,
) -> Result<Json<FusedSignal>, ApiError> {
    let entity = entity.trim();
    if entity.is_empty() {
        return Err(ApiError::BadRequest("entity is required".to_string()));
    }

    let day = match query.day.as_deref() {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| {
            ApiError::BadRequest(format!("day must be YYYY-MM-DD ({}): {}", raw, e))
        })?,
        None => Utc::now().date_naive(),
    };

    Ok(Json(state.fusion.fuse(entity, day).await))
}

/// Fallback for unknown routes.
pub async fn not_found(method: Method, uri: axum::http::Uri) -> ApiError {
    ApiError::NotFound(format!("{} {}", method, uri.path()))
}

fn request_method(method: &Method) -> Result<RequestMethod, ApiError> {
    match *method {
        Method::GET => Ok(RequestMethod::Get),
        Method::POST => Ok(RequestMethod::Post),
        Method::PUT => Ok(RequestMethod::Put),
        Method::DELETE => Ok(RequestMethod::Delete),
        ref other => Err(ApiError::BadRequest(format!("unsupported method {}", other))),
    }
}

/// `.` or `..`, including percent-encoded forms the URL parser would
/// still resolve (e.g. `%2e%2e` arriving as `%252e%252e`).
fn is_dot_segment(segment: &str) -> bool {
    let decoded = segment.to_ascii_lowercase().replace("%2e", ".");
    decoded == "." || decoded == ".."
}

fn into_http(response: ProxyResponse) -> Result<Response, ApiError> {
    let status = StatusCode::from_u16(response.status)
        .map_err(|_| ApiError::UpstreamStatus(response.status))?;

    match response.body {
        ProxyBody::Json(value) => Ok((status, Json(value)).into_response()),
        ProxyBody::Opaque {
            content_type,
            bytes,
        } => {
            let mut http = (status, bytes).into_response();
            if let Some(value) = content_type.and_then(|ct| HeaderValue::from_str(&ct).ok()) {
                http.headers_mut().insert(header::CONTENT_TYPE, value);
            }
            Ok(http)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_method_mapping() {
        assert_eq!(request_method(&Method::GET).unwrap(), RequestMethod::Get);
        assert_eq!(request_method(&Method::DELETE).unwrap(), RequestMethod::Delete);
        assert!(request_method(&Method::PATCH).is_err());
    }

    #[test]
    fn test_opaque_body_keeps_content_type() {
        let http = into_http(ProxyResponse {
            status: 503,
            body: ProxyBody::Opaque {
                content_type: Some("text/html".to_string()),
                bytes: b"<h1>down</h1>".to_vec(),
            },
        })
        .unwrap();

        assert_eq!(http.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(http.headers()[header::CONTENT_TYPE], "text/html");
    }

    #[test]
    fn test_invalid_status_is_bad_gateway() {
        let result = into_http(ProxyResponse {
            status: 42,
            body: ProxyBody::Json(serde_json::Value::Null),
        });
        assert!(matches!(result, Err(ApiError::UpstreamStatus(42))));
        assert_eq!(result.unwrap_err().into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_dot_segments() {
        for segment in [".", "..", "%2e%2e", "%2E.", ".%2e", "%2e"] {
            assert!(is_dot_segment(segment), "{}", segment);
        }
        for segment in ["whales", "...", "..a", "", "v1.2"] {
            assert!(!is_dot_segment(segment), "{}", segment);
        }
    }
}
