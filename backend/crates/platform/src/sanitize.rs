//! Operator-Key Sanitizer
//!
//! Removes keys that a document store would read as query operators
//! (`$gt`, `$where`, dotted paths) from JSON bodies and query strings,
//! before any handler can splice input into a filter.

use axum::body::{Body, to_bytes};
use axum::http::{HeaderValue, Request, Uri, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use kernel::error::app_error::AppError;
use serde_json::Value;

/// Largest JSON body the gate will buffer (100 KiB)
pub const MAX_JSON_BODY_BYTES: usize = 100 * 1024;

/// `$`-prefixed and dotted keys; `[$` catches bracket-nested query keys
pub fn is_operator_key(key: &str) -> bool {
    key.starts_with('$') || key.contains('.') || key.contains("[$")
}

/// Strip operator keys in place, recursing through objects and arrays
///
/// Returns the number of keys removed.
pub fn sanitize_value(value: &mut Value) -> usize {
    match value {
        Value::Object(map) => {
            let before = map.len();
            map.retain(|key, _| !is_operator_key(key));
            let mut removed = before - map.len();
            for child in map.values_mut() {
                removed += sanitize_value(child);
            }
            removed
        }
        Value::Array(items) => items.iter_mut().map(sanitize_value).sum(),
        _ => 0,
    }
}

/// Drop operator-shaped pairs from a raw query string
///
/// Returns `None` when nothing had to be removed.
pub fn sanitize_query(query: &str) -> Option<String> {
    let mut removed = false;
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());

    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        if is_operator_key(&key) {
            removed = true;
        } else {
            serializer.append_pair(&key, &value);
        }
    }

    removed.then(|| serializer.finish())
}

/// Content types the `Json` extractor accepts
///
/// `application/json` or any `application/*+json`, compared case-insensitively
/// with parameters ignored.
pub fn is_json_content_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    let Some(subtype) = essence.strip_prefix("application/") else {
        return false;
    };
    subtype == "json" || subtype.ends_with("+json")
}

/// Middleware: sanitize query string and JSON body
pub async fn sanitize_request(req: Request<Body>, next: Next) -> Response {
    let (mut parts, body) = req.into_parts();

    if let Some(query) = parts.uri.query() {
        if let Some(clean) = sanitize_query(query) {
            match rebuild_uri(&parts.uri, &clean) {
                Some(uri) => {
                    tracing::warn!(path = %parts.uri.path(), "Removed operator keys from query string");
                    parts.uri = uri;
                }
                None => return AppError::bad_request("Invalid query string").into_response(),
            }
        }
    }

    let is_json = parts
        .headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(is_json_content_type);

    if !is_json {
        return next.run(Request::from_parts(parts, body)).await;
    }

    let bytes = match to_bytes(body, MAX_JSON_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::debug!(error = %e, "Request body rejected by sanitizer");
            return AppError::payload_too_large("Request body too large").into_response();
        }
    };

    // Malformed JSON is left for the typed extractor to reject.
    let bytes = match serde_json::from_slice::<Value>(&bytes) {
        Ok(mut value) => {
            let removed = sanitize_value(&mut value);
            if removed == 0 {
                bytes
            } else {
                tracing::warn!(
                    path = %parts.uri.path(),
                    removed_keys = removed,
                    "Removed operator keys from request body"
                );
                match serde_json::to_vec(&value) {
                    Ok(clean) => clean.into(),
                    Err(e) => return AppError::from(e).into_response(),
                }
            }
        }
        Err(_) => bytes,
    };

    parts
        .headers
        .insert(header::CONTENT_LENGTH, HeaderValue::from(bytes.len()));

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

fn rebuild_uri(uri: &Uri, query: &str) -> Option<Uri> {
    let path_and_query = if query.is_empty() {
        uri.path().to_string()
    } else {
        format!("{}?{}", uri.path(), query)
    };

    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(path_and_query.parse().ok()?);
    Uri::from_parts(parts).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::http::StatusCode;
    use axum::routing::post;
    use serde_json::json;
    use tower::ServiceExt;

    #[test]
    fn test_operator_keys() {
        assert!(is_operator_key("$gt"));
        assert!(is_operator_key("$where"));
        assert!(is_operator_key("profile.name"));
        assert!(is_operator_key("password[$ne]"));
        assert!(!is_operator_key("password"));
        assert!(!is_operator_key("price$"));
    }

    #[test]
    fn test_login_body_operator_is_stripped() {
        let mut body = json!({ "username": "alice", "password": { "$gt": "" } });
        assert_eq!(sanitize_value(&mut body), 1);
        assert_eq!(body, json!({ "username": "alice", "password": {} }));
    }

    #[test]
    fn test_nested_and_array_values() {
        let mut body = json!({
            "title": "a",
            "tags": [{ "$where": "1 == 1", "name": "rust" }],
            "meta": { "author.id": "x", "ok": { "$ne": null } }
        });

        assert_eq!(sanitize_value(&mut body), 3);
        assert_eq!(
            body,
            json!({ "title": "a", "tags": [{ "name": "rust" }], "meta": { "ok": {} } })
        );
    }

    #[test]
    fn test_clean_values_untouched() {
        let mut body = json!({ "title": "a", "content": "b $ c . d" });
        assert_eq!(sanitize_value(&mut body), 0);
    }

    #[test]
    fn test_sanitize_query() {
        assert_eq!(sanitize_query("page=1&limit=5"), None);
        assert_eq!(
            sanitize_query("author%5B%24ne%5D=x&page=2").as_deref(),
            Some("page=2")
        );
        assert_eq!(sanitize_query("%24where=1").as_deref(), Some(""));
    }

    #[tokio::test]
    async fn test_middleware_rewrites_body() {
        let app = Router::new()
            .route("/echo", post(|body: String| async move { body }))
            .layer(axum::middleware::from_fn(sanitize_request));

        let request = Request::post("/echo")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"username":"alice","password":{"$gt":""}}"#))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let echoed: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(echoed, json!({ "username": "alice", "password": {} }));
    }

    #[test]
    fn test_json_content_types() {
        assert!(is_json_content_type("application/json"));
        assert!(is_json_content_type("application/json; charset=utf-8"));
        assert!(is_json_content_type("Application/JSON"));
        assert!(is_json_content_type("application/merge-patch+json"));
        assert!(!is_json_content_type("text/plain"));
        assert!(!is_json_content_type("application/jsonp"));
        assert!(!is_json_content_type("text/json"));
    }

    #[tokio::test]
    async fn test_middleware_sanitizes_any_json_content_type() {
        let app = Router::new()
            .route(
                "/echo",
                post(|axum::Json(body): axum::Json<Value>| async move { axum::Json(body) }),
            )
            .layer(axum::middleware::from_fn(sanitize_request));

        for content_type in ["Application/JSON", "application/merge-patch+json"] {
            let request = Request::post("/echo")
                .header(header::CONTENT_TYPE, content_type)
                .body(Body::from(r#"{"password":{"$gt":""}}"#))
                .unwrap();

            let response = app.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{content_type}");

            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let echoed: Value = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(echoed, json!({ "password": {} }), "{content_type}");
        }
    }

    #[tokio::test]
    async fn test_middleware_rejects_oversized_body() {
        let app = Router::new()
            .route("/echo", post(|body: String| async move { body }))
            .layer(axum::middleware::from_fn(sanitize_request));

        let big = format!(r#"{{"content":"{}"}}"#, "x".repeat(MAX_JSON_BODY_BYTES));
        let request = Request::post("/echo")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(big))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
