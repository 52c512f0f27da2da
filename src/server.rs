//! HTTP surface (`gddy serve`).
//!
//! Exposes the same operations under `/api`, optionally behind a static
//! bearer token. Health stays open so probes work unauthenticated.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use crate::godaddy::{ApiError, DnsApi, GoDaddyClient, Record};

#[derive(Clone)]
pub struct AppState {
    api: Arc<dyn DnsApi>,
    token: Option<String>,
}

pub async fn run(
    client: GoDaddyClient,
    bind: SocketAddr,
    token: Option<String>,
) -> anyhow::Result<()> {
    let app = router(Arc::new(client), token);
    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!("listening on {bind}");
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn router(api: Arc<dyn DnsApi>, token: Option<String>) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/domains", get(list_domains))
        .route(
            "/api/domains/{domain}/records",
            get(list_records)
                .post(create_record)
                .put(upsert_record)
                .delete(delete_records),
        )
        .with_state(AppState { api, token })
}

#[derive(Deserialize, Default)]
struct RecordFilter {
    #[serde(rename = "type")]
    record_type: Option<String>,
    name: Option<String>,
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({"status": "ok"}))
}

async fn list_domains(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    match state.api.list_domains().await {
        Ok(domains) => Json(domains).into_response(),
        Err(e) => error_response(e),
    }
}

async fn list_records(
    State(state): State<AppState>,
    Path(domain): Path<String>,
    Query(filter): Query<RecordFilter>,
    headers: HeaderMap,
) -> Response {
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    match state
        .api
        .list_records(&domain, filter.record_type.as_deref(), filter.name.as_deref())
        .await
    {
        Ok(records) => Json(records).into_response(),
        Err(e) => error_response(e),
    }
}

async fn create_record(
    State(state): State<AppState>,
    Path(domain): Path<String>,
    headers: HeaderMap,
    Json(record): Json<Record>,
) -> Response {
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    match state.api.create_record(&domain, &record).await {
        Ok(()) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(e) => error_response(e),
    }
}

async fn upsert_record(
    State(state): State<AppState>,
    Path(domain): Path<String>,
    headers: HeaderMap,
    Json(record): Json<Record>,
) -> Response {
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    match state
        .api
        .upsert_record_value(&record.data, &domain, &record.name, &record.record_type)
        .await
    {
        Ok(()) => Json(record).into_response(),
        Err(e) => error_response(e),
    }
}

async fn delete_records(
    State(state): State<AppState>,
    Path(domain): Path<String>,
    Query(filter): Query<RecordFilter>,
    headers: HeaderMap,
) -> Response {
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    match state
        .api
        .delete_records(&domain, filter.name.as_deref(), filter.record_type.as_deref())
        .await
    {
        Ok(0) => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "no matching records"})),
        )
            .into_response(),
        Ok(deleted) => Json(json!({"deleted": deleted})).into_response(),
        Err(e) => error_response(e),
    }
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), Response> {
    let Some(expected) = state.token.as_deref() else {
        return Ok(());
    };
    let presented = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));
    if presented == Some(expected) {
        Ok(())
    } else {
        Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "invalid or missing bearer token"})),
        )
            .into_response())
    }
}

/// Registrar-reported statuses pass through; transport failures are the
/// gateway's fault.
fn error_response(err: ApiError) -> Response {
    let status = match &err {
        ApiError::Status { code, .. } => {
            StatusCode::from_u16(*code).unwrap_or(StatusCode::BAD_GATEWAY)
        }
        ApiError::Network(_) | ApiError::Decode(_) => StatusCode::BAD_GATEWAY,
    };
    (status, Json(json!({"error": err.to_string()}))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::godaddy::testing::MockApi;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(t) = token {
            builder = builder.header("authorization", format!("Bearer {t}"));
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn health_is_open_even_with_a_token_configured() {
        let app = router(Arc::new(MockApi::new()), Some("sekrit".into()));
        let response = app.oneshot(get_request("/api/health", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn missing_bearer_token_is_unauthorized() {
        let mock = Arc::new(MockApi::with_domains(&["a.com"]));
        let app = router(mock.clone(), Some("sekrit".into()));

        let response = app.oneshot(get_request("/api/domains", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn wrong_bearer_token_is_unauthorized() {
        let app = router(Arc::new(MockApi::new()), Some("sekrit".into()));
        let response = app
            .oneshot(get_request("/api/domains", Some("guess")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn matching_token_lists_domains() {
        let app = router(
            Arc::new(MockApi::with_domains(&["a.com", "b.com"])),
            Some("sekrit".into()),
        );
        let response = app
            .oneshot(get_request("/api/domains", Some("sekrit")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!(["a.com", "b.com"]));
    }

    #[tokio::test]
    async fn no_token_configured_means_open_access() {
        let app = router(Arc::new(MockApi::with_domains(&["a.com"])), None);
        let response = app.oneshot(get_request("/api/domains", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn record_filters_reach_the_client() {
        let mock = Arc::new(MockApi::new());
        let app = router(mock.clone(), None);

        let response = app
            .oneshot(get_request(
                "/api/domains/example.com/records?type=A&name=www",
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(mock.calls(), ["list_records example.com type=A name=www"]);
    }

    #[tokio::test]
    async fn create_forwards_the_record_and_answers_created() {
        let mock = Arc::new(MockApi::new());
        let app = router(mock.clone(), None);

        let request = Request::builder()
            .method("POST")
            .uri("/api/domains/example.com/records")
            .header("content-type", "application/json")
            .body(Body::from(
                r#"{"name":"api","type":"A","data":"1.2.3.4"}"#,
            ))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(mock.calls(), ["create_record example.com A api 1.2.3.4"]);
        // The defaulted TTL is echoed back.
        assert_eq!(body_json(response).await["ttl"], json!(3600));
    }

    #[tokio::test]
    async fn put_upserts_the_record_value() {
        let mock = Arc::new(MockApi::new());
        let app = router(mock.clone(), None);

        let request = Request::builder()
            .method("PUT")
            .uri("/api/domains/example.com/records")
            .header("content-type", "application/json")
            .body(Body::from(
                r#"{"name":"api","type":"A","data":"5.6.7.8"}"#,
            ))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(mock.calls(), ["upsert_record_value example.com A api 5.6.7.8"]);
    }

    #[tokio::test]
    async fn delete_with_no_matches_is_not_found() {
        let mock = Arc::new(MockApi::new()); // matched_on_delete = 0
        let app = router(mock.clone(), None);

        let request = Request::builder()
            .method("DELETE")
            .uri("/api/domains/example.com/records?type=TXT")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            json!({"error": "no matching records"})
        );
    }

    #[tokio::test]
    async fn delete_reports_the_matched_count() {
        let mut mock = MockApi::new();
        mock.matched_on_delete = 2;
        let app = router(Arc::new(mock), None);

        let request = Request::builder()
            .method("DELETE")
            .uri("/api/domains/example.com/records?name=www")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"deleted": 2}));
    }

    #[tokio::test]
    async fn client_failures_become_structured_errors() {
        let app = router(
            Arc::new(MockApi::failing("Authenticated user is not allowed access")),
            None,
        );
        let response = app.oneshot(get_request("/api/domains", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({"error": "Authenticated user is not allowed access"})
        );
    }
}
