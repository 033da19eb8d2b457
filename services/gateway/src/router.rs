use crate::handlers::{catalog, metrics, scores, vector};
use crate::state::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(catalog::health))
        .route("/catalog", get(catalog::get_catalog))
        .route("/vector", get(vector::get_vector).put(vector::put_vector))
        .route("/metrics/{code}", put(metrics::put_metric))
        .route("/reset", post(vector::reset))
        .route("/scores", get(scores::get_scores));

    Router::new()
        .nest("/v1", api_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use rust_decimal::Decimal;
    use scoring_engine::config::ScoringData;
    use scoring_engine::oracle::{LookupTable, MaxSeverityTable};
    use scoring_engine::session::Session;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;
    use types::catalog::MetricCatalog;

    const VECTOR: &str = "CVSS:4.0/AV:N/AC:L/AT:N/PR:N/UI:N/VC:H/VI:H/VA:H/SC:N/SI:N/SA:N";
    const DEFAULT_VECTOR: &str =
        "CVSS:4.0/AV:N/AC:L/AT:N/PR:N/UI:N/VC:N/VI:N/VA:N/SC:N/SI:N/SA:N";

    fn app() -> Router {
        let mut lookup = LookupTable::default();
        lookup.insert("000200".parse().unwrap(), Decimal::new(93, 1));
        let data = ScoringData::new(lookup, MaxSeverityTable::default());
        let session = Session::new(Arc::new(MetricCatalog::cvss_v4()), Arc::new(data));
        create_router(AppState::new(session))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(match body {
                Some(body) => Body::from(body.to_string()),
                None => Body::empty(),
            })
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(&app(), Method::GET, "/v1/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["engine_version"], scoring_engine::SERVICE_VERSION);
    }

    #[tokio::test]
    async fn test_catalog_lists_every_metric() {
        let (status, body) = send(&app(), Method::GET, "/v1/catalog", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["prefix"], "CVSS:4.0");
        assert_eq!(body["mandatory"], 11);
        assert_eq!(body["metrics"].as_array().unwrap().len(), 32);
        assert_eq!(body["metrics"][0]["code"], "AV");
        assert_eq!(body["groups"].as_array().unwrap().len(), 5);
        assert_eq!(body["groups"][0]["group"], "BASE");
        assert_eq!(body["groups"][4]["codes"], json!(["E"]));
    }

    #[tokio::test]
    async fn test_put_vector_scores_categories() {
        let app = app();
        let (status, body) =
            send(&app, Method::PUT, "/v1/vector", Some(json!({ "vector": VECTOR }))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["applied"], true);
        assert!(body.get("scoring_error").is_none());
        assert_eq!(body["vector"], VECTOR);
        assert_eq!(body["macro_vector"], "000200");
        assert_eq!(body["overall"]["severity_label"], "Critical");
        assert_eq!(body["categories"].as_array().unwrap().len(), 5);
        assert_eq!(body["categories"][0]["label"], "Base Metrics");
        assert_eq!(body["chart"]["labels"][4], "Threat Metrics");
    }

    #[tokio::test]
    async fn test_rejected_vector_keeps_session() {
        let app = app();
        let (status, body) = send(
            &app,
            Method::PUT,
            "/v1/vector",
            Some(json!({ "vector": "CVSS:3.1/AV:N/AC:L" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "MALFORMED_PREFIX");

        let (_, body) = send(&app, Method::GET, "/v1/vector", None).await;
        assert_eq!(body["vector"], DEFAULT_VECTOR);
    }

    #[tokio::test]
    async fn test_truncated_deep_link_is_rejected() {
        let (status, body) = send(
            &app(),
            Method::PUT,
            "/v1/vector",
            Some(json!({ "vector": "#CVSS:4.0/AV:N/AC:L/PR:N" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "MISSING_MANDATORY_METRIC");
    }

    #[tokio::test]
    async fn test_put_metric() {
        let app = app();
        let (status, body) =
            send(&app, Method::PUT, "/v1/metrics/AV", Some(json!({ "value": "L" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["vector"].as_str().unwrap().contains("/AV:L/"));

        let (status, body) =
            send(&app, Method::PUT, "/v1/metrics/AV", Some(json!({ "value": "Z" }))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "ILLEGAL_METRIC_VALUE");

        let (status, body) =
            send(&app, Method::PUT, "/v1/metrics/XX", Some(json!({ "value": "L" }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_empty_metric_value_is_bad_request() {
        let (status, body) =
            send(&app(), Method::PUT, "/v1/metrics/AV", Some(json!({ "value": "" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_reset_restores_default_vector() {
        let app = app();
        send(&app, Method::PUT, "/v1/vector", Some(json!({ "vector": VECTOR }))).await;

        let (status, body) = send(&app, Method::POST, "/v1/reset", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["vector"], DEFAULT_VECTOR);
        assert_eq!(body["overall"]["severity_label"], "None");
    }

    #[tokio::test]
    async fn test_unscorable_vector_is_applied() {
        let app = app();
        let vector = "CVSS:4.0/AV:P/AC:H/AT:P/PR:H/UI:A/VC:L/VI:L/VA:L/SC:L/SI:L/SA:L";
        let (status, body) =
            send(&app, Method::PUT, "/v1/vector", Some(json!({ "vector": vector }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["applied"], true);
        assert_eq!(body["vector"], vector);
        assert!(body["scoring_error"].as_str().unwrap().contains("212201"));
        assert!(body.get("overall").is_none());

        let (_, body) = send(&app, Method::GET, "/v1/vector", None).await;
        assert_eq!(body["vector"], vector);
    }

    #[tokio::test]
    async fn test_scores_report_unscorable_selection() {
        let app = app();
        send(&app, Method::PUT, "/v1/metrics/VC", Some(json!({ "value": "L" }))).await;

        let (status, body) = send(&app, Method::GET, "/v1/scores", None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "SCORING_UNAVAILABLE");
    }
}
