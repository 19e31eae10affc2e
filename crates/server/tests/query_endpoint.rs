//! Router-level tests driving the `/query` endpoint with scripted engines.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::util::ServiceExt;

use catapult_engine::{
    Datum, EngineError, ExecutionState, ExecutionStatus, QueryEngine, ResultSet,
    ResultSetMetadata, Row,
};
use catapult_proxy::{ProxyConfig, QueryProxy};
use catapult_server::app;

/// Engine that succeeds on the first poll and returns a fixed result page.
struct InstantEngine {
    result: ResultSet,
}

#[async_trait]
impl QueryEngine for InstantEngine {
    async fn submit(
        &self,
        _sql: &str,
        _database: &str,
        _output_location: &str,
    ) -> Result<String, EngineError> {
        Ok("exec-test".into())
    }

    async fn status(&self, _execution_id: &str) -> Result<ExecutionStatus, EngineError> {
        Ok(ExecutionStatus {
            state: ExecutionState::Succeeded,
            reason: None,
        })
    }

    async fn results(&self, _execution_id: &str, _max_rows: i32) -> Result<ResultSet, EngineError> {
        Ok(self.result.clone())
    }
}

/// Engine whose executions always fail with a fixed reason.
struct FailingEngine;

#[async_trait]
impl QueryEngine for FailingEngine {
    async fn submit(
        &self,
        _sql: &str,
        _database: &str,
        _output_location: &str,
    ) -> Result<String, EngineError> {
        Ok("exec-fail".into())
    }

    async fn status(&self, _execution_id: &str) -> Result<ExecutionStatus, EngineError> {
        Ok(ExecutionStatus {
            state: ExecutionState::Failed,
            reason: Some("TABLE_NOT_FOUND: events".into()),
        })
    }

    async fn results(&self, _execution_id: &str, _max_rows: i32) -> Result<ResultSet, EngineError> {
        Err(EngineError::Sdk("should not be called".into()))
    }
}

fn sample_result() -> ResultSet {
    let cell = |v: &str| Datum {
        var_char_value: Some(v.to_string()),
    };
    ResultSet {
        rows: vec![
            Row { data: vec![cell("id")] },
            Row { data: vec![cell("1")] },
        ],
        metadata: ResultSetMetadata::default(),
    }
}

fn router_with<E: QueryEngine + 'static>(engine: E) -> axum::Router {
    let proxy = Arc::new(QueryProxy::new(engine, ProxyConfig::default()));
    app::router(proxy)
}

async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn query_returns_legacy_success_body() {
    let router = router_with(InstantEngine {
        result: sample_result(),
    });

    let resp = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/query")
                .body(Body::from(r#"{"sql_query":"SELECT id FROM events"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(
        body["ResultSet"]["Rows"][0]["Data"][0]["VarCharValue"],
        "id"
    );
    assert_eq!(body["ResultSet"]["Rows"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn raw_sql_body_is_accepted() {
    let router = router_with(InstantEngine {
        result: sample_result(),
    });

    let resp = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/query")
                .body(Body::from("SELECT id FROM events LIMIT 5"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert!(body.get("ResultSet").is_some());
}

#[tokio::test]
async fn engine_failure_maps_to_500_with_flat_message() {
    let router = router_with(FailingEngine);

    let resp = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/query")
                .body(Body::from(r#"{"sql_query":"SELECT 1"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(resp).await;
    assert_eq!(body["status"], "error");
    let message = body["message"].as_str().unwrap();
    assert!(message.starts_with("Error executing query: "));
    assert!(message.contains("TABLE_NOT_FOUND"));
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn empty_body_is_a_validation_failure() {
    let router = router_with(InstantEngine {
        result: sample_result(),
    });

    let resp = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/query")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(resp).await;
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("No SQL query provided"));
}

#[tokio::test]
async fn health_endpoint() {
    let router = router_with(InstantEngine {
        result: sample_result(),
    });

    let resp = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["status"], "ok");
}
