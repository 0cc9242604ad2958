//! `/health` plus the cross-cutting layers from `build_app_router`:
//! fallback 404, request ids and CORS.

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use catalog_core::types::DbId;
use catalog_db::models::product::Product;
use catalog_db::{ProductStore, StoreError, UpdateOutcome};
use common::{body_json, get};
use tower::ServiceExt;

/// Store whose backend is unreachable.
struct DownStore;

#[async_trait]
impl ProductStore for DownStore {
    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn get(&self, _id: DbId) -> Result<Option<Product>, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn exists(&self, _id: DbId) -> Result<bool, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn insert(&self, _product: &Product) -> Result<Product, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn update(&self, _product: &Product) -> Result<UpdateOutcome, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn delete(&self, _product: &Product) -> Result<bool, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }
}

#[tokio::test]
async fn healthy_store_reports_ok() {
    let response = get(common::build_test_app(common::test_store()), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(json["db_healthy"], true);
}

#[tokio::test]
async fn unreachable_store_reports_degraded_but_still_200() {
    let response = get(common::build_test_app(Arc::new(DownStore)), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["db_healthy"], false);
}

#[tokio::test]
async fn unreachable_store_fails_product_reads_with_500() {
    let response = get(common::build_test_app(Arc::new(DownStore)), "/products").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["code"], "INTERNAL_ERROR");
}

#[tokio::test]
async fn unrouted_path_is_404() {
    let response = get(common::build_test_app(common::test_store()), "/categories").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn every_response_carries_a_generated_request_id() {
    let response = get(common::build_test_app(common::test_store()), "/products").await;

    let id = response
        .headers()
        .get("x-request-id")
        .expect("x-request-id missing")
        .to_str()
        .unwrap();
    // Hyphenated UUID.
    assert_eq!(id.len(), 36);
}

#[tokio::test]
async fn client_request_id_is_echoed() {
    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "catalog-test-1")
        .body(Body::empty())
        .unwrap();

    let response = common::build_test_app(common::test_store())
        .oneshot(request)
        .await
        .unwrap();
    assert_eq!(response.headers()["x-request-id"], "catalog-test-1");
}

#[tokio::test]
async fn preflight_for_put_is_allowed_from_configured_origin() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/products/1")
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "PUT")
        .header("Access-Control-Request-Headers", "content-type")
        .body(Body::empty())
        .unwrap();

    let response = common::build_test_app(common::test_store())
        .oneshot(request)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers();
    assert_eq!(
        headers["access-control-allow-origin"],
        "http://localhost:5173"
    );
    assert!(headers["access-control-allow-methods"]
        .to_str()
        .unwrap()
        .contains("PUT"));
}

#[tokio::test]
async fn location_header_is_exposed_to_browsers() {
    let request = Request::builder()
        .uri("/products")
        .header("Origin", "http://localhost:5173")
        .body(Body::empty())
        .unwrap();

    let response = common::build_test_app(common::test_store())
        .oneshot(request)
        .await
        .unwrap();

    let exposed = response.headers()["access-control-expose-headers"]
        .to_str()
        .unwrap()
        .to_ascii_lowercase();
    assert!(exposed.contains("location"));
}
