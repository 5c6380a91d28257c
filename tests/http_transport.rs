//! The real `reqwest` transport against a stub backend on an ephemeral port.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, patch};
use axum::{Json, Router};
use serde_json::{json, Value};
use stockroom::config::ApiConfig;
use stockroom::model::{Product, SalesPeriod, StockUpdate};
use stockroom::net::transport::REQUEST_ID_HEADER;
use stockroom::net::{ApiClient, ApiError};

#[derive(Clone, Default)]
struct Seen {
    headers: Arc<Mutex<Vec<HeaderMap>>>,
    queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
    bodies: Arc<Mutex<Vec<Value>>>,
}

async fn products(State(seen): State<Seen>, headers: HeaderMap) -> Json<Value> {
    seen.headers.lock().unwrap().push(headers);
    Json(json!({
        "success": true,
        "data": [{"id": "1", "name": "Leche", "price": "2.50", "cost": "1.50", "stock": 20, "min_stock": 5}]
    }))
}

async fn missing(Path(id): Path<i64>) -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({"success": false, "message": format!("Producto {id} no encontrado")})))
}

async fn stock(State(seen): State<Seen>, Path(id): Path<i64>, Json(body): Json<Value>) -> Json<Value> {
    seen.bodies.lock().unwrap().push(body.clone());
    Json(json!({"data": {"id": id, "name": "Leche", "price": 2.5, "cost": 1.5, "stock": body["stock"]}}))
}

async fn sales_data(State(seen): State<Seen>, Query(query): Query<HashMap<String, String>>) -> Json<Value> {
    seen.queries.lock().unwrap().push(query);
    Json(json!([{"id": 1, "total": "40.5", "sale_date": "2024-03-02", "status": "completed"}]))
}

async fn broken() -> StatusCode {
    StatusCode::BAD_GATEWAY
}

async fn serve(seen: Seen) -> String {
    let app = Router::new()
        .route("/api/products", get(products))
        .route("/api/products/{id}", get(missing))
        .route("/api/products/{id}/stock", patch(stock))
        .route("/api/dashboard/sales-data", get(sales_data))
        .route("/api/dashboard/stats", get(broken))
        .with_state(seen);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    format!("http://{addr}/api/")
}

fn client(base_url: &str, token: Option<&str>) -> ApiClient {
    let config = ApiConfig::new(base_url).unwrap().with_overrides(None, token).unwrap();
    ApiClient::new(config).unwrap()
}

#[tokio::test]
async fn list_sends_bearer_and_request_id() {
    let seen = Seen::default();
    let api = client(&serve(seen.clone()).await, Some("secreto"));

    let items = api.list::<Product>().await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, 1);
    assert!((items[0].price - 2.5).abs() < f64::EPSILON);

    let headers = seen.headers.lock().unwrap()[0].clone();
    assert_eq!(headers["authorization"], "Bearer secreto");
    let request_id = headers[REQUEST_ID_HEADER].to_str().unwrap();
    assert_eq!(request_id.len(), 36);
}

#[tokio::test]
async fn no_token_means_no_authorization_header() {
    let seen = Seen::default();
    let api = client(&serve(seen.clone()).await, None);
    api.list::<Product>().await.unwrap();
    assert!(!seen.headers.lock().unwrap()[0].contains_key("authorization"));
}

#[tokio::test]
async fn query_parameters_reach_the_server() {
    let seen = Seen::default();
    let api = client(&serve(seen.clone()).await, None);
    let points = api.sales_data(SalesPeriod::Weekly).await.unwrap();
    assert_eq!(points.len(), 1);
    assert_eq!(seen.queries.lock().unwrap()[0]["period"], "weekly");
}

#[tokio::test]
async fn error_body_message_is_surfaced() {
    let api = client(&serve(Seen::default()).await, None);
    let err = api.get::<Product>(7).await.unwrap_err();
    match err {
        ApiError::Http { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Producto 7 no encontrado");
        }
        other => panic!("expected HTTP error, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_error_body_falls_back_to_status_line() {
    let api = client(&serve(Seen::default()).await, None);
    let err = api.dashboard_stats().await.unwrap_err();
    assert_eq!(err.to_string(), "HTTP 502 Bad Gateway");
}

#[tokio::test]
async fn stock_patch_carries_json_body() {
    let seen = Seen::default();
    let api = client(&serve(seen.clone()).await, None);
    let update = StockUpdate { stock: 25, adjustment_type: "add", adjustment_quantity: 5, reason: "Compra".into() };
    let product = api.adjust_stock(1, &update).await.unwrap().unwrap();
    assert_eq!(product.stock, 25);
    assert_eq!(
        seen.bodies.lock().unwrap()[0],
        json!({"stock": 25, "adjustment_type": "add", "adjustment_quantity": 5, "reason": "Compra"})
    );
}

#[tokio::test]
async fn unreachable_backend_is_a_request_error() {
    let api = client("http://127.0.0.1:9/api", None);
    let err = api.ping().await.unwrap_err();
    assert!(matches!(err, ApiError::Request(_)));
}
