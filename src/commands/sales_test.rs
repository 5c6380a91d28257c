use super::*;
use crate::commands::prompt::context;
use crate::commands::{execute, Cli, Command};
use crate::net::mock::MockTransport;
use crate::net::Method;
use clap::Parser;
use serde_json::{json, Value};

fn command(args: &[&str]) -> Command {
    Cli::try_parse_from(std::iter::once("stockroom").chain(args.iter().copied())).unwrap().command
}

fn products() -> Value {
    json!([
        {"id": 1, "name": "Leche", "price": "2.50", "cost": "1.50", "stock": 20, "min_stock": 5},
        {"id": 2, "name": "Queso", "price": 8, "cost": 5, "stock": 3, "min_stock": 5}
    ])
}

// =========================================================================
// arguments
// =========================================================================

#[test]
fn item_argument_splits_product_and_quantity() {
    assert_eq!(parse_item("12:3").unwrap(), (12, "3"));
    assert_eq!(parse_item(" 4 :x").unwrap(), (4, "x"));
    assert!(matches!(parse_item("12"), Err(CliError::InvalidArgument(_))));
    assert!(matches!(parse_item("leche:2"), Err(CliError::InvalidArgument(_))));
}

#[test]
fn sale_needs_a_customer_and_at_least_one_item() {
    assert!(Cli::try_parse_from(["stockroom", "sales", "create", "--item", "1:1"]).is_err());
    assert!(Cli::try_parse_from(["stockroom", "sales", "create", "--customer-name", "Ana"]).is_err());
    assert!(
        Cli::try_parse_from(["stockroom", "sales", "create", "--customer-id", "1", "--customer-name", "Ana", "--item", "1:1"])
            .is_err()
    );
}

// =========================================================================
// sales
// =========================================================================

#[tokio::test]
async fn walk_in_sale_posts_one_request_with_embedded_items() {
    let mock = MockTransport::default()
        .route("/products", 200, products())
        .reply(201, json!({"id": 30, "total": 21, "status": "completed"}));
    let (mut ctx, mock, _) = context(mock, &[]);
    let out = execute(
        &mut ctx,
        command(&["sales", "create", "--customer-name", "Ana", "--item", "1:2", "--item", "2:2", "--item", "1:0"]),
    )
    .await
    .unwrap_err();
    assert!(matches!(out, CliError::Cart(CartError::InvalidQuantity)));

    let out = execute(
        &mut ctx,
        command(&["sales", "create", "--customer-name", "Ana", "--item", "1:2", "--item", "2:2", "--payment", "tarjeta"]),
    )
    .await
    .unwrap();
    assert_eq!(out, "Venta registrada para Ana por $21.00.\nID de venta: 30\n");

    let posts: Vec<_> = mock.requests().into_iter().filter(|r| r.method == Method::Post).collect();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].path, "/sales");
    let body = posts[0].body.as_ref().unwrap();
    assert_eq!(body["customer"], "Ana");
    assert_eq!(body["customer_id"], Value::Null);
    assert_eq!(body["payment_method"], "credit card");
    assert_eq!(body["status"], "completed");
    assert_eq!(body["total"], 21.0);
    assert_eq!(body["items"].as_array().unwrap().len(), 2);
    assert_eq!(body["items"][1], json!({"product_id": 2, "quantity": 2, "unit_price": 8.0, "subtotal": 16.0}));
}

#[tokio::test]
async fn repeated_items_merge_and_respect_stock() {
    let (mut ctx, mock, _) = context(MockTransport::default().route("/products", 200, products()), &[]);
    let err = execute(&mut ctx, command(&["sales", "create", "--customer-name", "Ana", "--item", "2:2", "--item", "2:2"]))
        .await
        .unwrap_err();
    assert!(matches!(err, CliError::Cart(CartError::InsufficientStock { available: 3 })));
    assert!(mock.requests().iter().all(|r| r.method == Method::Get));
}

#[tokio::test]
async fn registered_customer_sale_carries_the_id() {
    let mock = MockTransport::default()
        .route("/products", 200, products())
        .route("/customers/4", 200, json!({"id": 4, "first_name": "Ana", "last_name": "Gómez"}));
    let (mut ctx, mock, _) = context(mock, &[]);
    execute(&mut ctx, command(&["sales", "create", "--customer-id", "4", "--item", "1:1", "--replace", "9"]))
        .await
        .unwrap();

    let put = mock.requests().into_iter().find(|r| r.method == Method::Put).unwrap();
    assert_eq!(put.path, "/sales/9");
    let body = put.body.unwrap();
    assert_eq!(body["customer_id"], 4);
    assert_eq!(body["customer"], "Ana Gómez");
}

#[tokio::test]
async fn unknown_product_in_cart_is_reported() {
    let (mut ctx, _, _) = context(MockTransport::default().route("/products", 200, products()), &[]);
    let err = execute(&mut ctx, command(&["sales", "create", "--customer-name", "Ana", "--item", "9:1"]))
        .await
        .unwrap_err();
    assert!(matches!(err, CliError::Table(TableError::RowNotFound(9))));
}

#[tokio::test]
async fn unknown_status_lists_the_options() {
    let (mut ctx, mock, _) = context(MockTransport::default(), &[]);
    let err = execute(&mut ctx, command(&["sales", "status", "3", "shipped"])).await.unwrap_err();
    assert!(err.to_string().contains("pending, completed, cancelled, refunded"));
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn status_change_patches_the_sale() {
    let (mut ctx, mock, _) = context(MockTransport::default(), &[]);
    let out = execute(&mut ctx, command(&["sales", "status", "3", "refunded"])).await.unwrap();
    assert_eq!(out, "Venta 3 marcada como Reembolsada.\n");
    let sent = &mock.requests()[0];
    assert_eq!((sent.method, sent.path.as_str()), (Method::Patch, "/sales/3/status"));
}

#[tokio::test]
async fn declined_cancel_sends_nothing() {
    let (mut ctx, mock, prompt) = context(MockTransport::default(), &[false]);
    let err = execute(&mut ctx, command(&["sales", "cancel", "3"])).await.unwrap_err();
    assert!(matches!(err, CliError::Aborted));
    assert_eq!(prompt.asked(), vec!["¿Cancelar la venta 3?"]);
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn sale_detail_fetches_items_when_missing() {
    let mock = MockTransport::default()
        .route("/sales/5", 200, json!({"id": 5, "total": 16, "status": "completed", "customer": "Ana", "sale_date": "2024-03-02"}))
        .route("/sale_items/sale/5", 200, json!([{"product_id": 2, "quantity": 2, "unit_price": 8}]))
        .route("/products", 200, products())
        .route("/customers", 200, json!([]));
    let (mut ctx, _, _) = context(mock, &[]);
    let out = execute(&mut ctx, command(&["sales", "show", "5"])).await.unwrap();
    assert!(out.contains("Ana"));
    assert!(out.contains("2024-03-02"));
    assert!(out.contains("Queso"));
    assert!(out.contains("$16.00"));
}

// =========================================================================
// purchases
// =========================================================================

#[tokio::test]
async fn purchase_line_prefills_cost_from_product() {
    let mock = MockTransport::default()
        .route("/products/2", 200, json!({"id": 2, "name": "Queso", "price": 8, "cost": 5, "stock": 3}))
        .route("/purchase_items", 201, json!({"id": 7, "product_id": 2, "quantity": 10, "cost": 5}));
    let (mut ctx, mock, _) = context(mock, &[]);
    execute(&mut ctx, command(&["purchases", "create", "--product-id", "2", "--quantity", "10"])).await.unwrap();

    let post = mock.requests().into_iter().find(|r| r.method == Method::Post).unwrap();
    assert_eq!(post.body, Some(json!({"product_id": 2, "quantity": 10, "cost": 5.0})));
}

#[tokio::test]
async fn explicit_cost_wins_over_prefill() {
    let mock = MockTransport::default()
        .route("/products/2", 200, json!({"id": 2, "name": "Queso", "price": 8, "cost": 5, "stock": 3}));
    let (mut ctx, mock, _) = context(mock, &[]);
    execute(&mut ctx, command(&["purchases", "create", "--product-id", "2", "--quantity", "1", "--cost", "4.5"]))
        .await
        .unwrap();

    let post = mock.requests().into_iter().find(|r| r.method == Method::Post).unwrap();
    assert_eq!(post.body.unwrap()["cost"], 4.5);
}

#[tokio::test]
async fn purchase_without_product_is_rejected() {
    let (mut ctx, mock, _) = context(MockTransport::default(), &[]);
    let err = execute(&mut ctx, command(&["purchases", "create", "--quantity", "1"])).await.unwrap_err();
    assert_eq!(err.to_string(), "Debe seleccionar un producto");
    assert!(mock.requests().is_empty());
}
