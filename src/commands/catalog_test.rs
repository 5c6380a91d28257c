use super::*;
use crate::commands::prompt::context;
use crate::commands::{execute, Cli, Command};
use crate::error::ErrorCode;
use crate::state::{AdjustError, FormError};
use crate::net::mock::MockTransport;
use crate::net::Method;
use clap::Parser;
use serde_json::{json, Value};

fn command(args: &[&str]) -> Command {
    Cli::try_parse_from(std::iter::once("stockroom").chain(args.iter().copied())).unwrap().command
}

fn products() -> Value {
    json!([
        {"id": 1, "name": "Leche", "price": "2.50", "cost": "1.50", "stock": 20, "min_stock": 5, "category_id": 1, "sku": "LE-1"},
        {"id": 2, "name": "Queso", "price": 8, "cost": 5, "stock": 3, "min_stock": 5, "category_id": 7}
    ])
}

fn catalog_mock() -> MockTransport {
    MockTransport::default()
        .route("/products", 200, products())
        .route("/categories", 200, json!([{"id": 1, "name": "Lácteos"}]))
        .route("/suppliers", 200, json!([]))
}

// =========================================================================
// products
// =========================================================================

#[tokio::test]
async fn product_list_resolves_category_names() {
    let (mut ctx, _, _) = context(catalog_mock(), &[]);
    let out = execute(&mut ctx, command(&["products", "list"])).await.unwrap();
    assert!(out.contains("Leche"));
    assert!(out.contains("Lácteos"));
    assert!(out.contains("Categoría ID: 7"));
}

#[tokio::test]
async fn low_stock_filter_keeps_only_products_to_reorder() {
    let (mut ctx, _, _) = context(catalog_mock(), &[]);
    let out = execute(&mut ctx, command(&["products", "list", "--low-stock"])).await.unwrap();
    assert!(out.contains("Queso"));
    assert!(!out.contains("Leche"));
}

#[tokio::test]
async fn product_without_name_is_rejected_before_sending() {
    let (mut ctx, mock, _) = context(MockTransport::default(), &[]);
    let err = execute(&mut ctx, command(&["products", "create", "--price", "3"])).await.unwrap_err();
    assert!(matches!(err, CliError::Form(FormError::Required(_))));
    assert_eq!(err.to_string(), "El nombre del producto es requerido");
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn product_create_applies_defaults() {
    let (mut ctx, mock, _) =
        context(MockTransport::default().reply(201, json!({"id": 12, "name": "Pan", "price": 1, "cost": 0, "stock": 0})), &[]);
    let out = execute(&mut ctx, command(&["products", "create", "--name", " Pan ", "--price", "1"])).await.unwrap();
    assert_eq!(out, "Se creó producto 12.\n");

    let sent = &mock.requests()[0];
    assert_eq!((sent.method, sent.path.as_str()), (Method::Post, "/products"));
    let body = sent.body.as_ref().unwrap();
    assert_eq!(body["name"], "Pan");
    assert_eq!(body["min_stock"], 5);
    assert_eq!(body["is_active"], true);
}

#[tokio::test]
async fn product_update_keeps_untouched_fields() {
    let current = json!({"id": 1, "name": "Leche", "price": "2.50", "cost": "1.50", "stock": 20, "min_stock": 5, "category_id": 1});
    let (mut ctx, mock, _) = context(MockTransport::default().reply(200, current), &[]);
    let out = execute(&mut ctx, command(&["products", "update", "1", "--price", "3"])).await.unwrap();
    assert_eq!(out, "Se actualizó producto 1.\n");

    let sent = &mock.requests()[1];
    assert_eq!((sent.method, sent.path.as_str()), (Method::Put, "/products/1"));
    let body = sent.body.as_ref().unwrap();
    assert_eq!(body["price"], 3.0);
    assert_eq!(body["name"], "Leche");
    assert_eq!(body["category_id"], 1);
}

// =========================================================================
// stock
// =========================================================================

#[tokio::test]
async fn stock_adjust_confirms_and_patches_new_level() {
    let (mut ctx, mock, prompt) = context(MockTransport::default().reply(200, products()), &[true]);
    let out = execute(&mut ctx, command(&["stock", "adjust", "2", "--add", "4"])).await.unwrap();
    assert_eq!(out, "Stock de 'Queso' actualizado: 3 -> 7.\n");
    assert_eq!(prompt.asked().len(), 1);

    let sent = &mock.requests()[1];
    assert_eq!((sent.method, sent.path.as_str()), (Method::Patch, "/products/2/stock"));
    assert_eq!(
        sent.body,
        Some(json!({"stock": 7, "adjustment_type": "add", "adjustment_quantity": 4, "reason": "Ajuste de inventario"}))
    );
}

#[tokio::test]
async fn stock_cannot_go_negative() {
    let (mut ctx, mock, prompt) = context(MockTransport::default().reply(200, products()), &[true]);
    let err = execute(&mut ctx, command(&["stock", "adjust", "2", "--subtract", "4", "--yes"])).await.unwrap_err();
    assert!(matches!(err, CliError::Adjust(AdjustError::NegativeStock { available: 3 })));
    assert!(prompt.asked().is_empty());
    assert_eq!(mock.requests().len(), 1);
}

#[tokio::test]
async fn stock_adjust_rejects_non_positive_quantity() {
    let (mut ctx, _, _) = context(MockTransport::default().reply(200, products()), &[]);
    let err = execute(&mut ctx, command(&["stock", "adjust", "1", "--add", "0", "--yes"])).await.unwrap_err();
    assert!(matches!(err, CliError::Adjust(AdjustError::InvalidQuantity)));
}

#[test]
fn stock_adjust_needs_exactly_one_direction() {
    assert!(Cli::try_parse_from(["stockroom", "stock", "adjust", "1"]).is_err());
    assert!(Cli::try_parse_from(["stockroom", "stock", "adjust", "1", "--add", "1", "--subtract", "1"]).is_err());
}

#[tokio::test]
async fn declined_adjustment_sends_nothing() {
    let (mut ctx, mock, _) = context(MockTransport::default().reply(200, products()), &[false]);
    let err = execute(&mut ctx, command(&["stock", "adjust", "1", "--subtract", "2"])).await.unwrap_err();
    assert!(matches!(err, CliError::Aborted));
    assert_eq!(mock.requests().len(), 1);
}

// =========================================================================
// customers and suppliers
// =========================================================================

#[tokio::test]
async fn customer_delete_prompt_uses_full_name() {
    let customers = json!([{"id": 4, "first_name": "Ana", "last_name": "Gómez"}]);
    let (mut ctx, _, prompt) = context(MockTransport::default().reply(200, customers), &[true]);
    execute(&mut ctx, command(&["customers", "delete", "4"])).await.unwrap();
    assert_eq!(prompt.asked(), vec!["¿Eliminar cliente 'Ana Gómez' (ID 4)?"]);
}

#[tokio::test]
async fn invalid_supplier_email_is_rejected() {
    let (mut ctx, mock, _) = context(MockTransport::default(), &[]);
    let err = execute(&mut ctx, command(&["suppliers", "create", "--name", "Lácteos SA", "--email", "sin-arroba"]))
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "E_FORM_INVALID");
    assert!(mock.requests().is_empty());
}
