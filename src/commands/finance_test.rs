use super::*;
use crate::commands::prompt::context;
use crate::commands::{execute, Cli, Command};
use crate::error::ErrorCode;
use crate::net::mock::MockTransport;
use crate::net::Method;
use crate::services::dashboard::LOAD_FAILED;
use crate::state::FormError;
use clap::Parser;
use serde_json::{json, Value};

fn command(args: &[&str]) -> Command {
    Cli::try_parse_from(std::iter::once("stockroom").chain(args.iter().copied())).unwrap().command
}

fn ledgers() -> MockTransport {
    let today = format_day(today());
    MockTransport::default()
        .route(
            "/incomes",
            200,
            json!([
                {"id": 1, "description": "Venta mostrador", "amount": "300", "category": "Ventas", "income_date": today},
                {"id": 2, "description": "Intereses", "amount": 100, "category": "", "income_date": "2001-01-01"}
            ]),
        )
        .route(
            "/expenses",
            200,
            json!([{"id": 1, "description": "Renta", "amount": 150, "category": "Renta", "expense_date": today}]),
        )
}

// =========================================================================
// ledger
// =========================================================================

#[test]
fn ledger_kinds_and_periods_accept_spanish() {
    let Command::Ledger(LedgerCommand::List { kind, period, .. }) = command(&["ledger", "list", "gasto", "--period", "mes"])
    else {
        panic!("expected ledger list");
    };
    assert_eq!(kind, EntryKind::Expense);
    assert_eq!(period, Some(Period::Month));
    assert!(Cli::try_parse_from(["stockroom", "ledger", "summary", "--period", "quincena"]).is_err());
}

#[tokio::test]
async fn income_defaults_category_and_date() {
    let (mut ctx, mock, _) = context(MockTransport::default(), &[]);
    execute(&mut ctx, command(&["ledger", "add", "income", "--amount", "250.5", "--description", " Venta "]))
        .await
        .unwrap();

    let sent = &mock.requests()[0];
    assert_eq!((sent.method, sent.path.as_str()), (Method::Post, "/incomes"));
    assert_eq!(
        sent.body,
        Some(json!({"description": "Venta", "amount": 250.5, "category": "Otros", "income_date": format_day(today())}))
    );
}

#[tokio::test]
async fn expense_payload_uses_expense_date() {
    let (mut ctx, mock, _) = context(MockTransport::default(), &[]);
    execute(&mut ctx, command(&["ledger", "add", "gasto", "--amount", "80", "--category", "Servicios", "--date", "2024-02-29"]))
        .await
        .unwrap();
    let body = mock.requests()[0].body.clone().unwrap();
    assert_eq!(body["expense_date"], "2024-02-29");
    assert_eq!(body["category"], "Servicios");
}

#[tokio::test]
async fn non_positive_amount_is_rejected() {
    let (mut ctx, mock, _) = context(MockTransport::default(), &[]);
    let err = execute(&mut ctx, command(&["ledger", "add", "income", "--amount", "-5"])).await.unwrap_err();
    assert!(matches!(err, CliError::Form(FormError::Invalid(_))));
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn ledger_list_filters_by_period_and_prints_total() {
    let (mut ctx, _, _) = context(ledgers(), &[]);
    let out = execute(&mut ctx, command(&["ledger", "list", "income", "--period", "day"])).await.unwrap();
    assert!(out.contains("Venta mostrador"));
    assert!(!out.contains("Intereses"));
    assert!(out.ends_with("Ingresos (Hoy): $300.00\n"));

    let out = execute(&mut ctx, command(&["ledger", "list", "income"])).await.unwrap();
    assert!(out.ends_with("Ingresos (Total): $400.00\n"));
}

#[tokio::test]
async fn summary_balances_both_ledgers() {
    let (mut ctx, _, _) = context(ledgers(), &[]);
    ctx.json = true;
    let out = execute(&mut ctx, command(&["ledger", "summary", "--period", "year"])).await.unwrap();
    let totals: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(totals, json!({"income": 300.0, "expenses": 150.0, "balance": 150.0}));
}

#[tokio::test]
async fn summary_fails_when_a_ledger_cannot_load() {
    let (mut ctx, _, _) = context(ledgers().route_fail("/expenses"), &[]);
    let err = execute(&mut ctx, command(&["ledger", "summary"])).await.unwrap_err();
    assert_eq!(err.error_code(), "E_LOAD");
}

// =========================================================================
// dashboard
// =========================================================================

fn dashboard_mock() -> MockTransport {
    MockTransport::default()
        .route("/dashboard/stats", 200, json!({"totalProducts": "12", "monthlyRevenue": "1500.50"}))
        .route_fail("/dashboard/sales-data")
        .route("/dashboard/categories-data", 200, json!([{"id": 1, "name": "Bebidas", "products_count": 4}]))
        .route("/dashboard/low-stock", 200, json!([{"id": 3, "name": "Leche", "stock": 1, "min_stock": 5}]))
}

#[tokio::test]
async fn dashboard_renders_what_loaded() {
    let (mut ctx, mock, _) = context(dashboard_mock(), &[]);
    let out = execute(&mut ctx, command(&["dashboard", "--period", "weekly"])).await.unwrap();
    assert!(out.contains("$1,500.50"));
    assert!(out.contains("Bebidas"));
    assert!(out.contains("Leche"));
    assert!(!out.contains("Inventario"));

    let sales = mock.requests().into_iter().find(|r| r.path == "/dashboard/sales-data").unwrap();
    assert_eq!(sales.query, vec![("period".to_owned(), "weekly".to_owned())]);
}

#[tokio::test]
async fn full_dashboard_adds_insights() {
    let mock = dashboard_mock()
        .route("/dashboard/inventory-data", 200, json!({"inStock": 8, "lowStock": 3, "outOfStock": 1, "totalValue": 900}))
        .route("/dashboard/financial-summary", 200, json!({"totalRevenue": 2000, "netProfit": 500}))
        .route(
            "/dashboard/recent-activity",
            200,
            json!([
                {"id": 1, "type": "sale", "description": "Venta #30", "timestamp": "2024-03-02T10:00:00Z", "amount": "21.00"},
                {"id": 2, "type": "refund", "description": "Devolución #4", "timestamp": "2024-03-03T09:00:00Z"}
            ]),
        );
    let (mut ctx, mock, _) = context(mock, &[]);
    let out = execute(&mut ctx, command(&["dashboard", "--full", "--from", "2024-01-01", "--to", "2024-03-31"]))
        .await
        .unwrap();
    assert!(out.contains("Inventario"));
    assert!(out.contains("$2,000.00"));
    assert!(out.contains("Venta #30"));
    assert!(out.contains("$21.00"));
    assert!(out.contains("refund"));

    let summary = mock.requests().into_iter().find(|r| r.path == "/dashboard/financial-summary").unwrap();
    assert_eq!(
        summary.query,
        vec![("startDate".to_owned(), "2024-01-01".to_owned()), ("endDate".to_owned(), "2024-03-31".to_owned())]
    );
}

#[test]
fn dashboard_range_needs_both_valid_days() {
    assert!(Cli::try_parse_from(["stockroom", "dashboard", "--full", "--from", "2024-01-01"]).is_err());
    assert!(Cli::try_parse_from(["stockroom", "dashboard", "--from", "2024-1-1", "--to", "2024-02-01"]).is_err());
}

#[tokio::test]
async fn dashboard_banner_when_nothing_loads() {
    let mock = MockTransport::default()
        .route_fail("/dashboard/stats")
        .route_fail("/dashboard/sales-data")
        .route_fail("/dashboard/categories-data")
        .route_fail("/dashboard/low-stock");
    let (mut ctx, _, _) = context(mock, &[]);
    let err = execute(&mut ctx, command(&["dashboard"])).await.unwrap_err();
    assert_eq!(err.to_string(), LOAD_FAILED);
}

// =========================================================================
// reports
// =========================================================================

#[tokio::test]
async fn financial_report_shows_margin_and_shares() {
    let (mut ctx, _, _) = context(ledgers(), &[]);
    let out = execute(&mut ctx, command(&["reports", "financial"])).await.unwrap();
    assert!(out.contains("$250.00"));
    assert!(out.contains("62.5%"));
    assert!(out.contains("Otros"));
}

#[tokio::test]
async fn inventory_report_lists_products_to_reorder() {
    let mock = MockTransport::default()
        .route(
            "/products",
            200,
            json!([
                {"id": 1, "name": "Leche", "price": 2, "cost": 1, "stock": 20, "min_stock": 5, "category_id": 1},
                {"id": 2, "name": "Queso", "price": 8, "cost": 5, "stock": 0, "min_stock": 5}
            ]),
        )
        .route("/categories", 200, json!([{"id": 1, "name": "Lácteos"}]));
    let (mut ctx, _, _) = context(mock, &[]);
    ctx.json = true;
    let out = execute(&mut ctx, command(&["reports", "inventory"])).await.unwrap();
    let report: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(report["summary"]["out_of_stock"], 1);
    assert_eq!(report["low_stock"][0]["name"], "Queso");
    assert_eq!(report["categories"][1]["name"], "Sin categoría");
    assert_eq!(
        report["charts"]["stock_status"],
        json!([
            {"label": "En stock", "value": 1.0},
            {"label": "Stock bajo", "value": 0.0},
            {"label": "Sin stock", "value": 1.0}
        ])
    );
    assert_eq!(report["charts"]["categories"][0], json!({"label": "Lácteos", "value": 1.0}));

    ctx.json = false;
    let out = execute(&mut ctx, command(&["reports", "inventory"])).await.unwrap();
    assert!(out.contains("Estado del stock"));
    assert!(out.contains("Sin stock"));
}

#[tokio::test]
async fn sales_report_limits_best_sellers() {
    let mock = MockTransport::default()
        .route(
            "/sales",
            200,
            json!([{"id": 1, "total": 26, "status": "completed", "sale_date": "2024-02-10",
                    "items": [{"product_id": 1, "quantity": 5, "unit_price": 2}, {"product_id": 2, "quantity": 2, "unit_price": 8}]}]),
        )
        .route("/products", 200, json!([{"id": 1, "name": "Leche", "price": 2, "cost": 1, "stock": 1}]));
    let (mut ctx, _, _) = context(mock, &[]);
    let out = execute(&mut ctx, command(&["reports", "sales", "--top", "1"])).await.unwrap();
    assert!(out.contains("Producto ID: 2"));
    assert!(!out.contains("Leche"));
    assert!(out.contains("2024-02"));
}
