//! Ledger, dashboard, and report screens.

use clap::{Args, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::json;

use super::{delete_record, load_list, render_list, set, CliError, Context, Labelled, ListArgs};
use crate::model::{Category, Expense, Id, Income, LedgerEntry, LedgerKind, Product, Resource, Sale, SalesPeriod};
use crate::services::reports::{
    category_breakdown, category_series, financial_report, inventory_series, inventory_summary, low_stock, monthly_sales,
    sales_summary, top_products, CategoryShare, SeriesPoint,
};
use crate::services::ledger::{filter_period, sum};
use crate::services::{Dashboard, Ledger, Period};
use crate::state::form::{Draft, ExpenseDraft, IncomeDraft, TransactionDraft};
use crate::state::{Column, Form, RowAction};
use crate::util::dates::{format_day, parse_exact_day, today};
use crate::util::render::{key_values, money, percent, text_table};

const LEDGER_ACTIONS: [RowAction; 3] = [RowAction::View, RowAction::Edit, RowAction::Delete];

impl Labelled for Income {
    fn label(&self) -> String {
        format!("{} por {}", self.description, money(self.amount))
    }
}

impl Labelled for Expense {
    fn label(&self) -> String {
        format!("{} por {}", self.description, money(self.amount))
    }
}

fn parse_period(raw: &str) -> Result<Period, String> {
    Period::parse(raw).ok_or_else(|| format!("periodo '{raw}' desconocido; use day, week, month o year"))
}

fn headers(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|l| (*l).to_owned()).collect()
}

fn series_table(label: &str, points: &[SeriesPoint]) -> String {
    let rows: Vec<Vec<String>> = points.iter().map(|p| vec![p.label.clone(), money(p.value)]).collect();
    text_table(&headers(&[label, "Total"]), &rows)
}

fn counts_table(label: &str, points: &[SeriesPoint]) -> String {
    let rows: Vec<Vec<String>> = points.iter().map(|p| vec![p.label.clone(), format!("{:.0}", p.value)]).collect();
    text_table(&headers(&[label, "Productos"]), &rows)
}

fn shares_table(shares: &[CategoryShare]) -> String {
    let rows: Vec<Vec<String>> =
        shares.iter().map(|s| vec![s.category.clone(), money(s.amount), percent(s.share)]).collect();
    text_table(&headers(&["Categoría", "Monto", "%"]), &rows)
}

// =============================================================================
// LEDGER
// =============================================================================

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    #[value(alias = "ingreso", alias = "incomes")]
    Income,
    #[value(alias = "gasto", alias = "expenses")]
    Expense,
}

#[derive(Subcommand, Debug)]
pub enum LedgerCommand {
    /// Entries of one ledger with their total.
    List {
        kind: EntryKind,
        #[arg(long, value_parser = parse_period)]
        period: Option<Period>,
        #[command(flatten)]
        list: ListArgs,
    },
    /// Record an income or an expense.
    Add {
        kind: EntryKind,
        #[command(flatten)]
        fields: EntryArgs,
    },
    Update {
        kind: EntryKind,
        id: Id,
        #[command(flatten)]
        fields: EntryArgs,
    },
    Delete {
        kind: EntryKind,
        id: Id,
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Income, expenses, and balance.
    Summary {
        #[arg(long, value_parser = parse_period)]
        period: Option<Period>,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct EntryArgs {
    #[arg(long, allow_hyphen_values = true)]
    pub amount: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Defaults to "Otros".
    #[arg(long)]
    pub category: Option<String>,
    /// YYYY-MM-DD; defaults to today.
    #[arg(long)]
    pub date: Option<String>,
}

impl EntryArgs {
    fn apply(self, draft: &mut TransactionDraft) {
        set(&mut draft.amount, self.amount);
        set(&mut draft.description, self.description);
        set(&mut draft.category, self.category);
        set(&mut draft.date, self.date);
    }
}

async fn list_entries<E>(ctx: &Context, period: Option<Period>, list: &ListArgs) -> Result<String, CliError>
where
    E: LedgerEntry + Resource,
{
    let loaded = load_list::<E>(&ctx.api).await?;
    let entries: Vec<E> = filter_period(&loaded.items, period, today())
        .into_iter()
        .cloned()
        .collect();
    let columns = [
        Column::new("date", "Fecha").sortable().render(|e: &E| e.date().get(..10).unwrap_or(e.date()).to_owned()),
        Column::new("description", "Descripción"),
        Column::new("category", "Categoría"),
        Column::new("amount", "Monto").sortable().render(|e: &E| money(e.amount())),
    ];
    let mut out = render_list(ctx, &entries, list, &LEDGER_ACTIONS, &columns)?;
    if !ctx.json {
        let refs: Vec<&E> = entries.iter().collect();
        let scope = period.map_or("Total", Period::label);
        out.push_str(&format!("{} ({scope}): {}\n", E::KIND.label(), money(sum(&refs))));
    }
    Ok(out)
}

async fn add_entry<D>(ctx: &Context, mut form: Form<D>, fields: EntryArgs) -> Result<String, CliError>
where
    D: Draft + AsMut<TransactionDraft>,
    D::Record: Resource<Payload = D::Payload>,
{
    fields.apply(form.draft.as_mut());
    super::catalog::submit(ctx, &form).await
}

impl AsMut<TransactionDraft> for IncomeDraft {
    fn as_mut(&mut self) -> &mut TransactionDraft {
        &mut self.0
    }
}

impl AsMut<TransactionDraft> for ExpenseDraft {
    fn as_mut(&mut self) -> &mut TransactionDraft {
        &mut self.0
    }
}

/// # Errors
///
/// Returns the load, validation, confirmation, or API error of the subcommand.
pub async fn run_ledger(ctx: &mut Context, cmd: LedgerCommand) -> Result<String, CliError> {
    match cmd {
        LedgerCommand::List { kind: EntryKind::Income, period, list } => list_entries::<Income>(ctx, period, &list).await,
        LedgerCommand::List { kind: EntryKind::Expense, period, list } => {
            list_entries::<Expense>(ctx, period, &list).await
        }
        LedgerCommand::Add { kind: EntryKind::Income, fields } => {
            add_entry(ctx, Form::<IncomeDraft>::open_create(), fields).await
        }
        LedgerCommand::Add { kind: EntryKind::Expense, fields } => {
            add_entry(ctx, Form::<ExpenseDraft>::open_create(), fields).await
        }
        LedgerCommand::Update { kind: EntryKind::Income, id, fields } => {
            let current = ctx.api.get::<Income>(id).await?;
            add_entry(ctx, Form::<IncomeDraft>::open_edit(&current), fields).await
        }
        LedgerCommand::Update { kind: EntryKind::Expense, id, fields } => {
            let current = ctx.api.get::<Expense>(id).await?;
            add_entry(ctx, Form::<ExpenseDraft>::open_edit(&current), fields).await
        }
        LedgerCommand::Delete { kind: EntryKind::Income, id, yes } => delete_record::<Income>(ctx, id, yes).await,
        LedgerCommand::Delete { kind: EntryKind::Expense, id, yes } => delete_record::<Expense>(ctx, id, yes).await,
        LedgerCommand::Summary { period } => {
            let mut ledger = Ledger::default();
            ledger.load(&ctx.api).await;
            if let Some(message) = ledger.error() {
                return Err(CliError::Load(message.to_owned()));
            }
            let totals = ledger.totals(period, today());
            if ctx.json {
                return super::to_json(&totals);
            }
            let mut out = format!("{}\n", period.map_or("Todos los movimientos", Period::label));
            out.push_str(&key_values(&[
                (LedgerKind::Income.label(), money(totals.income)),
                (LedgerKind::Expense.label(), money(totals.expenses)),
                ("Balance", money(totals.balance)),
            ]));
            Ok(out)
        }
    }
}

// =============================================================================
// DASHBOARD
// =============================================================================

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChartPeriod {
    Daily,
    Weekly,
    #[default]
    Monthly,
    Yearly,
}

impl From<ChartPeriod> for SalesPeriod {
    fn from(period: ChartPeriod) -> Self {
        match period {
            ChartPeriod::Daily => Self::Daily,
            ChartPeriod::Weekly => Self::Weekly,
            ChartPeriod::Monthly => Self::Monthly,
            ChartPeriod::Yearly => Self::Yearly,
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct DashboardArgs {
    /// Granularity of the sales chart.
    #[arg(long, value_enum, default_value_t = ChartPeriod::Monthly)]
    pub period: ChartPeriod,
    /// Also load inventory overview, financial summary, and recent activity.
    #[arg(long)]
    pub full: bool,
    /// First day (YYYY-MM-DD) of the financial summary.
    #[arg(long, requires = "to", value_parser = parse_date)]
    pub from: Option<String>,
    /// Last day (YYYY-MM-DD) of the financial summary.
    #[arg(long, requires = "from", value_parser = parse_date)]
    pub to: Option<String>,
}

fn parse_date(raw: &str) -> Result<String, String> {
    parse_exact_day(raw).map(format_day).ok_or_else(|| format!("fecha '{raw}' inválida; use AAAA-MM-DD"))
}

fn render_dashboard(dashboard: &Dashboard) -> String {
    let s = &dashboard.stats;
    let mut out = key_values(&[
        ("Productos", s.total_products.to_string()),
        ("Categorías", s.total_categories.to_string()),
        ("Proveedores", s.total_suppliers.to_string()),
        ("Clientes", s.total_customers.to_string()),
        ("Ventas", s.total_sales.to_string()),
        ("Stock bajo", s.low_stock_count.to_string()),
        ("Ingresos del mes", money(s.monthly_revenue)),
        ("Ingresos de la semana", money(s.weekly_revenue)),
        ("Pedidos pendientes", s.pending_orders.to_string()),
    ]);

    out.push_str(&format!("\nVentas ({})\n", dashboard.sales.len()));
    let sales: Vec<Vec<String>> = dashboard
        .sales
        .iter()
        .map(|p| {
            vec![
                p.date().map(|d| d.get(..10).unwrap_or(d).to_owned()).unwrap_or_default(),
                p.customer_name.clone().unwrap_or_default(),
                money(p.total),
                p.status.label().to_owned(),
            ]
        })
        .collect();
    out.push_str(&text_table(&headers(&["Fecha", "Cliente", "Total", "Estado"]), &sales));

    out.push_str("\nCategorías\n");
    let categories: Vec<Vec<String>> = dashboard
        .categories
        .iter()
        .map(|c| vec![c.name.clone(), c.products_count.to_string(), money(c.total_value)])
        .collect();
    out.push_str(&text_table(&headers(&["Categoría", "Productos", "Valor"]), &categories));

    out.push_str("\nStock bajo\n");
    let low: Vec<Vec<String>> = dashboard
        .low_stock
        .iter()
        .map(|p| vec![p.name.clone(), p.stock.to_string(), p.min_stock.to_string(), p.category.clone().unwrap_or_default()])
        .collect();
    out.push_str(&text_table(&headers(&["Producto", "Stock", "Mín.", "Categoría"]), &low));

    if let Some(inventory) = dashboard.inventory {
        out.push_str("\nInventario\n");
        out.push_str(&key_values(&[
            ("En stock", inventory.in_stock.to_string()),
            ("Stock bajo", inventory.low_stock.to_string()),
            ("Sin stock", inventory.out_of_stock.to_string()),
            ("Valor total", money(inventory.total_value)),
        ]));
    }
    if let Some(financial) = &dashboard.financial {
        out.push_str("\nFinanzas\n");
        out.push_str(&key_values(&[
            ("Ingresos", money(financial.total_revenue)),
            ("Gastos", money(financial.total_expenses)),
            ("Ganancia neta", money(financial.net_profit)),
            ("Ticket promedio", money(financial.average_order_value)),
            ("Crecimiento", percent(financial.sales_growth)),
        ]));
    }
    if !dashboard.activity.is_empty() {
        out.push_str("\nActividad reciente\n");
        let rows: Vec<Vec<String>> = dashboard
            .activity
            .iter()
            .map(|a| {
                vec![
                    a.timestamp.clone(),
                    a.kind.label().to_owned(),
                    a.description.clone(),
                    a.amount.map(money).unwrap_or_default(),
                ]
            })
            .collect();
        out.push_str(&text_table(&headers(&["Fecha", "Tipo", "Descripción", "Monto"]), &rows));
    }
    out
}

/// # Errors
///
/// `Load` when every widget of a batch failed.
pub async fn run_dashboard(ctx: &mut Context, args: DashboardArgs) -> Result<String, CliError> {
    let range = args.from.zip(args.to);
    let mut dashboard = Dashboard { period: args.period.into(), range, ..Dashboard::default() };
    dashboard.load(&ctx.api).await;
    if let Some(message) = dashboard.error.take() {
        return Err(CliError::Load(message));
    }
    if args.full {
        dashboard.load_insights(&ctx.api).await;
        if let Some(message) = dashboard.error.take() {
            return Err(CliError::Load(message));
        }
    }
    if ctx.json {
        return super::to_json(&json!({
            "stats": dashboard.stats,
            "sales": dashboard.sales,
            "categories": dashboard.categories,
            "low_stock": dashboard.low_stock,
            "inventory": dashboard.inventory,
            "financial": dashboard.financial,
            "activity": dashboard.activity,
        }));
    }
    Ok(render_dashboard(&dashboard))
}

// =============================================================================
// REPORTS
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum ReportsCommand {
    /// Stock buckets, value per category, and products to reorder.
    Inventory,
    /// Revenue, best sellers, and the monthly series.
    Sales {
        #[arg(long, default_value_t = 5)]
        top: usize,
    },
    /// Income against expenses with per-category shares.
    Financial {
        #[arg(long, value_parser = parse_period)]
        period: Option<Period>,
    },
}

fn maybe_json<T: Serialize>(ctx: &Context, value: &T, text: impl FnOnce() -> String) -> Result<String, CliError> {
    if ctx.json {
        super::to_json(value)
    } else {
        Ok(text())
    }
}

/// # Errors
///
/// Returns the load error of any collection the report needs.
pub async fn run_reports(ctx: &mut Context, cmd: ReportsCommand) -> Result<String, CliError> {
    match cmd {
        ReportsCommand::Inventory => {
            let (products, categories) = tokio::join!(load_list::<Product>(&ctx.api), load_list::<Category>(&ctx.api));
            let (products, categories) = (products?.items, categories?.items);
            let summary = inventory_summary(&products);
            let breakdown = category_breakdown(&products, &categories);
            let reorder = low_stock(&products);
            let stock_chart = inventory_series(&summary);
            let category_chart = category_series(&breakdown);
            let report = json!({
                "summary": summary,
                "categories": breakdown,
                "low_stock": reorder,
                "charts": { "stock_status": stock_chart, "categories": category_chart },
            });
            maybe_json(ctx, &report, || {
                let mut out = key_values(&[
                    ("Productos", summary.total_products.to_string()),
                    ("En stock", summary.in_stock.to_string()),
                    ("Stock bajo", summary.low_stock.to_string()),
                    ("Sin stock", summary.out_of_stock.to_string()),
                    ("Valor total", money(summary.total_value)),
                ]);
                out.push_str("\nEstado del stock\n");
                out.push_str(&counts_table("Estado", &stock_chart));
                out.push_str("\nPor categoría\n");
                let rows: Vec<Vec<String>> =
                    breakdown.iter().map(|c| vec![c.name.clone(), c.products.to_string(), money(c.value)]).collect();
                out.push_str(&text_table(&headers(&["Categoría", "Productos", "Valor"]), &rows));
                out.push_str("\nPara reponer\n");
                let rows: Vec<Vec<String>> = reorder
                    .iter()
                    .map(|p| vec![p.id.to_string(), p.name.clone(), p.stock.to_string(), p.min_stock.to_string()])
                    .collect();
                out.push_str(&text_table(&headers(&["ID", "Producto", "Stock", "Mín."]), &rows));
                out
            })
        }
        ReportsCommand::Sales { top } => {
            let (sales, products) = tokio::join!(load_list::<Sale>(&ctx.api), load_list::<Product>(&ctx.api));
            let (sales, products) = (sales?.items, products?.items);
            let summary = sales_summary(&sales);
            let best = top_products(&sales, &products, top);
            let monthly = monthly_sales(&sales);
            let report = json!({ "summary": summary, "top_products": best, "monthly": monthly });
            maybe_json(ctx, &report, || {
                let mut out = key_values(&[
                    ("Ventas", summary.orders.to_string()),
                    ("Ingresos", money(summary.revenue)),
                    ("Ticket promedio", money(summary.average_order)),
                ]);
                out.push_str("\nMás vendidos\n");
                let rows: Vec<Vec<String>> = best
                    .iter()
                    .map(|t| vec![t.name.clone(), t.quantity.to_string(), money(t.revenue)])
                    .collect();
                out.push_str(&text_table(&headers(&["Producto", "Unidades", "Ingresos"]), &rows));
                out.push_str("\nPor mes\n");
                out.push_str(&series_table("Mes", &monthly));
                out
            })
        }
        ReportsCommand::Financial { period } => {
            let mut ledger = Ledger::default();
            ledger.load(&ctx.api).await;
            if let Some(message) = ledger.error() {
                return Err(CliError::Load(message.to_owned()));
            }
            let reference = today();
            let incomes: Vec<Income> = filter_period(&ledger.incomes.items, period, reference)
                .into_iter()
                .cloned()
                .collect();
            let expenses: Vec<Expense> =
                filter_period(&ledger.expenses.items, period, reference)
                    .into_iter()
                    .cloned()
                    .collect();
            let report = financial_report(&incomes, &expenses);
            maybe_json(ctx, &report, || {
                let mut out = format!("{}\n", period.map_or("Todos los movimientos", Period::label));
                out.push_str(&key_values(&[
                    ("Ingresos", money(report.income)),
                    ("Gastos", money(report.expenses)),
                    ("Ganancia neta", money(report.net_profit)),
                    ("Margen", percent(report.margin)),
                ]));
                out.push_str("\nIngresos por categoría\n");
                out.push_str(&shares_table(&report.income_by_category));
                out.push_str("\nGastos por categoría\n");
                out.push_str(&shares_table(&report.expenses_by_category));
                out
            })
        }
    }
}

#[cfg(test)]
#[path = "finance_test.rs"]
mod tests;
