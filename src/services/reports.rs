//! Report aggregates computed client side from loaded collections.
//!
//! DESIGN
//! ======
//! Everything here is a pure function over slices so reports can be built
//! from whatever the screen already holds. Revenue figures only count sales
//! whose status is pending or completed; cancelled and refunded sales are
//! ignored throughout.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::ledger::DEFAULT_LEDGER_CATEGORY;
use crate::model::{Category, Expense, Id, Income, LedgerEntry, Product, Sale};
use crate::util::dates::{month_key, parse_day};

// =============================================================================
// INVENTORY
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct InventorySummary {
    pub total_products: usize,
    pub in_stock: usize,
    pub low_stock: usize,
    pub out_of_stock: usize,
    pub total_value: f64,
}

#[must_use]
pub fn inventory_summary(products: &[Product]) -> InventorySummary {
    products.iter().fold(InventorySummary::default(), |mut acc, p| {
        acc.total_products += 1;
        if p.is_out_of_stock() {
            acc.out_of_stock += 1;
        } else if p.is_low_stock() {
            acc.low_stock += 1;
        } else {
            acc.in_stock += 1;
        }
        acc.total_value += p.stock_value();
        acc
    })
}

/// Products at or below their minimum stock, lowest stock first.
#[must_use]
pub fn low_stock(products: &[Product]) -> Vec<&Product> {
    let mut low: Vec<&Product> = products.iter().filter(|p| p.is_low_stock()).collect();
    low.sort_by_key(|p| (p.stock, p.id));
    low
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    pub category_id: Option<Id>,
    pub name: String,
    pub products: usize,
    pub value: f64,
}

/// Product count and stock value per category, highest value first.
///
/// Products without a category, or pointing at an unknown one, are grouped
/// under "Sin categoría".
#[must_use]
pub fn category_breakdown(products: &[Product], categories: &[Category]) -> Vec<CategoryBreakdown> {
    let mut groups: BTreeMap<Option<Id>, CategoryBreakdown> = BTreeMap::new();
    for product in products {
        let category = product.category_id.and_then(|id| categories.iter().find(|c| c.id == id));
        let key = category.map(|c| c.id);
        let entry = groups.entry(key).or_insert_with(|| CategoryBreakdown {
            category_id: key,
            name: category.map_or_else(|| "Sin categoría".to_owned(), |c| c.name.clone()),
            products: 0,
            value: 0.0,
        });
        entry.products += 1;
        entry.value += product.stock_value();
    }
    let mut rows: Vec<_> = groups.into_values().collect();
    rows.sort_by(|a, b| b.value.total_cmp(&a.value).then_with(|| a.name.cmp(&b.name)));
    rows
}

// =============================================================================
// SALES
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SalesSummary {
    pub orders: usize,
    pub revenue: f64,
    pub average_order: f64,
}

#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn sales_summary(sales: &[Sale]) -> SalesSummary {
    let counted: Vec<&Sale> = sales.iter().filter(|s| s.status.is_revenue()).collect();
    let revenue: f64 = counted.iter().map(|s| s.total).sum();
    let orders = counted.len();
    let average_order = if orders == 0 { 0.0 } else { revenue / orders as f64 };
    SalesSummary { orders, revenue, average_order }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopProduct {
    pub product_id: Id,
    pub name: String,
    pub quantity: i64,
    pub revenue: f64,
}

/// Best sellers by revenue over the items embedded in `sales`.
#[must_use]
pub fn top_products(sales: &[Sale], products: &[Product], limit: usize) -> Vec<TopProduct> {
    let mut totals: BTreeMap<Id, TopProduct> = BTreeMap::new();
    for item in sales.iter().filter(|s| s.status.is_revenue()).flat_map(|s| &s.items) {
        let entry = totals.entry(item.product_id).or_insert_with(|| TopProduct {
            product_id: item.product_id,
            name: item
                .product_name
                .clone()
                .or_else(|| products.iter().find(|p| p.id == item.product_id).map(|p| p.name.clone()))
                .unwrap_or_else(|| format!("Producto ID: {}", item.product_id)),
            quantity: 0,
            revenue: 0.0,
        });
        entry.quantity += item.quantity;
        entry.revenue += item.line_total();
    }
    let mut rows: Vec<_> = totals.into_values().collect();
    rows.sort_by(|a, b| b.revenue.total_cmp(&a.revenue).then_with(|| a.product_id.cmp(&b.product_id)));
    rows.truncate(limit);
    rows
}

/// One labelled value of a chart series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub label: String,
    pub value: f64,
}

/// Revenue per `YYYY-MM`, oldest first. Undated sales are skipped.
#[must_use]
pub fn monthly_sales(sales: &[Sale]) -> Vec<SeriesPoint> {
    let mut months: BTreeMap<String, f64> = BTreeMap::new();
    for sale in sales.iter().filter(|s| s.status.is_revenue()) {
        if let Some(day) = sale.date().and_then(parse_day) {
            *months.entry(month_key(day)).or_default() += sale.total;
        }
    }
    months.into_iter().map(|(label, value)| SeriesPoint { label, value }).collect()
}

/// Product counts per category, for the category chart.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn category_series(breakdown: &[CategoryBreakdown]) -> Vec<SeriesPoint> {
    breakdown.iter().map(|c| SeriesPoint { label: c.name.clone(), value: c.products as f64 }).collect()
}

/// Stock status distribution, for the inventory chart.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn inventory_series(summary: &InventorySummary) -> Vec<SeriesPoint> {
    [("En stock", summary.in_stock), ("Stock bajo", summary.low_stock), ("Sin stock", summary.out_of_stock)]
        .into_iter()
        .map(|(label, count)| SeriesPoint { label: label.to_owned(), value: count as f64 })
        .collect()
}

// =============================================================================
// FINANCIAL
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub amount: f64,
    /// Percentage of the ledger total, 0 to 100.
    pub share: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FinancialReport {
    pub income: f64,
    pub expenses: f64,
    pub net_profit: f64,
    /// Net profit as a percentage of income; 0 without income.
    pub margin: f64,
    pub income_by_category: Vec<CategoryShare>,
    pub expenses_by_category: Vec<CategoryShare>,
}

fn shares<E: LedgerEntry>(entries: &[E]) -> (f64, Vec<CategoryShare>) {
    let mut groups: BTreeMap<&str, f64> = BTreeMap::new();
    for entry in entries {
        let category = match entry.category().trim() {
            "" => DEFAULT_LEDGER_CATEGORY,
            c => c,
        };
        *groups.entry(category).or_default() += entry.amount();
    }
    let total: f64 = groups.values().sum();
    let mut rows: Vec<CategoryShare> = groups
        .into_iter()
        .map(|(category, amount)| CategoryShare {
            category: category.to_owned(),
            amount,
            share: if total == 0.0 { 0.0 } else { amount / total * 100.0 },
        })
        .collect();
    rows.sort_by(|a, b| b.amount.total_cmp(&a.amount).then_with(|| a.category.cmp(&b.category)));
    (total, rows)
}

#[must_use]
pub fn financial_report(incomes: &[Income], expenses: &[Expense]) -> FinancialReport {
    let (income, income_by_category) = shares(incomes);
    let (spent, expenses_by_category) = shares(expenses);
    let net_profit = income - spent;
    FinancialReport {
        income,
        expenses: spent,
        net_profit,
        margin: if income == 0.0 { 0.0 } else { net_profit / income * 100.0 },
        income_by_category,
        expenses_by_category,
    }
}

#[cfg(test)]
#[path = "reports_test.rs"]
mod tests;
