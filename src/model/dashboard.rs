//! Dashboard widget payloads.
//!
//! Unlike the CRUD records these arrive in camelCase where the backend
//! computes them (stats, inventory, financial summary) and in snake_case where
//! they are row projections (sales points, categories, low stock).

use serde::{Deserialize, Serialize};

use super::{Id, SaleStatus};
use crate::util::numbers::{de_decimal, de_decimal_or_zero, de_integer, de_integer_or_zero, de_opt_decimal, de_opt_integer};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SalesPeriod {
    Daily,
    Weekly,
    #[default]
    Monthly,
    Yearly,
}

impl SalesPeriod {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

fn zero() -> f64 {
    0.0
}

/// Aggregates are computed from decimal columns, so every counter and sum
/// accepts numbers, numeric strings, or `null` (zero).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    #[serde(deserialize_with = "de_integer_or_zero")]
    pub total_products: i64,
    #[serde(deserialize_with = "de_integer_or_zero")]
    pub total_categories: i64,
    #[serde(deserialize_with = "de_integer_or_zero")]
    pub total_suppliers: i64,
    #[serde(deserialize_with = "de_integer_or_zero")]
    pub total_customers: i64,
    #[serde(deserialize_with = "de_integer_or_zero")]
    pub total_sales: i64,
    #[serde(deserialize_with = "de_integer_or_zero")]
    pub low_stock_count: i64,
    #[serde(deserialize_with = "de_decimal_or_zero")]
    pub monthly_revenue: f64,
    #[serde(deserialize_with = "de_decimal_or_zero")]
    pub weekly_revenue: f64,
    #[serde(deserialize_with = "de_integer_or_zero")]
    pub pending_orders: i64,
}

/// One sale as projected for the sales chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesPoint {
    #[serde(deserialize_with = "de_integer")]
    pub id: Id,
    #[serde(default)]
    pub sale_date: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(deserialize_with = "de_decimal")]
    pub total: f64,
    #[serde(default, deserialize_with = "de_opt_integer")]
    pub customer_id: Option<Id>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub status: SaleStatus,
    #[serde(default, deserialize_with = "de_opt_integer")]
    pub items_count: Option<i64>,
}

impl SalesPoint {
    #[must_use]
    pub fn date(&self) -> Option<&str> {
        self.sale_date.as_deref().or(self.created_at.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryStat {
    #[serde(deserialize_with = "de_integer")]
    pub id: Id,
    pub name: String,
    #[serde(deserialize_with = "de_integer")]
    pub products_count: i64,
    #[serde(default = "zero", deserialize_with = "de_decimal")]
    pub total_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LowStockProduct {
    #[serde(deserialize_with = "de_integer")]
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(deserialize_with = "de_integer")]
    pub stock: i64,
    #[serde(deserialize_with = "de_integer")]
    pub min_stock: i64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub supplier: Option<String>,
    #[serde(default, rename = "lastUpdated")]
    pub last_updated: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InventoryOverview {
    #[serde(deserialize_with = "de_integer_or_zero")]
    pub in_stock: i64,
    #[serde(deserialize_with = "de_integer_or_zero")]
    pub low_stock: i64,
    #[serde(deserialize_with = "de_integer_or_zero")]
    pub out_of_stock: i64,
    #[serde(deserialize_with = "de_decimal_or_zero")]
    pub total_value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FinancialSummary {
    #[serde(deserialize_with = "de_decimal_or_zero")]
    pub total_revenue: f64,
    #[serde(deserialize_with = "de_decimal_or_zero")]
    pub total_expenses: f64,
    #[serde(deserialize_with = "de_decimal_or_zero")]
    pub net_profit: f64,
    #[serde(deserialize_with = "de_decimal_or_zero")]
    pub average_order_value: f64,
    #[serde(deserialize_with = "de_decimal_or_zero")]
    pub sales_growth: f64,
    pub top_selling_products: Vec<TopSeller>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TopSeller {
    #[serde(deserialize_with = "de_integer_or_zero")]
    pub id: Id,
    pub name: String,
    #[serde(deserialize_with = "de_integer_or_zero")]
    pub total_sold: i64,
    #[serde(deserialize_with = "de_decimal_or_zero")]
    pub revenue: f64,
}

/// Source of a recent-activity row. Kinds this client does not know are kept
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActivityKind {
    Sale,
    Purchase,
    Inventory,
    Product,
    Other(String),
}

impl ActivityKind {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Sale => "sale",
            Self::Purchase => "purchase",
            Self::Inventory => "inventory",
            Self::Product => "product",
            Self::Other(raw) => raw,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Sale => "Venta",
            Self::Purchase => "Compra",
            Self::Inventory => "Inventario",
            Self::Product => "Producto",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for ActivityKind {
    fn from(raw: String) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "sale" => Self::Sale,
            "purchase" => Self::Purchase,
            "inventory" => Self::Inventory,
            "product" => Self::Product,
            _ => Self::Other(raw),
        }
    }
}

impl From<ActivityKind> for String {
    fn from(kind: ActivityKind) -> Self {
        match kind {
            ActivityKind::Other(raw) => raw,
            known => known.as_str().to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentActivity {
    #[serde(deserialize_with = "de_integer")]
    pub id: Id,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub description: String,
    pub timestamp: String,
    #[serde(default, deserialize_with = "de_opt_decimal")]
    pub amount: Option<f64>,
    #[serde(default)]
    pub user: Option<String>,
}
