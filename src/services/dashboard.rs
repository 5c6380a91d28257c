//! Dashboard loader: concurrent widget fetches with per-widget fallback.
//!
//! DESIGN
//! ======
//! The four core widgets (stats, sales series, category data, low stock) are
//! fetched together with `tokio::join!`. Each outcome settles on its own: a
//! success replaces the widget, a failure is logged and leaves the widget at
//! its previous value. The banner error is only raised when every widget in
//! the batch failed, since a partly loaded dashboard is still useful.
//!
//! The insight widgets (inventory overview, financial summary, recent
//! activity) are loaded separately by `load_insights` with the same rules.

use tracing::{debug, warn};

use crate::error::ErrorCode;
use crate::model::{
    CategoryStat, DashboardStats, FinancialSummary, InventoryOverview, LowStockProduct, RecentActivity, SalesPeriod,
    SalesPoint,
};
use crate::net::api::{LOW_STOCK_LIMIT, RECENT_ACTIVITY_LIMIT};
use crate::net::{ApiClient, ApiError};

/// Banner shown when no dashboard widget could be loaded.
pub const LOAD_FAILED: &str = "Error al cargar los datos del dashboard. Verifique la conexión con el servidor.";

#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    pub stats: DashboardStats,
    pub sales: Vec<SalesPoint>,
    pub categories: Vec<CategoryStat>,
    pub low_stock: Vec<LowStockProduct>,
    pub inventory: Option<InventoryOverview>,
    pub financial: Option<FinancialSummary>,
    pub activity: Vec<RecentActivity>,
    pub period: SalesPeriod,
    /// `(start, end)` days for the financial summary; all time when absent.
    pub range: Option<(String, String)>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Store a widget outcome. Returns whether it succeeded.
fn settle<T>(slot: &mut T, outcome: Result<T, ApiError>, widget: &'static str) -> bool {
    match outcome {
        Ok(value) => {
            *slot = value;
            true
        }
        Err(e) => {
            warn!(widget, error = %e, code = e.error_code(), "dashboard widget failed");
            false
        }
    }
}

impl Dashboard {
    fn finish(&mut self, loaded: usize, total: usize) {
        self.loading = false;
        self.error = (loaded == 0).then(|| LOAD_FAILED.to_owned());
        debug!(loaded, total, "dashboard batch settled");
    }

    /// Fetch all four core widgets concurrently.
    pub async fn load(&mut self, api: &ApiClient) {
        self.loading = true;
        let (stats, sales, categories, low_stock) = tokio::join!(
            api.dashboard_stats(),
            api.sales_data(self.period),
            api.categories_data(),
            api.low_stock(LOW_STOCK_LIMIT),
        );
        let loaded = [
            settle(&mut self.stats, stats, "stats"),
            settle(&mut self.sales, sales, "sales"),
            settle(&mut self.categories, categories, "categories"),
            settle(&mut self.low_stock, low_stock, "low_stock"),
        ];
        self.finish(loaded.iter().filter(|ok| **ok).count(), loaded.len());
    }

    /// Re-fetch the stat cards only.
    pub async fn refresh_stats(&mut self, api: &ApiClient) {
        self.loading = true;
        let outcome = api.dashboard_stats().await;
        let ok = settle(&mut self.stats, outcome, "stats");
        self.finish(usize::from(ok), 1);
    }

    /// Re-fetch the sales and category charts.
    pub async fn refresh_charts(&mut self, api: &ApiClient) {
        self.loading = true;
        let (sales, categories) = tokio::join!(api.sales_data(self.period), api.categories_data());
        let loaded = [settle(&mut self.sales, sales, "sales"), settle(&mut self.categories, categories, "categories")];
        self.finish(loaded.iter().filter(|ok| **ok).count(), loaded.len());
    }

    /// Fetch inventory overview, financial summary, and recent activity.
    pub async fn load_insights(&mut self, api: &ApiClient) {
        self.loading = true;
        let range = self.range.as_ref().map(|(start, end)| (start.as_str(), end.as_str()));
        let (inventory, financial, activity) =
            tokio::join!(api.inventory_data(), api.financial_summary(range), api.recent_activity(RECENT_ACTIVITY_LIMIT));
        let loaded = [
            settle(&mut self.inventory, inventory.map(Some), "inventory"),
            settle(&mut self.financial, financial.map(Some), "financial"),
            settle(&mut self.activity, activity, "activity"),
        ];
        self.finish(loaded.iter().filter(|ok| **ok).count(), loaded.len());
    }
}

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod tests;
