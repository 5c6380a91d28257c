//! Typed REST calls.
//!
//! DESIGN
//! ======
//! `ApiClient` turns every backend operation into one method returning a
//! typed result. Each call goes `ApiRequest` → `Transport::send` →
//! `decode_response`, so the status check and envelope handling are shared
//! and unit tested without a network (see `decode_response`).
//!
//! CRUD collections are addressed generically through `model::Resource`;
//! stock, sale workflow, and dashboard endpoints get named methods.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use super::envelope;
use super::error::http_error_message;
use super::transport::{ApiRequest, HttpTransport, Method, RawResponse, Transport};
use super::ApiError;
use crate::config::ApiConfig;
use crate::model::{
    member_path, CategoryStat, DashboardStats, FinancialSummary, Id, InventoryOverview, LowStockProduct, Product,
    Purchase, RecentActivity, Resource, Sale, SaleItem, SaleStatus, SalesPeriod, SalesPoint, StockUpdate,
};

/// Default number of rows asked of `/dashboard/low-stock`.
pub const LOW_STOCK_LIMIT: usize = 10;
/// Default number of rows asked of `/dashboard/recent-activity`.
pub const RECENT_ACTIVITY_LIMIT: usize = 5;

#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    /// Build a client that talks HTTP using `config`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::HttpClientBuild` if the HTTP client cannot be built.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        Ok(Self::with_transport(Arc::new(HttpTransport::new(config)?)))
    }

    #[must_use]
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    async fn call<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let method = request.method;
        let path = request.path.clone();
        let raw = self.transport.send(request).await?;
        decode_response(&raw).inspect_err(|e| {
            warn!(method = method.as_str(), %path, status = raw.status, error = %e, "api call failed");
        })
    }

    fn body<P: serde::Serialize>(payload: &P) -> Result<Value, ApiError> {
        serde_json::to_value(payload).map_err(|e| ApiError::Schema(format!("payload encode failed: {e}")))
    }

    // =========================================================================
    // HEALTH
    // =========================================================================

    /// `GET /health`. Succeeds on any 2xx answer.
    ///
    /// # Errors
    ///
    /// Returns the transport or HTTP error.
    pub async fn ping(&self) -> Result<(), ApiError> {
        let _: Value = self.call(ApiRequest::new(Method::Get, "/health")).await?;
        Ok(())
    }

    // =========================================================================
    // GENERIC CRUD
    // =========================================================================

    /// `GET {R::PATH}`.
    ///
    /// # Errors
    ///
    /// Returns the transport, HTTP, envelope, or schema error.
    pub async fn list<R: Resource>(&self) -> Result<Vec<R>, ApiError> {
        let items: Option<Vec<R>> = self.call(ApiRequest::new(Method::Get, R::PATH)).await?;
        Ok(items.unwrap_or_default())
    }

    /// `GET {R::PATH}/{id}`.
    ///
    /// # Errors
    ///
    /// Returns the transport, HTTP, envelope, or schema error.
    pub async fn get<R: Resource>(&self, id: Id) -> Result<R, ApiError> {
        self.call(ApiRequest::new(Method::Get, member_path::<R>(id))).await
    }

    /// `POST {R::PATH}`. Returns the created record when the backend echoes it.
    ///
    /// # Errors
    ///
    /// Returns the transport, HTTP, envelope, or schema error.
    pub async fn create<R: Resource>(&self, payload: &R::Payload) -> Result<Option<R>, ApiError> {
        let request = ApiRequest::new(Method::Post, R::PATH).json(Self::body(payload)?);
        self.call(request).await
    }

    /// `PUT {R::PATH}/{id}`. Returns the updated record when echoed.
    ///
    /// # Errors
    ///
    /// Returns the transport, HTTP, envelope, or schema error.
    pub async fn update<R: Resource>(&self, id: Id, payload: &R::Payload) -> Result<Option<R>, ApiError> {
        let request = ApiRequest::new(Method::Put, member_path::<R>(id)).json(Self::body(payload)?);
        self.call(request).await
    }

    /// `DELETE {R::PATH}/{id}`.
    ///
    /// # Errors
    ///
    /// Returns the transport, HTTP, or envelope error.
    pub async fn delete<R: Resource>(&self, id: Id) -> Result<(), ApiError> {
        let _: Value = self.call(ApiRequest::new(Method::Delete, member_path::<R>(id))).await?;
        Ok(())
    }

    // =========================================================================
    // INVENTORY
    // =========================================================================

    /// `PATCH /products/{id}/stock`.
    ///
    /// # Errors
    ///
    /// Returns the transport, HTTP, or envelope error.
    pub async fn adjust_stock(&self, product_id: Id, update: &StockUpdate) -> Result<Option<Product>, ApiError> {
        let path = format!("{}/stock", member_path::<Product>(product_id));
        self.call(ApiRequest::new(Method::Patch, path).json(Self::body(update)?)).await
    }

    // =========================================================================
    // SALES & PURCHASES
    // =========================================================================

    /// `GET /sale_items/sale/{id}`.
    ///
    /// # Errors
    ///
    /// Returns the transport, HTTP, envelope, or schema error.
    pub async fn sale_items(&self, sale_id: Id) -> Result<Vec<SaleItem>, ApiError> {
        let items: Option<Vec<SaleItem>> =
            self.call(ApiRequest::new(Method::Get, format!("/sale_items/sale/{sale_id}"))).await?;
        Ok(items.unwrap_or_default())
    }

    /// `PUT /sales/{id}/cancel`.
    ///
    /// # Errors
    ///
    /// Returns the transport, HTTP, or envelope error.
    pub async fn cancel_sale(&self, sale_id: Id) -> Result<(), ApiError> {
        let path = format!("{}/cancel", member_path::<Sale>(sale_id));
        let _: Value = self.call(ApiRequest::new(Method::Put, path)).await?;
        Ok(())
    }

    /// `PATCH /sales/{id}/status`.
    ///
    /// # Errors
    ///
    /// Returns the transport, HTTP, or envelope error.
    pub async fn update_sale_status(&self, sale_id: Id, status: SaleStatus) -> Result<(), ApiError> {
        let path = format!("{}/status", member_path::<Sale>(sale_id));
        let body = serde_json::json!({ "status": status.as_str() });
        let _: Value = self.call(ApiRequest::new(Method::Patch, path).json(body)).await?;
        Ok(())
    }

    /// `GET /purchases`.
    ///
    /// # Errors
    ///
    /// Returns the transport, HTTP, envelope, or schema error.
    pub async fn purchases(&self) -> Result<Vec<Purchase>, ApiError> {
        let items: Option<Vec<Purchase>> = self.call(ApiRequest::new(Method::Get, "/purchases")).await?;
        Ok(items.unwrap_or_default())
    }

    // =========================================================================
    // DASHBOARD
    // =========================================================================

    /// `GET /dashboard/stats`.
    ///
    /// # Errors
    ///
    /// Returns the transport, HTTP, envelope, or schema error.
    pub async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        let stats: Option<DashboardStats> = self.call(ApiRequest::new(Method::Get, "/dashboard/stats")).await?;
        Ok(stats.unwrap_or_default())
    }

    /// `GET /dashboard/sales-data?period=...`.
    ///
    /// # Errors
    ///
    /// Returns the transport, HTTP, envelope, or schema error.
    pub async fn sales_data(&self, period: SalesPeriod) -> Result<Vec<SalesPoint>, ApiError> {
        let request = ApiRequest::new(Method::Get, "/dashboard/sales-data").query("period", period.as_str());
        let points: Option<Vec<SalesPoint>> = self.call(request).await?;
        Ok(points.unwrap_or_default())
    }

    /// `GET /dashboard/categories-data`.
    ///
    /// # Errors
    ///
    /// Returns the transport, HTTP, envelope, or schema error.
    pub async fn categories_data(&self) -> Result<Vec<CategoryStat>, ApiError> {
        let rows: Option<Vec<CategoryStat>> =
            self.call(ApiRequest::new(Method::Get, "/dashboard/categories-data")).await?;
        Ok(rows.unwrap_or_default())
    }

    /// `GET /dashboard/low-stock?limit=...`.
    ///
    /// # Errors
    ///
    /// Returns the transport, HTTP, envelope, or schema error.
    pub async fn low_stock(&self, limit: usize) -> Result<Vec<LowStockProduct>, ApiError> {
        let request = ApiRequest::new(Method::Get, "/dashboard/low-stock").query("limit", limit);
        let rows: Option<Vec<LowStockProduct>> = self.call(request).await?;
        Ok(rows.unwrap_or_default())
    }

    /// `GET /dashboard/inventory-data`.
    ///
    /// # Errors
    ///
    /// Returns the transport, HTTP, envelope, or schema error.
    pub async fn inventory_data(&self) -> Result<InventoryOverview, ApiError> {
        let data: Option<InventoryOverview> =
            self.call(ApiRequest::new(Method::Get, "/dashboard/inventory-data")).await?;
        Ok(data.unwrap_or_default())
    }

    /// `GET /dashboard/financial-summary`, optionally bounded by dates.
    ///
    /// Both bounds must be given for the range to be sent.
    ///
    /// # Errors
    ///
    /// Returns the transport, HTTP, envelope, or schema error.
    pub async fn financial_summary(&self, range: Option<(&str, &str)>) -> Result<FinancialSummary, ApiError> {
        let mut request = ApiRequest::new(Method::Get, "/dashboard/financial-summary");
        if let Some((start, end)) = range {
            request = request.query("startDate", start).query("endDate", end);
        }
        let data: Option<FinancialSummary> = self.call(request).await?;
        Ok(data.unwrap_or_default())
    }

    /// `GET /dashboard/recent-activity?limit=...`.
    ///
    /// # Errors
    ///
    /// Returns the transport, HTTP, envelope, or schema error.
    pub async fn recent_activity(&self, limit: usize) -> Result<Vec<RecentActivity>, ApiError> {
        let request = ApiRequest::new(Method::Get, "/dashboard/recent-activity").query("limit", limit);
        let rows: Option<Vec<RecentActivity>> = self.call(request).await?;
        Ok(rows.unwrap_or_default())
    }
}

// =============================================================================
// DECODING
// =============================================================================

/// Check the status, then unwrap the envelope and decode the payload.
///
/// # Errors
///
/// - `Http` for non-2xx statuses, with the body's message when it has one
/// - otherwise see `envelope::decode_text`
pub fn decode_response<T: DeserializeOwned>(raw: &RawResponse) -> Result<T, ApiError> {
    if !raw.is_success() {
        return Err(ApiError::Http {
            status: raw.status,
            message: http_error_message(raw.status, raw.reason.as_deref(), &raw.body),
        });
    }
    envelope::decode_text(&raw.body)
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
