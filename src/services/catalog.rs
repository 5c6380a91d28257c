//! Reference data for resolving foreign keys into display names.
//!
//! Product and sale screens show names where records only hold ids. The
//! lookups are fetched concurrently and each degrades to an empty list on
//! failure, so a missing lookup only costs the names, never the screen.

use tracing::warn;

use crate::model::{Category, Customer, Id, Sale, Supplier};
use crate::net::{ApiClient, ApiError};

#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    pub categories: Vec<Category>,
    pub suppliers: Vec<Supplier>,
    pub customers: Vec<Customer>,
}

fn or_empty<T>(outcome: Result<Vec<T>, ApiError>, lookup: &'static str) -> Vec<T> {
    outcome.unwrap_or_else(|e| {
        warn!(lookup, error = %e, "reference data unavailable");
        Vec::new()
    })
}

impl ReferenceData {
    /// Categories and suppliers, for the product screens.
    pub async fn for_products(api: &ApiClient) -> Self {
        let (categories, suppliers) = tokio::join!(api.list::<Category>(), api.list::<Supplier>());
        Self {
            categories: or_empty(categories, "categories"),
            suppliers: or_empty(suppliers, "suppliers"),
            customers: Vec::new(),
        }
    }

    /// Customers, for the sale screens.
    pub async fn for_sales(api: &ApiClient) -> Self {
        let customers = api.list::<Customer>().await;
        Self { customers: or_empty(customers, "customers"), ..Self::default() }
    }

    #[must_use]
    pub fn category_name(&self, id: Option<Id>) -> String {
        match id {
            None => "Sin categoría".to_owned(),
            Some(id) => self
                .categories
                .iter()
                .find(|c| c.id == id)
                .map_or_else(|| format!("Categoría ID: {id}"), |c| c.name.clone()),
        }
    }

    #[must_use]
    pub fn supplier_name(&self, id: Option<Id>) -> String {
        match id {
            None => "Sin proveedor".to_owned(),
            Some(id) => self
                .suppliers
                .iter()
                .find(|s| s.id == id)
                .map_or_else(|| format!("Proveedor ID: {id}"), |s| s.name.clone()),
        }
    }

    /// Name stored on the sale, else the linked customer, else a placeholder.
    #[must_use]
    pub fn customer_name(&self, sale: &Sale) -> String {
        if let Some(name) = sale.customer.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            return name.to_owned();
        }
        match sale.customer_id {
            None => "Cliente desconocido".to_owned(),
            Some(id) => self
                .customers
                .iter()
                .find(|c| c.id == id)
                .map_or_else(|| format!("Cliente ID: {id}"), Customer::full_name),
        }
    }
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
