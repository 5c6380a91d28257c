//! Catalog records: products, categories, suppliers, customers.

use serde::{Deserialize, Serialize};

use super::{Id, Record, Resource};
use crate::util::numbers::{de_decimal, de_flag, de_integer, de_opt_integer};

/// Fallback stock threshold when the backend omits `min_stock`.
pub const DEFAULT_MIN_STOCK: i64 = 5;

fn default_min_stock() -> i64 {
    DEFAULT_MIN_STOCK
}

fn default_true() -> bool {
    true
}

// =============================================================================
// PRODUCT
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(deserialize_with = "de_integer")]
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(deserialize_with = "de_decimal")]
    pub price: f64,
    #[serde(deserialize_with = "de_decimal")]
    pub cost: f64,
    #[serde(deserialize_with = "de_integer")]
    pub stock: i64,
    #[serde(default = "default_min_stock", deserialize_with = "de_integer")]
    pub min_stock: i64,
    #[serde(default, deserialize_with = "de_opt_integer")]
    pub category_id: Option<Id>,
    #[serde(default, deserialize_with = "de_opt_integer")]
    pub supplier_id: Option<Id>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default = "default_true", alias = "active", deserialize_with = "de_flag")]
    pub is_active: bool,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Product {
    /// At or below its threshold (includes out of stock).
    #[must_use]
    pub fn is_low_stock(&self) -> bool {
        self.stock <= self.min_stock
    }

    #[must_use]
    pub fn is_out_of_stock(&self) -> bool {
        self.stock <= 0
    }

    /// Inventory value at cost.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn stock_value(&self) -> f64 {
        self.stock as f64 * self.cost
    }

    #[must_use]
    pub fn sku(&self) -> &str {
        self.sku.as_deref().unwrap_or("")
    }
}

impl Record for Product {
    fn id(&self) -> Id {
        self.id
    }
}

impl Resource for Product {
    const PATH: &'static str = "/products";
    const NOUN: &'static str = "producto";
    type Payload = ProductPayload;
}

/// Create/update body for a product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductPayload {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub cost: f64,
    pub stock: i64,
    pub min_stock: i64,
    pub category_id: Option<Id>,
    pub supplier_id: Option<Id>,
    pub sku: String,
    pub barcode: Option<String>,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Body of `PATCH /products/{id}/stock`.
///
/// `stock` is the new absolute level computed client side; the backend
/// replaces the stored value with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockUpdate {
    pub stock: i64,
    pub adjustment_type: &'static str,
    pub adjustment_quantity: i64,
    pub reason: String,
}

// =============================================================================
// CATEGORY
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(deserialize_with = "de_integer")]
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Record for Category {
    fn id(&self) -> Id {
        self.id
    }
}

impl Resource for Category {
    const PATH: &'static str = "/categories";
    const NOUN: &'static str = "categoría";
    type Payload = CategoryPayload;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryPayload {
    pub name: String,
    pub description: Option<String>,
}

// =============================================================================
// SUPPLIER
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    #[serde(deserialize_with = "de_integer")]
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub contact_person: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default = "default_true", alias = "is_active", deserialize_with = "de_flag")]
    pub active: bool,
}

impl Record for Supplier {
    fn id(&self) -> Id {
        self.id
    }
}

impl Resource for Supplier {
    const PATH: &'static str = "/suppliers";
    const NOUN: &'static str = "proveedor";
    type Payload = SupplierPayload;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SupplierPayload {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    pub active: bool,
}

// =============================================================================
// CUSTOMER
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(deserialize_with = "de_integer")]
    pub id: Id,
    pub first_name: String,
    pub last_name: String,
    /// National identity document number.
    #[serde(default)]
    pub cc: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default = "default_true", alias = "is_active", deserialize_with = "de_flag")]
    pub active: bool,
}

impl Customer {
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim()).trim().to_owned()
    }
}

impl Record for Customer {
    fn id(&self) -> Id {
        self.id
    }
}

impl Resource for Customer {
    const PATH: &'static str = "/customers";
    const NOUN: &'static str = "cliente";
    type Payload = CustomerPayload;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerPayload {
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    pub active: bool,
}
