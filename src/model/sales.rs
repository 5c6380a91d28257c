//! Sales and purchase orders with their line items.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Id, Record, Resource};
use crate::util::numbers::{de_decimal, de_integer, de_opt_decimal, de_opt_integer};

// =============================================================================
// STATUS & PAYMENT ENUMS
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaleStatus {
    #[default]
    Pending,
    Completed,
    #[serde(alias = "canceled")]
    Cancelled,
    Refunded,
}

impl SaleStatus {
    pub const ALL: [Self; 4] = [Self::Pending, Self::Completed, Self::Cancelled, Self::Refunded];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Refunded => "refunded",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pendiente",
            Self::Completed => "Completada",
            Self::Cancelled => "Cancelada",
            Self::Refunded => "Reembolsada",
        }
    }

    /// Counts toward revenue.
    #[must_use]
    pub fn is_revenue(self) -> bool {
        matches!(self, Self::Pending | Self::Completed)
    }

    /// Parse the wire name or the Spanish label.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let lower = raw.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|s| s.as_str() == lower || s.label().to_lowercase() == lower || (lower == "canceled" && *s == Self::Cancelled))
    }
}

impl fmt::Display for SaleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Known methods parse to their variant; anything else the backend stores is
/// kept verbatim in `Other` and shown as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentMethod {
    #[default]
    Cash,
    CreditCard,
    Transfer,
    Other(String),
}

impl PaymentMethod {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Cash => "cash",
            Self::CreditCard => "credit card",
            Self::Transfer => "transfer",
            Self::Other(raw) => raw,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Cash => "Efectivo",
            Self::CreditCard => "Tarjeta de Crédito",
            Self::Transfer => "Transferencia",
            Self::Other(raw) => raw,
        }
    }

    /// Parse a known wire name or Spanish alias.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "cash" | "efectivo" => Some(Self::Cash),
            "credit card" | "credit_card" | "card" | "tarjeta" => Some(Self::CreditCard),
            "transfer" | "transferencia" => Some(Self::Transfer),
            _ => None,
        }
    }
}

impl From<String> for PaymentMethod {
    fn from(raw: String) -> Self {
        Self::parse(&raw).unwrap_or(Self::Other(raw))
    }
}

impl From<PaymentMethod> for String {
    fn from(method: PaymentMethod) -> Self {
        match method {
            PaymentMethod::Other(raw) => raw,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PurchaseStatus {
    #[default]
    Pending,
    Received,
    #[serde(alias = "canceled")]
    Cancelled,
}

impl PurchaseStatus {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pendiente",
            Self::Received => "Recibida",
            Self::Cancelled => "Cancelada",
        }
    }
}

// =============================================================================
// SALE
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    #[serde(deserialize_with = "de_integer")]
    pub id: Id,
    #[serde(default, deserialize_with = "de_opt_integer")]
    pub customer_id: Option<Id>,
    /// Display name, either joined by the backend or a walk-in name.
    #[serde(default, alias = "customer_name")]
    pub customer: Option<String>,
    #[serde(default)]
    pub sale_date: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(deserialize_with = "de_decimal")]
    pub total: f64,
    #[serde(default, alias = "payment")]
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub status: SaleStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub items: Vec<SaleItem>,
}

impl Sale {
    /// `sale_date` if present, else `created_at`.
    #[must_use]
    pub fn date(&self) -> Option<&str> {
        self.sale_date.as_deref().or(self.created_at.as_deref())
    }
}

impl Record for Sale {
    fn id(&self) -> Id {
        self.id
    }
}

impl Resource for Sale {
    const PATH: &'static str = "/sales";
    const NOUN: &'static str = "venta";
    type Payload = SalePayload;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleItem {
    #[serde(default, deserialize_with = "de_opt_integer")]
    pub id: Option<Id>,
    #[serde(default, deserialize_with = "de_opt_integer")]
    pub sale_id: Option<Id>,
    #[serde(deserialize_with = "de_integer")]
    pub product_id: Id,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(deserialize_with = "de_integer")]
    pub quantity: i64,
    #[serde(alias = "price", deserialize_with = "de_decimal")]
    pub unit_price: f64,
    #[serde(default, deserialize_with = "de_opt_decimal")]
    pub subtotal: Option<f64>,
}

impl SaleItem {
    /// Stored subtotal, or quantity × unit price when absent.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn line_total(&self) -> f64 {
        self.subtotal.unwrap_or(self.quantity as f64 * self.unit_price)
    }
}

/// Create/update body for a sale. Items travel in the same request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalePayload {
    pub customer_id: Option<Id>,
    pub customer: String,
    pub total: f64,
    pub payment_method: PaymentMethod,
    pub status: SaleStatus,
    pub sale_date: String,
    pub items: Vec<SaleItemPayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaleItemPayload {
    pub product_id: Id,
    pub quantity: i64,
    pub unit_price: f64,
    pub subtotal: f64,
}

// =============================================================================
// PURCHASE
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    #[serde(deserialize_with = "de_integer")]
    pub id: Id,
    #[serde(default, deserialize_with = "de_opt_integer")]
    pub supplier_id: Option<Id>,
    #[serde(default)]
    pub purchase_date: Option<String>,
    #[serde(deserialize_with = "de_decimal")]
    pub total: f64,
    #[serde(default)]
    pub status: PurchaseStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Record for Purchase {
    fn id(&self) -> Id {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseItem {
    #[serde(deserialize_with = "de_integer")]
    pub id: Id,
    #[serde(default, deserialize_with = "de_opt_integer")]
    pub purchase_id: Option<Id>,
    #[serde(deserialize_with = "de_integer")]
    pub product_id: Id,
    #[serde(deserialize_with = "de_integer")]
    pub quantity: i64,
    #[serde(alias = "unit_cost", deserialize_with = "de_decimal")]
    pub cost: f64,
    #[serde(default, deserialize_with = "de_opt_decimal")]
    pub subtotal: Option<f64>,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub product_sku: Option<String>,
}

impl PurchaseItem {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn line_total(&self) -> f64 {
        self.subtotal.unwrap_or(self.quantity as f64 * self.cost)
    }
}

impl Record for PurchaseItem {
    fn id(&self) -> Id {
        self.id
    }
}

impl Resource for PurchaseItem {
    const PATH: &'static str = "/purchase_items";
    const NOUN: &'static str = "ítem de compra";
    type Payload = PurchaseItemPayload;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PurchaseItemPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_id: Option<Id>,
    pub product_id: Id,
    pub quantity: i64,
    pub cost: f64,
}
