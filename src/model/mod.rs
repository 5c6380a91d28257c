//! Flat records mirrored from backend JSON.
//!
//! DESIGN
//! ======
//! One canonical snake_case schema per record; legacy field spellings are
//! accepted through `serde(alias)` so callers never branch on shape.
//! Foreign keys are opaque ids resolved against sibling collections at render
//! time (see `services::catalog`). Numeric fields accept numbers or numeric
//! strings via `util::numbers`.

pub mod catalog;
pub mod dashboard;
pub mod ledger;
pub mod sales;

use serde::Serialize;
use serde::de::DeserializeOwned;

pub use catalog::{
    Category, CategoryPayload, Customer, CustomerPayload, Product, ProductPayload, StockUpdate, Supplier, SupplierPayload,
};
pub use dashboard::{
    ActivityKind, CategoryStat, DashboardStats, FinancialSummary, InventoryOverview, LowStockProduct, RecentActivity,
    SalesPeriod, SalesPoint, TopSeller,
};
pub use ledger::{Expense, ExpensePayload, Income, IncomePayload, LedgerEntry, LedgerKind};
pub use sales::{
    PaymentMethod, Purchase, PurchaseItem, PurchaseItemPayload, PurchaseStatus, Sale, SaleItem, SaleItemPayload,
    SalePayload, SaleStatus,
};

/// Backend primary/foreign key.
pub type Id = i64;

/// A record with a stable id.
pub trait Record {
    fn id(&self) -> Id;
}

/// A record type with a CRUD collection endpoint.
pub trait Resource: Record + DeserializeOwned + Serialize + Send + Clone {
    /// Collection path, e.g. `/products`.
    const PATH: &'static str;
    /// Singular Spanish noun for messages, e.g. `producto`.
    const NOUN: &'static str;
    /// Body sent on create and update.
    type Payload: Serialize + Send + Sync;
}

/// Path of one member of a resource collection.
#[must_use]
pub fn member_path<R: Resource>(id: Id) -> String {
    format!("{}/{id}", R::PATH)
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
