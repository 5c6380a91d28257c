//! Screen-level services built on the API client.
//!
//! Loaders that fan out over several endpoints live here together with the
//! pure report aggregates, so commands stay thin.

pub mod catalog;
pub mod dashboard;
pub mod ledger;
pub mod reports;

pub use catalog::ReferenceData;
pub use dashboard::Dashboard;
pub use ledger::{Ledger, LedgerTotals, Period};
