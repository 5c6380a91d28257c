//! Client-side UI state: list views, forms, the stock flow, and the cart.
//!
//! Nothing here renders; the command layer drives these types and prints
//! what they produce.

pub mod cart;
pub mod form;
pub mod list;
pub mod stock;
pub mod table;

pub use cart::{CartError, CustomerChoice, SaleDraft};
pub use form::{Form, FormError, FormMode, Submission};
pub use list::ListState;
pub use stock::{AdjustError, Direction, StockAdjustment};
pub use table::{Column, ListView, RowAction, SelectionMode, TableError, TableView};
