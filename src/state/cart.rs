//! Sale entry cart.
//!
//! DESIGN
//! ======
//! Lines carry the product's stock as seen when it was added; every quantity
//! change is checked against that snapshot. Adding a product already in the
//! cart merges into its line instead of duplicating it.
//!
//! The finished cart becomes a single `SalePayload` with its items embedded,
//! so a sale and its lines are created or replaced by one request.

use crate::error::ErrorCode;
use crate::model::{Customer, Id, PaymentMethod, Product, SaleItemPayload, SalePayload, SaleStatus};
use crate::util::dates::{format_day, today};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CartError {
    #[error("Seleccione un producto y cantidad válida")]
    InvalidQuantity,

    #[error("Stock insuficiente. Disponible: {available}")]
    InsufficientStock { available: i64 },

    #[error("el producto {0} no está en el carrito")]
    NotInCart(Id),

    #[error("El nombre del cliente es requerido")]
    CustomerRequired,

    #[error("Debe agregar al menos un producto")]
    Empty,
}

impl ErrorCode for CartError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidQuantity => "E_CART_QUANTITY",
            Self::InsufficientStock { .. } => "E_CART_STOCK",
            Self::NotInCart(_) => "E_CART_NOT_FOUND",
            Self::CustomerRequired => "E_CART_CUSTOMER",
            Self::Empty => "E_CART_EMPTY",
        }
    }
}

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomerChoice {
    Existing { id: Id, name: String },
    /// Not registered; only the name is stored on the sale.
    WalkIn(String),
}

impl CustomerChoice {
    #[must_use]
    pub fn existing(customer: &Customer) -> Self {
        Self::Existing { id: customer.id, name: customer.full_name() }
    }

    fn id(&self) -> Option<Id> {
        match self {
            Self::Existing { id, .. } => Some(*id),
            Self::WalkIn(_) => None,
        }
    }

    fn name(&self) -> &str {
        match self {
            Self::Existing { name, .. } | Self::WalkIn(name) => name.trim(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub product_id: Id,
    pub name: String,
    pub unit_price: f64,
    pub quantity: i64,
    pub available: i64,
}

impl CartLine {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn subtotal(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SaleDraft {
    pub customer: Option<CustomerChoice>,
    pub payment: PaymentMethod,
    lines: Vec<CartLine>,
}

// =============================================================================
// OPERATIONS
// =============================================================================

impl SaleDraft {
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add `quantity` of `product`, merging with an existing line.
    ///
    /// # Errors
    ///
    /// - `InvalidQuantity` when `quantity` is not above zero
    /// - `InsufficientStock` when the line would exceed the product's stock
    pub fn add(&mut self, product: &Product, quantity: i64) -> Result<(), CartError> {
        if quantity <= 0 {
            return Err(CartError::InvalidQuantity);
        }
        let current = self.lines.iter().find(|l| l.product_id == product.id).map_or(0, |l| l.quantity);
        let wanted = current.saturating_add(quantity);
        if wanted > product.stock {
            return Err(CartError::InsufficientStock { available: product.stock.max(0) });
        }
        match self.lines.iter_mut().find(|l| l.product_id == product.id) {
            Some(line) => {
                line.quantity = wanted;
                line.available = product.stock;
            }
            None => self.lines.push(CartLine {
                product_id: product.id,
                name: product.name.clone(),
                unit_price: product.price,
                quantity,
                available: product.stock,
            }),
        }
        Ok(())
    }

    /// Set a line's quantity. Zero or less removes the line.
    ///
    /// # Errors
    ///
    /// - `NotInCart` for an unknown product
    /// - `InsufficientStock` above the line's available stock
    pub fn update_quantity(&mut self, product_id: Id, quantity: i64) -> Result<(), CartError> {
        if quantity <= 0 {
            return self.remove(product_id);
        }
        let line = self.lines.iter_mut().find(|l| l.product_id == product_id).ok_or(CartError::NotInCart(product_id))?;
        if quantity > line.available {
            return Err(CartError::InsufficientStock { available: line.available.max(0) });
        }
        line.quantity = quantity;
        Ok(())
    }

    /// # Errors
    ///
    /// `NotInCart` for an unknown product.
    pub fn remove(&mut self, product_id: Id) -> Result<(), CartError> {
        let before = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);
        if self.lines.len() == before { Err(CartError::NotInCart(product_id)) } else { Ok(()) }
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Build the sale body, dated today and marked completed.
    ///
    /// # Errors
    ///
    /// `CustomerRequired` without a customer name, `Empty` without lines.
    pub fn to_payload(&self) -> Result<SalePayload, CartError> {
        let customer = self.customer.as_ref().filter(|c| !c.name().is_empty()).ok_or(CartError::CustomerRequired)?;
        if self.lines.is_empty() {
            return Err(CartError::Empty);
        }
        Ok(SalePayload {
            customer_id: customer.id(),
            customer: customer.name().to_owned(),
            total: self.total(),
            payment_method: self.payment.clone(),
            status: SaleStatus::Completed,
            sale_date: format_day(today()),
            items: self
                .lines
                .iter()
                .map(|l| SaleItemPayload {
                    product_id: l.product_id,
                    quantity: l.quantity,
                    unit_price: l.unit_price,
                    subtotal: l.subtotal(),
                })
                .collect(),
        })
    }
}

#[cfg(test)]
#[path = "cart_test.rs"]
mod tests;
