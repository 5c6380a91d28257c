//! Stock adjustment flow as an explicit state machine.
//!
//! DESIGN
//! ======
//! ```text
//! Idle ──open──▶ SelectingDirection ──choose──▶ EnteringQuantity
//!                                                  │   ▲
//!                                          enter_quantity back
//!                                                  ▼   │
//!                            Submitted ◀──confirm── Confirming
//! ```
//! `cancel` returns to `Idle` from any step. Transitions that do not apply to
//! the current step fail with `AdjustError::InvalidTransition` and leave the
//! step untouched; so do quantity validation failures.
//!
//! The plan carries the new absolute stock computed from the snapshot taken
//! at `open`. The backend replaces its value with it, so two concurrent
//! adjustments of the same product can lose one update.

use crate::error::ErrorCode;
use crate::model::{Id, Product, StockUpdate};
use crate::util::numbers::parse_integer;

pub const DEFAULT_REASON: &str = "Ajuste de inventario";

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Add,
    Subtract,
}

impl Direction {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Add => "Agregar",
            Self::Subtract => "Restar",
        }
    }
}

/// Product snapshot taken when the flow opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub id: Id,
    pub name: String,
    pub stock: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjustmentPlan {
    pub target: Target,
    pub direction: Direction,
    pub quantity: i64,
    pub new_stock: i64,
    pub reason: String,
}

impl AdjustmentPlan {
    /// Body for `PATCH /products/{id}/stock`.
    #[must_use]
    pub fn payload(&self) -> StockUpdate {
        StockUpdate {
            stock: self.new_stock,
            adjustment_type: self.direction.as_str(),
            adjustment_quantity: self.quantity,
            reason: self.reason.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AdjustStep {
    #[default]
    Idle,
    SelectingDirection(Target),
    EnteringQuantity(Target, Direction),
    Confirming(AdjustmentPlan),
    Submitted(AdjustmentPlan),
}

impl AdjustStep {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::SelectingDirection(_) => "selecting_direction",
            Self::EnteringQuantity(..) => "entering_quantity",
            Self::Confirming(_) => "confirming",
            Self::Submitted(_) => "submitted",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdjustError {
    #[error("Por favor ingrese una cantidad válida")]
    InvalidQuantity,

    #[error("El stock no puede ser negativo (disponible: {available})")]
    NegativeStock { available: i64 },

    #[error("no se puede {action} en el paso '{step}'")]
    InvalidTransition { action: &'static str, step: &'static str },
}

impl ErrorCode for AdjustError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidQuantity => "E_INVALID_QUANTITY",
            Self::NegativeStock { .. } => "E_NEGATIVE_STOCK",
            Self::InvalidTransition { .. } => "E_INVALID_TRANSITION",
        }
    }
}

// =============================================================================
// STATE MACHINE
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct StockAdjustment {
    step: AdjustStep,
}

impl StockAdjustment {
    #[must_use]
    pub fn step(&self) -> &AdjustStep {
        &self.step
    }

    fn invalid(&self, action: &'static str) -> AdjustError {
        AdjustError::InvalidTransition { action, step: self.step.name() }
    }

    /// Start adjusting `product`. Valid from `Idle` or after a submit.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` while another adjustment is in progress.
    pub fn open(&mut self, product: &Product) -> Result<(), AdjustError> {
        match self.step {
            AdjustStep::Idle | AdjustStep::Submitted(_) => {
                self.step = AdjustStep::SelectingDirection(Target {
                    id: product.id,
                    name: product.name.clone(),
                    stock: product.stock,
                });
                Ok(())
            }
            _ => Err(self.invalid("abrir el ajuste")),
        }
    }

    /// Pick add or subtract. May be re-chosen while entering the quantity.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` outside direction or quantity entry.
    pub fn choose(&mut self, direction: Direction) -> Result<(), AdjustError> {
        match &self.step {
            AdjustStep::SelectingDirection(target) | AdjustStep::EnteringQuantity(target, _) => {
                self.step = AdjustStep::EnteringQuantity(target.clone(), direction);
                Ok(())
            }
            _ => Err(self.invalid("elegir el tipo de ajuste")),
        }
    }

    /// Validate the quantity and move to confirmation with a preview.
    ///
    /// A blank `reason` becomes "Ajuste de inventario".
    ///
    /// # Errors
    ///
    /// - `InvalidQuantity` unless the input is an integer above zero
    /// - `NegativeStock` when subtracting more than the current stock
    /// - `InvalidTransition` outside quantity entry
    pub fn enter_quantity(&mut self, raw: &str, reason: &str) -> Result<AdjustmentPlan, AdjustError> {
        let AdjustStep::EnteringQuantity(target, direction) = &self.step else {
            return Err(self.invalid("ingresar la cantidad"));
        };
        let quantity = match parse_integer(raw) {
            Some(q) if q > 0 => q,
            _ => return Err(AdjustError::InvalidQuantity),
        };
        let new_stock = preview(target.stock, *direction, quantity)?;
        let reason = match reason.trim() {
            "" => DEFAULT_REASON.to_owned(),
            r => r.to_owned(),
        };
        let plan = AdjustmentPlan { target: target.clone(), direction: *direction, quantity, new_stock, reason };
        self.step = AdjustStep::Confirming(plan.clone());
        Ok(plan)
    }

    /// Return from confirmation to quantity entry.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` outside confirmation.
    pub fn back(&mut self) -> Result<(), AdjustError> {
        match &self.step {
            AdjustStep::Confirming(plan) => {
                self.step = AdjustStep::EnteringQuantity(plan.target.clone(), plan.direction);
                Ok(())
            }
            _ => Err(self.invalid("volver")),
        }
    }

    /// Accept the plan and return the request body to send.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` outside confirmation.
    pub fn confirm(&mut self) -> Result<(Id, StockUpdate), AdjustError> {
        let AdjustStep::Confirming(plan) = &self.step else {
            return Err(self.invalid("confirmar"));
        };
        let request = (plan.target.id, plan.payload());
        self.step = AdjustStep::Submitted(plan.clone());
        Ok(request)
    }

    pub fn cancel(&mut self) {
        self.step = AdjustStep::Idle;
    }
}

/// Stock after applying `quantity` in `direction` to `current`.
///
/// # Errors
///
/// `NegativeStock` iff subtracting more than `current`.
pub fn preview(current: i64, direction: Direction, quantity: i64) -> Result<i64, AdjustError> {
    match direction {
        Direction::Add => Ok(current.saturating_add(quantity)),
        Direction::Subtract if quantity > current => Err(AdjustError::NegativeStock { available: current.max(0) }),
        Direction::Subtract => Ok(current - quantity),
    }
}

#[cfg(test)]
#[path = "stock_test.rs"]
mod tests;
