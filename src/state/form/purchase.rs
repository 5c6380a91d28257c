//! Purchase line item draft.

use super::{input_of, optional_id, Draft, FormError};
use crate::model::{Id, Product, PurchaseItem, PurchaseItemPayload};
use crate::util::numbers::{parse_decimal, parse_integer};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PurchaseItemDraft {
    pub purchase_id: String,
    pub product_id: String,
    pub quantity: String,
    pub cost: String,
}

impl PurchaseItemDraft {
    /// Select a product; its cost pre-fills the cost input when it has one.
    pub fn select_product(&mut self, product: &Product) {
        self.product_id = product.id.to_string();
        if product.cost > 0.0 {
            self.cost = product.cost.to_string();
        }
    }

    fn product(&self) -> Result<Id, FormError> {
        optional_id(&self.product_id, "Producto inválido")?.ok_or(FormError::Required("Debe seleccionar un producto"))
    }
}

impl Draft for PurchaseItemDraft {
    type Record = PurchaseItem;
    type Payload = PurchaseItemPayload;

    fn from_record(item: &PurchaseItem) -> Self {
        Self {
            purchase_id: input_of(item.purchase_id),
            product_id: item.product_id.to_string(),
            quantity: item.quantity.to_string(),
            cost: item.cost.to_string(),
        }
    }

    fn normalize(&self) -> Result<PurchaseItemPayload, FormError> {
        let product_id = self.product()?;
        let quantity = match parse_integer(&self.quantity) {
            Some(q) if q > 0 => q,
            _ => return Err(FormError::Invalid("Por favor ingrese una cantidad válida mayor a 0")),
        };
        let cost = match parse_decimal(&self.cost) {
            Some(c) if c >= 0.0 => c,
            _ => return Err(FormError::Invalid("Por favor ingrese un costo unitario válido")),
        };
        Ok(PurchaseItemPayload {
            purchase_id: optional_id(&self.purchase_id, "Compra inválida")?,
            product_id,
            quantity,
            cost,
        })
    }
}

#[cfg(test)]
#[path = "purchase_test.rs"]
mod tests;
