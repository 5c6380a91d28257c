//! Drafts for products, categories, suppliers, and customers.

use super::{input_of, optional_id, optional_text, required_text, Draft, FormError};
use crate::model::catalog::DEFAULT_MIN_STOCK;
use crate::model::{
    Category, CategoryPayload, Customer, CustomerPayload, Product, ProductPayload, Supplier, SupplierPayload,
};
use crate::util::numbers::{decimal_or, integer_or};

// =============================================================================
// PRODUCT
// =============================================================================

/// Product form input. Blank numeric inputs fall back to 0, except
/// `min_stock` which falls back to 5; integer inputs truncate decimals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: String,
    pub cost: String,
    pub stock: String,
    pub min_stock: String,
    pub category_id: String,
    pub supplier_id: String,
    pub sku: String,
    pub barcode: String,
    pub image: String,
    pub is_active: bool,
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            price: String::new(),
            cost: String::new(),
            stock: String::new(),
            min_stock: DEFAULT_MIN_STOCK.to_string(),
            category_id: String::new(),
            supplier_id: String::new(),
            sku: String::new(),
            barcode: String::new(),
            image: String::new(),
            is_active: true,
        }
    }
}

impl Draft for ProductDraft {
    type Record = Product;
    type Payload = ProductPayload;

    fn from_record(p: &Product) -> Self {
        Self {
            name: p.name.clone(),
            description: p.description.clone().unwrap_or_default(),
            price: p.price.to_string(),
            cost: p.cost.to_string(),
            stock: p.stock.to_string(),
            min_stock: p.min_stock.to_string(),
            category_id: input_of(p.category_id),
            supplier_id: input_of(p.supplier_id),
            sku: p.sku().to_owned(),
            barcode: p.barcode.clone().unwrap_or_default(),
            image: p.image.clone().unwrap_or_default(),
            is_active: p.is_active,
        }
    }

    fn normalize(&self) -> Result<ProductPayload, FormError> {
        let name = required_text(&self.name, "El nombre del producto es requerido")?;

        let price = decimal_or(&self.price, 0.0);
        if price < 0.0 {
            return Err(FormError::Invalid("El precio no puede ser negativo"));
        }
        let cost = decimal_or(&self.cost, 0.0);
        if cost < 0.0 {
            return Err(FormError::Invalid("El costo no puede ser negativo"));
        }
        let stock = integer_or(&self.stock, 0);
        if stock < 0 {
            return Err(FormError::Invalid("El stock no puede ser negativo"));
        }
        let min_stock = integer_or(&self.min_stock, DEFAULT_MIN_STOCK);
        if min_stock < 0 {
            return Err(FormError::Invalid("El stock mínimo no puede ser negativo"));
        }

        Ok(ProductPayload {
            name,
            description: optional_text(&self.description),
            price,
            cost,
            stock,
            min_stock,
            category_id: optional_id(&self.category_id, "Categoría inválida")?,
            supplier_id: optional_id(&self.supplier_id, "Proveedor inválido")?,
            sku: self.sku.trim().to_owned(),
            barcode: optional_text(&self.barcode),
            is_active: self.is_active,
            image: optional_text(&self.image),
        })
    }
}

// =============================================================================
// CATEGORY
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryDraft {
    pub name: String,
    pub description: String,
}

impl Draft for CategoryDraft {
    type Record = Category;
    type Payload = CategoryPayload;

    fn from_record(c: &Category) -> Self {
        Self { name: c.name.clone(), description: c.description.clone().unwrap_or_default() }
    }

    fn normalize(&self) -> Result<CategoryPayload, FormError> {
        Ok(CategoryPayload {
            name: required_text(&self.name, "El nombre de la categoría es requerido")?,
            description: optional_text(&self.description),
        })
    }
}

// =============================================================================
// SUPPLIER
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupplierDraft {
    pub name: String,
    pub contact_person: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub active: bool,
}

impl Default for SupplierDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            contact_person: String::new(),
            phone: String::new(),
            email: String::new(),
            address: String::new(),
            city: String::new(),
            state: String::new(),
            postal_code: String::new(),
            active: true,
        }
    }
}

impl Draft for SupplierDraft {
    type Record = Supplier;
    type Payload = SupplierPayload;

    fn from_record(s: &Supplier) -> Self {
        Self {
            name: s.name.clone(),
            contact_person: s.contact_person.clone().unwrap_or_default(),
            phone: s.phone.clone().unwrap_or_default(),
            email: s.email.clone().unwrap_or_default(),
            address: s.address.clone().unwrap_or_default(),
            city: s.city.clone().unwrap_or_default(),
            state: s.state.clone().unwrap_or_default(),
            postal_code: s.postal_code.clone().unwrap_or_default(),
            active: s.active,
        }
    }

    fn normalize(&self) -> Result<SupplierPayload, FormError> {
        let name = required_text(&self.name, "El nombre del proveedor es requerido")?;
        let email = optional_text(&self.email);
        if email.as_deref().is_some_and(|e| !looks_like_email(e)) {
            return Err(FormError::Invalid("El correo electrónico no es válido"));
        }
        Ok(SupplierPayload {
            name,
            contact_person: optional_text(&self.contact_person),
            phone: optional_text(&self.phone),
            email,
            address: optional_text(&self.address),
            city: optional_text(&self.city),
            state: optional_text(&self.state),
            postal_code: optional_text(&self.postal_code),
            active: self.active,
        })
    }
}

// =============================================================================
// CUSTOMER
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerDraft {
    pub first_name: String,
    pub last_name: String,
    pub cc: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub active: bool,
}

impl Default for CustomerDraft {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            cc: String::new(),
            phone: String::new(),
            email: String::new(),
            address: String::new(),
            city: String::new(),
            state: String::new(),
            postal_code: String::new(),
            active: true,
        }
    }
}

impl Draft for CustomerDraft {
    type Record = Customer;
    type Payload = CustomerPayload;

    fn from_record(c: &Customer) -> Self {
        Self {
            first_name: c.first_name.clone(),
            last_name: c.last_name.clone(),
            cc: c.cc.clone().unwrap_or_default(),
            phone: c.phone.clone().unwrap_or_default(),
            email: c.email.clone().unwrap_or_default(),
            address: c.address.clone().unwrap_or_default(),
            city: c.city.clone().unwrap_or_default(),
            state: c.state.clone().unwrap_or_default(),
            postal_code: c.postal_code.clone().unwrap_or_default(),
            active: c.active,
        }
    }

    fn normalize(&self) -> Result<CustomerPayload, FormError> {
        let first_name = required_text(&self.first_name, "El nombre es requerido")?;
        let last_name = required_text(&self.last_name, "El apellido es requerido")?;
        let email = optional_text(&self.email);
        if email.as_deref().is_some_and(|e| !looks_like_email(e)) {
            return Err(FormError::Invalid("El correo electrónico no es válido"));
        }
        Ok(CustomerPayload {
            first_name,
            last_name,
            cc: optional_text(&self.cc),
            phone: optional_text(&self.phone),
            email,
            address: optional_text(&self.address),
            city: optional_text(&self.city),
            state: optional_text(&self.state),
            postal_code: optional_text(&self.postal_code),
            active: self.active,
        })
    }
}

/// `local@domain.tld` shape check; the backend does the real validation.
fn looks_like_email(raw: &str) -> bool {
    match raw.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.'),
        None => false,
    }
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
