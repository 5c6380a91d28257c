//! Entity forms: mode, draft, validation, and submission.
//!
//! DESIGN
//! ======
//! A `Form` pairs a `FormMode` with a draft of raw input strings. Drafts know
//! how to load from a record and how to `normalize` into the typed payload the
//! API expects; the form adds the mode rules on top:
//!
//! - opening a form always resets the draft
//! - `View` is read-only and refuses to submit
//! - `Create` submits a `POST`, `Edit(id)` a `PUT` on that id
//!
//! Validation messages are user-facing and therefore Spanish.

pub mod catalog;
pub mod ledger;
pub mod purchase;

pub use catalog::{CategoryDraft, CustomerDraft, ProductDraft, SupplierDraft};
pub use ledger::{ExpenseDraft, IncomeDraft, TransactionDraft};
pub use purchase::PurchaseItemDraft;

use crate::error::ErrorCode;
use crate::model::{Id, Record};
use crate::util::numbers::parse_integer;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Create,
    Edit(Id),
    View(Id),
}

impl FormMode {
    #[must_use]
    pub fn is_read_only(self) -> bool {
        matches!(self, Self::View(_))
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Create => "Crear",
            Self::Edit(_) => "Editar",
            Self::View(_) => "Ver",
        }
    }
}

/// What a successful submit asks the API to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission<P> {
    Create(P),
    Update(Id, P),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    /// A required field is empty; carries the full message.
    #[error("{0}")]
    Required(&'static str),

    /// A field failed a range or format check; carries the full message.
    #[error("{0}")]
    Invalid(&'static str),

    #[error("el formulario está en modo de solo lectura")]
    ReadOnly,
}

impl ErrorCode for FormError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Required(_) => "E_FORM_REQUIRED",
            Self::Invalid(_) => "E_FORM_INVALID",
            Self::ReadOnly => "E_FORM_READ_ONLY",
        }
    }
}

/// Raw form input for one entity.
pub trait Draft: Default + Clone {
    type Record: Record;
    type Payload;

    /// Populate every input from an existing record.
    fn from_record(record: &Self::Record) -> Self;

    /// Trim, coerce, and validate into the API payload.
    ///
    /// # Errors
    ///
    /// Returns the first failing check as a `FormError`.
    fn normalize(&self) -> Result<Self::Payload, FormError>;
}

// =============================================================================
// FORM
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct Form<D> {
    pub mode: FormMode,
    pub draft: D,
}

impl<D: Draft> Form<D> {
    #[must_use]
    pub fn open_create() -> Self {
        Self { mode: FormMode::Create, draft: D::default() }
    }

    #[must_use]
    pub fn open_edit(record: &D::Record) -> Self {
        Self { mode: FormMode::Edit(record.id()), draft: D::from_record(record) }
    }

    #[must_use]
    pub fn open_view(record: &D::Record) -> Self {
        Self { mode: FormMode::View(record.id()), draft: D::from_record(record) }
    }

    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.mode.is_read_only()
    }

    /// Validate the draft and pick create or update.
    ///
    /// # Errors
    ///
    /// `ReadOnly` in view mode, otherwise the draft's validation error.
    pub fn submit(&self) -> Result<Submission<D::Payload>, FormError> {
        match self.mode {
            FormMode::View(_) => Err(FormError::ReadOnly),
            FormMode::Create => Ok(Submission::Create(self.draft.normalize()?)),
            FormMode::Edit(id) => Ok(Submission::Update(id, self.draft.normalize()?)),
        }
    }
}

// =============================================================================
// INPUT HELPERS
// =============================================================================

/// Trimmed, non-empty text or `None`.
#[must_use]
pub fn optional_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_owned()) }
}

/// Trimmed text, or `Required(message)` when empty.
///
/// # Errors
///
/// `FormError::Required` when the trimmed input is empty.
pub fn required_text(raw: &str, message: &'static str) -> Result<String, FormError> {
    optional_text(raw).ok_or(FormError::Required(message))
}

/// Optional id input: empty is `None`, anything else must be an integer.
///
/// # Errors
///
/// `FormError::Invalid(message)` for non-numeric input.
pub fn optional_id(raw: &str, message: &'static str) -> Result<Option<Id>, FormError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_integer(raw).map(Some).ok_or(FormError::Invalid(message))
}

/// Render an optional value back into an input string.
#[must_use]
pub fn input_of<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
