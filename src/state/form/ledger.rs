//! Income and expense drafts.
//!
//! Both ledgers share the same inputs; `TransactionDraft` validates them once
//! and the two wrappers only pick the payload's date field name.

use super::{optional_text, Draft, FormError};
use crate::model::ledger::DEFAULT_LEDGER_CATEGORY;
use crate::model::{Expense, ExpensePayload, Income, IncomePayload, LedgerEntry};
use crate::util::dates::{format_day, parse_exact_day, today};
use crate::util::numbers::parse_decimal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDraft {
    pub description: String,
    pub amount: String,
    pub category: String,
    /// `YYYY-MM-DD`; defaults to today.
    pub date: String,
}

impl Default for TransactionDraft {
    fn default() -> Self {
        Self { description: String::new(), amount: String::new(), category: String::new(), date: format_day(today()) }
    }
}

/// Validated transaction fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub date: String,
}

impl TransactionDraft {
    fn from_entry(entry: &impl LedgerEntry) -> Self {
        Self {
            description: entry.description().to_owned(),
            amount: entry.amount().to_string(),
            category: entry.category().to_owned(),
            date: entry.date().get(..10).unwrap_or(entry.date()).to_owned(),
        }
    }

    /// Amount must be a number above zero; a blank category becomes `Otros`.
    ///
    /// # Errors
    ///
    /// `Invalid` for a missing or non-positive amount or a malformed date.
    pub fn validate(&self) -> Result<Transaction, FormError> {
        let amount = match parse_decimal(&self.amount) {
            Some(v) if v > 0.0 => v,
            _ => return Err(FormError::Invalid("Por favor ingrese un monto válido")),
        };
        let date = parse_exact_day(&self.date).ok_or(FormError::Invalid("La fecha debe tener el formato AAAA-MM-DD"))?;
        Ok(Transaction {
            description: self.description.trim().to_owned(),
            amount,
            category: optional_text(&self.category).unwrap_or_else(|| DEFAULT_LEDGER_CATEGORY.to_owned()),
            date: format_day(date),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncomeDraft(pub TransactionDraft);

impl Draft for IncomeDraft {
    type Record = Income;
    type Payload = IncomePayload;

    fn from_record(record: &Income) -> Self {
        Self(TransactionDraft::from_entry(record))
    }

    fn normalize(&self) -> Result<IncomePayload, FormError> {
        let t = self.0.validate()?;
        Ok(IncomePayload { description: t.description, amount: t.amount, category: t.category, income_date: t.date })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseDraft(pub TransactionDraft);

impl Draft for ExpenseDraft {
    type Record = Expense;
    type Payload = ExpensePayload;

    fn from_record(record: &Expense) -> Self {
        Self(TransactionDraft::from_entry(record))
    }

    fn normalize(&self) -> Result<ExpensePayload, FormError> {
        let t = self.0.validate()?;
        Ok(ExpensePayload { description: t.description, amount: t.amount, category: t.category, expense_date: t.date })
    }
}

#[cfg(test)]
#[path = "ledger_test.rs"]
mod tests;
