//! Income and expense ledger entries.

use serde::{Deserialize, Serialize};

use super::{Id, Record, Resource};
use crate::util::numbers::{de_decimal, de_integer};

/// Category used when a ledger entry is saved without one.
pub const DEFAULT_LEDGER_CATEGORY: &str = "Otros";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LedgerKind {
    Income,
    Expense,
}

impl LedgerKind {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Income => "Ingresos",
            Self::Expense => "Gastos",
        }
    }
}

/// Read access shared by both ledgers, for totals and period filters.
pub trait LedgerEntry: Record {
    const KIND: LedgerKind;
    fn amount(&self) -> f64;
    fn category(&self) -> &str;
    fn date(&self) -> &str;
    fn description(&self) -> &str;
}

// =============================================================================
// INCOME
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Income {
    #[serde(deserialize_with = "de_integer")]
    pub id: Id,
    #[serde(default)]
    pub description: String,
    #[serde(deserialize_with = "de_decimal")]
    pub amount: f64,
    #[serde(default)]
    pub category: String,
    #[serde(alias = "date")]
    pub income_date: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Record for Income {
    fn id(&self) -> Id {
        self.id
    }
}

impl Resource for Income {
    const PATH: &'static str = "/incomes";
    const NOUN: &'static str = "ingreso";
    type Payload = IncomePayload;
}

impl LedgerEntry for Income {
    const KIND: LedgerKind = LedgerKind::Income;

    fn amount(&self) -> f64 {
        self.amount
    }

    fn category(&self) -> &str {
        &self.category
    }

    fn date(&self) -> &str {
        &self.income_date
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncomePayload {
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub income_date: String,
}

// =============================================================================
// EXPENSE
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    #[serde(deserialize_with = "de_integer")]
    pub id: Id,
    #[serde(default)]
    pub description: String,
    #[serde(deserialize_with = "de_decimal")]
    pub amount: f64,
    #[serde(default)]
    pub category: String,
    #[serde(alias = "date")]
    pub expense_date: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Record for Expense {
    fn id(&self) -> Id {
        self.id
    }
}

impl Resource for Expense {
    const PATH: &'static str = "/expenses";
    const NOUN: &'static str = "gasto";
    type Payload = ExpensePayload;
}

impl LedgerEntry for Expense {
    const KIND: LedgerKind = LedgerKind::Expense;

    fn amount(&self) -> f64 {
        self.amount
    }

    fn category(&self) -> &str {
        &self.category
    }

    fn date(&self) -> &str {
        &self.expense_date
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpensePayload {
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub expense_date: String,
}
