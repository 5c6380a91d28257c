//! Income and expense ledgers: loading, period filters, totals.
//!
//! DESIGN
//! ======
//! Periods are calendar buckets relative to a reference day: the same day,
//! the same ISO week, the same month, or the same year. Entries whose date
//! cannot be parsed never match a period, but still count when no period is
//! applied.

use std::fmt;

use serde::Serialize;
use time::Date;

use crate::model::{Expense, Income, LedgerEntry};
use crate::net::ApiClient;
use crate::state::ListState;
use crate::util::dates::parse_day;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Day,
    Week,
    Month,
    Year,
}

impl Period {
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "day" | "dia" | "día" | "hoy" => Some(Self::Day),
            "week" | "semana" => Some(Self::Week),
            "month" | "mes" => Some(Self::Month),
            "year" | "año" | "ano" => Some(Self::Year),
            _ => None,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Day => "Hoy",
            Self::Week => "Esta semana",
            Self::Month => "Este mes",
            Self::Year => "Este año",
        }
    }

    #[must_use]
    pub fn contains(self, date: Date, reference: Date) -> bool {
        match self {
            Self::Day => date == reference,
            Self::Week => {
                let (year, week, _) = date.to_iso_week_date();
                let (ref_year, ref_week, _) = reference.to_iso_week_date();
                year == ref_year && week == ref_week
            }
            Self::Month => date.year() == reference.year() && date.month() == reference.month(),
            Self::Year => date.year() == reference.year(),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Entries inside `period` of `reference`, or all of them without a period.
#[must_use]
pub fn filter_period<E: LedgerEntry>(entries: &[E], period: Option<Period>, reference: Date) -> Vec<&E> {
    entries
        .iter()
        .filter(|e| match period {
            None => true,
            Some(p) => parse_day(e.date()).is_some_and(|d| p.contains(d, reference)),
        })
        .collect()
}

#[must_use]
pub fn sum<E: LedgerEntry>(entries: &[&E]) -> f64 {
    entries.iter().map(|e| e.amount()).sum()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct LedgerTotals {
    pub income: f64,
    pub expenses: f64,
    pub balance: f64,
}

impl LedgerTotals {
    #[must_use]
    pub fn new(income: f64, expenses: f64) -> Self {
        Self { income, expenses, balance: income - expenses }
    }
}

// =============================================================================
// LEDGER
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct Ledger {
    pub incomes: ListState<Income>,
    pub expenses: ListState<Expense>,
}

impl Ledger {
    /// Fetch both ledgers concurrently. Each keeps its own error.
    pub async fn load(&mut self, api: &ApiClient) {
        self.incomes.begin_load();
        self.expenses.begin_load();
        let (incomes, expenses) = tokio::join!(api.list::<Income>(), api.list::<Expense>());
        self.incomes.finish_load(incomes);
        self.expenses.finish_load(expenses);
    }

    #[must_use]
    pub fn totals(&self, period: Option<Period>, reference: Date) -> LedgerTotals {
        LedgerTotals::new(
            sum(&filter_period(&self.incomes.items, period, reference)),
            sum(&filter_period(&self.expenses.items, period, reference)),
        )
    }

    /// First load error of either ledger.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.incomes.error.as_deref().or(self.expenses.error.as_deref())
    }
}

#[cfg(test)]
#[path = "ledger_test.rs"]
mod tests;
