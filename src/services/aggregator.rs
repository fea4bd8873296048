//! Aggregator service for monthly expense statistics
//!
//! All sums are exact decimals. Groupings keep the order in which each key
//! is first seen, so an ascending-by-date input yields chronological output.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::types::{Category, CategoryTotal, DailyTotal, ExpenseAggregate, ExpenseRecord};

/// Calendar days shown on the trend chart, today included
pub const TREND_WINDOW_DAYS: i64 = 7;

/// Aggregator for computing expense statistics
pub struct Aggregator;

impl Aggregator {
    /// Run every reduction over one month of expenses
    pub fn aggregate(expenses: &[ExpenseRecord], today: NaiveDate) -> ExpenseAggregate {
        ExpenseAggregate {
            total: Self::total(expenses),
            by_category: Self::by_category(expenses),
            by_day: Self::by_day(expenses, today),
        }
    }

    /// Sum of all amounts at full precision
    pub fn total(expenses: &[ExpenseRecord]) -> Decimal {
        expenses
            .iter()
            .fold(Decimal::ZERO, |sum, e| sum.saturating_add(e.amount))
    }

    /// Sum per category, in order of first occurrence.
    /// Unrecognized labels get their own entry.
    pub fn by_category(expenses: &[ExpenseRecord]) -> Vec<CategoryTotal> {
        let mut index: HashMap<&Category, usize> = HashMap::new();
        let mut totals: Vec<CategoryTotal> = Vec::new();

        for expense in expenses {
            let slot = *index.entry(&expense.category).or_insert_with(|| {
                totals.push(CategoryTotal {
                    category: expense.category.clone(),
                    amount: Decimal::ZERO,
                });
                totals.len() - 1
            });
            totals[slot].amount = totals[slot].amount.saturating_add(expense.amount);
        }

        totals
    }

    /// First day kept by the trend window.
    /// A record dated exactly `TREND_WINDOW_DAYS` ago falls outside it.
    pub fn trend_window_start(today: NaiveDate) -> NaiveDate {
        today - chrono::Duration::days(TREND_WINDOW_DAYS - 1)
    }

    /// Sum per calendar day for expenses inside the trend window,
    /// in order of first occurrence
    pub fn by_day(expenses: &[ExpenseRecord], today: NaiveDate) -> Vec<DailyTotal> {
        let start = Self::trend_window_start(today);
        let mut index: HashMap<NaiveDate, usize> = HashMap::new();
        let mut days: Vec<DailyTotal> = Vec::new();

        for expense in expenses.iter().filter(|e| e.date >= start) {
            let slot = *index.entry(expense.date).or_insert_with(|| {
                days.push(DailyTotal {
                    date: expense.date,
                    amount: Decimal::ZERO,
                });
                days.len() - 1
            });
            days[slot].amount = days[slot].amount.saturating_add(expense.amount);
        }

        days
    }
}
