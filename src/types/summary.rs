//! Derived dashboard types
//!
//! Everything here is recomputed from a fresh snapshot on each load and never
//! persisted.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::money::serialize_rounded;
use super::records::{
    Category, EntertainmentRecord, EntertainmentStatus, ExpenseRecord, ProjectRecord, TodoRecord,
};
use super::QueryWarning;

/// Summed amount for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub amount: Decimal,
}

/// Summed amount for one calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub amount: Decimal,
}

/// Aggregated monthly expenses (full precision, first-occurrence order)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExpenseAggregate {
    pub total: Decimal,
    pub by_category: Vec<CategoryTotal>,
    pub by_day: Vec<DailyTotal>,
}

/// Category bar of the "By Category" chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    #[serde(serialize_with = "serialize_rounded")]
    pub value: Decimal,
    pub color: &'static str,
}

/// Point of the "Expense Trend" line chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyTrendPoint {
    /// Short month + day (e.g., "Jan 5")
    pub label: String,
    #[serde(serialize_with = "serialize_rounded")]
    pub value: Decimal,
}

/// Headline numbers of the overview
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardSummary {
    #[serde(serialize_with = "serialize_rounded")]
    pub total_monthly_expense: Decimal,
    pub pending_todo_count: usize,
    pub active_entertainment_count: usize,
}

/// Greeting card built from the profile row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileCard {
    pub display_name: String,
    pub initial: Option<char>,
    pub avatar_url: Option<String>,
}

/// Everything the overview page shows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub profile: ProfileCard,
    pub summary: DashboardSummary,
    pub category_series: Vec<ChartPoint>,
    pub trend_series: Vec<DailyTrendPoint>,
    pub upcoming_todos: Vec<TodoRecord>,
    pub active_entertainment: Vec<EntertainmentRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<QueryWarning>,
}

impl Overview {
    /// Empty series suppress their chart entirely
    pub fn shows_category_chart(&self) -> bool {
        !self.category_series.is_empty()
    }

    pub fn shows_trend_chart(&self) -> bool {
        !self.trend_series.is_empty()
    }
}

/// Expense list with its listed total
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExpenseList {
    pub expenses: Vec<ExpenseRecord>,
    #[serde(serialize_with = "serialize_rounded")]
    pub total: Decimal,
}

/// Completed vs. total todos
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TodoProgress {
    pub completed: usize,
    pub total: usize,
}

/// All todos (newest first) with completion progress
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TodoList {
    pub progress: TodoProgress,
    pub todos: Vec<TodoRecord>,
}

/// Project kanban board (each column newest first)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectBoard {
    pub idea: Vec<ProjectRecord>,
    pub in_progress: Vec<ProjectRecord>,
    pub done: Vec<ProjectRecord>,
    /// Projects whose status is outside the known columns
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unrecognized: Vec<ProjectRecord>,
}

/// One status column of the entertainment board
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusColumn {
    pub status: EntertainmentStatus,
    pub items: Vec<EntertainmentRecord>,
}

/// Entertainment board: games, and movies & series together
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EntertainmentBoard {
    pub games: Vec<StatusColumn>,
    pub screen: Vec<StatusColumn>,
}

/// A listing view plus the warnings raised while loading it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct View<T> {
    #[serde(flatten)]
    pub data: T,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<QueryWarning>,
}
