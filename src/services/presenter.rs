//! Presenter: chart-ready projections of aggregated data

use crate::services::collector::DashboardData;
use crate::types::money::round_currency;
use crate::types::{
    Category, CategoryTotal, ChartPoint, DailyTotal, DailyTrendPoint, DashboardSummary,
    EntertainmentRecord, ExpenseAggregate, Overview, ProfileCard, ProfileRecord, TodoRecord,
};

/// Color for categories outside the palette (same as Other)
pub const DEFAULT_COLOR: &str = "#6B7280";

/// Name shown when the profile has no username
pub const FALLBACK_DISPLAY_NAME: &str = "User";

/// Chart color of a category
pub fn category_color(category: &Category) -> &'static str {
    match category {
        Category::Food => "#8B5CF6",
        Category::Transport => "#EC4899",
        Category::Shopping => "#F59E0B",
        Category::Bills => "#10B981",
        Category::Entertainment => "#3B82F6",
        Category::Other => DEFAULT_COLOR,
        Category::Unrecognized(_) => DEFAULT_COLOR,
    }
}

/// Trend label: short month + day without padding (e.g., "Jan 5")
pub fn trend_label(date: chrono::NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

pub struct Presenter;

impl Presenter {
    /// Assemble the overview from a collected snapshot and its aggregate
    pub fn overview(data: &DashboardData, aggregate: &ExpenseAggregate) -> Overview {
        Overview {
            profile: Self::profile_card(data.profile.as_ref()),
            summary: Self::summary(aggregate, &data.pending_todos, &data.active_entertainment),
            category_series: Self::category_series(&aggregate.by_category),
            trend_series: Self::trend_series(&aggregate.by_day),
            upcoming_todos: data.pending_todos.clone(),
            active_entertainment: data.active_entertainment.clone(),
            warnings: data.warnings.clone(),
        }
    }

    pub fn category_series(totals: &[CategoryTotal]) -> Vec<ChartPoint> {
        totals
            .iter()
            .map(|t| ChartPoint {
                label: t.category.to_string(),
                value: round_currency(t.amount),
                color: category_color(&t.category),
            })
            .collect()
    }

    /// Keeps the aggregator's order
    pub fn trend_series(days: &[DailyTotal]) -> Vec<DailyTrendPoint> {
        days.iter()
            .map(|d| DailyTrendPoint {
                label: trend_label(d.date),
                value: round_currency(d.amount),
            })
            .collect()
    }

    pub fn summary(
        aggregate: &ExpenseAggregate,
        pending_todos: &[TodoRecord],
        active_entertainment: &[EntertainmentRecord],
    ) -> DashboardSummary {
        DashboardSummary {
            total_monthly_expense: aggregate.total,
            pending_todo_count: pending_todos.len(),
            active_entertainment_count: active_entertainment.len(),
        }
    }

    pub fn profile_card(profile: Option<&ProfileRecord>) -> ProfileCard {
        let username = profile
            .and_then(|p| p.username.as_deref())
            .map(str::trim)
            .filter(|name| !name.is_empty());

        ProfileCard {
            display_name: username.unwrap_or(FALLBACK_DISPLAY_NAME).to_string(),
            initial: username
                .and_then(|name| name.chars().next())
                .and_then(|c| c.to_uppercase().next()),
            avatar_url: profile
                .and_then(|p| p.avatar_url.clone())
                .filter(|url| !url.is_empty()),
        }
    }
}
