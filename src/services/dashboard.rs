//! Dashboard service: Collector → Aggregator → Presenter
//!
//! Each call recomputes its view wholesale from a fresh snapshot, so a
//! mutation anywhere in the store only needs to trigger another load.

use chrono::{Local, NaiveDate};

use crate::services::collector::{Collector, Listing};
use crate::services::{Aggregator, Boards, Presenter};
use crate::store::RecordStore;
use crate::types::{
    Category, EntertainmentBoard, ExpenseList, Overview, ProjectBoard, TodoList, View,
};

pub struct DashboardService<S> {
    collector: Collector<S>,
}

impl<S: RecordStore> DashboardService<S> {
    pub fn new(store: S) -> Self {
        Self {
            collector: Collector::new(store),
        }
    }

    /// Load the overview as of the local calendar day
    pub async fn overview(&self) -> Overview {
        self.overview_at(Local::now().date_naive()).await
    }

    pub async fn overview_at(&self, today: NaiveDate) -> Overview {
        let data = self.collector.collect(today).await;
        let aggregate = Aggregator::aggregate(&data.monthly_expenses, today);
        Presenter::overview(&data, &aggregate)
    }

    pub async fn expenses(&self, category: Option<&Category>) -> View<ExpenseList> {
        let Listing { records, warnings } = self.collector.expenses(category).await;
        View {
            data: Boards::expense_list(records),
            warnings,
        }
    }

    pub async fn todos(&self) -> View<TodoList> {
        let Listing { records, warnings } = self.collector.todos().await;
        View {
            data: Boards::todo_list(records),
            warnings,
        }
    }

    pub async fn projects(&self) -> View<ProjectBoard> {
        let Listing { records, warnings } = self.collector.projects().await;
        View {
            data: Boards::project_board(records),
            warnings,
        }
    }

    pub async fn backlog(&self) -> View<EntertainmentBoard> {
        let Listing { records, warnings } = self.collector.entertainment().await;
        View {
            data: Boards::entertainment_board(&records),
            warnings,
        }
    }
}
