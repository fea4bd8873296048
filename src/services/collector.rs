//! Collector service: scoped queries for one signed-in identity
//!
//! Every failure is absorbed here. A missing identity yields empty
//! collections; a failed query empties that collection only and records a
//! `QueryWarning`.

use chrono::{Datelike, NaiveDate};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::store::{Filter, Order, Query, RecordStore};
use crate::types::{
    Category, Collection, EntertainmentRecord, EntertainmentStatus, ExpenseRecord, Identity,
    ProfileRecord, ProjectRecord, QueryWarning, TodoRecord,
};

/// Number of pending todos shown on the overview
pub const PENDING_TODO_LIMIT: usize = 5;

/// Raw collections behind the overview
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardData {
    pub identity: Option<Identity>,
    pub profile: Option<ProfileRecord>,
    /// Ascending by date
    pub monthly_expenses: Vec<ExpenseRecord>,
    /// Ascending by due date, undated last, at most `PENDING_TODO_LIMIT`
    pub pending_todos: Vec<TodoRecord>,
    /// Newest first
    pub active_entertainment: Vec<EntertainmentRecord>,
    pub warnings: Vec<QueryWarning>,
}

/// Records of one collection plus load warnings
#[derive(Debug, Clone, PartialEq)]
pub struct Listing<T> {
    pub records: Vec<T>,
    pub warnings: Vec<QueryWarning>,
}

/// First calendar day of `today`'s month
pub fn month_start(today: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(today.year(), today.month(), 1).unwrap_or(today)
}

pub struct Collector<S> {
    store: S,
}

impl<S: RecordStore> Collector<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Load the four overview collections concurrently
    pub async fn collect(&self, today: NaiveDate) -> DashboardData {
        let mut data = DashboardData::default();

        let identity = match self.identity(&mut data.warnings).await {
            Some(identity) => identity,
            None => return data,
        };

        let profile_query = Query::scoped(Collection::Profiles, &identity).limit(1);
        let expenses_query = Query::scoped(Collection::Expenses, &identity)
            .filter(Filter::Gte("date", json!(month_start(today).to_string())))
            .order_by(Order::asc("date"));
        let todos_query = Query::scoped(Collection::Todos, &identity)
            .filter(Filter::Eq("completed", json!(false)))
            .order_by(Order::asc("due_date"))
            .limit(PENDING_TODO_LIMIT);
        let entertainment_query = Query::scoped(Collection::Entertainment, &identity)
            .filter(Filter::In(
                "status",
                EntertainmentStatus::ACTIVE
                    .iter()
                    .map(|status| json!(status.as_str()))
                    .collect(),
            ))
            .order_by(Order::desc("created_at"));

        let (profiles, expenses, todos, entertainment) = tokio::join!(
            self.fetch::<ProfileRecord>(&profile_query),
            self.fetch::<ExpenseRecord>(&expenses_query),
            self.fetch::<TodoRecord>(&todos_query),
            self.fetch::<EntertainmentRecord>(&entertainment_query),
        );

        data.profile = profiles.records.into_iter().next();
        data.monthly_expenses = expenses.records;
        data.pending_todos = todos.records;
        data.pending_todos.truncate(PENDING_TODO_LIMIT);
        data.active_entertainment = entertainment.records;

        for warnings in [
            profiles.warnings,
            expenses.warnings,
            todos.warnings,
            entertainment.warnings,
        ] {
            data.warnings.extend(warnings);
        }
        data.identity = Some(identity);
        data
    }

    /// All expenses, newest first, optionally restricted to one category
    pub async fn expenses(&self, category: Option<&Category>) -> Listing<ExpenseRecord> {
        self.list(Collection::Expenses, |query| {
            let query = query.order_by(Order::desc("date"));
            match category {
                Some(category) => query.filter(Filter::Eq("category", json!(category.as_str()))),
                None => query,
            }
        })
        .await
    }

    /// All todos, newest first
    pub async fn todos(&self) -> Listing<TodoRecord> {
        self.list(Collection::Todos, |query| query.order_by(Order::desc("created_at")))
            .await
    }

    /// All projects, newest first
    pub async fn projects(&self) -> Listing<ProjectRecord> {
        self.list(Collection::Projects, |query| query.order_by(Order::desc("created_at")))
            .await
    }

    /// All entertainment items, newest first
    pub async fn entertainment(&self) -> Listing<EntertainmentRecord> {
        self.list(Collection::Entertainment, |query| query.order_by(Order::desc("created_at")))
            .await
    }

    async fn list<T, F>(&self, collection: Collection, build: F) -> Listing<T>
    where
        T: DeserializeOwned,
        F: FnOnce(Query) -> Query,
    {
        let mut warnings = Vec::new();
        let identity = match self.identity(&mut warnings).await {
            Some(identity) => identity,
            None => {
                return Listing {
                    records: Vec::new(),
                    warnings,
                }
            }
        };

        let mut listing = self
            .fetch(&build(Query::scoped(collection, &identity)))
            .await;
        warnings.append(&mut listing.warnings);
        listing.warnings = warnings;
        listing
    }

    /// Resolve the identity; lookup failures count as signed out
    async fn identity(&self, warnings: &mut Vec<QueryWarning>) -> Option<Identity> {
        match self.store.current_identity().await {
            Ok(Some(identity)) => Some(identity),
            Ok(None) => {
                debug!(store = self.store.name(), "no signed-in identity");
                None
            }
            Err(e) => {
                warn!(store = self.store.name(), error = %e, "identity lookup failed");
                warnings.push(QueryWarning::IdentityUnavailable {
                    message: e.to_string(),
                });
                None
            }
        }
    }

    /// Run one query; failures and undecodable rows degrade to warnings
    async fn fetch<T: DeserializeOwned>(&self, query: &Query) -> Listing<T> {
        match self.store.query(query).await {
            Ok(rows) => {
                debug!(
                    store = self.store.name(),
                    collection = %query.collection,
                    rows = rows.len(),
                    "query complete"
                );
                decode_rows(query.collection, rows)
            }
            Err(e) => {
                warn!(
                    store = self.store.name(),
                    collection = %query.collection,
                    error = %e,
                    "query failed, treating collection as empty"
                );
                Listing {
                    records: Vec::new(),
                    warnings: vec![QueryWarning::QueryFailed {
                        collection: query.collection,
                        message: e.to_string(),
                    }],
                }
            }
        }
    }
}

fn decode_rows<T: DeserializeOwned>(collection: Collection, rows: Vec<Value>) -> Listing<T> {
    let mut records = Vec::with_capacity(rows.len());
    let mut skipped = 0;
    let mut first_error: Option<String> = None;

    for row in rows {
        match serde_json::from_value::<T>(row) {
            Ok(record) => records.push(record),
            Err(e) => {
                skipped += 1;
                first_error.get_or_insert_with(|| e.to_string());
            }
        }
    }

    let warnings = match first_error {
        Some(message) => {
            warn!(collection = %collection, skipped, error = %message, "skipped malformed rows");
            vec![QueryWarning::MalformedRows {
                collection,
                skipped,
                message,
            }]
        }
        None => Vec::new(),
    };

    Listing { records, warnings }
}
