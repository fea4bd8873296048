//! In-memory store over JSON rows
//!
//! Evaluates the same `Query` model as the REST backend. Used for offline
//! snapshots (`--snapshot`) and tests.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Filter, Order, Query, RecordStore};
use crate::types::{Collection, Identity, LifedashError, Result};

/// On-disk snapshot of one user's tables
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    /// Signed-in identity; absent means signed out
    #[serde(default)]
    pub identity: Option<String>,
    #[serde(default)]
    pub profiles: Vec<Value>,
    #[serde(default)]
    pub expenses: Vec<Value>,
    #[serde(default)]
    pub todos: Vec<Value>,
    #[serde(default)]
    pub entertainment: Vec<Value>,
    #[serde(default)]
    pub projects: Vec<Value>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    identity: Option<Identity>,
    tables: HashMap<Collection, Vec<Value>>,
    failing: HashSet<Collection>,
    identity_error: Option<String>,
}

impl MemoryStore {
    /// Empty, signed-out store
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_identity(mut self, identity: Identity) -> Self {
        self.identity = Some(identity);
        self
    }

    /// Load a snapshot file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let snapshot: Snapshot = serde_json::from_str(&content).map_err(|e| {
            LifedashError::Parse(format!("invalid snapshot {}: {}", path.display(), e))
        })?;
        Ok(Self::from_snapshot(snapshot))
    }

    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let mut tables = HashMap::new();
        tables.insert(Collection::Profiles, snapshot.profiles);
        tables.insert(Collection::Expenses, snapshot.expenses);
        tables.insert(Collection::Todos, snapshot.todos);
        tables.insert(Collection::Entertainment, snapshot.entertainment);
        tables.insert(Collection::Projects, snapshot.projects);

        Self {
            identity: snapshot.identity.map(Identity::new),
            tables,
            ..Self::default()
        }
    }

    /// Append a row to a collection
    pub fn insert(&mut self, collection: Collection, row: Value) {
        self.tables.entry(collection).or_default().push(row);
    }

    /// Make every query against `collection` fail
    pub fn fail_collection(mut self, collection: Collection) -> Self {
        self.failing.insert(collection);
        self
    }

    /// Make identity resolution fail
    pub fn fail_identity(mut self, message: impl Into<String>) -> Self {
        self.identity_error = Some(message.into());
        self
    }

    fn run(&self, query: &Query) -> Result<Vec<Value>> {
        if self.failing.contains(&query.collection) {
            return Err(LifedashError::Store(format!(
                "{} unavailable",
                query.collection
            )));
        }

        let mut rows: Vec<Value> = self
            .tables
            .get(&query.collection)
            .map(|rows| {
                rows.iter()
                    .filter(|row| query.filters.iter().all(|f| matches_filter(row, f)))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if let Some(order) = query.order {
            // Stable: equal keys keep insertion order
            rows.sort_by(|a, b| compare_rows(a, b, order));
        }

        if let Some(limit) = query.limit {
            rows.truncate(limit);
        }

        Ok(rows)
    }
}

impl RecordStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn current_identity(&self) -> Result<Option<Identity>> {
        if let Some(message) = &self.identity_error {
            return Err(LifedashError::Store(message.clone()));
        }
        Ok(self.identity.clone())
    }

    async fn query(&self, query: &Query) -> Result<Vec<Value>> {
        self.run(query)
    }
}

fn field_value<'a>(row: &'a Value, field: &str) -> &'a Value {
    row.get(field).unwrap_or(&Value::Null)
}

fn matches_filter(row: &Value, filter: &Filter) -> bool {
    match filter {
        Filter::Eq(field, expected) => field_value(row, field) == expected,
        Filter::Gte(field, bound) => matches!(
            compare_values(field_value(row, field), bound),
            Some(Ordering::Greater | Ordering::Equal)
        ),
        Filter::In(field, allowed) => allowed.contains(field_value(row, field)),
    }
}

/// Compare two scalars of the same JSON type; ISO dates compare as strings
fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

fn compare_rows(a: &Value, b: &Value, order: Order) -> Ordering {
    let (left, right) = (field_value(a, order.field), field_value(b, order.field));

    match (left.is_null(), right.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) if order.nulls_last => Ordering::Greater,
        (true, false) => Ordering::Less,
        (false, true) if order.nulls_last => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => {
            let ord = compare_values(left, right).unwrap_or(Ordering::Equal);
            if order.ascending {
                ord
            } else {
                ord.reverse()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn todo(id: &str, owner: &str, completed: bool, due: Option<&str>) -> Value {
        json!({
            "id": id,
            "user_id": owner,
            "title": format!("todo {}", id),
            "completed": completed,
            "due_date": due,
            "created_at": "2024-01-01T00:00:00Z"
        })
    }

    fn store_with_todos(rows: Vec<Value>) -> MemoryStore {
        let mut store = MemoryStore::new().with_identity(Identity::new("u1"));
        for row in rows {
            store.insert(Collection::Todos, row);
        }
        store
    }

    fn ids(rows: &[Value]) -> Vec<&str> {
        rows.iter().map(|r| r["id"].as_str().unwrap()).collect()
    }

    // ========== Filtering ==========

    #[tokio::test]
    async fn test_eq_filter_scopes_by_owner() {
        let store = store_with_todos(vec![
            todo("a", "u1", false, None),
            todo("b", "u2", false, None),
            todo("c", "u1", true, None),
        ]);
        let query = Query::scoped(Collection::Todos, &Identity::new("u1"));

        let rows = store.query(&query).await.unwrap();

        assert_eq!(ids(&rows), vec!["a", "c"]);
    }

    #[tokio::test]
    async fn test_gte_filter_on_dates() {
        let mut store = MemoryStore::new();
        for (id, date) in [("a", "2024-01-31"), ("b", "2024-02-01"), ("c", "2024-02-15")] {
            store.insert(Collection::Expenses, json!({"id": id, "date": date}));
        }
        let query = Query {
            collection: Collection::Expenses,
            filters: vec![Filter::Gte("date", json!("2024-02-01"))],
            order: None,
            limit: None,
        };

        let rows = store.query(&query).await.unwrap();

        assert_eq!(ids(&rows), vec!["b", "c"]);
    }

    #[tokio::test]
    async fn test_gte_filter_skips_missing_field() {
        let mut store = MemoryStore::new();
        store.insert(Collection::Expenses, json!({"id": "a"}));
        let query = Query {
            collection: Collection::Expenses,
            filters: vec![Filter::Gte("date", json!("2024-02-01"))],
            order: None,
            limit: None,
        };

        assert!(store.query(&query).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_in_filter() {
        let mut store = MemoryStore::new();
        for (id, status) in [("a", "playing"), ("b", "backlog"), ("c", "watching")] {
            store.insert(Collection::Entertainment, json!({"id": id, "status": status}));
        }
        let query = Query {
            collection: Collection::Entertainment,
            filters: vec![Filter::In("status", vec![json!("playing"), json!("watching")])],
            order: None,
            limit: None,
        };

        let rows = store.query(&query).await.unwrap();

        assert_eq!(ids(&rows), vec!["a", "c"]);
    }

    // ========== Ordering & limit ==========

    #[tokio::test]
    async fn test_ascending_nulls_last_then_limit() {
        let store = store_with_todos(vec![
            todo("none1", "u1", false, None),
            todo("late", "u1", false, Some("2024-03-01")),
            todo("none2", "u1", false, None),
            todo("early", "u1", false, Some("2024-01-10")),
        ]);
        let query = Query::scoped(Collection::Todos, &Identity::new("u1"))
            .order_by(Order::asc("due_date"))
            .limit(3);

        let rows = store.query(&query).await.unwrap();

        assert_eq!(ids(&rows), vec!["early", "late", "none1"]);
    }

    #[tokio::test]
    async fn test_nulls_first_when_requested() {
        let store = store_with_todos(vec![
            todo("dated", "u1", false, Some("2024-01-10")),
            todo("none", "u1", false, None),
        ]);
        let mut order = Order::asc("due_date");
        order.nulls_last = false;
        let query = Query::scoped(Collection::Todos, &Identity::new("u1")).order_by(order);

        let rows = store.query(&query).await.unwrap();

        assert_eq!(ids(&rows), vec!["none", "dated"]);
    }

    #[tokio::test]
    async fn test_descending_order() {
        let mut store = MemoryStore::new();
        for (id, created) in [
            ("old", "2024-01-01T00:00:00Z"),
            ("new", "2024-03-01T00:00:00Z"),
            ("mid", "2024-02-01T00:00:00Z"),
        ] {
            store.insert(Collection::Projects, json!({"id": id, "created_at": created}));
        }
        let query = Query {
            collection: Collection::Projects,
            filters: Vec::new(),
            order: Some(Order::desc("created_at")),
            limit: None,
        };

        let rows = store.query(&query).await.unwrap();

        assert_eq!(ids(&rows), vec!["new", "mid", "old"]);
    }

    // ========== Failures & identity ==========

    #[tokio::test]
    async fn test_failing_collection_returns_error() {
        let store = MemoryStore::new().fail_collection(Collection::Todos);
        let query = Query::scoped(Collection::Todos, &Identity::new("u1"));

        let err = store.query(&query).await.unwrap_err();

        assert!(matches!(err, LifedashError::Store(_)));
    }

    #[tokio::test]
    async fn test_identity_resolution() {
        assert!(MemoryStore::new().current_identity().await.unwrap().is_none());

        let store = MemoryStore::new().with_identity(Identity::new("u1"));
        assert_eq!(
            store.current_identity().await.unwrap(),
            Some(Identity::new("u1"))
        );

        let store = MemoryStore::new().fail_identity("token expired");
        assert!(store.current_identity().await.is_err());
    }

    // ========== Snapshot files ==========

    #[tokio::test]
    async fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"identity": "u1", "todos": [{{"id": "a", "user_id": "u1"}}]}}"#
        )
        .unwrap();

        let store = MemoryStore::from_file(file.path()).unwrap();

        assert_eq!(
            store.current_identity().await.unwrap(),
            Some(Identity::new("u1"))
        );
        let query = Query::scoped(Collection::Todos, &Identity::new("u1"));
        assert_eq!(store.query(&query).await.unwrap().len(), 1);
        let query = Query::scoped(Collection::Expenses, &Identity::new("u1"));
        assert!(store.query(&query).await.unwrap().is_empty());
    }

    #[test]
    fn test_from_file_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = MemoryStore::from_file(file.path()).unwrap_err();

        assert!(matches!(err, LifedashError::Parse(_)));
    }

    #[test]
    fn test_from_file_missing() {
        let err = MemoryStore::from_file(Path::new("/nonexistent/snapshot.json")).unwrap_err();
        assert!(matches!(err, LifedashError::Io(_)));
    }
}
