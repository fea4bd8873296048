//! Scoped data store capability and its backends

mod memory;
mod rest;

pub use memory::{MemoryStore, Snapshot};
pub use rest::RestStore;

use std::future::Future;

use serde_json::Value;

use crate::types::{Collection, Identity, Result};

/// Row filter on a single column
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// `field = value`
    Eq(&'static str, Value),
    /// `field >= value`
    Gte(&'static str, Value),
    /// `field IN (values)`
    In(&'static str, Vec<Value>),
}

impl Filter {
    pub fn field(&self) -> &'static str {
        match self {
            Filter::Eq(field, _) | Filter::Gte(field, _) | Filter::In(field, _) => field,
        }
    }
}

/// Sort on a single column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Order {
    pub field: &'static str,
    pub ascending: bool,
    /// Rows with a null/missing value sort after all others
    pub nulls_last: bool,
}

impl Order {
    pub fn asc(field: &'static str) -> Self {
        Self {
            field,
            ascending: true,
            nulls_last: true,
        }
    }

    pub fn desc(field: &'static str) -> Self {
        Self {
            field,
            ascending: false,
            nulls_last: true,
        }
    }
}

/// Read-only query against one collection
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub collection: Collection,
    pub filters: Vec<Filter>,
    pub order: Option<Order>,
    pub limit: Option<usize>,
}

impl Query {
    /// Query restricted to rows owned by `identity`
    pub fn scoped(collection: Collection, identity: &Identity) -> Self {
        Self {
            collection,
            filters: vec![Filter::Eq(
                collection.owner_field(),
                Value::String(identity.id.clone()),
            )],
            order: None,
            limit: None,
        }
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn order_by(mut self, order: Order) -> Self {
        self.order = Some(order);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Trait for stores that can answer scoped record queries
pub trait RecordStore: Send + Sync {
    /// Store name for logging (e.g., "rest", "memory")
    fn name(&self) -> &str;

    /// Resolve the caller's identity; `None` means signed out
    fn current_identity(&self) -> impl Future<Output = Result<Option<Identity>>> + Send;

    /// Run a read-only query and return raw rows
    fn query(&self, query: &Query) -> impl Future<Output = Result<Vec<Value>>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scoped_query_filters_by_owner() {
        let identity = Identity::new("u1");
        let query = Query::scoped(Collection::Expenses, &identity);

        assert_eq!(query.filters, vec![Filter::Eq("user_id", json!("u1"))]);
        assert!(query.order.is_none());
        assert!(query.limit.is_none());
    }

    #[test]
    fn test_scoped_profile_query_uses_id() {
        let identity = Identity::new("u1");
        let query = Query::scoped(Collection::Profiles, &identity);
        assert_eq!(query.filters[0].field(), "id");
    }

    #[test]
    fn test_builder_chain() {
        let identity = Identity::new("u1");
        let query = Query::scoped(Collection::Todos, &identity)
            .filter(Filter::Eq("completed", json!(false)))
            .order_by(Order::asc("due_date"))
            .limit(5);

        assert_eq!(query.filters.len(), 2);
        assert_eq!(query.order, Some(Order::asc("due_date")));
        assert_eq!(query.limit, Some(5));
    }
}
