//! REST backend for the hosted database
//!
//! Speaks the PostgREST dialect exposed under `/rest/v1` and resolves the
//! signed-in user through `/auth/v1/user`. Row-level security on the backend
//! scopes every table to the bearer token's user.

use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;

use super::{Filter, Query, RecordStore};
use crate::config::Config;
use crate::types::{Identity, LifedashError, Result};

/// HTTP request timeout in seconds
const REQUEST_TIMEOUT_SECS: u64 = 10;

pub struct RestStore {
    client: reqwest::Client,
    base_url: String,
    anon_key: String,
    access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AuthUser {
    id: String,
}

impl RestStore {
    pub fn new(
        base_url: impl Into<String>,
        anon_key: impl Into<String>,
        access_token: Option<String>,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| LifedashError::Store(format!("HTTP client error: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
            access_token,
        })
    }

    /// Build from config; requires a backend URL and an anon key
    pub fn from_config(config: &Config) -> Result<Self> {
        let base_url = config
            .backend_url
            .as_deref()
            .ok_or_else(|| LifedashError::Config("backend_url is not set".into()))?;
        let anon_key = config
            .anon_key
            .as_deref()
            .ok_or_else(|| LifedashError::Config("anon_key is not set".into()))?;

        Self::new(base_url, anon_key, config.access_token.clone())
    }

    fn table_url(&self, query: &Query) -> String {
        format!("{}/rest/v1/{}", self.base_url, query.collection.table())
    }

    fn auth_url(&self) -> String {
        format!("{}/auth/v1/user", self.base_url)
    }

    /// Bearer is the user's token when signed in, the anon key otherwise
    fn bearer(&self) -> &str {
        self.access_token.as_deref().unwrap_or(&self.anon_key)
    }
}

impl RecordStore for RestStore {
    fn name(&self) -> &str {
        "rest"
    }

    async fn current_identity(&self) -> Result<Option<Identity>> {
        if self.access_token.is_none() {
            return Ok(None);
        }

        let response = self
            .client
            .get(self.auth_url())
            .header("apikey", &self.anon_key)
            .bearer_auth(self.bearer())
            .send()
            .await
            .map_err(|e| LifedashError::Store(format!("identity request failed: {}", e)))?;

        if matches!(
            response.status(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            return Ok(None);
        }

        let user: AuthUser = response
            .error_for_status()
            .map_err(|e| LifedashError::Store(format!("identity request failed: {}", e)))?
            .json()
            .await
            .map_err(|e| LifedashError::Parse(format!("invalid identity response: {}", e)))?;

        Ok(Some(Identity::new(user.id)))
    }

    async fn query(&self, query: &Query) -> Result<Vec<Value>> {
        let response = self
            .client
            .get(self.table_url(query))
            .query(&query_params(query))
            .header("apikey", &self.anon_key)
            .bearer_auth(self.bearer())
            .send()
            .await
            .map_err(|e| {
                LifedashError::Store(format!("{} request failed: {}", query.collection, e))
            })?
            .error_for_status()
            .map_err(|e| LifedashError::Store(format!("{} query failed: {}", query.collection, e)))?;

        response.json().await.map_err(|e| {
            LifedashError::Parse(format!("invalid {} response: {}", query.collection, e))
        })
    }
}

/// Encode a query as PostgREST URL parameters
pub(crate) fn query_params(query: &Query) -> Vec<(String, String)> {
    let mut params = vec![("select".to_string(), "*".to_string())];

    for filter in &query.filters {
        let encoded = match filter {
            Filter::Eq(_, Value::Null) => "is.null".to_string(),
            Filter::Eq(_, value) => format!("eq.{}", scalar(value)),
            Filter::Gte(_, value) => format!("gte.{}", scalar(value)),
            Filter::In(_, values) => {
                let list: Vec<String> = values.iter().map(scalar).collect();
                format!("in.({})", list.join(","))
            }
        };
        params.push((filter.field().to_string(), encoded));
    }

    if let Some(order) = query.order {
        params.push((
            "order".to_string(),
            format!(
                "{}.{}.{}",
                order.field,
                if order.ascending { "asc" } else { "desc" },
                if order.nulls_last {
                    "nullslast"
                } else {
                    "nullsfirst"
                }
            ),
        ));
    }

    if let Some(limit) = query.limit {
        params.push(("limit".to_string(), limit.to_string()));
    }

    params
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Order;
    use crate::types::Collection;
    use serde_json::json;

    fn param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_params_expenses_this_month() {
        let query = Query::scoped(Collection::Expenses, &Identity::new("u1"))
            .filter(Filter::Gte("date", json!("2024-01-01")))
            .order_by(Order::asc("date"));

        let params = query_params(&query);

        assert_eq!(param(&params, "select"), Some("*"));
        assert_eq!(param(&params, "user_id"), Some("eq.u1"));
        assert_eq!(param(&params, "date"), Some("gte.2024-01-01"));
        assert_eq!(param(&params, "order"), Some("date.asc.nullslast"));
        assert_eq!(param(&params, "limit"), None);
    }

    #[test]
    fn test_params_bool_and_limit() {
        let query = Query::scoped(Collection::Todos, &Identity::new("u1"))
            .filter(Filter::Eq("completed", json!(false)))
            .limit(5);

        let params = query_params(&query);

        assert_eq!(param(&params, "completed"), Some("eq.false"));
        assert_eq!(param(&params, "limit"), Some("5"));
    }

    #[test]
    fn test_params_in_and_desc() {
        let query = Query::scoped(Collection::Entertainment, &Identity::new("u1"))
            .filter(Filter::In(
                "status",
                vec![json!("playing"), json!("watching")],
            ))
            .order_by(Order::desc("created_at"));

        let params = query_params(&query);

        assert_eq!(param(&params, "status"), Some("in.(playing,watching)"));
        assert_eq!(param(&params, "order"), Some("created_at.desc.nullslast"));
    }

    #[test]
    fn test_params_null_equality() {
        let query = Query {
            collection: Collection::Todos,
            filters: vec![Filter::Eq("due_date", Value::Null)],
            order: None,
            limit: None,
        };

        assert_eq!(param(&query_params(&query), "due_date"), Some("is.null"));
    }

    #[test]
    fn test_urls_trim_trailing_slash() {
        let store = RestStore::new("https://db.example.com/", "anon", None).unwrap();
        let query = Query::scoped(Collection::Profiles, &Identity::new("u1"));

        assert_eq!(
            store.table_url(&query),
            "https://db.example.com/rest/v1/profiles"
        );
        assert_eq!(store.auth_url(), "https://db.example.com/auth/v1/user");
    }

    #[test]
    fn test_bearer_falls_back_to_anon_key() {
        let store = RestStore::new("https://db.example.com", "anon", None).unwrap();
        assert_eq!(store.bearer(), "anon");

        let store =
            RestStore::new("https://db.example.com", "anon", Some("user-token".into())).unwrap();
        assert_eq!(store.bearer(), "user-token");
    }

    #[tokio::test]
    async fn test_no_token_means_signed_out() {
        let store = RestStore::new("https://db.example.com", "anon", None).unwrap();
        assert!(store.current_identity().await.unwrap().is_none());
    }

    #[test]
    fn test_from_config_requires_url() {
        let config = Config {
            anon_key: Some("anon".into()),
            ..Config::default()
        };

        let err = RestStore::from_config(&config).err().unwrap();

        assert!(matches!(err, LifedashError::Config(_)));
    }
}
