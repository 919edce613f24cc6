//! Query builders for PostgrestClient

use std::fmt;

use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::Result;
use crate::fetch::{Fetch, FetchBuilder};
use crate::postgrest::filter::FilterOperator;
use crate::postgrest::types::SortOrder;

/// Writes ask for no representation back
const RETURN_MINIMAL: &str = "return=minimal";

/// Where a builder sends its request and how it identifies itself
#[derive(Debug, Clone)]
pub(crate) struct Endpoint {
    pub(crate) url: String,
    pub(crate) key: String,
    pub(crate) schema: String,
    pub(crate) client_info: String,
    pub(crate) client: Client,
}

impl Endpoint {
    /// Attach key, client info and schema headers. Reads select the schema
    /// with `Accept-Profile`, writes with `Content-Profile`.
    fn authorize<'a>(&self, fetch: FetchBuilder<'a>, profile_header: &str) -> FetchBuilder<'a> {
        fetch
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
            .header("X-Client-Info", &self.client_info)
            .header(profile_header, &self.schema)
    }
}

/// Base query builder
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    params: Vec<(String, String)>,
}

impl QueryBuilder {
    /// Create a new QueryBuilder
    pub fn new() -> Self {
        Self { params: Vec::new() }
    }

    /// Set a parameter, replacing an earlier value for the same key
    pub fn add_param(&mut self, key: &str, value: &str) {
        self.params.retain(|(k, _)| k != key);
        self.params.push((key.to_string(), value.to_string()));
    }

    fn add_filter(&mut self, column: &str, op: FilterOperator, value: impl fmt::Display) {
        self.add_param(column, &op.expression(value));
    }

    /// Get the query parameters
    pub fn get_params(&self) -> &[(String, String)] {
        &self.params
    }
}

/// Builder for SELECT queries
pub struct SelectBuilder {
    endpoint: Endpoint,
    query: QueryBuilder,
}

impl SelectBuilder {
    pub(crate) fn new(endpoint: Endpoint, columns: &str) -> Self {
        let mut query = QueryBuilder::new();
        query.add_param("select", columns);
        Self { endpoint, query }
    }

    /// Order the results by a column
    pub fn order(mut self, column: &str, order: SortOrder) -> Self {
        self.query
            .add_param("order", &format!("{}.{}", column, order.as_str()));
        self
    }

    /// Execute the query and return the results
    pub async fn execute<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        let fetch = Fetch::get(&self.endpoint.client, &self.endpoint.url);
        self.endpoint
            .authorize(fetch, "Accept-Profile")
            .query(self.query.get_params())
            .execute::<Vec<T>>()
            .await
    }
}

/// Builder for INSERT queries
pub struct InsertBuilder<T: Serialize> {
    endpoint: Endpoint,
    values: T,
}

impl<T: Serialize> InsertBuilder<T> {
    pub(crate) fn new(endpoint: Endpoint, values: T) -> Self {
        Self { endpoint, values }
    }

    /// Execute the insert without returning the inserted rows
    pub async fn execute(&self) -> Result<()> {
        let fetch = Fetch::post(&self.endpoint.client, &self.endpoint.url);
        self.endpoint
            .authorize(fetch, "Content-Profile")
            .header("Prefer", RETURN_MINIMAL)
            .json(&self.values)?
            .execute_empty()
            .await
    }
}

/// Builder for UPDATE queries
pub struct UpdateBuilder<T: Serialize> {
    endpoint: Endpoint,
    values: T,
    query: QueryBuilder,
}

impl<T: Serialize> UpdateBuilder<T> {
    pub(crate) fn new(endpoint: Endpoint, values: T) -> Self {
        Self {
            endpoint,
            values,
            query: QueryBuilder::new(),
        }
    }

    /// Filter rows where column equals a value
    pub fn eq(mut self, column: &str, value: impl fmt::Display) -> Self {
        self.query.add_filter(column, FilterOperator::Eq, value);
        self
    }

    /// Execute the update without returning the updated rows
    pub async fn execute(&self) -> Result<()> {
        let fetch = Fetch::patch(&self.endpoint.client, &self.endpoint.url);
        self.endpoint
            .authorize(fetch, "Content-Profile")
            .header("Prefer", RETURN_MINIMAL)
            .query(self.query.get_params())
            .json(&self.values)?
            .execute_empty()
            .await
    }
}

/// Builder for DELETE queries
pub struct DeleteBuilder {
    endpoint: Endpoint,
    query: QueryBuilder,
}

impl DeleteBuilder {
    pub(crate) fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            query: QueryBuilder::new(),
        }
    }

    /// Filter rows where column equals a value
    pub fn eq(mut self, column: &str, value: impl fmt::Display) -> Self {
        self.query.add_filter(column, FilterOperator::Eq, value);
        self
    }

    /// Execute the delete without returning the deleted rows
    pub async fn execute(&self) -> Result<()> {
        let fetch = Fetch::delete(&self.endpoint.client, &self.endpoint.url);
        self.endpoint
            .authorize(fetch, "Content-Profile")
            .header("Prefer", RETURN_MINIMAL)
            .query(self.query.get_params())
            .execute_empty()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_param_replaces_earlier_value() {
        let mut query = QueryBuilder::new();
        query.add_param("order", "created_at.asc");
        query.add_param("select", "*");
        query.add_param("order", "created_at.desc");

        assert_eq!(
            query.get_params(),
            &[
                ("select".to_string(), "*".to_string()),
                ("order".to_string(), "created_at.desc".to_string()),
            ]
        );
    }
}
