//! Table access through the PostgREST API

mod filter;
mod query;
mod types;

use reqwest::Client;
use serde::Serialize;

use crate::config::ClientOptions;

pub use filter::*;
pub use query::{DeleteBuilder, InsertBuilder, QueryBuilder, SelectBuilder, UpdateBuilder};
pub use types::*;

use query::Endpoint;

/// Client for one table or view
#[derive(Debug, Clone)]
pub struct PostgrestClient {
    table: String,
    endpoint: Endpoint,
}

impl PostgrestClient {
    /// Create a new PostgrestClient with default options
    pub fn new(base_url: &str, key: &str, table: &str, client: Client) -> Self {
        Self::with_options(base_url, key, table, client, &ClientOptions::default())
    }

    /// Create a new PostgrestClient with custom options
    pub fn with_options(
        base_url: &str,
        key: &str,
        table: &str,
        client: Client,
        options: &ClientOptions,
    ) -> Self {
        let url = format!("{}/rest/v1/{}", base_url.trim_end_matches('/'), table);
        Self {
            table: table.to_string(),
            endpoint: Endpoint {
                url,
                key: key.to_string(),
                schema: options.db_schema.clone(),
                client_info: options.client_info.clone(),
                client,
            },
        }
    }

    /// The table this client reads and writes
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Select specific columns from the table
    pub fn select(&self, columns: &str) -> SelectBuilder {
        SelectBuilder::new(self.endpoint.clone(), columns)
    }

    /// Insert data into the table
    pub fn insert<T: Serialize>(&self, values: T) -> InsertBuilder<T> {
        InsertBuilder::new(self.endpoint.clone(), values)
    }

    /// Update data in the table
    pub fn update<T: Serialize>(&self, values: T) -> UpdateBuilder<T> {
        UpdateBuilder::new(self.endpoint.clone(), values)
    }

    /// Delete data from the table
    pub fn delete(&self) -> DeleteBuilder {
        DeleteBuilder::new(self.endpoint.clone())
    }
}
