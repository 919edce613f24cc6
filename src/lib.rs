//! Lead desk
//!
//! Client-side core of a small sales CRM: a Leads screen to create, edit,
//! delete and re-stage leads, and a Dashboard summarising revenue per
//! source. Leads live in a hosted PostgREST collection; the screens talk to
//! it through the [`LeadStore`](leads::LeadStore) trait.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod fetch;
pub mod format;
pub mod leads;
pub mod nav;
pub mod postgrest;
pub mod prompt;

use std::sync::Arc;

use reqwest::Client;

use crate::config::StoreConfig;
use crate::error::Result;
use crate::leads::{LeadStore, RemoteLeadStore, LEADS_TABLE};
use crate::postgrest::PostgrestClient;

/// Connection to the hosted backend, shared by both screens
#[derive(Debug, Clone)]
pub struct LeadDesk {
    config: StoreConfig,
    http_client: Client,
}

impl LeadDesk {
    /// Create a client from an explicit configuration
    ///
    /// # Example
    ///
    /// ```
    /// use leaddesk::{config::StoreConfig, LeadDesk};
    ///
    /// let config = StoreConfig::new("https://your-project.supabase.co", "your-anon-key")?;
    /// let desk = LeadDesk::new(config)?;
    /// let store = desk.lead_store();
    /// # drop(store);
    /// # Ok::<(), leaddesk::error::StoreError>(())
    /// ```
    pub fn new(config: StoreConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.options.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Create a client from the environment. See [`StoreConfig::from_env`].
    pub fn from_env() -> Result<Self> {
        Self::new(StoreConfig::from_env())
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Client for any table or view of the project
    pub fn from(&self, table: &str) -> PostgrestClient {
        PostgrestClient::with_options(
            self.config.url.as_str(),
            &self.config.anon_key,
            table,
            self.http_client.clone(),
            &self.config.options,
        )
    }

    /// The injectable store handle both screens are built with
    pub fn lead_store(&self) -> Arc<dyn LeadStore> {
        Arc::new(RemoteLeadStore::new(self.from(LEADS_TABLE)))
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::config::{ClientOptions, StoreConfig};
    pub use crate::dashboard::{DashboardScreen, DashboardStats};
    pub use crate::error::StoreError;
    pub use crate::leads::{
        Lead, LeadId, LeadSource, LeadStatus, LeadStore, LeadsScreen, MemoryLeadStore,
        RemoteLeadStore,
    };
    pub use crate::nav::Route;
    pub use crate::prompt::Prompt;
    pub use crate::LeadDesk;
}
