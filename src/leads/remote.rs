//! `LeadStore` backed by the hosted PostgREST API.

use async_trait::async_trait;
use tracing::debug;

use crate::error::Result;
use crate::leads::model::{Lead, LeadId, LeadPatch, NewLead};
use crate::leads::store::LeadStore;
use crate::postgrest::{PostgrestClient, SortOrder};

#[derive(Debug, Clone)]
pub struct RemoteLeadStore {
    client: PostgrestClient,
}

impl RemoteLeadStore {
    /// Wrap a client already pointed at the leads table
    pub fn new(client: PostgrestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LeadStore for RemoteLeadStore {
    async fn list(&self, order_by: &str, order: SortOrder) -> Result<Vec<Lead>> {
        let leads = self
            .client
            .select("*")
            .order(order_by, order)
            .execute::<Lead>()
            .await?;
        debug!(table = self.client.table(), count = leads.len(), "listed leads");
        Ok(leads)
    }

    async fn insert(&self, record: &NewLead) -> Result<()> {
        self.client
            .insert(std::slice::from_ref(record))
            .execute()
            .await
    }

    async fn update(&self, id: &LeadId, patch: &LeadPatch) -> Result<()> {
        self.client.update(patch).eq("id", id).execute().await
    }

    async fn delete(&self, id: &LeadId) -> Result<()> {
        self.client.delete().eq("id", id).execute().await
    }
}
