//! The seam between the screens and wherever leads are kept.

use async_trait::async_trait;

use crate::error::Result;
use crate::leads::model::{Lead, LeadId, LeadPatch, NewLead};
use crate::postgrest::SortOrder;

/// Name of the collection on the backend
pub const LEADS_TABLE: &str = "leads";

/// Column the screens sort by
pub const CREATED_AT: &str = "created_at";

/// Remote record store for the `leads` collection.
///
/// Every call is a single attempt: no retry, no cancellation.
#[async_trait]
pub trait LeadStore: Send + Sync {
    /// All leads ordered by `order_by`
    async fn list(&self, order_by: &str, order: SortOrder) -> Result<Vec<Lead>>;

    /// Store a new lead; the store assigns the id
    async fn insert(&self, record: &NewLead) -> Result<()>;

    /// Overwrite the patched fields of one lead
    async fn update(&self, id: &LeadId, patch: &LeadPatch) -> Result<()>;

    /// Remove one lead permanently
    async fn delete(&self, id: &LeadId) -> Result<()>;
}

/// Newest first, the order both screens display
pub async fn list_newest_first(store: &dyn LeadStore) -> Result<Vec<Lead>> {
    store.list(CREATED_AT, SortOrder::Descending).await
}
