//! In-process `LeadStore` used to drive the screens in tests.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::{Result, StoreError};
use crate::leads::model::{Lead, LeadId, LeadPatch, NewLead};
use crate::leads::store::{LeadStore, CREATED_AT};
use crate::postgrest::SortOrder;

/// Store operation, used to script failures and inspect calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Insert,
    Update,
    Delete,
}

#[derive(Debug, Default)]
struct State {
    leads: Vec<Lead>,
    failures: HashMap<Operation, usize>,
    calls: Vec<Operation>,
}

/// Keeps leads in memory and behaves like the remote collection: ids are
/// assigned on insert, updates and deletes of unknown ids succeed silently.
#[derive(Debug, Default)]
pub struct MemoryLeadStore {
    state: Mutex<State>,
}

impl MemoryLeadStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with existing records
    pub fn with_leads(leads: Vec<Lead>) -> Self {
        let store = Self::new();
        store.state().leads = leads;
        store
    }

    /// Make the next `times` calls of `operation` fail
    pub fn fail_next(&self, operation: Operation, times: usize) {
        *self.state().failures.entry(operation).or_insert(0) += times;
    }

    /// Every call received so far, in order
    pub fn calls(&self) -> Vec<Operation> {
        self.state().calls.clone()
    }

    pub fn call_count(&self, operation: Operation) -> usize {
        self.state()
            .calls
            .iter()
            .filter(|call| **call == operation)
            .count()
    }

    /// Copy of the stored records in insertion order
    pub fn snapshot(&self) -> Vec<Lead> {
        self.state().leads.clone()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Record the call and consume a scripted failure if one is pending
    fn begin(&self, operation: Operation) -> Result<MutexGuard<'_, State>> {
        let mut state = self.state();
        state.calls.push(operation);
        if let Some(remaining) = state.failures.get_mut(&operation) {
            if *remaining > 0 {
                *remaining -= 1;
                return Err(StoreError::general(format!(
                    "simulated {:?} failure",
                    operation
                )));
            }
        }
        Ok(state)
    }
}

#[async_trait]
impl LeadStore for MemoryLeadStore {
    async fn list(&self, order_by: &str, order: SortOrder) -> Result<Vec<Lead>> {
        let state = self.begin(Operation::List)?;
        let mut leads = state.leads.clone();
        if order_by != CREATED_AT {
            return Err(StoreError::general(format!(
                "column leads.{} does not exist",
                order_by
            )));
        }
        leads.sort_by_key(|lead| lead.created_at);
        if order == SortOrder::Descending {
            leads.reverse();
        }
        Ok(leads)
    }

    async fn insert(&self, record: &NewLead) -> Result<()> {
        let mut state = self.begin(Operation::Insert)?;
        let id = LeadId::new(Uuid::new_v4().to_string());
        state.leads.push(Lead::from_new(id, record));
        Ok(())
    }

    async fn update(&self, id: &LeadId, patch: &LeadPatch) -> Result<()> {
        let mut state = self.begin(Operation::Update)?;
        if let Some(lead) = state.leads.iter_mut().find(|lead| &lead.id == id) {
            lead.apply(patch);
        }
        Ok(())
    }

    async fn delete(&self, id: &LeadId) -> Result<()> {
        let mut state = self.begin(Operation::Delete)?;
        state.leads.retain(|lead| &lead.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leads::model::{LeadDraft, LeadSource, LeadStatus, StatusPatch};
    use chrono::{Duration, NaiveDate, Utc};
    use rust_decimal::Decimal;

    fn draft(empresa: &str) -> LeadDraft {
        LeadDraft {
            empresa: empresa.to_string(),
            origem: LeadSource::Zellgo,
            status: LeadStatus::Contacted,
            contato_principal: "Carla".to_string(),
            ticket_total_rs: Decimal::new(12345, 2),
            ticket_mensal_rs: Decimal::from(10),
            produto_oferta: "Consultoria".to_string(),
            mes_competencia: NaiveDate::from_ymd_opt(2025, 5, 1),
            obs: "retornar".to_string(),
        }
    }

    #[tokio::test]
    async fn insert_then_list_round_trips_fields() {
        let store = MemoryLeadStore::new();
        let record = NewLead::stamped(draft("Acme"));
        store.insert(&record).await.unwrap();

        let leads = store.list(CREATED_AT, SortOrder::Descending).await.unwrap();
        assert_eq!(leads.len(), 1);
        let lead = &leads[0];

        assert!(Uuid::parse_str(lead.id.as_str()).is_ok());
        assert_eq!(lead.created_at, record.created_at);
        assert_eq!(lead.empresa, "Acme");
        assert_eq!(lead.origem, Some(LeadSource::Zellgo));
        assert_eq!(lead.status, LeadStatus::Contacted);
        assert_eq!(lead.contato_principal.as_deref(), Some("Carla"));
        assert_eq!(lead.ticket_total_rs, Some(Decimal::new(12345, 2)));
        assert_eq!(lead.ticket_mensal_rs, Some(Decimal::from(10)));
        assert_eq!(lead.produto_oferta.as_deref(), Some("Consultoria"));
        assert_eq!(lead.mes_competencia, NaiveDate::from_ymd_opt(2025, 5, 1));
        assert_eq!(lead.obs.as_deref(), Some("retornar"));
    }

    #[tokio::test]
    async fn sorts_by_creation() {
        let store = MemoryLeadStore::new();
        let now = Utc::now();
        for (i, name) in ["old", "newest", "middle"].iter().enumerate() {
            let offset = [0, 2, 1][i];
            store
                .insert(&NewLead {
                    draft: draft(name),
                    created_at: now + Duration::minutes(offset),
                })
                .await
                .unwrap();
        }

        let desc = store.list(CREATED_AT, SortOrder::Descending).await.unwrap();
        let names: Vec<_> = desc.iter().map(|l| l.empresa.as_str()).collect();
        assert_eq!(names, ["newest", "middle", "old"]);

        let asc = store.list(CREATED_AT, SortOrder::Ascending).await.unwrap();
        assert_eq!(asc[0].empresa, "old");

        assert!(store.list("nope", SortOrder::Ascending).await.is_err());
        assert!(store.list("empresa", SortOrder::Ascending).await.is_err());
    }

    #[tokio::test]
    async fn scripted_failures_are_consumed() {
        let store = MemoryLeadStore::new();
        store.fail_next(Operation::Insert, 1);

        let record = NewLead::stamped(draft("Acme"));
        let err = store.insert(&record).await.unwrap_err();
        assert_eq!(err.message(), "simulated Insert failure");
        assert!(store.snapshot().is_empty());

        store.insert(&record).await.unwrap();
        assert_eq!(store.snapshot().len(), 1);
        assert_eq!(store.call_count(Operation::Insert), 2);
        assert_eq!(store.calls(), vec![Operation::Insert, Operation::Insert]);
    }

    #[tokio::test]
    async fn update_and_delete() {
        let store = MemoryLeadStore::new();
        store.insert(&NewLead::stamped(draft("Acme"))).await.unwrap();
        let id = store.snapshot()[0].id.clone();

        let patch = LeadPatch::Status(StatusPatch {
            status: LeadStatus::Won,
        });
        store.update(&id, &patch).await.unwrap();
        assert_eq!(store.snapshot()[0].status, LeadStatus::Won);

        // unknown ids are not an error, as with the remote collection
        store.delete(&LeadId::new("missing")).await.unwrap();
        assert_eq!(store.snapshot().len(), 1);

        store.delete(&id).await.unwrap();
        assert!(store.snapshot().is_empty());
    }
}
