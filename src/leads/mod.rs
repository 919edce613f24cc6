//! Lead records, their store and the Leads screen

pub mod form;
pub mod memory;
pub mod model;
pub mod remote;
pub mod row;
pub mod screen;
pub mod store;

pub use form::{FormError, LeadForm};
pub use memory::{MemoryLeadStore, Operation};
pub use model::{Lead, LeadDraft, LeadId, LeadPatch, LeadSource, LeadStatus, NewLead, StatusPatch};
pub use remote::RemoteLeadStore;
pub use row::{BadgeColor, LeadRow};
pub use screen::{DeleteOutcome, LeadsScreen, PendingStatusChange, SaveOutcome, StatusOutcome};
pub use store::{list_newest_first, LeadStore, CREATED_AT, LEADS_TABLE};
