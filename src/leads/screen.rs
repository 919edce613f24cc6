//! Leads screen: the listing, the create/edit dialog, delete and inline
//! status changes.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::leads::form::{FormError, LeadForm};
use crate::leads::model::{Lead, LeadId, LeadPatch, LeadStatus, NewLead, StatusPatch};
use crate::leads::row::LeadRow;
use crate::leads::store::{list_newest_first, LeadStore};
use crate::prompt::Prompt;

pub const DELETE_CONFIRMATION: &str = "Tem certeza que deseja excluir este lead?";
pub const EMPTY_LIST_MESSAGE: &str = "Nenhum lead encontrado.";

/// Result of the save action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Created,
    Updated,
    /// Rejected before reaching the store
    Invalid(FormError),
    /// The store refused the write; carries its message
    Failed(String),
}

/// Result of the delete action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Cancelled,
    Deleted,
    Failed(String),
}

/// Result of an inline status change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusOutcome {
    /// The store accepted the new status
    Confirmed,
    /// The store rejected it and the list was reloaded from the store
    Reconciled,
    /// The store rejected it and the reload failed as well
    Unreconciled,
    /// No lead with that id is listed
    UnknownLead,
}

/// A status already shown locally but not yet written to the store
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "the change is only local until confirmed"]
pub struct PendingStatusChange {
    id: LeadId,
    status: LeadStatus,
}

impl PendingStatusChange {
    pub fn id(&self) -> &LeadId {
        &self.id
    }

    pub fn status(&self) -> LeadStatus {
        self.status
    }
}

pub struct LeadsScreen {
    store: Arc<dyn LeadStore>,
    leads: Vec<Lead>,
    loading: bool,
    form: LeadForm,
    editing: Option<LeadId>,
    dialog_open: bool,
    sync_notice: Option<String>,
}

impl LeadsScreen {
    /// A screen that has not fetched yet
    pub fn new(store: Arc<dyn LeadStore>) -> Self {
        Self {
            store,
            leads: Vec::new(),
            loading: true,
            form: LeadForm::default(),
            editing: None,
            dialog_open: false,
            sync_notice: None,
        }
    }

    /// Create the screen and run its first load
    pub async fn mount(store: Arc<dyn LeadStore>) -> Self {
        let mut screen = Self::new(store);
        screen.load().await;
        screen
    }

    pub fn leads(&self) -> &[Lead] {
        &self.leads
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn form(&self) -> &LeadForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut LeadForm {
        &mut self.form
    }

    pub fn editing(&self) -> Option<&LeadId> {
        self.editing.as_ref()
    }

    pub fn dialog_open(&self) -> bool {
        self.dialog_open
    }

    /// Set when a status change could neither be saved nor reconciled
    pub fn sync_notice(&self) -> Option<&str> {
        self.sync_notice.as_deref()
    }

    pub fn rows(&self) -> Vec<LeadRow> {
        self.leads.iter().map(LeadRow::from_lead).collect()
    }

    /// Shown instead of the table once loading has finished with no leads
    pub fn empty_message(&self) -> Option<&'static str> {
        (self.leads.is_empty() && !self.loading).then_some(EMPTY_LIST_MESSAGE)
    }

    pub fn dialog_title(&self) -> &'static str {
        if self.editing.is_some() {
            "Editar Lead"
        } else {
            "Novo Lead"
        }
    }

    pub fn dialog_description(&self) -> &'static str {
        if self.editing.is_some() {
            "Edite os dados do lead abaixo."
        } else {
            "Preencha os dados do novo lead abaixo."
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.editing.is_some() {
            "Atualizar"
        } else {
            "Salvar Lead"
        }
    }

    /// Fetch every lead, newest first. A failure is logged and the previous
    /// list stays in place. Returns whether the fetch succeeded.
    pub async fn load(&mut self) -> bool {
        self.loading = true;
        let result = list_newest_first(self.store.as_ref()).await;
        self.loading = false;

        match result {
            Ok(leads) => {
                self.leads = leads;
                self.sync_notice = None;
                true
            }
            Err(e) => {
                error!(error = %e, "Error fetching leads");
                false
            }
        }
    }

    pub fn open_create(&mut self) {
        self.reset_form();
        self.dialog_open = true;
    }

    /// Open the dialog pre-filled from a listed lead. Unknown ids are ignored.
    pub fn open_edit(&mut self, id: &LeadId) -> bool {
        let Some(lead) = self.leads.iter().find(|lead| &lead.id == id) else {
            return false;
        };
        self.form = LeadForm::from_lead(lead);
        self.editing = Some(lead.id.clone());
        self.dialog_open = true;
        true
    }

    /// Dismiss the dialog, leaving the form as typed
    pub fn close_dialog(&mut self) {
        self.dialog_open = false;
    }

    /// Validate the form and write it: update when editing, insert otherwise.
    ///
    /// On success the dialog closes, the form resets and the list is
    /// reloaded. On failure the dialog and form stay as they were.
    pub async fn save(&mut self, prompt: &dyn Prompt) -> SaveOutcome {
        let draft = match self.form.to_draft() {
            Ok(draft) => draft,
            Err(e) => {
                prompt.alert(&e.to_string());
                return SaveOutcome::Invalid(e);
            }
        };

        let (result, outcome) = match &self.editing {
            Some(id) => (
                self.store.update(id, &LeadPatch::Details(draft)).await,
                SaveOutcome::Updated,
            ),
            None => (
                self.store.insert(&NewLead::stamped(draft)).await,
                SaveOutcome::Created,
            ),
        };

        if let Err(e) = result {
            error!(error = %e, "Error saving lead");
            let message = e.message();
            prompt.alert(&format!("Erro ao salvar lead: {}", message));
            return SaveOutcome::Failed(message);
        }

        info!(outcome = ?outcome, "lead saved");
        self.dialog_open = false;
        self.reset_form();
        self.load().await;
        outcome
    }

    /// Delete after confirmation. The row is dropped locally, without a
    /// reload.
    pub async fn delete(&mut self, id: &LeadId, prompt: &dyn Prompt) -> DeleteOutcome {
        if !prompt.confirm(DELETE_CONFIRMATION) {
            return DeleteOutcome::Cancelled;
        }

        match self.store.delete(id).await {
            Ok(()) => {
                self.leads.retain(|lead| &lead.id != id);
                info!(id = %id, "lead deleted");
                DeleteOutcome::Deleted
            }
            Err(e) => {
                error!(error = %e, id = %id, "Error deleting lead");
                let message = e.message();
                prompt.alert(&format!("Erro ao excluir lead: {}", message));
                DeleteOutcome::Failed(message)
            }
        }
    }

    /// Show the new status locally right away. The returned change still
    /// has to go through [`LeadsScreen::confirm_status`].
    pub fn apply_status(&mut self, id: &LeadId, status: LeadStatus) -> Option<PendingStatusChange> {
        let lead = self.leads.iter_mut().find(|lead| &lead.id == id)?;
        lead.status = status;
        Some(PendingStatusChange {
            id: id.clone(),
            status,
        })
    }

    /// Write a tentative status. When the store rejects it the list is
    /// reloaded so the stored value replaces the local one; nothing is
    /// rolled back by hand.
    pub async fn confirm_status(&mut self, change: PendingStatusChange) -> StatusOutcome {
        let patch = LeadPatch::Status(StatusPatch {
            status: change.status,
        });
        let Err(e) = self.store.update(&change.id, &patch).await else {
            return StatusOutcome::Confirmed;
        };

        error!(error = %e, id = %change.id, "Error updating status");
        if self.load().await {
            return StatusOutcome::Reconciled;
        }

        warn!(id = %change.id, status = %change.status, "status change neither saved nor reconciled");
        self.sync_notice = Some(format!(
            "O status \"{}\" do lead {} pode não ter sido salvo. Recarregue a lista.",
            change.status, change.id
        ));
        StatusOutcome::Unreconciled
    }

    /// Optimistic status change: apply locally, then confirm with the store
    pub async fn change_status(&mut self, id: &LeadId, status: LeadStatus) -> StatusOutcome {
        match self.apply_status(id, status) {
            Some(change) => self.confirm_status(change).await,
            None => StatusOutcome::UnknownLead,
        }
    }

    fn reset_form(&mut self) {
        self.form = LeadForm::default();
        self.editing = None;
    }
}
