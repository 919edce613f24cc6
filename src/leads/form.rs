//! Edit-form state for the lead dialog.

use chrono::NaiveDate;
use thiserror::Error;

use crate::format::parse_amount;
use crate::leads::model::{Lead, LeadDraft, LeadSource, LeadStatus};

/// Stored as the contact name when the field is left blank
pub const DEFAULT_CONTACT_NAME: &str = "Sem Nome";

/// Why a form could not be turned into a payload. Shown to the user as a
/// blocking alert; no store call is made.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Por favor preencha os campos obrigatórios")]
    MissingRequired,

    #[error("Valor inválido em {field}: {value}")]
    InvalidAmount { field: &'static str, value: String },

    #[error("Data de previsão inválida: {0}")]
    InvalidForecast(String),
}

/// The lead being created or edited, with every field as typed text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadForm {
    pub company: String,
    pub source: LeadSource,
    pub status: LeadStatus,
    pub ticket_total: String,
    pub ticket_monthly: String,
    pub contact_name: String,
    pub product: String,
    pub forecast_date: String,
    pub obs: String,
}

impl LeadForm {
    /// Pre-populate from a stored lead. Missing optionals become empty text
    /// and a lead without a recognised source shows the default one.
    pub fn from_lead(lead: &Lead) -> Self {
        Self {
            company: lead.empresa.clone(),
            source: lead.origem.unwrap_or_default(),
            status: lead.status,
            ticket_total: amount_text(lead.ticket_total_rs),
            ticket_monthly: amount_text(lead.ticket_mensal_rs),
            contact_name: lead.contato_principal.clone().unwrap_or_default(),
            product: lead.produto_oferta.clone().unwrap_or_default(),
            forecast_date: lead
                .mes_competencia
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            obs: lead.obs.clone().unwrap_or_default(),
        }
    }

    /// Check the required fields and build the save payload
    pub fn to_draft(&self) -> Result<LeadDraft, FormError> {
        let company = self.company.trim();
        if company.is_empty()
            || self.ticket_total.trim().is_empty()
            || self.ticket_monthly.trim().is_empty()
        {
            return Err(FormError::MissingRequired);
        }

        let ticket_total = parse_field("Ticket Total", &self.ticket_total)?;
        let ticket_monthly = parse_field("Ticket Mensal", &self.ticket_monthly)?;
        let forecast = parse_forecast(&self.forecast_date)?;

        let contact = self.contact_name.trim();
        Ok(LeadDraft {
            empresa: company.to_string(),
            origem: self.source,
            status: self.status,
            contato_principal: if contact.is_empty() {
                DEFAULT_CONTACT_NAME.to_string()
            } else {
                contact.to_string()
            },
            ticket_total_rs: ticket_total,
            ticket_mensal_rs: ticket_monthly,
            produto_oferta: self.product.trim().to_string(),
            mes_competencia: forecast,
            obs: self.obs.trim().to_string(),
        })
    }
}

/// Decimal comma, so `parse_amount` reads the text back as the same value
fn amount_text(value: Option<rust_decimal::Decimal>) -> String {
    value
        .map(|amount| amount.normalize().to_string().replace('.', ","))
        .unwrap_or_default()
}

fn parse_field(field: &'static str, text: &str) -> Result<rust_decimal::Decimal, FormError> {
    parse_amount(text).ok_or_else(|| FormError::InvalidAmount {
        field,
        value: text.trim().to_string(),
    })
}

/// Blank means no forecast. Accepts a full date or a bare `YYYY-MM`, which
/// reads as the first day of that month.
fn parse_forecast(text: &str) -> Result<Option<NaiveDate>, FormError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{}-01", text), "%Y-%m-%d"))
        .map(Some)
        .map_err(|_| FormError::InvalidForecast(text.to_string()))
}
