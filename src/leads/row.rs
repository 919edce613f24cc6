//! Display form of a lead in the listing table.

use crate::format::{format_amount_cell, format_month, initials, PLACEHOLDER};
use crate::leads::form::DEFAULT_CONTACT_NAME;
use crate::leads::model::{Lead, LeadId, LeadSource, LeadStatus};

/// Badge palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeColor {
    Blue,
    Yellow,
    Purple,
    Orange,
    Green,
    Gray,
}

impl BadgeColor {
    /// CSS utility classes for the badge
    pub fn class(&self) -> &'static str {
        match self {
            BadgeColor::Blue => "bg-blue-100 text-blue-800",
            BadgeColor::Yellow => "bg-yellow-100 text-yellow-800",
            BadgeColor::Purple => "bg-purple-100 text-purple-800",
            BadgeColor::Orange => "bg-orange-100 text-orange-800",
            BadgeColor::Green => "bg-green-100 text-green-800",
            BadgeColor::Gray => "bg-gray-100 text-gray-800",
        }
    }

    /// ANSI foreground colour for terminal output
    pub fn ansi(&self) -> &'static str {
        match self {
            BadgeColor::Blue => "\x1b[34m",
            BadgeColor::Yellow => "\x1b[33m",
            BadgeColor::Purple => "\x1b[35m",
            BadgeColor::Orange => "\x1b[38;5;208m",
            BadgeColor::Green => "\x1b[32m",
            BadgeColor::Gray => "\x1b[90m",
        }
    }
}

impl LeadStatus {
    pub fn badge_color(&self) -> BadgeColor {
        match self {
            LeadStatus::New => BadgeColor::Blue,
            LeadStatus::Contacted => BadgeColor::Yellow,
            LeadStatus::Qualified => BadgeColor::Purple,
            LeadStatus::Proposal => BadgeColor::Orange,
            LeadStatus::Won => BadgeColor::Green,
            LeadStatus::Lost => BadgeColor::Gray,
        }
    }
}

impl LeadSource {
    pub fn badge_color(&self) -> BadgeColor {
        match self {
            LeadSource::AliveAi => BadgeColor::Blue,
            LeadSource::Zellgo => BadgeColor::Green,
        }
    }
}

/// One row of the leads table, every cell already formatted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadRow {
    pub id: LeadId,
    pub avatar_url: Option<String>,
    pub initials: String,
    pub contact: String,
    pub company: String,
    pub product: String,
    pub forecast: String,
    pub source: Option<LeadSource>,
    pub source_label: String,
    pub status: LeadStatus,
    pub monthly: String,
    pub total: String,
    pub notes: String,
}

impl LeadRow {
    pub fn from_lead(lead: &Lead) -> Self {
        let contact = non_blank(lead.contato_principal.as_deref());
        Self {
            id: lead.id.clone(),
            avatar_url: lead.avatar_url.clone(),
            initials: initials(contact.unwrap_or(lead.empresa.as_str())),
            contact: contact.unwrap_or(DEFAULT_CONTACT_NAME).to_string(),
            company: lead.empresa.clone(),
            product: or_placeholder(lead.produto_oferta.as_deref()),
            forecast: lead
                .mes_competencia
                .map(format_month)
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
            source: lead.origem,
            source_label: lead
                .origem
                .map(|source| source.as_str().to_string())
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
            status: lead.status,
            monthly: format_amount_cell(lead.ticket_mensal_rs),
            total: format_amount_cell(lead.ticket_total_rs),
            notes: or_placeholder(lead.obs.as_deref()),
        }
    }

    pub fn status_badge(&self) -> BadgeColor {
        self.status.badge_color()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn or_placeholder(value: Option<&str>) -> String {
    non_blank(value).unwrap_or(PLACEHOLDER).to_string()
}
