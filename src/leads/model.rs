//! The lead record and its write payloads.
//!
//! Field names match the columns of the `leads` table verbatim.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Identifier assigned by the store on insert. Opaque to the client: the
/// backend may hand out UUIDs or integers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct LeadId(String);

impl LeadId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LeadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for LeadId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(id) => LeadId(id),
            RawId::Number(id) => LeadId(id.to_string()),
        })
    }
}

/// Pipeline stage of a lead
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    Qualified,
    Proposal,
    Won,
    Lost,
}

impl LeadStatus {
    /// Every stage, in pipeline order
    pub const ALL: [LeadStatus; 6] = [
        LeadStatus::New,
        LeadStatus::Contacted,
        LeadStatus::Qualified,
        LeadStatus::Proposal,
        LeadStatus::Won,
        LeadStatus::Lost,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::New => "New",
            LeadStatus::Contacted => "Contacted",
            LeadStatus::Qualified => "Qualified",
            LeadStatus::Proposal => "Proposal",
            LeadStatus::Won => "Won",
            LeadStatus::Lost => "Lost",
        }
    }

    /// Case-insensitive lookup by name
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Channel that produced a lead
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LeadSource {
    #[default]
    #[serde(rename = "AliveAI")]
    AliveAi,
    Zellgo,
}

impl LeadSource {
    pub const ALL: [LeadSource; 2] = [LeadSource::AliveAi, LeadSource::Zellgo];

    pub fn as_str(&self) -> &'static str {
        match self {
            LeadSource::AliveAi => "AliveAI",
            LeadSource::Zellgo => "Zellgo",
        }
    }

    /// Exact lookup by wire name
    pub fn from_wire(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|source| source.as_str() == name)
    }
}

impl fmt::Display for LeadSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A sales prospect as stored in the `leads` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: LeadId,
    /// Timestamps without an offset are taken as UTC
    #[serde(deserialize_with = "utc_timestamp")]
    pub created_at: DateTime<Utc>,
    pub empresa: String,
    pub contato_principal: Option<String>,
    /// Missing, null and unrecognised stages read as `New`
    #[serde(default, deserialize_with = "known_status")]
    pub status: LeadStatus,
    /// Values other than the known channels read as `None`
    #[serde(default, deserialize_with = "known_source")]
    pub origem: Option<LeadSource>,
    pub ticket_total_rs: Option<Decimal>,
    pub ticket_mensal_rs: Option<Decimal>,
    pub produto_oferta: Option<String>,
    #[serde(default, deserialize_with = "calendar_date")]
    pub mes_competencia: Option<NaiveDate>,
    pub obs: Option<String>,
    pub avatar_url: Option<String>,
}

impl Lead {
    /// The record a store holds right after inserting `record` under `id`
    pub fn from_new(id: LeadId, record: &NewLead) -> Self {
        let mut lead = Lead {
            id,
            created_at: record.created_at,
            empresa: String::new(),
            contato_principal: None,
            status: LeadStatus::New,
            origem: None,
            ticket_total_rs: None,
            ticket_mensal_rs: None,
            produto_oferta: None,
            mes_competencia: None,
            obs: None,
            avatar_url: None,
        };
        lead.apply_draft(&record.draft);
        lead
    }

    /// Apply a patch the way the store does. `id` and `created_at` never change.
    pub fn apply(&mut self, patch: &LeadPatch) {
        match patch {
            LeadPatch::Details(draft) => self.apply_draft(draft),
            LeadPatch::Status(StatusPatch { status }) => self.status = *status,
        }
    }

    fn apply_draft(&mut self, draft: &LeadDraft) {
        self.empresa = draft.empresa.clone();
        self.origem = Some(draft.origem);
        self.status = draft.status;
        self.contato_principal = Some(draft.contato_principal.clone());
        self.ticket_total_rs = Some(draft.ticket_total_rs);
        self.ticket_mensal_rs = Some(draft.ticket_mensal_rs);
        self.produto_oferta = Some(draft.produto_oferta.clone());
        self.mes_competencia = draft.mes_competencia;
        self.obs = Some(draft.obs.clone());
    }
}

/// Every editable field of a lead, as sent by the save action
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeadDraft {
    pub empresa: String,
    pub origem: LeadSource,
    pub status: LeadStatus,
    pub contato_principal: String,
    pub ticket_total_rs: Decimal,
    pub ticket_mensal_rs: Decimal,
    pub produto_oferta: String,
    pub mes_competencia: Option<NaiveDate>,
    pub obs: String,
}

/// Insert payload: the draft plus the creation stamp
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewLead {
    #[serde(flatten)]
    pub draft: LeadDraft,
    pub created_at: DateTime<Utc>,
}

impl NewLead {
    /// Stamp a draft with the current time
    pub fn stamped(draft: LeadDraft) -> Self {
        Self {
            draft,
            created_at: Utc::now(),
        }
    }
}

/// Status-only update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusPatch {
    pub status: LeadStatus,
}

/// Partial record sent by an update
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LeadPatch {
    Details(LeadDraft),
    Status(StatusPatch),
}

fn known_status<'de, D: Deserializer<'de>>(deserializer: D) -> Result<LeadStatus, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(LeadStatus::parse).unwrap_or_default())
}

fn utc_timestamp<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    let text = raw.trim();
    if let Ok(stamp) = DateTime::parse_from_rfc3339(text)
        .or_else(|_| DateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f%#z"))
        .or_else(|_| DateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f%#z"))
    {
        return Ok(stamp.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f"))
        .map(|naive| naive.and_utc())
        .map_err(serde::de::Error::custom)
}

fn known_source<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<LeadSource>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(LeadSource::from_wire))
}

/// Accepts `YYYY-MM-DD` as well as timestamps that start with one
fn calendar_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => {
            let day = text.get(..10).unwrap_or(text);
            NaiveDate::parse_from_str(day, "%Y-%m-%d")
                .map(Some)
                .map_err(serde::de::Error::custom)
        }
    }
}
