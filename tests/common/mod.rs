#![allow(dead_code)]

use std::sync::Mutex;

use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;

use leaddesk::leads::{Lead, LeadId, LeadSource, LeadStatus};
use leaddesk::prompt::Prompt;

/// Prompt with a scripted confirmation answer that records what it was shown
pub struct RecordingPrompt {
    answer: bool,
    alerts: Mutex<Vec<String>>,
    questions: Mutex<Vec<String>>,
}

impl RecordingPrompt {
    pub fn accepting() -> Self {
        Self::answering(true)
    }

    pub fn declining() -> Self {
        Self::answering(false)
    }

    fn answering(answer: bool) -> Self {
        Self {
            answer,
            alerts: Mutex::new(Vec::new()),
            questions: Mutex::new(Vec::new()),
        }
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }

    pub fn questions(&self) -> Vec<String> {
        self.questions.lock().unwrap().clone()
    }
}

impl Prompt for RecordingPrompt {
    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }

    fn confirm(&self, message: &str) -> bool {
        self.questions.lock().unwrap().push(message.to_string());
        self.answer
    }
}

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
}

/// A lead created `age_days` before the base time
pub fn lead(id: &str, empresa: &str, origem: LeadSource, total: i64, monthly: i64, age_days: i64) -> Lead {
    Lead {
        id: LeadId::new(id),
        created_at: base_time() - Duration::days(age_days),
        empresa: empresa.to_string(),
        contato_principal: Some(format!("Contato {}", empresa)),
        status: LeadStatus::New,
        origem: Some(origem),
        ticket_total_rs: Some(Decimal::from(total)),
        ticket_mensal_rs: Some(Decimal::from(monthly)),
        produto_oferta: None,
        mes_competencia: None,
        obs: None,
        avatar_url: None,
    }
}

/// Acme (AliveAI, newest) and Beta (Zellgo, older)
pub fn acme_and_beta() -> Vec<Lead> {
    vec![
        lead("acme", "Acme", LeadSource::AliveAi, 1000, 100, 0),
        lead("beta", "Beta", LeadSource::Zellgo, 500, 0, 1),
    ]
}
