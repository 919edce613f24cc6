//! Text the dashboard displays, computed from the stats.

use rust_decimal::Decimal;

use crate::dashboard::stats::DashboardStats;
use crate::format::{format_brl, PLACEHOLDER};
use crate::leads::{BadgeColor, Lead, LeadSource};

pub const CHART_PLACEHOLDER: &str = "Gráfico de Desempenho (Em breve)";
pub const NO_ACTIVITY: &str = "Nenhuma atividade recente.";
pub const LOADING_ACTIVITY: &str = "Carregando...";

const LOADING_VALUE: &str = "...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryCard {
    pub title: &'static str,
    pub value: String,
    pub caption: &'static str,
    /// Accent colour of the card, if any
    pub accent: Option<BadgeColor>,
}

/// One line of the recent-activity feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityItem {
    pub headline: String,
    pub detail: String,
    pub amount: String,
    pub accent: BadgeColor,
}

impl ActivityItem {
    fn from_lead(lead: &Lead) -> Self {
        let headline = match lead.origem {
            Some(source) => format!("Novo lead {}", source),
            None => "Novo lead".to_string(),
        };
        let contact = lead
            .contato_principal
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(PLACEHOLDER);

        Self {
            headline,
            detail: format!("{} - {}", lead.empresa, contact),
            amount: format!("+{}", format_brl(lead.ticket_total_rs.unwrap_or_default())),
            accent: match lead.origem {
                Some(LeadSource::AliveAi) => BadgeColor::Blue,
                _ => BadgeColor::Green,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub cards: Vec<SummaryCard>,
    pub overview_title: &'static str,
    pub chart_placeholder: &'static str,
    pub activity_title: &'static str,
    pub activity: Vec<ActivityItem>,
    /// Replaces the feed while loading or when it is empty
    pub activity_message: Option<&'static str>,
}

impl DashboardView {
    pub fn render(stats: &DashboardStats, loading: bool) -> Self {
        let money = |value: Decimal| {
            if loading {
                LOADING_VALUE.to_string()
            } else {
                format_brl(value)
            }
        };
        let count = if loading {
            LOADING_VALUE.to_string()
        } else {
            stats.total_leads.to_string()
        };

        let cards = vec![
            SummaryCard {
                title: "Faturamento Total AliveAI",
                value: money(stats.alive_ai_total),
                caption: "Soma de todos os contratos",
                accent: Some(BadgeColor::Blue),
            },
            SummaryCard {
                title: "Receita Mensal AliveAI",
                value: money(stats.alive_ai_monthly),
                caption: "Valor recorrente mensal",
                accent: Some(BadgeColor::Blue),
            },
            SummaryCard {
                title: "Total Leads",
                value: count,
                caption: "Leads cadastrados",
                accent: None,
            },
            SummaryCard {
                title: "Faturamento Total Zellgo",
                value: money(stats.zellgo_total),
                caption: "Soma de todos os contratos",
                accent: Some(BadgeColor::Green),
            },
            SummaryCard {
                title: "Receita Mensal Zellgo",
                value: money(stats.zellgo_monthly),
                caption: "Valor recorrente mensal",
                accent: Some(BadgeColor::Green),
            },
            SummaryCard {
                title: "Conversão",
                value: PLACEHOLDER.to_string(),
                caption: "Dados insuficientes",
                accent: None,
            },
        ];

        let (activity, activity_message) = if loading {
            (Vec::new(), Some(LOADING_ACTIVITY))
        } else if stats.recent_leads.is_empty() {
            (Vec::new(), Some(NO_ACTIVITY))
        } else {
            (
                stats.recent_leads.iter().map(ActivityItem::from_lead).collect(),
                None,
            )
        };

        Self {
            cards,
            overview_title: "Visão Geral",
            chart_placeholder: CHART_PLACEHOLDER,
            activity_title: "Atividades Recentes",
            activity,
            activity_message,
        }
    }
}
