use rust_decimal::Decimal;
use tracing::warn;

use crate::leads::{Lead, LeadSource};

/// Number of leads shown in the activity feed
pub const RECENT_LIMIT: usize = 5;

/// Totals shown on the dashboard. Zeroed until the first successful load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardStats {
    pub alive_ai_total: Decimal,
    pub alive_ai_monthly: Decimal,
    pub zellgo_total: Decimal,
    pub zellgo_monthly: Decimal,
    pub total_leads: usize,
    pub recent_leads: Vec<Lead>,
}

impl DashboardStats {
    /// Aggregate a listing that is already ordered newest first.
    ///
    /// Leads without a known source count towards `total_leads` and the
    /// feed but towards neither revenue group. Missing amounts add zero and
    /// a sum past `Decimal::MAX` stays at the bound.
    pub fn aggregate(leads: &[Lead]) -> Self {
        let (alive_ai_total, alive_ai_monthly) = sum_for(leads, LeadSource::AliveAi);
        let (zellgo_total, zellgo_monthly) = sum_for(leads, LeadSource::Zellgo);

        Self {
            alive_ai_total,
            alive_ai_monthly,
            zellgo_total,
            zellgo_monthly,
            total_leads: leads.len(),
            recent_leads: leads.iter().take(RECENT_LIMIT).cloned().collect(),
        }
    }
}

fn sum_for(leads: &[Lead], source: LeadSource) -> (Decimal, Decimal) {
    leads
        .iter()
        .filter(|lead| lead.origem == Some(source))
        .fold((Decimal::ZERO, Decimal::ZERO), |(total, monthly), lead| {
            (
                add_amount(total, lead.ticket_total_rs, source),
                add_amount(monthly, lead.ticket_mensal_rs, source),
            )
        })
}

fn add_amount(sum: Decimal, amount: Option<Decimal>, source: LeadSource) -> Decimal {
    let amount = amount.unwrap_or_default();
    sum.checked_add(amount).unwrap_or_else(|| {
        warn!(%source, "revenue total out of range, keeping it at the bound");
        sum.saturating_add(amount)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leads::{LeadId, LeadStatus};
    use chrono::{Duration, TimeZone, Utc};

    fn lead(
        n: i64,
        empresa: &str,
        origem: Option<LeadSource>,
        total: Option<i64>,
        monthly: Option<i64>,
    ) -> Lead {
        Lead {
            id: LeadId::new(n.to_string()),
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap() - Duration::days(n),
            empresa: empresa.to_string(),
            contato_principal: None,
            status: LeadStatus::New,
            origem,
            ticket_total_rs: total.map(Decimal::from),
            ticket_mensal_rs: monthly.map(Decimal::from),
            produto_oferta: None,
            mes_competencia: None,
            obs: None,
            avatar_url: None,
        }
    }

    #[test]
    fn sums_per_source() {
        let leads = vec![
            lead(0, "Acme", Some(LeadSource::AliveAi), Some(1000), Some(100)),
            lead(1, "Beta", Some(LeadSource::Zellgo), Some(500), None),
        ];

        let stats = DashboardStats::aggregate(&leads);

        assert_eq!(stats.alive_ai_total, Decimal::from(1000));
        assert_eq!(stats.alive_ai_monthly, Decimal::from(100));
        assert_eq!(stats.zellgo_total, Decimal::from(500));
        assert_eq!(stats.zellgo_monthly, Decimal::ZERO);
        assert_eq!(stats.total_leads, 2);
        let feed: Vec<_> = stats.recent_leads.iter().map(|l| l.empresa.as_str()).collect();
        assert_eq!(feed, ["Acme", "Beta"]);
    }

    #[test]
    fn unknown_sources_only_count_as_leads() {
        let leads = vec![
            lead(0, "Sem origem", None, Some(9999), Some(999)),
            lead(1, "Acme", Some(LeadSource::AliveAi), Some(10), Some(1)),
        ];

        let stats = DashboardStats::aggregate(&leads);

        assert_eq!(stats.alive_ai_total, Decimal::from(10));
        assert_eq!(stats.zellgo_total, Decimal::ZERO);
        assert_eq!(stats.total_leads, 2);
        assert_eq!(stats.recent_leads.len(), 2);
    }

    #[test]
    fn feed_keeps_the_first_five_in_order() {
        let leads: Vec<_> = (0..8)
            .map(|n| lead(n, &format!("L{}", n), Some(LeadSource::Zellgo), Some(n), None))
            .collect();

        let stats = DashboardStats::aggregate(&leads);

        assert_eq!(stats.total_leads, 8);
        assert_eq!(stats.recent_leads, leads[..RECENT_LIMIT].to_vec());
        assert_eq!(stats.zellgo_total, Decimal::from(28));
    }

    #[test]
    fn oversized_totals_saturate() {
        let huge = "50000000000000000000000000000".parse::<Decimal>().unwrap();
        let mut leads = vec![
            lead(0, "Acme", Some(LeadSource::AliveAi), None, None),
            lead(1, "Beta", Some(LeadSource::AliveAi), None, None),
            lead(2, "Gamma", Some(LeadSource::Zellgo), Some(7), None),
        ];
        for lead in &mut leads[..2] {
            lead.ticket_total_rs = Some(huge);
            lead.ticket_mensal_rs = Some(-huge);
        }

        let stats = DashboardStats::aggregate(&leads);

        assert_eq!(stats.alive_ai_total, Decimal::MAX);
        assert_eq!(stats.alive_ai_monthly, Decimal::MIN);
        assert_eq!(stats.zellgo_total, Decimal::from(7));
        assert_eq!(stats.total_leads, 3);
    }

    #[test]
    fn empty_listing_gives_zeroes() {
        assert_eq!(DashboardStats::aggregate(&[]), DashboardStats::default());
    }
}
