mod common;

use std::sync::Arc;

use rust_decimal::Decimal;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{acme_and_beta, lead};
use leaddesk::config::StoreConfig;
use leaddesk::dashboard::{DashboardScreen, RECENT_LIMIT};
use leaddesk::leads::{LeadSource, MemoryLeadStore, Operation};
use leaddesk::LeadDesk;

#[tokio::test]
async fn aggregates_revenue_per_source() {
    let mut leads = acme_and_beta();
    leads[1].ticket_mensal_rs = None;
    let store = Arc::new(MemoryLeadStore::with_leads(leads));

    let screen = DashboardScreen::mount(store).await;
    let stats = screen.stats();

    assert!(!screen.loading());
    assert_eq!(stats.alive_ai_total, Decimal::from(1000));
    assert_eq!(stats.alive_ai_monthly, Decimal::from(100));
    assert_eq!(stats.zellgo_total, Decimal::from(500));
    assert_eq!(stats.zellgo_monthly, Decimal::ZERO);
    assert_eq!(stats.total_leads, 2);
    let feed: Vec<_> = stats.recent_leads.iter().map(|l| l.empresa.as_str()).collect();
    assert_eq!(feed, ["Acme", "Beta"]);
}

#[tokio::test]
async fn feed_is_capped_at_the_five_newest() {
    let leads = (0..7)
        .map(|n| lead(&n.to_string(), &format!("Lead {}", n), LeadSource::AliveAi, 10, 1, n))
        .collect();
    let store = Arc::new(MemoryLeadStore::with_leads(leads));

    let screen = DashboardScreen::mount(store).await;

    assert_eq!(screen.stats().total_leads, 7);
    assert_eq!(screen.stats().recent_leads.len(), RECENT_LIMIT);
    assert_eq!(screen.stats().recent_leads[0].empresa, "Lead 0");
    assert_eq!(screen.stats().alive_ai_total, Decimal::from(70));
}

#[tokio::test]
async fn failed_load_leaves_zeroed_stats() {
    let store = Arc::new(MemoryLeadStore::with_leads(acme_and_beta()));
    store.fail_next(Operation::List, 1);

    let screen = DashboardScreen::mount(store).await;

    assert!(!screen.loading());
    assert_eq!(screen.stats().total_leads, 0);
    assert_eq!(screen.stats().alive_ai_total, Decimal::ZERO);

    let view = screen.view();
    assert_eq!(view.cards[0].value, "R$ 0,00");
    assert_eq!(view.activity_message, Some("Nenhuma atividade recente."));
}

#[tokio::test]
async fn renders_the_view_from_the_hosted_collection() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/leads"))
        .and(query_param("select", "*"))
        .and(query_param("order", "created_at.desc"))
        .and(header("apikey", "anon-key"))
        .and(header("Authorization", "Bearer anon-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 2,
                "created_at": "2025-03-02T09:00:00+00:00",
                "empresa": "Acme",
                "contato_principal": "Ana",
                "status": "Proposal",
                "origem": "AliveAI",
                "ticket_total_rs": 1234.56,
                "ticket_mensal_rs": 100
            },
            {
                "id": 1,
                "created_at": "2025-03-01T09:00:00+00:00",
                "empresa": "Beta",
                "contato_principal": "Bruno",
                "status": "New",
                "origem": "Zellgo",
                "ticket_total_rs": 500,
                "ticket_mensal_rs": null
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let desk = LeadDesk::new(StoreConfig::new(&server.uri(), "anon-key").unwrap()).unwrap();
    let view = DashboardScreen::mount(desk.lead_store()).await.view();

    let values: Vec<_> = view.cards.iter().map(|c| c.value.as_str()).collect();
    assert_eq!(
        values,
        ["R$ 1.234,56", "R$ 100,00", "2", "R$ 500,00", "R$ 0,00", "-"]
    );
    assert_eq!(view.activity.len(), 2);
    assert_eq!(view.activity[0].headline, "Novo lead AliveAI");
    assert_eq!(view.activity[0].detail, "Acme - Ana");
    assert_eq!(view.activity[0].amount, "+R$ 1.234,56");
    assert_eq!(view.activity[1].headline, "Novo lead Zellgo");
}

#[tokio::test]
async fn backend_errors_do_not_break_the_dashboard() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/leads"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Invalid API key",
            "hint": "Double check your Supabase `anon` or `service_role` API key."
        })))
        .mount(&server)
        .await;

    let desk = LeadDesk::new(StoreConfig::new(&server.uri(), "wrong").unwrap()).unwrap();
    let screen = DashboardScreen::mount(desk.lead_store()).await;

    assert_eq!(screen.stats().total_leads, 0);
    assert!(!screen.loading());
}
