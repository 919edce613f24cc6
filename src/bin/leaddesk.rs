use std::error::Error;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use clap::{Arg, Command};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use leaddesk::config::StoreConfig;
use leaddesk::dashboard::{DashboardScreen, DashboardView};
use leaddesk::leads::{
    LeadForm, LeadId, LeadSource, LeadStatus, LeadStore, LeadsScreen, SaveOutcome,
};
use leaddesk::nav::{header_links, Route, BRAND};
use leaddesk::prompt::Prompt;
use leaddesk::LeadDesk;

const RESET: &str = "\x1b[0m";

const HELP: &str = "\
comandos:
  dashboard | leads | go <caminho>   trocar de tela
  reload                             recarregar a tela atual
  new                                novo lead (tela Leads)
  edit <n>                           editar o lead n
  delete <n>                         excluir o lead n
  status <n> <status>                mudar o status do lead n
  help | quit";

/// Answers alerts and confirmations on the terminal
struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn alert(&self, message: &str) {
        println!("! {}", message);
    }

    fn confirm(&self, message: &str) -> bool {
        ask(&format!("{} [s/N] ", message))
            .map(|answer| matches!(answer.trim().to_lowercase().as_str(), "s" | "sim" | "y" | "yes"))
            .unwrap_or(false)
    }
}

/// Print the question and wait for one line; `None` on end of input.
///
/// The read blocks, so the runtime is told to move its other tasks off this
/// worker first. Needs the multi-threaded runtime `tokio::main` starts.
fn ask(question: &str) -> Option<String> {
    print!("{}", question);
    io::stdout().flush().ok()?;
    tokio::task::block_in_place(|| read_answer(&mut io::stdin().lock()))
}

fn read_answer(reader: &mut impl BufRead) -> Option<String> {
    let mut line = String::new();
    match reader.read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim_end().to_string()),
    }
}

enum Screen {
    Dashboard(DashboardScreen),
    Leads(LeadsScreen),
}

struct App {
    store: Arc<dyn LeadStore>,
    route: Route,
    screen: Screen,
    prompt: TerminalPrompt,
}

impl App {
    async fn open(store: Arc<dyn LeadStore>, route: Route) -> Self {
        let screen = mount(&store, route).await;
        Self {
            store,
            route,
            screen,
            prompt: TerminalPrompt,
        }
    }

    /// Every navigation mounts a fresh screen, which fetches again
    async fn navigate(&mut self, route: Route) {
        self.route = route;
        self.screen = mount(&self.store, route).await;
    }

    fn render(&self) {
        let links: Vec<String> = header_links(self.route)
            .into_iter()
            .map(|link| {
                if link.active {
                    format!("[{}]", link.label)
                } else {
                    link.label.to_string()
                }
            })
            .collect();
        println!();
        println!("{}  {}", BRAND, links.join("  "));
        println!();

        match &self.screen {
            Screen::Dashboard(screen) => render_dashboard(&screen.view()),
            Screen::Leads(screen) => render_leads(screen),
        }
    }

    async fn run(&mut self) {
        self.render();
        while let Some(line) = ask("> ") {
            let words: Vec<&str> = line.split_whitespace().collect();
            match words.as_slice() {
                [] => continue,
                ["quit"] | ["exit"] => break,
                ["help"] => {
                    println!("{}", HELP);
                    continue;
                }
                ["dashboard"] => self.navigate(Route::Dashboard).await,
                ["leads"] => self.navigate(Route::Leads).await,
                ["go", path] => match Route::from_path(path) {
                    Some(route) => self.navigate(route).await,
                    None => println!("rota desconhecida: {}", path),
                },
                ["reload"] => match &mut self.screen {
                    Screen::Dashboard(screen) => {
                        screen.load().await;
                    }
                    Screen::Leads(screen) => {
                        screen.load().await;
                    }
                },
                command => match &mut self.screen {
                    Screen::Leads(screen) => run_leads_command(screen, command, &self.prompt).await,
                    Screen::Dashboard(_) => println!("comando desconhecido; digite help"),
                },
            }
            self.render();
        }
    }
}

async fn mount(store: &Arc<dyn LeadStore>, route: Route) -> Screen {
    match route {
        Route::Dashboard => Screen::Dashboard(DashboardScreen::mount(Arc::clone(store)).await),
        Route::Leads => Screen::Leads(LeadsScreen::mount(Arc::clone(store)).await),
    }
}

async fn run_leads_command(screen: &mut LeadsScreen, command: &[&str], prompt: &TerminalPrompt) {
    match command {
        ["new"] => {
            screen.open_create();
            edit_until_saved(screen, prompt).await;
        }
        ["edit", n] => {
            let Some(id) = lead_at(screen, n) else { return };
            screen.open_edit(&id);
            edit_until_saved(screen, prompt).await;
        }
        ["delete", n] => {
            let Some(id) = lead_at(screen, n) else { return };
            screen.delete(&id, prompt).await;
        }
        ["status", n, status] => {
            let Some(id) = lead_at(screen, n) else { return };
            match LeadStatus::parse(status) {
                Some(status) => {
                    let outcome = screen.change_status(&id, status).await;
                    info!(id = %id, ?outcome, "status change");
                }
                None => println!("status desconhecido: {}", status),
            }
        }
        _ => println!("comando desconhecido; digite help"),
    }
}

/// Keep the dialog open until the lead is saved or the user gives up
async fn edit_until_saved(screen: &mut LeadsScreen, prompt: &TerminalPrompt) {
    println!("{}", screen.dialog_title());
    println!("{}", screen.dialog_description());

    while screen.dialog_open() {
        if !fill_form(screen.form_mut()) {
            screen.close_dialog();
            return;
        }
        match screen.save(prompt).await {
            SaveOutcome::Created | SaveOutcome::Updated => return,
            SaveOutcome::Invalid(_) | SaveOutcome::Failed(_) => {
                if !prompt.confirm("Tentar novamente?") {
                    screen.close_dialog();
                }
            }
        }
    }
}

/// Ask for every field, keeping the current value on an empty answer.
/// Returns false on end of input.
fn fill_form(form: &mut LeadForm) -> bool {
    let text_fields: [(&str, &mut String); 7] = [
        ("Empresa *", &mut form.company),
        ("Nome do Contato", &mut form.contact_name),
        ("Ticket Total (R$) *", &mut form.ticket_total),
        ("Ticket Mensal (R$) *", &mut form.ticket_monthly),
        ("Produto/Oferta", &mut form.product),
        ("Previsão (AAAA-MM-DD)", &mut form.forecast_date),
        ("Observações", &mut form.obs),
    ];
    for (label, value) in text_fields {
        let Some(answer) = ask(&format!("{} [{}]: ", label, value)) else {
            return false;
        };
        if !answer.is_empty() {
            *value = answer;
        }
    }

    let Some(answer) = ask(&format!("Origem (AliveAI/Zellgo) [{}]: ", form.source)) else {
        return false;
    };
    if let Some(source) = LeadSource::ALL
        .into_iter()
        .find(|source| source.as_str().eq_ignore_ascii_case(answer.trim()))
    {
        form.source = source;
    }

    let Some(answer) = ask(&format!("Status [{}]: ", form.status)) else {
        return false;
    };
    if let Some(status) = LeadStatus::parse(&answer) {
        form.status = status;
    }
    true
}

fn lead_at(screen: &LeadsScreen, n: &str) -> Option<LeadId> {
    let id = n
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|index| screen.leads().get(index))
        .map(|lead| lead.id.clone());
    if id.is_none() {
        println!("lead inexistente: {}", n);
    }
    id
}

fn render_dashboard(view: &DashboardView) {
    println!("Dashboard");
    for card in &view.cards {
        let color = card.accent.map(|accent| accent.ansi()).unwrap_or("");
        println!(
            "  {:<28} {}{:>18}{}  {}",
            card.title, color, card.value, RESET, card.caption
        );
    }
    println!();
    println!("{}: {}", view.overview_title, view.chart_placeholder);
    println!();
    println!("{}", view.activity_title);
    if let Some(message) = view.activity_message {
        println!("  {}", message);
    }
    for item in &view.activity {
        println!(
            "  {:<24} {:<40} {}{}{}",
            item.headline,
            item.detail,
            item.accent.ansi(),
            item.amount,
            RESET
        );
    }
}

fn render_leads(screen: &LeadsScreen) {
    println!("Gerenciamento de Leads   (+ Gerar Lead: new)");
    if let Some(notice) = screen.sync_notice() {
        println!("! {}", notice);
    }
    if screen.loading() {
        println!("Carregando...");
        return;
    }
    if let Some(message) = screen.empty_message() {
        println!("{}", message);
        return;
    }

    for (i, row) in screen.rows().iter().enumerate() {
        let source_color = row.source.map(|source| source.badge_color().ansi()).unwrap_or("");
        println!(
            "{:>3}. ({}) {} / {} | {} | {} | {}{}{} | {}{}{} | mensal {} | total {} | {}",
            i + 1,
            row.initials,
            row.contact,
            row.company,
            row.product,
            row.forecast,
            source_color,
            row.source_label,
            RESET,
            row.status_badge().ansi(),
            row.status,
            RESET,
            row.monthly,
            row.total,
            row.notes,
        );
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let matches = Command::new("leaddesk")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Lead pipeline and revenue dashboard")
        .arg(
            Arg::new("route")
                .long("route")
                .value_name("PATH")
                .takes_value(true)
                .default_value("/")
                .help("Screen to open first (/ or /leads)"),
        )
        .get_matches();

    let desk = LeadDesk::new(StoreConfig::from_env())?;
    info!(url = %desk.config().url, "using hosted lead store");
    let store = desk.lead_store();

    let path = matches.value_of("route").unwrap_or("/");
    let route = Route::from_path(path).unwrap_or_else(|| {
        warn!(path, "unknown route, opening the dashboard");
        Route::Dashboard
    });

    App::open(store, route).await.run().await;
    Ok(())
}
