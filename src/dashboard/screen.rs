use std::sync::Arc;

use tracing::{debug, error};

use crate::dashboard::stats::DashboardStats;
use crate::dashboard::view::DashboardView;
use crate::leads::{list_newest_first, LeadStore};

/// Read-only summary of every lead
pub struct DashboardScreen {
    store: Arc<dyn LeadStore>,
    stats: DashboardStats,
    loading: bool,
}

impl DashboardScreen {
    pub fn new(store: Arc<dyn LeadStore>) -> Self {
        Self {
            store,
            stats: DashboardStats::default(),
            loading: true,
        }
    }

    /// Create the screen and run its first load
    pub async fn mount(store: Arc<dyn LeadStore>) -> Self {
        let mut screen = Self::new(store);
        screen.load().await;
        screen
    }

    pub fn stats(&self) -> &DashboardStats {
        &self.stats
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Fetch and aggregate. A failure is logged and the stats stay as they
    /// were.
    pub async fn load(&mut self) -> bool {
        self.loading = true;
        let result = list_newest_first(self.store.as_ref()).await;
        self.loading = false;

        match result {
            Ok(leads) => {
                self.stats = DashboardStats::aggregate(&leads);
                debug!(total_leads = self.stats.total_leads, "dashboard refreshed");
                true
            }
            Err(e) => {
                error!(error = %e, "Error fetching dashboard data");
                false
            }
        }
    }

    pub fn view(&self) -> DashboardView {
        DashboardView::render(&self.stats, self.loading)
    }
}
