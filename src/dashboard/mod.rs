//! Dashboard screen: revenue per source and the recent-activity feed

mod screen;
mod stats;
mod view;

pub use screen::DashboardScreen;
pub use stats::{DashboardStats, RECENT_LIMIT};
pub use view::{
    ActivityItem, DashboardView, SummaryCard, CHART_PLACEHOLDER, LOADING_ACTIVITY, NO_ACTIVITY,
};
