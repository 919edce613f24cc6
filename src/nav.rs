//! Static navigation shell shared by both screens.

use std::fmt;

pub const BRAND: &str = "AliveAI Sales Hub";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Route {
    #[default]
    Dashboard,
    Leads,
}

impl Route {
    /// Header link order
    pub fn all() -> [Route; 2] {
        [Route::Dashboard, Route::Leads]
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Dashboard => "/",
            Route::Leads => "/leads",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Route::Dashboard => "Dashboard",
            Route::Leads => "Leads",
        }
    }

    /// Resolve a path, ignoring a trailing slash
    pub fn from_path(path: &str) -> Option<Route> {
        let trimmed = path.trim();
        let normalized = match trimmed.trim_end_matches('/') {
            "" => "/",
            other => other,
        };
        Self::all().into_iter().find(|route| route.path() == normalized)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub route: Route,
    pub label: &'static str,
    pub href: &'static str,
    pub active: bool,
}

/// Header links with the current route marked
pub fn header_links(current: Route) -> Vec<NavLink> {
    Route::all()
        .into_iter()
        .map(|route| NavLink {
            route,
            label: route.label(),
            href: route.path(),
            active: route == current,
        })
        .collect()
}
