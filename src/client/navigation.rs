//! Navigation seam
//!
//! The client never owns the window. Redirects (login on 401, dashboard after
//! the root probe) go through a [`Navigator`] the host supplies.

use std::sync::{Arc, Mutex};

/// Host hook that moves the user to another location
pub trait Navigator: Send + Sync {
    /// Navigate to an absolute URL or an in-app path
    fn navigate(&self, location: &str);
}

/// Navigator that records every destination instead of leaving the page.
///
/// Useful for headless hosts and for inspecting redirects.
#[derive(Debug, Clone, Default)]
pub struct NavigationHistory {
    entries: Arc<Mutex<Vec<String>>>,
}

impl NavigationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// All destinations, oldest first
    pub fn entries(&self) -> Vec<String> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    pub fn last(&self) -> Option<String> {
        self.entries().pop()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Navigator for NavigationHistory {
    fn navigate(&self, location: &str) {
        tracing::info!("[NAV] -> {}", location);
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.push(location.to_string());
    }
}
