//! Search-as-you-type with debouncing
//!
//! Each keystroke cancels the pending lookup. A lookup only starts once the
//! input has been quiet for the debounce delay, and only its own generation
//! may publish suggestions.

use crate::Result;
use crate::config::DashboardConfig;
use crate::gateway::Gateway;
use crate::models::CitySuggestion;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// City name lookup used by [`CitySearch`]
#[async_trait]
pub trait CityLookup: Send + Sync {
    async fn search_cities(&self, query: &str) -> Result<Vec<CitySuggestion>>;
}

#[async_trait]
impl CityLookup for Gateway {
    async fn search_cities(&self, query: &str) -> Result<Vec<CitySuggestion>> {
        Gateway::search_cities(self, query).await
    }
}

pub struct CitySearch {
    lookup: Arc<dyn CityLookup>,
    delay: Duration,
    min_chars: usize,
    generation: Arc<AtomicU64>,
    pending: Mutex<Option<JoinHandle<()>>>,
    suggestions: Arc<watch::Sender<Vec<CitySuggestion>>>,
}

impl CitySearch {
    #[must_use]
    pub fn new(lookup: Arc<dyn CityLookup>, delay: Duration, min_chars: usize) -> Self {
        let (tx, _) = watch::channel(Vec::new());
        Self {
            lookup,
            delay,
            min_chars,
            generation: Arc::new(AtomicU64::new(0)),
            pending: Mutex::new(None),
            suggestions: Arc::new(tx),
        }
    }

    /// Debounce delay and minimum length from the dashboard settings
    #[must_use]
    pub fn from_config(lookup: Arc<dyn CityLookup>, config: &DashboardConfig) -> Self {
        Self::new(
            lookup,
            Duration::from_millis(config.search_debounce_ms),
            config.search_min_chars,
        )
    }

    /// Latest suggestion list
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<CitySuggestion>> {
        self.suggestions.subscribe()
    }

    #[must_use]
    pub fn current(&self) -> Vec<CitySuggestion> {
        self.suggestions.borrow().clone()
    }

    /// Feed the latest contents of the search box. Must run inside a tokio runtime.
    pub fn input(&self, text: &str) {
        // The latest generation always owns the pending task
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(handle) = pending.take() {
            handle.abort();
        }

        let query = text.trim().to_string();
        if query.chars().count() < self.min_chars {
            self.suggestions.send_replace(Vec::new());
            return;
        }

        let lookup = Arc::clone(&self.lookup);
        let latest = Arc::clone(&self.generation);
        let suggestions = Arc::clone(&self.suggestions);
        let delay = self.delay;

        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let results = match lookup.search_cities(&query).await {
                Ok(results) => results,
                Err(e) => {
                    warn!("City search for '{}' failed: {}", query, e);
                    Vec::new()
                }
            };

            if latest.load(Ordering::SeqCst) == generation {
                debug!("{} suggestions for '{}'", results.len(), query);
                suggestions.send_replace(results);
            }
        }));
    }

    /// Drop suggestions, e.g. after a city was picked
    pub fn clear(&self) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(handle) = pending.take() {
            handle.abort();
        }
        self.suggestions.send_replace(Vec::new());
    }
}

impl Drop for CitySearch {
    fn drop(&mut self) {
        if let Some(handle) = self
            .pending
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            handle.abort();
        }
    }
}
