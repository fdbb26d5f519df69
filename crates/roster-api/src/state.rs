//! Application state management
//!
//! Author: hephaex@gmail.com

use crate::auth::{AccountService, TokenService};
use roster_core::{AppConfig, UserStore};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Application state shared across handlers
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,
    /// The document store holding user records
    pub store: Arc<dyn UserStore>,
    /// Token service carrying the process-wide signing secret
    pub tokens: TokenService,
    /// Server start time
    pub start_time: Instant,
    /// Request counter
    pub request_count: AtomicU64,
}

impl AppState {
    /// Create new application state; the signing secret is read from the
    /// config exactly once, here.
    pub fn new(config: AppConfig, store: Arc<dyn UserStore>) -> Self {
        let tokens = TokenService::new(&config.auth);
        Self {
            config,
            store,
            tokens,
            start_time: Instant::now(),
            request_count: AtomicU64::new(0),
        }
    }

    /// Account service bound to this state's store and token service
    pub fn accounts(&self) -> AccountService {
        AccountService::new(self.store.clone(), self.tokens.clone())
    }

    /// Increment request counter
    pub fn increment_requests(&self) -> u64 {
        self.request_count.fetch_add(1, Ordering::SeqCst)
    }

    /// Get total request count
    pub fn get_request_count(&self) -> u64 {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Get uptime in seconds
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
