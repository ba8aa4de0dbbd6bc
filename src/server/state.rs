//! Shared state handed to every handler.

use crate::auth::TokenIssuer;
use crate::clock::{Clock, SystemClock};
use crate::storage::ConnectionPool;
use std::sync::Arc;

/// Cheap to clone; every field is reference counted.
#[derive(Clone)]
pub struct AppState {
    pub pool: ConnectionPool,
    pub tokens: Arc<TokenIssuer>,
    pub clock: Arc<dyn Clock>,
    /// `None` disables the `X-API-Key` check.
    pub api_key: Option<Arc<str>>,
}

impl AppState {
    #[must_use]
    pub fn new(pool: ConnectionPool, tokens: TokenIssuer) -> Self {
        Self {
            pool,
            tokens: Arc::new(tokens),
            clock: Arc::new(SystemClock),
            api_key: None,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Require `X-API-Key` on non-auth routes. An empty key leaves the check off.
    #[must_use]
    pub fn with_api_key(mut self, key: &str) -> Self {
        self.api_key = (!key.is_empty()).then(|| Arc::from(key));
        self
    }
}
