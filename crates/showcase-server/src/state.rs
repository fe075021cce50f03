//! Shared handler state

use crate::config::ServerConfig;
use showcase_core::Showcase;
use std::sync::Arc;

/// State cloned into every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub showcase: Arc<Showcase>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Build the components described by `config`
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        Self {
            showcase: Arc::new(Showcase::new(config.showcase)),
            config: Arc::new(config),
        }
    }
}
