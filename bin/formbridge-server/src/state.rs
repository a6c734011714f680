//! Shared application state injected into every Axum handler.

use std::fmt;
use std::sync::Arc;

use formbridge_crm::CrmApi;

use crate::config::Config;
use crate::templates::Templates;

/// State shared across all HTTP handlers. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (env-derived).
    pub config: Arc<Config>,
    /// Remote CRM client; a single pooled instance serves every request.
    pub crm: Arc<dyn CrmApi>,
    /// Compiled page templates.
    pub templates: Arc<Templates>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
