//! Axum router construction.
//!
//! [`build`] assembles the complete application router:
//! - contact and quote form pages plus their submit endpoints
//! - health / heartbeat route
//! - static assets under `/public`
//! - per-request trace-ID middleware

pub mod forms;
mod health;

use axum::{middleware, Router};
use std::sync::Arc;
use tower_http::services::ServeDir;

use crate::middleware::trace;
use crate::state::AppState;

/// Build the complete Axum [`Router`] for the application.
pub fn build(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(health::router())
        .merge(forms::router())
        .nest_service("/public", ServeDir::new(&state.config.static_dir))
        .layer(middleware::from_fn(trace::trace_middleware))
        .with_state(state)
}
