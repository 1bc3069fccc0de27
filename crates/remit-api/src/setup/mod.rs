//! Application initialization.

pub mod routes;
pub mod server;
pub mod services;

use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use remit_core::Config;

use crate::state::AppState;

/// Initialize external service clients and build the router.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, Router)> {
    let state = services::initialize_services(&config).await?;
    let router = routes::build_router(state.clone());
    Ok((state, router))
}
