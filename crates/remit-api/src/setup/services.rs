//! Service initialization and application state setup

use std::sync::Arc;

use anyhow::{Context, Result};
use remit_core::Config;
use remit_sheets::create_spreadsheet;
use remit_storage::create_storage;

use crate::services::email::SmtpMailer;
use crate::state::AppState;

/// Initialize the external service clients, returning the application state
pub async fn initialize_services(config: &Config) -> Result<Arc<AppState>> {
    let is_production = config.is_production();
    tracing::info!(
        environment = %config.environment,
        is_production = is_production,
        "Environment configuration loaded"
    );

    tracing::info!("Initializing spreadsheet client...");
    let spreadsheet =
        create_spreadsheet(config).context("Failed to initialize spreadsheet client")?;
    tracing::info!(
        backend = %spreadsheet.backend_type(),
        "Spreadsheet client initialized successfully"
    );

    tracing::info!("Initializing receipt storage...");
    let storage = create_storage(config)
        .await
        .context("Failed to initialize receipt storage")?;
    tracing::info!(
        backend = %storage.backend_type(),
        folder = %config.receipts_folder,
        "Receipt storage initialized successfully"
    );

    let mailer = Arc::new(SmtpMailer::from_config(config).context("Failed to initialize mailer")?);

    Ok(Arc::new(AppState::new(
        config.clone(),
        spreadsheet,
        storage,
        mailer,
    )))
}
