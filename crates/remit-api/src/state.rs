//! Application state.
//!
//! One submission flow means one small state object: the configuration plus
//! the three external-service handles behind their trait seams, so tests can
//! substitute in-memory fakes.

use std::sync::Arc;

use remit_core::validation::ReceiptPolicy;
use remit_core::Config;
use remit_sheets::Spreadsheet;
use remit_storage::Storage;

use crate::services::email::Mailer;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub spreadsheet: Arc<dyn Spreadsheet>,
    pub storage: Arc<dyn Storage>,
    pub mailer: Arc<dyn Mailer>,
    pub receipts: ReceiptPolicy,
    pub is_production: bool,
}

impl AppState {
    pub fn new(
        config: Config,
        spreadsheet: Arc<dyn Spreadsheet>,
        storage: Arc<dyn Storage>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        let receipts = ReceiptPolicy {
            max_size_bytes: config.max_receipt_size_bytes,
            allowed_content_types: config.receipt_allowed_content_types.clone(),
        };
        let is_production = config.is_production();
        AppState {
            config,
            spreadsheet,
            storage,
            mailer,
            receipts,
            is_production,
        }
    }
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
