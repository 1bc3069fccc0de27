//! Remit API
//!
//! The HTTP service: one form page, one submit action, one health probe.
//! The submission pipeline validates the posted form, uploads receipts to
//! storage, appends a spreadsheet row, and sends a confirmation email.

pub mod api_doc;
pub mod error;
pub mod handlers;
pub mod multipart;
pub mod services;
pub mod setup;
pub mod state;
pub mod telemetry;
