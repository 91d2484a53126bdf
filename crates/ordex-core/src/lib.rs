//! Core library for order-email extraction.
//!
//! This crate provides:
//! - HTML-to-text normalization for transactional email bodies
//! - Rule-based field extraction (customer, restaurant, address, date, amount, items)
//! - Rejection filtering for non-order notifications (promos, alerts, cancellations)

pub mod error;
pub mod html;
pub mod models;
pub mod order;

pub use error::{OrdexError, Result};
pub use html::normalize;
pub use models::config::{ExtractionConfig, OrdexConfig};
pub use models::order::{OrderRecord, UNKNOWN};
pub use order::{ExtractionResult, OrderParser};
