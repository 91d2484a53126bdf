//! Order field extraction module.

mod extractor;
pub mod rules;

pub use extractor::{ExtractionResult, OrderParser};
