//! Rule-based field extractors for order emails.

pub mod amounts;
pub mod dates;
pub mod greeting;
pub mod items;
pub mod patterns;
pub mod reject;
pub mod vendor;

pub use amounts::{AmountExtractor, extract_amount, parse_grouped_amount};
pub use dates::{DateExtractor, extract_order_date};
pub use greeting::extract_customer_name;
pub use items::extract_items;
pub use reject::rejection_match;
pub use vendor::{extract_address, extract_restaurant};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A single successful pattern match with provenance.
#[derive(Debug, Clone)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Confidence score (0.0 - 1.0).
    pub confidence: f32,
    /// Position in source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, confidence: f32, source: impl Into<String>) -> Self {
        Self {
            value,
            confidence,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}
