//! Customer name extraction from the salutation line.

use super::ExtractionMatch;
use super::patterns::GREETING;

/// Extract the greeted name from a "Hi <Name>," salutation.
///
/// The name is one or more space-separated capitalized tokens; the first
/// match in the text wins, which is the salutation near the top of the
/// email.
pub fn extract_customer_name(text: &str) -> Option<ExtractionMatch<String>> {
    GREETING.captures(text).map(|caps| {
        let full_match = caps.get(0).unwrap();
        ExtractionMatch::new(caps[1].trim().to_string(), 0.9, full_match.as_str())
            .with_position(full_match.start(), full_match.end())
    })
}
