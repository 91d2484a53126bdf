//! Denylist filtering for non-order notifications.

use std::collections::BTreeMap;

/// Return the denylist category and phrase matching the text, if any.
///
/// Matching is case-insensitive substring containment. Phrases are checked
/// independently; a single hit is sufficient to classify the message as not
/// an order, regardless of any order-like content around it.
pub fn rejection_match<'a>(
    text: &str,
    denylist: &'a BTreeMap<String, Vec<String>>,
) -> Option<(&'a str, &'a str)> {
    let haystack = text.to_lowercase();

    for (category, phrases) in denylist {
        for phrase in phrases {
            if haystack.contains(&phrase.to_lowercase()) {
                return Some((category.as_str(), phrase.as_str()));
            }
        }
    }

    None
}
