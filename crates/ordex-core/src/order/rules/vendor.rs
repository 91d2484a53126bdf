//! Restaurant name and address extraction.

use regex::Regex;
use tracing::debug;

use super::ExtractionMatch;
use super::patterns::{DELIVERED_TO, ORDER_FROM, THANK_YOU_ORDER};

/// Extract the restaurant name from the order cue phrases.
///
/// "Thank you for ordering from <name>" is preferred over the looser
/// "order from <name>" form. The capture stops at a line boundary or clause
/// delimiter.
pub fn extract_restaurant(text: &str) -> Option<ExtractionMatch<String>> {
    if let Some(caps) = THANK_YOU_ORDER.captures(text) {
        let full_match = caps.get(0).unwrap();
        return Some(
            ExtractionMatch::new(caps[1].trim().to_string(), 0.95, full_match.as_str())
                .with_position(full_match.start(), full_match.end()),
        );
    }

    if let Some(caps) = ORDER_FROM.captures(text) {
        let full_match = caps.get(0).unwrap();
        return Some(
            ExtractionMatch::new(caps[1].trim().to_string(), 0.8, full_match.as_str())
                .with_position(full_match.start(), full_match.end()),
        );
    }

    None
}

/// Extract the address block anchored at the restaurant name.
///
/// The invoice footer form "issued on behalf of <restaurant> <address...>"
/// is preferred, with the block cut at the first configured metro name
/// (city kept). Falls back to a generic "delivered to:" line. Callers skip
/// this step entirely when the restaurant is unknown, since there is no
/// anchor to search from.
pub fn extract_address(
    text: &str,
    restaurant: &str,
    cities: &[String],
) -> Option<ExtractionMatch<String>> {
    // The anchor embeds the restaurant name, so the pattern is built at
    // call time.
    let anchored = format!(
        r"(?i)issued on behalf of\s+{}\s*,?\s+([^\n]+)",
        regex::escape(restaurant)
    );
    if let Ok(pattern) = Regex::new(&anchored) {
        if let Some(caps) = pattern.captures(text) {
            let block = truncate_at_city(caps[1].trim(), cities);
            if !block.is_empty() {
                debug!("address anchored at restaurant '{}'", restaurant);
                return Some(ExtractionMatch::new(block, 0.9, &caps[0]));
            }
        }
    }

    DELIVERED_TO.captures(text).map(|caps| {
        ExtractionMatch::new(caps[1].trim().to_string(), 0.7, &caps[0])
    })
}

/// Cut the address at the end of the first known city name. Without a city
/// hit the whole line is kept.
fn truncate_at_city(address: &str, cities: &[String]) -> String {
    if cities.is_empty() {
        return address.trim().to_string();
    }

    let alternation = cities
        .iter()
        .map(|city| regex::escape(city))
        .collect::<Vec<_>>()
        .join("|");

    if let Ok(pattern) = Regex::new(&format!(r"(?i)\b(?:{})\b", alternation)) {
        if let Some(found) = pattern.find(address) {
            return address[..found.end()].trim().to_string();
        }
    }

    address.trim().to_string()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn cities() -> Vec<String> {
        ["Mumbai", "New Delhi", "Delhi", "Bengaluru"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_thank_you_form() {
        let m = extract_restaurant("Thank you for ordering from Spice Villa").unwrap();
        assert_eq!(m.value, "Spice Villa");
    }

    #[test]
    fn test_thank_you_stops_at_clause_delimiter() {
        let m = extract_restaurant("Thank you for ordering from Spice Villa, we hope...").unwrap();
        assert_eq!(m.value, "Spice Villa");
    }

    #[test]
    fn test_order_from_form() {
        let m = extract_restaurant("Your order from Biryani House is on its way").unwrap();
        assert_eq!(m.value, "Biryani House is on its way");
    }

    #[test]
    fn test_order_from_stops_at_line_boundary() {
        let m = extract_restaurant("Your order from Biryani House\nis on its way").unwrap();
        assert_eq!(m.value, "Biryani House");
    }

    #[test]
    fn test_no_cue_phrase() {
        assert!(extract_restaurant("Your weekly digest").is_none());
    }

    #[test]
    fn test_address_anchored_and_cut_at_city() {
        let text = "This invoice is issued on behalf of Spice Villa 12 MG Road Bengaluru 560001";
        let m = extract_address(text, "Spice Villa", &cities()).unwrap();
        assert_eq!(m.value, "12 MG Road Bengaluru");
    }

    #[test]
    fn test_address_without_city_keeps_line() {
        let text = "issued on behalf of Spice Villa 12 MG Road";
        let m = extract_address(text, "Spice Villa", &cities()).unwrap();
        assert_eq!(m.value, "12 MG Road");
    }

    #[test]
    fn test_multi_word_city_preferred() {
        let text = "issued on behalf of Spice Villa Connaught Place New Delhi 110001";
        let m = extract_address(text, "Spice Villa", &cities()).unwrap();
        assert_eq!(m.value, "Connaught Place New Delhi");
    }

    #[test]
    fn test_delivered_to_fallback() {
        let text = "Delivered to: 4th Cross Rd, Indiranagar";
        let m = extract_address(text, "Spice Villa", &cities()).unwrap();
        assert_eq!(m.value, "4th Cross Rd, Indiranagar");
    }

    #[test]
    fn test_no_address() {
        assert!(extract_address("nothing here", "Spice Villa", &cities()).is_none());
    }
}
