//! Line-item extraction.

use tracing::debug;

use super::patterns::{ITEM_LINE, QTY_MARKER, SUMMARY_CUES};
use crate::models::order::UNKNOWN;

/// Scan normalized text line-by-line for order items.
///
/// A line qualifies when it carries a quantity marker ("2x") or a
/// currency-prefixed price. Qualifying lines are captured as
/// `(quantity, name, price)` and emitted as `"<qty>x <name> - <symbol><price>"`
/// in source order, with quantity defaulting to 1. When no line yields the
/// full triple, lines ending in a configured food-keyword suffix are emitted
/// verbatim. The result is never empty: `["unknown"]` marks an order with no
/// recognizable items.
pub fn extract_items(text: &str, food_keywords: &[String], currency_symbol: &str) -> Vec<String> {
    let mut items = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let has_qty = QTY_MARKER.is_match(line);
        let has_price = line.contains('₹');
        if !has_qty && !has_price {
            continue;
        }

        // Priced summary lines (totals, taxes, fees) are not items. A line
        // with an explicit quantity marker always qualifies.
        if !has_qty && SUMMARY_CUES.is_match(line) {
            continue;
        }

        if let Some(caps) = ITEM_LINE.captures(line) {
            let qty = caps.get(1).map_or("1", |m| m.as_str());
            let name = caps[2].trim().trim_end_matches(['-', '–', ':']).trim();
            if name.is_empty() {
                continue;
            }
            let price = &caps[3];
            items.push(format!("{qty}x {name} - {currency_symbol}{price}"));
        }
    }

    // Secondary heuristic: bare item names recognized by their suffix.
    if items.is_empty() {
        for line in text.lines() {
            let line = line.trim();
            let lower = line.to_lowercase();
            if !lower.is_empty()
                && food_keywords
                    .iter()
                    .any(|keyword| lower.ends_with(&keyword.to_lowercase()))
            {
                items.push(line.to_string());
            }
        }
        if !items.is_empty() {
            debug!("items recovered via keyword fallback: {}", items.len());
        }
    }

    if items.is_empty() {
        items.push(UNKNOWN.to_string());
    }

    items
}
