//! Total-amount extraction.
//!
//! The rules form an explicit priority list: the most specific cue phrase
//! wins over a bare currency match, so a line-item price is never mistaken
//! for the order total.

use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use tracing::debug;

use super::{ExtractionMatch, FieldExtractor};

/// A named amount-extraction rule. The captured digits are in group 1 and
/// must carry a decimal fraction or digit grouping.
pub struct AmountRule {
    /// Stable rule name, used in logs and tests.
    pub name: &'static str,
    /// Cue-anchored currency pattern.
    pub pattern: Regex,
}

// Number shape shared by all rules: "450.00", "1,234.56", "1,23,456".
const NUM: &str = r"(\d+(?:,\d+)*\.\d{1,2}|\d+(?:,\d+)+)";

fn cue_rule(name: &'static str, prefix: &str) -> AmountRule {
    AmountRule {
        name,
        pattern: Regex::new(&format!(r"(?i){prefix}[^\n₹]*₹\s*{NUM}")).unwrap(),
    }
}

lazy_static! {
    /// Priority-ordered amount rules. Evaluated top to bottom; the first
    /// match wins.
    pub static ref AMOUNT_RULES: Vec<AmountRule> = vec![
        cue_rule("total-paid", r"total\s+paid"),
        cue_rule("amount-paid", r"amount\s+paid"),
        cue_rule("paid", r"\bpaid\b"),
        cue_rule("total", r"\btotal\b"),
        AmountRule {
            name: "paid-suffix",
            pattern: Regex::new(&format!(r"(?i)₹\s*{NUM}\s*\(paid\)")).unwrap(),
        },
        AmountRule {
            name: "bare-currency",
            pattern: Regex::new(&format!(r"₹\s*{NUM}")).unwrap(),
        },
    ];
}

/// Amount field extractor over the priority rule list.
pub struct AmountExtractor;

impl AmountExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = ExtractionMatch<Decimal>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    /// One match per rule, in priority order.
    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results = Vec::new();

        for rule in AMOUNT_RULES.iter() {
            if let Some(caps) = rule.pattern.captures(text) {
                if let Some(amount) = parse_grouped_amount(&caps[1]) {
                    let full_match = caps.get(0).unwrap();
                    results.push(
                        ExtractionMatch::new(amount, 0.9, full_match.as_str())
                            .with_position(full_match.start(), full_match.end()),
                    );
                }
            }
        }

        results
    }
}

/// Extract the order total using the first matching rule.
///
/// A rule whose captured digits fail to parse yields no amount rather than a
/// default numeric value.
pub fn extract_amount(text: &str) -> Option<ExtractionMatch<Decimal>> {
    for rule in AMOUNT_RULES.iter() {
        if let Some(caps) = rule.pattern.captures(text) {
            let digits = &caps[1];
            match parse_grouped_amount(digits) {
                Some(amount) => {
                    debug!("amount {} matched by rule '{}'", amount, rule.name);
                    let full_match = caps.get(0).unwrap();
                    return Some(
                        ExtractionMatch::new(amount, 0.9, full_match.as_str())
                            .with_position(full_match.start(), full_match.end()),
                    );
                }
                None => return None,
            }
        }
    }

    None
}

/// Parse a digit-grouped amount ("1,234.56", "1,23,456") by removing the
/// group separators.
pub fn parse_grouped_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    Decimal::from_str(&cleaned).ok()
}
