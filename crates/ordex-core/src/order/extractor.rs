//! Order parser applying the field rules in pipeline order.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::html;
use crate::models::config::ExtractionConfig;
use crate::models::order::{OrderRecord, UNKNOWN};

use super::rules::{
    amounts::extract_amount,
    dates::extract_order_date,
    greeting::extract_customer_name,
    items::extract_items,
    reject::rejection_match,
    vendor::{extract_address, extract_restaurant},
};

/// Result of order extraction.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Extracted order record.
    pub record: OrderRecord,
    /// Fields that degraded to their defaults.
    pub warnings: Vec<String>,
}

/// Rule-based order parser.
///
/// A pure function of its inputs: no I/O, no shared mutable state, safe to
/// call concurrently across many emails.
pub struct OrderParser {
    config: ExtractionConfig,
}

impl OrderParser {
    /// Create a parser with the default phrase lists.
    pub fn new() -> Self {
        Self {
            config: ExtractionConfig::default(),
        }
    }

    /// Create a parser with custom extraction configuration.
    pub fn with_config(config: ExtractionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Parse one normalized email body.
    ///
    /// Returns `None` for rejected notifications and empty bodies. Every
    /// other outcome is a record: internal pattern failures degrade the
    /// corresponding field to its "unknown"/absent default and are reported
    /// as warnings, never as errors.
    pub fn parse(&self, text: &str, fallback_date: Option<NaiveDate>) -> Option<ExtractionResult> {
        if text.trim().is_empty() {
            debug!("empty body, nothing to extract");
            return None;
        }

        if let Some((category, phrase)) = rejection_match(text, &self.config.denylist) {
            debug!("rejected non-order notification: '{}' ({})", phrase, category);
            return None;
        }

        let mut warnings = Vec::new();

        let customer_name = match extract_customer_name(text) {
            Some(found) => found.value,
            None => {
                warnings.push("could not extract customer name".to_string());
                UNKNOWN.to_string()
            }
        };

        let restaurant = match extract_restaurant(text) {
            Some(found) => found.value,
            None => {
                warnings.push("could not extract restaurant".to_string());
                UNKNOWN.to_string()
            }
        };

        // Without a restaurant name there is no anchor to search from.
        let restaurant_address = if restaurant == UNKNOWN {
            UNKNOWN.to_string()
        } else {
            match extract_address(text, &restaurant, &self.config.cities) {
                Some(found) => found.value,
                None => {
                    warnings.push("could not extract restaurant address".to_string());
                    UNKNOWN.to_string()
                }
            }
        };

        let order_date = extract_order_date(text, fallback_date);
        if order_date.is_none() {
            warnings.push("could not extract order date".to_string());
        }

        let amount = extract_amount(text).map(|found| found.value);
        if amount.is_none() {
            warnings.push("could not extract amount".to_string());
        }

        let items = extract_items(text, &self.config.food_keywords, &self.config.currency_symbol);
        if items.len() == 1 && items[0] == UNKNOWN {
            warnings.push("could not extract line items".to_string());
        }

        let record = OrderRecord {
            customer_name,
            restaurant,
            restaurant_address,
            order_date,
            items,
            amount,
        };

        info!(
            "extracted order from {} ({} warnings)",
            record.restaurant,
            warnings.len()
        );

        Some(ExtractionResult { record, warnings })
    }

    /// Normalize raw HTML and parse it in one step.
    pub fn parse_html(&self, body: &str, received: Option<NaiveDate>) -> Option<ExtractionResult> {
        self.parse(&html::normalize(body), received)
    }
}

impl Default for OrderParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    use super::*;

    const ORDER_HTML: &str = r#"
        <html><body>
          <p>Hi Rohan,</p>
          <p>Thank you for ordering from Spice Villa</p>
          <div>ordered on 12 Jan 2023</div>
          <div>2x Chicken Roll - ₹180.00</div>
          <div>1x Veg Burger - ₹90.00</div>
          <div>Total paid ₹450.00</div>
          <p>This invoice is issued on behalf of Spice Villa 12 MG Road Bengaluru 560001</p>
        </body></html>
    "#;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_full_order_email() {
        let parser = OrderParser::new();
        let result = parser.parse_html(ORDER_HTML, None).unwrap();
        let record = result.record;

        assert_eq!(record.customer_name, "Rohan");
        assert_eq!(record.restaurant, "Spice Villa");
        assert_eq!(record.restaurant_address, "12 MG Road Bengaluru");
        assert_eq!(record.order_date, Some(ymd(2023, 1, 12)));
        assert_eq!(record.amount, Some(Decimal::from_str("450.00").unwrap()));
        assert_eq!(
            record.items,
            vec![
                "2x Chicken Roll - ₹180.00".to_string(),
                "1x Veg Burger - ₹90.00".to_string(),
            ]
        );
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_loyalty_notice_rejected() {
        let parser = OrderParser::new();
        let html = "<p>Congratulations! You've unlocked Zomato Gold</p>";
        assert!(parser.parse_html(html, None).is_none());
    }

    #[test]
    fn test_denylist_rejects_regardless_of_order_content() {
        let parser = OrderParser::new();
        let html = format!("{}<p>Your order has been cancelled</p>", ORDER_HTML);
        assert!(parser.parse_html(&html, None).is_none());
    }

    #[test]
    fn test_empty_body_is_no_result() {
        let parser = OrderParser::new();
        assert!(parser.parse("", None).is_none());
        assert!(parser.parse_html("<html><body></body></html>", None).is_none());
    }

    #[test]
    fn test_fallback_date_and_absent_amount() {
        let parser = OrderParser::new();
        let html = "<p>Hello there</p><p>your weekly digest has arrived</p>";
        let result = parser.parse_html(html, Some(ymd(2023, 5, 1))).unwrap();
        let record = result.record;

        assert!(record.amount.is_none());
        assert_eq!(record.order_date_display(), "01 May 2023");
        assert_eq!(record.customer_name, UNKNOWN);
        assert_eq!(record.restaurant, UNKNOWN);
        assert_eq!(record.restaurant_address, UNKNOWN);
        assert_eq!(record.items, vec![UNKNOWN.to_string()]);
    }

    #[test]
    fn test_address_skipped_when_restaurant_unknown() {
        let parser = OrderParser::new();
        let html = "<p>Hi Priya,</p><p>Delivered to: 4th Cross Rd</p><p>Total paid ₹120.50</p>";
        let result = parser.parse_html(html, None).unwrap();

        assert_eq!(result.record.restaurant, UNKNOWN);
        assert_eq!(result.record.restaurant_address, UNKNOWN);
    }

    #[test]
    fn test_partial_extraction_reports_warnings() {
        let parser = OrderParser::new();
        let html = "<p>Hi Priya,</p><p>Total paid ₹120.50</p>";
        let result = parser.parse_html(html, None).unwrap();

        assert_eq!(result.record.customer_name, "Priya");
        assert_eq!(
            result.record.amount,
            Some(Decimal::from_str("120.50").unwrap())
        );
        assert!(
            result
                .warnings
                .iter()
                .any(|w| w.contains("restaurant"))
        );
        assert!(result.warnings.iter().any(|w| w.contains("order date")));
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let parser = OrderParser::new();
        let first = parser.parse_html(ORDER_HTML, None).unwrap();
        let second = parser.parse_html(ORDER_HTML, None).unwrap();
        assert_eq!(first.record, second.record);
    }
}
