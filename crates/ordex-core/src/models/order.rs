//! Order record model produced by the extractor.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sentinel value for string fields that could not be extracted.
pub const UNKNOWN: &str = "unknown";

/// A single order parsed from one email body.
///
/// Every field always carries a value or its defined sentinel: string fields
/// fall back to [`UNKNOWN`], `items` to a single-element `["unknown"]`
/// sequence, and `order_date`/`amount` to `None`. A message that is not an
/// order at all is represented by the extractor returning no record, never
/// by a record full of sentinels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    /// Greeted name from the salutation line.
    pub customer_name: String,

    /// Vendor the order was placed with.
    pub restaurant: String,

    /// Delivery/billing address line associated with the vendor.
    pub restaurant_address: String,

    /// Date the order was placed/delivered. Falls back to the email's
    /// received timestamp when no in-body date is found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_date: Option<NaiveDate>,

    /// Item lines parsed from the order body, in source order.
    pub items: Vec<String>,

    /// Total amount paid. Absent (never zero) when no monetary pattern
    /// matched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
}

impl OrderRecord {
    /// Create a record with every field at its sentinel/absent default.
    pub fn unknown() -> Self {
        Self {
            customer_name: UNKNOWN.to_string(),
            restaurant: UNKNOWN.to_string(),
            restaurant_address: UNKNOWN.to_string(),
            order_date: None,
            items: vec![UNKNOWN.to_string()],
            amount: None,
        }
    }

    /// Order date formatted as `01 May 2023`, or `unknown`.
    pub fn order_date_display(&self) -> String {
        match self.order_date {
            Some(date) => date.format("%d %b %Y").to_string(),
            None => UNKNOWN.to_string(),
        }
    }

    /// Amount formatted with the given currency symbol, or `unknown`.
    pub fn amount_display(&self, symbol: &str) -> String {
        match self.amount {
            Some(amount) => format!("{}{:.2}", symbol, amount),
            None => UNKNOWN.to_string(),
        }
    }

    /// True when no field carries extracted data.
    pub fn is_all_unknown(&self) -> bool {
        self.customer_name == UNKNOWN
            && self.restaurant == UNKNOWN
            && self.restaurant_address == UNKNOWN
            && self.order_date.is_none()
            && self.amount.is_none()
            && self.items.len() == 1
            && self.items[0] == UNKNOWN
    }
}

impl Default for OrderRecord {
    fn default() -> Self {
        Self::unknown()
    }
}
