//! Common regex patterns for order-email extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Salutation: "Hi Rohan," / "Hi Rohan Mehta,"
    pub static ref GREETING: Regex = Regex::new(
        r"\bHi\s+([A-Z][A-Za-z'\-]*(?:\s+[A-Z][A-Za-z'\-]*)*)\s*,"
    ).unwrap();

    // Restaurant name cues. Capture stops at a line boundary or clause
    // delimiter; the thank-you form is the more specific one.
    pub static ref THANK_YOU_ORDER: Regex = Regex::new(
        r"(?i)thank you for (?:your )?order(?:ing)?\s+(?:from|at|with)\s+([^\n,.!]+)"
    ).unwrap();

    pub static ref ORDER_FROM: Regex = Regex::new(
        r"(?i)\border (?:placed )?(?:from|at)\s+([^\n,.!]+)"
    ).unwrap();

    // Generic delivery address line: "Delivered to: 4th Cross Rd, Indiranagar"
    pub static ref DELIVERED_TO: Regex = Regex::new(
        r"(?i)(?:delivery|delivered)\s+to[:\s]+([^\n]+)"
    ).unwrap();

    // Dates: "ordered on 12 Jan 2023" / "delivered on 3rd March, 2022"
    pub static ref ORDERED_ON: Regex = Regex::new(
        r"(?i)(?:ordered|delivered|placed)\s+on[:\s]+(\d{1,2})(?:st|nd|rd|th)?\s+([A-Za-z]{3,9}),?\s+(\d{4})"
    ).unwrap();

    // Weekday-led dates: "Wed, Jan 5, 2022"
    pub static ref WEEKDAY_DATE: Regex = Regex::new(
        r"(?i)\b(?:Mon|Tue|Tues|Wed|Thu|Thur|Thurs|Fri|Sat|Sun)[a-z]*,?\s+([A-Za-z]{3,9})\.?\s+(\d{1,2}),?\s+(\d{4})"
    ).unwrap();

    // Quantity marker for item lines: "2x" / "2 X"
    pub static ref QTY_MARKER: Regex = Regex::new(
        r"\b(\d+)\s*[xX]\b"
    ).unwrap();

    // Full item line capture: optional quantity, name, currency-prefixed
    // price. "2x Chicken Roll - ₹180.00"
    pub static ref ITEM_LINE: Regex = Regex::new(
        r"(?:(\d+)\s*[xX]\s+)?(.+?)\s*[-–:]?\s*₹\s*(\d+(?:,\d+)*(?:\.\d{1,2})?)"
    ).unwrap();

    // Priced lines that are order summaries, not items.
    pub static ref SUMMARY_CUES: Regex = Regex::new(
        r"(?i)\b(?:total|paid|amount|subtotal|taxes?|delivery (?:fee|charge)|gst|discount)\b"
    ).unwrap();
}
