//! Order date extraction.

use chrono::NaiveDate;

use super::patterns::{ORDERED_ON, WEEKDAY_DATE};
use super::{ExtractionMatch, FieldExtractor};

/// Date field extractor.
///
/// Tries the labeled "ordered/delivered on <day month year>" form first,
/// then the weekday-led "Wed, Jan 5, 2022" shape.
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = ExtractionMatch<NaiveDate>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results = Vec::new();

        // "ordered on 12 Jan 2023" / "delivered on 3rd March, 2022"
        for caps in ORDERED_ON.captures_iter(text) {
            let day: u32 = caps[1].parse().unwrap_or(0);
            let month = month_to_number(&caps[2]);
            let year: i32 = caps[3].parse().unwrap_or(0);

            if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                let full_match = caps.get(0).unwrap();
                results.push(
                    ExtractionMatch::new(date, 0.95, full_match.as_str())
                        .with_position(full_match.start(), full_match.end()),
                );
            }
        }

        // "Wed, Jan 5, 2022"
        for caps in WEEKDAY_DATE.captures_iter(text) {
            let month = month_to_number(&caps[1]);
            let day: u32 = caps[2].parse().unwrap_or(0);
            let year: i32 = caps[3].parse().unwrap_or(0);

            if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                // Skip if already found
                if results.iter().any(|r| r.value == date) {
                    continue;
                }

                let full_match = caps.get(0).unwrap();
                results.push(
                    ExtractionMatch::new(date, 0.9, full_match.as_str())
                        .with_position(full_match.start(), full_match.end()),
                );
            }
        }

        results
    }
}

/// Extract the order date, falling back to the received timestamp when no
/// in-body pattern matches.
pub fn extract_order_date(text: &str, fallback: Option<NaiveDate>) -> Option<NaiveDate> {
    let extractor = DateExtractor::new();

    if let Some(found) = extractor.extract(text) {
        return Some(found.value);
    }

    fallback
}

fn month_to_number(month: &str) -> u32 {
    let lower = month.to_lowercase();
    if lower.len() < 3 {
        return 0;
    }

    match &lower[..3] {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_ordered_on() {
        let extractor = DateExtractor::new();

        let result = extractor.extract("Your food was ordered on 12 Jan 2023");
        assert_eq!(result.unwrap().value, ymd(2023, 1, 12));
    }

    #[test]
    fn test_delivered_on_with_ordinal() {
        let extractor = DateExtractor::new();

        let result = extractor.extract("delivered on 3rd March, 2022");
        assert_eq!(result.unwrap().value, ymd(2022, 3, 3));
    }

    #[test]
    fn test_weekday_shape() {
        let extractor = DateExtractor::new();

        let result = extractor.extract("Wed, Jan 5, 2022");
        assert_eq!(result.unwrap().value, ymd(2022, 1, 5));
    }

    #[test]
    fn test_labeled_date_wins_over_weekday() {
        let extractor = DateExtractor::new();

        let text = "Sat, Feb 12, 2022\nordered on 10 Feb 2022";
        let result = extractor.extract(text);
        assert_eq!(result.unwrap().value, ymd(2022, 2, 10));
    }

    #[test]
    fn test_invalid_calendar_date_skipped() {
        let extractor = DateExtractor::new();
        assert!(extractor.extract("ordered on 32 Jan 2023").is_none());
    }

    #[test]
    fn test_fallback_date_used() {
        let fallback = ymd(2023, 5, 1);
        assert_eq!(
            extract_order_date("no date in here", Some(fallback)),
            Some(fallback)
        );
        assert_eq!(extract_order_date("no date in here", None), None);
    }

    #[test]
    fn test_body_date_beats_fallback() {
        let fallback = ymd(2023, 5, 1);
        assert_eq!(
            extract_order_date("ordered on 12 Jan 2023", Some(fallback)),
            Some(ymd(2023, 1, 12))
        );
    }
}
