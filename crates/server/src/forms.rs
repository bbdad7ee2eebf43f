//! Parsing of raw form fields into domain values.
//!
//! Errors are plain strings meant to be shown next to the form field that
//! produced them.

use chrono::NaiveDate;
use tracker::MoneyCents;
use uuid::Uuid;

pub(crate) fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| format!("invalid date: {value}"))
}

pub(crate) fn parse_amount(value: &str) -> Result<MoneyCents, String> {
    value.parse().map_err(|_| format!("invalid amount: {value}"))
}

pub(crate) fn parse_category_id(value: &str) -> Result<Uuid, String> {
    Uuid::parse_str(value.trim()).map_err(|_| "invalid category".to_string())
}
