use chrono::{Local, NaiveDate};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid date format: {input}, expected YYYY-MM-DD")]
pub struct DateFormatError {
    pub input: String,
}

/// Parses `YYYY-MM-DD`. The input is not trimmed; only ASCII digits and `-`
/// separators are accepted, starting with a digit.
pub fn parse_date(text: &str) -> Result<NaiveDate, DateFormatError> {
    let format_error = || DateFormatError {
        input: text.to_string(),
    };

    // chrono skips leading whitespace and allows a sign on `%Y`
    if !has_date_characters(text) {
        return Err(format_error());
    }

    NaiveDate::parse_from_str(text, DATE_FORMAT).map_err(|_| format_error())
}

fn has_date_characters(text: &str) -> bool {
    text.starts_with(|c: char| c.is_ascii_digit())
        && text.chars().all(|c| c.is_ascii_digit() || c == '-')
}

/// Whole days from `text` to today's local calendar date. Future dates yield
/// negative values.
pub fn days_since_last_active(text: &str) -> Result<i64, DateFormatError> {
    days_since_last_active_on(text, Local::now().date_naive())
}

pub fn days_since_last_active_on(text: &str, today: NaiveDate) -> Result<i64, DateFormatError> {
    let last_active = parse_date(text)?;
    Ok(today.signed_duration_since(last_active).num_days())
}
