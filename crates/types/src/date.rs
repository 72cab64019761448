//! Calendar dates as exchanged over the API.
//!
//! Clients send dates either as `MM/DD/YYYY` or `MM-DD-YYYY`. Both forms parse to the
//! same [`NaiveDate`]; responses always use the slash form.

use chrono::NaiveDate;

/// Formats accepted when parsing, tried in order.
pub const ACCEPTED_DATE_FORMATS: [&str; 2] = ["%m/%d/%Y", "%m-%d-%Y"];

/// Format used when rendering a date back to clients.
pub const CANONICAL_DATE_FORMAT: &str = "%m/%d/%Y";

/// Errors produced while parsing a date token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    #[error("'{0}' is not a date in MM/DD/YYYY or MM-DD-YYYY form")]
    Unrecognised(String),
}

/// Parses `input` under either accepted format.
///
/// # Errors
///
/// Returns [`DateError::Unrecognised`] when neither format matches, including
/// impossible calendar dates such as `02/30/2020` and years not written with
/// exactly four digits.
pub fn parse_date(input: &str) -> Result<NaiveDate, DateError> {
    // chrono's `%Y` takes one to four digits.
    let year = input.rsplit(['/', '-']).next().unwrap_or_default();
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DateError::Unrecognised(input.to_owned()));
    }

    ACCEPTED_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
        .ok_or_else(|| DateError::Unrecognised(input.to_owned()))
}

/// Renders a date as `MM/DD/YYYY`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(CANONICAL_DATE_FORMAT).to_string()
}
