//! String boolean tokens.
//!
//! Vaccine payloads carry booleans as the exact strings `"true"` and `"false"`;
//! anything else, including `"True"` or a JSON boolean, is not a token.

/// Parses an exact, case-sensitive boolean token.
pub fn parse_bool_token(input: &str) -> Option<bool> {
    match input {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Renders a boolean as its string token.
pub fn bool_token(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

/// Parses a boolean query-string flag, ignoring ASCII case.
pub fn parse_query_flag(input: &str) -> Option<bool> {
    if input.eq_ignore_ascii_case("true") {
        Some(true)
    } else if input.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}
