//! Parsing of user supplied values and parameters.

use lazy_static::lazy_static;
use regex::Regex;
use std::str::FromStr;

lazy_static! {
    static ref VALUE_TOKEN: Regex = Regex::new(r"^[+-]?\d+$").expect("valid value pattern");
}

/// Reads whitespace separated integers, stopping at the first token that is
/// not an integer (or does not fit in an `i64`).
pub fn parse_values(line: &str) -> Vec<i64> {
    line.split_whitespace()
        .map_while(|token| {
            if VALUE_TOKEN.is_match(token) {
                token.parse::<i64>().ok()
            } else {
                None
            }
        })
        .collect()
}

/// Parses `input`, treating an empty answer or `-1` as "use the default".
pub fn parse_or_default<T: FromStr>(input: &str, default: T) -> Result<T, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed == "-1" {
        return Ok(default);
    }
    trimmed
        .parse::<T>()
        .map_err(|_| format!("Could not parse '{}'", trimmed))
}
