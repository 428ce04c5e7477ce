//! Reusable field validators
//!
//! Each validator inspects one raw form value. Lengths are counted in
//! characters, not bytes, so diacritics count once.

use regex::Regex;
use std::sync::OnceLock;

/// Validator: trimmed value has at least `min` characters
pub fn min_trimmed_length(value: &str, min: usize) -> bool {
    value.trim().chars().count() >= min
}

/// Validator: value has at most `max` characters
pub fn max_length(value: &str, max: usize) -> bool {
    value.chars().count() <= max
}

/// Validator: value is exactly five ASCII digits
pub fn zip_code(value: &str) -> bool {
    static ZIP_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = ZIP_REGEX.get_or_init(|| Regex::new(r"^[0-9]{5}$").unwrap());
    regex.is_match(value)
}

/// Validator: value parses as a finite number strictly greater than zero
///
/// Surrounding whitespace is ignored. Returns the parsed number on success.
/// Infinity is rejected because it cannot be stored in the JSON data file.
pub fn positive_number(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite() && *n > 0.0)
}
