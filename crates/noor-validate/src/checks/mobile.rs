//! Iranian mobile number rule.

use std::sync::LazyLock;

use noor_model::text::digits_only;
use noor_model::{Field, ValidationError};
use regex::Regex;

static MOBILE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^09\d{9}$").expect("Invalid mobile regex"));

/// Canonicalize a mobile number to `09XXXXXXXXX`.
///
/// `+98`, `0098` and `98` prefixes collapse to a leading `0`, and a bare
/// ten-digit `9XXXXXXXXX` gains one. An empty cell is `Ok(None)`.
pub fn validate_mobile(value: &str) -> Result<Option<String>, ValidationError> {
    let digits = digits_only(value);
    if digits.is_empty() {
        return Ok(None);
    }
    let canonical = canonicalize(&digits);
    if MOBILE_REGEX.is_match(&canonical) {
        Ok(Some(canonical))
    } else {
        Err(ValidationError::new(
            Field::Mobile,
            "not an Iranian mobile number",
        ))
    }
}

fn canonicalize(digits: &str) -> String {
    if let Some(rest) = digits.strip_prefix("0098")
        && rest.len() == 10
    {
        return format!("0{rest}");
    }
    if let Some(rest) = digits.strip_prefix("98")
        && rest.len() == 10
    {
        return format!("0{rest}");
    }
    if digits.len() == 10 && digits.starts_with('9') {
        return format!("0{digits}");
    }
    digits.to_string()
}
