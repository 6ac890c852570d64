//! Patient name rule.

use noor_model::text::{ZWNJ, lookup_key};
use noor_model::{Field, ValidationError};

/// Fewest letters an accepted first or last name may have.
pub const MIN_NAME_CHARS: usize = 3;

/// Check split name parts against the name rule.
///
/// An empty last name is allowed here; completing it is left to
/// deduplication. A present last name must meet the same rules as the
/// first name. Any full name containing one of `placeholders` fails.
pub fn validate_name(
    first_name: &str,
    last_name: &str,
    placeholders: &[String],
) -> Result<(), ValidationError> {
    let first_name = first_name.trim();
    let last_name = last_name.trim();
    if first_name.is_empty() {
        return Err(invalid("missing first name"));
    }

    let full_key = lookup_key(&format!("{first_name} {last_name}"));
    if placeholders
        .iter()
        .map(|placeholder| lookup_key(placeholder))
        .any(|placeholder| !placeholder.is_empty() && full_key.contains(&placeholder))
    {
        return Err(invalid("placeholder name"));
    }

    check_part("first name", first_name)?;
    if !last_name.is_empty() {
        check_part("last name", last_name)?;
    }
    Ok(())
}

fn check_part(label: &str, part: &str) -> Result<(), ValidationError> {
    if part.split_whitespace().any(|word| word.chars().all(|ch| ch.is_ascii_digit())) {
        return Err(invalid(format!("{label} is numeric")));
    }
    if let Some(ch) = part.chars().find(|ch| !is_name_char(*ch)) {
        return Err(invalid(format!("{label} contains '{ch}'")));
    }
    if part.chars().filter(|ch| ch.is_alphabetic()).count() < MIN_NAME_CHARS {
        return Err(invalid(format!(
            "{label} shorter than {MIN_NAME_CHARS} characters"
        )));
    }
    Ok(())
}

fn is_name_char(ch: char) -> bool {
    ch.is_alphabetic()
        || ch.is_whitespace()
        || matches!(ch, '\'' | '\u{2019}' | '-' | ZWNJ)
        || matches!(ch, '\u{064b}'..='\u{065f}' | '\u{0670}')
}

fn invalid(reason: impl Into<String>) -> ValidationError {
    ValidationError::new(Field::Name, reason)
}
