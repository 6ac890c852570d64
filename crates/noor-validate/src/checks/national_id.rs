//! National ID rule.

use noor_model::text::digits_only;
use noor_model::{Field, ValidationError};

pub const MIN_LENGTH: usize = 8;
pub const MAX_LENGTH: usize = 11;

/// Clean a national ID to its digits and check its shape.
///
/// Valid IDs have 8 to 11 digits that are not all the same digit.
pub fn validate_national_id(value: &str) -> Result<String, ValidationError> {
    let digits = digits_only(value);
    if digits.is_empty() {
        return Err(ValidationError::new(Field::NationalId, "missing"));
    }
    if !(MIN_LENGTH..=MAX_LENGTH).contains(&digits.len()) {
        return Err(ValidationError::new(
            Field::NationalId,
            format!(
                "expected {MIN_LENGTH}-{MAX_LENGTH} digits, found {}",
                digits.len()
            ),
        ));
    }
    let mut chars = digits.chars();
    if let Some(first) = chars.next()
        && chars.all(|ch| ch == first)
    {
        return Err(ValidationError::new(Field::NationalId, "all digits identical"));
    }
    Ok(digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ten_digit_id() {
        assert_eq!(validate_national_id("0012345678").unwrap(), "0012345678");
    }

    #[test]
    fn strips_separators_and_persian_digits() {
        assert_eq!(validate_national_id(" ۰۰۱-۲۳۴۵۶۷-۸ ").unwrap(), "0012345678");
    }

    #[test]
    fn rejects_repeated_digit() {
        let err = validate_national_id("0000000000").unwrap_err();
        assert_eq!(err.reason, "all digits identical");
    }

    #[test]
    fn rejects_bad_lengths() {
        assert_eq!(
            validate_national_id("123").unwrap_err().reason,
            "expected 8-11 digits, found 3"
        );
        assert!(validate_national_id("123456789012").is_err());
        assert!(validate_national_id("12345678").is_ok());
        assert!(validate_national_id("").is_err());
    }
}
