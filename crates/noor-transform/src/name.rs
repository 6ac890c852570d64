//! Full-name splitting.

use noor_model::text::normalize_text;

/// First and last name of a full-name cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameParts {
    pub first_name: String,
    pub last_name: String,
}

impl NameParts {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.first_name.is_empty() && !self.last_name.is_empty()
    }
}

/// Split a full name at its first whitespace boundary.
///
/// The name is normalized first (letter forms, digits, collapsed
/// whitespace), so `"  Ali   Reza  Rezaei "` becomes `Ali` / `Reza Rezaei`.
/// A single word yields an empty last name.
pub fn split_full_name(full_name: &str) -> NameParts {
    let normalized = normalize_text(full_name);
    match normalized.split_once(' ') {
        Some((first, last)) => NameParts::new(first, last),
        None => NameParts::new(normalized, String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_first_whitespace_only() {
        let parts = split_full_name("  Ali   Reza  Rezaei ");
        assert_eq!(parts, NameParts::new("Ali", "Reza Rezaei"));
        assert!(parts.is_complete());
    }

    #[test]
    fn single_word_has_empty_last_name() {
        let parts = split_full_name("علی");
        assert_eq!(parts.first_name, "علی");
        assert_eq!(parts.last_name, "");
        assert!(!parts.is_complete());
    }

    #[test]
    fn blank_cell_has_no_parts() {
        assert_eq!(split_full_name("nan"), NameParts::default());
    }

    #[test]
    fn arabic_letters_are_normalized_before_splitting() {
        let parts = split_full_name("علي كريمي");
        assert_eq!(parts, NameParts::new("علی", "کریمی"));
    }
}
