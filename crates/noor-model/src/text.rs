//! Text cleanup shared by parsing, validation, and lookups.
//!
//! Export cells mix Persian, Arabic-Indic and ASCII digits, Arabic and
//! Persian letter forms, and stray direction marks. Everything that compares
//! or parses cell text goes through these helpers first.

/// Zero-width non-joiner, used inside Persian compound words.
pub const ZWNJ: char = '\u{200c}';

const BIDI_MARKS: [char; 3] = ['\u{200e}', '\u{200f}', '\u{feff}'];

/// Maps Persian (`۰-۹`) and Arabic-Indic (`٠-٩`) digits to ASCII.
fn ascii_digit(ch: char) -> char {
    match ch {
        '\u{06f0}'..='\u{06f9}' => char::from(b'0' + (ch as u32 - 0x06f0) as u8),
        '\u{0660}'..='\u{0669}' => char::from(b'0' + (ch as u32 - 0x0660) as u8),
        other => other,
    }
}

fn persian_letter(ch: char) -> char {
    match ch {
        '\u{064a}' => '\u{06cc}', // ي -> ی
        '\u{0643}' => '\u{06a9}', // ك -> ک
        other => other,
    }
}

fn is_diacritic(ch: char) -> bool {
    matches!(ch, '\u{064b}'..='\u{065f}' | '\u{0670}')
}

/// True for cell values that spreadsheet exports use to mean "empty".
pub fn is_blank(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") || trimmed.eq_ignore_ascii_case("none")
}

/// Trims, blanks out `nan`/`none`, and converts digits to ASCII.
pub fn normalize_digits(value: &str) -> String {
    if is_blank(value) {
        return String::new();
    }
    value
        .trim()
        .chars()
        .filter(|ch| !BIDI_MARKS.contains(ch))
        .map(ascii_digit)
        .collect()
}

/// [`normalize_digits`] plus Persian letter forms and collapsed whitespace.
pub fn normalize_text(value: &str) -> String {
    let digits = normalize_digits(value);
    let letters: String = digits.chars().map(persian_letter).collect();
    letters.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Key used for case- and diacritic-insensitive table lookups.
pub fn lookup_key(value: &str) -> String {
    normalize_text(value)
        .chars()
        .filter(|ch| !is_diacritic(*ch))
        .collect::<String>()
        .to_lowercase()
}

/// Keeps ASCII digits only, after digit normalization.
pub fn digits_only(value: &str) -> String {
    normalize_digits(value)
        .chars()
        .filter(char::is_ascii_digit)
        .collect()
}
