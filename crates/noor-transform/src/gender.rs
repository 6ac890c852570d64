//! First-name gender classification.

use noor_lookup::NameDatabase;
use noor_model::Gender;
use noor_model::text::{ZWNJ, normalize_text};

/// Honorifics stripped before the last lookup attempt, longest first.
const HONORIFICS: &[&str] = &[
    "سرکار خانم",
    "آقای",
    "خانم",
    "دکتر",
    "مهندس",
    "استاد",
    "جناب",
    "سرکار",
    "آقا",
];

/// Looks names up in a [`NameDatabase`].
///
/// Candidates are tried in order: the whole name, its first word, then the
/// name with a leading honorific removed. The first candidate the database
/// knows decides; a unisex hit ends the search with [`Gender::Unknown`].
#[derive(Debug, Clone, Copy)]
pub struct GenderClassifier<'a> {
    names: &'a NameDatabase,
}

impl<'a> GenderClassifier<'a> {
    pub fn new(names: &'a NameDatabase) -> Self {
        Self { names }
    }

    pub fn classify(&self, name: &str) -> Gender {
        let name = normalize_text(name);
        if name.is_empty() {
            return Gender::Unknown;
        }
        candidates(&name)
            .into_iter()
            .find_map(|candidate| self.names.gender_of(&candidate))
            .unwrap_or(Gender::Unknown)
    }
}

fn candidates(name: &str) -> Vec<String> {
    let mut out = vec![name.to_string()];
    if let Some((first_word, _)) = name.split_once(' ') {
        out.push(first_word.to_string());
    }
    if let Some(stripped) = strip_honorific(name) {
        if let Some((first_word, _)) = stripped.split_once(' ') {
            out.push(stripped.to_string());
            out.push(first_word.to_string());
        } else {
            out.push(stripped.to_string());
        }
    }
    out
}

fn strip_honorific(name: &str) -> Option<&str> {
    HONORIFICS.iter().find_map(|prefix| {
        let rest = name.strip_prefix(prefix)?;
        let rest = rest.strip_prefix([' ', ZWNJ])?.trim_start();
        (!rest.is_empty()).then_some(rest)
    })
}
