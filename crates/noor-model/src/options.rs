//! Configuration options for record normalization.

use serde::{Deserialize, Serialize};

/// How recency is decided inside a national-ID group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecencyOrder {
    /// Latest visit date wins; undated rows count as oldest; input order breaks ties.
    #[default]
    VisitDate,
    /// Later input rows are always more recent.
    InputOrder,
}

/// Names the export uses as stand-ins for an unknown patient.
pub const DEFAULT_PLACEHOLDER_NAMES: &[&str] = &["کاربر تلفنی"];

/// Tags attached to every record regardless of its source columns.
pub const DEFAULT_BASE_TAGS: &[&str] = &["noor_hospital_queue", "patient"];

/// Options controlling normalization and deduplication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizationOptions {
    pub recency: RecencyOrder,

    /// Full names containing any of these fail the name rule.
    pub placeholder_names: Vec<String>,

    pub base_tags: Vec<String>,

    /// When a merged record borrows its first name from an older row, take
    /// that row's gender as well.
    pub inherit_gender: bool,
}

impl Default for NormalizationOptions {
    fn default() -> Self {
        Self {
            recency: RecencyOrder::default(),
            placeholder_names: DEFAULT_PLACEHOLDER_NAMES
                .iter()
                .map(ToString::to_string)
                .collect(),
            base_tags: DEFAULT_BASE_TAGS.iter().map(ToString::to_string).collect(),
            inherit_gender: true,
        }
    }
}

impl NormalizationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_recency(mut self, recency: RecencyOrder) -> Self {
        self.recency = recency;
        self
    }

    #[must_use]
    pub fn with_inherit_gender(mut self, inherit: bool) -> Self {
        self.inherit_gender = inherit;
        self
    }

    #[must_use]
    pub fn with_base_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.base_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_placeholder_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.placeholder_names = names.into_iter().map(Into::into).collect();
        self
    }
}
