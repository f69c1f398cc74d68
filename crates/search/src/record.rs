//! Catalogue records and the query shape sent to a record store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Columns matched by a search pattern, in the order they are OR-ed together.
pub const SEARCHABLE_COLUMNS: &[&str] = &[
    "title",
    "artist_name",
    "description",
    "materials",
    "location",
    "provenance",
    "category",
];

/// Category value meaning "no category filter".
pub const ALL_CATEGORIES: &str = "all";

/// Moderation state of an artwork.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtworkStatus {
    /// Awaiting admin review
    #[default]
    Pending,
    /// Visible in the marketplace
    Approved,
    /// Refused by moderation
    Rejected,
}

/// Image attached to an artwork.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtworkImage {
    pub image_url: String,
    #[serde(default)]
    pub is_primary: bool,
}

/// A catalogue item that search terms are matched against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub artist_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub materials: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub provenance: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub status: ArtworkStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, alias = "artwork_images")]
    pub images: Vec<ArtworkImage>,
}

impl MatchRecord {
    /// Text-bearing fields, in [`SEARCHABLE_COLUMNS`] order.
    pub fn text_fields(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.title.as_str()).chain(
            [
                &self.artist_name,
                &self.description,
                &self.materials,
                &self.location,
                &self.provenance,
                &self.category,
            ]
            .into_iter()
            .filter_map(|field| field.as_deref()),
        )
    }

    /// Case-insensitive substring match against any text field.
    #[must_use]
    pub fn matches(&self, pattern: &str) -> bool {
        let needle = pattern.to_lowercase();
        self.text_fields()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    /// Whether the record is visible to buyers
    #[must_use]
    pub fn is_approved(&self) -> bool {
        self.status == ArtworkStatus::Approved
    }

    /// URL of the primary image, falling back to the first one
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images
            .iter()
            .find(|image| image.is_primary)
            .or_else(|| self.images.first())
            .map(|image| image.image_url.as_str())
    }
}

/// A single query against a record store.
///
/// Every query is restricted to approved records and ordered newest first;
/// the store decides how to express that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordQuery {
    /// Case-insensitive substring matched across [`SEARCHABLE_COLUMNS`]
    pub pattern: Option<String>,
    /// Exact category filter
    pub category: Option<String>,
    /// Only return approved records
    pub approved_only: bool,
}

impl RecordQuery {
    /// Query with only a category filter (browse mode)
    pub fn browse(category: Option<&str>) -> Self {
        Self {
            pattern: None,
            category: category.map(String::from),
            approved_only: true,
        }
    }

    /// Query matching a pattern, optionally within a category
    pub fn matching(pattern: impl Into<String>, category: Option<&str>) -> Self {
        Self {
            pattern: Some(pattern.into()),
            category: category.map(String::from),
            approved_only: true,
        }
    }

    /// Whether a record satisfies this query
    #[must_use]
    pub fn accepts(&self, record: &MatchRecord) -> bool {
        if self.approved_only && !record.is_approved() {
            return false;
        }
        if let Some(ref category) = self.category {
            if record.category.as_deref() != Some(category.as_str()) {
                return false;
            }
        }
        self.pattern
            .as_deref()
            .map_or(true, |pattern| record.matches(pattern))
    }
}

/// Turn a caller-supplied category into a filter.
///
/// Empty strings and `"all"` mean no filter.
#[must_use]
pub fn category_filter(category: &str) -> Option<&str> {
    let trimmed = category.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL_CATEGORIES) {
        None
    } else {
        Some(trimmed)
    }
}
