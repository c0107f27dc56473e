//! Core types used throughout the project.

use std::fmt;

use serde::{
    Deserialize,
    Serialize,
};

/// Identifier of one site (store) in the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteId(pub u64);

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "site:{}", self.0)
    }
}

/// Opaque identifier of a content element, scoped to one site.
///
/// The same logical content carries unrelated element ids on different
/// sites; only [`crate::resolver::CrosspostLinks`] relates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Site-local identifier of a translation group (`trid`).
///
/// Group ids are allocated independently per site; equality of ids across
/// two sites is coincidental and carries no meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(pub u64);

impl GroupId {
    /// Raw numeric value, as persisted in the linkage table.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Content-type discriminator in `family:name` form.
///
/// Examples: `post:page`, `post:product`, `term:pa_color`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementKind(String);

impl ElementKind {
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self(kind.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementKind {
    fn from(kind: &str) -> Self {
        Self::new(kind)
    }
}

/// Unique catalog code of a catalog item or variant (e.g. a SKU).
///
/// Uniqueness is deliberately relaxed across languages: translations of the
/// same item share the code, and language disambiguates between them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogCode(String);

impl CatalogCode {
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CatalogCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One row of a site's translation-linkage table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationRecord {
    pub element_id: ElementId,
    pub element_kind: ElementKind,
    /// `None` until the element joins a translation group.
    pub group_id: Option<GroupId>,
    pub language_code: String,
    /// Language this record was translated from. `None` marks the group's
    /// designated original (persisted as the empty string).
    pub source_language_code: Option<String>,
}

impl TranslationRecord {
    /// Whether this record is the group's designated original.
    #[must_use]
    pub const fn is_original(&self) -> bool {
        self.source_language_code.is_none()
    }
}
