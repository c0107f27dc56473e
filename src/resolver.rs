//! クロスポスト先の要素を解決するモジュール
//!
//! 通常コンテンツは ID 対応表、カタログアイテムはカタログコード + 言語で
//! ミラー要素を特定する。どちらの戦略も同じ `resolve` 契約に従う。

use thiserror::Error;

use crate::config::SyncSettings;
use crate::types::{
    CatalogCode,
    ElementId,
    ElementKind,
    SiteId,
};

/// Defines errors that may occur while resolving a mirror element
#[derive(Error, Debug)]
pub enum ResolveError {
    /// The crosspost association lookup failed
    #[error("crosspost association lookup failed: {0}")]
    Association(String),
    /// The catalog index lookup failed
    #[error("catalog index lookup failed: {0}")]
    CatalogIndex(String),
}

/// Read-only view of the crosspost association table.
///
/// Populated by the mirroring mechanism when content is first crossposted;
/// this crate only resolves through it and never writes it.
pub trait CrosspostLinks {
    /// Mirror of `element` on `target_site`, if the element was ever
    /// crossposted there.
    fn mirror_of(
        &self,
        source_site: SiteId,
        element: ElementId,
        target_site: SiteId,
    ) -> Result<Option<ElementId>, ResolveError>;
}

/// Read-only catalog lookups, per site.
pub trait CatalogIndex {
    /// Catalog code of `element` on `site`, if it carries one.
    fn catalog_code(
        &self,
        site: SiteId,
        element: ElementId,
    ) -> Result<Option<CatalogCode>, ResolveError>;

    /// Element on `site` whose catalog code and language both match.
    ///
    /// Codes are shared across languages on purpose, so the language code
    /// is part of the key.
    fn find_by_code(
        &self,
        site: SiteId,
        code: &CatalogCode,
        language_code: &str,
    ) -> Result<Option<ElementId>, ResolveError>;
}

/// How a mirror is located for a given element kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveStrategy {
    /// Identity association lookup; ignores the language code.
    Association,
    /// Catalog-code + language lookup on the target site.
    CatalogCode,
}

impl ResolveStrategy {
    /// Picks the strategy for `kind` from the configured catalog kinds.
    #[must_use]
    pub fn for_kind(kind: &ElementKind, settings: &SyncSettings) -> Self {
        if settings.is_catalog_kind(kind) { Self::CatalogCode } else { Self::Association }
    }
}

/// Resolves which element on a target site mirrors a given source element.
pub struct CrosspostResolver<'a> {
    links: &'a dyn CrosspostLinks,
    catalog: &'a dyn CatalogIndex,
    settings: &'a SyncSettings,
}

impl std::fmt::Debug for CrosspostResolver<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrosspostResolver").field("settings", self.settings).finish_non_exhaustive()
    }
}

impl<'a> CrosspostResolver<'a> {
    #[must_use]
    pub const fn new(
        links: &'a dyn CrosspostLinks,
        catalog: &'a dyn CatalogIndex,
        settings: &'a SyncSettings,
    ) -> Self {
        Self { links, catalog, settings }
    }

    /// Mirror of `(source_site, element)` on `target_site`.
    ///
    /// `Ok(None)` means the element is not mirrored on that site, which is
    /// an expected steady state and never an error.
    pub fn resolve(
        &self,
        source_site: SiteId,
        element: ElementId,
        kind: &ElementKind,
        language_code: &str,
        target_site: SiteId,
    ) -> Result<Option<ElementId>, ResolveError> {
        match ResolveStrategy::for_kind(kind, self.settings) {
            ResolveStrategy::Association => {
                self.links.mirror_of(source_site, element, target_site)
            }
            ResolveStrategy::CatalogCode => {
                let Some(code) = self.catalog.catalog_code(source_site, element)? else {
                    // コード無しのアイテムは照合のしようがない
                    tracing::debug!(%element, "catalog item has no code, treating as unmirrored");
                    return Ok(None);
                };
                self.catalog.find_by_code(target_site, &code, language_code)
            }
        }
    }
}
