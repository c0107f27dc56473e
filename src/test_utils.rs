//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のフィクスチャを提供します。
#![cfg(test)]
#![allow(clippy::unwrap_used)]

use std::collections::HashMap;

use crate::catalog::{
    CatalogError,
    CatalogMetadata,
    ItemAttribute,
    ItemVariant,
};
use crate::resolver::{
    CatalogIndex,
    CrosspostLinks,
    ResolveError,
};
use crate::types::{
    CatalogCode,
    ElementId,
    ElementKind,
    GroupId,
    SiteId,
    TranslationRecord,
};

/// `post:page` のレコードを作る
pub(crate) fn record(element_id: u64, group_id: Option<u64>, language: &str) -> TranslationRecord {
    TranslationRecord {
        element_id: ElementId(element_id),
        element_kind: ElementKind::new("post:page"),
        group_id: group_id.map(GroupId),
        language_code: language.to_string(),
        source_language_code: None,
    }
}

/// 翻訳元言語付きのレコードを作る
pub(crate) fn translated_record(
    element_id: u64,
    group_id: Option<u64>,
    language: &str,
    source_language: &str,
) -> TranslationRecord {
    TranslationRecord {
        source_language_code: Some(source_language.to_string()),
        ..record(element_id, group_id, language)
    }
}

/// 固定のクロスポスト対応表
#[derive(Debug, Default)]
pub(crate) struct FixedLinks {
    links: HashMap<(SiteId, ElementId, SiteId), ElementId>,
}

impl FixedLinks {
    pub(crate) fn with(
        mut self,
        source_site: SiteId,
        element: ElementId,
        target_site: SiteId,
        target: ElementId,
    ) -> Self {
        self.links.insert((source_site, element, target_site), target);
        self
    }
}

impl CrosspostLinks for FixedLinks {
    fn mirror_of(
        &self,
        source_site: SiteId,
        element: ElementId,
        target_site: SiteId,
    ) -> Result<Option<ElementId>, ResolveError> {
        Ok(self.links.get(&(source_site, element, target_site)).copied())
    }
}

/// 固定のカタログ索引
#[derive(Debug, Default)]
pub(crate) struct FixedCatalogIndex {
    codes: HashMap<(SiteId, ElementId), CatalogCode>,
    items: HashMap<(SiteId, CatalogCode, String), ElementId>,
}

impl FixedCatalogIndex {
    pub(crate) fn with_code(mut self, site: SiteId, element: ElementId, code: &str) -> Self {
        self.codes.insert((site, element), CatalogCode::new(code));
        self
    }

    pub(crate) fn with_item(
        mut self,
        site: SiteId,
        code: &str,
        language: &str,
        element: ElementId,
    ) -> Self {
        self.items.insert((site, CatalogCode::new(code), language.to_string()), element);
        self
    }
}

impl CatalogIndex for FixedCatalogIndex {
    fn catalog_code(
        &self,
        site: SiteId,
        element: ElementId,
    ) -> Result<Option<CatalogCode>, ResolveError> {
        Ok(self.codes.get(&(site, element)).cloned())
    }

    fn find_by_code(
        &self,
        site: SiteId,
        code: &CatalogCode,
        language_code: &str,
    ) -> Result<Option<ElementId>, ResolveError> {
        Ok(self.items.get(&(site, code.clone(), language_code.to_string())).copied())
    }
}

/// 固定のカタログメタデータ
#[derive(Debug, Default)]
pub(crate) struct FixedCatalog {
    attributes: HashMap<(SiteId, ElementId), Vec<ItemAttribute>>,
    variants: HashMap<(SiteId, ElementId), Vec<ItemVariant>>,
}

impl FixedCatalog {
    pub(crate) fn with_attributes(
        mut self,
        site: SiteId,
        item: ElementId,
        attributes: Vec<ItemAttribute>,
    ) -> Self {
        self.attributes.insert((site, item), attributes);
        self
    }

    pub(crate) fn with_variants(
        mut self,
        site: SiteId,
        item: ElementId,
        variants: Vec<ItemVariant>,
    ) -> Self {
        self.variants.insert((site, item), variants);
        self
    }
}

impl CatalogMetadata for FixedCatalog {
    fn attributes(
        &self,
        site: SiteId,
        item: ElementId,
    ) -> Result<Vec<ItemAttribute>, CatalogError> {
        Ok(self.attributes.get(&(site, item)).cloned().unwrap_or_default())
    }

    fn variants(&self, site: SiteId, item: ElementId) -> Result<Vec<ItemVariant>, CatalogError> {
        Ok(self.variants.get(&(site, item)).cloned().unwrap_or_default())
    }
}
