//! カタログアイテムの属性・バリアントをターゲット言語へ置き換えるモジュール
//!
//! カタログアイテムの記述データがターゲットサイトへコピーされる前に、
//! タクソノミー由来の属性値をターゲット言語側の訳語タームに差し替える。
//! 翻訳が存在しない値は未翻訳のままコピーせず、落とす。

mod types;

pub use types::{
    AttributeOptions,
    AttributeValue,
    CatalogError,
    CatalogMetadata,
    ItemAttribute,
    ItemVariant,
    VariantPayload,
};

use crate::group;
use crate::store::TranslationStore;
use crate::types::{
    ElementId,
    ElementKind,
    SiteId,
};

/// Rewrites taxonomy-backed attribute values into a target language.
///
/// Works entirely against the source site: term translation groups live in
/// the source site's store, and the substituted term ids are source-site
/// ids that the mirroring mechanism maps onward.
pub struct CatalogAttributeLocalizer<'a> {
    metadata: &'a dyn CatalogMetadata,
    store: &'a dyn TranslationStore,
}

impl std::fmt::Debug for CatalogAttributeLocalizer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogAttributeLocalizer").finish_non_exhaustive()
    }
}

impl<'a> CatalogAttributeLocalizer<'a> {
    #[must_use]
    pub const fn new(metadata: &'a dyn CatalogMetadata, store: &'a dyn TranslationStore) -> Self {
        Self { metadata, store }
    }

    /// Group member of `term` whose language equals `target_language`.
    pub fn translated_term(
        &self,
        term: ElementId,
        kind: &ElementKind,
        target_language: &str,
    ) -> Result<Option<ElementId>, CatalogError> {
        let group = group::group_of(self.store, term, kind)?;
        Ok(group
            .into_iter()
            .find(|record| record.language_code == target_language)
            .map(|record| record.element_id))
    }

    /// Attribute list of `item` with taxonomy options substituted into
    /// `target_language`.
    ///
    /// Options without a translation in the target language are dropped
    /// rather than copied untranslated. Custom options pass through.
    pub fn localize_attributes(
        &self,
        site: SiteId,
        item: ElementId,
        target_language: &str,
    ) -> Result<Vec<ItemAttribute>, CatalogError> {
        let mut attributes = self.metadata.attributes(site, item)?;
        for attribute in &mut attributes {
            let AttributeOptions::Taxonomy { taxonomy, term_ids } = &mut attribute.options else {
                continue;
            };
            let mut translated = Vec::with_capacity(term_ids.len());
            for term_id in term_ids.iter() {
                match self.translated_term(*term_id, taxonomy, target_language)? {
                    Some(id) => translated.push(id),
                    None => {
                        tracing::debug!(
                            term = %term_id,
                            %target_language,
                            "no translated term, dropping option value"
                        );
                    }
                }
            }
            *term_ids = translated;
        }
        Ok(attributes)
    }

    /// Merges the matching source variant's selections into `payload`,
    /// substituted into `target_language`.
    ///
    /// The source variant is matched by catalog code. Translated taxonomy
    /// selections take precedence over values already present for the same
    /// attribute key; untranslated ones are not copied (an existing payload
    /// value stays untouched); text selections only fill gaps. Without a
    /// matching source variant the payload is returned unchanged.
    pub fn localize_variant(
        &self,
        mut payload: VariantPayload,
        site: SiteId,
        item: ElementId,
        target_language: &str,
    ) -> Result<VariantPayload, CatalogError> {
        let variants = self.metadata.variants(site, item)?;
        let Some(source) = variants.iter().find(|v| v.catalog_code == payload.catalog_code) else {
            tracing::debug!(
                code = %payload.catalog_code,
                "no source variant with this catalog code, leaving payload as-is"
            );
            return Ok(payload);
        };

        for (key, value) in &source.attributes {
            match value {
                AttributeValue::Term { taxonomy, id } => {
                    if let Some(translated) =
                        self.translated_term(*id, taxonomy, target_language)?
                    {
                        payload.attributes.insert(
                            key.clone(),
                            AttributeValue::Term { taxonomy: taxonomy.clone(), id: translated },
                        );
                    }
                }
                AttributeValue::Text(text) => {
                    payload
                        .attributes
                        .entry(key.clone())
                        .or_insert_with(|| AttributeValue::Text(text.clone()));
                }
            }
        }
        Ok(payload)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;
    use crate::store::MemoryStore;
    use crate::test_utils::FixedCatalog;
    use crate::types::{
        CatalogCode,
        GroupId,
        TranslationRecord,
    };

    const COLOR: &str = "term:pa_color";

    fn term_record(element_id: u64, group_id: u64, language: &str) -> TranslationRecord {
        TranslationRecord {
            element_id: ElementId(element_id),
            element_kind: ElementKind::new(COLOR),
            group_id: Some(GroupId(group_id)),
            language_code: language.to_string(),
            source_language_code: if language == "en" { None } else { Some("en".to_string()) },
        }
    }

    /// ターム {5:en, 9:es} を持つストア
    fn term_store() -> MemoryStore {
        let store = MemoryStore::new();
        store.insert(term_record(5, 30, "en")).unwrap();
        store.insert(term_record(9, 30, "es")).unwrap();
        store
    }

    fn color_attribute(term_ids: Vec<u64>) -> ItemAttribute {
        ItemAttribute {
            name: "pa_color".to_string(),
            options: AttributeOptions::Taxonomy {
                taxonomy: ElementKind::new(COLOR),
                term_ids: term_ids.into_iter().map(ElementId).collect(),
            },
            position: 0,
            visible: true,
            variation: true,
        }
    }

    #[rstest]
    fn translated_term_selects_target_language_member() {
        let store = term_store();
        let catalog = FixedCatalog::default();
        let localizer = CatalogAttributeLocalizer::new(&catalog, &store);

        let translated =
            localizer.translated_term(ElementId(5), &ElementKind::new(COLOR), "es").unwrap();

        assert_that!(translated, some(eq(ElementId(9))));
    }

    #[rstest]
    fn translated_term_absent_language_yields_none() {
        let store = term_store();
        let catalog = FixedCatalog::default();
        let localizer = CatalogAttributeLocalizer::new(&catalog, &store);

        let translated =
            localizer.translated_term(ElementId(5), &ElementKind::new(COLOR), "de").unwrap();

        assert_that!(translated, none());
    }

    #[rstest]
    fn localize_attributes_substitutes_taxonomy_options() {
        let store = term_store();
        let catalog =
            FixedCatalog::default().with_attributes(SiteId(1), ElementId(100), vec![
                color_attribute(vec![5]),
            ]);
        let localizer = CatalogAttributeLocalizer::new(&catalog, &store);

        let attributes =
            localizer.localize_attributes(SiteId(1), ElementId(100), "es").unwrap();

        assert_that!(
            attributes,
            elements_are![field!(
                ItemAttribute.options,
                eq(&AttributeOptions::Taxonomy {
                    taxonomy: ElementKind::new(COLOR),
                    term_ids: vec![ElementId(9)],
                })
            )]
        );
    }

    #[rstest]
    fn localize_attributes_drops_untranslated_options() {
        let store = term_store();
        // ターム 7 には翻訳グループが無い
        store.insert(term_record(7, 31, "en")).unwrap();
        let catalog =
            FixedCatalog::default().with_attributes(SiteId(1), ElementId(100), vec![
                color_attribute(vec![5, 7]),
            ]);
        let localizer = CatalogAttributeLocalizer::new(&catalog, &store);

        let attributes =
            localizer.localize_attributes(SiteId(1), ElementId(100), "es").unwrap();

        assert_that!(
            attributes,
            elements_are![field!(
                ItemAttribute.options,
                eq(&AttributeOptions::Taxonomy {
                    taxonomy: ElementKind::new(COLOR),
                    term_ids: vec![ElementId(9)],
                })
            )]
        );
    }

    #[rstest]
    fn localize_attributes_passes_custom_options_through() {
        let store = term_store();
        let custom = ItemAttribute {
            name: "material".to_string(),
            options: AttributeOptions::Custom {
                values: vec!["cotton".to_string(), "linen".to_string()],
            },
            position: 1,
            visible: true,
            variation: false,
        };
        let catalog = FixedCatalog::default()
            .with_attributes(SiteId(1), ElementId(100), vec![custom.clone()]);
        let localizer = CatalogAttributeLocalizer::new(&catalog, &store);

        let attributes =
            localizer.localize_attributes(SiteId(1), ElementId(100), "es").unwrap();

        assert_that!(attributes, elements_are![eq(&custom)]);
    }

    #[rstest]
    fn localize_variant_substitutes_and_takes_precedence() {
        let store = term_store();
        let source_variant = ItemVariant {
            catalog_code: CatalogCode::new("SKU-1-red"),
            attributes: BTreeMap::from([(
                "pa_color".to_string(),
                AttributeValue::Term { taxonomy: ElementKind::new(COLOR), id: ElementId(5) },
            )]),
        };
        let catalog = FixedCatalog::default()
            .with_variants(SiteId(1), ElementId(100), vec![source_variant]);
        let localizer = CatalogAttributeLocalizer::new(&catalog, &store);
        // ペイロードには未翻訳の値が既に入っている
        let payload = VariantPayload {
            catalog_code: CatalogCode::new("SKU-1-red"),
            attributes: BTreeMap::from([(
                "pa_color".to_string(),
                AttributeValue::Term { taxonomy: ElementKind::new(COLOR), id: ElementId(5) },
            )]),
        };

        let localized =
            localizer.localize_variant(payload, SiteId(1), ElementId(100), "es").unwrap();

        assert_that!(
            localized.attributes.get("pa_color"),
            some(eq(&AttributeValue::Term {
                taxonomy: ElementKind::new(COLOR),
                id: ElementId(9),
            }))
        );
    }

    #[rstest]
    fn localize_variant_untranslated_selection_is_not_copied() {
        let store = term_store();
        store.insert(term_record(7, 31, "en")).unwrap();
        let source_variant = ItemVariant {
            catalog_code: CatalogCode::new("SKU-1-blue"),
            attributes: BTreeMap::from([(
                "pa_color".to_string(),
                AttributeValue::Term { taxonomy: ElementKind::new(COLOR), id: ElementId(7) },
            )]),
        };
        let catalog = FixedCatalog::default()
            .with_variants(SiteId(1), ElementId(100), vec![source_variant]);
        let localizer = CatalogAttributeLocalizer::new(&catalog, &store);
        let payload = VariantPayload {
            catalog_code: CatalogCode::new("SKU-1-blue"),
            attributes: BTreeMap::new(),
        };

        let localized =
            localizer.localize_variant(payload, SiteId(1), ElementId(100), "es").unwrap();

        assert_that!(localized.attributes.get("pa_color"), none());
    }

    #[rstest]
    fn localize_variant_without_matching_code_is_unchanged() {
        let store = term_store();
        let catalog = FixedCatalog::default().with_variants(SiteId(1), ElementId(100), vec![]);
        let localizer = CatalogAttributeLocalizer::new(&catalog, &store);
        let payload = VariantPayload {
            catalog_code: CatalogCode::new("SKU-unknown"),
            attributes: BTreeMap::from([(
                "note".to_string(),
                AttributeValue::Text("hand-made".to_string()),
            )]),
        };

        let localized = localizer
            .localize_variant(payload.clone(), SiteId(1), ElementId(100), "es")
            .unwrap();

        assert_eq!(localized, payload);
    }

    #[rstest]
    fn localize_variant_text_selection_fills_gap_only() {
        let store = term_store();
        let source_variant = ItemVariant {
            catalog_code: CatalogCode::new("SKU-1"),
            attributes: BTreeMap::from([(
                "note".to_string(),
                AttributeValue::Text("from-source".to_string()),
            )]),
        };
        let catalog = FixedCatalog::default()
            .with_variants(SiteId(1), ElementId(100), vec![source_variant]);
        let localizer = CatalogAttributeLocalizer::new(&catalog, &store);
        let payload = VariantPayload {
            catalog_code: CatalogCode::new("SKU-1"),
            attributes: BTreeMap::from([(
                "note".to_string(),
                AttributeValue::Text("already-there".to_string()),
            )]),
        };

        let localized =
            localizer.localize_variant(payload, SiteId(1), ElementId(100), "es").unwrap();

        assert_that!(
            localized.attributes.get("note"),
            some(eq(&AttributeValue::Text("already-there".to_string())))
        );
    }
}
