use std::collections::BTreeMap;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::store::StoreError;
use crate::types::{
    CatalogCode,
    ElementId,
    ElementKind,
    SiteId,
};

/// Defines errors that may occur while localizing catalog metadata
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The catalog metadata provider failed
    #[error("catalog metadata lookup failed: {0}")]
    Metadata(String),
}

/// One selected or selectable attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AttributeValue {
    /// Taxonomy-backed value: a term element, translatable per language.
    Term {
        /// Kind of the backing term, e.g. `term:pa_color`.
        taxonomy: ElementKind,
        id: ElementId,
    },
    /// Free-text value, copied as-is.
    Text(String),
}

/// Option values of one attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AttributeOptions {
    /// Taxonomy-backed options, substitutable into another language.
    Taxonomy { taxonomy: ElementKind, term_ids: Vec<ElementId> },
    /// Custom options without taxonomy backing.
    Custom { values: Vec<String> },
}

/// One attribute of a catalog item, as reported by the metadata provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemAttribute {
    pub name: String,
    pub options: AttributeOptions,
    pub position: u32,
    pub visible: bool,
    /// Whether the attribute is used for variant selection.
    pub variation: bool,
}

/// One variant of a catalog item on the source site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemVariant {
    pub catalog_code: CatalogCode,
    /// Selected attribute values, keyed by attribute name.
    pub attributes: BTreeMap<String, AttributeValue>,
}

/// Variant data being mirrored to a target site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantPayload {
    pub catalog_code: CatalogCode,
    pub attributes: BTreeMap<String, AttributeValue>,
}

/// Read-only catalog metadata, externally owned.
pub trait CatalogMetadata {
    /// Attribute list of the item, in provider order.
    fn attributes(&self, site: SiteId, item: ElementId)
    -> Result<Vec<ItemAttribute>, CatalogError>;

    /// Variant list of the item.
    fn variants(&self, site: SiteId, item: ElementId) -> Result<Vec<ItemVariant>, CatalogError>;
}
