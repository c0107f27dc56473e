//! 翻訳リンクテーブルへのサイト単位アクセス
//!
//! サイトごとに独立したストアを持つ。どのサイトのストアを操作するかは
//! 常に呼び出し側がハンドルで明示する（暗黙のカレントサイトは持たない）。

mod memory;

pub use memory::MemoryStore;
use thiserror::Error;

use crate::types::{
    ElementId,
    ElementKind,
    GroupId,
    TranslationRecord,
};

/// Defines errors that may occur while accessing a translation store
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backing store could not be reached or rejected the operation
    #[error("translation store unavailable: {0}")]
    Unavailable(String),
    /// The store reported a constraint violation on write
    #[error("translation store rejected the write: {0}")]
    Constraint(String),
}

/// Read/write access to one site's translation-linkage table.
///
/// Implementations surface persistence failures as [`StoreError`]; no
/// retries happen at this layer. `upsert` must be idempotent for
/// identical input.
pub trait TranslationStore {
    /// Looks up the record for `(element_id, kind)`, if any.
    fn read(
        &self,
        element_id: ElementId,
        kind: &ElementKind,
    ) -> Result<Option<TranslationRecord>, StoreError>;

    /// All element ids sharing `group_id`. Order is store-dependent and
    /// carries no meaning.
    fn read_group(&self, group_id: GroupId) -> Result<Vec<ElementId>, StoreError>;

    /// Highest group id in use on this site, `0` when the table is empty.
    fn max_group_id(&self) -> Result<u64, StoreError>;

    /// Updates the row for `(element_id, element_kind)` or inserts it.
    fn upsert(&self, record: &TranslationRecord) -> Result<(), StoreError>;
}
