//! インメモリのリファレンスストア実装

use std::collections::HashMap;
use std::sync::RwLock;

use super::{
    StoreError,
    TranslationStore,
};
use crate::types::{
    ElementId,
    ElementKind,
    GroupId,
    TranslationRecord,
};

/// In-process [`TranslationStore`] backed by a `HashMap`.
///
/// Reference implementation for embedders without a relational backend,
/// and the harness every test in this crate runs against. One instance
/// models one site's table.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: RwLock<HashMap<(ElementId, ElementKind), TranslationRecord>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a record, bypassing the upsert path. Intended for fixtures.
    pub fn insert(&self, record: TranslationRecord) -> Result<(), StoreError> {
        let mut rows = self.rows.write().map_err(|_| poisoned())?;
        rows.insert((record.element_id, record.element_kind.clone()), record);
        Ok(())
    }

    /// Number of rows currently held.
    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.rows.read().map_err(|_| poisoned())?.len())
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

fn poisoned() -> StoreError {
    StoreError::Unavailable("in-memory store lock poisoned".to_string())
}

impl TranslationStore for MemoryStore {
    fn read(
        &self,
        element_id: ElementId,
        kind: &ElementKind,
    ) -> Result<Option<TranslationRecord>, StoreError> {
        let rows = self.rows.read().map_err(|_| poisoned())?;
        Ok(rows.get(&(element_id, kind.clone())).cloned())
    }

    fn read_group(&self, group_id: GroupId) -> Result<Vec<ElementId>, StoreError> {
        let rows = self.rows.read().map_err(|_| poisoned())?;
        let mut members: Vec<ElementId> = rows
            .values()
            .filter(|record| record.group_id == Some(group_id))
            .map(|record| record.element_id)
            .collect();
        // HashMap の走査順を安定化させる（順序自体に意味はない）
        members.sort_unstable();
        Ok(members)
    }

    fn max_group_id(&self) -> Result<u64, StoreError> {
        let rows = self.rows.read().map_err(|_| poisoned())?;
        Ok(rows.values().filter_map(|record| record.group_id).map(GroupId::get).max().unwrap_or(0))
    }

    fn upsert(&self, record: &TranslationRecord) -> Result<(), StoreError> {
        let mut rows = self.rows.write().map_err(|_| poisoned())?;
        rows.entry((record.element_id, record.element_kind.clone()))
            .and_modify(|row| {
                row.group_id = record.group_id;
                row.language_code = record.language_code.clone();
                row.source_language_code = record.source_language_code.clone();
            })
            .or_insert_with(|| record.clone());
        Ok(())
    }
}
