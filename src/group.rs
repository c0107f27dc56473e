//! Translation-group reads over one site's store.

use crate::store::{
    StoreError,
    TranslationStore,
};
use crate::types::{
    ElementId,
    ElementKind,
    TranslationRecord,
};

/// Every record of the translation group `element_id` belongs to, the
/// element's own record included.
///
/// - Element has no record at all → empty (nothing to reconcile).
/// - Element has a record but no group yet → just that record.
/// - Otherwise → one record per group member, read back by
///   `(member_id, kind)`; members whose record disappeared between the two
///   reads are skipped.
pub fn group_of(
    store: &dyn TranslationStore,
    element_id: ElementId,
    kind: &ElementKind,
) -> Result<Vec<TranslationRecord>, StoreError> {
    let Some(own) = store.read(element_id, kind)? else {
        return Ok(Vec::new());
    };
    let Some(group_id) = own.group_id else {
        return Ok(vec![own]);
    };

    let mut records = Vec::new();
    for member_id in store.read_group(group_id)? {
        if let Some(record) = store.read(member_id, kind)? {
            records.push(record);
        }
    }
    Ok(records)
}
