//! 翻訳グループをサイト間で整合させる中核アルゴリズム
//!
//! 「サイト A の要素 E が保存された。サイト B 上のミラーとリンクを保て」
//! というトリガーを受けて、E のグループを B へ写像し、B 側のグループ ID を
//! 決定してリンク行を upsert する。トリガーは重複して届き得るため、
//! 同じ入力での再実行が常に安全（冪等）であることが契約。

use thiserror::Error;

use crate::group;
use crate::resolver::{
    CrosspostResolver,
    ResolveError,
};
use crate::store::{
    StoreError,
    TranslationStore,
};
use crate::types::{
    ElementId,
    ElementKind,
    GroupId,
    SiteId,
    TranslationRecord,
};

/// Defines errors that may occur during reconciliation
#[derive(Error, Debug)]
pub enum ReconcileError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// The trigger input: element `element_id` on `source_site` changed and
/// should stay linked with its mirrors on `target_site`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub source_site: SiteId,
    pub element_id: ElementId,
    pub element_kind: ElementKind,
    pub target_site: SiteId,
}

/// What a reconciliation run did on the target site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The source element has no translation record; nothing to reconcile.
    NotTracked,
    /// No group member has a mirror on the target site; nothing written.
    NoMirrors,
    /// The mapped mirrors were upserted under `group_id`.
    Applied {
        group_id: GroupId,
        /// `true` when the id was freshly allocated rather than reused.
        allocated: bool,
        /// Target element ids written, in source-group encounter order.
        upserted: Vec<ElementId>,
    },
}

/// Optional mutual-exclusion hook around group-id allocation.
///
/// The allocate-then-write sequence is not atomic: two concurrent runs that
/// both find no existing group id on the target site can collide on
/// `max_group_id + 1`. The source system accepts that race; embedders that
/// do not can serialize runs per target site here (e.g. with an advisory
/// lock). Baseline correctness does not depend on this hook.
pub trait AllocationLock {
    /// Called before the read-decide-write sequence for `target_site`.
    fn acquire(&self, target_site: SiteId);
    /// Called after the sequence, also on the error path.
    fn release(&self, target_site: SiteId);
}

/// デフォルトの何もしないロック
#[derive(Debug, Default, Clone, Copy)]
pub struct NoLock;

impl AllocationLock for NoLock {
    fn acquire(&self, _target_site: SiteId) {}
    fn release(&self, _target_site: SiteId) {}
}

struct LockGuard<'a> {
    lock: &'a dyn AllocationLock,
    site: SiteId,
}

impl<'a> LockGuard<'a> {
    fn acquire(lock: &'a dyn AllocationLock, site: SiteId) -> Self {
        lock.acquire(site);
        Self { lock, site }
    }
}

impl Drop for LockGuard<'_> {
    fn drop(&mut self) {
        self.lock.release(self.site);
    }
}

/// Applies one site's translation group onto another site's store.
pub struct GroupReconciler<'a> {
    resolver: CrosspostResolver<'a>,
    lock: &'a dyn AllocationLock,
}

impl std::fmt::Debug for GroupReconciler<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroupReconciler").field("resolver", &self.resolver).finish_non_exhaustive()
    }
}

impl<'a> GroupReconciler<'a> {
    #[must_use]
    pub const fn new(resolver: CrosspostResolver<'a>) -> Self {
        Self { resolver, lock: &NoLock }
    }

    /// Serializes the allocate-then-write sequence through `lock`.
    #[must_use]
    pub const fn with_allocation_lock(mut self, lock: &'a dyn AllocationLock) -> Self {
        self.lock = lock;
        self
    }

    /// Reconciles one change event against the target site.
    ///
    /// Both store handles are explicit; nothing in this crate keeps a
    /// "current site". Partial application on a store failure is accepted
    /// and not rolled back; the caller owns any retry.
    pub fn reconcile(
        &self,
        event: &ChangeEvent,
        source: &dyn TranslationStore,
        target: &dyn TranslationStore,
    ) -> Result<ReconcileOutcome, ReconcileError> {
        // 1. 変更元のグループを読む
        let source_group = group::group_of(source, event.element_id, &event.element_kind)?;
        if source_group.is_empty() {
            tracing::debug!(element = %event.element_id, "element is not tracked, skipping");
            return Ok(ReconcileOutcome::NotTracked);
        }

        // 2. 各メンバーをターゲットサイトのミラーへ写像する。
        //    ミラーが無いメンバーは定常状態なので黙って飛ばす。
        let mut mapped: Vec<(ElementId, TranslationRecord)> = Vec::new();
        for member in source_group {
            let target_id = self.resolver.resolve(
                event.source_site,
                member.element_id,
                &member.element_kind,
                &member.language_code,
                event.target_site,
            )?;
            let Some(target_id) = target_id else {
                tracing::trace!(
                    member = %member.element_id,
                    target = %event.target_site,
                    "no mirror on target site, skipping member"
                );
                continue;
            };
            // 二重リンクで同じミラーに写った場合は先勝ち
            if mapped.iter().all(|(id, _)| *id != target_id) {
                mapped.push((target_id, member));
            }
        }
        if mapped.is_empty() {
            tracing::debug!(element = %event.element_id, "no member is mirrored, nothing to do");
            return Ok(ReconcileOutcome::NoMirrors);
        }

        // 3〜5 は read-decide-write の一続き。拡張ロックで括る。
        let _guard = LockGuard::acquire(self.lock, event.target_site);

        // 3. 既存グループ ID の探索。出現順で最初の非空が勝つ
        //    （順序はソースグループの読み出し順で、意味的な優先度ではない）。
        let mut existing = None;
        for (target_id, member) in &mapped {
            if let Some(record) = target.read(*target_id, &member.element_kind)?
                && let Some(group_id) = record.group_id
            {
                existing = Some(group_id);
                break;
            }
        }

        // 4. 見つからなければ max+1 を採番する（非アトミック。AllocationLock を参照）。
        let (group_id, allocated) = match existing {
            Some(group_id) => {
                tracing::debug!(%group_id, "reusing existing group id on target site");
                (group_id, false)
            }
            None => {
                let group_id = GroupId(target.max_group_id()? + 1);
                tracing::debug!(%group_id, "allocating new group id on target site");
                (group_id, true)
            }
        };

        // 5. 写像された全ミラーを upsert。言語ロールはソースの値をそのまま写す。
        let mut upserted = Vec::with_capacity(mapped.len());
        for (target_id, member) in mapped {
            tracing::trace!(
                target = %target_id,
                language = %member.language_code,
                original = member.is_original(),
                "upserting mirror record"
            );
            target.upsert(&TranslationRecord {
                element_id: target_id,
                element_kind: member.element_kind,
                group_id: Some(group_id),
                language_code: member.language_code,
                source_language_code: member.source_language_code,
            })?;
            upserted.push(target_id);
        }

        Ok(ReconcileOutcome::Applied { group_id, allocated, upserted })
    }
}
