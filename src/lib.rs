//! multisite-i18n-sync
//!
//! マルチサイトネットワーク上でクロスポストされたコンテンツの翻訳グループを
//! サイト間で整合させるライブラリ。各サイトは独立した翻訳リンクテーブルを
//! 持ち、共有トランザクションやグローバルな ID 採番は存在しない前提で、
//! 「コンテンツ保存」トリガーごとにターゲットサイトのリンク行を upsert する。

pub mod catalog;
pub mod config;
pub mod group;
pub mod reconciler;
pub mod resolver;
pub mod store;
mod test_utils;
pub mod types;

// 中核の入口を再エクスポート
pub use reconciler::{
    ChangeEvent,
    GroupReconciler,
    ReconcileOutcome,
};
