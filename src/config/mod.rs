//! 同期動作の設定を扱うモジュール

mod loader;
mod types;

pub use loader::load_from_dir;
pub use types::{
    ConfigError,
    SyncSettings,
    ValidationError,
};
