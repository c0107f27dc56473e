//! 設定ファイルの読み込み関数

use std::path::Path;

use super::{
    ConfigError,
    SyncSettings,
};

/// ディレクトリから設定を読み込む
///
/// `.i18n-sync.json` ファイルを探して読み込み、バリデーションする
///
/// # Returns
/// - `Ok(Some(settings))`: 設定ファイルが見つかり、読み込みに成功
/// - `Ok(None)`: 設定ファイルが見つからない
/// - `Err(ConfigError)`: 読み込み・パース・バリデーションエラー
///
/// # Errors
/// - ファイル読み込みエラー
/// - JSON パースエラー
/// - バリデーションエラー
pub fn load_from_dir(root: &Path) -> Result<Option<SyncSettings>, ConfigError> {
    let config_path = root.join(".i18n-sync.json");

    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(&config_path)?;
    let settings: SyncSettings = serde_json::from_str(&content)?;
    settings.validate().map_err(ConfigError::ValidationErrors)?;

    Ok(Some(settings))
}
