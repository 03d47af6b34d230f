//! JSON Settings Repository Implementation
//!
//! SettingsRepositoryのJSON実装（接続設定をJSONファイルで永続化）
//!
//! ロード時は保存済みJSONをデフォルト（全フィールド空文字列）に
//! マージする。部分的なJSONでも欠けたフィールドはデフォルトで
//! 埋められる。

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::info;
use std::fs;
use std::path::Path;

use crate::domain::entities::connection_settings::ConnectionSettings;
use crate::domain::repositories::settings_repository::SettingsRepository;

/// JSONファイルベースの設定リポジトリ
pub struct JsonSettingsRepository;

impl JsonSettingsRepository {
    /// 新しいリポジトリを作成
    pub fn new() -> Self {
        Self
    }

    /// ファイルから設定を読み込む（同期処理）
    fn load_sync(path: &str) -> Result<ConnectionSettings> {
        let expanded = shellexpand::tilde(path);
        let path = Path::new(expanded.as_ref());

        if !path.exists() {
            info!("No settings file found at {}, using defaults", path.display());
            return Ok(ConnectionSettings::default());
        }

        let content = fs::read_to_string(path).context("Failed to read settings file")?;

        let settings: ConnectionSettings =
            serde_json::from_str(&content).context("Failed to parse settings JSON")?;

        Ok(settings)
    }

    /// ファイルに設定を保存する（同期処理）
    fn save_sync(path: &str, settings: &ConnectionSettings) -> Result<()> {
        let expanded = shellexpand::tilde(path);
        let path = Path::new(expanded.as_ref());

        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create settings directory")?;
        }

        let json =
            serde_json::to_string_pretty(settings).context("Failed to serialize settings")?;

        fs::write(path, json).context("Failed to write settings file")?;

        info!("Saved settings to {}", path.display());

        Ok(())
    }
}

impl Default for JsonSettingsRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SettingsRepository for JsonSettingsRepository {
    async fn load(&self, path: &str) -> Result<ConnectionSettings> {
        let path = path.to_string();
        tokio::task::spawn_blocking(move || Self::load_sync(&path))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))?
    }

    async fn save(&self, path: &str, settings: &ConnectionSettings) -> Result<()> {
        let path = path.to_string();
        let settings = settings.clone();
        tokio::task::spawn_blocking(move || Self::save_sync(&path, &settings))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))?
    }
}
