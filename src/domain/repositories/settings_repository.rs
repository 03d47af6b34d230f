//! # Settings Repository Trait
//!
//! 接続設定の永続化を抽象化

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::entities::connection_settings::ConnectionSettings;

/// 設定リポジトリ
///
/// 接続設定のロードと保存を担当するリポジトリ。
/// ロード時は保存済みの値をデフォルト（全フィールド空文字列）に
/// マージする。
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// 設定をロードする
    ///
    /// # Arguments
    ///
    /// * `path` - 設定ファイルのパス
    ///
    /// # Returns
    ///
    /// ロードされた設定。ファイルが存在しない場合はデフォルト値
    async fn load(&self, path: &str) -> Result<ConnectionSettings>;

    /// 設定レコード全体を保存する
    ///
    /// # Errors
    ///
    /// 書き込みに失敗した場合にエラーを返す
    async fn save(&self, path: &str, settings: &ConnectionSettings) -> Result<()>;
}
