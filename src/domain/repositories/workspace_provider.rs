//! # Workspace Provider Trait
//!
//! アクティブドキュメントの解決を抽象化

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::entities::active_document::ActiveDocument;

/// ワークスペースプロバイダ
///
/// 「現在開いているノート」とその所属Vaultルートを供給する。
/// エディタ統合の代わりに、CLIではファイル引数からの解決を
/// Adapter層が実装する。
#[async_trait]
pub trait WorkspaceProvider: Send + Sync {
    /// アクティブドキュメントを解決する
    ///
    /// # Returns
    ///
    /// アクティブドキュメント。存在しない場合は `None`
    ///
    /// # Errors
    ///
    /// ファイルの読み取りに失敗した場合にエラーを返す
    async fn active_document(&self) -> Result<Option<ActiveDocument>>;
}
