//! Filesystem Workspace Provider Implementation
//!
//! WorkspaceProviderのファイルシステム実装
//!
//! エディタ統合の代わりに、CLI引数で渡されたファイルを
//! 「アクティブドキュメント」として解決する。所属Vaultルートは
//! `.obsidian` マーカーディレクトリを持つ最近接の祖先。マーカーが
//! 見つからない場合はファイルの親ディレクトリをルートとする
//! （フラグメントはファイル名のみになる）。

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::entities::active_document::ActiveDocument;
use crate::domain::repositories::workspace_provider::WorkspaceProvider;

/// Vaultルートを示すマーカーディレクトリ名
const VAULT_MARKER: &str = ".obsidian";

/// ファイルシステムベースのワークスペースプロバイダ
pub struct FsWorkspaceProvider {
    active_file: Option<PathBuf>,
}

impl FsWorkspaceProvider {
    /// 新しいプロバイダを作成
    ///
    /// # Arguments
    ///
    /// * `active_file` - アクティブファイルのパス。`None` なら
    ///   アクティブドキュメントなし
    pub fn new(active_file: Option<PathBuf>) -> Self {
        Self { active_file }
    }

    /// ファイルをアクティブドキュメントとして解決する（同期処理）
    fn resolve_sync(file: &Path) -> Result<ActiveDocument> {
        let absolute_path = file
            .canonicalize()
            .with_context(|| format!("Failed to resolve file: {}", file.display()))?;

        if !absolute_path.is_file() {
            anyhow::bail!("Not a regular file: {}", absolute_path.display());
        }

        let vault_root = Self::find_vault_root(&absolute_path);
        debug!(
            "resolved document {} with vault root {}",
            absolute_path.display(),
            vault_root.display()
        );

        let content = fs::read(&absolute_path)
            .with_context(|| format!("Failed to read file: {}", absolute_path.display()))?;

        Ok(ActiveDocument::new(absolute_path, vault_root, content))
    }

    /// `.obsidian` マーカーを持つ最近接の祖先を探す
    ///
    /// 見つからなければファイルの親ディレクトリを返す
    fn find_vault_root(absolute_path: &Path) -> PathBuf {
        for ancestor in absolute_path.ancestors().skip(1) {
            if ancestor.join(VAULT_MARKER).is_dir() {
                return ancestor.to_path_buf();
            }
        }

        absolute_path
            .parent()
            .unwrap_or(Path::new("/"))
            .to_path_buf()
    }
}

#[async_trait]
impl WorkspaceProvider for FsWorkspaceProvider {
    async fn active_document(&self) -> Result<Option<ActiveDocument>> {
        let Some(file) = self.active_file.clone() else {
            return Ok(None);
        };

        let document = tokio::task::spawn_blocking(move || Self::resolve_sync(&file))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))??;

        Ok(Some(document))
    }
}
