//! # ActiveDocument Entity
//!
//! アップロード対象のアクティブドキュメント

use std::path::{Path, PathBuf};

/// アクティブドキュメント
///
/// Workspace Providerが解決した「現在開いているノート」。
/// 絶対パス・所属するVaultルート・ファイル内容を保持する。
#[derive(Debug, Clone)]
pub struct ActiveDocument {
    /// ディスク上の絶対パス
    pub absolute_path: PathBuf,
    /// 所属するVaultルートの絶対パス
    pub vault_root: PathBuf,
    /// ファイル内容（バイト列）
    pub content: Vec<u8>,
}

impl ActiveDocument {
    /// 新しいアクティブドキュメントを作成
    pub fn new(absolute_path: PathBuf, vault_root: PathBuf, content: Vec<u8>) -> Self {
        Self {
            absolute_path,
            vault_root,
            content,
        }
    }

    /// ファイル名を返す
    ///
    /// # Returns
    ///
    /// パスの最終要素。取得できない場合は空文字列
    pub fn file_name(&self) -> String {
        self.absolute_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    /// Vaultルートへの参照を返す
    pub fn vault_root(&self) -> &Path {
        &self.vault_root
    }
}
