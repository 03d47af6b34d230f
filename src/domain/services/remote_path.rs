//! # Remote Path Service
//!
//! リモート相対フラグメントの解決サービス
//!
//! Vaultルート名の部分文字列検索ではなく、ルートの絶対パスに対する
//! 構造的なプレフィックス除去でフラグメントを導出する。ルート名と
//! 同名のフォルダがパスの途中に現れても誤解決しない。

use std::path::{Component, Path};

use crate::domain::entities::active_document::ActiveDocument;
use crate::domain::entities::upload_target::UploadTarget;
use crate::domain::errors::UploadError;

/// リモートパス解決サービス
pub struct RemotePathService;

impl RemotePathService {
    /// アクティブドキュメントからアップロードターゲットを導出する
    ///
    /// # Errors
    ///
    /// ドキュメントがVaultルートの配下にない場合に
    /// `UploadError::PathResolution` を返す
    pub fn resolve(document: &ActiveDocument) -> Result<UploadTarget, UploadError> {
        let fragment = Self::resolve_fragment(&document.absolute_path, document.vault_root())?;
        Ok(UploadTarget::new(
            document.absolute_path.clone(),
            fragment,
            document.file_name(),
        ))
    }

    /// 絶対パスからVaultルート配下の相対フラグメントを計算する
    ///
    /// # Arguments
    ///
    /// * `absolute` - ドキュメントの絶対パス
    /// * `vault_root` - Vaultルートの絶対パス
    ///
    /// # Returns
    ///
    /// `/` 区切りに正規化された相対フラグメント
    pub fn resolve_fragment(absolute: &Path, vault_root: &Path) -> Result<String, UploadError> {
        let relative = absolute
            .strip_prefix(vault_root)
            .map_err(|_| Self::resolution_error(absolute, vault_root))?;

        let segments: Vec<String> = relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(s) => Some(s.to_string_lossy().to_string()),
                _ => None,
            })
            .collect();

        // ルート自身はアップロード対象にならない
        if segments.is_empty() {
            return Err(Self::resolution_error(absolute, vault_root));
        }

        Ok(segments.join("/"))
    }

    fn resolution_error(absolute: &Path, vault_root: &Path) -> UploadError {
        UploadError::PathResolution {
            path: absolute.display().to_string(),
            root: vault_root.display().to_string(),
        }
    }
}
