//! # UploadTarget Value Object
//!
//! 1回のアップロードで解決される転送先情報

use std::path::PathBuf;

/// アップロードターゲット
///
/// ワークフロー実行ごとに導出される一時的なバリューオブジェクト。
/// 永続化されず、寿命は1回のワークフロー実行のみ。
#[derive(Debug, Clone)]
pub struct UploadTarget {
    /// ローカルの絶対パス
    pub local_absolute_path: PathBuf,
    /// Vaultルートからの相対フラグメント（`/`区切り）
    pub remote_fragment: String,
    /// ファイル名
    pub file_name: String,
}

impl UploadTarget {
    /// 新しいアップロードターゲットを作成
    pub fn new(local_absolute_path: PathBuf, remote_fragment: String, file_name: String) -> Self {
        Self {
            local_absolute_path,
            remote_fragment,
            file_name,
        }
    }

    /// リモートベースパスと結合して転送先のフルパスを返す
    ///
    /// # Arguments
    ///
    /// * `remote_base` - 設定のリモートベースパス
    ///
    /// # Returns
    ///
    /// `remote_base` とフラグメントを単一の `/` で結合したパス
    pub fn destination(&self, remote_base: &str) -> String {
        join_remote(remote_base, &self.remote_fragment)
    }

    /// 転送先の親ディレクトリを返す
    ///
    /// フラグメントにディレクトリ成分がない場合はベースパスのみ
    pub fn destination_dir(&self, remote_base: &str) -> String {
        match self.remote_fragment.rsplit_once('/') {
            Some((dir, _file)) => join_remote(remote_base, dir),
            None => remote_base.trim_end_matches('/').to_string(),
        }
    }
}

/// リモートパスの結合（区切りの重複を避ける）
fn join_remote(base: &str, fragment: &str) -> String {
    let base = base.trim_end_matches('/');
    let fragment = fragment.trim_start_matches('/');
    if base.is_empty() {
        fragment.to_string()
    } else if fragment.is_empty() {
        base.to_string()
    } else {
        format!("{}/{}", base, fragment)
    }
}
