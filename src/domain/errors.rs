//! # Upload Error Taxonomy
//!
//! アップロードワークフローのエラー分類
//!
//! 全てのエラーは1回の実行に対して終端的であり、自動リトライは行わない。

use thiserror::Error;

/// アップロードエラー
///
/// ワークフローの各フェーズで発生しうる失敗の分類。
/// ディレクトリ作成の失敗は転送の失敗と区別されず、どちらも
/// `Transfer` として扱われる。
#[derive(Debug, Error)]
pub enum UploadError {
    /// アクティブドキュメントが存在しない
    #[error("no active document to upload")]
    NoActiveDocument,

    /// ドキュメントのパスをVaultルートから解決できない
    #[error("cannot resolve '{path}' against vault root '{root}'")]
    PathResolution { path: String, root: String },

    /// 接続または認証の失敗
    #[error("connection to '{host}' failed")]
    Connection {
        host: String,
        #[source]
        source: anyhow::Error,
    },

    /// ディレクトリ作成または転送の失敗
    #[error("transfer to '{destination}' failed")]
    Transfer {
        destination: String,
        #[source]
        source: anyhow::Error,
    },

    /// 別のアップロードが実行中
    #[error("an upload is already in progress")]
    UploadInProgress,
}

impl UploadError {
    /// ユーザー向けの短い説明を返す
    ///
    /// 下位のトランスポートエラー詳細はログにのみ出力され、
    /// 通知には含めない。
    pub fn user_message(&self) -> String {
        match self {
            Self::NoActiveDocument => "No active note to upload".to_string(),
            Self::PathResolution { path, root } => {
                format!("Could not resolve '{}' below vault root '{}'", path, root)
            }
            Self::Connection { host, .. } => format!("Could not connect to '{}'", host),
            Self::Transfer { destination, .. } => {
                format!("Upload to '{}' failed", destination)
            }
            Self::UploadInProgress => "An upload is already in progress".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_error_message() {
        let err = UploadError::Connection {
            host: "example.com".to_string(),
            source: anyhow::anyhow!("auth failed"),
        };
        assert_eq!(err.to_string(), "connection to 'example.com' failed");
        assert!(err.user_message().contains("example.com"));
    }

    #[test]
    fn test_transfer_error_source_chain() {
        let err = UploadError::Transfer {
            destination: "/r/a.md".to_string(),
            source: anyhow::anyhow!("sftp write failed"),
        };
        let source = std::error::Error::source(&err);
        assert!(source.is_some());
        assert_eq!(source.unwrap().to_string(), "sftp write failed");
    }

    #[test]
    fn test_user_messages_have_no_transport_detail() {
        let err = UploadError::Connection {
            host: "h".to_string(),
            source: anyhow::anyhow!("ECONNREFUSED 10.0.0.1:22"),
        };
        assert!(!err.user_message().contains("ECONNREFUSED"));
    }
}
