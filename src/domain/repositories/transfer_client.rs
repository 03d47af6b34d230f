//! # Transfer Client Traits
//!
//! リモート転送クライアントの抽象化
//!
//! SSH/SFTPの具体的な実装はAdapter層が提供する。ワークフローは
//! セッションを不透明なケイパビリティとして扱う。

use anyhow::Result;
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::domain::entities::connection_settings::ConnectionSettings;

/// リモートセッション
///
/// 1回のワークフロー実行が排他的に所有する接続ハンドル。
/// `dispose` は接続の成否にかかわらず、実行の終端で必ず1回だけ
/// 呼び出される。
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RemoteSession: Send + Sync {
    /// リモートホストへ接続して認証する
    ///
    /// # Errors
    ///
    /// 接続または認証に失敗した場合にエラーを返す
    async fn connect(&self, settings: &ConnectionSettings) -> Result<()>;

    /// リモートディレクトリを（親ごと）作成する
    ///
    /// 既に存在する場合は成功として扱う。シェルを介さない
    /// SFTP APIで実装すること。
    async fn ensure_dir(&self, remote_dir: &str) -> Result<()>;

    /// バイト列をリモートパスへ書き込む
    ///
    /// 既存ファイルは確認なしで上書きされる。
    async fn put_file(&self, content: &[u8], remote_dest: &str) -> Result<()>;

    /// セッションを解放する
    ///
    /// 失敗してもエラーを返さない（ログのみ）。二重呼び出しは
    /// 安全でなければならない。
    async fn dispose(&self);
}

/// 転送クライアントファクトリ
///
/// 実行ごとに未接続のセッションを生成する
#[cfg_attr(test, automock)]
pub trait TransferClient: Send + Sync {
    /// 新しい未接続セッションを作成
    fn open_session(&self) -> Box<dyn RemoteSession>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> ConnectionSettings {
        ConnectionSettings {
            server_address: "h".to_string(),
            username: "u".to_string(),
            password: "p".to_string(),
            remote_path: "/r".to_string(),
        }
    }

    #[tokio::test]
    async fn test_session_consumed_as_opaque_capability() {
        let mut client = MockTransferClient::new();
        client.expect_open_session().times(1).returning(|| {
            let mut session = MockRemoteSession::new();
            session.expect_connect().times(1).returning(|_| Ok(()));
            session
                .expect_ensure_dir()
                .withf(|dir| dir == "/r/notes")
                .times(1)
                .returning(|_| Ok(()));
            session
                .expect_put_file()
                .withf(|content, dest| content == b"x" && dest == "/r/notes/a.md")
                .times(1)
                .returning(|_, _| Ok(()));
            session.expect_dispose().times(1).returning(|| ());
            Box::new(session)
        });

        let session = client.open_session();
        session.connect(&settings()).await.unwrap();
        session.ensure_dir("/r/notes").await.unwrap();
        session.put_file(b"x", "/r/notes/a.md").await.unwrap();
        session.dispose().await;
    }

    #[tokio::test]
    async fn test_mocked_connect_failure_propagates() {
        let mut session = MockRemoteSession::new();
        session
            .expect_connect()
            .returning(|_| anyhow::bail!("authentication failed"));

        let err = session.connect(&settings()).await.unwrap_err();
        assert!(err.to_string().contains("authentication failed"));
    }
}
