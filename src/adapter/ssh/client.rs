//! SSH Transfer Client Implementation
//!
//! TransferClient / RemoteSession のssh2実装
//!
//! libssh2はブロッキングAPIのため、各操作は
//! `tokio::task::spawn_blocking` でラップする。ディレクトリ作成は
//! シェルコマンドではなくSFTPのmkdirで行い、パス中の任意文字が
//! シェルに解釈される余地をなくしている。

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, warn};
use ssh2::{OpenFlags, OpenType, Session};
use std::io::Write;
use std::net::TcpStream;
use std::path::Path;
use std::sync::Mutex;

use crate::domain::entities::connection_settings::ConnectionSettings;
use crate::domain::repositories::transfer_client::{RemoteSession, TransferClient};

/// SFTPで作成するディレクトリのパーミッション
const DIR_MODE: i32 = 0o755;
/// SFTPで作成するファイルのパーミッション
const FILE_MODE: i32 = 0o644;

/// ssh2ベースの転送クライアントファクトリ
pub struct Ssh2TransferClient;

impl Ssh2TransferClient {
    /// 新しいファクトリを作成
    pub fn new() -> Self {
        Self
    }
}

impl Default for Ssh2TransferClient {
    fn default() -> Self {
        Self::new()
    }
}

impl TransferClient for Ssh2TransferClient {
    fn open_session(&self) -> Box<dyn RemoteSession> {
        Box::new(Ssh2RemoteSession::new())
    }
}

/// ssh2ベースのリモートセッション
///
/// `connect` が成功するまで内部セッションは空。`dispose` は
/// セッションを取り出して切断するため、二重呼び出しは無害。
pub struct Ssh2RemoteSession {
    session: Mutex<Option<Session>>,
}

impl Ssh2RemoteSession {
    fn new() -> Self {
        Self {
            session: Mutex::new(None),
        }
    }

    /// 接続済みセッションのハンドルを取得する
    ///
    /// ssh2::SessionはArcベースでCloneが安価
    fn connected(&self) -> Result<Session> {
        self.session
            .lock()
            .expect("session lock poisoned")
            .as_ref()
            .cloned()
            .context("session is not connected")
    }

    /// `host` または `host:port` を接続先アドレスに正規化する
    fn connect_addr(server_address: &str) -> String {
        if server_address.contains(':') {
            server_address.to_string()
        } else {
            format!("{}:22", server_address)
        }
    }

    /// ハンドシェイクとパスワード認証（同期処理）
    fn connect_sync(addr: &str, username: &str, password: &str) -> Result<Session> {
        let tcp = TcpStream::connect(addr)
            .with_context(|| format!("Failed to connect to {}", addr))?;

        let mut session = Session::new().context("Failed to create SSH session")?;
        session.set_tcp_stream(tcp);
        session.handshake().context("SSH handshake failed")?;
        session
            .userauth_password(username, password)
            .with_context(|| format!("Password authentication failed for user '{}'", username))?;

        Ok(session)
    }

    /// 親ディレクトリを含めてmkdirし、既存は成功扱い（同期処理）
    fn ensure_dir_sync(session: &Session, remote_dir: &str) -> Result<()> {
        let sftp = session.sftp().context("Failed to open SFTP channel")?;

        let absolute = remote_dir.starts_with('/');
        let mut prefix = String::new();
        for segment in remote_dir.split('/').filter(|s| !s.is_empty()) {
            if prefix.is_empty() {
                if absolute {
                    prefix.push('/');
                }
            } else {
                prefix.push('/');
            }
            prefix.push_str(segment);

            let path = Path::new(&prefix);
            if sftp.stat(path).is_ok() {
                continue;
            }
            if let Err(err) = sftp.mkdir(path, DIR_MODE) {
                // 並行作成などでmkdirが失敗しても、存在していれば成功扱い
                if sftp.stat(path).is_err() {
                    return Err(err)
                        .with_context(|| format!("Failed to create remote directory '{}'", prefix));
                }
            }
        }

        Ok(())
    }

    /// バイト列をリモートへ書き込む（同期処理）
    fn put_file_sync(session: &Session, content: &[u8], remote_dest: &str) -> Result<()> {
        let sftp = session.sftp().context("Failed to open SFTP channel")?;

        let flags = OpenFlags::CREATE | OpenFlags::WRITE | OpenFlags::TRUNCATE;
        let mut remote_file = sftp
            .open_mode(Path::new(remote_dest), flags, FILE_MODE, OpenType::File)
            .with_context(|| format!("Failed to open remote file '{}'", remote_dest))?;

        remote_file
            .write_all(content)
            .with_context(|| format!("Failed to write remote file '{}'", remote_dest))?;

        Ok(())
    }
}

#[async_trait]
impl RemoteSession for Ssh2RemoteSession {
    async fn connect(&self, settings: &ConnectionSettings) -> Result<()> {
        let addr = Self::connect_addr(&settings.server_address);
        let username = settings.username.clone();
        let password = settings.password.clone();

        debug!("connecting to {}", addr);
        let session =
            tokio::task::spawn_blocking(move || Self::connect_sync(&addr, &username, &password))
                .await
                .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))??;

        *self.session.lock().expect("session lock poisoned") = Some(session);
        Ok(())
    }

    async fn ensure_dir(&self, remote_dir: &str) -> Result<()> {
        let session = self.connected()?;
        let remote_dir = remote_dir.to_string();

        tokio::task::spawn_blocking(move || Self::ensure_dir_sync(&session, &remote_dir))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))?
    }

    async fn put_file(&self, content: &[u8], remote_dest: &str) -> Result<()> {
        let session = self.connected()?;
        let content = content.to_vec();
        let remote_dest = remote_dest.to_string();

        tokio::task::spawn_blocking(move || Self::put_file_sync(&session, &content, &remote_dest))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))?
    }

    async fn dispose(&self) {
        let session = self.session.lock().expect("session lock poisoned").take();

        if let Some(session) = session {
            let result = tokio::task::spawn_blocking(move || {
                session.disconnect(None, "closing session", None)
            })
            .await;

            match result {
                Ok(Err(err)) => warn!("error while disconnecting session: {}", err),
                Err(err) => warn!("failed to join disconnect task: {}", err),
                Ok(Ok(())) => debug!("session released"),
            }
        }
    }
}
