//! Upload Flow Integration Tests
//!
//! 実ファイルシステム上のVaultとスタブ転送クライアントを使った
//! エンドツーエンドのアップロードフロー検証

use anyhow::Result;
use async_trait::async_trait;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

use notescp::application::use_cases::upload_note::UploadNoteUseCase;
use notescp::domain::entities::connection_settings::ConnectionSettings;
use notescp::domain::errors::UploadError;
use notescp::domain::repositories::notifier::Notifier;
use notescp::domain::repositories::transfer_client::{RemoteSession, TransferClient};
use notescp::domain::repositories::workspace_provider::WorkspaceProvider;
use notescp::adapter::repositories::fs_workspace_provider::FsWorkspaceProvider;

/// スタブ転送クライアント: リモートへの書き込みをメモリに記録する
#[derive(Default)]
struct InMemoryRemote {
    connect_ok: bool,
    files: Mutex<Vec<(String, Vec<u8>)>>,
    dirs: Mutex<Vec<String>>,
    disposes: AtomicUsize,
}

struct InMemorySession(Arc<InMemoryRemote>);

#[async_trait]
impl RemoteSession for InMemorySession {
    async fn connect(&self, _settings: &ConnectionSettings) -> Result<()> {
        if self.0.connect_ok {
            Ok(())
        } else {
            anyhow::bail!("connection refused")
        }
    }

    async fn ensure_dir(&self, remote_dir: &str) -> Result<()> {
        self.0.dirs.lock().unwrap().push(remote_dir.to_string());
        Ok(())
    }

    async fn put_file(&self, content: &[u8], remote_dest: &str) -> Result<()> {
        self.0
            .files
            .lock()
            .unwrap()
            .push((remote_dest.to_string(), content.to_vec()));
        Ok(())
    }

    async fn dispose(&self) {
        self.0.disposes.fetch_add(1, Ordering::SeqCst);
    }
}

struct InMemoryClient(Arc<InMemoryRemote>);

impl TransferClient for InMemoryClient {
    fn open_session(&self) -> Box<dyn RemoteSession> {
        Box::new(InMemorySession(self.0.clone()))
    }
}

#[derive(Default)]
struct SilentNotifier {
    notices: Mutex<Vec<String>>,
    alerts: Mutex<Vec<String>>,
}

impl Notifier for SilentNotifier {
    fn notify(&self, message: &str) {
        self.notices.lock().unwrap().push(message.to_string());
    }

    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }
}

/// テスト用のVaultディレクトリとノートを作成
fn create_vault(dir: &Path) -> std::path::PathBuf {
    let vault = dir.join("Vault");
    fs::create_dir_all(vault.join(".obsidian")).unwrap();
    fs::create_dir_all(vault.join("notes")).unwrap();
    fs::write(vault.join("notes/a.md"), "# hello from the vault").unwrap();
    vault
}

fn test_settings() -> ConnectionSettings {
    ConnectionSettings {
        server_address: "h".to_string(),
        username: "u".to_string(),
        password: "p".to_string(),
        remote_path: "/r".to_string(),
    }
}

#[tokio::test]
async fn test_upload_mirrors_vault_structure_remotely() {
    let temp_dir = TempDir::new().unwrap();
    let vault = create_vault(temp_dir.path());

    let remote = Arc::new(InMemoryRemote {
        connect_ok: true,
        ..Default::default()
    });
    let notifier = Arc::new(SilentNotifier::default());
    let use_case = UploadNoteUseCase::new(Arc::new(InMemoryClient(remote.clone())), notifier.clone());

    let provider = FsWorkspaceProvider::new(Some(vault.join("notes/a.md")));
    let document = provider.active_document().await.unwrap();

    let report = use_case.execute(&test_settings(), document).await.unwrap();

    // Vaultからの相対構造がリモート側に再現される
    assert_eq!(report.destination, "/r/notes/a.md");
    assert_eq!(remote.dirs.lock().unwrap().as_slice(), ["/r/notes".to_string()]);

    let files = remote.files.lock().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].0, "/r/notes/a.md");
    assert_eq!(files[0].1, b"# hello from the vault");

    assert_eq!(remote.disposes.load(Ordering::SeqCst), 1);
    assert_eq!(notifier.notices.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_upload_twice_overwrites_same_destination() {
    let temp_dir = TempDir::new().unwrap();
    let vault = create_vault(temp_dir.path());

    let remote = Arc::new(InMemoryRemote {
        connect_ok: true,
        ..Default::default()
    });
    let use_case = UploadNoteUseCase::new(
        Arc::new(InMemoryClient(remote.clone())),
        Arc::new(SilentNotifier::default()),
    );

    for _ in 0..2 {
        let provider = FsWorkspaceProvider::new(Some(vault.join("notes/a.md")));
        let document = provider.active_document().await.unwrap();
        use_case.execute(&test_settings(), document).await.unwrap();
    }

    // 冪等性: 同一入力は同一の転送先・同一内容
    let files = remote.files.lock().unwrap();
    assert_eq!(files.len(), 2);
    assert_eq!(files[0], files[1]);
}

#[tokio::test]
async fn test_connect_failure_still_releases_session() {
    let temp_dir = TempDir::new().unwrap();
    let vault = create_vault(temp_dir.path());

    let remote = Arc::new(InMemoryRemote {
        connect_ok: false,
        ..Default::default()
    });
    let notifier = Arc::new(SilentNotifier::default());
    let use_case = UploadNoteUseCase::new(Arc::new(InMemoryClient(remote.clone())), notifier.clone());

    let provider = FsWorkspaceProvider::new(Some(vault.join("notes/a.md")));
    let document = provider.active_document().await.unwrap();

    let result = use_case.execute(&test_settings(), document).await;

    assert!(matches!(result, Err(UploadError::Connection { .. })));
    assert_eq!(remote.disposes.load(Ordering::SeqCst), 1);
    assert!(remote.files.lock().unwrap().is_empty());
    assert_eq!(notifier.alerts.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_note_without_vault_marker_uploads_bare_file_name() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().join("loose");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("c.md"), "standalone").unwrap();

    let remote = Arc::new(InMemoryRemote {
        connect_ok: true,
        ..Default::default()
    });
    let use_case = UploadNoteUseCase::new(
        Arc::new(InMemoryClient(remote.clone())),
        Arc::new(SilentNotifier::default()),
    );

    let provider = FsWorkspaceProvider::new(Some(dir.join("c.md")));
    let document = provider.active_document().await.unwrap();

    let report = use_case.execute(&test_settings(), document).await.unwrap();

    // マーカーなしのフォールバック: ファイル名のみが転送される
    assert_eq!(report.destination, "/r/c.md");
    assert_eq!(remote.dirs.lock().unwrap().as_slice(), ["/r".to_string()]);
}
