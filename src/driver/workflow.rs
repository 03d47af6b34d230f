//! Workflow Orchestration
//!
//! ワークフローのオーケストレーション

use anyhow::Result;
use log::info;

use std::path::PathBuf;
use std::sync::Arc;

use crate::adapter::notify::ConsoleNotifier;
use crate::adapter::repositories::fs_workspace_provider::FsWorkspaceProvider;
use crate::adapter::repositories::json_settings_repository::JsonSettingsRepository;
use crate::adapter::ssh::client::Ssh2TransferClient;
use crate::application::use_cases::upload_note::UploadNoteUseCase;
use crate::domain::entities::connection_settings::ConnectionSettings;
use crate::domain::repositories::settings_repository::SettingsRepository;
use crate::domain::repositories::workspace_provider::WorkspaceProvider;

use super::cli::{Args, Command, ConfigAction, SettingsField};

/// 設定フィールドを更新した新しい設定を返す
pub fn apply_field(settings: &ConnectionSettings, field: SettingsField, value: &str) -> ConnectionSettings {
    let mut updated = settings.clone();
    match field {
        SettingsField::ServerAddress => updated.server_address = value.to_string(),
        SettingsField::Username => updated.username = value.to_string(),
        SettingsField::Password => updated.password = value.to_string(),
        SettingsField::RemotePath => updated.remote_path = value.to_string(),
    }
    updated
}

/// SCP Upload Workflow
pub struct ScpUploadWorkflow {
    settings_repository: Arc<JsonSettingsRepository>,
    use_case: Arc<UploadNoteUseCase<Ssh2TransferClient, ConsoleNotifier>>,
}

impl ScpUploadWorkflow {
    /// Create a new workflow instance with dependency injection
    pub fn new() -> Self {
        // Repository / adapter implementations
        let transfer_client = Arc::new(Ssh2TransferClient::new());
        let notifier = Arc::new(ConsoleNotifier::new());
        let settings_repository = Arc::new(JsonSettingsRepository::new());

        // Use Case construction
        let use_case = Arc::new(UploadNoteUseCase::new(transfer_client, notifier));

        Self {
            settings_repository,
            use_case,
        }
    }

    /// Execute the requested command
    pub async fn execute(&self, args: Args) -> Result<()> {
        match args.command {
            Command::Upload { file } => self.upload(&args.config, file).await,
            Command::Config { action } => self.configure(&args.config, action).await,
        }
    }

    /// アップロードコマンド
    async fn upload(&self, config_path: &str, file: Option<PathBuf>) -> Result<()> {
        info!("Starting SCP upload...");

        let settings = self.settings_repository.load(config_path).await?;
        // DebugはパスワードをマスクするのでそのままログOK
        info!("Using settings: {:?}", settings);

        let provider = FsWorkspaceProvider::new(file);
        let document = provider.active_document().await?;

        let report = self.use_case.execute(&settings, document).await?;

        info!(
            "run {} finished at {} ({} bytes)",
            report.run_id,
            report.finished_at.to_rfc3339(),
            report.bytes_sent
        );

        Ok(())
    }

    /// 設定コマンド（設定パネルのCLI版）
    async fn configure(&self, config_path: &str, action: ConfigAction) -> Result<()> {
        match action {
            ConfigAction::Show => {
                let settings = self.settings_repository.load(config_path).await?;
                println!("✓ Settings from {}:", config_path);
                println!("  Server address: {}", settings.server_address);
                println!("  Username: {}", settings.username);
                println!("  Password: {}", settings.masked_password());
                println!("  Remote path: {}", settings.remote_path);
            }
            ConfigAction::Set { field, value } => {
                // 1フィールドの編集でもレコード全体を保存する
                let settings = self.settings_repository.load(config_path).await?;
                let updated = apply_field(&settings, field, &value);
                self.settings_repository.save(config_path, &updated).await?;
                println!("✓ Updated {}", field);
            }
        }
        Ok(())
    }
}

impl Default for ScpUploadWorkflow {
    fn default() -> Self {
        Self::new()
    }
}
