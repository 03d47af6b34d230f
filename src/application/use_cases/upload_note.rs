//! # Upload Note Use Case
//!
//! ノートアップロードユースケース
//!
//! 1回の実行は `Resolving -> Connecting -> EnsuringDirectory ->
//! Transferring` と直線的に進み、どのフェーズからも失敗で終端する。
//! 実行間で状態を保持しない。同時実行は単一スロットのガードで拒否する。

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, error, info};
use uuid::Uuid;

use crate::application::dto::upload_report::UploadReport;
use crate::domain::entities::active_document::ActiveDocument;
use crate::domain::entities::connection_settings::ConnectionSettings;
use crate::domain::errors::UploadError;
use crate::domain::repositories::notifier::Notifier;
use crate::domain::repositories::transfer_client::{RemoteSession, TransferClient};
use crate::domain::services::remote_path::RemotePathService;

/// ワークフローのフェーズ（ログ出力用）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Resolving,
    Connecting,
    EnsuringDirectory,
    Transferring,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Resolving => "resolving",
            Phase::Connecting => "connecting",
            Phase::EnsuringDirectory => "ensuring-directory",
            Phase::Transferring => "transferring",
        };
        write!(f, "{}", name)
    }
}

/// 単一スロットの実行ガード
///
/// Dropで必ずスロットを解放する
struct RunSlot<'a>(&'a AtomicBool);

impl Drop for RunSlot<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// ノートアップロードユースケース
///
/// アクティブドキュメントを解決し、1つのリモートセッションを開き、
/// 転送先ディレクトリを保証してファイルを転送する。セッションは
/// 成否にかかわらず必ず1回だけ解放される。
pub struct UploadNoteUseCase<C: TransferClient, N: Notifier> {
    transfer_client: Arc<C>,
    notifier: Arc<N>,
    in_flight: AtomicBool,
}

impl<C: TransferClient, N: Notifier> UploadNoteUseCase<C, N> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `transfer_client` - セッションファクトリ
    /// * `notifier` - ユーザー向け通知
    pub fn new(transfer_client: Arc<C>, notifier: Arc<N>) -> Self {
        Self {
            transfer_client,
            notifier,
            in_flight: AtomicBool::new(false),
        }
    }

    /// アップロードワークフローを実行する
    ///
    /// 成功時はちょうど1件の成功通知、失敗時はちょうど1件のエラー通知を
    /// 発行する。
    ///
    /// # Arguments
    ///
    /// * `settings` - 接続設定（検証は行わない）
    /// * `document` - アクティブドキュメント（存在しない場合は `None`）
    ///
    /// # Errors
    ///
    /// いずれかのフェーズで失敗した場合に `UploadError` を返す
    pub async fn execute(
        &self,
        settings: &ConnectionSettings,
        document: Option<ActiveDocument>,
    ) -> Result<UploadReport, UploadError> {
        let result = self.run(settings, document).await;

        match &result {
            Ok(report) => {
                self.notifier.notify(&format!(
                    "Uploaded '{}' to '{}'",
                    report.file_name, report.destination
                ));
            }
            Err(err) => {
                self.notifier.alert(&err.user_message());
            }
        }

        result
    }

    async fn run(
        &self,
        settings: &ConnectionSettings,
        document: Option<ActiveDocument>,
    ) -> Result<UploadReport, UploadError> {
        // 単一スロットのガード: 実行中の再入は即座に拒否する
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(UploadError::UploadInProgress);
        }
        let _slot = RunSlot(&self.in_flight);

        let run_id = Uuid::new_v4().to_string();
        let document = document.ok_or(UploadError::NoActiveDocument)?;

        debug!("run {}: phase {}", run_id, Phase::Resolving);
        let target = RemotePathService::resolve(&document)?;
        let destination = target.destination(&settings.remote_path);
        let destination_dir = target.destination_dir(&settings.remote_path);

        info!(
            "run {}: uploading '{}' ({} bytes) to '{}'",
            run_id,
            target.file_name,
            document.content.len(),
            destination
        );

        // セッションはここ以降の全ての経路で1回だけ解放される
        let session = self.transfer_client.open_session();
        let outcome = Self::transfer(
            session.as_ref(),
            settings,
            &document,
            &destination_dir,
            &destination,
            &run_id,
        )
        .await;
        session.dispose().await;

        if let Err(err) = &outcome {
            error!("run {}: upload failed: {:?}", run_id, err);
        }
        outcome?;

        info!("run {}: upload complete", run_id);
        Ok(UploadReport::new(
            target.file_name,
            destination,
            document.content.len(),
            run_id,
        ))
    }

    async fn transfer(
        session: &dyn RemoteSession,
        settings: &ConnectionSettings,
        document: &ActiveDocument,
        destination_dir: &str,
        destination: &str,
        run_id: &str,
    ) -> Result<(), UploadError> {
        debug!("run {}: phase {}", run_id, Phase::Connecting);
        session
            .connect(settings)
            .await
            .map_err(|source| UploadError::Connection {
                host: settings.server_address.clone(),
                source,
            })?;

        // ディレクトリ作成の失敗は転送の失敗と区別しない
        debug!("run {}: phase {}", run_id, Phase::EnsuringDirectory);
        session
            .ensure_dir(destination_dir)
            .await
            .map_err(|source| UploadError::Transfer {
                destination: destination.to_string(),
                source,
            })?;

        debug!("run {}: phase {}", run_id, Phase::Transferring);
        session
            .put_file(&document.content, destination)
            .await
            .map_err(|source| UploadError::Transfer {
                destination: destination.to_string(),
                source,
            })?;

        Ok(())
    }
}
