//! # Upload Report DTO
//!
//! アップロード結果のサマリー

use chrono::{DateTime, Utc};

/// アップロードレポート
///
/// 1回のワークフロー実行の成功結果
#[derive(Debug, Clone)]
pub struct UploadReport {
    /// アップロードされたファイル名
    pub file_name: String,
    /// リモートの転送先フルパス
    pub destination: String,
    /// 転送されたバイト数
    pub bytes_sent: usize,
    /// 実行ID
    pub run_id: String,
    /// 完了時刻（UTC）
    pub finished_at: DateTime<Utc>,
}

impl UploadReport {
    /// 新しいレポートを作成
    pub fn new(file_name: String, destination: String, bytes_sent: usize, run_id: String) -> Self {
        Self {
            file_name,
            destination,
            bytes_sent,
            run_id,
            finished_at: Utc::now(),
        }
    }
}
