//! # Use Cases
//!
//! アプリケーションのユースケース
//!
//! - **upload_note**: アクティブノートのアップロードワークフロー

pub mod upload_note;
