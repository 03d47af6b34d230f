//! # Adapter Layer
//!
//! 外部システム（SSHサーバー, ファイルシステム, コンソール）との統合

pub mod notify;
pub mod repositories;
pub mod ssh;
