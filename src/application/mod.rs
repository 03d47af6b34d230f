//! # Application Layer
//!
//! アプリケーション固有のビジネスフロー（ユースケース）
//!
//! Domain層のtraitにのみ依存し、具体的なSSHクライアントや
//! ファイルシステムについては何も知らない。

pub mod dto;
pub mod use_cases;
