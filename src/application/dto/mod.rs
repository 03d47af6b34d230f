//! # Application DTOs
//!
//! レイヤ間のデータ受け渡し用オブジェクト

pub mod upload_report;
