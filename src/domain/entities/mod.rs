//! # Domain Entities
//!
//! ビジネスエンティティの定義

pub mod active_document;
pub mod connection_settings;
pub mod upload_target;
