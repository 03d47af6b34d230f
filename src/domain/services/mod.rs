//! # Domain Services
//!
//! ビジネスルールを実装するDomain Service

pub mod remote_path;
