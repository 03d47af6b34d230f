//! # SSH Adapter
//!
//! ssh2ベースのリモート転送クライアント実装

pub mod client;
