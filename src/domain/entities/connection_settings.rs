//! # ConnectionSettings Entity
//!
//! リモートサーバーへの接続設定

use serde::{Deserialize, Serialize};
use std::fmt;

/// 接続設定
///
/// SCPアップロードに必要な4つの設定値。全フィールドが空文字列を
/// デフォルトとし、検証は行わない（不正な値は転送クライアント側で
/// 失敗する）。
///
/// パスワードは平文で永続化される。これは意図的なトレードオフであり、
/// `Debug` 出力およびユーザー向け表示では必ずマスクされる。
#[derive(Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ConnectionSettings {
    /// サーバーアドレス（`host` または `host:port`、ポート省略時は22）
    #[serde(default)]
    pub server_address: String,
    /// SSH認証ユーザー名
    #[serde(default)]
    pub username: String,
    /// SSH認証パスワード
    #[serde(default)]
    pub password: String,
    /// アップロード先のリモートベースパス
    #[serde(default)]
    pub remote_path: String,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            server_address: String::new(),
            username: String::new(),
            password: String::new(),
            remote_path: String::new(),
        }
    }
}

impl ConnectionSettings {
    /// パスワードをマスクした表示用文字列を返す
    pub fn masked_password(&self) -> &'static str {
        if self.password.is_empty() {
            "(not set)"
        } else {
            "********"
        }
    }
}

// パスワードをログに漏らさないため、Debugは手書き
impl fmt::Debug for ConnectionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionSettings")
            .field("server_address", &self.server_address)
            .field("username", &self.username)
            .field("password", &self.masked_password())
            .field("remote_path", &self.remote_path)
            .finish()
    }
}
