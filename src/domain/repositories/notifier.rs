//! # Notifier Trait
//!
//! ユーザー向け通知の抽象化
//!
//! 診断ログ（`log` クレート）とは別系統の、一時的なユーザー向け
//! 通知。成功・失敗の報告に使う。

/// 通知インターフェース
pub trait Notifier: Send + Sync {
    /// 成功・情報の通知
    fn notify(&self, message: &str);

    /// エラーの通知
    fn alert(&self, message: &str);
}
