//! Console Notifier Implementation
//!
//! Notifierのコンソール実装

use crate::domain::repositories::notifier::Notifier;

/// コンソールへのユーザー通知
///
/// 成功は標準出力、エラーは標準エラーに1行で出す
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    /// 新しい通知を作成
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str) {
        println!("✓ {}", message);
    }

    fn alert(&self, message: &str) {
        eprintln!("⚠ {}", message);
    }
}
