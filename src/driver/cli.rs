//! CLI Argument Parsing
//!
//! CLIの引数解析

use clap::{Parser, Subcommand, ValueEnum};
use std::fmt;
use std::path::PathBuf;

/// アクティブノートをSCP/SFTPでリモートサーバーへアップロードするCLI
#[derive(Parser, Debug, Clone)]
#[command(name = "notescp")]
#[command(about = "Upload the current note to a remote server over SSH", long_about = None)]
pub struct Args {
    /// Settings file path
    #[arg(short, long, default_value = "./.notescp/settings.json")]
    pub config: String,

    #[command(subcommand)]
    pub command: Command,
}

/// サブコマンド
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Upload the current file via SCP
    Upload {
        /// The note to upload (treated as the active document)
        file: Option<PathBuf>,
    },
    /// Show or edit connection settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// 設定サブコマンド
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Print the persisted settings (password masked)
    Show,
    /// Set one field and persist the full settings record
    Set {
        /// Field to update
        field: SettingsField,
        /// New value
        value: String,
    },
}

/// 設定フィールド
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    ServerAddress,
    Username,
    Password,
    RemotePath,
}

impl fmt::Display for SettingsField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SettingsField::ServerAddress => "server-address",
            SettingsField::Username => "username",
            SettingsField::Password => "password",
            SettingsField::RemotePath => "remote-path",
        };
        write!(f, "{}", name)
    }
}
