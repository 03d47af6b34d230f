//! # Adapter Repositories
//!
//! Repository traitの具体実装

pub mod fs_workspace_provider;
pub mod json_settings_repository;
