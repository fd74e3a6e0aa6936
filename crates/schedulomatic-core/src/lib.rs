//! Core types for the Schedulomatic scheduling suite.
//!
//! This crate contains shared data structures used across the workspace:
//! - Class match and selection types for the lookup
//! - Toast notification data
//! - Label catalogs
//! - Configuration types
//! - Error types

mod class;
mod config;
mod error;
mod labels;
mod toast;

pub use class::{ClassMatch, Selection, SelectionChange};
pub use config::{
    config_dir, config_path, ensure_config_dir, AppConfig, LookupConfig, SchedulerConfig,
};
pub use error::{ConfigError, DirectoryError, ScheduleError};
pub use labels::{FormLabels, LookupLabels};
pub use toast::{Toast, ToastMode, ToastVariant};
