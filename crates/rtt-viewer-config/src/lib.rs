//! Configuration and file management for rtt-viewer
//!
//! This crate provides:
//! - Platform directories for cache files (log output)
//! - Configuration file loading (TOML)
//! - Viewer configuration (ViewerConfig)

pub mod config_file;
pub mod paths;
pub mod viewer_config;

pub use config_file::{load_config_file, load_config_file_from};
pub use paths::{cache_dir, APP_NAME};
pub use viewer_config::ViewerConfig;
