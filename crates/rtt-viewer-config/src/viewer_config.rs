//! Viewer configuration
//!
//! Configuration loaded from .rtt-viewer.toml file.

use serde::{Deserialize, Serialize};

/// Viewer configuration loaded from .rtt-viewer.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ViewerConfig {
    /// Tail this file instead of reading stdin
    #[serde(default)]
    pub source_file: Option<String>,

    /// Bound for the raw and pause buffers, `0` for unbounded
    #[serde(default = "default_max_lines")]
    pub max_lines: Option<usize>,

    /// UI frame interval; also how often queued lines are processed
    #[serde(default = "default_refresh_interval_ms")]
    pub refresh_interval_ms: u64,

    /// How often a tailed file is checked for new bytes
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Remove ANSI escape sequences from incoming text
    #[serde(default = "default_strip_ansi")]
    pub strip_ansi: bool,

    /// Lines kept by the terminal display
    #[serde(default = "default_scrollback")]
    pub scrollback: usize,
}

fn default_max_lines() -> Option<usize> {
    Some(100_000)
}

fn default_refresh_interval_ms() -> u64 {
    100
}

fn default_poll_interval_ms() -> u64 {
    100
}

fn default_strip_ansi() -> bool {
    true
}

fn default_scrollback() -> usize {
    10_000
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            source_file: None,
            max_lines: default_max_lines(),
            refresh_interval_ms: default_refresh_interval_ms(),
            poll_interval_ms: default_poll_interval_ms(),
            strip_ansi: default_strip_ansi(),
            scrollback: default_scrollback(),
        }
    }
}

impl ViewerConfig {
    /// Load config from CWD first, then home directory, or use defaults
    pub fn load() -> Self {
        match crate::load_config_file() {
            Some(content) => Self::parse(&content),
            None => {
                log::debug!("Using default viewer config");
                Self::default()
            }
        }
    }

    /// Line bound for the stream controller
    pub fn line_bound(&self) -> Option<usize> {
        self.max_lines.filter(|&n| n > 0)
    }

    /// Parse TOML content, falling back to defaults on error
    pub fn parse(content: &str) -> Self {
        match toml::from_str(content) {
            Ok(config) => {
                log::info!("Loaded viewer config from file");
                config
            }
            Err(e) => {
                log::warn!("Failed to parse config file: {}", e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ViewerConfig::default();
        assert_eq!(config.source_file, None);
        assert_eq!(config.max_lines, Some(100_000));
        assert_eq!(config.refresh_interval_ms, 100);
        assert!(config.strip_ansi);
        assert_eq!(config.scrollback, 10_000);
    }

    #[test]
    fn test_config_deserialize() {
        let toml = r#"
            source_file = "/tmp/rtt.log"
            max_lines = 500
            strip_ansi = false
        "#;
        let config: ViewerConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.source_file.as_deref(), Some("/tmp/rtt.log"));
        assert_eq!(config.max_lines, Some(500));
        assert!(!config.strip_ansi);
        // Other fields should use defaults
        assert_eq!(config.poll_interval_ms, 100);
    }

    #[test]
    fn test_zero_bound_means_unbounded() {
        let config: ViewerConfig = toml::from_str("max_lines = 0").unwrap();
        assert_eq!(config.line_bound(), None);
        assert_eq!(ViewerConfig::default().line_bound(), Some(100_000));
    }

    #[test]
    fn test_empty_file_is_default() {
        let config: ViewerConfig = toml::from_str("").unwrap();
        assert_eq!(config, ViewerConfig::default());
    }

    #[test]
    fn test_invalid_content_falls_back() {
        let config = ViewerConfig::parse("max_lines = \"lots\"");
        assert_eq!(config, ViewerConfig::default());
    }
}
