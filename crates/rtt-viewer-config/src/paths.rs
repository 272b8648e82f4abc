//! Cache directory location
//!
//! Uses XDG directories via `dirs` crate.
//!
//! Platform-specific locations:
//! - Linux: `~/.cache/rtt-viewer/`
//! - macOS: `~/Library/Caches/rtt-viewer/`
//! - Windows: `%LOCALAPPDATA%\rtt-viewer\`

use anyhow::{Context, Result};
use std::path::PathBuf;

pub const APP_NAME: &str = "rtt-viewer";

/// Get the application cache directory, creating it if needed
pub fn cache_dir() -> Result<PathBuf> {
    let base = dirs::cache_dir().context("Could not determine cache directory")?;
    let dir = base.join(APP_NAME);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Could not create {}", dir.display()))?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_dir_exists() {
        let Ok(dir) = cache_dir() else {
            // No home directory in this environment
            return;
        };
        assert!(dir.exists());
        assert!(dir.ends_with(APP_NAME));
    }
}
