use std::{env, path::Path, path::PathBuf};

pub const CONFIG_FILE: &str = ".rtt-viewer.toml";

/// Load config file content from CWD first, then home directory
///
/// Searches for .rtt-viewer.toml in:
/// 1. Current working directory
/// 2. Home directory
///
/// Returns the file content if found, None otherwise.
pub fn load_config_file() -> Option<String> {
    let mut candidates = vec![PathBuf::from(".")];
    if let Some(home) = env::var_os("HOME") {
        candidates.push(PathBuf::from(home));
    }
    load_config_file_from(&candidates)
}

/// Load the first config file found in `dirs`, in order
pub fn load_config_file_from<P: AsRef<Path>>(dirs: &[P]) -> Option<String> {
    for dir in dirs {
        let path = dir.as_ref().join(CONFIG_FILE);
        if let Ok(content) = std::fs::read_to_string(&path) {
            log::debug!("Loaded config from {}", path.display());
            return Some(content);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_directory_wins() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        std::fs::write(first.path().join(CONFIG_FILE), "max_lines = 1").unwrap();
        std::fs::write(second.path().join(CONFIG_FILE), "max_lines = 2").unwrap();

        let content = load_config_file_from(&[first.path(), second.path()]);
        assert_eq!(content.as_deref(), Some("max_lines = 1"));
    }

    #[test]
    fn test_falls_through_missing_files() {
        let empty = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        std::fs::write(second.path().join(CONFIG_FILE), "strip_ansi = false").unwrap();

        let content = load_config_file_from(&[empty.path(), second.path()]);
        assert_eq!(content.as_deref(), Some("strip_ansi = false"));
    }

    #[test]
    fn test_nothing_found() {
        let empty = tempfile::tempdir().unwrap();
        assert_eq!(load_config_file_from(&[empty.path()]), None);
    }
}
