//! Cross-platform directory path resolution
//!
//! Resolves the platform-appropriate configuration directory.
//! - Linux/macOS: XDG Base Directory specification (~/.config)
//! - Windows: Known Folder API (AppData\Roaming)

use std::path::PathBuf;

/// Get the configuration directory path
///
/// Checks KUBETOPO_CONFIG_DIR environment variable first, then falls back to:
/// - Unix (Linux/macOS): XDG_CONFIG_HOME/kubetopo or ~/.config/kubetopo
/// - Windows: %APPDATA%\kubetopo\config
pub fn config_dir() -> PathBuf {
    std::env::var("KUBETOPO_CONFIG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            #[cfg(windows)]
            {
                // On Windows, use ProjectDirs for proper AppData paths
                use directories::ProjectDirs;
                ProjectDirs::from("", "", "kubetopo")
                    .map(|dirs| dirs.config_dir().to_path_buf())
                    .unwrap_or_else(|| PathBuf::from(".").join(".config").join("kubetopo"))
            }
            #[cfg(not(windows))]
            {
                // On Unix (Linux/macOS), use XDG_CONFIG_HOME or $HOME/.config
                use directories::BaseDirs;
                std::env::var("XDG_CONFIG_HOME")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| {
                        BaseDirs::new()
                            .map(|dirs| dirs.home_dir().join(".config"))
                            .unwrap_or_else(|| PathBuf::from(".").join(".config"))
                    })
                    .join("kubetopo")
            }
        })
}

/// Get the configuration file path
pub fn root_config_path() -> PathBuf {
    config_dir().join("config.yaml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file_lives_in_config_dir() {
        let path = root_config_path();
        assert!(path.starts_with(config_dir()));
        assert_eq!(path.file_name().unwrap(), "config.yaml");
    }
}
