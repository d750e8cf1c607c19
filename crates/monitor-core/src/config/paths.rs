//! Config path resolution helpers.

use std::path::{Path, PathBuf};

/// File name looked up inside the config directory.
pub const CONFIG_FILE_NAME: &str = "monitor.toml";

/// `<config_dir>/monitor/monitor.toml`
pub fn config_path_in(config_dir: &Path) -> PathBuf {
    config_dir.join("monitor").join(CONFIG_FILE_NAME)
}

/// Default config location under the platform config directory.
pub fn default_config_path() -> anyhow::Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    Ok(config_path_in(&config_dir))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nests_under_monitor_directory() {
        let path = config_path_in(Path::new("/etc/xdg"));
        assert_eq!(path, PathBuf::from("/etc/xdg/monitor/monitor.toml"));
    }
}
