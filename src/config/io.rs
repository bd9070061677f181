//! Configuration file I/O operations

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;

use super::Config;

impl Config {
    /// Get the global config directory path (~/.learnit/)
    pub fn global_config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".learnit")
    }

    /// Get the global config file path (~/.learnit/config.toml)
    pub fn global_config_path() -> PathBuf {
        Self::global_config_dir().join("config.toml")
    }

    /// Load the global configuration, using defaults if none exists
    pub fn load() -> Result<Self> {
        Self::from_file_or_default(&Self::global_config_path())
    }

    /// Write the config to `path` as commented TOML.
    ///
    /// Concurrent `learnit init` runs are serialized through `<path>.lock`,
    /// and readers only ever see a complete file.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let body = toml::to_string_pretty(self).context("Failed to serialize config")?;
        let content = format!("{CONFIG_HEADER}{body}");

        let _lock = ConfigLock::acquire(path)?;
        write_replacing(path, content.as_bytes())
    }
}

const CONFIG_HEADER: &str = "\
# LearnIT client configuration
# [api].token is the session token sent as `Authorization: Bearer <token>`.

";

/// Exclusive advisory lock next to a config file, released on drop
struct ConfigLock {
    file: File,
}

impl ConfigLock {
    fn acquire(config_path: &Path) -> Result<Self> {
        if let Some(dir) = config_path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;
        }

        let lock_path = config_path.with_extension("toml.lock");
        let file = File::create(&lock_path)
            .with_context(|| format!("Failed to create lock file: {}", lock_path.display()))?;
        file.lock_exclusive()
            .with_context(|| format!("Failed to lock {}", lock_path.display()))?;
        Ok(Self { file })
    }
}

impl Drop for ConfigLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

/// Replace `path` via a synced sibling temp file and a rename
fn write_replacing(path: &Path, bytes: &[u8]) -> Result<()> {
    let staged = path.with_extension("toml.tmp");
    let mut file = File::create(&staged)
        .with_context(|| format!("Failed to stage {}", staged.display()))?;
    file.write_all(bytes)
        .and_then(|()| file.sync_all())
        .with_context(|| format!("Failed to write {}", staged.display()))?;

    fs::rename(&staged, path)
        .with_context(|| format!("Failed to move config into place: {}", path.display()))
}
