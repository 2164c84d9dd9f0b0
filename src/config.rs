use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::BaseDirs;

use crate::db::STORE_NAME;

/// Environment variable that relocates every file the application writes.
pub const DATA_DIR_ENV: &str = "WARDROBE_DATA_DIR";
/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".wardrobe-catalog";
const LOG_FILE_NAME: &str = "wardrobe.log";
const IMAGE_CACHE_DIR: &str = "images";

/// Where the application keeps its database, log, and exported photos.
#[derive(Debug, Clone)]
pub struct AppConfig {
    data_dir: PathBuf,
}

impl AppConfig {
    /// Resolve the data directory from `WARDROBE_DATA_DIR`, falling back to a
    /// dot-folder in the user's home.
    pub fn from_env() -> Result<Self> {
        match env::var_os(DATA_DIR_ENV).filter(|value| !value.is_empty()) {
            Some(dir) => Ok(Self::with_data_dir(dir)),
            None => {
                let base_dirs =
                    BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
                Ok(Self::with_data_dir(base_dirs.home_dir().join(DATA_DIR_NAME)))
            }
        }
    }

    /// Use `dir` as the data directory, bypassing the environment.
    pub fn with_data_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: dir.into(),
        }
    }

    /// Root folder for everything the application writes.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// SQLite file backing the item store.
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(format!("{STORE_NAME}.sqlite"))
    }

    /// File the tracing subscriber appends to.
    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE_NAME)
    }

    /// Scratch folder for photos exported so the system viewer can open them.
    pub fn image_cache_dir(&self) -> PathBuf {
        self.data_dir.join(IMAGE_CACHE_DIR)
    }

    /// Create the data directory and the image cache beneath it.
    pub fn ensure_dirs(&self) -> Result<()> {
        let cache = self.image_cache_dir();
        fs::create_dir_all(&cache)
            .with_context(|| format!("failed to create data directory {}", cache.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_live_under_data_dir() {
        let config = AppConfig::with_data_dir("/tmp/wardrobe");
        assert_eq!(config.db_path(), PathBuf::from("/tmp/wardrobe/WardrobeDB.sqlite"));
        assert_eq!(config.log_path(), PathBuf::from("/tmp/wardrobe/wardrobe.log"));
        assert_eq!(config.image_cache_dir(), PathBuf::from("/tmp/wardrobe/images"));
    }

    #[test]
    fn ensure_dirs_creates_image_cache() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::with_data_dir(dir.path().join("nested"));
        config.ensure_dirs().unwrap();
        assert!(config.image_cache_dir().is_dir());
    }
}
