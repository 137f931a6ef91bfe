//! Local filesystem storage implementation.
//!
//! Both files are UTF-8 text, read entirely into memory and written
//! entirely on save (temp file, then rename).

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::{NotifiedSet, PathsConfig, StationDirectory};
use crate::storage::BotStorage;

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
    paths: PathsConfig,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory with default file names.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self::with_paths(root_dir, PathsConfig::default())
    }

    /// Create a LocalStorage with configured file names.
    pub fn with_paths(root_dir: impl Into<PathBuf>, paths: PathsConfig) -> Self {
        Self {
            root_dir: root_dir.into(),
            paths,
        }
    }

    /// Resolve a configured path against the root; absolute paths win.
    fn path(&self, relative: &Path) -> PathBuf {
        self.root_dir.join(relative)
    }

    pub fn station_list_path(&self) -> PathBuf {
        self.path(&self.paths.station_list)
    }

    pub fn notified_path(&self) -> PathBuf {
        self.path(&self.paths.notified)
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write text atomically (write to temp, then rename).
    async fn write_text(&self, path: &Path, text: &str) -> Result<()> {
        self.ensure_dir(path).await?;

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(text.as_bytes()).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, path).await?;
        Ok(())
    }

    /// Read text, returning None if the file doesn't exist.
    async fn read_text(&self, path: &Path) -> Result<Option<String>> {
        match tokio::fs::read_to_string(path).await {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }
}

#[async_trait]
impl BotStorage for LocalStorage {
    async fn load_stations(&self) -> Result<StationDirectory> {
        let path = self.station_list_path();
        match self.read_text(&path).await? {
            Some(text) => Ok(StationDirectory::parse(&text)),
            None => {
                log::warn!("No station list found at {}", path.display());
                Ok(StationDirectory::default())
            }
        }
    }

    async fn save_stations(&self, directory: &StationDirectory) -> Result<()> {
        let path = self.station_list_path();
        self.write_text(&path, &directory.to_text()).await?;
        log::info!(
            "Saved {} station(s) to {}",
            directory.len(),
            path.display()
        );
        Ok(())
    }

    async fn load_notified(&self) -> Result<NotifiedSet> {
        let path = self.notified_path();
        match self.read_text(&path).await? {
            Some(text) => Ok(NotifiedSet::parse(&text)),
            None => {
                log::info!("No notified snapshot at {}", path.display());
                Ok(NotifiedSet::new())
            }
        }
    }

    async fn save_notified(&self, notified: &NotifiedSet) -> Result<()> {
        let path = self.notified_path();
        self.write_text(&path, &notified.to_text()).await?;
        log::debug!(
            "Saved notified snapshot ({} station(s)) to {}",
            notified.len(),
            path.display()
        );
        Ok(())
    }
}
