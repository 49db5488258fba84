// ABOUTME: File-backed MetadataStore keeping the latest record as one JSON object at a fixed path.
// ABOUTME: Writes go to a sibling .tmp file, are fsynced, then renamed over the target.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use relay_core::StreamMetadataRecord;
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::{MetadataStore, StoreError};

/// Where the record lives unless configured otherwise.
pub const DEFAULT_STORE_PATH: &str = "/tmp/ma_alexa_api_store.json";

/// Stores the record in a single JSON file.
pub struct FileStore {
    path: PathBuf,
    tmp_path: PathBuf,
    // Serializes writers so two pushes never share the temp file.
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut tmp_name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        tmp_name.push(".tmp");
        let tmp_path = path.with_file_name(tmp_name);

        Self {
            path,
            tmp_path,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl MetadataStore for FileStore {
    async fn put(&self, record: &StreamMetadataRecord) -> Result<(), StoreError> {
        let json = serde_json::to_vec(record)?;

        let _guard = self.write_lock.lock().await;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).await?;
        }

        let mut file = File::create(&self.tmp_path).await?;
        file.write_all(&json).await?;
        file.sync_all().await?;
        drop(file);

        fs::rename(&self.tmp_path, &self.path).await?;

        tracing::debug!(path = %self.path.display(), "stored stream metadata");
        Ok(())
    }

    async fn get(&self) -> Result<Option<StreamMetadataRecord>, StoreError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let record = StreamMetadataRecord::from_stored(&bytes);
        if record.is_none() {
            tracing::warn!(
                path = %self.path.display(),
                "stored metadata is unreadable or has no streamUrl; treating as empty"
            );
        }
        Ok(record)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path().display())
    }
}
