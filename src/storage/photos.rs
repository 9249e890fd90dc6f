//! Filesystem-backed photo assets.
//!
//! Uploads are staged into the upload directory under a generated name before the record
//! operation runs, then bound to a record (`attach`/`replace`) or thrown away (`discard`).
//! Every stored file is a flat entry in the upload directory; nothing else is persisted.

use crate::domain::error::{InventoryError, InventoryResult};
use crate::domain::inventory::record::{InventoryRecord, PhotoAsset};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};
use uuid::Uuid;

/// Used when the client sends a file part without a content type.
pub const FALLBACK_MIMETYPE: &str = "application/octet-stream";

/// A file written to the upload directory that is not yet bound to a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Generated storage name.
    pub stored_name: String,
    pub content_type: String,
    /// Client-supplied filename, informational only.
    pub original_name: Option<String>,
    pub size: u64,
}

/// An open stored photo together with the content type it was uploaded with.
#[derive(Debug)]
pub struct PhotoContent {
    pub file: fs::File,
    pub mimetype: String,
}

#[derive(Debug, Clone)]
pub struct PhotoStore {
    upload_dir: PathBuf,
}

impl PhotoStore {
    pub fn new(upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
        }
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    /// Creates the upload directory (and parents) if it does not exist yet.
    pub async fn ensure_dir(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.upload_dir).await
    }

    /// Checks that the upload directory exists and is a directory.
    pub async fn is_reachable(&self) -> bool {
        fs::metadata(&self.upload_dir)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false)
    }

    /// Resolves a stored name to its path. Only plain file names inside the upload
    /// directory are accepted.
    fn path_for(&self, stored_name: &str) -> Option<PathBuf> {
        let plain = !stored_name.is_empty()
            && stored_name != "."
            && stored_name != ".."
            && !stored_name.contains(&['/', '\\'][..]);
        plain.then(|| self.upload_dir.join(stored_name))
    }

    /// Writes uploaded bytes under a fresh generated name.
    pub async fn stage(
        &self,
        data: &[u8],
        content_type: Option<&str>,
        original_name: Option<&str>,
    ) -> InventoryResult<UploadedFile> {
        let stored_name = Uuid::new_v4().simple().to_string();
        let path = self.upload_dir.join(&stored_name);

        // create_new: a generated name must never overwrite an existing asset.
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| {
                warn!(path = %path.display(), error = %e, "photos: create failed");
                e
            })?;
        if let Err(e) = write_all_synced(&mut file, data).await {
            warn!(path = %path.display(), error = %e, "photos: write failed");
            drop(file);
            let _ = fs::remove_file(&path).await;
            return Err(e.into());
        }

        debug!(stored_name = %stored_name, size = data.len(), "photos: staged upload");
        Ok(UploadedFile {
            stored_name,
            content_type: content_type
                .filter(|c| !c.is_empty())
                .unwrap_or(FALLBACK_MIMETYPE)
                .to_string(),
            original_name: original_name.map(str::to_string),
            size: data.len() as u64,
        })
    }

    /// Binds a staged upload to a record.
    ///
    /// The staged file must still be on disk; otherwise the record is left untouched and an
    /// I/O error is returned. Any previous asset reference is overwritten, see `replace` for
    /// the variant that also removes the old file.
    pub async fn attach(
        &self,
        record: &mut InventoryRecord,
        upload: UploadedFile,
    ) -> InventoryResult<()> {
        let path = self.path_for(&upload.stored_name).ok_or_else(|| {
            InventoryError::Io(std::io::Error::new(
                ErrorKind::InvalidInput,
                format!("invalid stored name '{}'", upload.stored_name),
            ))
        })?;
        fs::metadata(&path).await?;

        record.photo = Some(PhotoAsset {
            filename: upload.stored_name,
            mimetype: upload.content_type,
        });
        debug!(id = record.id, "photos: attached");
        Ok(())
    }

    /// Swaps the record's asset for a new upload, deleting the previous file first.
    pub async fn replace(
        &self,
        record: &mut InventoryRecord,
        upload: Option<UploadedFile>,
    ) -> InventoryResult<()> {
        let Some(upload) = upload else {
            return Err(InventoryError::validation("A photo file is required"));
        };

        if let Some(old) = record.photo.take() {
            self.discard(&old.filename).await;
        }
        if let Err(e) = self.attach(record, upload.clone()).await {
            self.discard(&upload.stored_name).await;
            return Err(e);
        }
        Ok(())
    }

    /// Opens the record's photo for streaming. A record without a photo and a photo missing
    /// on disk are both reported as not found.
    pub async fn load(&self, record: &InventoryRecord) -> InventoryResult<PhotoContent> {
        let missing = || InventoryError::not_found(format!("Photo for item {} not found", record.id));

        let asset = record.photo.as_ref().ok_or_else(missing)?;
        let path = self.path_for(&asset.filename).ok_or_else(missing)?;
        match fs::File::open(&path).await {
            Ok(file) => Ok(PhotoContent {
                file,
                mimetype: asset.mimetype.clone(),
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(id = record.id, filename = %asset.filename, "photos: file missing on disk");
                Err(missing())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Best-effort removal of a stored file. A file that is already gone is fine; other
    /// failures are logged and swallowed.
    pub async fn discard(&self, stored_name: &str) {
        let Some(path) = self.path_for(stored_name) else {
            return;
        };
        match fs::remove_file(&path).await {
            Ok(()) => debug!(stored_name = %stored_name, "photos: discarded"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!(path = %path.display(), error = %e, "photos: discard failed"),
        }
    }
}

async fn write_all_synced(file: &mut fs::File, data: &[u8]) -> std::io::Result<()> {
    file.write_all(data).await?;
    file.sync_all().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncReadExt;

    async fn read_all(content: PhotoContent) -> Vec<u8> {
        let mut file = content.file;
        let mut buf = Vec::new();
        file.read_to_end(&mut buf).await.unwrap();
        buf
    }

    fn store() -> (tempfile::TempDir, PhotoStore) {
        let dir = tempfile::tempdir().unwrap();
        let photos = PhotoStore::new(dir.path().join("uploads"));
        (dir, photos)
    }

    fn record() -> InventoryRecord {
        InventoryRecord {
            id: 1,
            inventory_name: "Drill".to_string(),
            description: "Cordless".to_string(),
            photo: None,
        }
    }

    #[tokio::test]
    async fn stage_generates_distinct_names() {
        let (_dir, photos) = store();
        photos.ensure_dir().await.unwrap();
        let a = photos.stage(b"a", Some("image/png"), Some("a.png")).await.unwrap();
        let b = photos.stage(b"b", None, None).await.unwrap();
        assert_ne!(a.stored_name, b.stored_name);
        assert_eq!(a.stored_name.len(), 32);
        assert_eq!(b.content_type, FALLBACK_MIMETYPE);
        assert_eq!(a.original_name.as_deref(), Some("a.png"));
    }

    #[tokio::test]
    async fn attach_then_load_keeps_mimetype() {
        let (_dir, photos) = store();
        photos.ensure_dir().await.unwrap();
        let mut rec = record();
        let upload = photos.stage(b"GIF89a", Some("image/gif"), None).await.unwrap();
        photos.attach(&mut rec, upload).await.unwrap();

        let content = photos.load(&rec).await.unwrap();
        assert_eq!(content.mimetype, "image/gif");
        assert_eq!(read_all(content).await, b"GIF89a");
    }

    #[tokio::test]
    async fn attach_of_missing_file_leaves_record_untouched() {
        let (_dir, photos) = store();
        photos.ensure_dir().await.unwrap();
        let mut rec = record();
        let upload = UploadedFile {
            stored_name: "does-not-exist".to_string(),
            content_type: "image/png".to_string(),
            original_name: None,
            size: 0,
        };
        assert!(matches!(
            photos.attach(&mut rec, upload).await,
            Err(InventoryError::Io(_))
        ));
        assert_eq!(rec.photo, None);
    }

    #[tokio::test]
    async fn replace_removes_previous_file() {
        let (_dir, photos) = store();
        photos.ensure_dir().await.unwrap();
        let mut rec = record();
        let first = photos.stage(b"one", Some("image/png"), None).await.unwrap();
        let old_path = photos.upload_dir().join(&first.stored_name);
        photos.attach(&mut rec, first).await.unwrap();

        let second = photos.stage(b"two", Some("image/jpeg"), None).await.unwrap();
        photos.replace(&mut rec, Some(second)).await.unwrap();

        assert!(!old_path.exists());
        let content = photos.load(&rec).await.unwrap();
        assert_eq!(content.mimetype, "image/jpeg");
        assert_eq!(read_all(content).await, b"two");
    }

    #[tokio::test]
    async fn replace_without_upload_is_rejected() {
        let (_dir, photos) = store();
        let mut rec = record();
        assert!(matches!(
            photos.replace(&mut rec, None).await,
            Err(InventoryError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn load_reports_missing_file_as_not_found() {
        let (_dir, photos) = store();
        photos.ensure_dir().await.unwrap();
        let mut rec = record();
        assert!(matches!(photos.load(&rec).await, Err(InventoryError::NotFound(_))));

        let upload = photos.stage(b"x", Some("image/png"), None).await.unwrap();
        let name = upload.stored_name.clone();
        photos.attach(&mut rec, upload).await.unwrap();
        std::fs::remove_file(photos.upload_dir().join(name)).unwrap();
        assert!(matches!(photos.load(&rec).await, Err(InventoryError::NotFound(_))));
    }

    #[tokio::test]
    async fn discard_is_idempotent_and_confined() {
        let (dir, photos) = store();
        photos.ensure_dir().await.unwrap();
        let upload = photos.stage(b"x", None, None).await.unwrap();
        photos.discard(&upload.stored_name).await;
        photos.discard(&upload.stored_name).await;
        assert!(!photos.upload_dir().join(&upload.stored_name).exists());

        let outside = dir.path().join("keep.txt");
        std::fs::write(&outside, b"keep").unwrap();
        photos.discard("../keep.txt").await;
        assert!(outside.exists());
    }
}
