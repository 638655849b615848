use crate::config::UploadsConfig;
use crate::domain::{CatalogError, EntityKind};
use crate::models::UploadedImage;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Stores uploaded images on disk, one directory per entity kind.
///
/// The generated file name is what gets persisted as an entity's image.
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn from_config(config: &UploadsConfig) -> Self {
        Self::new(&config.root)
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Location of a stored image. `None` when `filename` is not a bare
    /// file name.
    #[must_use]
    pub fn path_for(&self, kind: EntityKind, filename: &str) -> Option<PathBuf> {
        let name = Path::new(filename).file_name()?;
        if name != filename {
            return None;
        }
        Some(self.root.join(kind.upload_dir()).join(name))
    }

    pub async fn save(
        &self,
        kind: EntityKind,
        image: &UploadedImage,
    ) -> Result<String, CatalogError> {
        let dir = self.root.join(kind.upload_dir());
        fs::create_dir_all(&dir).await?;

        let filename = format!("{}.{}", Uuid::new_v4(), image.extension);
        let path = dir.join(&filename);

        fs::write(&path, &image.bytes).await.map_err(|e| {
            CatalogError::Storage(format!("Failed to write image to {}: {e}", path.display()))
        })?;

        info!(kind = %kind, path = %path.display(), bytes = image.len(), "Stored image");
        Ok(filename)
    }

    pub async fn save_optional(
        &self,
        kind: EntityKind,
        image: Option<&UploadedImage>,
    ) -> Result<Option<String>, CatalogError> {
        match image {
            Some(image) => self.save(kind, image).await.map(Some),
            None => Ok(None),
        }
    }

    /// Removes a stored image. Returns `false` if there was nothing to remove.
    pub async fn remove(&self, kind: EntityKind, filename: &str) -> std::io::Result<bool> {
        let Some(path) = self.path_for(kind, filename) else {
            return Ok(false);
        };

        match fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Best-effort removal; failures are logged and swallowed.
    pub async fn discard(&self, kind: EntityKind, filename: &str) {
        match self.remove(kind, filename).await {
            Ok(true) => debug!(kind = %kind, file = filename, "Removed image"),
            Ok(false) => debug!(kind = %kind, file = filename, "Image already absent"),
            Err(e) => warn!(kind = %kind, file = filename, error = %e, "Failed to remove image"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_root() -> PathBuf {
        std::env::temp_dir().join(format!("marquee-images-{}", Uuid::new_v4()))
    }

    #[test]
    fn path_for_rejects_traversal() {
        let store = ImageStore::new("/srv/uploads");
        assert_eq!(
            store.path_for(EntityKind::Movie, "a.png"),
            Some(PathBuf::from("/srv/uploads/movies/a.png"))
        );
        assert_eq!(store.path_for(EntityKind::Movie, "../secret"), None);
        assert_eq!(store.path_for(EntityKind::Genre, "nested/a.png"), None);
    }

    #[tokio::test]
    async fn save_then_remove() {
        let root = temp_root();
        let store = ImageStore::new(&root);

        let image = UploadedImage::new("png", vec![0x89, b'P', b'N', b'G']);
        let name = store.save(EntityKind::Character, &image).await.unwrap();
        assert!(name.ends_with(".png"));

        let path = store.path_for(EntityKind::Character, &name).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), image.bytes);

        assert!(store.remove(EntityKind::Character, &name).await.unwrap());
        assert!(!path.exists());
        assert!(!store.remove(EntityKind::Character, &name).await.unwrap());

        std::fs::remove_dir_all(root).ok();
    }

    #[tokio::test]
    async fn save_optional_skips_missing_image() {
        let store = ImageStore::new(temp_root());
        let stored = store.save_optional(EntityKind::Movie, None).await.unwrap();
        assert!(stored.is_none());
        assert!(!store.root().exists());
    }
}
