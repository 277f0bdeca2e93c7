use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::errors::ServiceError;

use super::domain::{DeletePhotoInput, FolderInput, Photo, UploadPhotoInput};
use super::repository::PhotoRepository;
use super::{data_url, msg, naming};

/// Filesystem-backed photo store rooted at a base upload folder.
///
/// Folders are direct subdirectories of `base_dir`; photos are the files in
/// them. Nothing is cached: every call reads the directory tree afresh.
#[derive(Clone, Debug)]
pub struct FsPhotoStore {
    base_dir: PathBuf,
    /// `base_dir` as text, the literal prefix `delete_photo` requires.
    base_prefix: String,
    public_url_prefix: String,
}

impl FsPhotoStore {
    /// `public_url_prefix` is the URL path the base folder is served under,
    /// without a trailing slash (e.g. `/static/uploads`).
    pub fn new<P: Into<PathBuf>>(base_dir: P, public_url_prefix: impl Into<String>) -> Self {
        let base_dir = base_dir.into();
        let base_prefix = base_dir.to_string_lossy().into_owned();
        Self { base_dir, base_prefix, public_url_prefix: public_url_prefix.into() }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn folder_path(&self, folder_name: &str) -> PathBuf {
        self.base_dir.join(folder_name)
    }

    fn photo(&self, folder_name: &str, folder_path: &Path, file_name: String) -> Photo {
        Photo {
            url: format!("{}/{}/{}", self.public_url_prefix, folder_name, file_name),
            path: folder_path.join(&file_name).to_string_lossy().into_owned(),
            name: file_name,
        }
    }

    /// Photo-named entries of `dir` in enumeration order.
    async fn photo_names(dir: &Path) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        let mut entries = fs::read_dir(dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name().to_string_lossy().into_owned();
            if naming::is_photo_name(&name) {
                names.push(name);
            }
        }
        Ok(names)
    }

    /// Claim the next free sequential name in `folder_path` and write `bytes`.
    async fn write_next(&self, folder_name: &str, folder_path: &Path, bytes: &[u8]) -> io::Result<String> {
        let number = Self::photo_names(folder_path).await?.len() + 1;
        let mut collision = 0;
        loop {
            let file_name = naming::photo_file_name(folder_name, number, collision);
            let file_path = folder_path.join(&file_name);
            if !exists(&file_path).await {
                match write_new(&file_path, bytes).await {
                    Ok(()) => return Ok(file_name),
                    // lost a race with a concurrent upload; try the next suffix
                    Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {}
                    Err(e) => return Err(e),
                }
            }
            collision += 1;
        }
    }
}

/// Missing or unreadable paths count as absent.
async fn exists(path: &Path) -> bool {
    fs::metadata(path).await.is_ok()
}

async fn write_new(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = fs::OpenOptions::new().write(true).create_new(true).open(path).await?;
    file.write_all(bytes).await?;
    file.flush().await
}

#[async_trait]
impl PhotoRepository for FsPhotoStore {
    async fn list_folders(&self) -> Result<Vec<String>, ServiceError> {
        let mut folders = Vec::new();
        let mut entries = fs::read_dir(&self.base_dir)
            .await
            .map_err(ServiceError::io(msg::LIST_FOLDERS_FAILED))?;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(ServiceError::io(msg::LIST_FOLDERS_FAILED))?
        {
            // follow symlinks, like a plain `is_dir` check would
            let is_dir = fs::metadata(entry.path()).await.map(|m| m.is_dir()).unwrap_or(false);
            if is_dir {
                folders.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        folders.sort();
        debug!(count = folders.len(), "listed folders");
        Ok(folders)
    }

    async fn create_folder(&self, input: FolderInput) -> Result<(), ServiceError> {
        let folder_name = input.validate()?;
        let folder_path = self.folder_path(&folder_name);
        if exists(&folder_path).await {
            return Err(ServiceError::Conflict(msg::FOLDER_EXISTS.into()));
        }
        fs::create_dir_all(&folder_path)
            .await
            .map_err(ServiceError::io(msg::CREATE_FOLDER_FAILED))?;
        info!(folder = %folder_name, "created folder");
        Ok(())
    }

    async fn list_photos(&self, folder_name: &str) -> Result<Vec<Photo>, ServiceError> {
        let folder_path = self.folder_path(folder_name);
        if !exists(&folder_path).await {
            return Err(ServiceError::NotFound(msg::FOLDER_NOT_FOUND.into()));
        }
        let names = Self::photo_names(&folder_path)
            .await
            .map_err(ServiceError::io(msg::LIST_PHOTOS_FAILED))?;
        debug!(folder = %folder_name, count = names.len(), "listed photos");
        Ok(names
            .into_iter()
            .map(|name| self.photo(folder_name, &folder_path, name))
            .collect())
    }

    async fn upload_photo(&self, input: UploadPhotoInput) -> Result<Photo, ServiceError> {
        let (image_data, folder_name) = input.validate()?;
        let bytes = data_url::decode(&image_data)?;

        let folder_path = self.folder_path(&folder_name);
        if !exists(&folder_path).await {
            // upload creates its target folder; only create_folder treats existence as a conflict
            fs::create_dir_all(&folder_path)
                .await
                .map_err(ServiceError::io(msg::SAVE_PHOTO_FAILED))?;
            debug!(folder = %folder_name, "created folder on upload");
        }

        let file_name = self
            .write_next(&folder_name, &folder_path, &bytes)
            .await
            .map_err(ServiceError::io(msg::SAVE_PHOTO_FAILED))?;
        info!(folder = %folder_name, file = %file_name, bytes = bytes.len(), "stored photo");
        Ok(self.photo(&folder_name, &folder_path, file_name))
    }

    async fn delete_photo(&self, input: DeletePhotoInput) -> Result<(), ServiceError> {
        let photo_path = input.validate()?;
        // literal string prefix match; relative segments are not resolved
        if !photo_path.starts_with(&self.base_prefix) {
            return Err(ServiceError::Forbidden(msg::PHOTO_PATH_INVALID.into()));
        }
        let path = Path::new(&photo_path);
        if !exists(path).await {
            return Err(ServiceError::NotFound(msg::PHOTO_NOT_FOUND.into()));
        }
        fs::remove_file(path)
            .await
            .map_err(ServiceError::io(msg::DELETE_PHOTO_FAILED))?;
        info!(path = %photo_path, "deleted photo");
        Ok(())
    }

    async fn delete_folder(&self, input: FolderInput) -> Result<(), ServiceError> {
        let folder_name = input.validate()?;
        let folder_path = self.folder_path(&folder_name);
        if !exists(&folder_path).await {
            return Err(ServiceError::NotFound(msg::FOLDER_NOT_FOUND.into()));
        }
        fs::remove_dir_all(&folder_path)
            .await
            .map_err(ServiceError::io(msg::DELETE_FOLDER_FAILED))?;
        info!(folder = %folder_name, "deleted folder");
        Ok(())
    }
}
