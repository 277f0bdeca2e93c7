use async_trait::async_trait;

use crate::errors::ServiceError;

use super::domain::{DeletePhotoInput, FolderInput, Photo, UploadPhotoInput};

/// Trait abstraction for folder/photo storage.
#[async_trait]
pub trait PhotoRepository: Send + Sync {
    /// Folder names under the base path, sorted.
    async fn list_folders(&self) -> Result<Vec<String>, ServiceError>;
    /// Fails with `Conflict` when the folder already exists.
    async fn create_folder(&self, input: FolderInput) -> Result<(), ServiceError>;
    async fn list_photos(&self, folder_name: &str) -> Result<Vec<Photo>, ServiceError>;
    /// Decodes the data URL and stores it under the next free sequential name,
    /// creating the folder if needed.
    async fn upload_photo(&self, input: UploadPhotoInput) -> Result<Photo, ServiceError>;
    async fn delete_photo(&self, input: DeletePhotoInput) -> Result<(), ServiceError>;
    /// Removes the folder and everything in it.
    async fn delete_folder(&self, input: FolderInput) -> Result<(), ServiceError>;
}
