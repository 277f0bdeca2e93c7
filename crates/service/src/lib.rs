//! Service layer for the photo store.
//! - Folder/photo operations live behind the `PhotoRepository` trait.
//! - `FsPhotoStore` implements them directly on the filesystem.
//! - Errors carry the user-facing message; the HTTP layer picks the status.

pub mod errors;
pub mod photos;
