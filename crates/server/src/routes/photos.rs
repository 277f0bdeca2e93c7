//! JSON handlers for folders and photos.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::Json;
use common::types::MessageResponse;
use serde::Serialize;
use service::photos::{msg, DeletePhotoInput, FolderInput, Photo, UploadPhotoInput};

use crate::errors::JsonApiError;
use crate::routes::ServerState;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub message: String,
    /// File name the photo was stored under.
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct FoldersResponse {
    pub success: bool,
    pub folders: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct PhotosResponse {
    pub success: bool,
    pub photos: Vec<Photo>,
}

/// Unwrap a JSON body, turning a rejection into the standard error envelope.
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, JsonApiError> {
    payload.map(|Json(body)| body).map_err(JsonApiError::from)
}

#[utoipa::path(
    post, path = "/upload", tag = "photos",
    request_body = crate::openapi::UploadRequestDoc,
    responses(
        (status = 200, description = "Stored", body = crate::openapi::UploadResponseDoc),
        (status = 400, description = "Missing input or undecodable image", body = crate::openapi::MessageResponseDoc),
        (status = 500, description = "Write failed", body = crate::openapi::MessageResponseDoc)
    )
)]
pub async fn upload_photo(
    State(state): State<ServerState>,
    payload: Result<Json<UploadPhotoInput>, JsonRejection>,
) -> Result<Json<UploadResponse>, JsonApiError> {
    let input = json_body(payload)?;
    let photo = state.photos.upload_photo(input).await?;
    Ok(Json(UploadResponse {
        success: true,
        message: msg::UPLOAD_OK.into(),
        name: photo.name,
    }))
}

#[utoipa::path(
    post, path = "/create_folder", tag = "folders",
    request_body = crate::openapi::FolderRequestDoc,
    responses(
        (status = 200, description = "Created", body = crate::openapi::MessageResponseDoc),
        (status = 400, description = "Empty name", body = crate::openapi::MessageResponseDoc),
        (status = 409, description = "Already exists", body = crate::openapi::MessageResponseDoc),
        (status = 500, description = "Create failed", body = crate::openapi::MessageResponseDoc)
    )
)]
pub async fn create_folder(
    State(state): State<ServerState>,
    payload: Result<Json<FolderInput>, JsonRejection>,
) -> Result<Json<MessageResponse>, JsonApiError> {
    let input = json_body(payload)?;
    state.photos.create_folder(input).await?;
    Ok(Json(MessageResponse::ok(msg::FOLDER_CREATED)))
}

#[utoipa::path(
    get, path = "/get_folders", tag = "folders",
    responses(
        (status = 200, description = "Sorted folder names", body = crate::openapi::FoldersResponseDoc),
        (status = 500, description = "List failed", body = crate::openapi::MessageResponseDoc)
    )
)]
pub async fn get_folders(State(state): State<ServerState>) -> Result<Json<FoldersResponse>, JsonApiError> {
    let folders = state.photos.list_folders().await?;
    Ok(Json(FoldersResponse { success: true, folders }))
}

#[utoipa::path(
    get, path = "/get_photos/{folder_name}", tag = "photos",
    params(("folder_name" = String, Path, description = "Folder to list")),
    responses(
        (status = 200, description = "Photos in enumeration order", body = crate::openapi::PhotosResponseDoc),
        (status = 400, description = "Folder name is not valid UTF-8", body = crate::openapi::MessageResponseDoc),
        (status = 404, description = "Folder not found", body = crate::openapi::MessageResponseDoc),
        (status = 500, description = "List failed", body = crate::openapi::MessageResponseDoc)
    )
)]
pub async fn get_photos(
    State(state): State<ServerState>,
    folder_name: Result<Path<String>, PathRejection>,
) -> Result<Json<PhotosResponse>, JsonApiError> {
    let Path(folder_name) = folder_name?;
    let photos = state.photos.list_photos(&folder_name).await?;
    Ok(Json(PhotosResponse { success: true, photos }))
}

#[utoipa::path(
    post, path = "/delete_photo", tag = "photos",
    request_body = crate::openapi::DeletePhotoRequestDoc,
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::MessageResponseDoc),
        (status = 400, description = "Missing path", body = crate::openapi::MessageResponseDoc),
        (status = 403, description = "Path outside the upload folder", body = crate::openapi::MessageResponseDoc),
        (status = 404, description = "Photo not found", body = crate::openapi::MessageResponseDoc),
        (status = 500, description = "Delete failed", body = crate::openapi::MessageResponseDoc)
    )
)]
pub async fn delete_photo(
    State(state): State<ServerState>,
    payload: Result<Json<DeletePhotoInput>, JsonRejection>,
) -> Result<Json<MessageResponse>, JsonApiError> {
    let input = json_body(payload)?;
    state.photos.delete_photo(input).await?;
    Ok(Json(MessageResponse::ok(msg::PHOTO_DELETED)))
}

#[utoipa::path(
    post, path = "/delete_folder", tag = "folders",
    request_body = crate::openapi::FolderRequestDoc,
    responses(
        (status = 200, description = "Deleted with contents", body = crate::openapi::MessageResponseDoc),
        (status = 400, description = "Empty name", body = crate::openapi::MessageResponseDoc),
        (status = 404, description = "Folder not found", body = crate::openapi::MessageResponseDoc),
        (status = 500, description = "Delete failed", body = crate::openapi::MessageResponseDoc)
    )
)]
pub async fn delete_folder(
    State(state): State<ServerState>,
    payload: Result<Json<FolderInput>, JsonRejection>,
) -> Result<Json<MessageResponse>, JsonApiError> {
    let input = json_body(payload)?;
    state.photos.delete_folder(input).await?;
    Ok(Json(MessageResponse::ok(msg::FOLDER_DELETED)))
}
