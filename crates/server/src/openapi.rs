use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct MessageResponseDoc { pub success: bool, pub message: String }

/// `image` is a data URL: `data:image/png;base64,<payload>`.
#[derive(ToSchema)]
pub struct UploadRequestDoc { pub image: String, pub folder: String }

#[derive(ToSchema)]
pub struct UploadResponseDoc { pub success: bool, pub message: String, pub name: String }

#[derive(ToSchema)]
pub struct FolderRequestDoc { pub folder_name: String }

#[derive(ToSchema)]
pub struct DeletePhotoRequestDoc { pub photo_path: String }

#[derive(ToSchema)]
pub struct FoldersResponseDoc { pub success: bool, pub folders: Vec<String> }

#[derive(ToSchema)]
pub struct PhotoDoc { pub name: String, pub url: String, pub path: String }

#[derive(ToSchema)]
pub struct PhotosResponseDoc { pub success: bool, pub photos: Vec<PhotoDoc> }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::photos::upload_photo,
        crate::routes::photos::create_folder,
        crate::routes::photos::get_folders,
        crate::routes::photos::get_photos,
        crate::routes::photos::delete_photo,
        crate::routes::photos::delete_folder,
    ),
    components(
        schemas(
            HealthResponse,
            MessageResponseDoc,
            UploadRequestDoc,
            UploadResponseDoc,
            FolderRequestDoc,
            DeletePhotoRequestDoc,
            FoldersResponseDoc,
            PhotoDoc,
            PhotosResponseDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "folders"),
        (name = "photos")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_json_route() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let paths = doc["paths"].as_object().unwrap();
        for p in [
            "/health",
            "/upload",
            "/create_folder",
            "/get_folders",
            "/get_photos/{folder_name}",
            "/delete_photo",
            "/delete_folder",
        ] {
            assert!(paths.contains_key(p), "missing {p}");
        }
    }
}
