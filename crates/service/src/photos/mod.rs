//! Folder and photo storage.

pub mod data_url;
pub mod domain;
pub mod fs_store;
pub mod naming;
pub mod repository;

pub use domain::{DeletePhotoInput, FolderInput, Photo, UploadPhotoInput};
pub use fs_store::FsPhotoStore;
pub use repository::PhotoRepository;

/// Client-facing messages.
pub mod msg {
    pub const UPLOAD_INPUT_MISSING: &str = "缺少图片数据或文件夹名称。";
    pub const UPLOAD_OK: &str = "照片上传成功。";
    pub const SAVE_PHOTO_FAILED: &str = "保存照片失败";
    pub const FOLDER_NAME_EMPTY: &str = "文件夹名称不能为空。";
    pub const FOLDER_EXISTS: &str = "文件夹已存在。";
    pub const FOLDER_CREATED: &str = "文件夹创建成功。";
    pub const CREATE_FOLDER_FAILED: &str = "创建文件夹失败";
    pub const LIST_FOLDERS_FAILED: &str = "获取文件夹列表失败";
    pub const FOLDER_NOT_FOUND: &str = "文件夹不存在。";
    pub const LIST_PHOTOS_FAILED: &str = "获取照片失败";
    pub const PHOTO_PATH_MISSING: &str = "缺少照片路径。";
    pub const PHOTO_PATH_INVALID: &str = "无效的照片路径。";
    pub const PHOTO_NOT_FOUND: &str = "照片不存在。";
    pub const PHOTO_DELETED: &str = "照片删除成功。";
    pub const DELETE_PHOTO_FAILED: &str = "删除照片失败";
    pub const FOLDER_DELETED: &str = "文件夹删除成功。";
    pub const DELETE_FOLDER_FAILED: &str = "删除文件夹失败";
}
