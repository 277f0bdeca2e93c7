use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

use super::msg;

/// A stored photo as reported to clients.
/// - `url`: public path under the static prefix
/// - `path`: filesystem path, accepted back by `delete_photo`
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Photo {
    pub name: String,
    pub url: String,
    pub path: String,
}

/// `POST /upload` body.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UploadPhotoInput {
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub folder: Option<String>,
}

/// Body of `create_folder` and `delete_folder`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FolderInput {
    #[serde(default)]
    pub folder_name: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DeletePhotoInput {
    #[serde(default)]
    pub photo_path: Option<String>,
}

/// Empty strings count as missing.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl UploadPhotoInput {
    /// Returns `(image_data, folder_name)`.
    pub fn validate(self) -> Result<(String, String), ServiceError> {
        match (present(self.image), present(self.folder)) {
            (Some(image), Some(folder)) => Ok((image, folder)),
            _ => Err(ServiceError::Validation(msg::UPLOAD_INPUT_MISSING.into())),
        }
    }
}

impl FolderInput {
    pub fn new(folder_name: impl Into<String>) -> Self {
        Self { folder_name: Some(folder_name.into()) }
    }

    pub fn validate(self) -> Result<String, ServiceError> {
        present(self.folder_name).ok_or_else(|| ServiceError::Validation(msg::FOLDER_NAME_EMPTY.into()))
    }
}

impl DeletePhotoInput {
    pub fn new(photo_path: impl Into<String>) -> Self {
        Self { photo_path: Some(photo_path.into()) }
    }

    pub fn validate(self) -> Result<String, ServiceError> {
        present(self.photo_path).ok_or_else(|| ServiceError::Validation(msg::PHOTO_PATH_MISSING.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_requires_both_fields() {
        let ok = UploadPhotoInput { image: Some("data:,AA==".into()), folder: Some("parts".into()) };
        assert_eq!(ok.validate().unwrap(), ("data:,AA==".to_string(), "parts".to_string()));

        let missing_folder = UploadPhotoInput { image: Some("data:,AA==".into()), folder: None };
        assert!(matches!(missing_folder.validate(), Err(ServiceError::Validation(_))));

        let empty_image = UploadPhotoInput { image: Some(String::new()), folder: Some("parts".into()) };
        let err = empty_image.validate().unwrap_err();
        assert_eq!(err.to_string(), msg::UPLOAD_INPUT_MISSING);
    }

    #[test]
    fn folder_and_path_inputs_reject_empty() {
        assert_eq!(FolderInput::new("a").validate().unwrap(), "a");
        assert_eq!(FolderInput::new("").validate().unwrap_err().to_string(), msg::FOLDER_NAME_EMPTY);
        assert!(FolderInput::default().validate().is_err());

        assert_eq!(DeletePhotoInput::new("x").validate().unwrap(), "x");
        assert_eq!(DeletePhotoInput::default().validate().unwrap_err().to_string(), msg::PHOTO_PATH_MISSING);
    }

    #[test]
    fn inputs_tolerate_missing_and_null_fields() {
        let input: UploadPhotoInput = serde_json::from_str(r#"{"image": null}"#).unwrap();
        assert!(input.image.is_none());
        assert!(input.folder.is_none());

        let input: FolderInput = serde_json::from_str("{}").unwrap();
        assert!(input.folder_name.is_none());
    }
}
