/// Extensions (lowercase) that make a directory entry count as a photo.
pub const PHOTO_EXTENSIONS: [&str; 4] = [".png", ".jpg", ".jpeg", ".gif"];

pub fn is_photo_name(file_name: &str) -> bool {
    let lower = file_name.to_lowercase();
    PHOTO_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// `<folder>_<nn>.png`, or `<folder>_<nn>_<collision>.png` once the plain
/// name is taken. Uploads are always stored as `.png`.
pub fn photo_file_name(folder_name: &str, number: usize, collision: usize) -> String {
    if collision == 0 {
        format!("{folder_name}_{number:02}.png")
    } else {
        format!("{folder_name}_{number:02}_{collision}.png")
    }
}
