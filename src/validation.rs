use crate::error::{HeadshotError, Result};
use crate::models::SourceImage;
use std::path::Path;

pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Checks an uploaded photo and returns the MIME type to send with it.
///
/// The content is sniffed first; the declared type (from a file extension
/// or an HTTP header) is only used when the bytes are not recognised.
pub fn validate_upload(bytes: &[u8], declared_mime: Option<&str>) -> Result<String> {
    if bytes.is_empty() {
        return Err(HeadshotError::InvalidImage("Uploaded file is empty".into()));
    }

    let mime_type = infer::get(bytes)
        .map(|kind| kind.mime_type().to_string())
        .or_else(|| declared_mime.map(|m| m.trim().to_ascii_lowercase()))
        .unwrap_or_default();

    if !mime_type.starts_with("image/") {
        return Err(HeadshotError::InvalidImage(
            "Please upload an image file".into(),
        ));
    }

    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(HeadshotError::InvalidImage(
            "Image size should be less than 5MB".into(),
        ));
    }

    Ok(mime_type)
}

fn mime_from_extension(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        "heic" => Some("image/heic"),
        _ => None,
    }
}

/// Reads and validates a photo from disk.
pub async fn load_upload(path: &Path) -> Result<SourceImage> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| HeadshotError::IoError(format!("{}: {}", path.display(), e)))?;
    let mime_type = validate_upload(&bytes, mime_from_extension(path))?;
    log::debug!(
        "Loaded {} ({}, {} bytes)",
        path.display(),
        mime_type,
        bytes.len()
    );
    Ok(SourceImage::from_bytes(&bytes, mime_type))
}
