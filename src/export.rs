use crate::error::{HeadshotError, Result};
use crate::models::{GeneratedImage, HeadshotStyle};
use base64::{engine::general_purpose, Engine as _};
use std::path::{Path, PathBuf};

/// `headshot-<style>-<n>.png`, numbered from 1.
pub fn download_name(style: HeadshotStyle, index: usize) -> String {
    format!("headshot-{}-{}.png", style.tag(), index + 1)
}

pub fn decode_image(image: &GeneratedImage) -> Result<Vec<u8>> {
    general_purpose::STANDARD
        .decode(image.payload())
        .map_err(|e| {
            HeadshotError::InvalidImage(format!("Generated image is not valid base64: {}", e))
        })
}

pub async fn save_image(
    dir: &Path,
    style: HeadshotStyle,
    index: usize,
    image: &GeneratedImage,
) -> Result<PathBuf> {
    let bytes = decode_image(image)?;
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(download_name(style, index));
    tokio::fs::write(&path, &bytes).await?;
    log::info!("💾 Saved {} ({} bytes)", path.display(), bytes.len());
    Ok(path)
}

/// Writes every result, in order. Stops at the first failure.
pub async fn save_all(
    dir: &Path,
    style: HeadshotStyle,
    images: &[GeneratedImage],
) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::with_capacity(images.len());
    for (index, image) in images.iter().enumerate() {
        paths.push(save_image(dir, style, index, image).await?);
    }
    Ok(paths)
}
