//! Reading stage inputs from disk and writing stage outputs.

use lessonloom_core::{MediaBlob, Page, PageImage};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};
use uuid::Uuid;

/// MIME type for an image path, by extension.
pub fn mime_for_path(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("heic") => "image/heic",
        Some("gif") => "image/gif",
        _ => "image/jpeg",
    }
}

/// Load a page image from disk.
#[instrument(fields(path = %path.display()))]
pub fn read_image(path: &Path) -> std::io::Result<PageImage> {
    let bytes = std::fs::read(path)?;
    debug!(bytes = bytes.len(), "Read page image");
    Ok(PageImage::new(mime_for_path(path), bytes))
}

/// Load a page record from JSON.
#[instrument(fields(path = %path.display()))]
pub fn read_page(path: &Path) -> Result<Page, Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(path)?;
    let page: Page = serde_json::from_str(&json)?;
    debug!(page_id = %page.id, page_number = page.page_number, "Read page");
    Ok(page)
}

/// Write a blob into `dir` under a fresh name, returning the path.
#[instrument(skip(blob), fields(dir = %dir.display(), bytes = blob.data().len()))]
pub fn write_blob(dir: &Path, blob: &MediaBlob) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}.{}", Uuid::new_v4(), blob.extension()));
    std::fs::write(&path, blob.data())?;
    debug!(path = %path.display(), "Wrote media");
    Ok(path)
}
