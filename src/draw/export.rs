//! PNG export of the committed layer.

use super::color::ColorSpace;
use super::frame::Frame;
use super::render::render_frame;
use super::surface::CairoSurface;
use chrono::Local;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while rasterising or writing the artwork.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("Failed to encode PNG: {0}")]
    Png(#[from] cairo::IoError),

    #[error("Failed to write canvas: {0}")]
    Io(#[from] std::io::Error),
}

/// Generate a filename based on the template and current time.
///
/// # Arguments
/// * `template` - Template string with chrono format specifiers
/// * `format` - File extension (e.g., "png")
pub fn generate_filename(template: &str, format: &str) -> String {
    let now = Local::now();
    let filename = now.format(template).to_string();
    format!("{}.{}", filename, format)
}

/// Ensure the save directory exists, creating it if necessary.
pub fn ensure_directory_exists(directory: &Path) -> Result<PathBuf, ExportError> {
    if !directory.exists() {
        log::info!("Creating output directory: {}", directory.display());
        fs::create_dir_all(directory)?;
    }

    let canonical = directory
        .canonicalize()
        .unwrap_or_else(|_| directory.to_path_buf());

    Ok(canonical)
}

/// Expand tilde (~) in path strings.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}

/// Rasterises `frame` at `width`×`height` and writes it to `path` as PNG.
pub fn write_png(
    frame: &Frame,
    space: &dyn ColorSpace,
    width: i32,
    height: i32,
    path: &Path,
) -> Result<PathBuf, ExportError> {
    let mut surface = CairoSurface::new(width, height)?;
    render_frame(&mut surface, frame, space);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_directory_exists(parent)?;
    }

    let mut file = File::create(path)?;
    surface.image().write_to_png(&mut file)?;

    log::info!(
        "Canvas saved to {} ({} strokes)",
        path.display(),
        frame.stroke_count()
    );
    Ok(path.to_path_buf())
}
