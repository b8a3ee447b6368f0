//! Image header probing for the details panel

use image::ImageReader;
use serde::Serialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{Error, Result};

/// Width/height reported when the image format is not recognized
pub const UNKNOWN_DIMENSION: i64 = -1;

/// What the details panel shows about a file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageMeta {
    /// Upper-cased extension without the dot (e.g. "PNG")
    pub file_type: String,
    pub width: i64,
    pub height: i64,
}

impl ImageMeta {
    pub fn is_known(&self) -> bool {
        self.width != UNKNOWN_DIMENSION && self.height != UNKNOWN_DIMENSION
    }
}

/// Read the dimensions of `path` from its header.
///
/// Only failing to open or read the file is an error. Whatever the decoder
/// reports (unknown format, truncated or empty file) yields `-1 x -1`.
pub fn read_image_meta(path: &Path) -> Result<ImageMeta> {
    let file_type = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_uppercase())
        .unwrap_or_default();

    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let reader = ImageReader::new(BufReader::new(file))
        .with_guessed_format()
        .map_err(|e| Error::io(path, e))?;

    let (width, height) = match reader.into_dimensions() {
        Ok((w, h)) => (i64::from(w), i64::from(h)),
        Err(e) => {
            log::debug!("No dimensions for {}: {}", path.display(), e);
            (UNKNOWN_DIMENSION, UNKNOWN_DIMENSION)
        }
    };

    Ok(ImageMeta {
        file_type,
        width,
        height,
    })
}
