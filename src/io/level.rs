//! Level loading from images
//!
//! Every pixel whose alpha reaches the threshold becomes a tile at the
//! matching cell; pixel `(x, y)` maps to cell `(x, y)`.

use image::RgbaImage;
use std::path::Path;

use crate::io::configuration::TILE_ALPHA_THRESHOLD;
use crate::io::error::{BoundaryError, Result};
use crate::spatial::{Cell, TileStore};

/// Build a tile store from an RGBA image
///
/// # Errors
///
/// Returns an error if the image has no pixels or no opaque pixel
pub fn level_from_image(img: &RgbaImage) -> Result<TileStore> {
    let (width, height) = img.dimensions();
    let mut store = TileStore::new(Cell::new(0, 0), width as usize, height as usize)?;

    let mut placed = 0usize;
    for (x, y, pixel) in img.enumerate_pixels() {
        if pixel[3] >= TILE_ALPHA_THRESHOLD && store.place(Cell::new(x as i32, y as i32)) {
            placed += 1;
        }
    }

    if placed == 0 {
        return Err(BoundaryError::InvalidParameter {
            parameter: "level",
            value: format!("{width}x{height} image"),
            reason: "image contains no opaque pixels".to_string(),
        });
    }

    Ok(store)
}

/// Load a level image from disk
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened or decoded
/// - The image contains no opaque pixels
pub fn load_level(path: &Path) -> Result<TileStore> {
    let img = image::open(path).map_err(|e| BoundaryError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    level_from_image(&img.to_rgba8())
}
