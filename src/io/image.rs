//! PNG overlay of tiles and their collision loops

use image::{ImageBuffer, Rgba, RgbaImage};
use std::path::Path;

use crate::algorithm::coordinator::CollisionWorld;
use crate::io::configuration::{ALIVE_COLOR, DEAD_COLOR, LOOP_COLOR, RENDER_SCALE};
use crate::io::error::{BoundaryError, Result};
use crate::physics::PhysicsWorld;
use crate::spatial::Vertex;

/// Render tiles and published loops at `scale` pixels per tile
///
/// Alive tiles, dead tiles and loop outlines use distinct colors; empty cells
/// stay transparent. Loop outlines run along tile borders.
pub fn render_overlay<P: PhysicsWorld>(world: &CollisionWorld<P>, scale: u32) -> RgbaImage {
    let scale = scale.max(1);
    let bounds = world.tiles().bounds();
    let width = bounds.width() as u32 * scale + 1;
    let height = bounds.height() as u32 * scale + 1;
    let mut img: RgbaImage = ImageBuffer::new(width, height);

    for (cell, tile) in world.tiles().tiles() {
        let color = if tile.alive { ALIVE_COLOR } else { DEAD_COLOR };
        let left = (cell.x - bounds.min.x) as u32 * scale;
        let top = (cell.y - bounds.min.y) as u32 * scale;
        for py in top..top + scale {
            for px in left..left + scale {
                img.put_pixel(px, py, Rgba(color));
            }
        }
    }

    let to_pixel = |vertex: Vertex| {
        (
            (vertex.x - bounds.min.x).max(0) as u32 * scale,
            (vertex.y - bounds.min.y).max(0) as u32 * scale,
        )
    };

    for boundary in world.loops() {
        for (from, to) in boundary.segments() {
            let (x0, y0) = to_pixel(from);
            let (x1, y1) = to_pixel(to);
            for py in y0.min(y1)..=y0.max(y1) {
                for px in x0.min(x1)..=x0.max(x1) {
                    if px < width && py < height {
                        img.put_pixel(px, py, Rgba(LOOP_COLOR));
                    }
                }
            }
        }
    }

    img
}

/// Render the overlay and save it as PNG
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_overlay<P: PhysicsWorld>(world: &CollisionWorld<P>, output_path: &Path) -> Result<()> {
    let img = render_overlay(world, RENDER_SCALE);

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| BoundaryError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }
    }

    img.save(output_path)
        .map_err(|e| BoundaryError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
