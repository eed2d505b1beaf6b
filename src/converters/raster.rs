//! SVG to PNG rasterization and bitmap probing.

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use crate::errors::{BakeError, Result};

/// Largest edge we are willing to allocate a pixmap for.
const MAX_DIM: u32 = 16_384;

/// An encoded PNG with its pixel size.
#[derive(Debug, Clone)]
pub struct RasterImage {
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

fn system_fonts() -> Arc<usvg::fontdb::Database> {
    static FONTS: OnceLock<Arc<usvg::fontdb::Database>> = OnceLock::new();
    FONTS
        .get_or_init(|| {
            let mut db = usvg::fontdb::Database::new();
            db.load_system_fonts();
            log::debug!("Loaded {} font faces for rasterization", db.faces().count());
            Arc::new(db)
        })
        .clone()
}

/// Rasterizes `svg` to PNG. Relative image references resolve against
/// `resources_dir`. With `target_height` the drawing is scaled uniformly so the
/// bitmap is that many pixels tall.
pub fn rasterize_svg(
    svg: &str,
    resources_dir: Option<&Path>,
    target_height: Option<u32>,
) -> Result<RasterImage> {
    let opts = usvg::Options {
        resources_dir: resources_dir.map(Path::to_path_buf),
        fontdb: system_fonts(),
        ..Default::default()
    };
    let tree = usvg::Tree::from_str(svg, &opts)
        .map_err(|e| BakeError::Raster(format!("parse svg tree: {e}")))?;

    let size = tree.size();
    if !size.width().is_finite() || size.width() <= 0.0 || size.height() <= 0.0 {
        return Err(BakeError::Raster("svg has invalid width/height".into()));
    }
    let scale = target_height.map_or(1.0, |h| h as f32 / size.height());
    let width = (size.width() * scale).ceil().max(1.0) as u32;
    let height = (size.height() * scale).ceil().max(1.0) as u32;
    if width > MAX_DIM || height > MAX_DIM {
        return Err(BakeError::Raster(format!(
            "svg raster size too large: {width}x{height} (max {MAX_DIM}x{MAX_DIM})"
        )));
    }

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| BakeError::Raster("failed to allocate svg pixmap".into()))?;
    let transform = resvg::tiny_skia::Transform::from_scale(scale, scale);
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    let mut rgba = Vec::with_capacity((width * height * 4) as usize);
    for pixel in pixmap.pixels() {
        let c = pixel.demultiply();
        rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    let buffer = image::RgbaImage::from_raw(width, height, rgba)
        .ok_or_else(|| BakeError::Raster("pixel buffer size mismatch".into()))?;
    let mut png = Vec::new();
    buffer
        .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .map_err(|e| BakeError::Raster(format!("encode png: {e}")))?;

    Ok(RasterImage { png, width, height })
}

/// Pixel dimensions of the bitmap at `path`.
pub fn image_pixel_size(path: &Path) -> Result<(u32, u32)> {
    image::image_dimensions(path).map_err(|source| BakeError::ImageLoad {
        path: PathBuf::from(path),
        source,
    })
}
