use std::path::Path;

use anyhow::Context as _;
use image::RgbaImage;

use crate::foundation::error::{MaskforgeError, MaskforgeResult};

/// Load a foreground cutout as straight-alpha RGBA and validate it.
///
/// A cutout must carry real transparency: at least one fully transparent pixel
/// (an image without any signals a non-cutout source) and at least one visible
/// pixel (an all-transparent asset would contribute nothing to its mask slot).
pub fn load_foreground(path: &Path) -> MaskforgeResult<RgbaImage> {
    let image = image::open(path)
        .with_context(|| format!("decode foreground '{}'", path.display()))?
        .to_rgba8();

    if !image.pixels().any(|px| px[3] == 0) {
        return Err(MaskforgeError::asset(format!(
            "foreground has no transparency and is not a cutout: '{}'",
            path.display()
        )));
    }
    if !image.pixels().any(|px| px[3] > 0) {
        return Err(MaskforgeError::asset(format!(
            "foreground is fully transparent: '{}'",
            path.display()
        )));
    }

    Ok(image)
}

/// Load a background photo as straight-alpha RGBA.
pub fn load_background(path: &Path) -> MaskforgeResult<RgbaImage> {
    Ok(image::open(path)
        .with_context(|| format!("decode background '{}'", path.display()))?
        .to_rgba8())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
