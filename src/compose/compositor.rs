use image::{Rgb, RgbImage, RgbaImage, imageops};
use rand::Rng;

use crate::foundation::core::{MaskColor, OutputSize};
use crate::foundation::error::{MaskforgeError, MaskforgeResult};
use crate::foundation::math::lerp_u8;

/// Alpha cut above which a pixel counts as object in the segmentation mask.
///
/// Thresholding keeps faint anti-aliased fringes out of the labels, trading
/// mask edge softness for label crispness.
pub const ALPHA_THRESHOLD: u8 = 200;

/// One transformed foreground ready for placement, with its slot color.
#[derive(Clone, Debug)]
pub struct ForegroundLayer {
    /// Transformed straight-alpha RGBA cutout.
    pub image: RgbaImage,
    /// Flat mask color assigned to this stacking slot.
    pub color: MaskColor,
}

/// Composite image plus its color-coded segmentation mask.
#[derive(Clone, Debug)]
pub struct ComposedSample {
    /// Final opaque composite.
    pub image: RgbImage,
    /// Mask canvas: black background, one flat palette color per visible slot.
    pub mask: RgbImage,
}

/// Crop `background` to `size` at a uniformly random offset that keeps the
/// crop fully inside the source image.
///
/// The offset range is inclusive, so a background of exactly `size` yields the
/// single valid crop at the origin.
pub fn crop_background<R: Rng + ?Sized>(
    background: &RgbaImage,
    size: OutputSize,
    rng: &mut R,
) -> MaskforgeResult<RgbaImage> {
    let (bg_w, bg_h) = background.dimensions();
    if bg_w < size.width || bg_h < size.height {
        return Err(MaskforgeError::geometry(format!(
            "background {bg_w}x{bg_h} is smaller than requested output {}x{}",
            size.width, size.height
        )));
    }

    let x = rng.gen_range(0..=bg_w - size.width);
    let y = rng.gen_range(0..=bg_h - size.height);
    Ok(imageops::crop_imm(background, x, y, size.width, size.height).to_image())
}

/// Place `layers` onto `crop` in slot order, blending each over the running
/// composite and painting its thresholded footprint into the mask canvas.
///
/// List order defines stacking: later layers are drawn on top, and at overlaps
/// the later slot's mask color fully overwrites the earlier one. Every mask
/// pixel therefore ends up either black or exactly one palette color, never a
/// blend.
pub fn compose<R: Rng + ?Sized>(
    crop: &RgbaImage,
    layers: &[ForegroundLayer],
    rng: &mut R,
) -> MaskforgeResult<ComposedSample> {
    let (width, height) = crop.dimensions();
    let mut image = RgbImage::from_fn(width, height, |x, y| {
        let px = crop.get_pixel(x, y);
        Rgb([px[0], px[1], px[2]])
    });
    let mut mask = RgbImage::new(width, height);

    for layer in layers {
        let (fg_w, fg_h) = layer.image.dimensions();
        if fg_w > width || fg_h > height {
            return Err(MaskforgeError::geometry(format!(
                "foreground {fg_w}x{fg_h} does not fit the {width}x{height} output canvas, \
                 check the input parameters"
            )));
        }

        // Inclusive ranges so an exact-fit layer degenerates to offset (0, 0).
        let off_x = rng.gen_range(0..=width - fg_w);
        let off_y = rng.gen_range(0..=height - fg_h);
        blend_layer(&mut image, &mut mask, layer, off_x, off_y);
    }

    Ok(ComposedSample { image, mask })
}

fn blend_layer(
    image: &mut RgbImage,
    mask: &mut RgbImage,
    layer: &ForegroundLayer,
    off_x: u32,
    off_y: u32,
) {
    let color = layer.color.to_rgb();
    for (fx, fy, fg_px) in layer.image.enumerate_pixels() {
        let alpha = fg_px[3];
        if alpha == 0 {
            continue;
        }
        let (x, y) = (off_x + fx, off_y + fy);

        let dst = image.get_pixel_mut(x, y);
        for c in 0..3 {
            dst[c] = lerp_u8(fg_px[c], dst[c], alpha);
        }
        if alpha > ALPHA_THRESHOLD {
            mask.put_pixel(x, y, color);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/compositor.rs"]
mod tests;
