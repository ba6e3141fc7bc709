use image::{Rgba, RgbaImage, imageops};
use imageproc::geometric_transformations::{Interpolation, rotate_about_center};
use rand::Rng;

use crate::foundation::math::scale_u8;

/// Randomized jitter applied to one cutout before placement.
///
/// Applying the parameters never mutates the source image; each step allocates
/// a fresh buffer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AugmentParams {
    /// Rotation angle in degrees, `[0, 360)`.
    pub angle_deg: f32,
    /// Uniform scale factor on both axes, `[0.5, 1.0]`.
    pub scale: f32,
    /// Multiplicative brightness factor on color channels, `[0.7, 1.1]`.
    pub brightness: f32,
}

impl AugmentParams {
    /// Draw parameters from their uniform ranges.
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            angle_deg: rng.gen_range(0.0f32..360.0),
            scale: rng.gen_range(0.5f32..=1.0),
            brightness: rng.gen_range(0.7f32..=1.1),
        }
    }

    /// Rotate, scale, and brightness-adjust `image`, returning a new buffer.
    pub fn apply(&self, image: &RgbaImage) -> RgbaImage {
        let rotated = rotate_expanded(image, self.angle_deg);
        let scaled = scale_uniform(&rotated, self.scale);
        adjust_brightness(&scaled, self.brightness)
    }
}

/// Rotate about the center onto an expanded canvas that fully contains the
/// rotated content, with bicubic sampling and a transparent fill.
pub(crate) fn rotate_expanded(image: &RgbaImage, angle_deg: f32) -> RgbaImage {
    let (w, h) = image.dimensions();
    let theta = angle_deg.to_radians();
    let (sin, cos) = (theta.sin().abs(), theta.cos().abs());
    let out_w = ((w as f32) * cos + (h as f32) * sin).ceil() as u32;
    let out_h = ((w as f32) * sin + (h as f32) * cos).ceil() as u32;

    // Center the cutout on the expanded canvas first so no corner leaves the
    // frame during rotation.
    let mut padded = RgbaImage::new(out_w.max(w), out_h.max(h));
    let off_x = (padded.width() - w) / 2;
    let off_y = (padded.height() - h) / 2;
    imageops::replace(&mut padded, image, i64::from(off_x), i64::from(off_y));

    rotate_about_center(&padded, theta, Interpolation::Bicubic, Rgba([0, 0, 0, 0]))
}

/// Uniformly scale both axes with bicubic resampling, flooring at 1 px.
pub(crate) fn scale_uniform(image: &RgbaImage, factor: f32) -> RgbaImage {
    let (w, h) = image.dimensions();
    let new_w = (((w as f32) * factor).round() as u32).max(1);
    let new_h = (((h as f32) * factor).round() as u32).max(1);
    imageops::resize(image, new_w, new_h, imageops::FilterType::CatmullRom)
}

/// Multiply color channels by `factor`, saturating at 255. Alpha is untouched.
pub(crate) fn adjust_brightness(image: &RgbaImage, factor: f32) -> RgbaImage {
    let mut out = image.clone();
    for px in out.pixels_mut() {
        px[0] = scale_u8(px[0], factor);
        px[1] = scale_u8(px[1], factor);
        px[2] = scale_u8(px[2], factor);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/transform/augment.rs"]
mod tests;
