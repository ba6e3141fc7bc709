use crate::foundation::error::{MaskforgeError, MaskforgeResult};

/// Smallest allowed output dimension in pixels, per axis.
pub const MIN_OUTPUT_DIM: u32 = 64;

/// Fixed palette of mask colors, indexed by stacking slot.
///
/// Slot `i` always receives palette color `i`, so colors are unique within a
/// sample but carry no meaning across samples.
pub const MASK_PALETTE: [MaskColor; 3] = [
    MaskColor::new(255, 0, 0),
    MaskColor::new(0, 255, 0),
    MaskColor::new(0, 0, 255),
];

/// Flat RGB color identifying one stacking slot in a segmentation mask.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct MaskColor {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl MaskColor {
    /// Create a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Stable string form used as a JSON object key, e.g. `(255, 0, 0)`.
    pub fn json_key(self) -> String {
        format!("({}, {}, {})", self.r, self.g, self.b)
    }

    /// Convert to an [`image`] RGB pixel.
    pub fn to_rgb(self) -> image::Rgb<u8> {
        image::Rgb([self.r, self.g, self.b])
    }
}

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OutputSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl OutputSize {
    /// Create a validated size with both axes at least [`MIN_OUTPUT_DIM`].
    pub fn new(width: u32, height: u32) -> MaskforgeResult<Self> {
        if width < MIN_OUTPUT_DIM {
            return Err(MaskforgeError::validation(format!(
                "output width must be >= {MIN_OUTPUT_DIM}, got {width}"
            )));
        }
        if height < MIN_OUTPUT_DIM {
            return Err(MaskforgeError::validation(format!(
                "output height must be >= {MIN_OUTPUT_DIM}, got {height}"
            )));
        }
        Ok(Self { width, height })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
