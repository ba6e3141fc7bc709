/// Straight-alpha lerp of one channel: `(fg*a + bg*(255-a)) / 255` with rounding.
pub(crate) fn lerp_u8(fg: u8, bg: u8, alpha: u8) -> u8 {
    let a = u32::from(alpha);
    ((u32::from(fg) * a + u32::from(bg) * (255 - a) + 127) / 255) as u8
}

/// Multiply a color channel by `factor`, rounding and saturating at 255.
pub(crate) fn scale_u8(channel: u8, factor: f32) -> u8 {
    (f32::from(channel) * factor).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
