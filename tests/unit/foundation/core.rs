use super::*;

#[test]
fn output_size_enforces_minimum() {
    assert!(OutputSize::new(63, 100).is_err());
    assert!(OutputSize::new(100, 63).is_err());
    let size = OutputSize::new(64, 64).unwrap();
    assert_eq!(size.width, 64);
    assert_eq!(size.height, 64);
}

#[test]
fn palette_colors_are_distinct() {
    for (i, a) in MASK_PALETTE.iter().enumerate() {
        for b in &MASK_PALETTE[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn json_key_matches_tuple_form() {
    assert_eq!(MaskColor::new(255, 0, 0).json_key(), "(255, 0, 0)");
    assert_eq!(MaskColor::new(0, 255, 0).json_key(), "(0, 255, 0)");
    assert_eq!(MaskColor::new(12, 34, 56).json_key(), "(12, 34, 56)");
}

#[test]
fn to_rgb_preserves_channels() {
    let px = MaskColor::new(10, 20, 30).to_rgb();
    assert_eq!(px.0, [10, 20, 30]);
}
