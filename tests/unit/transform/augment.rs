use super::*;

use rand::SeedableRng;
use rand::rngs::StdRng;

fn opaque_square(side: u32) -> RgbaImage {
    RgbaImage::from_pixel(side, side, Rgba([200, 40, 40, 255]))
}

#[test]
fn rotation_expands_canvas_to_fit() {
    let img = opaque_square(40);

    // 45 degrees on a square: both axes grow to about side * sqrt(2).
    let rotated = rotate_expanded(&img, 45.0);
    let expected = ((40.0f32) * std::f32::consts::SQRT_2).ceil() as u32;
    assert!(rotated.width().abs_diff(expected) <= 1);
    assert!(rotated.height().abs_diff(expected) <= 1);

    // A quarter turn of a 40x20 image swaps the axes (up to float rounding).
    let wide = RgbaImage::from_pixel(40, 20, Rgba([1, 2, 3, 255]));
    let quarter = rotate_expanded(&wide, 90.0);
    assert!(quarter.width().abs_diff(20) <= 1);
    assert!(quarter.height().abs_diff(40) <= 1);
}

#[test]
fn rotation_keeps_the_opaque_interior() {
    let rotated = rotate_expanded(&opaque_square(41), 45.0);
    let center = rotated.get_pixel(rotated.width() / 2, rotated.height() / 2);
    // Bicubic resampling of a constant region stays constant up to rounding.
    assert!(center[3] >= 250);
}

#[test]
fn rotation_fill_is_transparent() {
    let rotated = rotate_expanded(&opaque_square(41), 45.0);
    // Canvas corners are outside the rotated square.
    assert_eq!(rotated.get_pixel(0, 0)[3], 0);
    let (w, h) = rotated.dimensions();
    assert_eq!(rotated.get_pixel(w - 1, h - 1)[3], 0);
}

#[test]
fn scaling_is_uniform_with_a_one_pixel_floor() {
    let img = RgbaImage::new(100, 60);
    let half = scale_uniform(&img, 0.5);
    assert_eq!(half.dimensions(), (50, 30));

    let tiny = scale_uniform(&RgbaImage::new(3, 3), 0.1);
    assert_eq!(tiny.dimensions(), (1, 1));
}

#[test]
fn brightness_scales_color_and_leaves_alpha() {
    let img = RgbaImage::from_pixel(2, 2, Rgba([100, 100, 100, 123]));
    let brighter = adjust_brightness(&img, 1.1);
    assert_eq!(brighter.get_pixel(0, 0).0, [110, 110, 110, 123]);

    let dimmer = adjust_brightness(&img, 0.7);
    assert_eq!(dimmer.get_pixel(0, 0).0, [70, 70, 70, 123]);

    let hot = adjust_brightness(&RgbaImage::from_pixel(1, 1, Rgba([250, 0, 0, 9])), 1.1);
    assert_eq!(hot.get_pixel(0, 0).0, [255, 0, 0, 9]);
}

#[test]
fn sampled_params_stay_in_their_ranges() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..200 {
        let params = AugmentParams::sample(&mut rng);
        assert!((0.0..360.0).contains(&params.angle_deg));
        assert!((0.5..=1.0).contains(&params.scale));
        assert!((0.7..=1.1).contains(&params.brightness));
    }
}

#[test]
fn apply_leaves_the_source_untouched() {
    let img = opaque_square(20);
    let before = img.clone();
    let params = AugmentParams {
        angle_deg: 30.0,
        scale: 0.5,
        brightness: 0.8,
    };
    let out = params.apply(&img);
    assert_eq!(img, before);
    assert_ne!(out.dimensions(), img.dimensions());
}
