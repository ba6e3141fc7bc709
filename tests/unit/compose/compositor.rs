use super::*;

use image::Rgba;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::foundation::core::MASK_PALETTE;

fn rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn size_64() -> OutputSize {
    OutputSize::new(64, 64).unwrap()
}

fn opaque_layer(width: u32, height: u32, rgb: [u8; 3], slot: usize) -> ForegroundLayer {
    ForegroundLayer {
        image: RgbaImage::from_pixel(width, height, Rgba([rgb[0], rgb[1], rgb[2], 255])),
        color: MASK_PALETTE[slot],
    }
}

#[test]
fn crop_rejects_small_background() {
    let background = RgbaImage::new(63, 100);
    let err = crop_background(&background, size_64(), &mut rng()).unwrap_err();
    assert!(matches!(err, MaskforgeError::Geometry(_)));
}

#[test]
fn crop_of_exact_size_background_is_identity() {
    let background = RgbaImage::from_pixel(64, 64, Rgba([7, 8, 9, 255]));
    let crop = crop_background(&background, size_64(), &mut rng()).unwrap();
    assert_eq!(crop, background);
}

#[test]
fn crop_stays_inside_the_background() {
    let mut r = rng();
    let background = RgbaImage::from_pixel(100, 80, Rgba([1, 1, 1, 255]));
    for _ in 0..50 {
        let crop = crop_background(&background, size_64(), &mut r).unwrap();
        assert_eq!(crop.dimensions(), (64, 64));
    }
}

#[test]
fn oversized_layer_is_a_geometry_error() {
    let crop = RgbaImage::new(64, 64);
    let layer = opaque_layer(65, 64, [1, 2, 3], 0);
    let err = compose(&crop, &[layer], &mut rng()).unwrap_err();
    assert!(matches!(err, MaskforgeError::Geometry(_)));
}

#[test]
fn exact_fit_layer_lands_at_the_origin() {
    // The offset range degenerates to a single point rather than failing.
    let crop = RgbaImage::from_pixel(64, 64, Rgba([0, 0, 0, 255]));
    let layer = opaque_layer(64, 64, [10, 20, 30], 0);
    let sample = compose(&crop, &[layer], &mut rng()).unwrap();

    for px in sample.image.pixels() {
        assert_eq!(px.0, [10, 20, 30]);
    }
    for px in sample.mask.pixels() {
        assert_eq!(px.0, [MASK_PALETTE[0].r, MASK_PALETTE[0].g, MASK_PALETTE[0].b]);
    }
}

#[test]
fn later_layer_wins_at_overlaps() {
    let crop = RgbaImage::from_pixel(64, 64, Rgba([0, 0, 0, 255]));

    // Slot 0 occupies columns 0..40, slot 1 occupies columns 20..60; both span
    // the full canvas so their placement is forced to the origin.
    let mut first = RgbaImage::new(64, 64);
    let mut second = RgbaImage::new(64, 64);
    for y in 0..64 {
        for x in 0..40 {
            first.put_pixel(x, y, Rgba([200, 0, 0, 255]));
        }
        for x in 20..60 {
            second.put_pixel(x, y, Rgba([0, 200, 0, 255]));
        }
    }
    let layers = [
        ForegroundLayer {
            image: first,
            color: MASK_PALETTE[0],
        },
        ForegroundLayer {
            image: second,
            color: MASK_PALETTE[1],
        },
    ];

    let sample = compose(&crop, &layers, &mut rng()).unwrap();
    for y in 0..64 {
        assert_eq!(sample.mask.get_pixel(10, y).0, [255, 0, 0]);
        // Overlap region: the later slot's color fully overwrites.
        assert_eq!(sample.mask.get_pixel(30, y).0, [0, 255, 0]);
        assert_eq!(sample.mask.get_pixel(50, y).0, [0, 255, 0]);
        assert_eq!(sample.mask.get_pixel(62, y).0, [0, 0, 0]);
    }
}

#[test]
fn faint_alpha_blends_pixels_but_not_the_mask() {
    let crop = RgbaImage::from_pixel(64, 64, Rgba([100, 100, 100, 255]));
    let layer = ForegroundLayer {
        image: RgbaImage::from_pixel(64, 64, Rgba([255, 255, 255, 128])),
        color: MASK_PALETTE[0],
    };

    let sample = compose(&crop, &[layer], &mut rng()).unwrap();
    // (255*128 + 100*127 + 127) / 255 = 178 for every channel.
    assert_eq!(sample.image.get_pixel(32, 32).0, [178, 178, 178]);
    // 128 is below the occupancy threshold: the mask stays background.
    for px in sample.mask.pixels() {
        assert_eq!(px.0, [0, 0, 0]);
    }
}

#[test]
fn occupancy_threshold_is_exclusive_at_200() {
    let crop = RgbaImage::from_pixel(64, 64, Rgba([0, 0, 0, 255]));

    let at_cut = ForegroundLayer {
        image: RgbaImage::from_pixel(64, 64, Rgba([50, 50, 50, ALPHA_THRESHOLD])),
        color: MASK_PALETTE[0],
    };
    let sample = compose(&crop, &[at_cut], &mut rng()).unwrap();
    assert!(sample.mask.pixels().all(|px| px.0 == [0, 0, 0]));

    let above_cut = ForegroundLayer {
        image: RgbaImage::from_pixel(64, 64, Rgba([50, 50, 50, ALPHA_THRESHOLD + 1])),
        color: MASK_PALETTE[0],
    };
    let sample = compose(&crop, &[above_cut], &mut rng()).unwrap();
    assert!(sample.mask.pixels().all(|px| px.0 == [255, 0, 0]));
}

#[test]
fn mask_pixels_are_never_blended() {
    let crop = RgbaImage::from_pixel(64, 64, Rgba([90, 90, 90, 255]));

    // Soft-edged cutout: opaque core, anti-aliased fringe.
    let mut soft = RgbaImage::new(64, 64);
    for y in 8..56 {
        for x in 8..56 {
            let edge = x < 12 || x >= 52 || y < 12 || y >= 52;
            let alpha = if edge { 160 } else { 255 };
            soft.put_pixel(x, y, Rgba([30, 200, 30, alpha]));
        }
    }
    let layers = [ForegroundLayer {
        image: soft,
        color: MASK_PALETTE[2],
    }];

    let sample = compose(&crop, &layers, &mut rng()).unwrap();
    let palette_px = [MASK_PALETTE[2].r, MASK_PALETTE[2].g, MASK_PALETTE[2].b];
    let mut occupied = 0usize;
    for px in sample.mask.pixels() {
        assert!(px.0 == [0, 0, 0] || px.0 == palette_px);
        if px.0 == palette_px {
            occupied += 1;
        }
    }
    // Only the opaque 40x40 core passes the threshold.
    assert_eq!(occupied, 40 * 40);
}
