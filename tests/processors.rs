use image::{DynamicImage, GenericImageView, RgbImage};
use rastermill::{
    crop, crop_box, crop_to_box, flip, resize, rotate, rotate_crop, rotated_rect_aspect_ratio,
    rotated_rect_max_area, scaled_size, Anchor, CropOptions, Error, FitMode, Flip,
    ResizeAlgorithm, ResizeOptions, RotateCropMode, RotateCropOptions, RotateOptions,
};

/// Deterministic gradient so resampled outputs are not uniform.
fn gradient(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    }))
}

fn assert_pixels_equal(a: &DynamicImage, b: &DynamicImage) {
    assert_eq!(a.dimensions(), b.dimensions());
    assert_eq!(a.color(), b.color());
    assert_eq!(a.as_bytes(), b.as_bytes());
}

#[test]
fn flip_none_is_identity() {
    let img = gradient(20, 10);
    let flipped = flip(img.clone(), Flip::None);
    assert_pixels_equal(&img, &flipped);
}

#[test]
fn flip_twice_restores_image() {
    let img = gradient(20, 10);
    let twice = flip(flip(img.clone(), Flip::Horizontal), Flip::Horizontal);
    assert_pixels_equal(&img, &twice);

    let twice = flip(flip(img.clone(), Flip::Vertical), Flip::Vertical);
    assert_pixels_equal(&img, &twice);
}

#[test]
fn flip_mirrors_along_the_requested_axis() {
    let img = gradient(20, 10);

    let horizontal = flip(img.clone(), Flip::Horizontal);
    assert_eq!(img.get_pixel(0, 0), horizontal.get_pixel(19, 0));

    let vertical = flip(img.clone(), Flip::Vertical);
    assert_eq!(img.get_pixel(0, 0), vertical.get_pixel(0, 9));
}

#[test]
fn rotate_zero_is_identity() {
    let img = gradient(20, 10);
    let rotated = rotate(
        img.clone(),
        &RotateOptions {
            degrees: 0,
            color: Some([255, 0, 0, 255]),
            ..Default::default()
        },
    )
    .unwrap();
    assert_pixels_equal(&img, &rotated);
}

#[test]
fn four_quarter_turns_restore_image() {
    let img = gradient(20, 10);
    let mut turned = img.clone();
    for _ in 0..4 {
        turned = rotate(
            turned,
            &RotateOptions {
                degrees: 90,
                ..Default::default()
            },
        )
        .unwrap();
    }
    assert_pixels_equal(&img, &turned);
}

#[test]
fn quarter_turn_swaps_dimensions_losslessly() {
    let img = gradient(200, 100);
    let rotated = rotate(
        img,
        &RotateOptions {
            degrees: 90,
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(rotated.dimensions(), (100, 200));
}

#[test]
fn negative_quarter_turns_transpose_too() {
    let img = gradient(20, 10);
    let minus = rotate(
        img.clone(),
        &RotateOptions {
            degrees: -90,
            ..Default::default()
        },
    )
    .unwrap();
    let plus = rotate(
        img,
        &RotateOptions {
            degrees: 270,
            ..Default::default()
        },
    )
    .unwrap();
    assert_pixels_equal(&minus, &plus);
}

#[test]
fn arbitrary_rotation_extends_canvas() {
    let img = gradient(100, 100);
    let rotated = rotate(
        img,
        &RotateOptions {
            degrees: 45,
            ..Default::default()
        },
    )
    .unwrap();
    // 100 * cos45 + 100 * sin45 = 141.42, ceiled
    assert_eq!(rotated.dimensions(), (142, 142));
}

#[test]
fn rotation_with_opaque_fill_keeps_source_color_mode() {
    let img = gradient(60, 40);
    let rotated = rotate(
        img,
        &RotateOptions {
            degrees: 30,
            color: Some([255, 0, 0, 255]),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(rotated.color(), image::ColorType::Rgb8);
}

#[test]
fn rotation_with_translucent_fill_keeps_alpha_when_asked() {
    let img = gradient(60, 40);
    let rotated = rotate(
        img.clone(),
        &RotateOptions {
            degrees: 30,
            color: Some([255, 0, 0, 128]),
            preserve_transparency: true,
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(rotated.color(), image::ColorType::Rgba8);

    let flattened = rotate(
        img,
        &RotateOptions {
            degrees: 30,
            color: Some([255, 0, 0, 128]),
            preserve_transparency: false,
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(flattened.color(), image::ColorType::Rgb8);
}

#[test]
fn rotation_fill_color_lands_in_exposed_corners() {
    let img = gradient(60, 40);
    let rotated = rotate(
        img,
        &RotateOptions {
            degrees: 30,
            color: Some([0, 255, 0, 255]),
            ..Default::default()
        },
    )
    .unwrap();
    // top-left corner of the extended canvas is outside the source
    assert_eq!(rotated.get_pixel(0, 0), image::Rgba([0, 255, 0, 255]));
}

#[test]
fn crop_zero_insets_is_identity() {
    let img = gradient(50, 30);
    let cropped = crop(
        img.clone(),
        &CropOptions {
            crop_box: Some([0.0, 0.0, 0.0, 0.0]),
            ..Default::default()
        },
    )
    .unwrap();
    assert_pixels_equal(&img, &cropped);

    let cropped = crop(img.clone(), &CropOptions::default()).unwrap();
    assert_pixels_equal(&img, &cropped);
}

#[test]
fn crop_percent_insets_scale_with_the_image() {
    let img = gradient(100, 100);
    let cropped = crop(
        img,
        &CropOptions {
            crop_box: Some([10.0, 10.0, 10.0, 10.0]),
            crop_percent: true,
        },
    )
    .unwrap();
    assert_eq!(cropped.dimensions(), (80, 80));
}

#[test]
fn crop_pixel_insets_subtract_from_each_edge() {
    let img = gradient(100, 50);
    let cropped = crop(
        img,
        &CropOptions {
            crop_box: Some([5.0, 5.0, 10.0, 10.0]),
            crop_percent: false,
        },
    )
    .unwrap();
    assert_eq!(cropped.dimensions(), (85, 35));
}

#[test]
fn crossing_insets_are_rejected_as_geometry_errors() {
    let img = gradient(100, 100);
    let result = crop(
        img,
        &CropOptions {
            crop_box: Some([60.0, 0.0, 60.0, 0.0]),
            crop_percent: true,
        },
    );
    assert!(matches!(result, Err(Error::InvalidGeometry(_))));
}

#[test]
fn crop_primitive_rejects_out_of_bounds_boxes() {
    let img = gradient(10, 10);
    assert!(matches!(
        crop_to_box(&img, (0, 0, 11, 10)),
        Err(Error::InvalidGeometry(_))
    ));
    assert!(matches!(
        crop_to_box(&img, (-1, 0, 10, 10)),
        Err(Error::InvalidGeometry(_))
    ));
    assert!(matches!(
        crop_to_box(&img, (5, 5, 5, 8)),
        Err(Error::InvalidGeometry(_))
    ));
}

#[test]
fn anchor_boxes_land_where_expected() {
    assert_eq!(crop_box((100, 100), 40, 40, Anchor::Right), (60, 30, 100, 70));
    assert_eq!(crop_box((100, 100), 40, 40, Anchor::Center), (30, 30, 70, 70));
    assert_eq!(crop_box((100, 100), 40, 40, Anchor::Top), (30, 0, 70, 40));
    assert_eq!(crop_box((100, 100), 40, 40, Anchor::Left), (0, 30, 40, 70));
    assert_eq!(crop_box((100, 100), 40, 40, Anchor::Bottom), (30, 60, 70, 100));
}

#[test]
fn anchor_box_target_clamps_to_the_image() {
    assert_eq!(crop_box((100, 100), 200, 50, Anchor::Center), (0, 25, 100, 75));
}

#[test]
fn anchor_box_truncates_on_odd_sizes() {
    // center of 101 truncates to 50, box start to 30
    assert_eq!(crop_box((101, 101), 40, 40, Anchor::Center), (30, 30, 70, 70));
}

#[test]
fn scaled_size_shrinks_into_the_box() {
    assert_eq!(
        scaled_size((100, 200), (50, 50), FitMode::Fit, false).unwrap(),
        (25, 50)
    );
    assert_eq!(
        scaled_size((200, 100), (50, 50), FitMode::Fit, false).unwrap(),
        (50, 25)
    );
}

#[test]
fn scaled_size_without_constraint_is_identity() {
    assert_eq!(
        scaled_size((123, 77), (123, 77), FitMode::Fit, false).unwrap(),
        (123, 77)
    );
}

#[test]
fn scaled_size_does_not_upscale_unless_asked() {
    assert_eq!(
        scaled_size((40, 20), (100, 100), FitMode::Fit, false).unwrap(),
        (40, 20)
    );
    assert_eq!(
        scaled_size((40, 20), (100, 100), FitMode::Fit, true).unwrap(),
        (100, 50)
    );
}

#[test]
fn scaled_size_oversizes_for_anchor_modes() {
    // the anchor crop needs both dimensions to cover the box
    assert_eq!(
        scaled_size((100, 100), (50, 25), FitMode::Anchor(Anchor::Top), false).unwrap(),
        (50, 50)
    );
}

#[test]
fn scaled_size_rejects_a_zero_box() {
    assert!(matches!(
        scaled_size((100, 100), (0, 50), FitMode::Fit, false),
        Err(Error::InvalidParameter(_))
    ));
    assert!(matches!(
        scaled_size((100, 100), (50, 0), FitMode::Fit, false),
        Err(Error::InvalidParameter(_))
    ));
}

#[test]
fn resize_fit_keeps_aspect_within_the_box() {
    let img = gradient(200, 100);
    let resized = resize(
        img,
        &ResizeOptions {
            width: Some(50),
            height: Some(50),
            fit: FitMode::Fit,
            upscale: false,
        },
        ResizeAlgorithm::Lanczos3,
    )
    .unwrap();
    assert_eq!(resized.dimensions(), (50, 25));
}

#[test]
fn resize_anchor_mode_fills_the_box_exactly() {
    let img = gradient(100, 100);
    let resized = resize(
        img,
        &ResizeOptions {
            width: Some(50),
            height: Some(25),
            fit: FitMode::Anchor(Anchor::Top),
            upscale: false,
        },
        ResizeAlgorithm::Lanczos3,
    )
    .unwrap();
    assert_eq!(resized.dimensions(), (50, 25));
}

#[test]
fn resize_with_one_dimension_constrains_that_axis() {
    let img = gradient(200, 100);
    let resized = resize(
        img,
        &ResizeOptions {
            width: Some(50),
            height: None,
            fit: FitMode::Fit,
            upscale: false,
        },
        ResizeAlgorithm::Lanczos3,
    )
    .unwrap();
    assert_eq!(resized.dimensions(), (50, 25));
}

#[test]
fn max_area_rect_matches_the_closed_form() {
    // 100x50 at 30 degrees: half-constrained case, x = 25,
    // w = x / sin(30) = 50, h = x / cos(30) = 28.86...
    assert_eq!(rotated_rect_max_area((100, 50), 30), (50, 28));
}

#[test]
fn max_area_rect_handles_degenerate_input() {
    assert_eq!(rotated_rect_max_area((0, 50), 30), (0, 0));
    assert_eq!(rotated_rect_max_area((100, 0), 30), (0, 0));
}

#[test]
fn rect_strategies_are_sign_insensitive() {
    // the max-area formula keeps the sign of the angle and folds only
    // sin/cos; the aspect-ratio formula folds the angle itself -- both
    // must come out identical for mirrored angles
    assert_eq!(
        rotated_rect_max_area((100, 50), 30),
        rotated_rect_max_area((100, 50), -30)
    );
    assert_eq!(
        rotated_rect_aspect_ratio((200, 100), (224, 187), 30),
        rotated_rect_aspect_ratio((200, 100), (224, 187), -30)
    );
}

#[test]
fn aspect_ratio_rect_preserves_the_source_ratio() {
    let img = gradient(200, 100);
    let cropped = rotate_crop(
        img,
        &RotateCropOptions {
            degrees: 30,
            crop_mode: RotateCropMode::AspectRatio,
        },
    )
    .unwrap();
    // rotated canvas is 224x187; total_height 100 over the angle terms
    // gives 53, scaled back by the 2:1 ratio
    assert_eq!(cropped.dimensions(), (107, 53));
}

#[test]
fn rotate_crop_stays_inside_the_rotated_canvas() {
    for crop_mode in [RotateCropMode::AspectRatio, RotateCropMode::MaxArea] {
        for degrees in [30, -30, 45, 60, 123] {
            let rotated = rotate(
                gradient(120, 80),
                &RotateOptions {
                    degrees,
                    ..Default::default()
                },
            )
            .unwrap();

            let cropped = rotate_crop(
                gradient(120, 80),
                &RotateCropOptions { degrees, crop_mode },
            )
            .unwrap();

            assert!(
                cropped.width() <= rotated.width() && cropped.height() <= rotated.height(),
                "{:?} at {} degrees: {:?} exceeds {:?}",
                crop_mode,
                degrees,
                cropped.dimensions(),
                rotated.dimensions()
            );
            assert!(cropped.width() > 0 && cropped.height() > 0);
        }
    }
}

#[test]
fn rotate_crop_passes_quarter_turns_through() {
    let img = gradient(200, 100);
    let cropped = rotate_crop(
        img,
        &RotateCropOptions {
            degrees: 90,
            crop_mode: RotateCropMode::MaxArea,
        },
    )
    .unwrap();
    assert_eq!(cropped.dimensions(), (100, 200));
}
