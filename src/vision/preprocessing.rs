// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image preprocessing for the cats-vs-dogs classifier

use image::imageops::FilterType;
use image::DynamicImage;
use ndarray::Array4;

/// Side length of the square classifier input
pub const CLASSIFIER_INPUT_SIZE: u32 = 100;

/// Number of colour channels the classifier expects (RGB)
pub const CLASSIFIER_CHANNELS: usize = 3;

/// Divisor mapping 8-bit pixel values onto [0, 1]
pub const PIXEL_SCALE: f32 = 255.0;

/// Tensor shape fed to the classifier: `[batch, height, width, channels]`
pub const CLASSIFIER_INPUT_SHAPE: [usize; 4] = [
    1,
    CLASSIFIER_INPUT_SIZE as usize,
    CLASSIFIER_INPUT_SIZE as usize,
    CLASSIFIER_CHANNELS,
];

/// Preprocess an image for classification
///
/// Steps:
/// 1. Stretch to CLASSIFIER_INPUT_SIZE x CLASSIFIER_INPUT_SIZE (aspect ratio is not preserved)
/// 2. Convert to 8-bit RGB
/// 3. Scale: pixel / 255.0
/// 4. Lay out as NHWC tensor [1, 100, 100, 3]
pub fn preprocess_for_classifier(image: &DynamicImage) -> Array4<f32> {
    let resized = image.resize_exact(
        CLASSIFIER_INPUT_SIZE,
        CLASSIFIER_INPUT_SIZE,
        FilterType::CatmullRom,
    );
    let rgb = resized.to_rgb8();

    let mut tensor = Array4::zeros(CLASSIFIER_INPUT_SHAPE);

    for (x, y, pixel) in rgb.enumerate_pixels() {
        for c in 0..CLASSIFIER_CHANNELS {
            tensor[[0, y as usize, x as usize, c]] = pixel[c] as f32 / PIXEL_SCALE;
        }
    }

    tensor
}
