// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! ONNX classifier tests against a real graph
//!
//! `tests/fixtures/mean_sigmoid.onnx` takes a `[1, 100, 100, 3]` f32 tensor
//! and returns `sigmoid(mean(input))` as a `[1, 1, 1, 1]` tensor, so the
//! expected score of any input is known. Regenerate it with
//! `tests/fixtures/generate_mean_sigmoid.py`.

use catvsdog_node::classifier::{ClassifierError, ImageClassifier, Label, OnnxClassifier};
use catvsdog_node::vision::{preprocess_for_classifier, CLASSIFIER_INPUT_SHAPE};
use image::{DynamicImage, Rgb, RgbImage};
use ndarray::Array4;

const MODEL_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/mean_sigmoid.onnx");

fn load_model() -> OnnxClassifier {
    OnnxClassifier::load(MODEL_PATH, 1).expect("Failed to load test model")
}

fn solid_tensor(width: u32, height: u32, value: u8) -> Array4<f32> {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(
        width,
        height,
        Rgb([value, value, value]),
    ));
    preprocess_for_classifier(&img)
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

#[test]
fn test_model_loads_successfully() {
    let result = OnnxClassifier::load(MODEL_PATH, 1);

    assert!(result.is_ok(), "Failed to load ONNX model: {:?}", result.err());
    assert_eq!(result.unwrap().model_path().to_str(), Some(MODEL_PATH));
}

#[test]
fn test_black_image_scores_half_and_is_cat() {
    let model = load_model();

    let score = model.predict(solid_tensor(200, 200, 0)).unwrap();
    assert!((score - 0.5).abs() < 1e-6, "expected 0.5, got {}", score);

    let label = model.classify(solid_tensor(200, 200, 0)).unwrap();
    assert_eq!(label, Label::Cat);
}

#[test]
fn test_white_image_scores_above_threshold_and_is_dog() {
    let model = load_model();

    let score = model.predict(solid_tensor(50, 50, 255)).unwrap();
    assert!(score > 0.5);
    assert!((score - sigmoid(1.0)).abs() < 1e-5, "expected sigmoid(1), got {}", score);

    let label = model.classify(solid_tensor(50, 50, 255)).unwrap();
    assert_eq!(label, Label::Dog);
}

#[test]
fn test_score_follows_tensor_mean() {
    let model = load_model();

    // Left half white, right half black: mean 0.5 across every channel
    let mut img = RgbImage::new(100, 100);
    for (x, _y, pixel) in img.enumerate_pixels_mut() {
        *pixel = if x < 50 { Rgb([255, 255, 255]) } else { Rgb([0, 0, 0]) };
    }
    let tensor = preprocess_for_classifier(&DynamicImage::ImageRgb8(img));
    let mean = tensor.mean().unwrap();

    let score = model.predict(tensor).unwrap();
    assert!((score - sigmoid(mean)).abs() < 1e-5, "expected {}, got {}", sigmoid(mean), score);
}

#[test]
fn test_predictions_are_deterministic() {
    let model = load_model();

    let first = model.predict(solid_tensor(64, 48, 90)).unwrap();
    let second = model.predict(solid_tensor(64, 48, 90)).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_wrong_shape_is_rejected() {
    let model = load_model();

    let result = model.predict(Array4::zeros((1, 50, 50, 3)));
    assert!(matches!(result, Err(ClassifierError::InvalidInput(_))));

    // Channel-first layout is not accepted either
    let result = model.predict(Array4::zeros((1, 3, 100, 100)));
    assert!(matches!(result, Err(ClassifierError::InvalidInput(_))));
}

#[test]
fn test_shared_model_serves_concurrent_callers() {
    let model = std::sync::Arc::new(load_model());

    let handles: Vec<_> = [0u8, 255]
        .into_iter()
        .cycle()
        .take(8)
        .map(|value| {
            let model = model.clone();
            std::thread::spawn(move || {
                let tensor = Array4::from_elem(CLASSIFIER_INPUT_SHAPE, value as f32 / 255.0);
                (value, model.classify(tensor).unwrap())
            })
        })
        .collect();

    for handle in handles {
        let (value, label) = handle.join().unwrap();
        let expected = if value == 0 { Label::Cat } else { Label::Dog };
        assert_eq!(label, expected);
    }
}
