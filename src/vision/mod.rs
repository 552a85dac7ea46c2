// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Vision processing module for the cats-vs-dogs classifier
//!
//! This module provides:
//! - Decoding of uploaded image bytes
//! - Resizing and scaling into the classifier's input tensor

pub mod image_utils;
pub mod preprocessing;

pub use image_utils::{decode_image_bytes, detect_format, ImageError, ImageInfo};
pub use preprocessing::{preprocess_for_classifier, CLASSIFIER_INPUT_SHAPE, CLASSIFIER_INPUT_SIZE};
