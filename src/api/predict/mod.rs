// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Prediction API endpoint module
//!
//! Provides POST /predict/ for classifying an uploaded image as a cat or a dog.

pub mod handler;
pub mod response;

pub use handler::{classify_image_bytes, predict_handler, FILE_FIELD};
pub use response::PredictResponse;
