// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod classifier;
pub mod config;
pub mod version;
pub mod vision;

pub use api::{create_app, AppState, PredictResponse};
pub use classifier::{ClassifierError, ImageClassifier, Label, OnnxClassifier};
pub use config::ServerConfig;
