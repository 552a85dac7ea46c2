// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Cats-vs-dogs classifier
//!
//! Wraps a pretrained binary CNN exported to ONNX. The network takes a
//! `[1, 100, 100, 3]` tensor scaled to [0, 1] and emits a single sigmoid
//! score, where values above [`DECISION_THRESHOLD`] mean "dog".

pub mod onnx_model;

use std::fmt;
use std::path::PathBuf;

use ndarray::Array4;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use onnx_model::OnnxClassifier;

/// Scores strictly above this value are classified as [`Label::Dog`]
pub const DECISION_THRESHOLD: f32 = 0.5;

/// Default model artifact, resolved relative to the working directory
pub const DEFAULT_MODEL_PATH: &str = "cats_vs_dogs_model.onnx";

/// Classification outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Cat,
    Dog,
}

impl Label {
    /// Map a raw model score onto a label
    ///
    /// The comparison is strict: a score of exactly 0.5 (or NaN) is a cat.
    pub fn from_score(score: f32) -> Self {
        if score > DECISION_THRESHOLD {
            Label::Dog
        } else {
            Label::Cat
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Cat => "cat",
            Label::Dog => "dog",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while loading or running the classifier
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("Classifier model file not found: {}", .0.display())]
    ModelNotFound(PathBuf),

    #[error("ONNX Runtime error: {0}")]
    Runtime(String),

    #[error("Classifier produced no output values")]
    EmptyOutput,

    #[error("Invalid classifier input: {0}")]
    InvalidInput(String),

    #[error("Classifier session lock poisoned")]
    SessionPoisoned,
}

impl ClassifierError {
    pub(crate) fn runtime(err: impl fmt::Display) -> Self {
        ClassifierError::Runtime(err.to_string())
    }
}

/// A loaded image classifier that can be shared across request handlers
///
/// Implementations are immutable once constructed; `predict` takes `&self`
/// so a single instance can serve concurrent requests.
pub trait ImageClassifier: Send + Sync {
    /// Run one forward pass and return the first output scalar
    fn predict(&self, input: Array4<f32>) -> Result<f32, ClassifierError>;

    /// Run one forward pass and threshold the score
    fn classify(&self, input: Array4<f32>) -> Result<Label, ClassifierError> {
        self.predict(input).map(Label::from_score)
    }
}
