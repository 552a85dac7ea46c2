// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! ONNX Runtime wrapper for the cats-vs-dogs CNN
//!
//! The model is loaded exactly once at startup and validated with a dummy
//! forward pass, so an incompatible artifact fails before the server binds.

use ndarray::Array4;
use ort::execution_providers::CPUExecutionProvider;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Value;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info};

use super::{ClassifierError, ImageClassifier};
use crate::vision::CLASSIFIER_INPUT_SHAPE;

/// ONNX-based binary image classifier
///
/// # Model Details
/// - Input: `[1, 100, 100, 3]` f32, channel-last, values in [0, 1]
/// - Output: `[1, 1]` f32 sigmoid score
/// - Provider: CPU (ONNX Runtime)
///
/// # Thread Safety
/// ONNX Runtime needs exclusive access to a session while it runs, so the
/// session sits behind a `Mutex`. The wrapper itself is never mutated after
/// `load` and is shared through `Arc`.
pub struct OnnxClassifier {
    session: Mutex<Session>,
    model_path: PathBuf,
}

impl std::fmt::Debug for OnnxClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxClassifier")
            .field("model_path", &self.model_path)
            .finish_non_exhaustive()
    }
}

impl OnnxClassifier {
    /// Load the classifier from an ONNX file
    ///
    /// # Errors
    /// Returns error if:
    /// - The model file does not exist
    /// - ONNX Runtime cannot parse or initialize the model
    /// - A validation forward pass on a zero tensor yields no output value
    ///
    /// # Example
    /// ```ignore
    /// let classifier = OnnxClassifier::load("cats_vs_dogs_model.onnx", 4)?;
    /// ```
    pub fn load<P: AsRef<Path>>(model_path: P, intra_threads: usize) -> Result<Self, ClassifierError> {
        let model_path = model_path.as_ref();

        if !model_path.exists() {
            return Err(ClassifierError::ModelNotFound(model_path.to_path_buf()));
        }

        info!("Loading classifier model from {}", model_path.display());

        let mut session = Session::builder()
            .map_err(ClassifierError::runtime)?
            .with_execution_providers([CPUExecutionProvider::default().build()])
            .map_err(ClassifierError::runtime)?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(ClassifierError::runtime)?
            .with_intra_threads(intra_threads)
            .map_err(ClassifierError::runtime)?
            .commit_from_file(model_path)
            .map_err(ClassifierError::runtime)?;

        // Validate the graph accepts our input shape and returns a score
        let zeros = Array4::<f32>::zeros(CLASSIFIER_INPUT_SHAPE);
        let score = run_session(&mut session, zeros)?;
        debug!("Validation forward pass score: {}", score);

        info!("✅ Classifier model loaded successfully");

        Ok(Self {
            session: Mutex::new(session),
            model_path: model_path.to_path_buf(),
        })
    }

    /// Path the model was loaded from
    pub fn model_path(&self) -> &Path {
        &self.model_path
    }
}

impl ImageClassifier for OnnxClassifier {
    fn predict(&self, input: Array4<f32>) -> Result<f32, ClassifierError> {
        if input.shape() != &CLASSIFIER_INPUT_SHAPE[..] {
            return Err(ClassifierError::InvalidInput(format!(
                "expected shape {:?}, got {:?}",
                CLASSIFIER_INPUT_SHAPE,
                input.shape()
            )));
        }

        let mut session = self
            .session
            .lock()
            .map_err(|_| ClassifierError::SessionPoisoned)?;
        run_session(&mut session, input)
    }
}

/// Feed one tensor through the session and read `output[0][0]`
fn run_session(session: &mut Session, input: Array4<f32>) -> Result<f32, ClassifierError> {
    let tensor = Value::from_array(input).map_err(ClassifierError::runtime)?;
    let outputs = session
        .run(ort::inputs![tensor])
        .map_err(ClassifierError::runtime)?;

    // Use index [0] rather than a name; exported graphs name their outputs differently
    let scores = outputs[0]
        .try_extract_array::<f32>()
        .map_err(ClassifierError::runtime)?;

    let score = scores.iter().next().copied();
    score.ok_or(ClassifierError::EmptyOutput)
}
