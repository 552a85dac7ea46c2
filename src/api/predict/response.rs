// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Prediction response types

use serde::{Deserialize, Serialize};

use crate::classifier::Label;

/// Response from POST /predict/
///
/// Serializes to exactly `{"prediction":"cat"}` or `{"prediction":"dog"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictResponse {
    pub prediction: Label,
}

impl PredictResponse {
    pub fn new(prediction: Label) -> Self {
        Self { prediction }
    }
}
