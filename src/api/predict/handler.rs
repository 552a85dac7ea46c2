// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Prediction endpoint handler

use axum::{extract::State, Json};
use axum_extra::extract::Multipart;
use tracing::{debug, info, warn};

use super::response::PredictResponse;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::classifier::{ImageClassifier, Label};
use crate::vision::{decode_image_bytes, preprocess_for_classifier};

/// Name of the multipart field carrying the image
pub const FILE_FIELD: &str = "file";

/// POST /predict/ - Classify an uploaded image as cat or dog
///
/// # Request
/// `multipart/form-data` with the image in the `file` field. Any format the
/// decoder recognizes from the bytes themselves is accepted.
///
/// # Response
/// - `prediction`: `"dog"` when the model score is above 0.5, otherwise `"cat"`
///
/// # Errors
/// - 400 Bad Request: Body is not readable multipart
/// - 422 Unprocessable Entity: No `file` field in the form
/// - 500 Internal Server Error: Image could not be decoded or inference failed
pub async fn predict_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<PredictResponse>, ApiError> {
    // 1. Read the uploaded file
    let bytes = read_file_field(&mut multipart).await?;
    debug!("Prediction request received: {} bytes", bytes.len());

    // 2. Decode, preprocess and run the model off the async workers
    let classifier = state.classifier.clone();
    let (label, score) =
        tokio::task::spawn_blocking(move || classify_image_bytes(classifier.as_ref(), &bytes))
            .await
            .map_err(|e| {
                warn!("Prediction task failed: {}", e);
                ApiError::InternalError(format!("Prediction task failed: {}", e))
            })??;

    info!("Prediction complete: {} (score {:.4})", label, score);

    Ok(Json(PredictResponse::new(label)))
}

/// Run the full decode → preprocess → forward pass → threshold pipeline
///
/// Returns the label together with the raw score for logging.
pub fn classify_image_bytes(
    classifier: &dyn ImageClassifier,
    bytes: &[u8],
) -> Result<(Label, f32), ApiError> {
    let (image, image_info) = decode_image_bytes(bytes).map_err(|e| {
        warn!("Failed to decode image: {}", e);
        ApiError::InternalError(format!("Invalid image: {}", e))
    })?;

    debug!(
        "Decoded image: {}x{} {:?}, {} bytes",
        image_info.width, image_info.height, image_info.format, image_info.size_bytes
    );

    let input = preprocess_for_classifier(&image);
    drop(image);

    let score = classifier.predict(input).map_err(|e| {
        warn!("Classifier inference failed: {}", e);
        ApiError::InternalError(format!("Inference failed: {}", e))
    })?;

    Ok((Label::from_score(score), score))
}

/// Pull the bytes of the `file` field out of the form, skipping other fields
async fn read_file_field(multipart: &mut Multipart) -> Result<Vec<u8>, ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        warn!("Malformed multipart body: {}", e);
        ApiError::InvalidRequest(format!("Malformed multipart body: {}", e))
    })? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let data = field.bytes().await.map_err(|e| {
            warn!("Failed to read uploaded file: {}", e);
            ApiError::InvalidRequest(format!("Failed to read uploaded file: {}", e))
        })?;
        return Ok(data.to_vec());
    }

    Err(ApiError::ValidationError {
        field: FILE_FIELD.to_string(),
        message: "file is required".to_string(),
    })
}
