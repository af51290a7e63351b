use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::Value;
use std::sync::Arc;

use crate::error::MediationError;
use crate::generative::Attachment;
use crate::models::{AnalysisResult, AnalyzeRequest, FilePayload};
use crate::prompt::{self, MAX_ANALYSIS_RECOMMENDATIONS};
use crate::{response, AppError, AppState, Result};

/// Interpret uploaded medical files and suggest at most one clinic.
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<Value>> {
    let Json(req) = payload?;

    let files = req
        .files
        .filter(|files| !files.is_empty())
        .ok_or(AppError::MissingField("files"))?;

    let model = state.model()?;

    let attachments = decode_attachments(&files).map_err(AppError::Analysis)?;

    tracing::info!(
        "Analysis requested: {} attachment(s), {} bytes, notes: {}",
        attachments.len(),
        attachments.iter().map(|a| a.data.len()).sum::<usize>(),
        req.notes.as_deref().is_some_and(|n| !n.trim().is_empty())
    );

    let prompt = prompt::analysis_prompt(&state.catalog, req.notes.as_deref());
    let raw = model
        .generate(&prompt, &attachments)
        .await
        .map_err(|e| AppError::Analysis(MediationError::Model(e)))?;

    let value = response::parse_model_json(&raw)
        .map_err(|e| AppError::Analysis(MediationError::Parse(e)))?;

    inspect_reply(&value);

    Ok(Json(value))
}

fn decode_attachments(
    files: &[FilePayload],
) -> std::result::Result<Vec<Attachment>, MediationError> {
    files
        .iter()
        .enumerate()
        .map(|(index, file)| {
            Attachment::from_base64(&file.mime_type, &file.data)
                .map_err(|source| MediationError::Attachment { index, source })
        })
        .collect()
}

/// Log when the reply strays from the requested shape. The reply is returned as-is.
fn inspect_reply(value: &Value) {
    match serde_json::from_value::<AnalysisResult>(value.clone()) {
        Ok(result) if result.recommendations.len() > MAX_ANALYSIS_RECOMMENDATIONS => {
            tracing::warn!(
                "Model returned {} recommendations for an analysis, more than the {} requested",
                result.recommendations.len(),
                MAX_ANALYSIS_RECOMMENDATIONS
            );
        }
        Ok(result) => {
            tracing::debug!(
                "Analysis reply: {} advice item(s), {} recommendation(s)",
                result.temporary_advice.len(),
                result.recommendations.len()
            );
        }
        Err(e) => {
            tracing::warn!("Model reply does not match the analysis shape: {}", e);
        }
    }
}
