use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::Value;
use std::sync::Arc;

use crate::error::MediationError;
use crate::models::{RecommendRequest, RecommendationResponse};
use crate::prompt::{self, MAX_SYMPTOM_RECOMMENDATIONS};
use crate::{response, AppError, AppState, Result};

/// Suggest up to two clinics for a free-text symptom description.
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<RecommendRequest>, JsonRejection>,
) -> Result<Json<Value>> {
    let Json(req) = payload?;

    let symptoms = req
        .symptoms
        .filter(|s| !s.is_empty())
        .ok_or(AppError::MissingField("symptoms"))?;

    let model = state.model()?;

    tracing::info!("Recommendation requested ({} chars)", symptoms.chars().count());

    let prompt = prompt::symptom_prompt(&state.catalog, &symptoms);
    let raw = model
        .generate(&prompt, &[])
        .await
        .map_err(|e| AppError::Recommendation(MediationError::Model(e)))?;

    let value = response::parse_model_json(&raw)
        .map_err(|e| AppError::Recommendation(MediationError::Parse(e)))?;

    inspect_reply(&value);

    Ok(Json(value))
}

/// Log when the reply strays from the requested shape. The reply is returned as-is.
fn inspect_reply(value: &Value) {
    match serde_json::from_value::<RecommendationResponse>(value.clone()) {
        Ok(reply) if reply.recommendations.len() > MAX_SYMPTOM_RECOMMENDATIONS => {
            tracing::warn!(
                "Model returned {} recommendations, more than the {} requested",
                reply.recommendations.len(),
                MAX_SYMPTOM_RECOMMENDATIONS
            );
        }
        Ok(reply) => {
            tracing::debug!("Model returned {} recommendations", reply.recommendations.len());
        }
        Err(e) => {
            tracing::warn!("Model reply does not match the recommendation shape: {}", e);
        }
    }
}
