//! Liveness/config probe for `/api/test`.

use axum::{extract::State, Json};
use serde::Serialize;

use super::routes::ApiState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeResponse {
    pub message: String,
    pub api_key_configured: bool,
}

pub async fn get_test(State(state): State<ApiState>) -> Json<ProbeResponse> {
    Json(ProbeResponse {
        message: "Backend is running".to_string(),
        api_key_configured: state.cfg.api_key_configured(),
    })
}
