use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use super::default_partner_id;
use crate::models::{SnsNotificationResponse, WebhookResultResponse};
use crate::routes::AppState;

#[derive(Debug, Deserialize)]
pub struct WebhookResultRequest {
    /// `SUCCESS` or `ERROR` (any casing); anything else is a contract error.
    pub status: String,
    pub error_message: Option<String>,
    #[serde(default = "default_partner_id")]
    pub partner_id: String,
    pub processed_count: Option<u32>,
}

/// SNS delivers its envelope with PascalCase field names.
#[derive(Debug, Deserialize)]
pub struct SnsNotificationRequest {
    #[serde(rename = "Type")]
    pub notification_type: String,
    #[serde(rename = "Message")]
    pub message: String,
    #[serde(rename = "TopicArn")]
    pub topic_arn: Option<String>,
    #[serde(rename = "SubscribeURL")]
    pub subscribe_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SnsParams {
    #[serde(default = "default_partner_id")]
    pub partner_id: String,
    #[serde(default)]
    pub simulate_error: bool,
}

/// Simulate a partner's webhook confirmation.
///
/// POST /api/v1/integrations/results/{sync_id}
pub async fn receive_webhook_result(
    State(state): State<Arc<AppState>>,
    Path(sync_id): Path<String>,
    Json(payload): Json<WebhookResultRequest>,
) -> (StatusCode, Json<WebhookResultResponse>) {
    let response = state.sender.process_webhook_result(
        &sync_id,
        &payload.status,
        payload.error_message.as_deref(),
        &payload.partner_id,
    );

    let status = if response.success {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };
    (status, Json(response))
}

/// Simulate receiving an AWS SNS notification.
///
/// POST /api/v1/webhooks
pub async fn receive_sns_notification(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SnsParams>,
    Json(payload): Json<SnsNotificationRequest>,
) -> (StatusCode, Json<SnsNotificationResponse>) {
    let response = state.sender.process_sns_notification(
        &payload.notification_type,
        &params.partner_id,
        params.simulate_error,
    );

    let status = if response.success {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };
    (status, Json(response))
}
