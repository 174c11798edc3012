use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use super::{default_partner_id, SimulationParams};
use crate::errors::ApiError;
use crate::models::{
    AuthRestrictionType, AuthV1Response, AuthV2Response, SessionValidationResponse,
    TokenExchangeResponse,
};
use crate::routes::AppState;

#[derive(Debug, Deserialize)]
pub struct AuthV1Request {
    pub username: String,
    #[serde(default = "default_partner_id")]
    pub partner_id: String,
}

#[derive(Debug, Deserialize)]
pub struct AuthV2Request {
    pub username: String,
    #[serde(default = "default_partner_id")]
    pub partner_id: String,
    /// One of `BU`, `PARTNER_ACCOUNT`, `PARTNER_INSTITUTION`.
    pub restriction_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TokenExchangeRequest {
    pub opaque_token: String,
    #[serde(default = "default_partner_id")]
    pub partner_id: String,
}

#[derive(Debug, Deserialize)]
pub struct SessionValidationRequest {
    pub opaque_token: String,
    #[serde(default = "default_partner_id")]
    pub partner_id: String,
}

#[derive(Debug, Deserialize)]
pub struct RedirectParams {
    #[serde(default = "default_partner_id")]
    pub partner_id: String,
    #[serde(default)]
    pub simulate_error: bool,
}

/// Simulate v1 SSO authentication.
///
/// POST /api/v1/auth
pub async fn authenticate_v1(
    State(state): State<Arc<AppState>>,
    Query(sim): Query<SimulationParams>,
    Json(payload): Json<AuthV1Request>,
) -> (StatusCode, Json<AuthV1Response>) {
    let response = state
        .auth
        .authenticate_v1(&payload.partner_id, sim.simulate_error, sim.simulate_delay)
        .await;

    let status = if response.success {
        StatusCode::OK
    } else {
        StatusCode::UNAUTHORIZED
    };
    (status, Json(response))
}

/// Simulate v2 SSO authentication with restriction strategies.
///
/// POST /api/v2/auth
pub async fn authenticate_v2(
    State(state): State<Arc<AppState>>,
    Query(sim): Query<SimulationParams>,
    Json(payload): Json<AuthV2Request>,
) -> Result<(StatusCode, Json<AuthV2Response>), ApiError> {
    // Parse before dispatch: a malformed restriction type must fail the
    // request before any metric is emitted.
    let restriction_type = payload
        .restriction_type
        .as_deref()
        .map(|raw| raw.parse::<AuthRestrictionType>())
        .transpose()
        .map_err(|e| ApiError::InvalidArgument(e.to_string()))?;

    let response = state
        .auth
        .authenticate_v2(
            &payload.partner_id,
            restriction_type,
            sim.simulate_error,
            sim.simulate_delay,
        )
        .await;

    let status = if response.success {
        StatusCode::OK
    } else {
        StatusCode::UNAUTHORIZED
    };
    Ok((status, Json(response)))
}

/// Simulate exchanging an opaque token for access tokens.
///
/// POST /api/v1/auth/token
pub async fn exchange_token(
    State(state): State<Arc<AppState>>,
    Query(sim): Query<SimulationParams>,
    Json(payload): Json<TokenExchangeRequest>,
) -> (StatusCode, Json<TokenExchangeResponse>) {
    let response = state
        .auth
        .exchange_token(&payload.partner_id, sim.simulate_error);

    let status = if response.success {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };
    (status, Json(response))
}

/// Simulate JWT validation and opaque-token generation.
///
/// GET /api/v1/auth/redirect
pub async fn validate_and_redirect(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RedirectParams>,
) -> (StatusCode, Json<AuthV2Response>) {
    let response = state
        .auth
        .generate_opaque_token(&params.partner_id, params.simulate_error);

    let status = if response.success {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };
    (status, Json(response))
}

/// Simulate session validation via opaque token.
///
/// POST /api/v1/auth/session
pub async fn validate_session(
    State(state): State<Arc<AppState>>,
    Query(sim): Query<SimulationParams>,
    Json(payload): Json<SessionValidationRequest>,
) -> (StatusCode, Json<SessionValidationResponse>) {
    let response = state
        .auth
        .validate_session(&payload.partner_id, sim.simulate_error);

    let status = if response.valid {
        StatusCode::OK
    } else {
        StatusCode::UNAUTHORIZED
    };
    (status, Json(response))
}
