use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use super::{default_partner_id, SimulationParams};
use crate::errors::ApiError;
use crate::models::{
    ClassroomResponse, DeleteEntityResponse, EntityType, InstitutionResponse, LicenseResponse,
    UserResponse,
};
use crate::routes::AppState;

#[derive(Debug, Deserialize)]
pub struct InstitutionRequest {
    pub name: String,
    pub code: Option<String>,
    #[serde(default = "default_partner_id")]
    pub partner_id: String,
}

#[derive(Debug, Deserialize)]
pub struct ClassroomRequest {
    pub name: String,
    pub grade: Option<String>,
    pub shift: Option<String>,
    #[serde(default = "default_partner_id")]
    pub partner_id: String,
}

#[derive(Debug, Deserialize)]
pub struct UserRequest {
    pub name: String,
    pub email: Option<String>,
    pub external_id: Option<String>,
    #[serde(default = "default_partner_id")]
    pub partner_id: String,
}

#[derive(Debug, Deserialize)]
pub struct LicenseRequest {
    pub product_code: String,
    pub quantity: u32,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(default = "default_partner_id")]
    pub partner_id: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteEntityParams {
    /// One of the capitalized entity kinds, e.g. `Institution`, `Student`.
    pub entity_type: String,
    #[serde(default = "default_partner_id")]
    pub partner_id: String,
}

fn entity_status(success: bool) -> StatusCode {
    if success {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    }
}

/// Simulate receiving an institution.
///
/// POST /api/v1/institutions/{external_institution_id}
pub async fn receive_institution(
    State(state): State<Arc<AppState>>,
    Path(external_institution_id): Path<String>,
    Query(sim): Query<SimulationParams>,
    Json(payload): Json<InstitutionRequest>,
) -> (StatusCode, Json<InstitutionResponse>) {
    let response = state
        .receiver
        .receive_institution(
            &external_institution_id,
            &payload.partner_id,
            sim.simulate_error,
            sim.simulate_delay,
        )
        .await;

    (entity_status(response.success), Json(response))
}

/// Simulate receiving classrooms.
///
/// POST /api/v1/institutions/{external_institution_id}/classrooms
pub async fn receive_classrooms(
    State(state): State<Arc<AppState>>,
    Path(external_institution_id): Path<String>,
    Query(sim): Query<SimulationParams>,
    Json(payload): Json<ClassroomRequest>,
) -> (StatusCode, Json<ClassroomResponse>) {
    let response = state
        .receiver
        .receive_classroom(
            &external_institution_id,
            &payload.partner_id,
            sim.simulate_error,
            sim.simulate_delay,
        )
        .await;

    (entity_status(response.success), Json(response))
}

async fn receive_user_profile(
    state: Arc<AppState>,
    external_institution_id: String,
    entity_type: EntityType,
    sim: SimulationParams,
    payload: UserRequest,
) -> (StatusCode, Json<UserResponse>) {
    let response = state
        .receiver
        .receive_user(
            &external_institution_id,
            &payload.partner_id,
            entity_type,
            sim.simulate_error,
            sim.simulate_delay,
        )
        .await;

    (entity_status(response.success), Json(response))
}

/// POST /api/v1/institutions/{external_institution_id}/admins
pub async fn receive_admins(
    State(state): State<Arc<AppState>>,
    Path(external_institution_id): Path<String>,
    Query(sim): Query<SimulationParams>,
    Json(payload): Json<UserRequest>,
) -> (StatusCode, Json<UserResponse>) {
    receive_user_profile(state, external_institution_id, EntityType::Admin, sim, payload).await
}

/// POST /api/v1/institutions/{external_institution_id}/coordinators
pub async fn receive_coordinators(
    State(state): State<Arc<AppState>>,
    Path(external_institution_id): Path<String>,
    Query(sim): Query<SimulationParams>,
    Json(payload): Json<UserRequest>,
) -> (StatusCode, Json<UserResponse>) {
    receive_user_profile(
        state,
        external_institution_id,
        EntityType::Coordinator,
        sim,
        payload,
    )
    .await
}

/// POST /api/v1/institutions/{external_institution_id}/teachers
pub async fn receive_teachers(
    State(state): State<Arc<AppState>>,
    Path(external_institution_id): Path<String>,
    Query(sim): Query<SimulationParams>,
    Json(payload): Json<UserRequest>,
) -> (StatusCode, Json<UserResponse>) {
    receive_user_profile(
        state,
        external_institution_id,
        EntityType::Teacher,
        sim,
        payload,
    )
    .await
}

/// POST /api/v1/institutions/{external_institution_id}/students
pub async fn receive_students(
    State(state): State<Arc<AppState>>,
    Path(external_institution_id): Path<String>,
    Query(sim): Query<SimulationParams>,
    Json(payload): Json<UserRequest>,
) -> (StatusCode, Json<UserResponse>) {
    receive_user_profile(
        state,
        external_institution_id,
        EntityType::Student,
        sim,
        payload,
    )
    .await
}

/// Simulate receiving licenses for a CRM account.
///
/// POST /api/v1/institutions/{crm_id}/licenses
pub async fn receive_licenses(
    State(state): State<Arc<AppState>>,
    Path(crm_id): Path<String>,
    Query(sim): Query<SimulationParams>,
    Json(payload): Json<LicenseRequest>,
) -> (StatusCode, Json<LicenseResponse>) {
    let response = state
        .receiver
        .receive_license(
            &crm_id,
            &payload.partner_id,
            sim.simulate_error,
            sim.simulate_delay,
        )
        .await;

    (entity_status(response.success), Json(response))
}

/// Record an entity deletion.
///
/// DELETE /api/v1/institutions/{external_institution_id}
pub async fn delete_entity(
    State(state): State<Arc<AppState>>,
    Path(external_institution_id): Path<String>,
    Query(params): Query<DeleteEntityParams>,
) -> Result<Json<DeleteEntityResponse>, ApiError> {
    let entity_type = params
        .entity_type
        .parse::<EntityType>()
        .map_err(|e| ApiError::InvalidArgument(e.to_string()))?;

    state.receiver.delete_entity(
        &params.partner_id,
        entity_type,
        Some(&external_institution_id),
    );

    Ok(Json(DeleteEntityResponse {
        success: true,
        message: format!("{} deletion recorded", entity_type.as_str()),
    }))
}
