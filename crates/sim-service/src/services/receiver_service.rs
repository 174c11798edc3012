//! Simulated entity-ingestion flows.
//!
//! Every receive flow follows the same protocol: `entity.received` → pause →
//! `processing.duration` → `entity.processed` or `entity.failed` with the
//! entity kind's canonical error code.

use std::ops::Range;
use std::sync::Arc;
use std::time::Instant;

use super::pacing::DelaySource;
use super::short_id;
use crate::models::{
    ClassroomResponse, EntityType, InstitutionResponse, LicenseResponse, UserResponse,
};
use crate::observability::ReceiverMetrics;

/// Fallback processing delay when the caller does not supply one.
const PROCESSING_DELAY_MS: Range<u64> = 20..100;

#[derive(Clone)]
pub struct ReceiverService {
    metrics: ReceiverMetrics,
    delay: Arc<dyn DelaySource>,
}

impl ReceiverService {
    pub fn new(metrics: ReceiverMetrics, delay: Arc<dyn DelaySource>) -> Self {
        Self { metrics, delay }
    }

    /// Simulate receiving an institution.
    pub async fn receive_institution(
        &self,
        external_institution_id: &str,
        partner_id: &str,
        simulate_error: bool,
        simulate_delay_ms: u64,
    ) -> InstitutionResponse {
        let started = Instant::now();
        self.metrics.record_entity_received(
            partner_id,
            EntityType::Institution,
            Some(external_institution_id),
        );

        self.delay
            .pause(simulate_delay_ms, PROCESSING_DELAY_MS)
            .await;

        let duration_ms = started.elapsed().as_secs_f64() * 1_000.0;
        self.metrics.record_processing_duration(
            partner_id,
            EntityType::Institution,
            duration_ms,
            Some(external_institution_id),
        );

        if simulate_error {
            self.metrics.record_entity_failed(
                partner_id,
                EntityType::Institution,
                "ValidationException",
                Some(external_institution_id),
            );
            InstitutionResponse {
                success: false,
                institution_id: None,
                message: "Failed to process institution: Validation error".to_string(),
            }
        } else {
            self.metrics.record_entity_processed(
                partner_id,
                EntityType::Institution,
                Some(external_institution_id),
            );
            InstitutionResponse {
                success: true,
                institution_id: Some(short_id("inst")),
                message: "Institution processed successfully".to_string(),
            }
        }
    }

    /// Simulate receiving a classroom.
    pub async fn receive_classroom(
        &self,
        external_institution_id: &str,
        partner_id: &str,
        simulate_error: bool,
        simulate_delay_ms: u64,
    ) -> ClassroomResponse {
        let started = Instant::now();
        self.metrics.record_entity_received(
            partner_id,
            EntityType::Classroom,
            Some(external_institution_id),
        );

        self.delay
            .pause(simulate_delay_ms, PROCESSING_DELAY_MS)
            .await;

        let duration_ms = started.elapsed().as_secs_f64() * 1_000.0;
        self.metrics.record_processing_duration(
            partner_id,
            EntityType::Classroom,
            duration_ms,
            Some(external_institution_id),
        );

        if simulate_error {
            self.metrics.record_entity_failed(
                partner_id,
                EntityType::Classroom,
                "DuplicateException",
                Some(external_institution_id),
            );
            ClassroomResponse {
                success: false,
                classroom_id: None,
                message: "Failed to process classroom: Duplicate entry".to_string(),
            }
        } else {
            self.metrics.record_entity_processed(
                partner_id,
                EntityType::Classroom,
                Some(external_institution_id),
            );
            ClassroomResponse {
                success: true,
                classroom_id: Some(short_id("class")),
                message: "Classroom processed successfully".to_string(),
            }
        }
    }

    /// Simulate receiving a user of any profile (admin, coordinator, teacher,
    /// student).
    pub async fn receive_user(
        &self,
        external_institution_id: &str,
        partner_id: &str,
        entity_type: EntityType,
        simulate_error: bool,
        simulate_delay_ms: u64,
    ) -> UserResponse {
        let started = Instant::now();
        self.metrics
            .record_entity_received(partner_id, entity_type, Some(external_institution_id));

        self.delay
            .pause(simulate_delay_ms, PROCESSING_DELAY_MS)
            .await;

        let duration_ms = started.elapsed().as_secs_f64() * 1_000.0;
        self.metrics.record_processing_duration(
            partner_id,
            entity_type,
            duration_ms,
            Some(external_institution_id),
        );

        let profile = entity_type.as_str().to_lowercase();
        if simulate_error {
            self.metrics.record_entity_failed(
                partner_id,
                entity_type,
                "InvalidDataException",
                Some(external_institution_id),
            );
            UserResponse {
                success: false,
                user_id: None,
                message: format!("Failed to process {profile}: Invalid data"),
            }
        } else {
            self.metrics.record_entity_processed(
                partner_id,
                entity_type,
                Some(external_institution_id),
            );
            UserResponse {
                success: true,
                user_id: Some(short_id(&profile)),
                message: format!("{} processed successfully", entity_type.as_str()),
            }
        }
    }

    /// Simulate receiving a license batch for a CRM account.
    pub async fn receive_license(
        &self,
        crm_id: &str,
        partner_id: &str,
        simulate_error: bool,
        simulate_delay_ms: u64,
    ) -> LicenseResponse {
        let started = Instant::now();
        self.metrics
            .record_entity_received(partner_id, EntityType::License, Some(crm_id));

        self.delay
            .pause(simulate_delay_ms, PROCESSING_DELAY_MS)
            .await;

        let duration_ms = started.elapsed().as_secs_f64() * 1_000.0;
        self.metrics.record_processing_duration(
            partner_id,
            EntityType::License,
            duration_ms,
            Some(crm_id),
        );

        if simulate_error {
            self.metrics.record_entity_failed(
                partner_id,
                EntityType::License,
                "LicenseQuotaException",
                Some(crm_id),
            );
            LicenseResponse {
                success: false,
                license_id: None,
                message: "Failed to process license: Quota exceeded".to_string(),
            }
        } else {
            self.metrics
                .record_entity_processed(partner_id, EntityType::License, Some(crm_id));
            LicenseResponse {
                success: true,
                license_id: Some(short_id("lic")),
                message: "License processed successfully".to_string(),
            }
        }
    }

    /// Record an entity deletion. Single emission, no delay, no branches.
    pub fn delete_entity(
        &self,
        partner_id: &str,
        entity_type: EntityType,
        institution_id: Option<&str>,
    ) {
        self.metrics
            .record_entity_deleted(partner_id, entity_type, institution_id);
    }
}
