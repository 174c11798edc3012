//! Metric emitters for the receiver product.
//!
//! Counters:
//! - `integration.receiver.entity.{received,processed,failed,deleted}`
//!
//! Histograms:
//! - `integration.receiver.processing.duration`

use std::sync::Arc;

use super::attributes::AttributeComposer;
use super::names::receiver;
use super::registry::MetricsBackend;
use crate::models::{EntityType, Product};

#[derive(Clone)]
pub struct ReceiverMetrics {
    backend: Arc<dyn MetricsBackend>,
    composer: AttributeComposer,
}

impl ReceiverMetrics {
    pub fn new(backend: Arc<dyn MetricsBackend>, composer: AttributeComposer) -> Self {
        Self { backend, composer }
    }

    pub fn record_entity_received(
        &self,
        partner_id: &str,
        entity_type: EntityType,
        institution_id: Option<&str>,
    ) {
        let attributes = self
            .composer
            .builder(Product::Receiver, partner_id)
            .entity_type(entity_type)
            .institution_id(institution_id)
            .build();
        self.backend.increment_counter(
            receiver::ENTITY_RECEIVED,
            "Number of entities received",
            &attributes,
        );
    }

    pub fn record_entity_processed(
        &self,
        partner_id: &str,
        entity_type: EntityType,
        institution_id: Option<&str>,
    ) {
        let attributes = self
            .composer
            .builder(Product::Receiver, partner_id)
            .entity_type(entity_type)
            .institution_id(institution_id)
            .success(true)
            .build();
        self.backend.increment_counter(
            receiver::ENTITY_PROCESSED,
            "Number of entities processed successfully",
            &attributes,
        );
    }

    pub fn record_entity_failed(
        &self,
        partner_id: &str,
        entity_type: EntityType,
        error_type: &str,
        institution_id: Option<&str>,
    ) {
        let attributes = self
            .composer
            .builder(Product::Receiver, partner_id)
            .entity_type(entity_type)
            .institution_id(institution_id)
            .success(false)
            .error_type(error_type)
            .build();
        self.backend.increment_counter(
            receiver::ENTITY_FAILED,
            "Number of entities that failed processing",
            &attributes,
        );
    }

    pub fn record_entity_deleted(
        &self,
        partner_id: &str,
        entity_type: EntityType,
        institution_id: Option<&str>,
    ) {
        let attributes = self
            .composer
            .builder(Product::Receiver, partner_id)
            .entity_type(entity_type)
            .institution_id(institution_id)
            .build();
        self.backend.increment_counter(
            receiver::ENTITY_DELETED,
            "Number of entities deleted",
            &attributes,
        );
    }

    pub fn record_processing_duration(
        &self,
        partner_id: &str,
        entity_type: EntityType,
        duration_ms: f64,
        institution_id: Option<&str>,
    ) {
        let attributes = self
            .composer
            .builder(Product::Receiver, partner_id)
            .entity_type(entity_type)
            .institution_id(institution_id)
            .build();
        self.backend.record_histogram(
            receiver::PROCESSING_DURATION,
            "Entity processing time",
            "ms",
            duration_ms,
            &attributes,
        );
    }
}
