//! Metric emitters for the sender product.
//!
//! Counters:
//! - `integration.sender.webhook.{received,success,error}`

use std::sync::Arc;

use super::attributes::AttributeComposer;
use super::names::sender;
use super::registry::MetricsBackend;
use crate::models::Product;

#[derive(Clone)]
pub struct SenderMetrics {
    backend: Arc<dyn MetricsBackend>,
    composer: AttributeComposer,
}

impl SenderMetrics {
    pub fn new(backend: Arc<dyn MetricsBackend>, composer: AttributeComposer) -> Self {
        Self { backend, composer }
    }

    pub fn record_webhook_received(&self, partner_id: &str) {
        let attributes = self.composer.builder(Product::Sender, partner_id).build();
        self.backend.increment_counter(
            sender::WEBHOOK_RECEIVED,
            "Number of webhook results received",
            &attributes,
        );
    }

    pub fn record_webhook_success(&self, partner_id: &str) {
        let attributes = self
            .composer
            .builder(Product::Sender, partner_id)
            .success(true)
            .build();
        self.backend.increment_counter(
            sender::WEBHOOK_SUCCESS,
            "Number of webhooks with success status",
            &attributes,
        );
    }

    pub fn record_webhook_error(&self, partner_id: &str, error_type: &str) {
        let attributes = self
            .composer
            .builder(Product::Sender, partner_id)
            .success(false)
            .error_type(error_type)
            .build();
        self.backend.increment_counter(
            sender::WEBHOOK_ERROR,
            "Number of webhooks with error status",
            &attributes,
        );
    }
}
