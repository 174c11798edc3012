//! Metric emitters for the auth product.
//!
//! Counters:
//! - `integration.auth.redirect.{started,completed,failed}`
//! - `integration.auth.token.{exchanged,validated,validation_failed}`
//! - `integration.auth.opaque_token.{generated,validated}`
//! - `integration.auth.impersonate.{completed,failed}`
//!
//! Histograms:
//! - `integration.auth.redirect.duration`

use std::sync::Arc;

use super::attributes::AttributeComposer;
use super::names::auth;
use super::registry::MetricsBackend;
use crate::models::{AuthFlow, AuthRestrictionType, Product};

#[derive(Clone)]
pub struct AuthMetrics {
    backend: Arc<dyn MetricsBackend>,
    composer: AttributeComposer,
}

impl AuthMetrics {
    pub fn new(backend: Arc<dyn MetricsBackend>, composer: AttributeComposer) -> Self {
        Self { backend, composer }
    }

    // ==================== Redirect ====================

    pub fn record_redirect_started(&self, partner_id: &str, flow: AuthFlow) {
        let attributes = self
            .composer
            .builder(Product::Auth, partner_id)
            .flow(flow)
            .build();
        self.backend.increment_counter(
            auth::REDIRECT_STARTED,
            "Number of redirect flows started",
            &attributes,
        );
    }

    pub fn record_redirect_completed(&self, partner_id: &str, flow: AuthFlow) {
        let attributes = self
            .composer
            .builder(Product::Auth, partner_id)
            .flow(flow)
            .success(true)
            .build();
        self.backend.increment_counter(
            auth::REDIRECT_COMPLETED,
            "Number of redirects completed successfully",
            &attributes,
        );
    }

    pub fn record_redirect_failed(&self, partner_id: &str, error_type: &str, flow: AuthFlow) {
        let attributes = self
            .composer
            .builder(Product::Auth, partner_id)
            .flow(flow)
            .success(false)
            .error_type(error_type)
            .build();
        self.backend.increment_counter(
            auth::REDIRECT_FAILED,
            "Number of redirects that failed",
            &attributes,
        );
    }

    pub fn record_redirect_duration(&self, partner_id: &str, duration_ms: f64, flow: AuthFlow) {
        let attributes = self
            .composer
            .builder(Product::Auth, partner_id)
            .flow(flow)
            .build();
        self.backend.record_histogram(
            auth::REDIRECT_DURATION,
            "Redirect processing time",
            "ms",
            duration_ms,
            &attributes,
        );
    }

    // ==================== Token ====================

    pub fn record_token_exchanged(&self, partner_id: &str) {
        let attributes = self
            .composer
            .builder(Product::Auth, partner_id)
            .success(true)
            .build();
        self.backend.increment_counter(
            auth::TOKEN_EXCHANGED,
            "Number of tokens exchanged successfully",
            &attributes,
        );
    }

    pub fn record_token_validated(&self, partner_id: &str) {
        let attributes = self
            .composer
            .builder(Product::Auth, partner_id)
            .success(true)
            .build();
        self.backend.increment_counter(
            auth::TOKEN_VALIDATED,
            "Number of tokens validated",
            &attributes,
        );
    }

    pub fn record_token_validation_failed(&self, partner_id: &str, error_type: &str) {
        let attributes = self
            .composer
            .builder(Product::Auth, partner_id)
            .success(false)
            .error_type(error_type)
            .build();
        self.backend.increment_counter(
            auth::TOKEN_VALIDATION_FAILED,
            "Number of token validations that failed",
            &attributes,
        );
    }

    // ==================== Opaque token ====================

    pub fn record_opaque_token_generated(&self, partner_id: &str) {
        let attributes = self
            .composer
            .builder(Product::Auth, partner_id)
            .flow(AuthFlow::OpaqueToken)
            .build();
        self.backend.increment_counter(
            auth::OPAQUE_TOKEN_GENERATED,
            "Number of opaque tokens generated",
            &attributes,
        );
    }

    pub fn record_opaque_token_validated(&self, partner_id: &str) {
        let attributes = self
            .composer
            .builder(Product::Auth, partner_id)
            .flow(AuthFlow::OpaqueToken)
            .success(true)
            .build();
        self.backend.increment_counter(
            auth::OPAQUE_TOKEN_VALIDATED,
            "Number of opaque tokens validated",
            &attributes,
        );
    }

    // ==================== Impersonate ====================

    pub fn record_impersonate_completed(
        &self,
        partner_id: &str,
        restriction_type: Option<AuthRestrictionType>,
    ) {
        let attributes = self
            .composer
            .builder(Product::Auth, partner_id)
            .flow(AuthFlow::Impersonate)
            .success(true)
            .restriction_type(restriction_type)
            .build();
        self.backend.increment_counter(
            auth::IMPERSONATE_COMPLETED,
            "Number of impersonations completed",
            &attributes,
        );
    }

    pub fn record_impersonate_failed(
        &self,
        partner_id: &str,
        error_type: &str,
        restriction_type: Option<AuthRestrictionType>,
    ) {
        let attributes = self
            .composer
            .builder(Product::Auth, partner_id)
            .flow(AuthFlow::Impersonate)
            .success(false)
            .error_type(error_type)
            .restriction_type(restriction_type)
            .build();
        self.backend.increment_counter(
            auth::IMPERSONATE_FAILED,
            "Number of impersonations that failed",
            &attributes,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::testing::RecordingBackend;

    fn emitter() -> (AuthMetrics, Arc<RecordingBackend>) {
        let backend = Arc::new(RecordingBackend::new());
        let composer = AttributeComposer::new("sim-test", "test");
        (AuthMetrics::new(backend.clone(), composer), backend)
    }

    #[test]
    fn test_redirect_started_attributes() {
        let (metrics, backend) = emitter();

        metrics.record_redirect_started("partner-123", AuthFlow::Redirect);

        let emissions = backend.by_name(auth::REDIRECT_STARTED);
        assert_eq!(emissions.len(), 1);
        let attrs = &emissions[0].attributes;
        assert_eq!(attrs.get("partner_id").and_then(|v| v.as_str()), Some("partner-123"));
        assert_eq!(attrs.get("product").and_then(|v| v.as_str()), Some("auth"));
        assert_eq!(attrs.get("flow").and_then(|v| v.as_str()), Some("redirect"));
        assert!(!attrs.contains("success"));
    }

    #[test]
    fn test_redirect_completed_carries_success_true() {
        let (metrics, backend) = emitter();

        metrics.record_redirect_completed("partner-123", AuthFlow::Redirect);

        let emissions = backend.by_name(auth::REDIRECT_COMPLETED);
        assert_eq!(
            emissions[0].attributes.get("success").and_then(|v| v.as_bool()),
            Some(true)
        );
    }

    #[test]
    fn test_redirect_failed_carries_error_type() {
        let (metrics, backend) = emitter();

        metrics.record_redirect_failed("partner-123", "AuthenticationException", AuthFlow::Redirect);

        let attrs = &backend.by_name(auth::REDIRECT_FAILED)[0].attributes;
        assert_eq!(attrs.get("success").and_then(|v| v.as_bool()), Some(false));
        assert_eq!(
            attrs.get("error_type").and_then(|v| v.as_str()),
            Some("AuthenticationException")
        );
    }

    #[test]
    fn test_redirect_duration_records_histogram() {
        let (metrics, backend) = emitter();

        metrics.record_redirect_duration("partner-123", 150.0, AuthFlow::Redirect);

        let emissions = backend.by_name(auth::REDIRECT_DURATION);
        assert_eq!(emissions.len(), 1);
        assert_eq!(emissions[0].histogram_value(), Some(150.0));
        assert_eq!(
            emissions[0].attributes.get("product").and_then(|v| v.as_str()),
            Some("auth")
        );
    }

    #[test]
    fn test_opaque_token_generated_uses_opaque_token_flow() {
        let (metrics, backend) = emitter();

        metrics.record_opaque_token_generated("partner-123");

        let attrs = &backend.by_name(auth::OPAQUE_TOKEN_GENERATED)[0].attributes;
        assert_eq!(attrs.get("flow").and_then(|v| v.as_str()), Some("opaque_token"));
    }

    #[test]
    fn test_impersonate_completed_with_restriction() {
        let (metrics, backend) = emitter();

        metrics.record_impersonate_completed("partner-123", Some(AuthRestrictionType::Bu));

        let attrs = &backend.by_name(auth::IMPERSONATE_COMPLETED)[0].attributes;
        assert_eq!(attrs.get("flow").and_then(|v| v.as_str()), Some("impersonate"));
        assert_eq!(
            attrs.get("auth_restriction_type").and_then(|v| v.as_str()),
            Some("BU")
        );
    }

    #[test]
    fn test_impersonate_failed_without_restriction_omits_key() {
        let (metrics, backend) = emitter();

        metrics.record_impersonate_failed("partner-123", "ImpersonateException", None);

        let attrs = &backend.by_name(auth::IMPERSONATE_FAILED)[0].attributes;
        assert_eq!(
            attrs.get("error_type").and_then(|v| v.as_str()),
            Some("ImpersonateException")
        );
        assert!(!attrs.contains("auth_restriction_type"));
    }
}
