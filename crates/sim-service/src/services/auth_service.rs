//! Simulated authentication flows.
//!
//! Emission protocols per request:
//! - v1: `redirect.started` → pause → `redirect.duration` → success
//!   (`redirect.completed`, `token.exchanged`, `impersonate.completed`) or
//!   failure (`redirect.failed`, `impersonate.failed`)
//! - v2: as v1, with `opaque_token.generated` before `token.exchanged` on the
//!   success path and the restriction type carried on the impersonate events
//! - token exchange / redirect validation / session validation: no
//!   started/duration pair, single validation emission per branch

use std::ops::Range;
use std::sync::Arc;
use std::time::Instant;

use uuid::Uuid;

use super::pacing::DelaySource;
use super::short_id;
use crate::models::{
    AuthFlow, AuthRestrictionType, AuthV1Response, AuthV2Response, SessionValidationResponse,
    TokenExchangeResponse,
};
use crate::observability::AuthMetrics;

/// Fallback redirect delay when the caller does not supply one.
const REDIRECT_DELAY_MS: Range<u64> = 50..200;

/// Mock token lifetime returned by the exchange flow, in seconds.
const TOKEN_EXPIRY_SECS: u64 = 3_600;

#[derive(Clone)]
pub struct AuthService {
    metrics: AuthMetrics,
    delay: Arc<dyn DelaySource>,
}

impl AuthService {
    pub fn new(metrics: AuthMetrics, delay: Arc<dyn DelaySource>) -> Self {
        Self { metrics, delay }
    }

    /// Simulate v1 SSO authentication: redirect → token exchange → impersonate.
    pub async fn authenticate_v1(
        &self,
        partner_id: &str,
        simulate_error: bool,
        simulate_delay_ms: u64,
    ) -> AuthV1Response {
        let started = Instant::now();
        self.metrics
            .record_redirect_started(partner_id, AuthFlow::Redirect);

        self.delay.pause(simulate_delay_ms, REDIRECT_DELAY_MS).await;

        let duration_ms = started.elapsed().as_secs_f64() * 1_000.0;
        self.metrics
            .record_redirect_duration(partner_id, duration_ms, AuthFlow::Redirect);

        if simulate_error {
            self.metrics.record_redirect_failed(
                partner_id,
                "AuthenticationException",
                AuthFlow::Redirect,
            );
            self.metrics
                .record_impersonate_failed(partner_id, "ImpersonateException", None);
            AuthV1Response {
                success: false,
                redirect_url: None,
                access_token: None,
                refresh_token: None,
                message: "Authentication failed: Invalid credentials".to_string(),
            }
        } else {
            self.metrics
                .record_redirect_completed(partner_id, AuthFlow::Redirect);
            self.metrics.record_token_exchanged(partner_id);
            self.metrics.record_impersonate_completed(partner_id, None);
            AuthV1Response {
                success: true,
                redirect_url: Some("https://app.example.com/dashboard".to_string()),
                access_token: Some(format!("mock_access_token_{}", Uuid::new_v4())),
                refresh_token: Some(format!("mock_refresh_token_{}", Uuid::new_v4())),
                message: "Authentication successful".to_string(),
            }
        }
    }

    /// Simulate v2 SSO authentication with restriction strategies:
    /// redirect → opaque token → token exchange → impersonate.
    pub async fn authenticate_v2(
        &self,
        partner_id: &str,
        restriction_type: Option<AuthRestrictionType>,
        simulate_error: bool,
        simulate_delay_ms: u64,
    ) -> AuthV2Response {
        let started = Instant::now();
        self.metrics
            .record_redirect_started(partner_id, AuthFlow::Redirect);

        self.delay.pause(simulate_delay_ms, REDIRECT_DELAY_MS).await;

        let duration_ms = started.elapsed().as_secs_f64() * 1_000.0;
        self.metrics
            .record_redirect_duration(partner_id, duration_ms, AuthFlow::Redirect);

        if simulate_error {
            self.metrics.record_redirect_failed(
                partner_id,
                "AuthenticationException",
                AuthFlow::Redirect,
            );
            self.metrics.record_impersonate_failed(
                partner_id,
                "ImpersonateException",
                restriction_type,
            );
            AuthV2Response {
                success: false,
                opaque_token: None,
                redirect_url: None,
                message: "Authentication failed: Access denied".to_string(),
            }
        } else {
            self.metrics
                .record_redirect_completed(partner_id, AuthFlow::Redirect);
            self.metrics.record_opaque_token_generated(partner_id);
            self.metrics.record_token_exchanged(partner_id);
            self.metrics
                .record_impersonate_completed(partner_id, restriction_type);
            AuthV2Response {
                success: true,
                opaque_token: Some(format!("opaque_{}", Uuid::new_v4())),
                redirect_url: Some("https://app.example.com/callback".to_string()),
                message: "Authentication successful".to_string(),
            }
        }
    }

    /// Simulate exchanging an opaque token for access tokens.
    pub fn exchange_token(&self, partner_id: &str, simulate_error: bool) -> TokenExchangeResponse {
        if simulate_error {
            self.metrics
                .record_token_validation_failed(partner_id, "InvalidTokenException");
            TokenExchangeResponse {
                success: false,
                access_token: None,
                refresh_token: None,
                expires_in: None,
                message: "Token exchange failed: Invalid opaque token".to_string(),
            }
        } else {
            self.metrics.record_opaque_token_validated(partner_id);
            self.metrics.record_token_validated(partner_id);
            TokenExchangeResponse {
                success: true,
                access_token: Some(format!("access_{}", Uuid::new_v4())),
                refresh_token: Some(format!("refresh_{}", Uuid::new_v4())),
                expires_in: Some(TOKEN_EXPIRY_SECS),
                message: "Token exchange successful".to_string(),
            }
        }
    }

    /// Simulate JWT validation followed by opaque-token generation.
    pub fn generate_opaque_token(&self, partner_id: &str, simulate_error: bool) -> AuthV2Response {
        if simulate_error {
            self.metrics
                .record_token_validation_failed(partner_id, "InvalidJwtException");
            AuthV2Response {
                success: false,
                opaque_token: None,
                redirect_url: None,
                message: "JWT validation failed".to_string(),
            }
        } else {
            self.metrics.record_token_validated(partner_id);
            self.metrics.record_opaque_token_generated(partner_id);
            AuthV2Response {
                success: true,
                opaque_token: Some(format!("opaque_{}", Uuid::new_v4())),
                redirect_url: Some("https://app.example.com/session".to_string()),
                message: "Opaque token generated".to_string(),
            }
        }
    }

    /// Simulate validating a session held by an opaque token.
    pub fn validate_session(
        &self,
        partner_id: &str,
        simulate_error: bool,
    ) -> SessionValidationResponse {
        if simulate_error {
            self.metrics
                .record_token_validation_failed(partner_id, "SessionExpiredException");
            SessionValidationResponse {
                valid: false,
                user_id: None,
                message: "Session validation failed: Session expired".to_string(),
            }
        } else {
            self.metrics.record_opaque_token_validated(partner_id);
            SessionValidationResponse {
                valid: true,
                user_id: Some(short_id("user")),
                message: "Session is valid".to_string(),
            }
        }
    }
}
