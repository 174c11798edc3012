//! HTTP routes for the integration simulator.
//!
//! Defines the Axum router and application state.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::Config;
use crate::handlers;
use crate::observability::{
    AttributeComposer, AuthMetrics, MetricsBackend, ReceiverMetrics, SenderMetrics,
};
use crate::services::{AuthService, DelaySource, ReceiverService, SenderService};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration.
    pub config: Config,

    /// Auth flow engine.
    pub auth: AuthService,

    /// Receiver flow engine.
    pub receiver: ReceiverService,

    /// Sender flow engine.
    pub sender: SenderService,
}

impl AppState {
    /// Wire the flow engines to a metrics backend and delay source.
    ///
    /// Production wiring passes the OTel-backed registry and `RandomDelay`;
    /// the test harness passes the recording backend and `NoDelay`.
    pub fn new(
        config: Config,
        backend: Arc<dyn MetricsBackend>,
        delay: Arc<dyn DelaySource>,
    ) -> Self {
        let composer = AttributeComposer::new(&config.service_name, &config.environment);

        let auth = AuthService::new(
            AuthMetrics::new(backend.clone(), composer.clone()),
            delay.clone(),
        );
        let receiver = ReceiverService::new(
            ReceiverMetrics::new(backend.clone(), composer.clone()),
            delay,
        );
        let sender = SenderService::new(SenderMetrics::new(backend, composer));

        Self {
            config,
            auth,
            receiver,
            sender,
        }
    }
}

/// Build the application routes.
///
/// - Auth: v1/v2 login, token exchange, redirect validation, session check
/// - Receiver: per-entity ingestion plus entity deletion
/// - Sender: webhook result and SNS notification intake
/// - `/health` liveness, TraceLayer request logging, 30 second timeout
pub fn build_routes(state: Arc<AppState>) -> Router {
    Router::new()
        // Auth endpoints
        .route("/api/v1/auth", post(handlers::authenticate_v1))
        .route("/api/v2/auth", post(handlers::authenticate_v2))
        .route("/api/v1/auth/token", post(handlers::exchange_token))
        .route("/api/v1/auth/redirect", get(handlers::validate_and_redirect))
        .route("/api/v1/auth/session", post(handlers::validate_session))
        // Receiver endpoints
        .route(
            "/api/v1/institutions/:external_institution_id",
            post(handlers::receive_institution).delete(handlers::delete_entity),
        )
        .route(
            "/api/v1/institutions/:external_institution_id/classrooms",
            post(handlers::receive_classrooms),
        )
        .route(
            "/api/v1/institutions/:external_institution_id/admins",
            post(handlers::receive_admins),
        )
        .route(
            "/api/v1/institutions/:external_institution_id/coordinators",
            post(handlers::receive_coordinators),
        )
        .route(
            "/api/v1/institutions/:external_institution_id/teachers",
            post(handlers::receive_teachers),
        )
        .route(
            "/api/v1/institutions/:external_institution_id/students",
            post(handlers::receive_students),
        )
        .route(
            "/api/v1/institutions/:external_institution_id/licenses",
            post(handlers::receive_licenses),
        )
        // Sender endpoints
        .route(
            "/api/v1/integrations/results/:sync_id",
            post(handlers::receive_webhook_result),
        )
        .route("/api/v1/webhooks", post(handlers::receive_sns_notification))
        // Health check
        .route("/health", get(handlers::health_check))
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .with_state(state)
}
