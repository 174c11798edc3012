//! HTTP request handlers.
//!
//! Handlers decode request bodies and the two simulation query knobs, parse
//! closed-enum strings before any flow is invoked, dispatch to the flow
//! engines, and map the outcome's success flag to an HTTP status.

pub mod auth_handler;
pub mod health;
pub mod receiver_handler;
pub mod sender_handler;

pub use auth_handler::{
    authenticate_v1, authenticate_v2, exchange_token, validate_and_redirect, validate_session,
};
pub use health::health_check;
pub use receiver_handler::{
    delete_entity, receive_admins, receive_classrooms, receive_coordinators, receive_institution,
    receive_licenses, receive_students, receive_teachers,
};
pub use sender_handler::{receive_sns_notification, receive_webhook_result};

use serde::Deserialize;

/// The two always-optional simulation knobs carried as query parameters.
/// A delay of 0 means "use the flow's randomized fallback".
#[derive(Debug, Deserialize)]
pub struct SimulationParams {
    #[serde(default)]
    pub simulate_error: bool,
    #[serde(default)]
    pub simulate_delay: u64,
}

pub(crate) fn default_partner_id() -> String {
    "default-partner".to_string()
}
