//! Simulated flow engines.
//!
//! Each service encodes the fixed emission sequence one product flow must
//! produce per request, plus its mock result payload. Flows are stateless;
//! the caller-supplied "simulate error" flag picks the branch, and both
//! branches emit their full metric sequence.

pub mod auth_service;
pub mod pacing;
pub mod receiver_service;
pub mod sender_service;

pub use auth_service::AuthService;
pub use pacing::{DelaySource, RandomDelay};
pub use receiver_service::ReceiverService;
pub use sender_service::SenderService;

use uuid::Uuid;

/// Mock identifier: `<prefix>_<first 8 hex chars of a v4 uuid>`.
pub(crate) fn short_id(prefix: &str) -> String {
    let id = Uuid::new_v4().simple().to_string();
    let short: String = id.chars().take(8).collect();
    format!("{prefix}_{short}")
}
