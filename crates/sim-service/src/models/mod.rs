//! Closed enumerations of the product-metric attribute schema, plus the
//! response payloads returned by the simulated flows.
//!
//! The enum string values are part of the metric contract: `product` and
//! `flow` are lowercase identifiers, `entity_type` is capitalized
//! (`Student`, not `student`), `auth_restriction_type` is SCREAMING_SNAKE.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Raised when a request carries a string that is not a member of one of the
/// closed enumerations. Handlers surface this before any metric is emitted.
#[derive(Debug, Error)]
#[error("invalid {kind} value: {value}")]
pub struct InvalidEnumValue {
    pub kind: &'static str,
    pub value: String,
}

/// Products covered by the metric taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Product {
    Auth,
    Receiver,
    Sender,
}

impl Product {
    pub fn as_str(&self) -> &'static str {
        match self {
            Product::Auth => "auth",
            Product::Receiver => "receiver",
            Product::Sender => "sender",
        }
    }
}

/// Authentication flow classification carried on auth metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFlow {
    Redirect,
    OpaqueToken,
    Impersonate,
}

impl AuthFlow {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthFlow::Redirect => "redirect",
            AuthFlow::OpaqueToken => "opaque_token",
            AuthFlow::Impersonate => "impersonate",
        }
    }
}

/// Entity kinds accepted by the receiver product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityType {
    Institution,
    Classroom,
    Admin,
    Coordinator,
    Teacher,
    Student,
    License,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Institution => "Institution",
            EntityType::Classroom => "Classroom",
            EntityType::Admin => "Admin",
            EntityType::Coordinator => "Coordinator",
            EntityType::Teacher => "Teacher",
            EntityType::Student => "Student",
            EntityType::License => "License",
        }
    }
}

impl FromStr for EntityType {
    type Err = InvalidEnumValue;

    // Case-sensitive: the metric attribute values are capitalized.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Institution" => Ok(EntityType::Institution),
            "Classroom" => Ok(EntityType::Classroom),
            "Admin" => Ok(EntityType::Admin),
            "Coordinator" => Ok(EntityType::Coordinator),
            "Teacher" => Ok(EntityType::Teacher),
            "Student" => Ok(EntityType::Student),
            "License" => Ok(EntityType::License),
            _ => Err(InvalidEnumValue {
                kind: "entity_type",
                value: s.to_string(),
            }),
        }
    }
}

/// How an impersonation/redirect is scoped in the v2 auth flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRestrictionType {
    Bu,
    PartnerAccount,
    PartnerInstitution,
}

impl AuthRestrictionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthRestrictionType::Bu => "BU",
            AuthRestrictionType::PartnerAccount => "PARTNER_ACCOUNT",
            AuthRestrictionType::PartnerInstitution => "PARTNER_INSTITUTION",
        }
    }
}

impl FromStr for AuthRestrictionType {
    type Err = InvalidEnumValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BU" => Ok(AuthRestrictionType::Bu),
            "PARTNER_ACCOUNT" => Ok(AuthRestrictionType::PartnerAccount),
            "PARTNER_INSTITUTION" => Ok(AuthRestrictionType::PartnerInstitution),
            _ => Err(InvalidEnumValue {
                kind: "restriction_type",
                value: s.to_string(),
            }),
        }
    }
}

/// Documented webhook result statuses. Anything else is a contract error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookStatus {
    Success,
    Error,
}

impl FromStr for WebhookStatus {
    type Err = InvalidEnumValue;

    // Partners send the status in mixed casing.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "SUCCESS" => Ok(WebhookStatus::Success),
            "ERROR" => Ok(WebhookStatus::Error),
            _ => Err(InvalidEnumValue {
                kind: "webhook status",
                value: s.to_string(),
            }),
        }
    }
}

// ==================== Flow outcomes ====================
//
// One transient value per simulated request; the transport serializes it
// as-is. Absent fields serialize as JSON null.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthV1Response {
    pub success: bool,
    pub redirect_url: Option<String>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthV2Response {
    pub success: bool,
    pub opaque_token: Option<String>,
    pub redirect_url: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenExchangeResponse {
    pub success: bool,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub expires_in: Option<u64>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionValidationResponse {
    pub valid: bool,
    pub user_id: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstitutionResponse {
    pub success: bool,
    pub institution_id: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassroomResponse {
    pub success: bool,
    pub classroom_id: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub success: bool,
    pub user_id: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LicenseResponse {
    pub success: bool,
    pub license_id: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteEntityResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookResultResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnsNotificationResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}
