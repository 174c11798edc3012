//! The closed metric-name taxonomy: `integration.<product>.<resource>.<action>`.
//!
//! Emitters reference these constants; nothing else may mint metric names.

pub mod auth {
    // Counters
    pub const REDIRECT_STARTED: &str = "integration.auth.redirect.started";
    pub const REDIRECT_COMPLETED: &str = "integration.auth.redirect.completed";
    pub const REDIRECT_FAILED: &str = "integration.auth.redirect.failed";
    pub const TOKEN_EXCHANGED: &str = "integration.auth.token.exchanged";
    pub const TOKEN_VALIDATED: &str = "integration.auth.token.validated";
    pub const TOKEN_VALIDATION_FAILED: &str = "integration.auth.token.validation_failed";
    pub const OPAQUE_TOKEN_GENERATED: &str = "integration.auth.opaque_token.generated";
    pub const OPAQUE_TOKEN_VALIDATED: &str = "integration.auth.opaque_token.validated";
    pub const IMPERSONATE_COMPLETED: &str = "integration.auth.impersonate.completed";
    pub const IMPERSONATE_FAILED: &str = "integration.auth.impersonate.failed";

    // Histograms
    pub const REDIRECT_DURATION: &str = "integration.auth.redirect.duration";
}

pub mod receiver {
    // Counters
    pub const ENTITY_RECEIVED: &str = "integration.receiver.entity.received";
    pub const ENTITY_PROCESSED: &str = "integration.receiver.entity.processed";
    pub const ENTITY_FAILED: &str = "integration.receiver.entity.failed";
    pub const ENTITY_DELETED: &str = "integration.receiver.entity.deleted";

    // Histograms
    pub const PROCESSING_DURATION: &str = "integration.receiver.processing.duration";
}

pub mod sender {
    // Counters
    pub const WEBHOOK_RECEIVED: &str = "integration.sender.webhook.received";
    pub const WEBHOOK_SUCCESS: &str = "integration.sender.webhook.success";
    pub const WEBHOOK_ERROR: &str = "integration.sender.webhook.error";
}
