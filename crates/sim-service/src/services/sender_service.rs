//! Simulated outbound-delivery (webhook) flows.
//!
//! Both flows always emit `webhook.received` first, then exactly one of
//! `webhook.success` / `webhook.error`. A partner reporting an upstream
//! `"ERROR"` status is still a successfully acknowledged webhook; only an
//! unrecognized status value fails the request itself.

use crate::models::{SnsNotificationResponse, WebhookResultResponse, WebhookStatus};
use crate::observability::SenderMetrics;

#[derive(Clone)]
pub struct SenderService {
    metrics: SenderMetrics,
}

impl SenderService {
    pub fn new(metrics: SenderMetrics) -> Self {
        Self { metrics }
    }

    /// Simulate a partner's webhook confirmation for one sync.
    pub fn process_webhook_result(
        &self,
        sync_id: &str,
        status: &str,
        error_message: Option<&str>,
        partner_id: &str,
    ) -> WebhookResultResponse {
        self.metrics.record_webhook_received(partner_id);

        match status.parse::<WebhookStatus>() {
            Ok(WebhookStatus::Success) => {
                self.metrics.record_webhook_success(partner_id);
                WebhookResultResponse {
                    success: true,
                    message: format!("Webhook result processed successfully for sync {sync_id}"),
                }
            }
            Ok(WebhookStatus::Error) => {
                let error_type = error_message.unwrap_or("UnknownError");
                self.metrics.record_webhook_error(partner_id, error_type);
                WebhookResultResponse {
                    success: true,
                    message: format!("Webhook error recorded for sync {sync_id}"),
                }
            }
            Err(_) => {
                self.metrics
                    .record_webhook_error(partner_id, "InvalidStatusException");
                WebhookResultResponse {
                    success: false,
                    message: format!("Invalid webhook status: {status}"),
                }
            }
        }
    }

    /// Simulate an AWS SNS notification delivery.
    pub fn process_sns_notification(
        &self,
        notification_type: &str,
        partner_id: &str,
        simulate_error: bool,
    ) -> SnsNotificationResponse {
        self.metrics.record_webhook_received(partner_id);

        // Subscription confirmations short-circuit to success.
        if notification_type == "SubscriptionConfirmation" {
            self.metrics.record_webhook_success(partner_id);
            return SnsNotificationResponse {
                success: true,
                message: "Subscription confirmation received".to_string(),
            };
        }

        if simulate_error {
            self.metrics
                .record_webhook_error(partner_id, "SnsProcessingException");
            SnsNotificationResponse {
                success: false,
                message: "Failed to process SNS notification".to_string(),
            }
        } else {
            self.metrics.record_webhook_success(partner_id);
            SnsNotificationResponse {
                success: true,
                message: "SNS notification processed successfully".to_string(),
            }
        }
    }
}
