//! Integration tests for the simulated webhook-delivery flows.

use reqwest::StatusCode;
use serde_json::json;
use sim_service::observability::names::sender;
use sim_test_utils::{assert_emitted, TestServer};

#[tokio::test]
async fn test_webhook_result_success_status() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn().await?;

    let client = reqwest::Client::new();
    let response = client
        .post(format!(
            "{}/api/v1/integrations/results/sync-1",
            server.url()
        ))
        .json(&json!({"status": "SUCCESS", "partner_id": "partner-123"}))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["success"], json!(true));

    assert_emitted(
        &server.metrics,
        &[sender::WEBHOOK_RECEIVED, sender::WEBHOOK_SUCCESS],
    );

    Ok(())
}

#[tokio::test]
async fn test_webhook_result_error_status_acknowledges() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn().await?;

    let client = reqwest::Client::new();
    let response = client
        .post(format!(
            "{}/api/v1/integrations/results/sync-1",
            server.url()
        ))
        .json(&json!({
            "status": "ERROR",
            "error_message": "PartnerTimeout",
            "partner_id": "partner-123"
        }))
        .send()
        .await?;

    // The error report itself is acknowledged successfully.
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["success"], json!(true));

    assert_emitted(
        &server.metrics,
        &[sender::WEBHOOK_RECEIVED, sender::WEBHOOK_ERROR],
    );
    let error = server.metrics.by_name(sender::WEBHOOK_ERROR);
    assert_eq!(
        error[0].attributes.get("error_type").and_then(|v| v.as_str()),
        Some("PartnerTimeout")
    );

    Ok(())
}

#[tokio::test]
async fn test_webhook_result_error_without_message() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn().await?;

    let client = reqwest::Client::new();
    client
        .post(format!(
            "{}/api/v1/integrations/results/sync-1",
            server.url()
        ))
        .json(&json!({"status": "ERROR"}))
        .send()
        .await?;

    let error = server.metrics.by_name(sender::WEBHOOK_ERROR);
    assert_eq!(
        error[0].attributes.get("error_type").and_then(|v| v.as_str()),
        Some("UnknownError")
    );

    Ok(())
}

#[tokio::test]
async fn test_webhook_result_unknown_status() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn().await?;

    let client = reqwest::Client::new();
    let response = client
        .post(format!(
            "{}/api/v1/integrations/results/sync-1",
            server.url()
        ))
        .json(&json!({"status": "BOGUS", "partner_id": "partner-123"}))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["success"], json!(false));
    assert_eq!(
        body["message"].as_str(),
        Some("Invalid webhook status: BOGUS")
    );

    assert_emitted(
        &server.metrics,
        &[sender::WEBHOOK_RECEIVED, sender::WEBHOOK_ERROR],
    );
    let error = server.metrics.by_name(sender::WEBHOOK_ERROR);
    assert_eq!(
        error[0].attributes.get("error_type").and_then(|v| v.as_str()),
        Some("InvalidStatusException")
    );

    Ok(())
}

#[tokio::test]
async fn test_sns_subscription_confirmation() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn().await?;

    let client = reqwest::Client::new();
    let response = client
        .post(format!(
            "{}/api/v1/webhooks?partner_id=partner-123&simulate_error=true",
            server.url()
        ))
        .json(&json!({
            "Type": "SubscriptionConfirmation",
            "Message": "confirm me",
            "SubscribeURL": "https://sns.example.com/confirm"
        }))
        .send()
        .await?;

    // Confirmation short-circuits; the error knob is ignored.
    assert_eq!(response.status(), StatusCode::OK);
    assert_emitted(
        &server.metrics,
        &[sender::WEBHOOK_RECEIVED, sender::WEBHOOK_SUCCESS],
    );

    Ok(())
}

#[tokio::test]
async fn test_sns_notification_flows() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn().await?;
    let client = reqwest::Client::new();

    let ok = client
        .post(format!("{}/api/v1/webhooks", server.url()))
        .json(&json!({"Type": "Notification", "Message": "sync finished"}))
        .send()
        .await?;
    assert_eq!(ok.status(), StatusCode::OK);
    assert_emitted(
        &server.metrics,
        &[sender::WEBHOOK_RECEIVED, sender::WEBHOOK_SUCCESS],
    );

    server.metrics.clear();
    let err = client
        .post(format!(
            "{}/api/v1/webhooks?simulate_error=true",
            server.url()
        ))
        .json(&json!({"Type": "Notification", "Message": "sync finished"}))
        .send()
        .await?;
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    assert_emitted(
        &server.metrics,
        &[sender::WEBHOOK_RECEIVED, sender::WEBHOOK_ERROR],
    );
    let error = server.metrics.by_name(sender::WEBHOOK_ERROR);
    assert_eq!(
        error[0].attributes.get("error_type").and_then(|v| v.as_str()),
        Some("SnsProcessingException")
    );
    assert_eq!(
        error[0].attributes.get("partner_id").and_then(|v| v.as_str()),
        Some("default-partner")
    );

    Ok(())
}
