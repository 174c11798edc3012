//! Integration tests for the simulated auth flows.
//!
//! Each test drives a real HTTP request through the router and asserts the
//! response shape together with the exact metric emission sequence.

use reqwest::StatusCode;
use serde_json::json;
use sim_service::observability::names::auth;
use sim_test_utils::{assert_emitted, TestServer};

// ============================================================================
// Auth v1
// ============================================================================

#[tokio::test]
async fn test_auth_v1_success_flow() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn().await?;

    let client = reqwest::Client::new();
    let response = client
        .post(format!("{}/api/v1/auth", server.url()))
        .json(&json!({"username": "alice", "partner_id": "partner-123"}))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["success"], json!(true));
    assert!(body["access_token"]
        .as_str()
        .is_some_and(|t| t.starts_with("mock_access_token_")));
    assert!(body["refresh_token"]
        .as_str()
        .is_some_and(|t| t.starts_with("mock_refresh_token_")));
    assert_eq!(
        body["redirect_url"].as_str(),
        Some("https://app.example.com/dashboard")
    );

    assert_emitted(
        &server.metrics,
        &[
            auth::REDIRECT_STARTED,
            auth::REDIRECT_DURATION,
            auth::REDIRECT_COMPLETED,
            auth::TOKEN_EXCHANGED,
            auth::IMPERSONATE_COMPLETED,
        ],
    );

    Ok(())
}

#[tokio::test]
async fn test_auth_v1_error_flow() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn().await?;

    let client = reqwest::Client::new();
    let response = client
        .post(format!(
            "{}/api/v1/auth?simulate_error=true",
            server.url()
        ))
        .json(&json!({"username": "alice", "partner_id": "partner-123"}))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["success"], json!(false));
    assert!(body["access_token"].is_null());
    assert!(body["refresh_token"].is_null());

    assert_emitted(
        &server.metrics,
        &[
            auth::REDIRECT_STARTED,
            auth::REDIRECT_DURATION,
            auth::REDIRECT_FAILED,
            auth::IMPERSONATE_FAILED,
        ],
    );

    let failed = server.metrics.by_name(auth::REDIRECT_FAILED);
    assert_eq!(
        failed[0].attributes.get("error_type").and_then(|v| v.as_str()),
        Some("AuthenticationException")
    );
    let impersonate = server.metrics.by_name(auth::IMPERSONATE_FAILED);
    assert_eq!(
        impersonate[0]
            .attributes
            .get("error_type")
            .and_then(|v| v.as_str()),
        Some("ImpersonateException")
    );

    Ok(())
}

#[tokio::test]
async fn test_auth_v1_explicit_delay_is_measured() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn().await?;

    let client = reqwest::Client::new();
    client
        .post(format!(
            "{}/api/v1/auth?simulate_delay=25",
            server.url()
        ))
        .json(&json!({"username": "alice"}))
        .send()
        .await?;

    let duration = server.metrics.by_name(auth::REDIRECT_DURATION);
    assert_eq!(duration.len(), 1, "exactly one duration observation");
    assert!(duration[0].histogram_value().is_some_and(|v| v >= 0.0));

    Ok(())
}

// ============================================================================
// Auth v2
// ============================================================================

#[tokio::test]
async fn test_auth_v2_success_flow_with_restriction() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn().await?;

    let client = reqwest::Client::new();
    let response = client
        .post(format!("{}/api/v2/auth", server.url()))
        .json(&json!({
            "username": "alice",
            "partner_id": "partner-123",
            "restriction_type": "PARTNER_ACCOUNT"
        }))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await?;
    assert!(body["opaque_token"]
        .as_str()
        .is_some_and(|t| t.starts_with("opaque_")));

    assert_emitted(
        &server.metrics,
        &[
            auth::REDIRECT_STARTED,
            auth::REDIRECT_DURATION,
            auth::REDIRECT_COMPLETED,
            auth::OPAQUE_TOKEN_GENERATED,
            auth::TOKEN_EXCHANGED,
            auth::IMPERSONATE_COMPLETED,
        ],
    );

    let completed = server.metrics.by_name(auth::IMPERSONATE_COMPLETED);
    assert_eq!(
        completed[0]
            .attributes
            .get("auth_restriction_type")
            .and_then(|v| v.as_str()),
        Some("PARTNER_ACCOUNT")
    );

    Ok(())
}

#[tokio::test]
async fn test_auth_v2_invalid_restriction_type_rejected_before_emission(
) -> Result<(), anyhow::Error> {
    let server = TestServer::spawn().await?;

    let client = reqwest::Client::new();
    let response = client
        .post(format!("{}/api/v2/auth", server.url()))
        .json(&json!({
            "username": "alice",
            "restriction_type": "NOT_A_RESTRICTION"
        }))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["error"]["code"].as_str(), Some("INVALID_ARGUMENT"));

    assert!(
        server.metrics.emissions().is_empty(),
        "A malformed enum must fail before any metric is emitted"
    );

    Ok(())
}

#[tokio::test]
async fn test_auth_v2_error_flow_without_restriction() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn().await?;

    let client = reqwest::Client::new();
    let response = client
        .post(format!(
            "{}/api/v2/auth?simulate_error=true",
            server.url()
        ))
        .json(&json!({"username": "alice"}))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    assert_emitted(
        &server.metrics,
        &[
            auth::REDIRECT_STARTED,
            auth::REDIRECT_DURATION,
            auth::REDIRECT_FAILED,
            auth::IMPERSONATE_FAILED,
        ],
    );

    let failed = server.metrics.by_name(auth::IMPERSONATE_FAILED);
    assert!(!failed[0].attributes.contains("auth_restriction_type"));

    Ok(())
}

// ============================================================================
// Token exchange
// ============================================================================

#[tokio::test]
async fn test_token_exchange_success() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn().await?;

    let client = reqwest::Client::new();
    let response = client
        .post(format!("{}/api/v1/auth/token", server.url()))
        .json(&json!({"opaque_token": "opaque_abc", "partner_id": "partner-123"}))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["expires_in"], json!(3600));
    assert!(body["access_token"]
        .as_str()
        .is_some_and(|t| t.starts_with("access_")));

    assert_emitted(
        &server.metrics,
        &[auth::OPAQUE_TOKEN_VALIDATED, auth::TOKEN_VALIDATED],
    );

    Ok(())
}

#[tokio::test]
async fn test_token_exchange_error() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn().await?;

    let client = reqwest::Client::new();
    let response = client
        .post(format!(
            "{}/api/v1/auth/token?simulate_error=true",
            server.url()
        ))
        .json(&json!({"opaque_token": "opaque_abc"}))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert_emitted(&server.metrics, &[auth::TOKEN_VALIDATION_FAILED]);
    let failed = server.metrics.by_name(auth::TOKEN_VALIDATION_FAILED);
    assert_eq!(
        failed[0].attributes.get("error_type").and_then(|v| v.as_str()),
        Some("InvalidTokenException")
    );

    Ok(())
}

// ============================================================================
// Redirect validation and session check
// ============================================================================

#[tokio::test]
async fn test_redirect_validation_success() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn().await?;

    let client = reqwest::Client::new();
    let response = client
        .get(format!(
            "{}/api/v1/auth/redirect?partner_id=partner-123",
            server.url()
        ))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::OK);

    assert_emitted(
        &server.metrics,
        &[auth::TOKEN_VALIDATED, auth::OPAQUE_TOKEN_GENERATED],
    );

    Ok(())
}

#[tokio::test]
async fn test_redirect_validation_error() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn().await?;

    let client = reqwest::Client::new();
    let response = client
        .get(format!(
            "{}/api/v1/auth/redirect?simulate_error=true",
            server.url()
        ))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert_emitted(&server.metrics, &[auth::TOKEN_VALIDATION_FAILED]);
    let failed = server.metrics.by_name(auth::TOKEN_VALIDATION_FAILED);
    assert_eq!(
        failed[0].attributes.get("error_type").and_then(|v| v.as_str()),
        Some("InvalidJwtException")
    );
    assert_eq!(
        failed[0].attributes.get("partner_id").and_then(|v| v.as_str()),
        Some("default-partner")
    );

    Ok(())
}

#[tokio::test]
async fn test_session_validation_flows() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn().await?;
    let client = reqwest::Client::new();

    let ok = client
        .post(format!("{}/api/v1/auth/session", server.url()))
        .json(&json!({"opaque_token": "opaque_abc", "partner_id": "partner-123"}))
        .send()
        .await?;
    assert_eq!(ok.status(), StatusCode::OK);
    let body: serde_json::Value = ok.json().await?;
    assert!(body["user_id"].as_str().is_some_and(|u| u.starts_with("user_")));
    assert_emitted(&server.metrics, &[auth::OPAQUE_TOKEN_VALIDATED]);

    server.metrics.clear();
    let err = client
        .post(format!(
            "{}/api/v1/auth/session?simulate_error=true",
            server.url()
        ))
        .json(&json!({"opaque_token": "opaque_abc"}))
        .send()
        .await?;
    assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    assert_emitted(&server.metrics, &[auth::TOKEN_VALIDATION_FAILED]);
    let failed = server.metrics.by_name(auth::TOKEN_VALIDATION_FAILED);
    assert_eq!(
        failed[0].attributes.get("error_type").and_then(|v| v.as_str()),
        Some("SessionExpiredException")
    );

    Ok(())
}
