//! # Simulator Test Utilities
//!
//! Shared test utilities for the integration-metrics simulator.
//!
//! This crate provides:
//! - `TestServer` - spawns the real router on a random port for black-box
//!   HTTP tests, wired to the ordered emission recorder instead of the
//!   OpenTelemetry pipeline
//! - `assert_emitted` - compares a recorder's emission-name sequence against
//!   the exact expected protocol
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sim_test_utils::{assert_emitted, TestServer};
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), anyhow::Error> {
//!     let server = TestServer::spawn().await?;
//!     let client = reqwest::Client::new();
//!
//!     let response = client
//!         .post(format!("{}/api/v1/auth", server.url()))
//!         .json(&body)
//!         .send()
//!         .await?;
//!
//!     assert_eq!(response.status(), 200);
//!     assert_emitted(&server.metrics, &[/* expected metric names */]);
//!     Ok(())
//! }
//! ```

pub mod assertions;
pub mod server_harness;

pub use assertions::assert_emitted;
pub use server_harness::TestServer;

// Re-export the recorder types so tests need only this crate.
pub use sim_service::observability::testing::{
    RecordedEmission, RecordedValue, RecordingBackend,
};
