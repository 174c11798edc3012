//! Synthetic Integration-Metrics Service Library
//!
//! This library simulates three partner-integration products (auth/SSO,
//! entity ingestion, outbound webhook delivery) and emits, for every
//! simulated request, the full set of product counters and duration
//! histograms the real flows would produce.
//!
//! # Modules
//!
//! - `config` - Service configuration
//! - `errors` - Error types
//! - `handlers` - HTTP request handlers
//! - `models` - Closed enumerations and response payloads
//! - `observability` - Instrument registry, attribute composer, domain emitters
//! - `routes` - Router and application state
//! - `services` - Simulated flow engines

pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod observability;
pub mod routes;
pub mod services;
