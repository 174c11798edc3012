//! Instrument registry and OpenTelemetry bootstrap.
//!
//! Instruments are created lazily, exactly once per metric name, and cached
//! for the process lifetime. The cache is the only shared mutable state in
//! the service; `DashMap::entry` gives the atomic insert-if-absent that keeps
//! creation single-shot under concurrent first use. Later lookups ignore any
//! differing description/unit arguments (first write wins).

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use opentelemetry::metrics::{Counter, Histogram, Meter};
use opentelemetry::{global, KeyValue};
use opentelemetry_otlp::{MetricExporter, WithExportConfig};
use opentelemetry_sdk::metrics::{PeriodicReader, SdkMeterProvider};
use opentelemetry_sdk::Resource;
use tracing::warn;

use super::attributes::{AttributeSet, AttributeValue};
use crate::config::Config;

/// Instrumentation scope under which all product instruments are created.
pub const METER_NAME: &str = "integration-products";

/// The capability the instrumentation layer needs from a metrics backend:
/// create a counter/histogram by name, add a value with attributes.
///
/// `ProductMetrics` is the production implementation; the recorder in
/// `observability::testing` captures the emission stream for assertions.
pub trait MetricsBackend: Send + Sync {
    /// Add a unit increment to the named counter.
    fn increment_counter(
        &self,
        name: &'static str,
        description: &'static str,
        attributes: &AttributeSet,
    );

    /// Record one observation on the named histogram.
    fn record_histogram(
        &self,
        name: &'static str,
        description: &'static str,
        unit: &'static str,
        value: f64,
        attributes: &AttributeSet,
    );
}

/// Obtain-or-create registry of product metric instruments.
pub struct ProductMetrics {
    meter: Meter,
    counters: DashMap<&'static str, Arc<Counter<u64>>>,
    histograms: DashMap<&'static str, Arc<Histogram<f64>>>,
}

impl ProductMetrics {
    pub fn new(meter: Meter) -> Self {
        Self {
            meter,
            counters: DashMap::new(),
            histograms: DashMap::new(),
        }
    }

    /// Get or create the counter with the given name.
    pub fn counter(&self, name: &'static str, description: &'static str) -> Arc<Counter<u64>> {
        self.counters
            .entry(name)
            .or_insert_with(|| {
                Arc::new(
                    self.meter
                        .u64_counter(name)
                        .with_description(description)
                        .with_unit("1")
                        .build(),
                )
            })
            .value()
            .clone()
    }

    /// Get or create the histogram with the given name.
    pub fn histogram(
        &self,
        name: &'static str,
        description: &'static str,
        unit: &'static str,
    ) -> Arc<Histogram<f64>> {
        self.histograms
            .entry(name)
            .or_insert_with(|| {
                Arc::new(
                    self.meter
                        .f64_histogram(name)
                        .with_description(description)
                        .with_unit(unit)
                        .build(),
                )
            })
            .value()
            .clone()
    }
}

impl MetricsBackend for ProductMetrics {
    fn increment_counter(
        &self,
        name: &'static str,
        description: &'static str,
        attributes: &AttributeSet,
    ) {
        self.counter(name, description)
            .add(1, &to_key_values(attributes));
    }

    fn record_histogram(
        &self,
        name: &'static str,
        description: &'static str,
        unit: &'static str,
        value: f64,
        attributes: &AttributeSet,
    ) {
        self.histogram(name, description, unit)
            .record(value, &to_key_values(attributes));
    }
}

fn to_key_values(attributes: &AttributeSet) -> Vec<KeyValue> {
    attributes
        .iter()
        .map(|(key, value)| match value {
            AttributeValue::Str(s) => KeyValue::new(*key, s.clone()),
            AttributeValue::Bool(b) => KeyValue::new(*key, *b),
        })
        .collect()
}

/// Install the process-wide meter provider.
///
/// When `OTLP_ENDPOINT` is configured, a periodic OTLP reader exports on the
/// configured interval; without it, instruments still register but no data
/// leaves the process.
///
/// # Errors
///
/// Returns an error if the OTLP exporter cannot be built.
pub fn init_meter_provider(config: &Config) -> Result<SdkMeterProvider, String> {
    let resource = Resource::new(vec![
        KeyValue::new("service.name", config.service_name.clone()),
        KeyValue::new("deployment.environment", config.environment.clone()),
    ]);

    let mut builder = SdkMeterProvider::builder().with_resource(resource);

    match &config.otlp_endpoint {
        Some(endpoint) => {
            let exporter = MetricExporter::builder()
                .with_tonic()
                .with_endpoint(endpoint.clone())
                .build()
                .map_err(|e| format!("Failed to build OTLP metric exporter: {e}"))?;

            let reader = PeriodicReader::builder(exporter, opentelemetry_sdk::runtime::Tokio)
                .with_interval(Duration::from_secs(config.export_interval_secs))
                .build();

            builder = builder.with_reader(reader);
        }
        None => {
            warn!("OTLP_ENDPOINT not set; product metrics will not be exported");
        }
    }

    let provider = builder.build();
    global::set_meter_provider(provider.clone());

    Ok(provider)
}
