//! In-memory emission recorder for tests.
//!
//! Unlike an aggregating exporter, this backend keeps every emission in
//! arrival order, so tests can assert the exact sequence a flow produced.

use std::sync::Mutex;

use super::attributes::AttributeSet;
use super::registry::MetricsBackend;

#[derive(Debug, Clone, PartialEq)]
pub enum RecordedValue {
    CounterAdd(u64),
    HistogramRecord(f64),
}

#[derive(Debug, Clone)]
pub struct RecordedEmission {
    pub name: &'static str,
    pub value: RecordedValue,
    pub attributes: AttributeSet,
}

impl RecordedEmission {
    pub fn histogram_value(&self) -> Option<f64> {
        match self.value {
            RecordedValue::HistogramRecord(v) => Some(v),
            RecordedValue::CounterAdd(_) => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct RecordingBackend {
    emissions: Mutex<Vec<RecordedEmission>>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// All emissions so far, in arrival order.
    pub fn emissions(&self) -> Vec<RecordedEmission> {
        self.lock().clone()
    }

    /// Metric names in arrival order.
    pub fn names(&self) -> Vec<&'static str> {
        self.lock().iter().map(|e| e.name).collect()
    }

    /// All emissions for one metric name.
    pub fn by_name(&self, name: &str) -> Vec<RecordedEmission> {
        self.lock()
            .iter()
            .filter(|e| e.name == name)
            .cloned()
            .collect()
    }

    pub fn count(&self, name: &str) -> usize {
        self.lock().iter().filter(|e| e.name == name).count()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<RecordedEmission>> {
        match self.emissions.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl MetricsBackend for RecordingBackend {
    fn increment_counter(
        &self,
        name: &'static str,
        _description: &'static str,
        attributes: &AttributeSet,
    ) {
        self.lock().push(RecordedEmission {
            name,
            value: RecordedValue::CounterAdd(1),
            attributes: attributes.clone(),
        });
    }

    fn record_histogram(
        &self,
        name: &'static str,
        _description: &'static str,
        _unit: &'static str,
        value: f64,
        attributes: &AttributeSet,
    ) {
        self.lock().push(RecordedEmission {
            name,
            value: RecordedValue::HistogramRecord(value),
            attributes: attributes.clone(),
        });
    }
}
