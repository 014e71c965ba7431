// SPDX-License-Identifier: MIT

//! Append-only observability sink.
//!
//! Every invocation leaves one record here, and handlers may push values onto
//! named numeric series for later summarization. Records are never rewritten.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

/// One completed tool invocation.
#[derive(Debug, Clone)]
pub struct InvocationRecord {
    pub id: Uuid,
    pub tool: String,
    pub success: bool,
    pub duration_ms: u64,
    pub timestamp: DateTime<Utc>,
}

/// Summary of one numeric series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSummary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

#[derive(Default)]
pub struct MetricsSink {
    records: Mutex<Vec<InvocationRecord>>,
    series: Mutex<HashMap<String, Vec<f64>>>,
}

impl MetricsSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one invocation record. Never fails; a poisoned lock is treated
    /// as lost telemetry, not a tool failure.
    pub fn record_invocation(&self, tool: &str, success: bool, duration_ms: u64) -> Uuid {
        let id = Uuid::new_v4();
        let record = InvocationRecord {
            id,
            tool: tool.to_string(),
            success,
            duration_ms,
            timestamp: Utc::now(),
        };
        if let Ok(mut records) = self.records.lock() {
            records.push(record);
        }
        self.record_value(&format!("tool.{}.duration_ms", tool), duration_ms as f64);
        id
    }

    /// Append a value to a named series.
    pub fn record_value(&self, series: &str, value: f64) {
        if let Ok(mut map) = self.series.lock() {
            map.entry(series.to_string()).or_default().push(value);
        }
    }

    pub fn invocation_count(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn invocations(&self) -> Vec<InvocationRecord> {
        self.records.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// Summarize one series, if any values were recorded.
    pub fn summarize(&self, series: &str) -> Option<SeriesSummary> {
        let map = self.series.lock().ok()?;
        let values = map.get(series)?;
        if values.is_empty() {
            return None;
        }
        let (mut min, mut max, mut sum) = (f64::INFINITY, f64::NEG_INFINITY, 0.0);
        for &v in values {
            min = min.min(v);
            max = max.max(v);
            sum += v;
        }
        Some(SeriesSummary {
            count: values.len(),
            min,
            max,
            mean: sum / values.len() as f64,
        })
    }
}
