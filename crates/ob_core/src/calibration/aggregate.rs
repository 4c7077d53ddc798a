//! Batch aggregation of flat per-game metric maps.

use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct SummaryStats {
    pub mean: f64,
    pub std: f64,
    pub p05: f64,
    pub p95: f64,
}

/// Accumulates flat metric maps and reports mean/std/percentiles per key.
#[derive(Debug, Default)]
pub struct StatsAccumulator {
    samples: BTreeMap<String, Vec<f64>>,
    n: usize,
}

impl StatsAccumulator {
    pub fn new() -> Self {
        StatsAccumulator::default()
    }

    pub fn add(&mut self, metrics: &BTreeMap<String, f64>) {
        self.n += 1;
        for (k, v) in metrics {
            if v.is_finite() {
                self.samples.entry(k.clone()).or_default().push(*v);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn summary(&self) -> BTreeMap<String, SummaryStats> {
        let mut out = BTreeMap::new();
        for (key, values) in &self.samples {
            if values.is_empty() {
                continue;
            }
            let n = values.len() as f64;
            let mean = values.iter().sum::<f64>() / n;
            let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
            let mut sorted = values.clone();
            sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
            let quantile = |q: f64| -> f64 {
                let idx = (q * (sorted.len() - 1) as f64).round() as usize;
                sorted[idx.min(sorted.len() - 1)]
            };
            out.insert(
                key.clone(),
                SummaryStats { mean, std: var.sqrt(), p05: quantile(0.05), p95: quantile(0.95) },
            );
        }
        out
    }
}
