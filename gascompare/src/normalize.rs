use indexmap::IndexMap;

use crate::data_structures::{ComparativeObservation, NormalizedObservation};
use crate::error::PipelineError;

/// Outcome of normalizing one comparison table: the rows of every partition
/// that could be normalized, plus the partitions that could not. A
/// degenerate partition is reported here instead of suppressing its
/// siblings.
#[derive(Debug)]
pub struct Normalized {
    pub rows: Vec<NormalizedObservation>,
    pub skipped: Vec<SkippedPartition>,
}

/// A partition left out of the normalized table, with the error that
/// excluded it.
#[derive(Debug)]
pub struct SkippedPartition {
    pub system: &'static str,
    pub action: &'static str,
    pub error: PipelineError,
}

/// Attach per-(system, action) z-scores to the comparative table so series
/// two orders of magnitude apart share one axis. Partitioning is by label
/// pair; row order is preserved. A zero-variance partition normalizes to
/// exactly 0.0 (no spread, no division by zero); a partition with fewer than
/// two rows has no sample standard deviation and is skipped with
/// `InsufficientSamples`, leaving every other partition's rows intact.
pub fn normalize(table: &[ComparativeObservation]) -> Normalized {
    let mut groups: IndexMap<(&'static str, &'static str), Vec<f64>> = IndexMap::new();
    for row in table {
        groups
            .entry((row.system, row.action))
            .or_default()
            .push(row.gas_used as f64);
    }

    let mut stats: IndexMap<(&'static str, &'static str), (f64, f64)> = IndexMap::new();
    let mut skipped = Vec::new();
    for (label, values) in &groups {
        if values.len() < 2 {
            skipped.push(SkippedPartition {
                system: label.0,
                action: label.1,
                error: PipelineError::InsufficientSamples {
                    have: values.len(),
                    need: 2,
                },
            });
            continue;
        }
        stats.insert(*label, mean_and_sample_std(values));
    }

    let rows = table
        .iter()
        .filter_map(|row| {
            let (mean, std) = *stats.get(&(row.system, row.action))?;
            let normalized_gas_used = if std == 0.0 {
                0.0
            } else {
                (row.gas_used as f64 - mean) / std
            };
            Some(NormalizedObservation {
                system: row.system,
                action: row.action,
                gas_used: row.gas_used,
                normalized_gas_used,
            })
        })
        .collect();

    Normalized { rows, skipped }
}

/// Mean and sample standard deviation (n - 1 denominator).
fn mean_and_sample_std(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    (mean, variance.sqrt())
}
