use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde_json::Value;
use tokio::sync::mpsc;

use crate::chain::interface::ChainError;
use crate::config::MetricKind;

/// One metric ready to be persisted, already shaped like its log record
/// (field names per the schema table in [`crate::config`]).
#[derive(Clone, Debug)]
pub struct RecordedMetric {
    pub kind: MetricKind,
    pub record: Value,
}

/// Collects metrics sent by instrumentation tasks over a channel and
/// persists them as the JSON logs the pipeline loader reads. Records are
/// kept in arrival order per kind, which becomes the log's insertion order.
#[derive(Debug)]
pub struct MetricRecorder {
    rx: mpsc::Receiver<RecordedMetric>,
    collected: HashMap<MetricKind, Vec<Value>>,
}

impl MetricRecorder {
    /// Creates a recorder and the sender handle instrumentation tasks use.
    pub fn channel(buffer: usize) -> (mpsc::Sender<RecordedMetric>, Self) {
        let (tx, rx) = mpsc::channel(buffer);
        (
            tx,
            MetricRecorder {
                rx,
                collected: HashMap::new(),
            },
        )
    }

    /// Receives metrics until every sender is dropped.
    pub async fn run(&mut self) {
        while let Some(metric) = self.rx.recv().await {
            log::trace!("recorded metric {:?}", metric.kind);
            self.collected
                .entry(metric.kind)
                .or_default()
                .push(metric.record);
        }
    }

    pub fn collected_count(&self, kind: MetricKind) -> usize {
        self.collected.get(&kind).map_or(0, Vec::len)
    }

    /// Writes one JSON array per metric kind into `dir`, named by the metric
    /// file-name table.
    pub fn flush(&self, dir: &Path) -> Result<(), ChainError> {
        fs::create_dir_all(dir)?;
        for (kind, records) in &self.collected {
            let path = dir.join(kind.file_name());
            let body = serde_json::to_string_pretty(records)?;
            fs::write(&path, body)?;
            log::info!("wrote {} records to {}", records.len(), path.display());
        }
        Ok(())
    }
}
