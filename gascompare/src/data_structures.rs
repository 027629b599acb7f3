use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// Which of the two competing file-sharing schemes a metric belongs to
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Protocol {
    Algo2,
    Algo3,
}

impl Protocol {
    /// Human-readable name used in the comparison table and chart legends.
    pub fn system_label(&self) -> &'static str {
        match self {
            Protocol::Algo2 => "System 2",
            Protocol::Algo3 => "System 3",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            Protocol::Algo2 => "algo_2",
            Protocol::Algo3 => "algo_3",
        }
    }
}

// The two instrumented actions
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Upload,
    Share,
}

impl Operation {
    pub fn action_label(&self) -> &'static str {
        match self {
            Operation::Upload => "Upload",
            Operation::Share => "Share",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            Operation::Upload => "upload",
            Operation::Share => "share",
        }
    }
}

// Which side recorded a metric: the client or the network service (DPCN)
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    Client,
    Network,
}

/// Event identifier as it appears in a log record, resolved to its shape at
/// load time. Upload-style logs carry a raw numeric file id; share request
/// logs carry a composite `"X|Y"` request id whose second segment is the
/// comparable sequence number.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EventId {
    FileId(u64),
    RequestId(String),
}

/// One persisted observation, immutable once loaded.
#[derive(Clone, Debug, PartialEq)]
pub struct MetricRecord {
    pub protocol: Protocol,
    pub operation: Operation,
    pub origin: Origin,
    pub actor: String,
    pub event: EventId,
    pub gas_used: u64,
}

/// Canonical per-event key `"{actor}|{local_event_id}"`, identical on the
/// client-origin and network-origin record of the same logical event.
pub type JoinKey = String;

/// Insertion-ordered mapping JoinKey -> gas used, for one
/// (protocol, operation, origin) triple. Insertion order is the source log
/// order and drives the merged series.
pub type CostMapping = IndexMap<JoinKey, u64>;

/// Per-event total costs (client + network), in client-log order.
pub type MergedSeries = Vec<u64>;

/// One row of the cross-protocol comparison table.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ComparativeObservation {
    pub system: &'static str,
    pub action: &'static str,
    pub gas_used: u64,
}

/// ComparativeObservation plus its z-score within the (system, action) group.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NormalizedObservation {
    pub system: &'static str,
    pub action: &'static str,
    pub gas_used: u64,
    pub normalized_gas_used: f64,
}
