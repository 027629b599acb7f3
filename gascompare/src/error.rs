use crate::data_structures::JoinKey;
use thiserror::Error;

/// Structural errors of the aggregation pipeline. Every one of these is a
/// property of the input data, so nothing here is retried; an error aborts
/// the computation that depends on it and names the offending file or key.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("cannot read metric log {file}: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },

    /// A record is missing a required field or carries a wrong type. The
    /// whole load fails; a partially-loaded mapping would corrupt later
    /// joins.
    #[error("schema violation in {file}: {detail}")]
    SchemaViolation { file: String, detail: String },

    /// A share request id did not have exactly one `|` delimiter. Never
    /// truncated silently: a truncated id would misjoin client and network
    /// data for different events.
    #[error("malformed share identifier {identifier:?}: expected exactly one '|' delimiter")]
    MalformedIdentifier { identifier: String },

    /// A client-side event has no network-side counterpart. Never defaulted
    /// to zero: a silent zero would understate the network cost and bias
    /// every downstream statistic.
    #[error("client event {key:?} has no network-side counterpart")]
    UnmatchedEvent { key: JoinKey },

    /// Two records in one log normalize to the same join key. Overwriting
    /// would drop a real observation.
    #[error("duplicate join key {key:?} in {file}")]
    DuplicateKey { key: JoinKey, file: String },

    /// Not enough data for the requested reduction or normalization. Fatal
    /// for that computation only; unrelated (protocol, operation) pairs are
    /// unaffected.
    #[error("insufficient samples: have {have}, need at least {need}")]
    InsufficientSamples { have: usize, need: usize },
}

pub type Result<T> = std::result::Result<T, PipelineError>;
